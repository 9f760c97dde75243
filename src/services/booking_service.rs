// src/services/booking_service.rs

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;
use validator::ValidationErrors;

use crate::{
    common::{error::AppError, scope::TenantScope},
    db::{BookingRepository, GuestRepository, RoomRepository},
    models::booking::{validate_stay, Booking, BookingDetail, BookingRequest},
    services::allocator::{RoomAllocator, RoomChange},
};

#[derive(Clone)]
pub struct BookingService {
    bookings: BookingRepository,
    guests: GuestRepository,
    rooms: RoomRepository,
    allocator: RoomAllocator,
    pool: PgPool, // Usamos a pool para iniciar transações
}

impl BookingService {
    pub fn new(
        bookings: BookingRepository,
        guests: GuestRepository,
        rooms: RoomRepository,
        allocator: RoomAllocator,
        pool: PgPool,
    ) -> Self {
        Self { bookings, guests, rooms, allocator, pool }
    }

    pub async fn list(&self, scope: TenantScope) -> Result<Vec<BookingDetail>, AppError> {
        self.bookings.list_details(scope).await
    }

    pub async fn get(&self, scope: TenantScope, booking_id: Uuid) -> Result<Booking, AppError> {
        self.bookings
            .find(&self.pool, scope, booking_id)
            .await?
            .ok_or(AppError::NotFound("Reserva"))
    }

    /// Cria a reserva e ocupa o quarto na mesma transação.
    pub async fn create(&self, scope: TenantScope, request: BookingRequest) -> Result<Booking, AppError> {
        check_dates(&request)?;

        let mut tx = self.pool.begin().await?;

        self.ensure_references(&mut tx, scope, &request).await?;

        // 1. Trava o quarto e confere `available`
        let room = self.allocator.acquire(&mut tx, scope, request.room_id).await?;

        // 2. Grava a reserva
        let booking = self.bookings.create(&mut *tx, scope, &request).await?;

        // 3. Ocupa o quarto (CAS). Se falhar, a reserva acima é desfeita no drop do `tx`.
        self.allocator.occupy(&mut tx, scope, &room).await?;

        tx.commit().await?;

        tracing::info!(
            tenant_id = %scope.tenant_id(),
            booking_id = %booking.id,
            room_number = %room.room_number,
            "Reserva criada"
        );
        Ok(booking)
    }

    /// Edita hóspede, quarto e datas. Trocar de quarto ocupa o novo antes de liberar o antigo.
    pub async fn update(
        &self,
        scope: TenantScope,
        booking_id: Uuid,
        request: BookingRequest,
    ) -> Result<Booking, AppError> {
        check_dates(&request)?;

        let mut tx = self.pool.begin().await?;

        let current = self
            .bookings
            .find_for_update(&mut *tx, scope, booking_id)
            .await?
            .ok_or(AppError::NotFound("Reserva"))?;

        self.ensure_references(&mut tx, scope, &request).await?;

        let change = RoomChange::plan(current.room_id, request.room_id);
        if let RoomChange::Reassign { from, to } = change {
            let room = self.allocator.reassign(&mut tx, scope, from, to).await?;
            tracing::info!(
                tenant_id = %scope.tenant_id(),
                booking_id = %booking_id,
                room_number = %room.room_number,
                "Reserva transferida de quarto"
            );
        }

        let updated = self
            .bookings
            .update(&mut *tx, scope, booking_id, &request)
            .await?
            .ok_or(AppError::NotFound("Reserva"))?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Cancela a reserva e devolve o quarto para `available`.
    pub async fn destroy(&self, scope: TenantScope, booking_id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let booking = self
            .bookings
            .find_for_update(&mut *tx, scope, booking_id)
            .await?
            .ok_or(AppError::NotFound("Reserva"))?;

        // Sempre libera, mesmo que o quarto já esteja livre
        let released = self.allocator.release(&mut tx, scope, booking.room_id).await?;

        self.bookings.delete(&mut *tx, scope, booking_id).await?;

        tx.commit().await?;

        tracing::info!(
            tenant_id = %scope.tenant_id(),
            booking_id = %booking_id,
            room_released = released,
            "Reserva removida"
        );
        Ok(())
    }

    // Hóspede e quarto precisam existir *neste* hotel.
    async fn ensure_references(
        &self,
        conn: &mut PgConnection,
        scope: TenantScope,
        request: &BookingRequest,
    ) -> Result<(), AppError> {
        if self.guests.find(&mut *conn, scope, request.guest_id).await?.is_none() {
            return Err(AppError::field(
                "guestId",
                "not_found",
                "Hóspede não encontrado neste hotel.",
            ));
        }
        if self.rooms.find(&mut *conn, scope, request.room_id).await?.is_none() {
            return Err(AppError::field(
                "roomId",
                "not_found",
                "Quarto não encontrado neste hotel.",
            ));
        }
        Ok(())
    }
}

fn check_dates(request: &BookingRequest) -> Result<(), AppError> {
    validate_stay(request.check_in_date, request.check_out_date).map_err(|e| {
        let mut errors = ValidationErrors::new();
        errors.add("checkOutDate", e);
        AppError::ValidationError(errors)
    })
}
