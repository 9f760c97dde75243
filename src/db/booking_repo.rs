// src/db/booking_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, scope::TenantScope},
    models::booking::{Booking, BookingDetail, BookingRequest},
};

#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Reservas do hotel com nome do hóspede e número do quarto, mais recentes primeiro.
    pub async fn list_details(&self, scope: TenantScope) -> Result<Vec<BookingDetail>, AppError> {
        let bookings = sqlx::query_as::<_, BookingDetail>(
            r#"
            SELECT b.*,
                   g.first_name || ' ' || g.last_name AS guest_name,
                   r.room_number
            FROM bookings b
            JOIN guests g ON g.id = b.guest_id
            JOIN rooms r ON r.id = b.room_id
            WHERE b.tenant_id = $1
            ORDER BY b.created_at DESC
            "#,
        )
            .bind(scope.tenant_id())
            .fetch_all(&self.pool)
            .await?;
        Ok(bookings)
    }

    pub async fn find<'e, E>(
        &self,
        executor: E,
        scope: TenantScope,
        booking_id: Uuid,
    ) -> Result<Option<Booking>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let booking = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE id = $1 AND tenant_id = $2",
        )
            .bind(booking_id)
            .bind(scope.tenant_id())
            .fetch_optional(executor)
            .await?;
        Ok(booking)
    }

    /// Lê a reserva travando a linha (edições concorrentes da mesma reserva ficam em fila).
    pub async fn find_for_update<'e, E>(
        &self,
        executor: E,
        scope: TenantScope,
        booking_id: Uuid,
    ) -> Result<Option<Booking>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let booking = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE id = $1 AND tenant_id = $2 FOR UPDATE",
        )
            .bind(booking_id)
            .bind(scope.tenant_id())
            .fetch_optional(executor)
            .await?;
        Ok(booking)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        scope: TenantScope,
        request: &BookingRequest,
    ) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (tenant_id, guest_id, room_id, check_in_date, check_out_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
            .bind(scope.tenant_id())
            .bind(request.guest_id)
            .bind(request.room_id)
            .bind(request.check_in_date)
            .bind(request.check_out_date)
            .fetch_one(executor)
            .await?;
        Ok(booking)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        scope: TenantScope,
        booking_id: Uuid,
        request: &BookingRequest,
    ) -> Result<Option<Booking>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET guest_id = $3, room_id = $4, check_in_date = $5, check_out_date = $6
            WHERE id = $1 AND tenant_id = $2
            RETURNING *
            "#,
        )
            .bind(booking_id)
            .bind(scope.tenant_id())
            .bind(request.guest_id)
            .bind(request.room_id)
            .bind(request.check_in_date)
            .bind(request.check_out_date)
            .fetch_optional(executor)
            .await?;
        Ok(booking)
    }

    // As notificações da reserva saem junto (ON DELETE CASCADE).
    pub async fn delete<'e, E>(
        &self,
        executor: E,
        scope: TenantScope,
        booking_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1 AND tenant_id = $2")
            .bind(booking_id)
            .bind(scope.tenant_id())
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
