// src/services/room_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::{
    common::{error::AppError, scope::TenantScope},
    db::RoomRepository,
    models::room::{validate_price, Room, RoomStatus},
};

#[derive(Clone)]
pub struct RoomService {
    rooms: RoomRepository,
    pool: PgPool,
}

impl RoomService {
    pub fn new(rooms: RoomRepository, pool: PgPool) -> Self {
        Self { rooms, pool }
    }

    pub async fn list(&self, scope: TenantScope) -> Result<Vec<Room>, AppError> {
        self.rooms.list(scope).await
    }

    pub async fn get(&self, scope: TenantScope, room_id: Uuid) -> Result<Room, AppError> {
        self.rooms
            .find(&self.pool, scope, room_id)
            .await?
            .ok_or(AppError::NotFound("Quarto"))
    }

    /// Quarto novo nasce `available` ou em `maintenance`; nunca `occupied`.
    pub async fn create(
        &self,
        scope: TenantScope,
        room_number: &str,
        room_type: &str,
        price_per_night: Decimal,
        status: Option<RoomStatus>,
    ) -> Result<Room, AppError> {
        check_price(&price_per_night)?;
        let status = status.unwrap_or(RoomStatus::Available);
        if status == RoomStatus::Occupied {
            return Err(occupied_by_hand());
        }

        let room = self
            .rooms
            .create(&self.pool, scope, room_number, room_type, price_per_night, status)
            .await?;

        tracing::info!(tenant_id = %scope.tenant_id(), room_number = %room.room_number, "Quarto criado");
        Ok(room)
    }

    /// Edita os dados do quarto. Status manual só entre `available` e `maintenance`.
    pub async fn update(
        &self,
        scope: TenantScope,
        room_id: Uuid,
        room_number: &str,
        room_type: &str,
        price_per_night: Decimal,
        status: Option<RoomStatus>,
    ) -> Result<Room, AppError> {
        check_price(&price_per_night)?;
        let mut tx = self.pool.begin().await?;

        let current = self
            .rooms
            .find_for_update(&mut *tx, scope, room_id)
            .await?
            .ok_or(AppError::NotFound("Quarto"))?;

        if let Some(target) = status {
            if !current.status.can_set_manually(target) {
                return Err(occupied_by_hand());
            }
            if target != current.status {
                self.rooms
                    .transition_status(&mut *tx, scope, room_id, current.status, target)
                    .await?
                    .ok_or(AppError::NotFound("Quarto"))?;
            }
        }

        let room = self
            .rooms
            .update_details(&mut *tx, scope, room_id, room_number, room_type, price_per_night)
            .await?
            .ok_or(AppError::NotFound("Quarto"))?;

        tx.commit().await?;
        Ok(room)
    }

    /// Quarto com reservas não pode ser removido.
    pub async fn delete(&self, scope: TenantScope, room_id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        self.rooms
            .find_for_update(&mut *tx, scope, room_id)
            .await?
            .ok_or(AppError::NotFound("Quarto"))?;

        if self.rooms.has_bookings(&mut *tx, scope, room_id).await? {
            return Err(AppError::Conflict(
                "O quarto possui reservas e não pode ser removido.".to_string(),
            ));
        }

        self.rooms.delete(&mut *tx, scope, room_id).await?;
        tx.commit().await?;
        Ok(())
    }
}

// Mesma regra do formulário, com a chave da API.
fn check_price(price: &Decimal) -> Result<(), AppError> {
    validate_price(price).map_err(|e| {
        let mut errors = ValidationErrors::new();
        errors.add("pricePerNight", e);
        AppError::ValidationError(errors)
    })
}

fn occupied_by_hand() -> AppError {
    AppError::field(
        "status",
        "managed_by_bookings",
        "O status 'occupied' é controlado pelas reservas.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{room_status, seed_tenant};

    fn service(pool: &PgPool) -> RoomService {
        RoomService::new(RoomRepository::new(pool.clone()), pool.clone())
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer DATABASE_URL apontando para um Postgres"]
    async fn rooms_cannot_be_created_occupied(pool: PgPool) {
        let hotel = seed_tenant(&pool, "Hotel").await;
        let svc = service(&pool);

        let err = svc
            .create(hotel, "101", "Casal", Decimal::new(100, 0), Some(RoomStatus::Occupied))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(svc.list(hotel).await.unwrap().is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer DATABASE_URL apontando para um Postgres"]
    async fn maintenance_round_trip_and_tenant_isolation(pool: PgPool) {
        let hotel = seed_tenant(&pool, "Hotel").await;
        let other = seed_tenant(&pool, "Outro").await;
        let svc = service(&pool);

        let room = svc
            .create(hotel, "101", "Casal", Decimal::new(100, 0), None)
            .await
            .unwrap();
        assert_eq!(room.status, RoomStatus::Available);

        let updated = svc
            .update(hotel, room.id, "101A", "Suíte", Decimal::new(180, 0), Some(RoomStatus::Maintenance))
            .await
            .unwrap();
        assert_eq!(updated.room_number, "101A");
        assert_eq!(room_status(&pool, room.id).await, RoomStatus::Maintenance);

        assert!(matches!(svc.get(other, room.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(svc.delete(other, room.id).await, Err(AppError::NotFound(_))));

        svc.delete(hotel, room.id).await.unwrap();
        assert!(matches!(svc.get(hotel, room.id).await, Err(AppError::NotFound(_))));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer DATABASE_URL apontando para um Postgres"]
    async fn prices_outside_the_column_are_field_errors(pool: PgPool) {
        let hotel = seed_tenant(&pool, "Hotel").await;
        let svc = service(&pool);

        for price in [Decimal::new(100_000_000, 0), Decimal::new(12_345, 3)] {
            match svc.create(hotel, "101", "Casal", price, None).await {
                Err(AppError::ValidationError(errors)) => {
                    assert!(errors.field_errors().contains_key("pricePerNight"))
                }
                other => panic!("esperava erro de validação, veio {other:?}"),
            }
        }
        assert!(svc.list(hotel).await.unwrap().is_empty());

        let room = svc.create(hotel, "101", "Casal", Decimal::new(1230, 2), None).await.unwrap();
        assert!(matches!(
            svc.update(hotel, room.id, "101", "Casal", Decimal::new(100_000_000, 0), None).await,
            Err(AppError::ValidationError(_))
        ));
    }
}
