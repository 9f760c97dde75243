// src/services/allocator.rs

use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    common::{error::AppError, scope::TenantScope},
    db::RoomRepository,
    models::room::{Room, RoomStatus},
};

/// O que a edição de uma reserva faz com os quartos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomChange {
    Keep,
    Reassign { from: Uuid, to: Uuid },
}

impl RoomChange {
    pub fn plan(current_room: Uuid, requested_room: Uuid) -> Self {
        if current_room == requested_room {
            RoomChange::Keep
        } else {
            RoomChange::Reassign {
                from: current_room,
                to: requested_room,
            }
        }
    }
}

/// Mantém `rooms.status` coerente com as reservas.
///
/// Todas as operações recebem a conexão da transação do chamador: o quarto e a
/// reserva são gravados juntos ou nada é gravado.
#[derive(Clone)]
pub struct RoomAllocator {
    rooms: RoomRepository,
}

impl RoomAllocator {
    pub fn new(rooms: RoomRepository) -> Self {
        Self { rooms }
    }

    /// Trava o quarto e devolve-o se estiver `available` neste hotel.
    pub async fn acquire(
        &self,
        conn: &mut PgConnection,
        scope: TenantScope,
        room_id: Uuid,
    ) -> Result<Room, AppError> {
        let room = self
            .rooms
            .find_for_update(&mut *conn, scope, room_id)
            .await?
            .ok_or_else(|| AppError::RoomUnavailable {
                room_number: room_id.to_string(),
            })?;

        if room.status != RoomStatus::Available {
            return Err(AppError::RoomUnavailable {
                room_number: room.room_number,
            });
        }

        Ok(room)
    }

    /// `available -> occupied` como compare-and-swap. Zero linhas = corrida perdida.
    pub async fn occupy(
        &self,
        conn: &mut PgConnection,
        scope: TenantScope,
        room: &Room,
    ) -> Result<Room, AppError> {
        self.rooms
            .transition_status(
                &mut *conn,
                scope,
                room.id,
                RoomStatus::Available,
                RoomStatus::Occupied,
            )
            .await?
            .ok_or_else(|| AppError::RoomUnavailable {
                room_number: room.room_number.clone(),
            })
    }

    /// Devolve o quarto para `available`. Idempotente; quarto inexistente não é erro.
    pub async fn release(
        &self,
        conn: &mut PgConnection,
        scope: TenantScope,
        room_id: Uuid,
    ) -> Result<bool, AppError> {
        let affected = self.rooms.mark_available(&mut *conn, scope, room_id).await?;
        Ok(affected > 0)
    }

    /// Troca de quarto: ocupa o novo antes de liberar o antigo.
    /// Se o novo não estiver disponível, nada muda.
    pub async fn reassign(
        &self,
        conn: &mut PgConnection,
        scope: TenantScope,
        old_room_id: Uuid,
        new_room_id: Uuid,
    ) -> Result<Room, AppError> {
        let candidate = self.acquire(&mut *conn, scope, new_room_id).await?;
        let occupied = self.occupy(&mut *conn, scope, &candidate).await?;
        self.release(&mut *conn, scope, old_room_id).await?;
        Ok(occupied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use sqlx::PgPool;

    #[test]
    fn same_room_keeps_allocation() {
        let room = Uuid::new_v4();
        assert_eq!(RoomChange::plan(room, room), RoomChange::Keep);
    }

    #[test]
    fn different_room_is_a_reassign() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(RoomChange::plan(a, b), RoomChange::Reassign { from: a, to: b });
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer DATABASE_URL apontando para um Postgres"]
    async fn acquire_rejects_rooms_of_other_tenants(pool: PgPool) {
        let hotel_a = test_support::seed_tenant(&pool, "Hotel A").await;
        let hotel_b = test_support::seed_tenant(&pool, "Hotel B").await;
        let room_b = test_support::seed_room(&pool, hotel_b, "201").await;

        let allocator = RoomAllocator::new(RoomRepository::new(pool.clone()));
        let mut conn = pool.acquire().await.unwrap();

        let err = allocator.acquire(&mut conn, hotel_a, room_b.id).await.unwrap_err();
        assert!(matches!(err, AppError::RoomUnavailable { .. }));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer DATABASE_URL apontando para um Postgres"]
    async fn occupy_fails_when_room_already_taken(pool: PgPool) {
        let hotel = test_support::seed_tenant(&pool, "Hotel").await;
        let room = test_support::seed_room(&pool, hotel, "101").await;

        let allocator = RoomAllocator::new(RoomRepository::new(pool.clone()));
        let mut conn = pool.acquire().await.unwrap();

        // Dois chamadores viram `available`; só o primeiro CAS vence.
        allocator.occupy(&mut conn, hotel, &room).await.unwrap();
        let err = allocator.occupy(&mut conn, hotel, &room).await.unwrap_err();

        match err {
            AppError::RoomUnavailable { room_number } => assert_eq!(room_number, "101"),
            other => panic!("erro inesperado: {other:?}"),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer DATABASE_URL apontando para um Postgres"]
    async fn release_is_idempotent(pool: PgPool) {
        let hotel = test_support::seed_tenant(&pool, "Hotel").await;
        let room = test_support::seed_room(&pool, hotel, "101").await;

        let allocator = RoomAllocator::new(RoomRepository::new(pool.clone()));
        let mut conn = pool.acquire().await.unwrap();

        allocator.occupy(&mut conn, hotel, &room).await.unwrap();
        assert!(allocator.release(&mut conn, hotel, room.id).await.unwrap());
        assert!(allocator.release(&mut conn, hotel, room.id).await.unwrap());
        assert!(!allocator.release(&mut conn, hotel, Uuid::new_v4()).await.unwrap());

        let status = test_support::room_status(&pool, room.id).await;
        assert_eq!(status, RoomStatus::Available);
    }
}
