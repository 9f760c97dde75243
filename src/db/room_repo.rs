// src/db/room_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, scope::TenantScope},
    models::room::{Room, RoomStatus},
};

#[derive(Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Leitura simples: usa a pool principal.
    pub async fn list(&self, scope: TenantScope) -> Result<Vec<Room>, AppError> {
        let rooms = sqlx::query_as::<_, Room>(
            "SELECT * FROM rooms WHERE tenant_id = $1 ORDER BY created_at DESC",
        )
            .bind(scope.tenant_id())
            .fetch_all(&self.pool)
            .await?;
        Ok(rooms)
    }

    pub async fn find<'e, E>(
        &self,
        executor: E,
        scope: TenantScope,
        room_id: Uuid,
    ) -> Result<Option<Room>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let room = sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1 AND tenant_id = $2")
            .bind(room_id)
            .bind(scope.tenant_id())
            .fetch_optional(executor)
            .await?;
        Ok(room)
    }

    /// Lê o quarto travando a linha até o fim da transação.
    pub async fn find_for_update<'e, E>(
        &self,
        executor: E,
        scope: TenantScope,
        room_id: Uuid,
    ) -> Result<Option<Room>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let room = sqlx::query_as::<_, Room>(
            "SELECT * FROM rooms WHERE id = $1 AND tenant_id = $2 FOR UPDATE",
        )
            .bind(room_id)
            .bind(scope.tenant_id())
            .fetch_optional(executor)
            .await?;
        Ok(room)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        scope: TenantScope,
        room_number: &str,
        room_type: &str,
        price_per_night: Decimal,
        status: RoomStatus,
    ) -> Result<Room, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let room = sqlx::query_as::<_, Room>(
            r#"
            INSERT INTO rooms (tenant_id, room_number, room_type, price_per_night, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
            .bind(scope.tenant_id())
            .bind(room_number)
            .bind(room_type)
            .bind(price_per_night)
            .bind(status)
            .fetch_one(executor)
            .await?;
        Ok(room)
    }

    /// Atualiza os dados descritivos. O status não passa por aqui.
    pub async fn update_details<'e, E>(
        &self,
        executor: E,
        scope: TenantScope,
        room_id: Uuid,
        room_number: &str,
        room_type: &str,
        price_per_night: Decimal,
    ) -> Result<Option<Room>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let room = sqlx::query_as::<_, Room>(
            r#"
            UPDATE rooms
            SET room_number = $3, room_type = $4, price_per_night = $5
            WHERE id = $1 AND tenant_id = $2
            RETURNING *
            "#,
        )
            .bind(room_id)
            .bind(scope.tenant_id())
            .bind(room_number)
            .bind(room_type)
            .bind(price_per_night)
            .fetch_optional(executor)
            .await?;
        Ok(room)
    }

    /// Compare-and-swap do status: só altera se o status atual for `from`.
    ///
    /// `None` quando o quarto não existe neste hotel ou já não está em `from`.
    pub async fn transition_status<'e, E>(
        &self,
        executor: E,
        scope: TenantScope,
        room_id: Uuid,
        from: RoomStatus,
        to: RoomStatus,
    ) -> Result<Option<Room>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let room = sqlx::query_as::<_, Room>(
            r#"
            UPDATE rooms
            SET status = $4
            WHERE id = $1 AND tenant_id = $2 AND status = $3
            RETURNING *
            "#,
        )
            .bind(room_id)
            .bind(scope.tenant_id())
            .bind(from)
            .bind(to)
            .fetch_optional(executor)
            .await?;
        Ok(room)
    }

    /// Força `available`, qualquer que seja o status atual. Retorna as linhas afetadas.
    pub async fn mark_available<'e, E>(
        &self,
        executor: E,
        scope: TenantScope,
        room_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("UPDATE rooms SET status = $3 WHERE id = $1 AND tenant_id = $2")
            .bind(room_id)
            .bind(scope.tenant_id())
            .bind(RoomStatus::Available)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn has_bookings<'e, E>(
        &self,
        executor: E,
        scope: TenantScope,
        room_id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM bookings WHERE room_id = $1 AND tenant_id = $2)",
        )
            .bind(room_id)
            .bind(scope.tenant_id())
            .fetch_one(executor)
            .await?;
        Ok(exists)
    }

    pub async fn delete<'e, E>(
        &self,
        executor: E,
        scope: TenantScope,
        room_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1 AND tenant_id = $2")
            .bind(room_id)
            .bind(scope.tenant_id())
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
