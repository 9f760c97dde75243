// src/db/guest_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, scope::TenantScope},
    models::guest::{Guest, GuestFields},
};

#[derive(Clone)]
pub struct GuestRepository {
    pool: PgPool,
}

impl GuestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, scope: TenantScope) -> Result<Vec<Guest>, AppError> {
        let guests = sqlx::query_as::<_, Guest>(
            "SELECT * FROM guests WHERE tenant_id = $1 ORDER BY last_name ASC, first_name ASC",
        )
            .bind(scope.tenant_id())
            .fetch_all(&self.pool)
            .await?;
        Ok(guests)
    }

    pub async fn find<'e, E>(
        &self,
        executor: E,
        scope: TenantScope,
        guest_id: Uuid,
    ) -> Result<Option<Guest>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let guest = sqlx::query_as::<_, Guest>("SELECT * FROM guests WHERE id = $1 AND tenant_id = $2")
            .bind(guest_id)
            .bind(scope.tenant_id())
            .fetch_optional(executor)
            .await?;
        Ok(guest)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        scope: TenantScope,
        fields: &GuestFields,
    ) -> Result<Guest, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let guest = sqlx::query_as::<_, Guest>(
            r#"
            INSERT INTO guests (tenant_id, first_name, last_name, email, phone, check_in_date, check_out_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
            .bind(scope.tenant_id())
            .bind(&fields.first_name)
            .bind(&fields.last_name)
            .bind(&fields.email)
            .bind(&fields.phone)
            .bind(fields.check_in_date)
            .bind(fields.check_out_date)
            .fetch_one(executor)
            .await?;
        Ok(guest)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        scope: TenantScope,
        guest_id: Uuid,
        fields: &GuestFields,
    ) -> Result<Option<Guest>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let guest = sqlx::query_as::<_, Guest>(
            r#"
            UPDATE guests
            SET first_name = $3, last_name = $4, email = $5, phone = $6,
                check_in_date = $7, check_out_date = $8
            WHERE id = $1 AND tenant_id = $2
            RETURNING *
            "#,
        )
            .bind(guest_id)
            .bind(scope.tenant_id())
            .bind(&fields.first_name)
            .bind(&fields.last_name)
            .bind(&fields.email)
            .bind(&fields.phone)
            .bind(fields.check_in_date)
            .bind(fields.check_out_date)
            .fetch_optional(executor)
            .await?;
        Ok(guest)
    }

    pub async fn delete<'e, E>(
        &self,
        executor: E,
        scope: TenantScope,
        guest_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM guests WHERE id = $1 AND tenant_id = $2")
            .bind(guest_id)
            .bind(scope.tenant_id())
            .execute(executor)
            .await
            .map_err(|e| {
                // Reservas apontam para o hóspede (ON DELETE RESTRICT)
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return AppError::Conflict(
                            "O hóspede possui reservas e não pode ser removido.".to_string(),
                        );
                    }
                }
                e.into()
            })?;
        Ok(result.rows_affected())
    }
}
