// src/db/tenancy_repo.rs

use sqlx::{PgPool, Postgres, Executor};
use uuid::Uuid;
use crate::common::error::AppError;
use crate::models::hotel::{HotelSummary, Tenant};

#[derive(Clone)]
pub struct TenantRepository {
    pool: PgPool,
}

impl TenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Cria um novo hotel (tenant) na base de dados.
    pub async fn create_tenant<'e, E>(
        &self,
        executor: E, // Aceita um executor (pool ou transação)
        name: &str,
        address: Option<&str>,
        contact: Option<&str>,
    ) -> Result<Tenant, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tenant = sqlx::query_as::<_, Tenant>(
            r#"
            INSERT INTO tenants (name, address, contact)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
            .bind(name)
            .bind(address)
            .bind(contact)
            .fetch_one(executor)
            .await?;
        Ok(tenant)
    }

    pub async fn exists(&self, tenant_id: Uuid) -> Result<bool, AppError> {
        // SELECT EXISTS: apenas 'true' ou 'false'.
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM tenants WHERE id = $1)")
            .bind(tenant_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Todos os hotéis com total de quartos e de gerentes (visão do administrador).
    pub async fn list_summaries(&self) -> Result<Vec<HotelSummary>, AppError> {
        let hotels = sqlx::query_as::<_, HotelSummary>(
            r#"
            SELECT t.*,
                   (SELECT COUNT(*) FROM rooms r WHERE r.tenant_id = t.id) AS room_count,
                   (SELECT COUNT(*) FROM users u
                     WHERE u.tenant_id = t.id AND u.role = 'manager') AS manager_count
            FROM tenants t
            ORDER BY t.created_at DESC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;
        Ok(hotels)
    }
}
