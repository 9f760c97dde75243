// src/services/tenancy_service.rs

use crate::{
    common::error::AppError,
    db::{TenantRepository, UserRepository},
    models::{
        auth::{User, UserRole},
        hotel::{HotelSummary, Tenant},
    },
    services::auth::AuthService,
};
use sqlx::PgPool;
use uuid::Uuid;

/// Operações do administrador: hotéis e seus gerentes.
#[derive(Clone)]
pub struct TenantService {
    tenant_repo: TenantRepository,
    user_repo: UserRepository,
    pool: PgPool,
}

impl TenantService {
    pub fn new(tenant_repo: TenantRepository, user_repo: UserRepository, pool: PgPool) -> Self {
        Self { tenant_repo, user_repo, pool }
    }

    pub async fn create_hotel(
        &self,
        name: &str,
        address: Option<&str>,
        contact: Option<&str>,
    ) -> Result<Tenant, AppError> {
        let hotel = self.tenant_repo
            .create_tenant(&self.pool, name, address, contact)
            .await?;

        tracing::info!(tenant_id = %hotel.id, name = %hotel.name, "Hotel criado");
        Ok(hotel)
    }

    pub async fn list_hotels(&self) -> Result<Vec<HotelSummary>, AppError> {
        self.tenant_repo.list_summaries().await
    }

    /// Cria um gerente já vinculado ao hotel.
    pub async fn create_manager(
        &self,
        tenant_id: Uuid,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        if !self.tenant_repo.exists(tenant_id).await? {
            return Err(AppError::NotFound("Hotel"));
        }

        let hashed_password = AuthService::hash_password(password).await?;
        let manager = self.user_repo
            .create_user(&self.pool, email, &hashed_password, UserRole::Manager, Some(tenant_id))
            .await?;

        tracing::info!(user_id = %manager.id, %tenant_id, "Gerente criado");
        Ok(manager)
    }

    /// Liga/desliga a conta. O administrador não pode desativar a si mesmo.
    pub async fn toggle_active(&self, acting_user: Uuid, user_id: Uuid) -> Result<User, AppError> {
        if acting_user == user_id {
            return Err(AppError::Conflict(
                "Você não pode desativar a sua própria conta.".to_string(),
            ));
        }

        let user = self.user_repo
            .toggle_active(user_id)
            .await?
            .ok_or(AppError::NotFound("Usuário"))?;

        tracing::info!(user_id = %user.id, is_active = user.is_active, "Status da conta alterado");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(pool: &PgPool) -> TenantService {
        TenantService::new(
            TenantRepository::new(pool.clone()),
            UserRepository::new(pool.clone()),
            pool.clone(),
        )
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer DATABASE_URL apontando para um Postgres"]
    async fn managers_are_bound_to_existing_hotels(pool: PgPool) {
        let svc = service(&pool);
        let hotel = svc.create_hotel("Hotel Central", Some("Av. Brasil, 1"), None).await.unwrap();

        let manager = svc.create_manager(hotel.id, "gerente@hotel.com", "senha123").await.unwrap();
        assert_eq!(manager.role, UserRole::Manager);
        assert_eq!(manager.tenant_id, Some(hotel.id));
        assert!(manager.is_active);

        assert!(matches!(
            svc.create_manager(hotel.id, "gerente@hotel.com", "senha123").await,
            Err(AppError::EmailAlreadyExists)
        ));
        assert!(matches!(
            svc.create_manager(Uuid::new_v4(), "outro@hotel.com", "senha123").await,
            Err(AppError::NotFound(_))
        ));

        let hotels = svc.list_hotels().await.unwrap();
        assert_eq!(hotels.len(), 1);
        assert_eq!(hotels[0].manager_count, 1);
        assert_eq!(hotels[0].room_count, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer DATABASE_URL apontando para um Postgres"]
    async fn toggle_active_flips_and_protects_self(pool: PgPool) {
        let svc = service(&pool);
        let hotel = svc.create_hotel("Hotel", None, None).await.unwrap();
        let manager = svc.create_manager(hotel.id, "g@hotel.com", "senha123").await.unwrap();
        let admin_id = Uuid::new_v4();

        assert!(!svc.toggle_active(admin_id, manager.id).await.unwrap().is_active);
        assert!(svc.toggle_active(admin_id, manager.id).await.unwrap().is_active);
        assert!(matches!(
            svc.toggle_active(manager.id, manager.id).await,
            Err(AppError::Conflict(_))
        ));
    }
}
