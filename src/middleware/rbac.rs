// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    models::auth::{Principal, UserRole},
};

/// 1. O Trait que define qual papel uma rota exige
pub trait RoleDef: Send + Sync + 'static {
    fn role() -> UserRole;
}

/// 2. O Extractor (Guardião). Depende do `Principal` inserido pelo `auth_guard`.
pub struct RequireRole<R>(pub PhantomData<R>);

impl<R, S> FromRequestParts<S> for RequireRole<R>
where
    R: RoleDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let principal = parts
            .extensions
            .get::<Principal>()
            .ok_or(AppError::InvalidToken)?;

        check_role::<R>(principal)?;
        Ok(RequireRole(PhantomData))
    }
}

fn check_role<R: RoleDef>(principal: &Principal) -> Result<(), AppError> {
    if principal.role != R::role() {
        tracing::warn!(user_id = %principal.user_id, required = ?R::role(), "Acesso negado");
        return Err(AppError::Forbidden);
    }
    Ok(())
}

// ---
// DEFINIÇÃO DOS PAPÉIS (TIPOS)
// ---

pub struct AdminOnly;
impl RoleDef for AdminOnly {
    fn role() -> UserRole { UserRole::Admin }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn principal(role: UserRole) -> Principal {
        Principal { user_id: Uuid::new_v4(), role, tenant_id: None }
    }

    #[test]
    fn admin_only_accepts_admins() {
        assert!(check_role::<AdminOnly>(&principal(UserRole::Admin)).is_ok());
        assert!(matches!(
            check_role::<AdminOnly>(&principal(UserRole::Manager)),
            Err(AppError::Forbidden)
        ));
    }
}
