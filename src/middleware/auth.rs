// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeaderRejection,
    TypedHeader,
};

use crate::{
    common::{error::AppError, scope::TenantScope},
    config::AppState,
    models::auth::{Principal, User, UserRole},
};

type BearerHeader = Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>;

// Valida o token e devolve o usuário ativo
async fn authenticate(app_state: &AppState, bearer: BearerHeader) -> Result<User, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.map_err(|_| AppError::InvalidToken)?;
    app_state.auth_service.validate_token(bearer.token()).await
}

/// Exige um usuário autenticado e ativo. Insere `User` e `Principal` nos extensions.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    bearer: BearerHeader,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(&app_state, bearer).await?;

    request.extensions_mut().insert(Principal::from(&user));
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Como o `auth_guard`, mas o usuário precisa estar vinculado a um hotel.
/// Insere também o `TenantScope` usado pelas rotas do hotel.
pub async fn tenant_guard(
    State(app_state): State<AppState>,
    bearer: BearerHeader,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(&app_state, bearer).await?;
    let scope = scope_for(&Principal::from(&user))?;

    request.extensions_mut().insert(Principal::from(&user));
    request.extensions_mut().insert(scope);
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Só gerente com hotel tem escopo. Administrador não opera quartos nem reservas,
/// mesmo que a conta tenha um `tenant_id`.
pub fn scope_for(principal: &Principal) -> Result<TenantScope, AppError> {
    match (principal.role, principal.tenant_id) {
        (UserRole::Manager, Some(tenant_id)) => Ok(TenantScope::new(tenant_id)),
        _ => Err(AppError::Forbidden),
    }
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn manager_with_hotel_gets_its_scope() {
        let tenant_id = Uuid::new_v4();
        let principal = Principal {
            user_id: Uuid::new_v4(),
            role: UserRole::Manager,
            tenant_id: Some(tenant_id),
        };
        assert_eq!(scope_for(&principal).unwrap().tenant_id(), tenant_id);
    }

    #[test]
    fn users_without_hotel_are_forbidden() {
        let principal = Principal {
            user_id: Uuid::new_v4(),
            role: UserRole::Admin,
            tenant_id: None,
        };
        assert!(matches!(scope_for(&principal), Err(AppError::Forbidden)));
    }

    #[test]
    fn admins_with_a_hotel_are_still_forbidden() {
        let principal = Principal {
            user_id: Uuid::new_v4(),
            role: UserRole::Admin,
            tenant_id: Some(Uuid::new_v4()),
        };
        assert!(matches!(scope_for(&principal), Err(AppError::Forbidden)));
    }

    #[test]
    fn managers_without_hotel_are_forbidden() {
        let principal = Principal {
            user_id: Uuid::new_v4(),
            role: UserRole::Manager,
            tenant_id: None,
        };
        assert!(matches!(scope_for(&principal), Err(AppError::Forbidden)));
    }
}
