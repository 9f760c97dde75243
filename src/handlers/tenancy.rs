// src/handlers/tenancy.rs
// Telas do administrador: hotéis, gerentes e contas.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{AdminOnly, RequireRole},
    },
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateHotelPayload {
    #[validate(length(min = 1, max = 255, message = "O nome do hotel é obrigatório."))]
    pub name: String,
    #[validate(length(max = 255, message = "O endereço é muito longo."))]
    pub address: Option<String>,
    #[validate(length(max = 255, message = "O contato é muito longo."))]
    pub contact: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateManagerPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

pub async fn list_hotels(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
) -> Result<impl IntoResponse, AppError> {
    let hotels = app_state.tenant_service.list_hotels().await?;
    Ok(Json(hotels))
}

pub async fn create_hotel(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateHotelPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let hotel = app_state
        .tenant_service
        .create_hotel(&payload.name, payload.address.as_deref(), payload.contact.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(hotel)))
}

pub async fn create_manager(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Path(hotel_id): Path<Uuid>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateManagerPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let manager = app_state
        .tenant_service
        .create_manager(hotel_id, &payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(manager)))
}

pub async fn toggle_active(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    AuthenticatedUser(admin): AuthenticatedUser,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state.tenant_service.toggle_active(admin.id, user_id).await?;
    Ok(Json(user))
}
