// src/handlers/guests.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, scope::TenantScope},
    config::AppState,
    models::guest::GuestFields,
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GuestPayload {
    #[validate(length(min = 1, max = 100, message = "O nome é obrigatório."))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "O sobrenome é obrigatório."))]
    pub last_name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 1, max = 30, message = "O telefone é obrigatório."))]
    pub phone: String,
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
}

impl From<GuestPayload> for GuestFields {
    fn from(p: GuestPayload) -> Self {
        Self {
            first_name: p.first_name,
            last_name: p.last_name,
            email: p.email,
            phone: p.phone,
            check_in_date: p.check_in_date,
            check_out_date: p.check_out_date,
        }
    }
}

pub async fn list_guests(
    State(app_state): State<AppState>,
    scope: TenantScope,
) -> Result<impl IntoResponse, AppError> {
    let guests = app_state.guest_service.list(scope).await?;
    Ok(Json(guests))
}

pub async fn get_guest(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(guest_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let guest = app_state.guest_service.get(scope, guest_id).await?;
    Ok(Json(guest))
}

pub async fn create_guest(
    State(app_state): State<AppState>,
    scope: TenantScope,
    WithRejection(Json(payload), _): WithRejection<Json<GuestPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let guest = app_state
        .guest_service
        .create(scope, &GuestFields::from(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(guest)))
}

pub async fn update_guest(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(guest_id): Path<Uuid>,
    WithRejection(Json(payload), _): WithRejection<Json<GuestPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let guest = app_state
        .guest_service
        .update(scope, guest_id, &GuestFields::from(payload))
        .await?;

    Ok(Json(guest))
}

pub async fn delete_guest(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(guest_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.guest_service.delete(scope, guest_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
