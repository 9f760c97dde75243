// src/handlers/rooms.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, scope::TenantScope},
    config::AppState,
    models::room::{validate_price, RoomStatus},
};

// Criação e edição usam o mesmo formulário
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoomPayload {
    #[validate(length(min = 1, max = 20, message = "O número do quarto é obrigatório."))]
    pub room_number: String,

    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50, message = "O tipo do quarto é obrigatório."))]
    pub room_type: String,

    #[validate(custom(function = "validate_price"))]
    pub price_per_night: Decimal,

    pub status: Option<RoomStatus>,
}

pub async fn list_rooms(
    State(app_state): State<AppState>,
    scope: TenantScope,
) -> Result<impl IntoResponse, AppError> {
    let rooms = app_state.room_service.list(scope).await?;
    Ok(Json(rooms))
}

pub async fn get_room(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(room_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let room = app_state.room_service.get(scope, room_id).await?;
    Ok(Json(room))
}

pub async fn create_room(
    State(app_state): State<AppState>,
    scope: TenantScope,
    WithRejection(Json(payload), _): WithRejection<Json<RoomPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let room = app_state
        .room_service
        .create(
            scope,
            &payload.room_number,
            &payload.room_type,
            payload.price_per_night,
            payload.status,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(room)))
}

pub async fn update_room(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(room_id): Path<Uuid>,
    WithRejection(Json(payload), _): WithRejection<Json<RoomPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let room = app_state
        .room_service
        .update(
            scope,
            room_id,
            &payload.room_number,
            &payload.room_type,
            payload.price_per_night,
            payload.status,
        )
        .await?;

    Ok(Json(room))
}

pub async fn delete_room(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(room_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.room_service.delete(scope, room_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
