// src/handlers/bookings.rs

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

use crate::{
    common::{error::AppError, scope::TenantScope},
    config::AppState,
    models::booking::BookingRequest,
};

// A ordem das datas e as referências são checadas pelo BookingService
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    pub guest_id: Uuid,
    pub room_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

impl From<BookingPayload> for BookingRequest {
    fn from(p: BookingPayload) -> Self {
        Self {
            guest_id: p.guest_id,
            room_id: p.room_id,
            check_in_date: p.check_in_date,
            check_out_date: p.check_out_date,
        }
    }
}

pub async fn list_bookings(
    State(app_state): State<AppState>,
    scope: TenantScope,
) -> Result<impl IntoResponse, AppError> {
    let bookings = app_state.booking_service.list(scope).await?;
    Ok(Json(bookings))
}

pub async fn get_booking(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let booking = app_state.booking_service.get(scope, booking_id).await?;
    Ok(Json(booking))
}

pub async fn create_booking(
    State(app_state): State<AppState>,
    scope: TenantScope,
    WithRejection(Json(payload), _): WithRejection<Json<BookingPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let booking = app_state.booking_service.create(scope, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

pub async fn update_booking(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(booking_id): Path<Uuid>,
    WithRejection(Json(payload), _): WithRejection<Json<BookingPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let booking = app_state
        .booking_service
        .update(scope, booking_id, payload.into())
        .await?;
    Ok(Json(booking))
}

pub async fn delete_booking(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.booking_service.destroy(scope, booking_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
