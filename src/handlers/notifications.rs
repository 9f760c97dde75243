// src/handlers/notifications.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    common::{error::AppError, scope::TenantScope},
    config::AppState,
    middleware::rbac::{AdminOnly, RequireRole},
    services::notification_service::SweepReport,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCount {
    pub count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkedRead {
    pub updated: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepQuery {
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepResponse {
    pub as_of: NaiveDate,
    pub created: u64,
    #[serde(flatten)]
    pub report: SweepReport,
}

pub async fn list_notifications(
    State(app_state): State<AppState>,
    scope: TenantScope,
) -> Result<impl IntoResponse, AppError> {
    let notifications = app_state.notification_service.list(scope).await?;
    Ok(Json(notifications))
}

pub async fn unread_count(
    State(app_state): State<AppState>,
    scope: TenantScope,
) -> Result<impl IntoResponse, AppError> {
    let count = app_state.notification_service.unread_count(scope).await?;
    Ok(Json(UnreadCount { count }))
}

pub async fn mark_read(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(notification_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let notification = app_state
        .notification_service
        .mark_read(scope, notification_id)
        .await?;
    Ok(Json(notification))
}

pub async fn mark_all_read(
    State(app_state): State<AppState>,
    scope: TenantScope,
) -> Result<impl IntoResponse, AppError> {
    let updated = app_state.notification_service.mark_all_read(scope).await?;
    Ok(Json(MarkedRead { updated }))
}

pub async fn delete_notification(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(notification_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .notification_service
        .delete(scope, notification_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Dispara a varredura na hora. Sem `asOf`, usa a data local de hoje.
pub async fn run_sweep(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Query(query): Query<SweepQuery>,
) -> Result<impl IntoResponse, AppError> {
    let as_of = query.as_of.unwrap_or_else(|| Local::now().date_naive());
    let report = app_state.notification_service.run_sweep(as_of).await?;

    Ok(Json(SweepResponse {
        as_of,
        created: report.created(),
        report,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_response_is_flat() {
        let body = serde_json::to_value(SweepResponse {
            as_of: NaiveDate::from_ymd_opt(2026, 1, 13).unwrap(),
            created: 3,
            report: SweepReport { expired: 1, ending_soon: 2 },
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "asOf": "2026-01-13",
                "created": 3,
                "expired": 1,
                "endingSoon": 2
            })
        );
    }
}
