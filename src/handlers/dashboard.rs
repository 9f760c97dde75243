// src/handlers/dashboard.rs

use axum::{extract::State, Json};

use crate::{
    common::{error::AppError, scope::TenantScope},
    config::AppState,
    models::dashboard::DashboardSummary,
};

pub async fn get_dashboard(
    State(app_state): State<AppState>,
    scope: TenantScope,
) -> Result<Json<DashboardSummary>, AppError> {
    let summary = app_state.dashboard_service.get_summary(scope).await?;
    Ok(Json(summary))
}
