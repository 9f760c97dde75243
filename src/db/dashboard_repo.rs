// src/db/dashboard_repo.rs

use sqlx::PgPool;
use crate::{
    common::{error::AppError, scope::TenantScope},
    models::dashboard::DashboardSummary,
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Uma única consulta: snapshot consistente dos totais do hotel.
    pub async fn get_summary(&self, scope: TenantScope) -> Result<DashboardSummary, AppError> {
        let summary = sqlx::query_as::<_, DashboardSummary>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM rooms WHERE tenant_id = $1) AS rooms_total,
                (SELECT COUNT(*) FROM rooms WHERE tenant_id = $1 AND status = 'available') AS rooms_available,
                (SELECT COUNT(*) FROM rooms WHERE tenant_id = $1 AND status = 'occupied') AS rooms_occupied,
                (SELECT COUNT(*) FROM rooms WHERE tenant_id = $1 AND status = 'maintenance') AS rooms_maintenance,
                (SELECT COUNT(*) FROM guests WHERE tenant_id = $1) AS guests,
                (SELECT COUNT(*) FROM bookings WHERE tenant_id = $1) AS bookings,
                (SELECT COUNT(*) FROM notifications WHERE tenant_id = $1 AND is_read = FALSE) AS unread_notifications
            "#,
        )
            .bind(scope.tenant_id())
            .fetch_one(&self.pool)
            .await?;
        Ok(summary)
    }
}
