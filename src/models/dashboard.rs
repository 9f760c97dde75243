// src/models/dashboard.rs

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Default, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub rooms_total: i64,
    pub rooms_available: i64,
    pub rooms_occupied: i64,
    pub rooms_maintenance: i64,
    pub guests: i64,
    pub bookings: i64,
    pub unread_notifications: i64,
}
