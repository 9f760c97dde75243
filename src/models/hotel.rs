// src/models/hotel.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ---
// Tenant (O "Hotel")
// ---
// A unidade de isolamento: quartos, hóspedes, reservas e notificações pertencem a um hotel.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub contact: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Visão do administrador: o hotel com seus totais
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HotelSummary {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub tenant: Tenant,
    pub room_count: i64,
    pub manager_count: i64,
}
