// src/models/guest.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    // Datas informativas da estadia, independentes das reservas
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Campos editáveis de um hóspede (criação e edição usam o mesmo formato).
#[derive(Debug, Clone)]
pub struct GuestFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
}
