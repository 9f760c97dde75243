// src/models/notification.rs

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::room::RoomStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")] // Banco
#[serde(rename_all = "snake_case")] // JSON
pub enum NotificationKind {
    BookingExpired,
    BookingEndingSoon,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 2] = [
        NotificationKind::BookingExpired,
        NotificationKind::BookingEndingSoon,
    ];

    /// Regra da varredura para uma reserva vista em `today`.
    ///
    /// - Expirada: check-out antes de hoje e o quarto ainda `occupied`.
    /// - Terminando: check-out exatamente amanhã, qualquer que seja o estado do quarto.
    pub fn is_due(self, check_out: NaiveDate, room_status: RoomStatus, today: NaiveDate) -> bool {
        match self {
            NotificationKind::BookingExpired => {
                check_out < today && room_status == RoomStatus::Occupied
            }
            NotificationKind::BookingEndingSoon => today.checked_add_days(Days::new(1)) == Some(check_out),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub tenant_id: Uuid,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub booking_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

// Linha lida pela varredura: reserva + dados do quarto
#[derive(Debug, Clone, FromRow)]
pub struct SweepCandidate {
    pub booking_id: Uuid,
    pub tenant_id: Uuid,
    pub check_out_date: NaiveDate,
    pub room_number: String,
    pub room_status: RoomStatus,
}

/// Notificação pronta para ser gravada.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    pub tenant_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub booking_id: Uuid,
}

impl NotificationDraft {
    pub fn for_candidate(kind: NotificationKind, candidate: &SweepCandidate) -> Self {
        let (title, message) = match kind {
            NotificationKind::BookingExpired => (
                "Reserva expirada",
                format!(
                    "A reserva do quarto {} expirou. O check-out era {}.",
                    candidate.room_number, candidate.check_out_date
                ),
            ),
            NotificationKind::BookingEndingSoon => (
                "Reserva terminando",
                format!(
                    "A reserva do quarto {} termina amanhã ({}).",
                    candidate.room_number, candidate.check_out_date
                ),
            ),
        };

        Self {
            tenant_id: candidate.tenant_id,
            kind,
            title: title.to_string(),
            message,
            booking_id: candidate.booking_id,
        }
    }
}
