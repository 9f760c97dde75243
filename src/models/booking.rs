// src/models/booking.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::ValidationError;

// Não existe campo de status: enquanto a linha existir, a reserva está ativa.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub guest_id: Uuid,
    pub room_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

// Reserva com os nomes que a listagem mostra
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetail {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub booking: Booking,
    pub guest_name: String,
    pub room_number: String,
}

/// Dados validados para criar ou editar uma reserva.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRequest {
    pub guest_id: Uuid,
    pub room_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

/// Check-out no mesmo dia do check-in é aceito.
pub fn validate_stay(check_in: NaiveDate, check_out: NaiveDate) -> Result<(), ValidationError> {
    if check_out < check_in {
        let mut err = ValidationError::new("after_or_equal");
        err.message = Some("A data de check-out deve ser igual ou posterior ao check-in.".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn check_out_before_check_in_is_rejected() {
        let err = validate_stay(day("2026-01-12"), day("2026-01-10")).unwrap_err();
        assert_eq!(err.code, "after_or_equal");
    }

    #[test]
    fn same_day_stay_is_accepted() {
        assert!(validate_stay(day("2026-01-10"), day("2026-01-10")).is_ok());
        assert!(validate_stay(day("2026-01-10"), day("2026-01-12")).is_ok());
    }
}
