// src/models/room.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;
use validator::ValidationError;

/// A coluna é `NUMERIC(10,2)`: até oito dígitos inteiros e centavos.
pub const MAX_PRICE_PER_NIGHT: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, 0);

/// Estado do quarto. É a própria "trava": `occupied` significa que existe uma reserva ativa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "room_status", rename_all = "lowercase")] // Banco
#[serde(rename_all = "lowercase")] // JSON
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
}

impl RoomStatus {
    /// Mudanças permitidas pela tela de quartos. `occupied` só entra e sai via reservas.
    pub fn can_set_manually(self, target: RoomStatus) -> bool {
        match (self, target) {
            (from, to) if from == to => true,
            (RoomStatus::Available, RoomStatus::Maintenance)
            | (RoomStatus::Maintenance, RoomStatus::Available) => true,
            _ => false,
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoomStatus::Available => "available",
            RoomStatus::Occupied => "occupied",
            RoomStatus::Maintenance => "maintenance",
        };
        f.write_str(s)
    }
}

/// Preço da diária: não negativo, cabe na coluna e tem no máximo duas casas decimais.
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    if price.trunc() > MAX_PRICE_PER_NIGHT {
        let mut err = ValidationError::new("range");
        err.add_param("max".into(), &MAX_PRICE_PER_NIGHT.to_string());
        err.message = Some("O valor da diária deve ser menor que 100.000.000.".into());
        return Err(err);
    }
    if price.normalize().scale() > 2 {
        let mut err = ValidationError::new("scale");
        err.message = Some("Use no máximo duas casas decimais.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub room_number: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub price_per_night: Decimal,
    pub status: RoomStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupied_is_never_set_by_hand() {
        assert!(!RoomStatus::Available.can_set_manually(RoomStatus::Occupied));
        assert!(!RoomStatus::Maintenance.can_set_manually(RoomStatus::Occupied));
        assert!(!RoomStatus::Occupied.can_set_manually(RoomStatus::Available));
        assert!(!RoomStatus::Occupied.can_set_manually(RoomStatus::Maintenance));
    }

    #[test]
    fn maintenance_toggles_with_available() {
        assert!(RoomStatus::Available.can_set_manually(RoomStatus::Maintenance));
        assert!(RoomStatus::Maintenance.can_set_manually(RoomStatus::Available));
        assert!(RoomStatus::Occupied.can_set_manually(RoomStatus::Occupied));
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&RoomStatus::Maintenance).unwrap();
        assert_eq!(json, "\"maintenance\"");
        assert_eq!(RoomStatus::Occupied.to_string(), "occupied");
    }

    #[test]
    fn price_must_fit_the_column() {
        assert!(validate_price(&Decimal::new(9_999_999_999, 2)).is_ok());
        assert!(validate_price(&Decimal::ZERO).is_ok());

        let err = validate_price(&Decimal::new(100_000_000, 0)).unwrap_err();
        assert_eq!(err.code, "range");
        assert!(validate_price(&Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn price_keeps_at_most_two_decimals() {
        assert!(validate_price(&Decimal::new(1230, 2)).is_ok());
        // 12.3000 ainda é 12.30
        assert!(validate_price(&Decimal::new(123_000, 4)).is_ok());

        let err = validate_price(&Decimal::new(12_345, 3)).unwrap_err();
        assert_eq!(err.code, "scale");
    }
}
