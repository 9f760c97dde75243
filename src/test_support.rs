// src/test_support.rs
// Dados de apoio para os testes que rodam contra o Postgres.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::scope::TenantScope,
    db::{GuestRepository, RoomRepository, TenantRepository},
    models::{
        guest::{Guest, GuestFields},
        room::{Room, RoomStatus},
    },
};

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub async fn seed_tenant(pool: &PgPool, name: &str) -> TenantScope {
    let tenant = TenantRepository::new(pool.clone())
        .create_tenant(pool, name, Some("Rua das Flores, 10"), None)
        .await
        .unwrap();
    TenantScope::new(tenant.id)
}

pub async fn seed_room(pool: &PgPool, scope: TenantScope, number: &str) -> Room {
    RoomRepository::new(pool.clone())
        .create(pool, scope, number, "Casal", Decimal::new(25000, 2), RoomStatus::Available)
        .await
        .unwrap()
}

pub async fn seed_guest(pool: &PgPool, scope: TenantScope, first_name: &str) -> Guest {
    let fields = GuestFields {
        first_name: first_name.to_string(),
        last_name: "Silva".to_string(),
        email: format!("{}@example.com", first_name.to_lowercase()),
        phone: "+55 11 99999-0000".to_string(),
        check_in_date: None,
        check_out_date: None,
    };
    GuestRepository::new(pool.clone())
        .create(pool, scope, &fields)
        .await
        .unwrap()
}

pub async fn room_status(pool: &PgPool, room_id: Uuid) -> RoomStatus {
    sqlx::query_scalar("SELECT status FROM rooms WHERE id = $1")
        .bind(room_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
