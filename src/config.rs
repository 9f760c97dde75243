// src/config.rs

use crate::{
    db::{
        BookingRepository, DashboardRepository, GuestRepository, NotificationRepository,
        RoomRepository, TenantRepository, UserRepository,
    },
    services::{
        allocator::RoomAllocator, auth::AuthService, booking_service::BookingService,
        dashboard_service::DashboardService, guest_service::GuestService,
        notification_service::NotificationService, room_service::RoomService,
        tenancy_service::TenantService,
    },
};
use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, str::FromStr, sync::Arc, time::Duration};

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub sweep_interval: Duration,
    pub sweep_on_startup: bool,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{key} deve ser definida"))
        };

        let sweep_secs: u64 = parse_or(&lookup, "SWEEP_INTERVAL_SECS", 86_400)?;
        if sweep_secs == 0 {
            anyhow::bail!("SWEEP_INTERVAL_SECS deve ser maior que zero");
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            sweep_interval: Duration::from_secs(sweep_secs),
            sweep_on_startup: parse_or(&lookup, "SWEEP_ON_STARTUP", true)?,
            admin_email: lookup("ADMIN_EMAIL").filter(|v| !v.trim().is_empty()),
            admin_password: lookup("ADMIN_PASSWORD").filter(|v| !v.is_empty()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Valor inválido para {key}: '{raw}'")),
        None => Ok(default),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Arc<Config>,
    pub auth_service: AuthService,
    pub tenant_service: TenantService,
    pub room_service: RoomService,
    pub guest_service: GuestService,
    pub booking_service: BookingService,
    pub notification_service: NotificationService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool, config))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_pool(db_pool: PgPool, config: Config) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let tenant_repo = TenantRepository::new(db_pool.clone());
        let room_repo = RoomRepository::new(db_pool.clone());
        let guest_repo = GuestRepository::new(db_pool.clone());
        let booking_repo = BookingRepository::new(db_pool.clone());
        let notification_repo = NotificationRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), config.jwt_secret.clone(), db_pool.clone());
        let tenant_service = TenantService::new(tenant_repo, user_repo, db_pool.clone());
        let room_service = RoomService::new(room_repo.clone(), db_pool.clone());
        let guest_service = GuestService::new(guest_repo.clone(), db_pool.clone());
        let booking_service = BookingService::new(
            booking_repo,
            guest_repo,
            room_repo.clone(),
            RoomAllocator::new(room_repo),
            db_pool.clone(),
        );
        let notification_service = NotificationService::new(notification_repo, db_pool.clone());
        let dashboard_service = DashboardService::new(dashboard_repo);

        Self {
            db_pool,
            config: Arc::new(config),
            auth_service,
            tenant_service,
            room_service,
            guest_service,
            booking_service,
            notification_service,
            dashboard_service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    const BASE: [(&str, &str); 2] = [
        ("DATABASE_URL", "postgres://localhost/hotel"),
        ("JWT_SECRET", "segredo"),
    ];

    #[test]
    fn defaults_apply_when_optional_vars_are_missing() {
        let cfg = config(&BASE).unwrap();

        assert_eq!(cfg.bind_addr, "0.0.0.0:3000");
        assert_eq!(cfg.db_max_connections, 5);
        assert_eq!(cfg.sweep_interval, Duration::from_secs(86_400));
        assert!(cfg.sweep_on_startup);
        assert!(cfg.admin_email.is_none());
        assert!(cfg.admin_password.is_none());
    }

    #[test]
    fn overrides_are_parsed() {
        let mut vars = BASE.to_vec();
        vars.extend([
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("SWEEP_INTERVAL_SECS", "60"),
            ("SWEEP_ON_STARTUP", "false"),
            ("ADMIN_EMAIL", "admin@hotel.com"),
            ("ADMIN_PASSWORD", "senha123"),
        ]);
        let cfg = config(&vars).unwrap();

        assert_eq!(cfg.bind_addr, "127.0.0.1:8080");
        assert_eq!(cfg.db_max_connections, 12);
        assert_eq!(cfg.sweep_interval, Duration::from_secs(60));
        assert!(!cfg.sweep_on_startup);
        assert_eq!(cfg.admin_email.as_deref(), Some("admin@hotel.com"));
    }

    #[test]
    fn missing_required_var_is_named_in_the_error() {
        let err = config(&[("DATABASE_URL", "postgres://localhost/hotel")]).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let mut vars = BASE.to_vec();
        vars.push(("DB_MAX_CONNECTIONS", "muitas"));
        let err = config(&vars).unwrap_err();
        assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));

        let mut vars = BASE.to_vec();
        vars.push(("SWEEP_INTERVAL_SECS", "0"));
        assert!(config(&vars).is_err());
    }
}
