//src/main.rs

use anyhow::Context;
use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod common;
mod config;
mod db;
mod handlers;
mod middleware;
mod models;
mod services;
mod sweeper;
#[cfg(test)]
mod test_support;

use crate::config::{AppState, Config};
use crate::middleware::auth::{auth_guard, tenant_guard};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = Config::from_env()?;
    let app_state = AppState::new(config).await?;

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .context("Falha ao rodar as migrações do banco de dados.")?;

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    if let (Some(email), Some(password)) = (&app_state.config.admin_email, &app_state.config.admin_password) {
        app_state.auth_service.ensure_admin(email, password).await?;
    }

    tokio::spawn(sweeper::run_sweeper(
        app_state.notification_service.clone(),
        app_state.config.sweep_interval,
        app_state.config.sweep_on_startup,
    ));

    let bind_addr = app_state.config.bind_addr.clone();
    let app = router(app_state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Falha ao iniciar o listener TCP em {bind_addr}"))?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Erro no servidor Axum")?;
    Ok(())
}

fn router(app_state: AppState) -> Router {
    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login));

    // Rotas de usuário (qualquer conta ativa)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Administração: cada handler também exige RequireRole<AdminOnly>
    let admin_routes = Router::new()
        .route("/hotels"
               ,post(handlers::tenancy::create_hotel)
               .get(handlers::tenancy::list_hotels)
        )
        .route("/hotels/{id}/managers", post(handlers::tenancy::create_manager))
        .route("/users/{id}/toggle-active", post(handlers::tenancy::toggle_active))
        .route("/notifications/sweep", post(handlers::notifications::run_sweep))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Rotas do hotel: exigem um gerente vinculado a um hotel
    let hotel_routes = Router::new()
        .route("/rooms"
               ,post(handlers::rooms::create_room)
               .get(handlers::rooms::list_rooms)
        )
        .route("/rooms/{id}"
               ,get(handlers::rooms::get_room)
               .put(handlers::rooms::update_room)
               .delete(handlers::rooms::delete_room)
        )
        .route("/guests"
               ,post(handlers::guests::create_guest)
               .get(handlers::guests::list_guests)
        )
        .route("/guests/{id}"
               ,get(handlers::guests::get_guest)
               .put(handlers::guests::update_guest)
               .delete(handlers::guests::delete_guest)
        )
        .route("/bookings"
               ,post(handlers::bookings::create_booking)
               .get(handlers::bookings::list_bookings)
        )
        .route("/bookings/{id}"
               ,get(handlers::bookings::get_booking)
               .put(handlers::bookings::update_booking)
               .delete(handlers::bookings::delete_booking)
        )
        .route("/notifications", get(handlers::notifications::list_notifications))
        .route("/notifications/unread-count", get(handlers::notifications::unread_count))
        .route("/notifications/read-all", post(handlers::notifications::mark_all_read))
        .route("/notifications/{id}/read", post(handlers::notifications::mark_read))
        .route("/notifications/{id}", delete(handlers::notifications::delete_notification))
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api", hotel_routes)
        .with_state(app_state)
}
