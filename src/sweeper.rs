// src/sweeper.rs

use std::time::Duration;

use chrono::Local;
use tokio::time::{self, MissedTickBehavior};

use crate::services::notification_service::NotificationService;

/// Tarefa de fundo que roda a varredura de reservas a cada `every`.
///
/// O primeiro tick do `interval` dispara na hora; com `run_on_startup = false`
/// ele é consumido e a primeira varredura só acontece depois de um período.
pub async fn run_sweeper(service: NotificationService, every: Duration, run_on_startup: bool) {
    let mut interval = time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    if !run_on_startup {
        interval.tick().await;
    }

    loop {
        interval.tick().await;
        let today = Local::now().date_naive();
        // Erro numa rodada não derruba o agendador; a próxima tenta de novo
        if let Err(e) = service.run_sweep(today).await {
            tracing::error!(%today, "Falha na varredura de reservas: {e}");
        }
    }
}
