// src/services/notification_service.rs

use chrono::{Days, NaiveDate};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{error::AppError, scope::TenantScope},
    db::NotificationRepository,
    models::notification::{Notification, NotificationDraft, NotificationKind, SweepCandidate},
};

/// Quantas notificações a varredura criou, por tipo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepReport {
    pub expired: u64,
    pub ending_soon: u64,
}

impl SweepReport {
    pub fn created(&self) -> u64 {
        self.expired + self.ending_soon
    }

    fn record(&mut self, kind: NotificationKind) {
        match kind {
            NotificationKind::BookingExpired => self.expired += 1,
            NotificationKind::BookingEndingSoon => self.ending_soon += 1,
        }
    }
}

/// As notificações que os candidatos merecem em `today`, sem olhar o que já existe.
pub fn plan_sweep(candidates: &[SweepCandidate], today: NaiveDate) -> Vec<NotificationDraft> {
    candidates
        .iter()
        .flat_map(|candidate| {
            NotificationKind::ALL
                .into_iter()
                .filter(move |kind| kind.is_due(candidate.check_out_date, candidate.room_status, today))
                .map(move |kind| NotificationDraft::for_candidate(kind, candidate))
        })
        .collect()
}

#[derive(Clone)]
pub struct NotificationService {
    repo: NotificationRepository,
    pool: PgPool,
}

impl NotificationService {
    pub fn new(repo: NotificationRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    /// Varredura de todos os hotéis. Rodar de novo no mesmo dia não duplica nada:
    /// o banco recusa o segundo (reserva, tipo).
    ///
    /// A expiração é só informativa: o quarto continua `occupied` até alguém
    /// editar ou remover a reserva.
    pub async fn run_sweep(&self, today: NaiveDate) -> Result<SweepReport, AppError> {
        let tomorrow = today
            .checked_add_days(Days::new(1))
            .ok_or_else(|| anyhow::anyhow!("Data fora do intervalo suportado: {}", today))?;

        let candidates = self.repo.sweep_candidates(&self.pool, today, tomorrow).await?;
        let drafts = plan_sweep(&candidates, today);

        let mut report = SweepReport::default();
        for draft in &drafts {
            if self.repo.insert_if_absent(&self.pool, draft).await? {
                report.record(draft.kind);
                tracing::info!(
                    tenant_id = %draft.tenant_id,
                    booking_id = %draft.booking_id,
                    kind = ?draft.kind,
                    "Notificação criada"
                );
            }
        }

        tracing::info!(
            %today,
            candidates = candidates.len(),
            expired = report.expired,
            ending_soon = report.ending_soon,
            "Varredura de reservas concluída"
        );
        Ok(report)
    }

    pub async fn list(&self, scope: TenantScope) -> Result<Vec<Notification>, AppError> {
        self.repo.list(scope).await
    }

    pub async fn unread_count(&self, scope: TenantScope) -> Result<i64, AppError> {
        self.repo.unread_count(scope).await
    }

    pub async fn mark_read(
        &self,
        scope: TenantScope,
        notification_id: Uuid,
    ) -> Result<Notification, AppError> {
        self.repo
            .mark_read(&self.pool, scope, notification_id)
            .await?
            .ok_or(AppError::NotFound("Notificação"))
    }

    pub async fn mark_all_read(&self, scope: TenantScope) -> Result<u64, AppError> {
        self.repo.mark_all_read(&self.pool, scope).await
    }

    pub async fn delete(&self, scope: TenantScope, notification_id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete(&self.pool, scope, notification_id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Notificação"));
        }
        Ok(())
    }
}
