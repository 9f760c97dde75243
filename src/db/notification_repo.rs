// src/db/notification_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, scope::TenantScope},
    models::notification::{Notification, NotificationDraft, SweepCandidate},
};

#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Varredura (todos os hotéis)
    // ---

    /// Reservas que merecem aviso em `today`: vencidas com o quarto ainda `occupied`
    /// ou com check-out em `tomorrow`. Vem junto o número e o status do quarto.
    pub async fn sweep_candidates<'e, E>(
        &self,
        executor: E,
        today: NaiveDate,
        tomorrow: NaiveDate,
    ) -> Result<Vec<SweepCandidate>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let candidates = sqlx::query_as::<_, SweepCandidate>(
            r#"
            SELECT b.id AS booking_id,
                   b.tenant_id,
                   b.check_out_date,
                   r.room_number,
                   r.status AS room_status
            FROM bookings b
            JOIN rooms r ON r.id = b.room_id AND r.tenant_id = b.tenant_id
            WHERE (b.check_out_date < $1 AND r.status = 'occupied')
               OR b.check_out_date = $2
            ORDER BY b.check_out_date ASC
            "#,
        )
            .bind(today)
            .bind(tomorrow)
            .fetch_all(executor)
            .await?;
        Ok(candidates)
    }

    /// Grava a notificação se ainda não existir uma do mesmo tipo para a reserva.
    ///
    /// A unicidade (booking_id, kind) é garantida pelo banco. Retorna `true` se criou.
    pub async fn insert_if_absent<'e, E>(
        &self,
        executor: E,
        draft: &NotificationDraft,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO notifications (tenant_id, kind, title, message, booking_id)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (booking_id, kind) DO NOTHING
            "#,
        )
            .bind(draft.tenant_id)
            .bind(draft.kind)
            .bind(&draft.title)
            .bind(&draft.message)
            .bind(draft.booking_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    // ---
    // Leitura e ações do usuário (por hotel)
    // ---

    pub async fn list(&self, scope: TenantScope) -> Result<Vec<Notification>, AppError> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE tenant_id = $1 ORDER BY created_at DESC",
        )
            .bind(scope.tenant_id())
            .fetch_all(&self.pool)
            .await?;
        Ok(notifications)
    }

    pub async fn unread_count(&self, scope: TenantScope) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE tenant_id = $1 AND is_read = FALSE",
        )
            .bind(scope.tenant_id())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn mark_read<'e, E>(
        &self,
        executor: E,
        scope: TenantScope,
        notification_id: Uuid,
    ) -> Result<Option<Notification>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            UPDATE notifications SET is_read = TRUE
            WHERE id = $1 AND tenant_id = $2
            RETURNING *
            "#,
        )
            .bind(notification_id)
            .bind(scope.tenant_id())
            .fetch_optional(executor)
            .await?;
        Ok(notification)
    }

    pub async fn mark_all_read<'e, E>(&self, executor: E, scope: TenantScope) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE tenant_id = $1 AND is_read = FALSE",
        )
            .bind(scope.tenant_id())
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete<'e, E>(
        &self,
        executor: E,
        scope: TenantScope,
        notification_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND tenant_id = $2")
            .bind(notification_id)
            .bind(scope.tenant_id())
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
