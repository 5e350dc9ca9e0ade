use async_trait::async_trait;
use sqlx::Row;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::renewal_record::RenewalRecord,
    use_cases::renewal::RenewalTokenRepo,
};

#[async_trait]
impl RenewalTokenRepo for PostgresPersistence {
    async fn insert(&self, record: &RenewalRecord) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        // Concurrent issuances for one user queue here; otherwise neither
        // sees the other's uncommitted row and both stay live.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1::text))")
            .bind(record.user_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from)?;

        // This user's already-invalidated rows
        sqlx::query(
            r#"
            DELETE FROM renewal_tokens
            WHERE user_id = $1 AND invalidated_at IS NOT NULL
            "#,
        )
        .bind(record.user_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::from)?;

        // Supersede whatever the user still has live
        sqlx::query(
            r#"
            UPDATE renewal_tokens
            SET invalidated_at = $2
            WHERE user_id = $1 AND invalidated_at IS NULL
            "#,
        )
        .bind(record.user_id)
        .bind(record.created_at)
        .execute(&mut *tx)
        .await
        .map_err(AppError::from)?;

        sqlx::query(
            r#"
            INSERT INTO renewal_tokens (token_hash, user_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&record.token_hash)
        .bind(record.user_id)
        .bind(record.created_at)
        .bind(record.expires_at)
        .execute(&mut *tx)
        .await
        .map_err(AppError::from)?;

        tx.commit().await.map_err(AppError::from)?;

        // Expired rows can never be taken again. Best effort: the new token
        // is already stored.
        if let Err(e) = sqlx::query("DELETE FROM renewal_tokens WHERE expires_at <= $1")
            .bind(record.created_at)
            .execute(&self.pool)
            .await
        {
            tracing::warn!(error = %e, "pruning expired renewal tokens failed");
        }
        Ok(())
    }

    async fn take_live(&self, token_hash: &str, now: OffsetDateTime) -> AppResult<Option<Uuid>> {
        // A single UPDATE: concurrent callers serialize on the row lock and
        // only the first still sees invalidated_at IS NULL.
        let row = sqlx::query(
            r#"
            UPDATE renewal_tokens
            SET invalidated_at = $2
            WHERE token_hash = $1 AND invalidated_at IS NULL AND expires_at > $2
            RETURNING user_id
            "#,
        )
        .bind(token_hash)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(row.map(|r| r.get("user_id")))
    }
}
