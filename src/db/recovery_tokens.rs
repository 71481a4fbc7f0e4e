use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::RecoveryToken;

pub async fn create(
    pool: &PgPool,
    user_id: i64,
    token_hash: &str,
    expires_at: DateTime<Utc>,
) -> Result<RecoveryToken, sqlx::Error> {
    sqlx::query_as::<_, RecoveryToken>(
        "INSERT INTO password_resets (user_id, token_hash, expires_at)
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(user_id)
    .bind(token_hash)
    .bind(expires_at)
    .fetch_one(pool)
    .await
}

/// Candidate set for validation: every still-pending, unexpired row,
/// in a deterministic order.
pub async fn find_pending_unexpired(
    pool: &PgPool,
    now: DateTime<Utc>,
) -> Result<Vec<RecoveryToken>, sqlx::Error> {
    sqlx::query_as::<_, RecoveryToken>(
        "SELECT * FROM password_resets
         WHERE status = 'pending' AND expires_at > $1
         ORDER BY created_at, id",
    )
    .bind(now)
    .fetch_all(pool)
    .await
}

/// Compare-and-set on the lifecycle field. Returns false when the row was
/// no longer pending, i.e. a concurrent validation already claimed it.
pub async fn transition_to_used<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: i64,
) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("UPDATE password_resets SET status = 'used' WHERE id = $1 AND status = 'pending'")
            .bind(id)
            .execute(executor)
            .await?;
    Ok(result.rows_affected() > 0)
}
