use chrono::{Duration, Utc};
use sqlx::PgPool;

use crate::auth::password;
use crate::db;
use crate::error::AppError;
use crate::models::RecoveryToken;

/// Recovery codes are exactly four digits.
pub const CODE_LENGTH: usize = 4;

/// Issued tokens stay redeemable for one hour.
const TOKEN_TTL_MINUTES: i64 = 60;

/// Uniformly-random four-digit code from the thread-local CSPRNG.
pub fn generate_code() -> String {
    rand::random_range(1000u32..10000).to_string()
}

/// Generate a code, store its hash as a fresh `pending` row and hand the
/// plaintext back for out-of-band delivery. Earlier pending rows for the
/// same user stay valid; multiple outstanding tokens are legal.
pub async fn issue(pool: &PgPool, user_id: i64) -> Result<String, AppError> {
    let code = generate_code();

    let plaintext = code.clone();
    let token_hash = tokio::task::spawn_blocking(move || password::hash(&plaintext))
        .await
        .map_err(|e| AppError::Internal(format!("Token hash task failed: {e}")))?
        .map_err(AppError::Internal)?;

    let expires_at = Utc::now() + Duration::minutes(TOKEN_TTL_MINUTES);
    let token = db::recovery_tokens::create(pool, user_id, &token_hash, expires_at).await?;

    tracing::debug!(user_id, token_id = token.id, "issued recovery token");
    Ok(code)
}

/// Redeem a recovery code: find the matching pending row and, in a single
/// transaction, replace the user's password hash and retire the row. The
/// token transition is a compare-and-set, so of two concurrent
/// validations racing on the same row only the first commits; the loser
/// rolls back with nothing applied.
pub async fn validate(pool: &PgPool, code: &str, new_password: &str) -> Result<(), AppError> {
    if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(format!(
            "The recovery token must be exactly {CODE_LENGTH} digits"
        )));
    }
    if new_password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let candidates = db::recovery_tokens::find_pending_unexpired(pool, Utc::now()).await?;

    // Verify against every candidate and keep the first match, instead of
    // breaking early; the scan cost then does not depend on which row
    // matched.
    let code_owned = code.to_string();
    let matched = tokio::task::spawn_blocking(move || {
        let mut matched: Option<RecoveryToken> = None;
        for candidate in candidates {
            let is_match = match password::verify(&code_owned, &candidate.token_hash) {
                Ok(is_match) => is_match,
                Err(e) => {
                    tracing::warn!(token_id = candidate.id, "unreadable recovery token hash: {e}");
                    false
                }
            };
            if is_match && matched.is_none() {
                matched = Some(candidate);
            }
        }
        matched
    })
    .await
    .map_err(|e| AppError::Internal(format!("Token scan task failed: {e}")))?;

    let token = matched.ok_or(AppError::InvalidOrExpiredToken)?;

    let new_password = new_password.to_string();
    let new_hash = tokio::task::spawn_blocking(move || password::hash(&new_password))
        .await
        .map_err(|e| AppError::Internal(format!("Password hash task failed: {e}")))?
        .map_err(AppError::Internal)?;

    let mut tx = pool.begin().await?;
    db::users::update_password(&mut *tx, token.user_id, &new_hash).await?;
    if !db::recovery_tokens::transition_to_used(&mut *tx, token.id).await? {
        // A concurrent validate claimed this row first.
        tx.rollback().await?;
        return Err(AppError::InvalidOrExpiredToken);
    }
    tx.commit().await?;

    tracing::info!(user_id = token.user_id, token_id = token.id, "password reset via recovery token");
    Ok(())
}
