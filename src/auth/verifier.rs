use std::sync::LazyLock;

use regex::Regex;
use sqlx::PgPool;

use crate::auth::password;
use crate::db;
use crate::error::AppError;
use crate::models::{UserIdentity, UserStatus};

static MAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

pub fn is_valid_mail(mail: &str) -> bool {
    MAIL_RE.is_match(mail)
}

/// Check submitted credentials against the stored user and the status
/// gate. Read-only; a missing user and a wrong password produce the same
/// error so the surface cannot enumerate accounts.
pub async fn verify_credentials(
    pool: &PgPool,
    mail: &str,
    submitted: &str,
) -> Result<UserIdentity, AppError> {
    if !is_valid_mail(mail) {
        return Err(AppError::Validation(
            "A valid mail address is required".to_string(),
        ));
    }
    if submitted.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }

    let user = db::users::find_by_mail(pool, mail)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    // Argon2 is CPU-bound, keep it off the request workers
    let submitted = submitted.to_string();
    let stored_hash = user.password_hash.clone();
    let valid = tokio::task::spawn_blocking(move || password::verify(&submitted, &stored_hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password verify task failed: {e}")))?
        .map_err(AppError::Internal)?;

    if !valid {
        return Err(AppError::InvalidCredentials);
    }

    match user.status {
        UserStatus::Pending => Err(AppError::AccountPending),
        UserStatus::Inactive => Err(AppError::AccountDisabled),
        UserStatus::Active => Ok(user.identity()),
    }
}
