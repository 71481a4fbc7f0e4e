use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RecoveryTokenStatus {
    Pending,
    Used,
}

/// One row per recovery request. Rows are never deleted by the service;
/// expired rows simply stop matching and stay `pending`.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct RecoveryToken {
    pub id: i64,
    pub user_id: i64,
    pub token_hash: String,
    pub status: RecoveryTokenStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
