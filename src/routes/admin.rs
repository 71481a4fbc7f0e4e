use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::{User, UserStatus};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

pub async fn list_users(
    State(state): State<SharedState>,
    auth: AuthUser,
) -> Result<Json<Vec<User>>, AppError> {
    auth.require_admin()?;

    let users = db::users::list_all(&state.pool).await?;
    Ok(Json(users))
}

/// The approval write: flips `pending` accounts to `active` (or disables
/// them). Login eligibility follows this field alone.
pub async fn update_status(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    let status = UserStatus::parse(&req.status)
        .ok_or_else(|| AppError::Validation(format!("Unknown status '{}'", req.status)))?;

    if !db::users::update_status(&state.pool, id, status).await? {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    tracing::info!(user_id = id, status = status.as_str(), "updated user status");

    Ok(Json(serde_json::json!({ "success": true })))
}
