use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthUser;
use crate::auth::jwt::{encode_token, Claims};
use crate::auth::password;
use crate::auth::recovery;
use crate::auth::verifier;
use crate::db;
use crate::error::AppError;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub username: String,
    pub mail: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub mail: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub access_token: String,
}

#[derive(Serialize)]
pub struct RecoveryCodeResponse {
    pub token: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn auth_cookie(access_token: &str, ttl_minutes: i64) -> CookieJar {
    let access = Cookie::build(("access_token", access_token.to_string()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::minutes(ttl_minutes))
        .build();

    CookieJar::new().add(access)
}

/// Thin collaborator surface: new accounts start as `pending` members and
/// stay locked out of login until an admin flips the status.
pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if req.name.is_empty() || req.username.is_empty() {
        return Err(AppError::Validation("All fields are required".to_string()));
    }
    if !verifier::is_valid_mail(&req.mail) {
        return Err(AppError::Validation(
            "A valid mail address is required".to_string(),
        ));
    }
    if req.password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    if db::users::find_by_mail(&state.pool, &req.mail).await?.is_some() {
        return Err(AppError::Conflict("Mail is already registered".to_string()));
    }

    let plaintext = req.password.clone();
    let pw_hash = tokio::task::spawn_blocking(move || password::hash(&plaintext))
        .await
        .map_err(|e| AppError::Internal(format!("Password hash task failed: {e}")))?
        .map_err(AppError::Internal)?;

    let user =
        db::users::create(&state.pool, &req.name, &req.username, &req.mail, &pw_hash).await?;

    tracing::info!(user_id = user.id, "registered new pending user");

    Ok(Json(MessageResponse {
        message: "Account created and awaiting approval".to_string(),
    }))
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let identity = verifier::verify_credentials(&state.pool, &req.mail, &req.password).await?;

    let claims = Claims::new(&identity, state.config.session_ttl_minutes);
    let access_token =
        encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)?;

    let jar = auth_cookie(&access_token, state.config.session_ttl_minutes);
    Ok((jar, Json(AuthResponse { access_token })))
}

/// Issue a recovery code for the authenticated caller. The plaintext goes
/// back in the response; delivering it further is the caller's problem.
pub async fn recovery_code(
    State(state): State<SharedState>,
    auth: AuthUser,
) -> Result<Json<RecoveryCodeResponse>, AppError> {
    let token = recovery::issue(&state.pool, auth.user_id).await?;
    Ok(Json(RecoveryCodeResponse { token }))
}

pub async fn reset_password(
    State(state): State<SharedState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    recovery::validate(&state.pool, &req.token, &req.password).await?;

    Ok(Json(MessageResponse {
        message: "Password reset successfully".to_string(),
    }))
}
