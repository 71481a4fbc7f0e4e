pub mod admin;
pub mod auth;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/recovery-code", post(auth::recovery_code))
        .route("/api/v1/auth/reset-password", post(auth::reset_password))
        // Admin
        .route("/api/v1/admin/users", get(admin::list_users))
        .route("/api/v1/admin/users/{id}/status", put(admin::update_status))
}
