use sqlx::PgPool;

use crate::models::{User, UserStatus};

pub async fn create(
    pool: &PgPool,
    name: &str,
    username: &str,
    mail: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (name, username, mail, password_hash)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(name)
    .bind(username)
    .bind(mail)
    .bind(password_hash)
    .fetch_one(pool)
    .await
}

pub async fn find_by_mail(pool: &PgPool, mail: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE mail = $1")
        .bind(mail)
        .fetch_optional(pool)
        .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

/// Generic over the executor so the reset flow can run it inside the same
/// transaction that retires the recovery token.
pub async fn update_password<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: i64,
    password_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
        .bind(id)
        .bind(password_hash)
        .execute(executor)
        .await?;
    Ok(())
}

/// Returns false when no row matched the id.
pub async fn update_status(
    pool: &PgPool,
    id: i64,
    status: UserStatus,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET status = $2 WHERE id = $1")
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
