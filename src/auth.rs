use chrono::{Duration, Utc};
use rand::Rng;
use sqlx::SqlitePool;
use tower_cookies::Cookies;

use termarchive_backend::models::User;

pub const SESSION_COOKIE_NAME: &str = "session_token";

/// Session lifetime: 7 days
const SESSION_TTL_DAYS: i64 = 7;

fn generate_session_token() -> String {
    rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Create a session for a user and persist it.
///
/// Any previous sessions for the same user are dropped, so one login is
/// active at a time.
pub async fn create_session(pool: &SqlitePool, user_id: i64) -> Result<String, sqlx::Error> {
    let token = generate_session_token();
    let now = Utc::now();
    let expires_at = (now + Duration::days(SESSION_TTL_DAYS))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();
    let created_at = now.format("%Y-%m-%d %H:%M:%S").to_string();

    sqlx::query("DELETE FROM sessions WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;

    sqlx::query("INSERT INTO sessions (id, user_id, expires_at, created_at) VALUES (?, ?, ?, ?)")
        .bind(&token)
        .bind(user_id)
        .bind(&expires_at)
        .bind(&created_at)
        .execute(pool)
        .await?;

    Ok(token)
}

/// Delete a session (logout)
pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE id = ?")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

/// Resolve the current user from the session cookie, if any.
///
/// Expired or unknown tokens resolve to `None`; handlers decide whether
/// that means 401 or public access.
pub async fn current_user(cookies: &Cookies, pool: &SqlitePool) -> Option<User> {
    let token = cookies.get(SESSION_COOKIE_NAME)?.value().to_string();

    sqlx::query_as::<_, User>(
        r#"SELECT u.* FROM users u
           INNER JOIN sessions s ON u.id = s.user_id
           WHERE s.id = ? AND s.expires_at > datetime('now')"#,
    )
    .bind(&token)
    .fetch_optional(pool)
    .await
    .ok()
    .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::run_migrations;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_create_session_replaces_previous() {
        let pool = test_pool().await;

        let first = create_session(&pool, 1).await.unwrap();
        let second = create_session(&pool, 1).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(first.len(), 64);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE user_id = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);

        let (id,): (String,) = sqlx::query_as("SELECT id FROM sessions WHERE user_id = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(id, second);
    }

    #[tokio::test]
    async fn test_delete_session() {
        let pool = test_pool().await;
        let token = create_session(&pool, 1).await.unwrap();

        delete_session(&pool, &token).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_expired_session_is_not_resolved() {
        let pool = test_pool().await;
        // Admin row exists from initialize_default_data with id 1
        let token = create_session(&pool, 1).await.unwrap();

        sqlx::query("UPDATE sessions SET expires_at = '2000-01-01 00:00:00' WHERE id = ?")
            .bind(&token)
            .execute(&pool)
            .await
            .unwrap();

        let live: Option<(i64,)> = sqlx::query_as(
            "SELECT user_id FROM sessions WHERE id = ? AND expires_at > datetime('now')",
        )
        .bind(&token)
        .fetch_optional(&pool)
        .await
        .unwrap();
        assert!(live.is_none());
    }
}
