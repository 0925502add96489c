use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_cookies::{Cookie, Cookies};

use crate::auth::{create_session, current_user, delete_session, SESSION_COOKIE_NAME};
use crate::state::AppState;
use termarchive_backend::models::{LoginRequest, User, UserInfo};

/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
        .bind(&req.username)
        .fetch_optional(&state.db)
        .await
        .map_err(|e| {
            tracing::error!("Login query failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Server error"})),
            )
        })?
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Invalid username or password"})),
            )
        })?;

    let valid = bcrypt::verify(&req.password, &user.password_hash).map_err(|_| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Server error"})),
        )
    })?;

    if !valid {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid username or password"})),
        ));
    }

    let token = create_session(&state.db, user.id).await.map_err(|e| {
        tracing::error!("Failed to create session: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Server error"})),
        )
    })?;

    let mut cookie = Cookie::new(SESSION_COOKIE_NAME, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookies.add(cookie);

    Ok(Json(json!({
        "user": UserInfo {
            id: user.id,
            username: user.username,
        }
    })))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
) -> Result<Json<Value>, StatusCode> {
    if let Some(cookie) = cookies.get(SESSION_COOKIE_NAME) {
        delete_session(&state.db, cookie.value())
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    }

    // Removal cookie must carry the same path
    let mut removal_cookie = Cookie::new(SESSION_COOKIE_NAME, "");
    removal_cookie.set_path("/");
    cookies.remove(removal_cookie);

    Ok(Json(json!({"message": "Logged out"})))
}

/// GET /api/auth/me - current user from the session cookie
pub async fn me(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
) -> Result<Json<Value>, StatusCode> {
    let user = current_user(&cookies, &state.db)
        .await
        .ok_or(StatusCode::UNAUTHORIZED)?;

    Ok(Json(json!({
        "user": UserInfo {
            id: user.id,
            username: user.username,
        }
    })))
}
