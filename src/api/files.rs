use axum::{
    body::Body,
    extract::{Path as AxumPath, State},
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::error::AppError;
use crate::state::AppState;

/// GET /uploads/:filename - serve an uploaded paper by exact stored name
pub async fn get_uploaded_file(
    State(state): State<Arc<AppState>>,
    AxumPath(filename): AxumPath<String>,
) -> Result<Response, AppError> {
    // Stored names never contain separators; reject anything that does
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return Err(AppError::NotFound);
    }

    let filepath = state.upload_dir.join(&filename);
    let file = match tokio::fs::File::open(&filepath).await {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(AppError::NotFound),
        Err(e) => return Err(AppError::Io(e)),
    };

    let mime = mime_guess::from_path(&filename).first_or_octet_stream();
    let stream = ReaderStream::new(file);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .body(Body::from_stream(stream))
        .map_err(|e| {
            tracing::error!("Failed to build file response: {}", e);
            AppError::NotFound
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn state_with_dir(dir: &std::path::Path) -> Arc<AppState> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::run_migrations(&pool).await.unwrap();
        Arc::new(AppState {
            db: pool,
            upload_dir: dir.to_path_buf(),
        })
    }

    #[tokio::test]
    async fn test_serves_existing_file_with_mime() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("exam.pdf"), b"%PDF-1.4").unwrap();
        let state = state_with_dir(dir.path()).await;

        let resp = get_uploaded_file(State(state), AxumPath("exam.pdf".to_string()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_dir(dir.path()).await;

        let err = get_uploaded_file(State(state), AxumPath("absent.pdf".to_string()))
            .await
            .unwrap_err();
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_traversal_names_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_dir(dir.path()).await;

        for name in ["../secret", "a/../b", "a\\b", ".."] {
            let err = get_uploaded_file(State(state.clone()), AxumPath(name.to_string()))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::NotFound));
        }
    }
}
