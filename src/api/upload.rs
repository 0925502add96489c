use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;
use tower_cookies::Cookies;

use crate::auth::current_user;
use crate::error::AppError;
use crate::state::AppState;
use termarchive_backend::models::PaperMetadata;
use termarchive_backend::utils::{sanitize_filename, stored_filename};

/// POST /api/upload - authenticated paper upload
///
/// Multipart form: one `file` part plus the metadata fields. Required:
/// class, subject, semester, exam_year, exam_type, medium, admin_name.
/// Optional fields default to "N/A".
pub async fn upload_paper(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if current_user(&cookies, &state.db).await.is_none() {
        return Ok((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Login required"})),
        ));
    }

    let mut meta = PaperMetadata {
        paper_code: "N/A".to_string(),
        exam_number: "N/A".to_string(),
        university: "N/A".to_string(),
        time: "N/A".to_string(),
        max_marks: "N/A".to_string(),
        ..Default::default()
    };
    let mut original_filename = String::new();
    let mut file_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::Validation("Malformed multipart body".to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                original_filename = field.file_name().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| AppError::Validation("Malformed file part".to_string()))?;
                file_data = Some(bytes.to_vec());
            }
            "class" => meta.class = field.text().await.map_err(bad_field)?,
            "subject" => meta.subject = field.text().await.map_err(bad_field)?,
            "semester" => meta.semester = field.text().await.map_err(bad_field)?,
            "exam_year" => meta.exam_year = field.text().await.map_err(bad_field)?,
            "exam_type" => meta.exam_type = field.text().await.map_err(bad_field)?,
            "paper_code" => meta.paper_code = field.text().await.map_err(bad_field)?,
            "exam_number" => meta.exam_number = field.text().await.map_err(bad_field)?,
            "medium" => meta.medium = field.text().await.map_err(bad_field)?,
            "university" => meta.university = field.text().await.map_err(bad_field)?,
            "time" => meta.time = field.text().await.map_err(bad_field)?,
            "max_marks" => meta.max_marks = field.text().await.map_err(bad_field)?,
            "admin_name" => meta.uploader_name = field.text().await.map_err(bad_field)?,
            _ => {}
        }
    }

    let file_data = file_data
        .ok_or_else(|| AppError::Validation("Missing file part".to_string()))?;

    let filename = save_paper(
        &state.db,
        &state.upload_dir,
        &original_filename,
        &file_data,
        &meta,
    )
    .await?;

    Ok((
        StatusCode::OK,
        Json(json!({"message": "Success", "filename": filename})),
    ))
}

fn bad_field(_: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation("Malformed multipart body".to_string())
}

/// Validate and persist one paper: write the file, then insert the row.
///
/// Either both the file and its metadata row exist afterwards, or neither
/// does: an INSERT failure removes the just-written file before the error
/// is reported.
pub async fn save_paper(
    pool: &SqlitePool,
    upload_dir: &Path,
    original_filename: &str,
    file_data: &[u8],
    meta: &PaperMetadata,
) -> Result<String, AppError> {
    if sanitize_filename(original_filename).is_empty() {
        return Err(AppError::Validation("Invalid file".to_string()));
    }
    if let Some(field) = meta.missing_required_field() {
        return Err(AppError::Validation(format!(
            "A required field is empty: {}",
            field
        )));
    }

    // Coarse time-based uniqueness prefix; the UNIQUE constraint on
    // papers.filename catches same-millisecond collisions.
    let filename = stored_filename(original_filename);
    let filepath = upload_dir.join(&filename);

    tokio::fs::write(&filepath, file_data).await?;

    let insert = sqlx::query(
        "INSERT INTO papers (class, subject, semester, exam_year, exam_type, paper_code, \
         exam_number, medium, university, time, max_marks, uploader_name, filename) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&meta.class)
    .bind(&meta.subject)
    .bind(&meta.semester)
    .bind(&meta.exam_year)
    .bind(&meta.exam_type)
    .bind(&meta.paper_code)
    .bind(&meta.exam_number)
    .bind(&meta.medium)
    .bind(&meta.university)
    .bind(&meta.time)
    .bind(&meta.max_marks)
    .bind(&meta.uploader_name)
    .bind(&filename)
    .execute(pool)
    .await;

    if let Err(e) = insert {
        tracing::error!("Paper insert failed, removing file {}: {}", filename, e);
        if let Err(rm) = tokio::fs::remove_file(&filepath).await {
            tracing::warn!("Failed to remove orphaned file {:?}: {}", filepath, rm);
        }
        return Err(AppError::Database(e));
    }

    Ok(filename)
}
