use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::error::AppError;
use crate::state::AppState;
use termarchive_backend::models::{Paper, PaperInfo};
use termarchive_backend::search::SearchQuery;

#[derive(Debug, Deserialize)]
pub struct PapersQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /api/papers?q= - public paper search
///
/// With no query every paper is returned; otherwise each translated term
/// must match somewhere in the metadata. Rows come back ordered by exam
/// year descending, then subject.
pub async fn list_papers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PapersQuery>,
) -> Result<Json<Vec<PaperInfo>>, AppError> {
    let papers = search_papers(&state.db, &params.q).await?;
    Ok(Json(papers))
}

/// Run a search query against the store and decorate the matches.
pub async fn search_papers(pool: &SqlitePool, raw_query: &str) -> Result<Vec<PaperInfo>, AppError> {
    let query = SearchQuery::build(raw_query);

    let mut stmt = sqlx::query_as::<_, Paper>(&query.sql);
    for param in &query.params {
        stmt = stmt.bind(param);
    }

    let rows = stmt.fetch_all(pool).await?;
    Ok(rows.into_iter().map(PaperInfo::from_paper).collect())
}
