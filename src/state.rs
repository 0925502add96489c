use sqlx::SqlitePool;
use std::path::PathBuf;

/// Shared per-request application state.
///
/// The pool is the only cross-request resource; each handler runs to
/// completion on its own, with no background tasks or shared mutable state.
pub struct AppState {
    pub db: SqlitePool,
    /// Directory uploaded PDFs are written to and served from
    pub upload_dir: PathBuf,
}
