//! Paper search query builder
//!
//! Turns a free-text query into a parameterized SQL filter against the
//! papers table. Every whitespace-delimited term is translated and must
//! match, case-insensitively and as a substring, in at least one metadata
//! column; different terms may match different columns.

use super::translate;

/// Metadata columns a search term is matched against.
pub const SEARCH_COLUMNS: [&str; 10] = [
    "class",
    "subject",
    "semester",
    "exam_year",
    "exam_type",
    "paper_code",
    "exam_number",
    "medium",
    "university",
    "uploader_name",
];

/// A ready-to-execute papers query: SQL text plus its bound parameters.
///
/// Parameter values are always bound, never interpolated into the SQL.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub sql: String,
    pub params: Vec<String>,
}

impl SearchQuery {
    /// Build the filter for a raw user query.
    ///
    /// An empty (after trimming) query matches everything. Results are
    /// always ordered by exam year descending, then subject. exam_year is
    /// stored as text, so the year ordering is lexicographic on purpose.
    pub fn build(raw_query: &str) -> Self {
        let query = raw_query.trim().to_lowercase();

        if query.is_empty() {
            return Self {
                sql: "SELECT * FROM papers ORDER BY exam_year DESC, subject".to_string(),
                params: Vec::new(),
            };
        }

        let terms: Vec<&str> = query.split_whitespace().map(translate).collect();

        let mut conditions = Vec::with_capacity(terms.len());
        let mut params = Vec::with_capacity(terms.len() * SEARCH_COLUMNS.len());

        // AND across terms, OR across columns within a term
        for term in terms {
            let term_conditions: Vec<String> = SEARCH_COLUMNS
                .iter()
                .map(|col| format!("LOWER({}) LIKE ?", col))
                .collect();
            for _ in &SEARCH_COLUMNS {
                params.push(format!("%{}%", term));
            }
            conditions.push(format!("({})", term_conditions.join(" OR ")));
        }

        let sql = format!(
            "SELECT * FROM papers WHERE {} ORDER BY exam_year DESC, subject",
            conditions.join(" AND ")
        );

        Self { sql, params }
    }
}
