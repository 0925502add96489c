//! Filename handling utilities

use chrono::Utc;

/// Sanitize an uploaded filename for storage on the local filesystem.
///
/// Drops any directory components, then keeps only ASCII alphanumerics,
/// `.`, `-` and `_`; runs of whitespace become a single underscore and any
/// other character is removed. Leading dots are stripped so the result can
/// never be a hidden file or a relative traversal.
pub fn sanitize_filename(name: &str) -> String {
    // Take the last path segment regardless of separator style
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name);

    let mut out = String::with_capacity(base.len());
    let mut last_was_space = false;
    for ch in base.chars() {
        if ch.is_ascii_alphanumeric() || ch == '.' || ch == '-' || ch == '_' {
            out.push(ch);
            last_was_space = false;
        } else if ch.is_whitespace() {
            if !last_was_space && !out.is_empty() {
                out.push('_');
            }
            last_was_space = true;
        }
        // Everything else is dropped
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    trimmed.to_string()
}

/// Millisecond wall-clock prefix used to keep stored filenames unique.
///
/// Two uploads racing within the same millisecond can still collide; the
/// UNIQUE constraint on papers.filename is the actual backstop.
pub fn unique_upload_prefix() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// Compose the on-disk name for an uploaded file.
pub fn stored_filename(original: &str) -> String {
    format!("{}_{}", unique_upload_prefix(), sanitize_filename(original))
}
