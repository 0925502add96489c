use serde::{Deserialize, Serialize};

/// One exam paper row, exactly as stored.
///
/// Rows are insert-only: there are no update or delete endpoints. exam_year
/// is text, matching how years appear on the papers themselves.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Paper {
    pub id: i64,
    pub class: String,
    pub subject: String,
    pub semester: String,
    pub exam_year: String,
    pub exam_type: String,
    pub paper_code: String,
    pub exam_number: String,
    pub medium: String,
    pub university: String,
    pub time: String,
    pub max_marks: String,
    pub uploader_name: String,
    pub filename: String,
    pub upload_date: String,
}

/// A paper decorated for presentation: all stored metadata plus the
/// retrieval URL and a composed display title.
#[derive(Debug, Clone, Serialize)]
pub struct PaperInfo {
    #[serde(flatten)]
    pub paper: Paper,
    pub url: String,
    pub display_name: String,
}

impl PaperInfo {
    /// Decorate a stored row. Pure; the URL points at the file serving route.
    pub fn from_paper(paper: Paper) -> Self {
        let url = format!("/uploads/{}", paper.filename);
        let display_name = format!(
            "{} {} {}",
            paper.subject, paper.exam_type, paper.exam_year
        );
        Self {
            paper,
            url,
            display_name,
        }
    }
}

/// Metadata submitted alongside an uploaded file.
///
/// Optional attributes default to the "N/A" sentinel when absent.
#[derive(Debug, Clone, Default)]
pub struct PaperMetadata {
    pub class: String,
    pub subject: String,
    pub semester: String,
    pub exam_year: String,
    pub exam_type: String,
    pub paper_code: String,
    pub exam_number: String,
    pub medium: String,
    pub university: String,
    pub time: String,
    pub max_marks: String,
    pub uploader_name: String,
}

impl PaperMetadata {
    /// First required field that is empty, if any.
    pub fn missing_required_field(&self) -> Option<&'static str> {
        let values = [
            ("class", &self.class),
            ("subject", &self.subject),
            ("semester", &self.semester),
            ("exam_year", &self.exam_year),
            ("exam_type", &self.exam_type),
            ("medium", &self.medium),
            ("admin_name", &self.uploader_name),
        ];
        values
            .into_iter()
            .find(|(_, v)| v.is_empty())
            .map(|(name, _)| name)
    }
}

/// Administrator credential row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_paper() -> Paper {
        Paper {
            id: 1,
            class: "BSc".to_string(),
            subject: "Physics".to_string(),
            semester: "III".to_string(),
            exam_year: "2024".to_string(),
            exam_type: "Main Semester".to_string(),
            paper_code: "N/A".to_string(),
            exam_number: "N/A".to_string(),
            medium: "English Medium".to_string(),
            university: "N/A".to_string(),
            time: "3 Hours".to_string(),
            max_marks: "70".to_string(),
            uploader_name: "admin".to_string(),
            filename: "1700000000000_physics.pdf".to_string(),
            upload_date: "2024-05-01 10:00:00".to_string(),
        }
    }

    #[test]
    fn test_paper_info_decoration() {
        let info = PaperInfo::from_paper(sample_paper());
        assert_eq!(info.url, "/uploads/1700000000000_physics.pdf");
        assert_eq!(info.display_name, "Physics Main Semester 2024");
    }

    #[test]
    fn test_missing_required_field() {
        let mut meta = PaperMetadata {
            class: "BSc".to_string(),
            subject: "Physics".to_string(),
            semester: "III".to_string(),
            exam_year: "2024".to_string(),
            exam_type: "Main Semester".to_string(),
            medium: "English Medium".to_string(),
            uploader_name: "admin".to_string(),
            ..Default::default()
        };
        assert_eq!(meta.missing_required_field(), None);

        meta.subject.clear();
        assert_eq!(meta.missing_required_field(), Some("subject"));

        meta = PaperMetadata::default();
        assert_eq!(meta.missing_required_field(), Some("class"));
    }

    #[test]
    fn test_optional_fields_are_not_required() {
        let meta = PaperMetadata {
            class: "BA".to_string(),
            subject: "History".to_string(),
            semester: "I".to_string(),
            exam_year: "2023".to_string(),
            exam_type: "CIA".to_string(),
            medium: "Hindi Medium".to_string(),
            uploader_name: "admin".to_string(),
            // paper_code, exam_number, university, time, max_marks left empty
            ..Default::default()
        };
        assert_eq!(meta.missing_required_field(), None);
    }
}
