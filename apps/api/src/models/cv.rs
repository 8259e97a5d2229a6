use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

/// A candidate résumé ("CV"). `content` is the free-text body used for matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub content: String,
}

impl Candidate {
    /// "First Last" when both parts are known, otherwise the record name.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.name.clone()
        } else {
            full.to_string()
        }
    }
}

/// Create/replace payload. `id` is assigned by the server when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCandidate {
    pub id: Option<String>,
    pub name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub content: String,
}

impl NewCandidate {
    /// Validates the payload and builds the stored record.
    /// Missing first/last names are derived from `name` when it looks like an upload file name.
    pub fn into_candidate(self, id: Option<String>) -> Result<Candidate, AppError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("name cannot be empty".to_string()));
        }

        let (parsed_first, parsed_last) = parse_name_from_filename(&name);
        let id = id
            .or(self.id)
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(Candidate {
            id,
            first_name: self.first_name.unwrap_or(parsed_first),
            last_name: self.last_name.unwrap_or(parsed_last),
            name,
            content: self.content,
        })
    }
}

/// Splits an upload name of the form `First_Last_CV.pdf` into `("First", "Last")`.
/// Names with fewer than two `_`-separated parts yield empty strings.
pub fn parse_name_from_filename(filename: &str) -> (String, String) {
    let stem = match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.contains('_') => stem,
        _ => filename,
    };

    let mut parts = stem.split('_');
    match (parts.next(), parts.next()) {
        (Some(first), Some(last)) => (first.to_string(), last.to_string()),
        _ => (String::new(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str) -> NewCandidate {
        NewCandidate {
            id: None,
            name: name.to_string(),
            first_name: None,
            last_name: None,
            content: "Rust engineer".to_string(),
        }
    }

    #[test]
    fn test_parse_name_first_last_cv() {
        assert_eq!(
            parse_name_from_filename("Alex_Chen_CV.pdf"),
            ("Alex".to_string(), "Chen".to_string())
        );
    }

    #[test]
    fn test_parse_name_strips_extension() {
        assert_eq!(
            parse_name_from_filename("Priya_Sharma.txt"),
            ("Priya".to_string(), "Sharma".to_string())
        );
    }

    #[test]
    fn test_parse_name_single_part_is_empty() {
        assert_eq!(
            parse_name_from_filename("resume.pdf"),
            (String::new(), String::new())
        );
    }

    #[test]
    fn test_into_candidate_assigns_id() {
        let cv = payload("Alex_Chen_CV.pdf").into_candidate(None).unwrap();
        assert!(!cv.id.is_empty());
        assert_eq!(cv.first_name, "Alex");
        assert_eq!(cv.last_name, "Chen");
        assert_eq!(cv.display_name(), "Alex Chen");
    }

    #[test]
    fn test_into_candidate_path_id_wins() {
        let mut p = payload("cv.txt");
        p.id = Some("body-id".to_string());
        let cv = p.into_candidate(Some("path-id".to_string())).unwrap();
        assert_eq!(cv.id, "path-id");
        assert_eq!(cv.display_name(), "cv.txt");
    }

    #[test]
    fn test_into_candidate_rejects_blank_name() {
        let err = payload("   ").into_candidate(None).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
