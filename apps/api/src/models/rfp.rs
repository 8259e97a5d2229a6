use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

/// A job request ("RFP"). Only `requirements` takes part in scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Rfp {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub requirements: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewRfp {
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub requirements: String,
}

impl NewRfp {
    pub fn into_rfp(self, id: Option<String>) -> Result<Rfp, AppError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::Validation("title cannot be empty".to_string()));
        }
        if self.requirements.trim().is_empty() {
            return Err(AppError::Validation(
                "requirements cannot be empty".to_string(),
            ));
        }

        let id = id
            .or(self.id)
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(Rfp {
            id,
            title,
            description: self.description,
            requirements: self.requirements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(title: &str, requirements: &str) -> NewRfp {
        NewRfp {
            id: None,
            title: title.to_string(),
            description: String::new(),
            requirements: requirements.to_string(),
        }
    }

    #[test]
    fn test_into_rfp_trims_title() {
        let rfp = payload("  Senior Engineer ", "Rust, Kubernetes")
            .into_rfp(None)
            .unwrap();
        assert_eq!(rfp.title, "Senior Engineer");
        assert!(!rfp.id.is_empty());
    }

    #[test]
    fn test_into_rfp_requires_requirements() {
        let err = payload("Engineer", " ").into_rfp(None).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_into_rfp_requires_title() {
        let err = payload("", "Rust").into_rfp(None).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
