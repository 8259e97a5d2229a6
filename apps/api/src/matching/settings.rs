use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Options for a match run.
///
/// `keyword_weight` and `content_weight` are accepted and echoed back with each
/// run but do not take part in scoring: the score is the keyword-overlap ratio alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Minimum score (inclusive) a result needs to be kept.
    pub threshold: u32,
    pub keyword_weight: f64,
    pub content_weight: f64,
    /// Cap applied after threshold filtering and sorting.
    pub max_results: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: 30,
            keyword_weight: 0.7,
            content_weight: 0.3,
            max_results: 20,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.threshold > 100 {
            return Err(AppError::Validation(format!(
                "threshold must be between 0 and 100, got {}",
                self.threshold
            )));
        }
        if self.max_results == 0 {
            return Err(AppError::Validation(
                "max_results must be at least 1".to_string(),
            ));
        }
        for (field, weight) in [
            ("keyword_weight", self.keyword_weight),
            ("content_weight", self.content_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(AppError::Validation(format!(
                    "{field} must be a non-negative number, got {weight}"
                )));
            }
        }
        Ok(())
    }

    /// Applies the fields present in `overrides` on top of `self`.
    pub fn merged(&self, overrides: &MatchSettingsOverride) -> MatchConfig {
        MatchConfig {
            threshold: overrides.threshold.unwrap_or(self.threshold),
            keyword_weight: overrides.keyword_weight.unwrap_or(self.keyword_weight),
            content_weight: overrides.content_weight.unwrap_or(self.content_weight),
            max_results: overrides.max_results.unwrap_or(self.max_results),
        }
    }
}

/// Per-run settings sent by a client. Missing fields fall back to the service defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchSettingsOverride {
    pub threshold: Option<u32>,
    pub keyword_weight: Option<f64>,
    pub content_weight: Option<f64>,
    pub max_results: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = MatchConfig::default();
        assert_eq!(c.threshold, 30);
        assert_eq!(c.max_results, 20);
        assert!((c.keyword_weight - 0.7).abs() < f64::EPSILON);
        assert!((c.content_weight - 0.3).abs() < f64::EPSILON);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_merged_keeps_missing_fields() {
        let merged = MatchConfig::default().merged(&MatchSettingsOverride {
            threshold: Some(50),
            ..Default::default()
        });
        assert_eq!(merged.threshold, 50);
        assert_eq!(merged.max_results, 20);
    }

    #[test]
    fn test_validate_rejects_threshold_over_100() {
        let c = MatchConfig {
            threshold: 101,
            ..Default::default()
        };
        assert!(matches!(c.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_zero_max_results() {
        let c = MatchConfig {
            max_results: 0,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_weight() {
        let c = MatchConfig {
            content_weight: -0.1,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_weights_need_not_sum_to_one() {
        let c = MatchConfig {
            keyword_weight: 2.0,
            content_weight: 2.0,
            ..Default::default()
        };
        assert!(c.validate().is_ok());
    }
}
