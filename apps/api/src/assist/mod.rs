//! Assistant — content re-analysis and pitch generation behind a swappable trait.
//!
//! `AppState` holds an `Arc<dyn Assistant>`: `LlmAssistant` when an API key is
//! configured, `UnconfiguredAssistant` otherwise.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::matching::matcher::MatchResult;
use crate::models::{Candidate, Rfp};

pub mod prompts;

use prompts::{ENHANCE_PROMPT_TEMPLATE, ENHANCE_SYSTEM, PITCH_PROMPT_TEMPLATE, PITCH_SYSTEM};

#[async_trait]
pub trait Assistant: Send + Sync {
    /// Returns a rewritten version of the candidate's content.
    async fn enhance_content(&self, candidate: &Candidate) -> Result<String, AppError>;

    /// Returns a pitch for `candidate` applying to `rfp`, informed by their match result.
    async fn generate_pitch(
        &self,
        candidate: &Candidate,
        rfp: &Rfp,
        result: &MatchResult,
    ) -> Result<String, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmAssistant
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmAssistant(pub LlmClient);

#[async_trait]
impl Assistant for LlmAssistant {
    async fn enhance_content(&self, candidate: &Candidate) -> Result<String, AppError> {
        self.0
            .call_text(&enhance_prompt(candidate), ENHANCE_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("CV re-analysis failed: {e}")))
    }

    async fn generate_pitch(
        &self,
        candidate: &Candidate,
        rfp: &Rfp,
        result: &MatchResult,
    ) -> Result<String, AppError> {
        self.0
            .call_text(&pitch_prompt(candidate, rfp, result), PITCH_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Pitch generation failed: {e}")))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// UnconfiguredAssistant
// ────────────────────────────────────────────────────────────────────────────

/// Installed when no API key is configured. Every call reports the service as unavailable.
pub struct UnconfiguredAssistant;

const UNCONFIGURED: &str = "Assistant is not configured (set ANTHROPIC_API_KEY)";

#[async_trait]
impl Assistant for UnconfiguredAssistant {
    async fn enhance_content(&self, _candidate: &Candidate) -> Result<String, AppError> {
        Err(AppError::Unavailable(UNCONFIGURED.to_string()))
    }

    async fn generate_pitch(
        &self,
        _candidate: &Candidate,
        _rfp: &Rfp,
        _result: &MatchResult,
    ) -> Result<String, AppError> {
        Err(AppError::Unavailable(UNCONFIGURED.to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt building
// ────────────────────────────────────────────────────────────────────────────

/// Replaces every `{key}` in `template` in a single left-to-right pass. Substituted values
/// are never rescanned, so braces inside user text stay literal. Unknown keys are kept.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let replacement = tail.find('}').and_then(|close| {
            let key = &tail[1..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (*value, close))
        });

        match replacement {
            Some((value, close)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn enhance_prompt(candidate: &Candidate) -> String {
    let name = candidate.display_name();
    fill_template(
        ENHANCE_PROMPT_TEMPLATE,
        &[("name", name.as_str()), ("content", candidate.content.as_str())],
    )
}

fn pitch_prompt(candidate: &Candidate, rfp: &Rfp, result: &MatchResult) -> String {
    let keywords = if result.matched_keywords.is_empty() {
        "(no overlapping keywords)".to_string()
    } else {
        result.matched_keywords.join(", ")
    };
    let name = candidate.display_name();
    let score = result.score.to_string();

    fill_template(
        PITCH_PROMPT_TEMPLATE,
        &[
            ("candidate", name.as_str()),
            ("score", score.as_str()),
            ("keywords", keywords.as_str()),
            ("title", rfp.title.as_str()),
            ("requirements", rfp.requirements.as_str()),
            ("description", rfp.description.as_str()),
            ("content", candidate.content.as_str()),
        ],
    )
}
