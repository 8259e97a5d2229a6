use anyhow::{bail, Context, Result};

use crate::matching::settings::MatchConfig;

const DEFAULT_HISTORY_LIMIT: usize = 100;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Everything has a default; storage and the assistant are enabled by their variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// When set, candidates and requests are stored in PostgreSQL instead of memory.
    pub database_url: Option<String>,
    /// When set, re-analysis and pitch generation go through the Anthropic API.
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub match_defaults: MatchConfig,
    pub history_limit: usize,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = MatchConfig::default();
        let match_defaults = MatchConfig {
            threshold: parse_env("MATCH_THRESHOLD", defaults.threshold)?,
            keyword_weight: parse_env("MATCH_KEYWORD_WEIGHT", defaults.keyword_weight)?,
            content_weight: parse_env("MATCH_CONTENT_WEIGHT", defaults.content_weight)?,
            max_results: parse_env("MATCH_MAX_RESULTS", defaults.max_results)?,
        };
        if let Err(e) = match_defaults.validate() {
            bail!("Invalid default match settings: {e}");
        }

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            match_defaults,
            history_limit: parse_env("HISTORY_LIMIT", DEFAULT_HISTORY_LIMIT)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

/// Unset and blank variables are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u32 = parse_env("CVMATCH_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("CVMATCH_TEST_BAD_PORT", "eighty");
        let result: Result<u16> = parse_env("CVMATCH_TEST_BAD_PORT", 8080);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_env_reads_value() {
        std::env::set_var("CVMATCH_TEST_THRESHOLD", " 55 ");
        let value: u32 = parse_env("CVMATCH_TEST_THRESHOLD", 30).unwrap();
        assert_eq!(value, 55);
    }

    #[test]
    fn test_optional_env_treats_blank_as_unset() {
        std::env::set_var("CVMATCH_TEST_BLANK", "  ");
        assert!(optional_env("CVMATCH_TEST_BLANK").is_none());
    }
}
