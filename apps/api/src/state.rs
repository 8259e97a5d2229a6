use std::sync::Arc;

use crate::assist::Assistant;
use crate::config::Config;
use crate::matching::history::MatchHistory;
use crate::models::{Candidate, Rfp};
use crate::repository::Repository;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub cvs: Arc<dyn Repository<Candidate>>,
    pub rfps: Arc<dyn Repository<Rfp>>,
    /// Session-scoped run history. Always in memory, whatever the record store.
    pub history: Arc<MatchHistory>,
    /// Pluggable assistant. `UnconfiguredAssistant` when no API key is set.
    pub assistant: Arc<dyn Assistant>,
    pub config: Config,
}
