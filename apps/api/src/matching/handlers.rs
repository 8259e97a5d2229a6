//! Axum route handlers for the Matching API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::matching::history::{group_results, GroupBy, MatchRun, ResultGroup, Timeframe};
use crate::matching::matcher::{match_candidates, score_pair};
use crate::matching::settings::{MatchConfig, MatchSettingsOverride};
use crate::repository::get_all;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub cv_ids: Vec<String>,
    pub rfp_ids: Vec<String>,
    #[serde(default)]
    pub settings: MatchSettingsOverride,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub timeframe: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RunQuery {
    pub group_by: Option<GroupBy>,
}

#[derive(Debug, Serialize)]
pub struct RunDetailResponse {
    pub run: MatchRun,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<ResultGroup>>,
}

#[derive(Debug, Deserialize)]
pub struct PitchRequest {
    pub cv_id: String,
    pub rfp_id: String,
}

#[derive(Debug, Serialize)]
pub struct PitchResponse {
    pub cv_id: String,
    pub rfp_id: String,
    pub score: u32,
    pub matched_keywords: Vec<String>,
    pub pitch: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/matches/settings
pub async fn handle_match_settings(State(state): State<AppState>) -> Json<MatchConfig> {
    Json(state.config.match_defaults.clone())
}

/// POST /api/v1/matches
///
/// Scores the selected CVs against the selected RFPs, records the run in history
/// and returns it.
pub async fn handle_run_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<(StatusCode, Json<MatchRun>), AppError> {
    if request.cv_ids.is_empty() || request.rfp_ids.is_empty() {
        return Err(AppError::Validation(
            "Select at least one CV and one RFP".to_string(),
        ));
    }

    let settings = state.config.match_defaults.merged(&request.settings);
    settings.validate()?;

    let cvs = get_all(state.cvs.as_ref(), &request.cv_ids, "CV").await?;
    let rfps = get_all(state.rfps.as_ref(), &request.rfp_ids, "RFP").await?;

    let results = match_candidates(&cvs, &rfps, &settings);
    debug!(
        "Scored {} pairs, {} kept (threshold {}, cap {})",
        cvs.len() * rfps.len(),
        results.len(),
        settings.threshold,
        settings.max_results
    );

    let run = MatchRun::new(results, request.cv_ids, request.rfp_ids, settings);
    info!("Match run {} produced {} results", run.id, run.results.len());

    state.history.record(run.clone()).await;
    Ok((StatusCode::CREATED, Json(run)))
}

/// GET /api/v1/matches/history?timeframe=all|today|yesterday|this_week|this_month
pub async fn handle_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<MatchRun>>, AppError> {
    let timeframe = match params.timeframe.as_deref() {
        Some(raw) => raw.parse::<Timeframe>().map_err(AppError::Validation)?,
        None => Timeframe::All,
    };
    Ok(Json(state.history.list(timeframe, Utc::now()).await))
}

/// GET /api/v1/matches/history/:id?group_by=cv|rfp
pub async fn handle_get_run(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<RunQuery>,
) -> Result<Json<RunDetailResponse>, AppError> {
    let run = state
        .history
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Match run {id} not found")))?;

    let groups = params
        .group_by
        .map(|group_by| group_results(&run.results, group_by));
    Ok(Json(RunDetailResponse { run, groups }))
}

/// DELETE /api/v1/matches/history/:id
pub async fn handle_delete_run(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.history.delete(&id).await {
        return Err(AppError::NotFound(format!("Match run {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/matches/history
pub async fn handle_clear_history(State(state): State<AppState>) -> StatusCode {
    state.history.clear().await;
    info!("Match history cleared");
    StatusCode::NO_CONTENT
}

/// POST /api/v1/matches/pitch
///
/// Re-scores the pair and asks the assistant for a pitch. The pitch is not stored.
pub async fn handle_pitch(
    State(state): State<AppState>,
    Json(request): Json<PitchRequest>,
) -> Result<Json<PitchResponse>, AppError> {
    let cv = state
        .cvs
        .get(&request.cv_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("CV {} not found", request.cv_id)))?;
    let rfp = state
        .rfps
        .get(&request.rfp_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("RFP {} not found", request.rfp_id)))?;

    let result = score_pair(&cv, &rfp);
    let pitch = state.assistant.generate_pitch(&cv, &rfp, &result).await?;
    info!("Generated pitch for CV {} / RFP {}", cv.id, rfp.id);

    Ok(Json(PitchResponse {
        cv_id: result.cv_id,
        rfp_id: result.rfp_id,
        score: result.score,
        matched_keywords: result.matched_keywords,
        pitch,
    }))
}
