//! Axum route handlers for the RFP API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::models::{NewRfp, Rfp};
use crate::state::AppState;

async fn require_rfp(state: &AppState, id: &str) -> Result<Rfp, AppError> {
    state
        .rfps
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("RFP {id} not found")))
}

/// GET /api/v1/rfps
pub async fn handle_list_rfps(State(state): State<AppState>) -> Result<Json<Vec<Rfp>>, AppError> {
    Ok(Json(state.rfps.list().await?))
}

/// POST /api/v1/rfps
pub async fn handle_create_rfp(
    State(state): State<AppState>,
    Json(request): Json<NewRfp>,
) -> Result<(StatusCode, Json<Rfp>), AppError> {
    let rfp = request.into_rfp(None)?;
    if !state.rfps.insert(rfp.clone()).await? {
        return Err(AppError::Validation(format!("RFP {} already exists", rfp.id)));
    }
    info!("Created RFP {} ({})", rfp.id, rfp.title);
    Ok((StatusCode::CREATED, Json(rfp)))
}

/// GET /api/v1/rfps/:id
pub async fn handle_get_rfp(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Rfp>, AppError> {
    Ok(Json(require_rfp(&state, &id).await?))
}

/// PUT /api/v1/rfps/:id
pub async fn handle_update_rfp(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<NewRfp>,
) -> Result<Json<Rfp>, AppError> {
    let rfp = request.into_rfp(Some(id))?;
    if !state.rfps.update(rfp.clone()).await? {
        return Err(AppError::NotFound(format!("RFP {} not found", rfp.id)));
    }
    info!("Updated RFP {}", rfp.id);
    Ok(Json(rfp))
}

/// DELETE /api/v1/rfps/:id
pub async fn handle_delete_rfp(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.rfps.delete(&id).await? {
        return Err(AppError::NotFound(format!("RFP {id} not found")));
    }
    info!("Deleted RFP {id}");
    Ok(StatusCode::NO_CONTENT)
}
