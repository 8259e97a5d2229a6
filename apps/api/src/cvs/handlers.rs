//! Axum route handlers for the CV API.

use anyhow::anyhow;
use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::cvs::upload::extract_text;
use crate::errors::AppError;
use crate::models::{Candidate, NewCandidate};
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";

async fn require_cv(state: &AppState, id: &str) -> Result<Candidate, AppError> {
    state
        .cvs
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("CV {id} not found")))
}

/// GET /api/v1/cvs
pub async fn handle_list_cvs(
    State(state): State<AppState>,
) -> Result<Json<Vec<Candidate>>, AppError> {
    Ok(Json(state.cvs.list().await?))
}

/// POST /api/v1/cvs
pub async fn handle_create_cv(
    State(state): State<AppState>,
    Json(request): Json<NewCandidate>,
) -> Result<(StatusCode, Json<Candidate>), AppError> {
    let cv = request.into_candidate(None)?;
    if !state.cvs.insert(cv.clone()).await? {
        return Err(AppError::Validation(format!("CV {} already exists", cv.id)));
    }
    info!("Created CV {} ({})", cv.id, cv.name);
    Ok((StatusCode::CREATED, Json(cv)))
}

/// POST /api/v1/cvs/upload
///
/// Multipart upload with a single `file` field. The file name becomes the CV name and,
/// when it follows `First_Last_CV.ext`, the candidate's first and last name.
pub async fn handle_upload_cv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Candidate>), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| AppError::Validation("Uploaded file has no name".to_string()))?;
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        let name = file_name.clone();
        let content = tokio::task::spawn_blocking(move || {
            extract_text(&name, content_type.as_deref(), &bytes)
        })
        .await
        .map_err(|e| AppError::Internal(anyhow!("Text extraction task failed: {e}")))??;

        let cv = NewCandidate {
            id: None,
            name: file_name,
            first_name: None,
            last_name: None,
            content,
        }
        .into_candidate(None)?;

        if !state.cvs.insert(cv.clone()).await? {
            return Err(AppError::Validation(format!("CV {} already exists", cv.id)));
        }
        info!(
            "Uploaded CV {} ({}, {} chars)",
            cv.id,
            cv.name,
            cv.content.chars().count()
        );
        return Ok((StatusCode::CREATED, Json(cv)));
    }

    Err(AppError::Validation(format!(
        "Multipart body must contain a '{UPLOAD_FIELD}' field"
    )))
}

/// GET /api/v1/cvs/:id
pub async fn handle_get_cv(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Candidate>, AppError> {
    Ok(Json(require_cv(&state, &id).await?))
}

/// PUT /api/v1/cvs/:id
pub async fn handle_update_cv(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<NewCandidate>,
) -> Result<Json<Candidate>, AppError> {
    let cv = request.into_candidate(Some(id))?;
    if !state.cvs.update(cv.clone()).await? {
        return Err(AppError::NotFound(format!("CV {} not found", cv.id)));
    }
    info!("Updated CV {}", cv.id);
    Ok(Json(cv))
}

/// DELETE /api/v1/cvs/:id
pub async fn handle_delete_cv(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.cvs.delete(&id).await? {
        return Err(AppError::NotFound(format!("CV {id} not found")));
    }
    info!("Deleted CV {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/cvs/:id/download
///
/// Exports the CV content as a plain-text attachment named after the CV.
pub async fn handle_download_cv(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let cv = require_cv(&state, &id).await?;
    let disposition = format!("attachment; filename=\"{}\"", attachment_name(&cv.name));

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        cv.content,
    ))
}

/// POST /api/v1/cvs/:id/reanalyze
///
/// Replaces the CV content with the assistant's rewrite and returns the stored record.
pub async fn handle_reanalyze_cv(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Candidate>, AppError> {
    let cv = require_cv(&state, &id).await?;
    let content = state.assistant.enhance_content(&cv).await?;

    let cv = Candidate { content, ..cv };
    if !state.cvs.update(cv.clone()).await? {
        return Err(AppError::NotFound(format!("CV {} not found", cv.id)));
    }
    info!("Re-analyzed CV {}", cv.id);
    Ok(Json(cv))
}

/// Header-safe file name: quotes, backslashes and control characters become `_`.
fn attachment_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c == '"' || c == '\\' || c.is_control() || !c.is_ascii() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_name_plain() {
        assert_eq!(attachment_name("Alex_Chen_CV.pdf"), "Alex_Chen_CV.pdf");
    }

    #[test]
    fn test_attachment_name_sanitized() {
        assert_eq!(attachment_name("a\"b\\c\nd"), "a_b_c_d");
        assert_eq!(attachment_name("Zoë.txt"), "Zo_.txt");
    }
}
