pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::cvs::handlers as cvs;
use crate::matching::handlers as matching;
use crate::rfps::handlers as rfps;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // CV API
        .route(
            "/api/v1/cvs",
            get(cvs::handle_list_cvs).post(cvs::handle_create_cv),
        )
        .route(
            "/api/v1/cvs/upload",
            post(cvs::handle_upload_cv).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route(
            "/api/v1/cvs/:id",
            get(cvs::handle_get_cv)
                .put(cvs::handle_update_cv)
                .delete(cvs::handle_delete_cv),
        )
        .route("/api/v1/cvs/:id/download", get(cvs::handle_download_cv))
        .route("/api/v1/cvs/:id/reanalyze", post(cvs::handle_reanalyze_cv))
        // RFP API
        .route(
            "/api/v1/rfps",
            get(rfps::handle_list_rfps).post(rfps::handle_create_rfp),
        )
        .route(
            "/api/v1/rfps/:id",
            get(rfps::handle_get_rfp)
                .put(rfps::handle_update_rfp)
                .delete(rfps::handle_delete_rfp),
        )
        // Matching API
        .route("/api/v1/matches", post(matching::handle_run_match))
        .route(
            "/api/v1/matches/settings",
            get(matching::handle_match_settings),
        )
        .route("/api/v1/matches/pitch", post(matching::handle_pitch))
        .route(
            "/api/v1/matches/history",
            get(matching::handle_history).delete(matching::handle_clear_history),
        )
        .route(
            "/api/v1/matches/history/:id",
            get(matching::handle_get_run).delete(matching::handle_delete_run),
        )
        .with_state(state)
}
