use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tk_core::categories::{find_category, CategoryDef, CATEGORIES};
use tk_feed::{FeedEvent, FeedState, FeedView, Phase, RefreshOutcome};
use tracing::debug;

use crate::AppState;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::UnknownCategory(_) => StatusCode::NOT_FOUND,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Serialize)]
pub struct RefreshResponse {
    /// `false` when the request joined a fetch that was already running.
    pub dispatched: bool,
    pub phase: Phase,
    pub feed: FeedView,
}

pub async fn get_feed(State(state): State<Arc<AppState>>) -> Json<FeedView> {
    Json(FeedView::from_state(&state.controller.snapshot()))
}

pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<FeedState> {
    Json(state.controller.snapshot())
}

pub async fn list_categories() -> Json<Vec<CategoryDef>> {
    Json(CATEGORIES.to_vec())
}

async fn run_refresh(state: &AppState, event: FeedEvent) -> Json<RefreshResponse> {
    let outcome = state.controller.handle(event).await;
    let snapshot = state.controller.snapshot();
    let dispatched = matches!(outcome, Some(RefreshOutcome::Completed(_)));
    if !dispatched {
        debug!("Refresh request coalesced with running fetch");
    }
    Json(RefreshResponse {
        dispatched,
        phase: snapshot.phase,
        feed: FeedView::from_state(&snapshot),
    })
}

pub async fn refresh(State(state): State<Arc<AppState>>) -> Json<RefreshResponse> {
    run_refresh(&state, FeedEvent::Refresh).await
}

pub async fn retry(State(state): State<Arc<AppState>>) -> Json<RefreshResponse> {
    run_refresh(&state, FeedEvent::Retry).await
}

pub async fn select_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<FeedView>, ApiError> {
    let category = find_category(&id).ok_or(ApiError::UnknownCategory(id))?;
    state.controller.handle(FeedEvent::SelectCategory(category.id.to_string())).await;
    Ok(Json(FeedView::from_state(&state.controller.snapshot())))
}

pub async fn toggle_menu(State(state): State<Arc<AppState>>) -> Json<FeedView> {
    state.controller.handle(FeedEvent::ToggleMenu).await;
    Json(FeedView::from_state(&state.controller.snapshot()))
}

pub async fn close_menu(State(state): State<Arc<AppState>>) -> Json<FeedView> {
    state.controller.handle(FeedEvent::CloseMenu).await;
    Json(FeedView::from_state(&state.controller.snapshot()))
}
