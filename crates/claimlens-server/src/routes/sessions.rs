use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use claimlens_session::event::Event;
use claimlens_session::view::{render, DashboardView};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreatedSession {
    pub session_id: Uuid,
}

pub async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreatedSession>) {
    let session_id = state.sessions.create();
    (StatusCode::CREATED, Json(CreatedSession { session_id }))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DashboardView>, ApiError> {
    let slot = state.sessions.get(id)?;
    let mut session = slot.lock().await;
    Ok(Json(render(&mut session, state.data()).await))
}

/// Apply one event and return the re-rendered dashboard. A second event for
/// the same session waits until this pass has finished.
pub async fn post_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(event): Json<Event>,
) -> Result<Json<DashboardView>, ApiError> {
    let slot = state.sessions.get(id)?;
    let mut session = slot.lock().await;
    state.dispatcher.dispatch(&mut session, event).await;
    Ok(Json(render(&mut session, state.data()).await))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.sessions.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}
