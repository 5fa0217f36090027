//! Session HTTP handlers.
//!
//! Endpoints:
//! - POST /api/sessions               - Create a session owned by the caller
//! - GET  /api/sessions               - List the caller's sessions
//! - GET  /api/sessions/{id}/messages - Get messages for one of the caller's sessions

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use mediachat_types::error::SessionError;
use mediachat_types::session::{Message, Session, SessionId};

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::http::extractors::json::JsonBody;
use crate::state::AppState;

/// Request body for session creation.
///
/// Missing fields deserialize as empty and are rejected by validation.
#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionBody {
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "userName")]
    pub user_name: String,
}

/// Parse a session id from a path parameter. Malformed ids name no session.
fn parse_session_id(s: &str) -> Result<SessionId, AppError> {
    s.trim()
        .parse::<SessionId>()
        .map_err(|_| AppError::Session(SessionError::NotFound))
}

/// POST /api/sessions - Create a session.
pub async fn create_session(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
    JsonBody(body): JsonBody<CreateSessionBody>,
) -> Result<(StatusCode, Json<Session>), AppError> {
    let session = state
        .session_service
        .create(&identity.id, &body.user_name, &body.title)
        .await?;

    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/sessions - List sessions owned by the caller.
pub async fn list_sessions(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
) -> Result<Json<Vec<Session>>, AppError> {
    let sessions = state.session_service.list(&identity.id).await?;
    Ok(Json(sessions))
}

/// GET /api/sessions/{id}/messages - Messages of one session, in order.
pub async fn get_messages(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
    Path(id): Path<String>,
) -> Result<Json<Vec<Message>>, AppError> {
    let session_id = parse_session_id(&id)?;
    let messages = state
        .session_service
        .get_messages(&session_id, &identity.id)
        .await?;
    Ok(Json(messages))
}
