//! Generation HTTP handler.
//!
//! Endpoint:
//! - POST /api/generate/{kind} - Generate video, audio, or graphics content
//!   into a session the caller owns

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use mediachat_types::session::{GenerateRequest, MediaKind, Message};

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::http::extractors::json::JsonBody;
use crate::state::AppState;

/// Request body for generation. The media kind comes from the path.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateBody {
    #[serde(default, rename = "sessionId")]
    pub session_id: String,
    #[serde(default)]
    pub prompt: String,
}

/// Successful generation: the appended assistant message.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub response: Message,
}

fn parse_media_kind(kind: &str) -> Result<MediaKind, AppError> {
    kind.parse::<MediaKind>()
        .map_err(|_| AppError::NotFound(format!("Unknown media kind: {kind}")))
}

/// POST /api/generate/{kind} - Run the generator and append the message pair.
pub async fn generate(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
    Path(kind): Path<String>,
    JsonBody(body): JsonBody<GenerateBody>,
) -> Result<Json<GenerateResponse>, AppError> {
    let media_kind = parse_media_kind(&kind)?;

    let request = GenerateRequest {
        session_id: body.session_id,
        prompt: body.prompt,
        media_kind,
    };

    let response = state.orchestrator.generate(&identity, request).await?;
    Ok(Json(GenerateResponse { response }))
}
