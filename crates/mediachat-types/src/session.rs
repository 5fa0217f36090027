//! Session and message types for mediachat.
//!
//! A session is an owned conversation thread; its messages form an
//! append-only log where insertion order is chronological order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Unique identifier for a session, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new SessionId using UUID v7.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a SessionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Who authored a message.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (role IN ('user', 'assistant'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// Kind of media a generation request targets.
///
/// Freeform text messages carry no media kind (`Option::None` on [`Message`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
    Graphics,
}

impl MediaKind {
    /// All media kinds, in route order.
    pub const ALL: [MediaKind; 3] = [MediaKind::Video, MediaKind::Audio, MediaKind::Graphics];
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Video => write!(f, "video"),
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::Graphics => write!(f, "graphics"),
        }
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "video" => Ok(MediaKind::Video),
            "audio" => Ok(MediaKind::Audio),
            "graphics" => Ok(MediaKind::Graphics),
            other => Err(format!("invalid media kind: '{other}'")),
        }
    }
}

/// One turn within a session.
///
/// Messages are immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_kind: Option<MediaKind>,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Build a user message stamped with `timestamp`.
    pub fn user(
        content: impl Into<String>,
        media_kind: Option<MediaKind>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            media_kind,
            timestamp,
        }
    }

    /// Build an assistant message stamped with `timestamp`.
    pub fn assistant(
        content: impl Into<String>,
        media_kind: Option<MediaKind>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            media_kind,
            timestamp,
        }
    }
}

/// A titled conversation thread owned by a single identity.
///
/// `owner_name` is a snapshot taken at creation and is never re-synced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub title: String,
    pub owner_id: String,
    pub owner_name: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Whether `identity_id` owns this session.
    pub fn is_owned_by(&self, identity_id: &str) -> bool {
        self.owner_id == identity_id
    }
}

/// Input to a generation call, as received from the transport layer.
///
/// `session_id` stays a raw string so that emptiness and malformed ids can
/// be reported as distinct outcomes.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub session_id: String,
    pub prompt: String,
    pub media_kind: MediaKind,
}

/// Output of a Generator call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedArtifact {
    pub media_kind: MediaKind,
    pub content: String,
}
