//! Session service enforcing validation and ownership above the store.
//!
//! SessionService is the read/create surface for sessions. It never mutates
//! a session's message log; appends go through the generation orchestrator.

use chrono::Utc;
use mediachat_types::error::SessionError;
use mediachat_types::session::{Message, Session, SessionId};
use tracing::{info, warn};

use crate::session::store::SessionStore;
use crate::session::validation::{ensure_present, validate_new_session};

/// Creates, lists, and reads sessions on behalf of an identity.
///
/// Generic over `SessionStore` to maintain clean architecture
/// (mediachat-core never depends on mediachat-infra).
pub struct SessionService<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> SessionService<S> {
    /// Create a new session service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a new, empty session owned by `owner_id`.
    ///
    /// `title` and `owner_name` are trimmed and must not be empty.
    pub async fn create(
        &self,
        owner_id: &str,
        owner_name: &str,
        title: &str,
    ) -> Result<Session, SessionError> {
        ensure_present("owner id", owner_id)?;
        let (title, owner_name) = validate_new_session(title, owner_name)?;

        let session = Session {
            id: SessionId::new(),
            title,
            owner_id: owner_id.to_string(),
            owner_name,
            messages: Vec::new(),
            created_at: Utc::now(),
        };

        let id = self.store.insert(&session).await?;
        info!(session_id = %id, owner_id = %owner_id, "Session created");

        Ok(session)
    }

    /// List every session owned by `owner_id`.
    pub async fn list(&self, owner_id: &str) -> Result<Vec<Session>, SessionError> {
        let sessions = self.store.list_by_owner(owner_id).await?;
        // The store filters by owner already; this keeps a faulty backend from leaking.
        Ok(sessions
            .into_iter()
            .filter(|s| s.is_owned_by(owner_id))
            .collect())
    }

    /// Fetch a session or fail with `NotFound`.
    ///
    /// Performs no ownership check.
    pub async fn require_session(&self, session_id: &SessionId) -> Result<Session, SessionError> {
        self.store
            .get_by_id(session_id)
            .await?
            .ok_or(SessionError::NotFound)
    }

    /// Return the messages of a session owned by `requester_id`, in stored order.
    pub async fn get_messages(
        &self,
        session_id: &SessionId,
        requester_id: &str,
    ) -> Result<Vec<Message>, SessionError> {
        let session = self.require_session(session_id).await?;

        if !session.is_owned_by(requester_id) {
            warn!(
                session_id = %session_id,
                requester_id = %requester_id,
                "Rejected message read on a session owned by another identity"
            );
            return Err(SessionError::Forbidden);
        }

        Ok(session.messages)
    }
}
