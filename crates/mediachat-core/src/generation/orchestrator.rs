//! Generation orchestrator: prompt in, persisted message pair out.
//!
//! A generate call validates its input, takes the per-session lock, checks
//! that the session exists and belongs to the caller, runs the Generator
//! under a timeout, and appends the user/assistant pair with a single
//! `append_messages` call. Every failure path leaves the log untouched.
//!
//! Ownership is enforced here as well as on reads: a non-owner gets
//! `SessionError::Forbidden` and the Generator is never called.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use mediachat_types::error::{GeneratorError, SessionError};
use mediachat_types::identity::Identity;
use mediachat_types::session::{GenerateRequest, Message, SessionId};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};

use crate::generation::generator::Generator;
use crate::session::service::SessionService;
use crate::session::store::SessionStore;
use crate::session::validation::ensure_present;

/// Default upper bound for a Generator call.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Turns prompts into persisted user/assistant message pairs.
pub struct GenerationOrchestrator<S: SessionStore, G: Generator> {
    sessions: SessionService<S>,
    generator: G,
    timeout: Duration,
    /// One async mutex per session with an in-flight generate call.
    session_locks: DashMap<SessionId, Arc<Mutex<()>>>,
}

/// Holds a session's lock; drops the lock-table entry once nobody else
/// holds or awaits it.
struct SessionLease<'a> {
    locks: &'a DashMap<SessionId, Arc<Mutex<()>>>,
    session_id: SessionId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for SessionLease<'_> {
    fn drop(&mut self) {
        // Release the mutex first so its Arc is no longer counted.
        self.guard.take();
        self.locks
            .remove_if(&self.session_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl<S: SessionStore, G: Generator> GenerationOrchestrator<S, G> {
    /// Create an orchestrator with the default generation timeout.
    pub fn new(sessions: SessionService<S>, generator: G) -> Self {
        Self {
            sessions,
            generator,
            timeout: DEFAULT_GENERATION_TIMEOUT,
            session_locks: DashMap::new(),
        }
    }

    /// Bound every Generator call by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured generation timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Number of sessions that currently have a generate call holding or
    /// awaiting their lock.
    pub fn locked_sessions(&self) -> usize {
        self.session_locks.len()
    }

    /// Generate a response for `request` and append the message pair.
    ///
    /// Returns the appended assistant message. Errors:
    /// - `InvalidRequest` if the session id or prompt is empty
    /// - `NotFound` if the session id is malformed or unknown
    /// - `Forbidden` if `requester` does not own the session
    /// - `GenerationFailure` if the Generator fails or times out
    /// - `StorageError` if the append fails
    pub async fn generate(
        &self,
        requester: &Identity,
        request: GenerateRequest,
    ) -> Result<Message, SessionError> {
        ensure_present("sessionId", &request.session_id)?;
        ensure_present("prompt", &request.prompt)?;

        let session_id: SessionId = request
            .session_id
            .trim()
            .parse()
            .map_err(|_| SessionError::NotFound)?;

        let _lease = self.lease(session_id).await;
        self.generate_locked(requester, &session_id, request).await
    }

    async fn lease(&self, session_id: SessionId) -> SessionLease<'_> {
        let lock = self
            .session_locks
            .entry(session_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let mut lease = SessionLease {
            locks: &self.session_locks,
            session_id,
            guard: None,
        };
        lease.guard = Some(lock.lock_owned().await);
        lease
    }

    async fn generate_locked(
        &self,
        requester: &Identity,
        session_id: &SessionId,
        request: GenerateRequest,
    ) -> Result<Message, SessionError> {
        let session = self.sessions.require_session(session_id).await?;

        if !session.is_owned_by(&requester.id) {
            warn!(
                session_id = %session_id,
                requester_id = %requester.id,
                "Rejected generation on a session owned by another identity"
            );
            return Err(SessionError::Forbidden);
        }

        let media_kind = request.media_kind;
        let generation = self.generator.generate(&request.prompt, media_kind);
        let artifact = match tokio::time::timeout(self.timeout, generation).await {
            Ok(Ok(artifact)) => artifact,
            Ok(Err(e)) => {
                warn!(
                    session_id = %session_id,
                    generator = self.generator.name(),
                    error = %e,
                    "Generation failed"
                );
                return Err(e.into());
            }
            Err(_) => {
                let e = GeneratorError::Timeout(self.timeout);
                warn!(
                    session_id = %session_id,
                    generator = self.generator.name(),
                    error = %e,
                    "Generation timed out"
                );
                return Err(e.into());
            }
        };

        if artifact.media_kind != media_kind {
            debug!(
                requested = %media_kind,
                produced = %artifact.media_kind,
                "Generator reported a different media kind; keeping the requested one"
            );
        }

        let now = Utc::now();
        let user = Message::user(request.prompt, Some(media_kind), now);
        let assistant = Message::assistant(artifact.content, Some(media_kind), now);

        self.sessions
            .store()
            .append_messages(session_id, &[user, assistant.clone()])
            .await?;

        info!(
            session_id = %session_id,
            media_kind = %media_kind,
            generator = self.generator.name(),
            "Message pair appended"
        );

        Ok(assistant)
    }
}
