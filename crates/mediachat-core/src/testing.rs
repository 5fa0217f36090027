//! In-memory test doubles shared by the service and orchestrator tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use mediachat_types::error::RepositoryError;
use mediachat_types::session::{Message, Session, SessionId};

use crate::session::store::SessionStore;

#[derive(Default)]
struct Inner {
    sessions: HashMap<SessionId, Session>,
    insertion_order: Vec<SessionId>,
}

/// `SessionStore` over a shared `HashMap`. Clones share state.
///
/// `append_messages` pushes one message at a time and yields in between, so
/// it is NOT atomic on its own: tests use it to observe whether callers
/// serialize appends.
#[derive(Clone, Default)]
pub struct MockSessionStore {
    inner: Arc<Mutex<Inner>>,
    fail_writes: Arc<AtomicBool>,
}

impl MockSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with a query error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn session_count(&self) -> usize {
        self.inner.lock().unwrap().sessions.len()
    }

    pub fn messages(&self, id: &SessionId) -> Vec<Message> {
        self.inner
            .lock()
            .unwrap()
            .sessions
            .get(id)
            .map(|s| s.messages.clone())
            .unwrap_or_default()
    }

    pub fn seed_messages(&self, id: &SessionId, messages: Vec<Message>) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(session) = inner.sessions.get_mut(id) {
            session.messages.extend(messages);
        }
    }

    fn check_writable(&self) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Query("disk I/O error".to_string()));
        }
        Ok(())
    }
}

impl SessionStore for MockSessionStore {
    async fn insert(&self, session: &Session) -> Result<SessionId, RepositoryError> {
        self.check_writable()?;
        let mut inner = self.inner.lock().unwrap();
        if inner.sessions.contains_key(&session.id) {
            return Err(RepositoryError::Conflict(session.id.to_string()));
        }
        inner.insertion_order.push(session.id);
        inner.sessions.insert(session.id, session.clone());
        Ok(session.id)
    }

    async fn get_by_id(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError> {
        Ok(self.inner.lock().unwrap().sessions.get(id).cloned())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Session>, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .insertion_order
            .iter()
            .filter_map(|id| inner.sessions.get(id))
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn append_messages(
        &self,
        id: &SessionId,
        messages: &[Message],
    ) -> Result<(), RepositoryError> {
        self.check_writable()?;
        if !self.inner.lock().unwrap().sessions.contains_key(id) {
            return Err(RepositoryError::NotFound);
        }

        for message in messages {
            {
                let mut inner = self.inner.lock().unwrap();
                let session = inner.sessions.get_mut(id).ok_or(RepositoryError::NotFound)?;
                session.messages.push(message.clone());
            }
            tokio::task::yield_now().await;
        }
        Ok(())
    }
}
