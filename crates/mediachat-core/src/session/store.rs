//! SessionStore trait definition.
//!
//! The only persistence seam in mediachat: sessions and their append-only
//! message logs. Uses native async fn in traits (RPITIT, Rust 2024 edition).

use mediachat_types::error::RepositoryError;
use mediachat_types::session::{Message, Session, SessionId};

/// Durable keyed storage for sessions and their message logs.
///
/// Implementations live in mediachat-infra (e.g., `SqliteSessionStore`).
pub trait SessionStore: Send + Sync {
    /// Persist a new session and return its id.
    fn insert(
        &self,
        session: &Session,
    ) -> impl std::future::Future<Output = Result<SessionId, RepositoryError>> + Send;

    /// Get a session, including its messages, by id.
    fn get_by_id(
        &self,
        id: &SessionId,
    ) -> impl std::future::Future<Output = Result<Option<Session>, RepositoryError>> + Send;

    /// List every session owned by `owner_id`.
    ///
    /// Order is stable across repeated calls when no writes happen in between.
    fn list_by_owner(
        &self,
        owner_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Session>, RepositoryError>> + Send;

    /// Append `messages` to the session's log as one indivisible unit.
    ///
    /// Returns `RepositoryError::NotFound` without writing anything if the
    /// session does not exist. Either every message lands, in the given
    /// order, or none does.
    fn append_messages(
        &self,
        id: &SessionId,
        messages: &[Message],
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
