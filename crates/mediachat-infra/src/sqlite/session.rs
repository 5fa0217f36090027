//! SQLite session store implementation.
//!
//! Implements `SessionStore` from `mediachat-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, reads on the reader
//! pool, writes in transactions on the single-connection writer pool.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use mediachat_core::session::store::SessionStore;
use mediachat_types::error::RepositoryError;
use mediachat_types::session::{MediaKind, Message, MessageRole, Session, SessionId};
use sqlx::Row;
use tracing::debug;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SessionStore`.
pub struct SqliteSessionStore {
    pool: DatabasePool,
}

impl SqliteSessionStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    async fn load_messages(&self, session_id: &str) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM session_messages WHERE session_id = ? ORDER BY seq ASC",
        )
        .bind(session_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let msg_row =
                MessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(msg_row.into_message()?);
        }
        Ok(messages)
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct SessionRow {
    id: String,
    title: String,
    owner_id: String,
    owner_name: String,
    created_at: String,
}

impl SessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            owner_id: row.try_get("owner_id")?,
            owner_name: row.try_get("owner_name")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_session(self, messages: Vec<Message>) -> Result<Session, RepositoryError> {
        let id: SessionId = self
            .id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid session id: {e}")))?;

        Ok(Session {
            id,
            title: self.title,
            owner_id: self.owner_id,
            owner_name: self.owner_name,
            messages,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

struct MessageRow {
    session_id: String,
    role: String,
    content: String,
    media_kind: Option<String>,
    timestamp: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            session_id: row.try_get("session_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            media_kind: row.try_get("media_kind")?,
            timestamp: row.try_get("timestamp")?,
        })
    }

    fn into_message(self) -> Result<Message, RepositoryError> {
        let role: MessageRole = self
            .role
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let media_kind = self
            .media_kind
            .as_deref()
            .map(str::parse::<MediaKind>)
            .transpose()
            .map_err(RepositoryError::Query)?;

        Ok(Message {
            role,
            content: self.content,
            media_kind,
            timestamp: parse_datetime(&self.timestamp)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

async fn insert_message(
    conn: &mut sqlx::SqliteConnection,
    session_id: &str,
    seq: i64,
    message: &Message,
) -> Result<(), RepositoryError> {
    sqlx::query(
        r#"INSERT INTO session_messages (session_id, seq, role, content, media_kind, timestamp)
           VALUES (?, ?, ?, ?, ?, ?)"#,
    )
    .bind(session_id)
    .bind(seq)
    .bind(message.role.to_string())
    .bind(&message.content)
    .bind(message.media_kind.map(|k| k.to_string()))
    .bind(format_datetime(&message.timestamp))
    .execute(conn)
    .await
    .map_err(|e| RepositoryError::Query(e.to_string()))?;

    Ok(())
}

// ---------------------------------------------------------------------------
// SessionStore implementation
// ---------------------------------------------------------------------------

impl SessionStore for SqliteSessionStore {
    async fn insert(&self, session: &Session) -> Result<SessionId, RepositoryError> {
        let id = session.id.to_string();
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query(
            r#"INSERT INTO sessions (id, title, owner_id, owner_name, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&session.title)
        .bind(&session.owner_id)
        .bind(&session.owner_name)
        .bind(format_datetime(&session.created_at))
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.message().contains("UNIQUE") {
                    return RepositoryError::Conflict(format!("session {id} already exists"));
                }
            }
            RepositoryError::Query(e.to_string())
        })?;

        for (seq, message) in session.messages.iter().enumerate() {
            insert_message(&mut tx, &id, seq as i64, message).await?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(session.id)
    }

    async fn get_by_id(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError> {
        let id = id.to_string();
        let row = sqlx::query("SELECT * FROM sessions WHERE id = ?")
            .bind(&id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let session_row =
                    SessionRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                let messages = self.load_messages(&id).await?;
                Ok(Some(session_row.into_session(messages)?))
            }
            None => Ok(None),
        }
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Session>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM sessions WHERE owner_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let message_rows = sqlx::query(
            r#"SELECT m.* FROM session_messages m
               JOIN sessions s ON s.id = m.session_id
               WHERE s.owner_id = ?
               ORDER BY m.session_id ASC, m.seq ASC"#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages_by_session: HashMap<String, Vec<Message>> = HashMap::new();
        for row in &message_rows {
            let msg_row =
                MessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            let session_id = msg_row.session_id.clone();
            messages_by_session
                .entry(session_id)
                .or_default()
                .push(msg_row.into_message()?);
        }

        let mut sessions = Vec::with_capacity(rows.len());
        for row in &rows {
            let session_row =
                SessionRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            let messages = messages_by_session
                .remove(&session_row.id)
                .unwrap_or_default();
            sessions.push(session_row.into_session(messages)?);
        }

        Ok(sessions)
    }

    async fn append_messages(
        &self,
        id: &SessionId,
        messages: &[Message],
    ) -> Result<(), RepositoryError> {
        let id = id.to_string();
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        // No row means no session; dropping `tx` rolls back.
        let row = sqlx::query(
            r#"SELECT COALESCE(
                   (SELECT MAX(seq) + 1 FROM session_messages WHERE session_id = s.id), 0
               ) AS next_seq
               FROM sessions s WHERE s.id = ?"#,
        )
        .bind(&id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        let next_seq: i64 = row
            .try_get("next_seq")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        for (offset, message) in messages.iter().enumerate() {
            insert_message(&mut tx, &id, next_seq + offset as i64, message).await?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        debug!(session_id = %id, count = messages.len(), first_seq = next_seq, "Messages appended");
        Ok(())
    }
}
