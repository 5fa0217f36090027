//! SQLite identity and API key store.
//!
//! Backs the HTTP auth gate. Plaintext keys are returned once at creation
//! and only their SHA-256 hashes are persisted in `api_keys`.

use chrono::{DateTime, Utc};
use mediachat_types::error::IdentityError;
use mediachat_types::identity::{Identity, IdentityRecord};
use sha2::{Digest, Sha256};
use sqlx::Row;
use tracing::{debug, info};
use uuid::Uuid;

use super::pool::DatabasePool;

/// Prefix on every issued key, so leaked keys are recognisable.
pub const API_KEY_PREFIX: &str = "mck_";

/// Compute SHA-256 hash of an API key (lowercase hex).
pub fn hash_api_key(key: &str) -> String {
    let digest = Sha256::digest(key.as_bytes());
    format!("{:x}", digest)
}

/// 256 bits of randomness from two v4 UUIDs, hex encoded.
fn generate_api_key() -> String {
    format!(
        "{API_KEY_PREFIX}{}{}",
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple()
    )
}

/// SQLite-backed identity store.
pub struct SqliteIdentityStore {
    pool: DatabasePool,
}

impl SqliteIdentityStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Create an identity and issue its first API key.
    ///
    /// Returns the stored record and the plaintext key. The key cannot be
    /// recovered later.
    pub async fn create_identity(
        &self,
        name: &str,
    ) -> Result<(IdentityRecord, String), IdentityError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(IdentityError::InvalidName(
                "name must not be empty".to_string(),
            ));
        }

        let record = IdentityRecord {
            id: Uuid::now_v7().to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
            last_seen_at: None,
        };
        let plaintext_key = generate_api_key();
        let created_at = format_datetime(&record.created_at);

        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| IdentityError::StorageError(e.to_string()))?;

        sqlx::query("INSERT INTO identities (id, name, created_at) VALUES (?, ?, ?)")
            .bind(&record.id)
            .bind(&record.name)
            .bind(&created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| IdentityError::StorageError(e.to_string()))?;

        sqlx::query(
            "INSERT INTO api_keys (id, identity_id, key_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(Uuid::now_v7().to_string())
        .bind(&record.id)
        .bind(hash_api_key(&plaintext_key))
        .bind(&created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| IdentityError::StorageError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| IdentityError::StorageError(e.to_string()))?;

        info!(identity_id = %record.id, name = %record.name, "Identity created");
        Ok((record, plaintext_key))
    }

    /// Resolve an API key to its identity.
    ///
    /// Returns `Ok(None)` for unknown keys. Updates `last_used_at` on a
    /// best-effort basis.
    pub async fn authenticate(&self, api_key: &str) -> Result<Option<Identity>, IdentityError> {
        let key_hash = hash_api_key(api_key);

        let row = sqlx::query(
            r#"SELECT k.id AS key_id, i.id AS identity_id, i.name AS name
               FROM api_keys k JOIN identities i ON i.id = k.identity_id
               WHERE k.key_hash = ?"#,
        )
        .bind(&key_hash)
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| IdentityError::StorageError(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let key_id: String = row
            .try_get("key_id")
            .map_err(|e| IdentityError::StorageError(e.to_string()))?;
        let identity = Identity {
            id: row
                .try_get("identity_id")
                .map_err(|e| IdentityError::StorageError(e.to_string()))?,
            name: row
                .try_get("name")
                .map_err(|e| IdentityError::StorageError(e.to_string()))?,
        };

        if let Err(e) = sqlx::query("UPDATE api_keys SET last_used_at = ? WHERE id = ?")
            .bind(format_datetime(&Utc::now()))
            .bind(&key_id)
            .execute(&self.pool.writer)
            .await
        {
            debug!(identity_id = %identity.id, error = %e, "Failed to record key usage");
        }

        Ok(Some(identity))
    }

    /// List all identities, oldest first.
    pub async fn list_identities(&self) -> Result<Vec<IdentityRecord>, IdentityError> {
        let rows = sqlx::query(
            r#"SELECT i.id, i.name, i.created_at, MAX(k.last_used_at) AS last_seen_at
               FROM identities i LEFT JOIN api_keys k ON k.identity_id = i.id
               GROUP BY i.id
               ORDER BY i.created_at ASC, i.id ASC"#,
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| IdentityError::StorageError(e.to_string()))?;

        rows.iter()
            .map(|row| {
                IdentityRow::from_row(row)
                    .map_err(|e| IdentityError::StorageError(e.to_string()))?
                    .into_record()
            })
            .collect()
    }
}

struct IdentityRow {
    id: String,
    name: String,
    created_at: String,
    last_seen_at: Option<String>,
}

impl IdentityRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            created_at: row.try_get("created_at")?,
            last_seen_at: row.try_get("last_seen_at")?,
        })
    }

    fn into_record(self) -> Result<IdentityRecord, IdentityError> {
        Ok(IdentityRecord {
            id: self.id,
            name: self.name,
            created_at: parse_datetime(&self.created_at)?,
            last_seen_at: self.last_seen_at.as_deref().map(parse_datetime).transpose()?,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, IdentityError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| IdentityError::StorageError(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}
