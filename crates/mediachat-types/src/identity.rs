use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An authenticated caller, as yielded by the auth gate.
///
/// `id` is the ownership key for sessions; `name` is only for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
}

/// A stored identity record, including when it was issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Last time any of this identity's keys authenticated a request.
    pub last_seen_at: Option<DateTime<Utc>>,
}

impl From<IdentityRecord> for Identity {
    fn from(record: IdentityRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
        }
    }
}
