//! Shortened links.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortened link. `slug` is unique within the registry; `clicks`
/// only ever grows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortLink {
    pub id: String,
    pub slug: String,
    pub original_url: String,
    pub title: String,
    pub owner_id: String,
    pub clicks: u64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    /// Argon2 hash; never the plaintext.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ShortLink {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp < now)
    }

    pub fn is_protected(&self) -> bool {
        self.password.is_some()
    }
}
