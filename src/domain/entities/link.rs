//! Short link entity representing a key → URL mapping.

use chrono::{DateTime, Utc};

use super::creator::Creator;

/// A shortened URL with its ownership, visibility and usage metadata.
///
/// Only `click_count` changes after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortLink {
    pub id: i64,
    pub short_key: String,
    pub original_url: String,
    pub created_by: Option<Creator>,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub click_count: i64,
}

impl ShortLink {
    /// Returns true if `expires_at` is strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| e < now)
    }

    /// Returns the owner's id, if the link has one.
    pub fn owner_id(&self) -> Option<i64> {
        self.created_by.as_ref().map(|c| c.id)
    }

    /// Returns true if `creator_id` owns this link.
    pub fn is_owned_by(&self, creator_id: i64) -> bool {
        self.owner_id() == Some(creator_id)
    }
}

/// Input data for inserting a new short link.
///
/// `click_count` always starts at zero and `created_at` is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewShortLink {
    pub short_key: String,
    pub original_url: String,
    pub created_by: Option<i64>,
    pub is_private: bool,
    pub expires_at: Option<DateTime<Utc>>,
}
