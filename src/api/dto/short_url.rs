//! DTOs for short URL endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Creator, ShortLink};

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateShortUrlRequest {
    /// The original URL to shorten (must be valid HTTP/HTTPS).
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub original_url: String,

    /// Days until the link expires. Only honoured (and range checked) for
    /// owned links; anonymous links always get the default expiry.
    pub expiration_in_days: Option<i64>,

    /// Restricts resolution to the owner. Ignored for anonymous requests.
    #[serde(default)]
    pub is_private: bool,
}

/// Public view of a link owner.
#[derive(Debug, Serialize, PartialEq)]
pub struct CreatorResponse {
    pub id: i64,
    pub name: String,
}

impl From<&Creator> for CreatorResponse {
    fn from(c: &Creator) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
        }
    }
}

/// JSON representation of a short link.
#[derive(Debug, Serialize)]
pub struct ShortUrlResponse {
    pub id: i64,
    pub short_key: String,
    pub short_url: String,
    pub original_url: String,
    pub created_by: Option<CreatorResponse>,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub click_count: i64,
}

impl ShortUrlResponse {
    /// Builds the response, rendering `short_url` as `{base_url}/s/{key}`.
    pub fn from_link(link: ShortLink, base_url: &str) -> Self {
        Self {
            short_url: short_url(base_url, &link.short_key),
            created_by: link.created_by.as_ref().map(CreatorResponse::from),
            id: link.id,
            short_key: link.short_key,
            original_url: link.original_url,
            is_private: link.is_private,
            created_at: link.created_at,
            expires_at: link.expires_at,
            click_count: link.click_count,
        }
    }
}

/// Full redirect URL for `short_key`.
pub fn short_url(base_url: &str, short_key: &str) -> String {
    format!("{}/s/{}", base_url.trim_end_matches('/'), short_key)
}

/// Bulk delete request for owned links.
#[derive(Debug, Deserialize, Validate)]
pub struct DeleteShortUrlsRequest {
    #[validate(length(max = 1000, message = "At most 1000 ids per request"))]
    pub ids: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteShortUrlsResponse {
    pub deleted: u64,
}
