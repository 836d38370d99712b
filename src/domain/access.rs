//! Access rules applied when a short key is resolved.

use chrono::{DateTime, Utc};
use std::fmt;

use super::entities::ShortLink;

/// Why a resolution was refused.
///
/// Callers only ever see a generic "not found"; the reason is kept for logs
/// and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    NotFound,
    Expired,
    Forbidden,
}

impl AccessDenied {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessDenied::NotFound => "not_found",
            AccessDenied::Expired => "expired",
            AccessDenied::Forbidden => "forbidden",
        }
    }
}

impl fmt::Display for AccessDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks expiry and visibility of an existing link, in that order.
///
/// A private link is only visible to its owner; anonymous requesters never
/// match.
pub fn check_access(
    link: &ShortLink,
    requester: Option<i64>,
    now: DateTime<Utc>,
) -> Result<(), AccessDenied> {
    if link.is_expired_at(now) {
        return Err(AccessDenied::Expired);
    }

    if link.is_private
        && let Some(owner_id) = link.owner_id()
        && requester != Some(owner_id)
    {
        return Err(AccessDenied::Forbidden);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Creator, Role};
    use chrono::Duration;

    fn link(is_private: bool, owner: Option<i64>, expires_at: Option<DateTime<Utc>>) -> ShortLink {
        ShortLink {
            id: 1,
            short_key: "Zx81Qa".to_string(),
            original_url: "https://example.com/target".to_string(),
            created_by: owner.map(|id| Creator::new(id, "owner@example.com", "Owner", Role::User)),
            is_private,
            created_at: Utc::now(),
            expires_at,
            click_count: 0,
        }
    }

    #[test]
    fn test_public_link_is_open_to_everyone() {
        let now = Utc::now();
        let l = link(false, Some(1), None);

        assert_eq!(check_access(&l, None, now), Ok(()));
        assert_eq!(check_access(&l, Some(2), now), Ok(()));
    }

    #[test]
    fn test_expired_link_is_denied() {
        let now = Utc::now();
        let l = link(false, None, Some(now - Duration::minutes(1)));

        assert_eq!(check_access(&l, None, now), Err(AccessDenied::Expired));
    }

    #[test]
    fn test_future_expiry_is_allowed() {
        let now = Utc::now();
        let l = link(false, None, Some(now + Duration::days(1)));

        assert_eq!(check_access(&l, None, now), Ok(()));
    }

    #[test]
    fn test_private_link_denied_to_stranger_and_anonymous() {
        let now = Utc::now();
        let l = link(true, Some(1), None);

        assert_eq!(check_access(&l, Some(2), now), Err(AccessDenied::Forbidden));
        assert_eq!(check_access(&l, None, now), Err(AccessDenied::Forbidden));
    }

    #[test]
    fn test_private_link_allowed_to_owner() {
        let now = Utc::now();
        let l = link(true, Some(1), None);

        assert_eq!(check_access(&l, Some(1), now), Ok(()));
    }

    #[test]
    fn test_expiry_checked_before_visibility() {
        let now = Utc::now();
        let l = link(true, Some(1), Some(now - Duration::seconds(1)));

        assert_eq!(check_access(&l, Some(2), now), Err(AccessDenied::Expired));
    }
}
