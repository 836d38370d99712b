//! Link creation, resolution and listing service.

use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::access::{AccessDenied, check_access};
use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::page::{Page, PageRequest};
use crate::domain::repositories::{LinkFilter, LinkRepository};
use crate::error::AppError;
use crate::infrastructure::url_checker::UrlChecker;
use crate::utils::key_generator::allocate_unique;
use crate::utils::url_validation::parse_http_url;

/// Upper bound for a caller-requested expiration, in days.
pub const MAX_EXPIRATION_DAYS: i64 = 365;

/// Tunables for [`LinkService`], taken from [`crate::config::Config`].
#[derive(Debug, Clone)]
pub struct LinkSettings {
    /// Lifetime of anonymous links, and of owned links that ask for expiry
    /// without a day count.
    pub default_expiry_days: i64,
    /// Whether submitted URLs must answer an HTTP probe.
    pub validate_original_url: bool,
    /// Key draws allowed per creation before giving up.
    pub max_key_attempts: u32,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            default_expiry_days: 30,
            validate_original_url: false,
            max_key_attempts: 200,
        }
    }
}

/// A request to shorten a URL.
#[derive(Debug, Clone)]
pub struct CreateShortLink {
    pub original_url: String,
    pub expiration_in_days: Option<i64>,
    pub is_private: bool,
    pub owner_id: Option<i64>,
}

/// Failure modes of [`LinkService::resolve`].
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("access denied: {0}")]
    Denied(AccessDenied),

    #[error(transparent)]
    Storage(#[from] AppError),
}

impl From<ResolveError> for AppError {
    /// Every denial looks like a missing link from the outside.
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::Denied(_) => AppError::not_found("Short link not found", json!({})),
            ResolveError::Storage(e) => e,
        }
    }
}

/// Service for creating, resolving and listing short links.
///
/// Handles URL validation, collision-free key allocation, expiry rules and
/// owner-scoped operations.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    url_checker: Arc<dyn UrlChecker>,
    settings: LinkSettings,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        url_checker: Arc<dyn UrlChecker>,
        settings: LinkSettings,
    ) -> Self {
        Self {
            link_repository,
            url_checker,
            settings,
        }
    }

    pub fn settings(&self) -> &LinkSettings {
        &self.settings
    }

    /// Creates a short link.
    ///
    /// # Expiry
    ///
    /// - Anonymous links always expire after `default_expiry_days`
    /// - Owned links expire after `expiration_in_days` when given, otherwise never
    ///
    /// Anonymous links are always public.
    ///
    /// # Key allocation
    ///
    /// A fresh key is drawn until the store reports it unused. If the insert
    /// still hits the unique index (a concurrent creation took the same key),
    /// the whole allocation is retried. Every key drawn, whether rejected by
    /// the existence check or by the insert, counts against `max_key_attempts`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - URL is malformed or not HTTP(S)
    /// - URL reachability check is enabled and the URL does not answer
    /// - `expiration_in_days` is outside `1..=365` on an owned link
    ///
    /// Returns [`AppError::Internal`] if no free key was found.
    pub async fn create(&self, cmd: CreateShortLink) -> Result<ShortLink, AppError> {
        parse_http_url(&cmd.original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        if cmd.owner_id.is_some()
            && let Some(days) = cmd.expiration_in_days
            && !(1..=MAX_EXPIRATION_DAYS).contains(&days)
        {
            return Err(AppError::bad_request(
                "Expiration must be between 1 and 365 days",
                json!({ "expiration_in_days": days }),
            ));
        }

        if self.settings.validate_original_url
            && !self.url_checker.is_reachable(&cmd.original_url).await
        {
            return Err(AppError::bad_request(
                format!("Invalid URL : {}", cmd.original_url),
                json!({ "reason": "URL is not reachable" }),
            ));
        }

        let now = Utc::now();
        let (is_private, expires_at) = match cmd.owner_id {
            None => (
                false,
                Some(now + Duration::days(self.settings.default_expiry_days)),
            ),
            Some(_) => (
                cmd.is_private,
                cmd.expiration_in_days.map(|days| now + Duration::days(days)),
            ),
        };

        let max_attempts = self.settings.max_key_attempts;
        let mut attempts_left = max_attempts;

        while attempts_left > 0 {
            let repo = self.link_repository.clone();
            let (short_key, drawn) = allocate_unique(attempts_left, move |key| {
                let repo = repo.clone();
                async move { repo.exists_by_key(&key).await }
            })
            .await?;
            attempts_left = attempts_left.saturating_sub(drawn);

            let new_link = NewShortLink {
                short_key,
                original_url: cmd.original_url.clone(),
                created_by: cmd.owner_id,
                is_private,
                expires_at,
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => {
                    metrics::counter!("links_created_total").increment(1);
                    info!(
                        short_key = %link.short_key,
                        owner_id = ?link.owner_id(),
                        is_private = link.is_private,
                        "Short link created"
                    );
                    return Ok(link);
                }
                Err(AppError::Conflict { .. }) => {
                    metrics::counter!("short_key_collisions_total").increment(1);
                    warn!("Short key taken by a concurrent insert, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique short key",
            json!({ "reason": "Too many collisions", "attempts": max_attempts }),
        ))
    }

    /// Resolves a short key to its original URL and counts the click.
    ///
    /// Checks run in order and stop at the first failure:
    ///
    /// 1. The key must exist
    /// 2. The link must not be expired
    /// 3. A private link must be requested by its owner
    ///
    /// On success the click counter is incremented atomically in the store.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Denied`] with the reason on refusal and
    /// [`ResolveError::Storage`] on store failures.
    pub async fn resolve(
        &self,
        short_key: &str,
        requester: Option<i64>,
    ) -> Result<String, ResolveError> {
        let outcome = self.try_resolve(short_key, requester).await;

        if let Err(ResolveError::Denied(reason)) = &outcome {
            metrics::counter!("link_access_denied_total", "reason" => reason.as_str())
                .increment(1);
            debug!(short_key, requester = ?requester, %reason, "Short link access denied");
        }

        outcome
    }

    async fn try_resolve(
        &self,
        short_key: &str,
        requester: Option<i64>,
    ) -> Result<String, ResolveError> {
        let link = self
            .link_repository
            .find_by_key(short_key)
            .await?
            .ok_or(ResolveError::Denied(AccessDenied::NotFound))?;

        check_access(&link, requester, Utc::now()).map_err(ResolveError::Denied)?;

        let clicks = self
            .link_repository
            .increment_clicks(link.id)
            .await?
            .ok_or(ResolveError::Denied(AccessDenied::NotFound))?;

        metrics::counter!("links_resolved_total").increment(1);
        debug!(short_key, clicks, "Short link resolved");

        Ok(link.original_url)
    }

    /// Lists public links, newest first.
    pub async fn list_public(&self, page: PageRequest) -> Result<Page<ShortLink>, AppError> {
        self.list(LinkFilter::Public, page).await
    }

    /// Lists links owned by `owner_id`, newest first.
    pub async fn list_for_owner(
        &self,
        owner_id: i64,
        page: PageRequest,
    ) -> Result<Page<ShortLink>, AppError> {
        self.list(LinkFilter::Owner(owner_id), page).await
    }

    /// Lists every link, newest first. Intended for administrators.
    pub async fn list_all(&self, page: PageRequest) -> Result<Page<ShortLink>, AppError> {
        self.list(LinkFilter::All, page).await
    }

    async fn list(&self, filter: LinkFilter, page: PageRequest) -> Result<Page<ShortLink>, AppError> {
        let (items, total) = tokio::try_join!(
            self.link_repository
                .list(filter, page.offset(), page.limit()),
            self.link_repository.count(filter)
        )?;

        Ok(Page::new(items, total, page))
    }

    /// Deletes the links in `ids` owned by `owner_id`.
    ///
    /// Ids that are unknown or belong to someone else are skipped silently.
    /// Returns the number of links removed.
    pub async fn delete_for_owner(&self, ids: &[i64], owner_id: i64) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let deleted = self.link_repository.delete_owned(ids, owner_id).await?;
        info!(owner_id, requested = ids.len(), deleted, "Deleted owned short links");

        Ok(deleted)
    }

    /// Probes the underlying store.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Creator, Role};
    use crate::domain::repositories::MockLinkRepository;
    use crate::infrastructure::url_checker::MockUrlChecker;
    use crate::utils::key_generator::is_well_formed;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn owner(id: i64) -> Creator {
        Creator::new(id, "owner@example.com", "Owner", Role::User)
    }

    fn link_from(new_link: &NewShortLink, id: i64) -> ShortLink {
        ShortLink {
            id,
            short_key: new_link.short_key.clone(),
            original_url: new_link.original_url.clone(),
            created_by: new_link.created_by.map(owner),
            is_private: new_link.is_private,
            created_at: Utc::now(),
            expires_at: new_link.expires_at,
            click_count: 0,
        }
    }

    fn stored_link(
        is_private: bool,
        owner_id: Option<i64>,
        expires_at: Option<chrono::DateTime<Utc>>,
    ) -> ShortLink {
        ShortLink {
            id: 42,
            short_key: "Ab12Cd".to_string(),
            original_url: "https://example.com/target".to_string(),
            created_by: owner_id.map(owner),
            is_private,
            created_at: Utc::now(),
            expires_at,
            click_count: 3,
        }
    }

    fn service(repo: MockLinkRepository) -> LinkService {
        service_with(repo, MockUrlChecker::new(), LinkSettings::default())
    }

    fn service_with(
        repo: MockLinkRepository,
        checker: MockUrlChecker,
        settings: LinkSettings,
    ) -> LinkService {
        LinkService::new(Arc::new(repo), Arc::new(checker), settings)
    }

    fn cmd(owner_id: Option<i64>, expiration_in_days: Option<i64>, is_private: bool) -> CreateShortLink {
        CreateShortLink {
            original_url: "https://example.com".to_string(),
            expiration_in_days,
            is_private,
            owner_id,
        }
    }

    fn expect_successful_insert(repo: &mut MockLinkRepository) {
        repo.expect_exists_by_key().returning(|_| Ok(false));
        repo.expect_create()
            .times(1)
            .returning(|new_link| Ok(link_from(&new_link, 1)));
    }

    #[tokio::test]
    async fn test_create_anonymous_link_gets_default_expiry() {
        let mut repo = MockLinkRepository::new();
        expect_successful_insert(&mut repo);

        let before = Utc::now();
        let link = service(repo).create(cmd(None, None, false)).await.unwrap();
        let after = Utc::now();

        let expires_at = link.expires_at.expect("anonymous links always expire");
        assert!(expires_at >= before + Duration::days(30));
        assert!(expires_at <= after + Duration::days(30));
        assert!(!link.is_private);
        assert_eq!(link.click_count, 0);
        assert!(link.created_by.is_none());
        assert!(is_well_formed(&link.short_key));
    }

    #[tokio::test]
    async fn test_create_anonymous_link_ignores_requested_expiry_and_privacy() {
        let mut repo = MockLinkRepository::new();
        repo.expect_exists_by_key().returning(|_| Ok(false));
        repo.expect_create()
            .withf(|l| !l.is_private && l.created_by.is_none())
            .times(1)
            .returning(|new_link| Ok(link_from(&new_link, 1)));

        let before = Utc::now();
        let link = service(repo).create(cmd(None, Some(2), true)).await.unwrap();

        assert!(link.expires_at.unwrap() >= before + Duration::days(30));
        assert!(!link.is_private);
    }

    #[tokio::test]
    async fn test_create_owned_link_without_expiry_is_permanent() {
        let mut repo = MockLinkRepository::new();
        expect_successful_insert(&mut repo);

        let link = service(repo).create(cmd(Some(7), None, true)).await.unwrap();

        assert!(link.expires_at.is_none());
        assert!(link.is_private);
        assert_eq!(link.owner_id(), Some(7));
    }

    #[tokio::test]
    async fn test_create_owned_link_honours_requested_expiry() {
        let mut repo = MockLinkRepository::new();
        expect_successful_insert(&mut repo);

        let before = Utc::now();
        let link = service(repo).create(cmd(Some(7), Some(3), false)).await.unwrap();
        let after = Utc::now();

        let expires_at = link.expires_at.unwrap();
        assert!(expires_at >= before + Duration::days(3));
        assert!(expires_at <= after + Duration::days(3));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_url() {
        let repo = MockLinkRepository::new();

        let mut bad = cmd(None, None, false);
        bad.original_url = "not-a-url".to_string();

        let result = service(repo).create(bad).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_expiry() {
        for days in [0, -1, 366] {
            let result = service(MockLinkRepository::new())
                .create(cmd(Some(1), Some(days), false))
                .await;
            assert!(matches!(result, Err(AppError::Validation { .. })), "{days}");
        }
    }

    #[tokio::test]
    async fn test_create_anonymous_ignores_out_of_range_expiry() {
        let mut repo = MockLinkRepository::new();
        expect_successful_insert(&mut repo);

        let before = Utc::now();
        let link = service(repo).create(cmd(None, Some(400), false)).await.unwrap();

        assert!(link.expires_at.unwrap() >= before + Duration::days(30));
        assert!(link.expires_at.unwrap() < before + Duration::days(31));
    }

    #[tokio::test]
    async fn test_create_rejects_unreachable_url_when_validation_enabled() {
        let mut checker = MockUrlChecker::new();
        checker.expect_is_reachable().times(1).returning(|_| false);

        let mut repo = MockLinkRepository::new();
        repo.expect_create().times(0);

        let settings = LinkSettings {
            validate_original_url: true,
            ..LinkSettings::default()
        };

        let result = service_with(repo, checker, settings)
            .create(cmd(None, None, false))
            .await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_skips_probe_when_validation_disabled() {
        let mut checker = MockUrlChecker::new();
        checker.expect_is_reachable().times(0);

        let mut repo = MockLinkRepository::new();
        expect_successful_insert(&mut repo);

        let result = service_with(repo, checker, LinkSettings::default())
            .create(cmd(None, None, false))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_regenerates_key_on_existing_key() {
        let checks = Arc::new(AtomicU32::new(0));
        let counter = checks.clone();

        let mut repo = MockLinkRepository::new();
        repo.expect_exists_by_key()
            .returning(move |_| Ok(counter.fetch_add(1, Ordering::SeqCst) < 2));
        expect_create_once(&mut repo);

        let result = service(repo).create(cmd(None, None, false)).await;

        assert!(result.is_ok());
        assert_eq!(checks.load(Ordering::SeqCst), 3);
    }

    fn expect_create_once(repo: &mut MockLinkRepository) {
        repo.expect_create()
            .times(1)
            .returning(|new_link| Ok(link_from(&new_link, 1)));
    }

    #[tokio::test]
    async fn test_create_retries_after_insert_conflict() {
        let inserts = Arc::new(AtomicU32::new(0));
        let counter = inserts.clone();

        let mut repo = MockLinkRepository::new();
        repo.expect_exists_by_key().returning(|_| Ok(false));
        repo.expect_create().times(2).returning(move |new_link| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(AppError::conflict("Unique constraint violation", json!({})))
            } else {
                Ok(link_from(&new_link, 1))
            }
        });

        let result = service(repo).create(cmd(None, None, false)).await;

        assert!(result.is_ok());
        assert_eq!(inserts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_create_fails_when_keys_exhausted() {
        let mut repo = MockLinkRepository::new();
        repo.expect_exists_by_key().times(5).returning(|_| Ok(true));
        repo.expect_create().times(0);

        let settings = LinkSettings {
            max_key_attempts: 5,
            ..LinkSettings::default()
        };

        let result = service_with(repo, MockUrlChecker::new(), settings)
            .create(cmd(None, None, false))
            .await;
        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_create_fails_when_every_insert_conflicts() {
        let mut repo = MockLinkRepository::new();
        repo.expect_exists_by_key().returning(|_| Ok(false));
        repo.expect_create()
            .times(3)
            .returning(|_| Err(AppError::conflict("Unique constraint violation", json!({}))));

        let settings = LinkSettings {
            max_key_attempts: 3,
            ..LinkSettings::default()
        };

        let result = service_with(repo, MockUrlChecker::new(), settings)
            .create(cmd(None, None, false))
            .await;
        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_collisions_and_conflicts_share_one_attempt_budget() {
        let checks = Arc::new(AtomicU32::new(0));
        let inserts = Arc::new(AtomicU32::new(0));
        let check_counter = checks.clone();
        let insert_counter = inserts.clone();

        // Every other key is taken; every insert loses the race.
        let mut repo = MockLinkRepository::new();
        repo.expect_exists_by_key()
            .returning(move |_| Ok(check_counter.fetch_add(1, Ordering::SeqCst) % 2 == 0));
        repo.expect_create().returning(move |_| {
            insert_counter.fetch_add(1, Ordering::SeqCst);
            Err(AppError::conflict("Unique constraint violation", json!({})))
        });

        let settings = LinkSettings {
            max_key_attempts: 10,
            ..LinkSettings::default()
        };

        let result = service_with(repo, MockUrlChecker::new(), settings)
            .create(cmd(None, None, false))
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
        assert_eq!(checks.load(Ordering::SeqCst), 10);
        assert_eq!(inserts.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_resolve_public_link_increments_clicks() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_key()
            .withf(|key| key == "Ab12Cd")
            .returning(|_| Ok(Some(stored_link(false, None, None))));
        repo.expect_increment_clicks()
            .withf(|id| *id == 42)
            .times(1)
            .returning(|_| Ok(Some(4)));

        let url = service(repo).resolve("Ab12Cd", None).await.unwrap();
        assert_eq!(url, "https://example.com/target");
    }

    #[tokio::test]
    async fn test_resolve_missing_key_is_not_found() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_key().returning(|_| Ok(None));
        repo.expect_increment_clicks().times(0);

        let result = service(repo).resolve("nope00", None).await;
        assert!(matches!(
            result,
            Err(ResolveError::Denied(AccessDenied::NotFound))
        ));
    }

    #[tokio::test]
    async fn test_resolve_expired_link_is_denied_without_counting() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_key().returning(|_| {
            Ok(Some(stored_link(
                false,
                None,
                Some(Utc::now() - Duration::hours(1)),
            )))
        });
        repo.expect_increment_clicks().times(0);

        let result = service(repo).resolve("Ab12Cd", None).await;
        assert!(matches!(
            result,
            Err(ResolveError::Denied(AccessDenied::Expired))
        ));
    }

    #[tokio::test]
    async fn test_resolve_private_link_as_stranger_is_denied() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_key()
            .returning(|_| Ok(Some(stored_link(true, Some(1), None))));
        repo.expect_increment_clicks().times(0);

        let svc = service(repo);

        for requester in [None, Some(2)] {
            let result = svc.resolve("Ab12Cd", requester).await;
            assert!(matches!(
                result,
                Err(ResolveError::Denied(AccessDenied::Forbidden))
            ));
        }
    }

    #[tokio::test]
    async fn test_resolve_private_link_as_owner_succeeds() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_key()
            .returning(|_| Ok(Some(stored_link(true, Some(1), None))));
        repo.expect_increment_clicks()
            .times(1)
            .returning(|_| Ok(Some(4)));

        let result = service(repo).resolve("Ab12Cd", Some(1)).await;
        assert_eq!(result.unwrap(), "https://example.com/target");
    }

    #[tokio::test]
    async fn test_resolve_link_deleted_before_increment_is_not_found() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_key()
            .returning(|_| Ok(Some(stored_link(false, None, None))));
        repo.expect_increment_clicks().returning(|_| Ok(None));

        let result = service(repo).resolve("Ab12Cd", None).await;
        assert!(matches!(
            result,
            Err(ResolveError::Denied(AccessDenied::NotFound))
        ));
    }

    #[test]
    fn test_all_denials_map_to_same_not_found_error() {
        let infos: Vec<_> = [
            AccessDenied::NotFound,
            AccessDenied::Expired,
            AccessDenied::Forbidden,
        ]
        .into_iter()
        .map(|reason| AppError::from(ResolveError::Denied(reason)).to_error_info())
        .collect();

        for info in &infos {
            assert_eq!(info.code, "not_found");
            assert_eq!(info.message, infos[0].message);
            assert_eq!(info.details, infos[0].details);
        }
    }

    #[tokio::test]
    async fn test_list_public_uses_zero_based_offset() {
        let mut repo = MockLinkRepository::new();
        repo.expect_list()
            .withf(|filter, offset, limit| {
                *filter == LinkFilter::Public && *offset == 0 && *limit == 10
            })
            .times(1)
            .returning(|_, _, _| Ok(vec![stored_link(false, None, None)]));
        repo.expect_count()
            .withf(|filter| *filter == LinkFilter::Public)
            .returning(|_| Ok(1));

        let page = service(repo)
            .list_public(PageRequest::new(0, 10))
            .await
            .unwrap();

        assert_eq!(page.page_no, 1);
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn test_list_for_owner_filters_by_owner() {
        let mut repo = MockLinkRepository::new();
        repo.expect_list()
            .withf(|filter, offset, limit| {
                *filter == LinkFilter::Owner(7) && *offset == 20 && *limit == 10
            })
            .returning(|_, _, _| Ok(vec![]));
        repo.expect_count().returning(|_| Ok(21));

        let page = service(repo)
            .list_for_owner(7, PageRequest::new(3, 10))
            .await
            .unwrap();

        assert_eq!(page.page_no, 3);
        assert_eq!(page.total_pages, 3);
        assert!(page.is_last);
    }

    #[tokio::test]
    async fn test_delete_for_owner_passes_owner_scope() {
        let mut repo = MockLinkRepository::new();
        repo.expect_delete_owned()
            .withf(|ids, owner_id| ids == [1, 2] && *owner_id == 7)
            .times(1)
            .returning(|_, _| Ok(1));

        let deleted = service(repo).delete_for_owner(&[1, 2], 7).await.unwrap();
        assert_eq!(deleted, 1);
    }

    #[tokio::test]
    async fn test_delete_for_owner_with_no_ids_is_noop() {
        let mut repo = MockLinkRepository::new();
        repo.expect_delete_owned().times(0);

        let deleted = service(repo).delete_for_owner(&[], 7).await.unwrap();
        assert_eq!(deleted, 0);
    }
}
