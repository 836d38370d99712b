//! In-process store implementing every repository trait.
//!
//! Backs `STORAGE_BACKEND=memory` for local runs and the HTTP integration
//! tests. All state lives behind one lock, so each operation is atomic with
//! respect to the others.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{Creator, CreatorRecord, NewCreator, NewShortLink, ShortLink};
use crate::domain::repositories::{
    ApiToken, CreatorRepository, LinkFilter, LinkRepository, TokenRepository,
};
use crate::error::AppError;

#[derive(Default)]
struct Inner {
    next_id: i64,
    links: Vec<ShortLink>,
    keys: HashMap<String, i64>,
    creators: Vec<CreatorRecord>,
    tokens: Vec<ApiToken>,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn creator(&self, id: i64) -> Option<&Creator> {
        self.creators
            .iter()
            .map(|r| &r.creator)
            .find(|c| c.id == id)
    }
}

fn matches(link: &ShortLink, filter: LinkFilter) -> bool {
    match filter {
        LinkFilter::Public => !link.is_private,
        LinkFilter::Owner(owner_id) => link.is_owned_by(owner_id),
        LinkFilter::All => true,
    }
}

/// Thread-safe in-memory storage for links, creators and tokens.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryStore {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let mut inner = self.inner.write().await;

        if inner.keys.contains_key(&new_link.short_key) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "short_urls_short_key_key" }),
            ));
        }

        let created_by = match new_link.created_by {
            Some(id) => Some(inner.creator(id).cloned().ok_or_else(|| {
                AppError::bad_request("Unknown creator", json!({ "creator_id": id }))
            })?),
            None => None,
        };

        if new_link.is_private && created_by.is_none() {
            return Err(AppError::bad_request(
                "Private links require an owner",
                json!({}),
            ));
        }

        let id = inner.next_id();
        let link = ShortLink {
            id,
            short_key: new_link.short_key,
            original_url: new_link.original_url,
            created_by,
            is_private: new_link.is_private,
            created_at: Utc::now(),
            expires_at: new_link.expires_at,
            click_count: 0,
        };

        inner.keys.insert(link.short_key.clone(), id);
        inner.links.push(link.clone());

        Ok(link)
    }

    async fn exists_by_key(&self, short_key: &str) -> Result<bool, AppError> {
        Ok(self.inner.read().await.keys.contains_key(short_key))
    }

    async fn find_by_key(&self, short_key: &str) -> Result<Option<ShortLink>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .links
            .iter()
            .find(|l| l.short_key == short_key)
            .cloned())
    }

    async fn increment_clicks(&self, id: i64) -> Result<Option<i64>, AppError> {
        let mut inner = self.inner.write().await;
        Ok(inner.links.iter_mut().find(|l| l.id == id).map(|l| {
            l.click_count += 1;
            l.click_count
        }))
    }

    async fn list(
        &self,
        filter: LinkFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ShortLink>, AppError> {
        let inner = self.inner.read().await;

        let mut links: Vec<ShortLink> = inner
            .links
            .iter()
            .filter(|l| matches(l, filter))
            .cloned()
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(links
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count(&self, filter: LinkFilter) -> Result<i64, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.links.iter().filter(|l| matches(l, filter)).count() as i64)
    }

    async fn delete_owned(&self, ids: &[i64], owner_id: i64) -> Result<u64, AppError> {
        let mut inner = self.inner.write().await;

        let before = inner.links.len();
        inner
            .links
            .retain(|l| !(ids.contains(&l.id) && l.is_owned_by(owner_id)));
        let deleted = (before - inner.links.len()) as u64;

        // Keys stay reserved so they are never handed out again.
        Ok(deleted)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl CreatorRepository for MemoryStore {
    async fn create(&self, new_creator: NewCreator) -> Result<Creator, AppError> {
        let mut inner = self.inner.write().await;

        if inner
            .creators
            .iter()
            .any(|r| r.creator.email == new_creator.email)
        {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "creators_email_key" }),
            ));
        }

        let id = inner.next_id();
        let creator = Creator::new(id, new_creator.email, new_creator.name, new_creator.role);
        inner.creators.push(CreatorRecord {
            creator: creator.clone(),
            created_at: Utc::now(),
        });

        Ok(creator)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Creator>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .creators
            .iter()
            .map(|r| &r.creator)
            .find(|c| c.email == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<CreatorRecord>, AppError> {
        Ok(self.inner.read().await.creators.clone())
    }
}

#[async_trait]
impl TokenRepository for MemoryStore {
    async fn find_creator_by_token(&self, token_hash: &str) -> Result<Option<Creator>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .tokens
            .iter()
            .find(|t| t.token_hash == token_hash && t.revoked_at.is_none())
            .and_then(|t| inner.creator(t.creator_id))
            .cloned())
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        if let Some(token) = inner
            .tokens
            .iter_mut()
            .find(|t| t.token_hash == token_hash && t.revoked_at.is_none())
        {
            token.last_used_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn create_token(
        &self,
        creator_id: i64,
        name: &str,
        token_hash: &str,
    ) -> Result<ApiToken, AppError> {
        let mut inner = self.inner.write().await;

        if inner.tokens.iter().any(|t| t.token_hash == token_hash) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "api_tokens_token_hash_key" }),
            ));
        }
        if inner.creator(creator_id).is_none() {
            return Err(AppError::bad_request(
                "Unknown creator",
                json!({ "creator_id": creator_id }),
            ));
        }

        let token = ApiToken {
            id: inner.next_id(),
            creator_id,
            name: name.to_string(),
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };
        inner.tokens.push(token.clone());

        Ok(token)
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        let mut tokens = self.inner.read().await.tokens.clone();
        tokens.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tokens)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ApiToken>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.tokens.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.tokens.iter().rev().find(|t| t.name == name).cloned())
    }

    async fn revoke_token(&self, id: i64) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        if let Some(token) = inner
            .tokens
            .iter_mut()
            .find(|t| t.id == id && t.revoked_at.is_none())
        {
            token.revoked_at = Some(Utc::now());
        }
        Ok(())
    }
}
