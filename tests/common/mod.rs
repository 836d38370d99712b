#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use short_url::application::services::{AuthService, LinkService, LinkSettings};
use short_url::domain::entities::{Creator, NewCreator, NewShortLink, Role, ShortLink};
use short_url::domain::repositories::{CreatorRepository, LinkRepository, TokenRepository};
use short_url::infrastructure::persistence::MemoryStore;
use short_url::infrastructure::url_checker::NoopUrlChecker;
use short_url::state::AppState;
use short_url::utils::token::hash_token;

pub const SIGNING_SECRET: &str = "test-signing-secret";
pub const BASE_URL: &str = "http://sho.rt";

pub const USER_TOKEN: &str = "user-token-0123456789";
pub const OTHER_TOKEN: &str = "other-token-0123456789";
pub const ADMIN_TOKEN: &str = "admin-token-0123456789";

/// An in-process server backed by [`MemoryStore`], with three seeded creators.
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub user: Creator,
    pub other: Creator,
    pub admin: Creator,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_settings(LinkSettings::default()).await
    }

    pub async fn with_settings(settings: LinkSettings) -> Self {
        let store = Arc::new(MemoryStore::new());

        let user = seed_creator(&store, "user@example.com", "User", Role::User, USER_TOKEN).await;
        let other =
            seed_creator(&store, "other@example.com", "Other", Role::User, OTHER_TOKEN).await;
        let admin =
            seed_creator(&store, "admin@example.com", "Admin", Role::Admin, ADMIN_TOKEN).await;

        let link_service = LinkService::new(store.clone(), Arc::new(NoopUrlChecker), settings);
        let auth_service = AuthService::new(store.clone(), SIGNING_SECRET.to_string());

        let state = AppState::new(
            Arc::new(link_service),
            Arc::new(auth_service),
            BASE_URL,
            10,
        );

        let server = TestServer::new(short_url::routes::routes(state.clone())).unwrap();

        Self {
            server,
            state,
            store,
            user,
            other,
            admin,
        }
    }

    /// Inserts a link directly into the store, bypassing the service rules.
    pub async fn insert_link(
        &self,
        key: &str,
        owner: Option<&Creator>,
        is_private: bool,
        expires_at: Option<DateTime<Utc>>,
    ) -> ShortLink {
        LinkRepository::create(
            self.store.as_ref(),
            NewShortLink {
                short_key: key.to_string(),
                original_url: format!("https://example.com/{key}"),
                created_by: owner.map(|c| c.id),
                is_private,
                expires_at,
            },
        )
        .await
        .unwrap()
    }

    pub async fn find(&self, key: &str) -> Option<ShortLink> {
        self.store.find_by_key(key).await.unwrap()
    }
}

async fn seed_creator(
    store: &MemoryStore,
    email: &str,
    name: &str,
    role: Role,
    token: &str,
) -> Creator {
    let creator = CreatorRepository::create(
        store,
        NewCreator {
            email: email.to_string(),
            name: name.to_string(),
            role,
        },
    )
    .await
    .unwrap();

    store
        .create_token(creator.id, "test", &hash_token(SIGNING_SECRET, token))
        .await
        .unwrap();

    creator
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub async fn create_pg_creator(pool: &PgPool, email: &str, role: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO creators (email, name, role) VALUES ($1, $2, $3) RETURNING id")
        .bind(email)
        .bind(email.split('@').next().unwrap_or(email))
        .bind(role)
        .fetch_one(pool)
        .await
        .unwrap()
}
