mod common;

use short_url::domain::entities::{NewCreator, Role};
use short_url::domain::repositories::{CreatorRepository, TokenRepository};
use short_url::error::AppError;
use short_url::infrastructure::persistence::{PgCreatorRepository, PgTokenRepository};
use short_url::utils::token::hash_token;
use sqlx::PgPool;
use std::sync::Arc;

fn hash(token: &str) -> String {
    hash_token(common::SIGNING_SECRET, token)
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_create_token(pool: PgPool) {
    let creator_id = common::create_pg_creator(&pool, "alice@example.com", "user").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo
        .create_token(creator_id, "laptop", &hash("raw"))
        .await
        .unwrap();

    assert_eq!(token.name, "laptop");
    assert_eq!(token.creator_id, creator_id);
    assert_eq!(token.token_hash, hash("raw"));
    assert!(token.revoked_at.is_none());
    assert!(token.last_used_at.is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_duplicate_hash_is_conflict(pool: PgPool) {
    let creator_id = common::create_pg_creator(&pool, "alice@example.com", "user").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    repo.create_token(creator_id, "a", &hash("raw")).await.unwrap();
    let result = repo.create_token(creator_id, "b", &hash("raw")).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_find_creator_by_token(pool: PgPool) {
    let creator_id = common::create_pg_creator(&pool, "admin@example.com", "admin").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    repo.create_token(creator_id, "cli", &hash("raw")).await.unwrap();

    let creator = repo
        .find_creator_by_token(&hash("raw"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(creator.id, creator_id);
    assert_eq!(creator.role, Role::Admin);

    assert!(
        repo.find_creator_by_token(&hash("unknown"))
            .await
            .unwrap()
            .is_none()
    );
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_revoked_token_does_not_authenticate(pool: PgPool) {
    let creator_id = common::create_pg_creator(&pool, "alice@example.com", "user").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo
        .create_token(creator_id, "old", &hash("raw"))
        .await
        .unwrap();
    repo.revoke_token(token.id).await.unwrap();

    assert!(
        repo.find_creator_by_token(&hash("raw"))
            .await
            .unwrap()
            .is_none()
    );
    let revoked = repo.find_by_id(token.id).await.unwrap().unwrap();
    assert!(revoked.revoked_at.is_some());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_update_last_used(pool: PgPool) {
    let creator_id = common::create_pg_creator(&pool, "alice@example.com", "user").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo
        .create_token(creator_id, "cli", &hash("raw"))
        .await
        .unwrap();
    repo.update_last_used(&hash("raw")).await.unwrap();

    let updated = repo.find_by_id(token.id).await.unwrap().unwrap();
    assert!(updated.last_used_at.is_some());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_find_by_name_and_list(pool: PgPool) {
    let creator_id = common::create_pg_creator(&pool, "alice@example.com", "user").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    repo.create_token(creator_id, "laptop", &hash("one")).await.unwrap();
    repo.create_token(creator_id, "ci", &hash("two")).await.unwrap();

    let found = repo.find_by_name("ci").await.unwrap().unwrap();
    assert_eq!(found.token_hash, hash("two"));
    assert!(repo.find_by_name("missing").await.unwrap().is_none());

    assert_eq!(repo.list_tokens().await.unwrap().len(), 2);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_creator_email_is_unique(pool: PgPool) {
    let repo = PgCreatorRepository::new(Arc::new(pool));

    let new_creator = || NewCreator {
        email: "alice@example.com".to_string(),
        name: "Alice".to_string(),
        role: Role::User,
    };

    let created = repo.create(new_creator()).await.unwrap();
    assert_eq!(created.role, Role::User);

    let result = repo.create(new_creator()).await;
    assert!(matches!(result, Err(AppError::Conflict { .. })));

    let found = repo.find_by_email("alice@example.com").await.unwrap();
    assert_eq!(found, Some(created));
    assert_eq!(repo.list().await.unwrap().len(), 1);
}
