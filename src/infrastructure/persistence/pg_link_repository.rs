//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Creator, NewShortLink, Role, ShortLink};
use crate::domain::repositories::{LinkFilter, LinkRepository};
use crate::error::AppError;

/// Columns selected by every link query; `c` is the optional creator join.
const LINK_COLUMNS: &str = r#"
    s.id, s.short_key, s.original_url, s.is_private, s.created_at, s.expires_at, s.click_count,
    c.id AS creator_id, c.email AS creator_email, c.name AS creator_name, c.role AS creator_role
"#;

#[derive(sqlx::FromRow)]
struct ShortLinkRow {
    id: i64,
    short_key: String,
    original_url: String,
    is_private: bool,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    click_count: i64,
    creator_id: Option<i64>,
    creator_email: Option<String>,
    creator_name: Option<String>,
    creator_role: Option<String>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(r: ShortLinkRow) -> Self {
        let created_by = match (r.creator_id, r.creator_email, r.creator_name) {
            (Some(id), Some(email), Some(name)) => {
                let role = r
                    .creator_role
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(Role::User);
                Some(Creator::new(id, email, name, role))
            }
            _ => None,
        };

        ShortLink {
            id: r.id,
            short_key: r.short_key,
            original_url: r.original_url,
            created_by,
            is_private: r.is_private,
            created_at: r.created_at,
            expires_at: r.expires_at,
            click_count: r.click_count,
        }
    }
}

/// Binds a [`LinkFilter`] to the `($1 public_only, $2 owner)` query convention.
fn filter_params(filter: LinkFilter) -> (bool, Option<i64>) {
    match filter {
        LinkFilter::Public => (true, None),
        LinkFilter::Owner(owner_id) => (false, Some(owner_id)),
        LinkFilter::All => (false, None),
    }
}

/// PostgreSQL repository for short link storage and retrieval.
///
/// Click counting is a single `UPDATE ... SET click_count = click_count + 1`
/// statement, so concurrent redirects never lose increments. Keys of deleted
/// links move to `retired_short_keys` and still count as taken.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let sql = format!(
            r#"
            WITH s AS (
                INSERT INTO short_urls (short_key, original_url, created_by, is_private, expires_at)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, short_key, original_url, created_by, is_private, created_at,
                          expires_at, click_count
            )
            SELECT {LINK_COLUMNS}
            FROM s
            LEFT JOIN creators c ON c.id = s.created_by
            "#
        );

        let row = sqlx::query_as::<_, ShortLinkRow>(&sql)
            .bind(&new_link.short_key)
            .bind(&new_link.original_url)
            .bind(new_link.created_by)
            .bind(new_link.is_private)
            .bind(new_link.expires_at)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn exists_by_key(&self, short_key: &str) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (SELECT 1 FROM short_urls WHERE short_key = $1)
                OR EXISTS (SELECT 1 FROM retired_short_keys WHERE short_key = $1)
            "#,
        )
        .bind(short_key)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn find_by_key(&self, short_key: &str) -> Result<Option<ShortLink>, AppError> {
        let sql = format!(
            r#"
            SELECT {LINK_COLUMNS}
            FROM short_urls s
            LEFT JOIN creators c ON c.id = s.created_by
            WHERE s.short_key = $1
            "#
        );

        let row = sqlx::query_as::<_, ShortLinkRow>(&sql)
            .bind(short_key)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn increment_clicks(&self, id: i64) -> Result<Option<i64>, AppError> {
        let count: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE short_urls
            SET click_count = click_count + 1
            WHERE id = $1
            RETURNING click_count
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn list(
        &self,
        filter: LinkFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ShortLink>, AppError> {
        let (public_only, owner_id) = filter_params(filter);
        let sql = format!(
            r#"
            SELECT {LINK_COLUMNS}
            FROM short_urls s
            LEFT JOIN creators c ON c.id = s.created_by
            WHERE ($1 = FALSE OR s.is_private = FALSE)
              AND ($2::bigint IS NULL OR s.created_by = $2)
            ORDER BY s.created_at DESC, s.id DESC
            LIMIT $3 OFFSET $4
            "#
        );

        let rows = sqlx::query_as::<_, ShortLinkRow>(&sql)
            .bind(public_only)
            .bind(owner_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: LinkFilter) -> Result<i64, AppError> {
        let (public_only, owner_id) = filter_params(filter);

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM short_urls s
            WHERE ($1 = FALSE OR s.is_private = FALSE)
              AND ($2::bigint IS NULL OR s.created_by = $2)
            "#,
        )
        .bind(public_only)
        .bind(owner_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn delete_owned(&self, ids: &[i64], owner_id: i64) -> Result<u64, AppError> {
        let deleted: i64 = sqlx::query_scalar(
            r#"
            WITH d AS (
                DELETE FROM short_urls
                WHERE id = ANY($1) AND created_by = $2
                RETURNING short_key
            ), r AS (
                INSERT INTO retired_short_keys (short_key)
                SELECT short_key FROM d
                ON CONFLICT DO NOTHING
            )
            SELECT COUNT(*) FROM d
            "#,
        )
        .bind(ids)
        .bind(owner_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(deleted as u64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
