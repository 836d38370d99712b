//! PostgreSQL implementation of creator repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Creator, CreatorRecord, NewCreator, Role};
use crate::domain::repositories::CreatorRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct CreatorRow {
    id: i64,
    email: String,
    name: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl From<CreatorRow> for CreatorRecord {
    fn from(r: CreatorRow) -> Self {
        let role = r.role.parse().unwrap_or(Role::User);
        CreatorRecord {
            creator: Creator::new(r.id, r.email, r.name, role),
            created_at: r.created_at,
        }
    }
}

/// PostgreSQL repository for creators.
pub struct PgCreatorRepository {
    pool: Arc<PgPool>,
}

impl PgCreatorRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CreatorRepository for PgCreatorRepository {
    async fn create(&self, new_creator: NewCreator) -> Result<Creator, AppError> {
        let row = sqlx::query_as::<_, CreatorRow>(
            r#"
            INSERT INTO creators (email, name, role)
            VALUES ($1, $2, $3)
            RETURNING id, email, name, role, created_at
            "#,
        )
        .bind(&new_creator.email)
        .bind(&new_creator.name)
        .bind(new_creator.role.as_str())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(CreatorRecord::from(row).creator)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Creator>, AppError> {
        let row = sqlx::query_as::<_, CreatorRow>(
            "SELECT id, email, name, role, created_at FROM creators WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|r| CreatorRecord::from(r).creator))
    }

    async fn list(&self) -> Result<Vec<CreatorRecord>, AppError> {
        let rows = sqlx::query_as::<_, CreatorRow>(
            "SELECT id, email, name, role, created_at FROM creators ORDER BY created_at, id",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
