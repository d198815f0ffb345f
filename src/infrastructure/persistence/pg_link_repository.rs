//! PostgreSQL implementation of the link store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for links.
///
/// Uniqueness of the short token and of (long URL, owner) is enforced by the
/// `links_short_token_key` and `links_long_url_owner_key` constraints; see
/// [`crate::utils::db_error`] for how violations are reported.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    long_url: String,
    short_token: String,
    owner: String,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(r.id, r.long_url, r.short_token, r.owner, r.created_at)
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        new_link.validate()?;

        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (long_url, short_token, owner)
            VALUES ($1, $2, $3)
            RETURNING id, long_url, short_token, owner, created_at
            "#,
        )
        .bind(&new_link.long_url)
        .bind(&new_link.short_token)
        .bind(&new_link.owner)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::DuplicateToken { .. } => AppError::DuplicateToken {
                token: new_link.short_token.clone(),
            },
            other => other,
        })?;

        Ok(row.into())
    }

    async fn find_by_short_token(&self, short_token: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, long_url, short_token, owner, created_at
            FROM links
            WHERE short_token = $1
            "#,
        )
        .bind(short_token)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn find_by_long_url_and_owner(
        &self,
        long_url: &str,
        owner: &str,
    ) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, long_url, short_token, owner, created_at
            FROM links
            WHERE long_url = $1 AND owner = $2
            "#,
        )
        .bind(long_url)
        .bind(owner)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, long_url, short_token, owner, created_at
            FROM links
            WHERE owner = $1
            ORDER BY id ASC
            "#,
        )
        .bind(owner)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
