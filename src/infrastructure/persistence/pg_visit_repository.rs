//! PostgreSQL implementation of visit recording and counting.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewVisit, Visit};
use crate::domain::repositories::{LinkSummary, VisitRepository};
use crate::error::AppError;

/// PostgreSQL repository for visits.
///
/// Referential integrity is enforced by the `visits_link_id_fkey` constraint.
/// Window counts use the `(link_id, created_at)` index.
pub struct PgVisitRepository {
    pool: Arc<PgPool>,
}

impl PgVisitRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct VisitRow {
    id: i64,
    link_id: i64,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: i64,
    long_url: String,
    short_token: String,
    created_at: DateTime<Utc>,
    total_visits: i64,
}

#[async_trait]
impl VisitRepository for PgVisitRepository {
    async fn record_visit(&self, new_visit: NewVisit) -> Result<Visit, AppError> {
        let row = sqlx::query_as::<_, VisitRow>(
            r#"
            INSERT INTO visits (link_id, created_at)
            VALUES ($1, $2)
            RETURNING id, link_id, created_at
            "#,
        )
        .bind(new_visit.link_id)
        .bind(new_visit.created_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Visit::new(row.id, row.link_id, row.created_at))
    }

    async fn count_visits(
        &self,
        link_id: i64,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM visits
            WHERE link_id = $1
              AND ($2::timestamptz IS NULL OR created_at >= $2)
              AND ($3::timestamptz IS NULL OR created_at < $3)
            "#,
        )
        .bind(link_id)
        .bind(from)
        .bind(to)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn summaries_by_owner(&self, owner: &str) -> Result<Vec<LinkSummary>, AppError> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT
                l.id,
                l.long_url,
                l.short_token,
                l.created_at,
                COUNT(v.id) AS total_visits
            FROM links l
            LEFT JOIN visits v ON v.link_id = l.id
            WHERE l.owner = $1
            GROUP BY l.id, l.long_url, l.short_token, l.created_at
            ORDER BY l.id ASC
            "#,
        )
        .bind(owner)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| LinkSummary {
                link_id: r.id,
                long_url: r.long_url,
                short_token: r.short_token,
                created_at: r.created_at,
                total_visits: r.total_visits,
            })
            .collect())
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM visits")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
