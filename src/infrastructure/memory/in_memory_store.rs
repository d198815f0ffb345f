//! Link and visit store held in process memory.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde_json::json;

use crate::domain::entities::{Link, NewLink, NewVisit, Visit};
use crate::domain::repositories::{LinkRepository, LinkSummary, VisitRepository};
use crate::error::AppError;

#[derive(Debug, Default)]
struct Inner {
    /// Links in creation order; a link's id is its position plus one.
    links: Vec<Link>,
    by_token: HashMap<String, usize>,
    by_url_owner: HashMap<(String, String), usize>,
    by_owner: HashMap<String, Vec<usize>>,
    /// Visit timestamps per link id.
    visits: HashMap<i64, Vec<DateTime<Utc>>>,
    visit_count: i64,
}

impl Inner {
    fn link_index(&self, link_id: i64) -> Option<usize> {
        let index = usize::try_from(link_id).ok()?.checked_sub(1)?;
        (index < self.links.len()).then_some(index)
    }
}

/// Concurrency-safe store implementing both [`LinkRepository`] and
/// [`VisitRepository`].
///
/// A single lock guards all indexes, so both uniqueness checks and the insert
/// happen atomically, the way a database applies its constraints. The lock is
/// never held across an `.await`.
///
/// Selected with `STORE_BACKEND=memory`; data lives for the process lifetime.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for InMemoryStore {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        new_link.validate()?;

        let mut inner = self.inner.write();

        if inner.by_token.contains_key(&new_link.short_token) {
            return Err(AppError::DuplicateToken {
                token: new_link.short_token,
            });
        }

        let url_owner = (new_link.long_url.clone(), new_link.owner.clone());
        if inner.by_url_owner.contains_key(&url_owner) {
            return Err(AppError::DuplicateLink);
        }

        let index = inner.links.len();
        let link = Link::new(
            index as i64 + 1,
            new_link.long_url,
            new_link.short_token,
            new_link.owner,
            Utc::now(),
        );

        inner.by_token.insert(link.short_token.clone(), index);
        inner.by_url_owner.insert(url_owner, index);
        inner
            .by_owner
            .entry(link.owner.clone())
            .or_default()
            .push(index);
        inner.links.push(link.clone());

        Ok(link)
    }

    async fn find_by_short_token(&self, short_token: &str) -> Result<Option<Link>, AppError> {
        let inner = self.inner.read();
        Ok(inner
            .by_token
            .get(short_token)
            .map(|&index| inner.links[index].clone()))
    }

    async fn find_by_long_url_and_owner(
        &self,
        long_url: &str,
        owner: &str,
    ) -> Result<Option<Link>, AppError> {
        let inner = self.inner.read();
        let key = (long_url.to_string(), owner.to_string());
        Ok(inner
            .by_url_owner
            .get(&key)
            .map(|&index| inner.links[index].clone()))
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Link>, AppError> {
        let inner = self.inner.read();
        Ok(inner
            .by_owner
            .get(owner)
            .map(|indexes| indexes.iter().map(|&i| inner.links[i].clone()).collect())
            .unwrap_or_default())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.inner.read().links.len() as i64)
    }
}

#[async_trait]
impl VisitRepository for InMemoryStore {
    async fn record_visit(&self, new_visit: NewVisit) -> Result<Visit, AppError> {
        let mut inner = self.inner.write();

        if inner.link_index(new_visit.link_id).is_none() {
            return Err(AppError::bad_request(
                "Referenced link does not exist",
                json!({ "link_id": new_visit.link_id }),
            ));
        }

        inner.visit_count += 1;
        let id = inner.visit_count;
        inner
            .visits
            .entry(new_visit.link_id)
            .or_default()
            .push(new_visit.created_at);

        Ok(Visit::new(id, new_visit.link_id, new_visit.created_at))
    }

    async fn count_visits(
        &self,
        link_id: i64,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<i64, AppError> {
        let inner = self.inner.read();
        let count = inner
            .visits
            .get(&link_id)
            .map(|timestamps| {
                timestamps
                    .iter()
                    .filter(|&&at| from.is_none_or(|from| at >= from))
                    .filter(|&&at| to.is_none_or(|to| at < to))
                    .count()
            })
            .unwrap_or(0);

        Ok(count as i64)
    }

    async fn summaries_by_owner(&self, owner: &str) -> Result<Vec<LinkSummary>, AppError> {
        let inner = self.inner.read();
        let Some(indexes) = inner.by_owner.get(owner) else {
            return Ok(Vec::new());
        };

        Ok(indexes
            .iter()
            .map(|&i| {
                let link = &inner.links[i];
                LinkSummary {
                    link_id: link.id,
                    long_url: link.long_url.clone(),
                    short_token: link.short_token.clone(),
                    created_at: link.created_at,
                    total_visits: inner.visits.get(&link.id).map_or(0, |v| v.len() as i64),
                }
            })
            .collect())
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        Ok(self.inner.read().visit_count)
    }
}
