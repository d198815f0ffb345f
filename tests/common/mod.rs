#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shortlinks::domain::entities::{Link, NewLink, NewVisit};
use shortlinks::domain::repositories::{LinkRepository, VisitRepository};
use shortlinks::domain::visit_event::{VisitEvent, VisitSender};
use shortlinks::domain::visit_worker::run_visit_worker;
use shortlinks::error::AppError;
use shortlinks::infrastructure::cache::{LinkCache, MokaLinkCache, NullCache};
use shortlinks::infrastructure::memory::InMemoryStore;
use shortlinks::state::{AppState, StateSettings};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub const OWNER_COOKIE: &str = "shortenAppToken";

/// Link store wrapper counting token lookups that reach the store.
pub struct CountingLinkRepository {
    inner: Arc<InMemoryStore>,
    token_lookups: AtomicUsize,
}

impl CountingLinkRepository {
    pub fn new(inner: Arc<InMemoryStore>) -> Self {
        Self {
            inner,
            token_lookups: AtomicUsize::new(0),
        }
    }

    pub fn token_lookups(&self) -> usize {
        self.token_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LinkRepository for CountingLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        self.inner.create(new_link).await
    }

    async fn find_by_short_token(&self, short_token: &str) -> Result<Option<Link>, AppError> {
        self.token_lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_short_token(short_token).await
    }

    async fn find_by_long_url_and_owner(
        &self,
        long_url: &str,
        owner: &str,
    ) -> Result<Option<Link>, AppError> {
        self.inner.find_by_long_url_and_owner(long_url, owner).await
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Link>, AppError> {
        self.inner.list_by_owner(owner).await
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.inner.count().await
    }
}

/// State over a shared in-memory store.
pub struct TestApp {
    pub state: AppState,
    pub store: Arc<InMemoryStore>,
    pub links: Arc<CountingLinkRepository>,
}

fn build(cache: Arc<dyn LinkCache>, sender: VisitSender) -> TestApp {
    let store = Arc::new(InMemoryStore::new());
    let links = Arc::new(CountingLinkRepository::new(Arc::clone(&store)));

    let state = AppState::new(
        Arc::clone(&links) as Arc<dyn LinkRepository>,
        Arc::clone(&store) as Arc<dyn VisitRepository>,
        cache,
        sender,
        StateSettings::default(),
    );

    TestApp {
        state,
        store,
        links,
    }
}

/// State whose visit queue is left undrained; the receiver is returned.
pub fn create_test_state() -> (TestApp, mpsc::Receiver<VisitEvent>) {
    let (sender, rx) = VisitSender::channel(100);
    (build(Arc::new(MokaLinkCache::new(100)), sender), rx)
}

/// State with caching disabled.
pub fn create_uncached_test_state() -> (TestApp, mpsc::Receiver<VisitEvent>) {
    let (sender, rx) = VisitSender::channel(100);
    (build(Arc::new(NullCache::new()), sender), rx)
}

/// State with a running visit worker writing into the store.
///
/// Drop every clone of the state, then await the handle to flush visits.
pub fn create_test_state_with_worker() -> (TestApp, JoinHandle<()>) {
    let (sender, rx) = VisitSender::channel(100);
    let app = build(Arc::new(MokaLinkCache::new(100)), sender);
    let worker = tokio::spawn(run_visit_worker(
        rx,
        Arc::clone(&app.store) as Arc<dyn VisitRepository>,
        2,
    ));
    (app, worker)
}

pub fn owner_cookie(owner: &str) -> String {
    format!("{OWNER_COOKIE}={owner}")
}

pub async fn create_test_link(store: &InMemoryStore, url: &str, token: &str, owner: &str) -> Link {
    store
        .create(NewLink {
            long_url: url.to_string(),
            short_token: token.to_string(),
            owner: owner.to_string(),
        })
        .await
        .unwrap()
}

pub async fn create_test_visit(store: &InMemoryStore, link_id: i64, at: DateTime<Utc>) {
    store
        .record_visit(NewVisit {
            link_id,
            created_at: at,
        })
        .await
        .unwrap();
}
