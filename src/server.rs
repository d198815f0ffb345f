//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, cache setup, worker spawning, and Axum server lifecycle.

use crate::config::{Config, StoreBackend};
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::domain::visit_event::VisitSender;
use crate::domain::visit_worker::run_visit_worker;
use crate::infrastructure::cache::{LinkCache, MokaLinkCache, NullCache};
use crate::infrastructure::memory::InMemoryStore;
use crate::infrastructure::persistence::{PgLinkRepository, PgVisitRepository};
use crate::routes::app_router;
use crate::state::{AppState, StateSettings};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// How long shutdown waits for queued visits to be written.
const VISIT_FLUSH_TIMEOUT: Duration = Duration::from_secs(10);

/// Opens the PostgreSQL pool with the configured limits and timeouts.
///
/// `statement_timeout` is set per connection, so a slow query fails with
/// SQLSTATE 57014 and surfaces as [`crate::error::AppError::Unavailable`].
///
/// # Errors
///
/// Returns an error if no database URL is configured or the connection fails.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is not configured")?;

    let statement_timeout = config.db_statement_timeout_ms.to_string();
    let options = PgConnectOptions::from_str(database_url)
        .context("Invalid DATABASE_URL")?
        .options([("statement_timeout", statement_timeout.as_str())]);

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Some(Duration::from_secs(config.db_idle_timeout)))
        .max_lifetime(Some(Duration::from_secs(config.db_max_lifetime)))
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

/// Link and visit stores chosen by `STORE_BACKEND`.
struct Stores {
    links: Arc<dyn LinkRepository>,
    visits: Arc<dyn VisitRepository>,
}

async fn open_stores(config: &Config) -> Result<Stores> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let pool = connect_database(config).await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Migrations applied");

            let pool = Arc::new(pool);
            Ok(Stores {
                links: Arc::new(PgLinkRepository::new(Arc::clone(&pool))),
                visits: Arc::new(PgVisitRepository::new(pool)),
            })
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            let store = Arc::new(InMemoryStore::new());
            Ok(Stores {
                links: Arc::clone(&store) as Arc<dyn LinkRepository>,
                visits: store,
            })
        }
    }
}

fn build_cache(config: &Config) -> Arc<dyn LinkCache> {
    if config.is_cache_enabled() {
        tracing::info!(capacity = config.cache_capacity, "Cache enabled (moka)");
        Arc::new(MokaLinkCache::new(config.cache_capacity))
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Link and visit stores (PostgreSQL with migrations, or in-memory)
/// - Resolution cache (moka, or NullCache when capacity is 0)
/// - Background visit worker
/// - Axum HTTP server with graceful shutdown
///
/// On shutdown the visit queue is closed and pending visits are flushed.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let stores = open_stores(&config).await?;
    let cache = build_cache(&config);

    let (visit_sender, visit_rx) = VisitSender::channel(config.visit_queue_capacity);
    let worker = tokio::spawn(run_visit_worker(
        visit_rx,
        Arc::clone(&stores.visits),
        config.visit_worker_concurrency,
    ));
    tracing::info!(
        concurrency = config.visit_worker_concurrency,
        "Visit worker started"
    );

    let state = AppState::new(
        stores.links,
        stores.visits,
        cache,
        visit_sender,
        StateSettings {
            token_length: config.token_length,
            token_max_attempts: config.token_max_attempts,
            owner_cookie: config.owner_cookie_name.clone(),
            store_backend: config.store_backend.as_str(),
        },
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, flushing pending visits");
    match tokio::time::timeout(VISIT_FLUSH_TIMEOUT, worker).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!(error = %e, "Visit worker panicked"),
        Err(_) => tracing::warn!("Timed out flushing pending visits"),
    }

    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
