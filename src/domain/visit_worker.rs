//! Background worker persisting visit events.
//!
//! The worker owns the receiving half of the visit queue. Writes run
//! concurrently up to a fixed limit, transient store failures are retried with
//! exponential backoff, and anything that still fails is logged and dropped.
//! Nothing here can reach a redirect response.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info, warn};

use crate::domain::repositories::VisitRepository;
use crate::domain::visit_event::VisitEvent;
use crate::error::AppError;

/// Retries after the first attempt for transient failures.
const MAX_RETRIES: usize = 2;

/// Drains the visit queue until every sender is dropped.
///
/// Returns only after all in-flight writes have finished, so awaiting the
/// worker's join handle after closing the queue flushes pending visits.
pub async fn run_visit_worker<V>(
    mut rx: mpsc::Receiver<VisitEvent>,
    repository: Arc<V>,
    concurrency: usize,
) where
    V: VisitRepository + ?Sized + 'static,
{
    let concurrency = concurrency.max(1);
    let mut in_flight = JoinSet::new();

    while let Some(event) = rx.recv().await {
        while in_flight.len() >= concurrency {
            reap(in_flight.join_next().await);
        }

        let repository = Arc::clone(&repository);
        in_flight.spawn(async move { record_with_retry(repository.as_ref(), event).await });
    }

    while let Some(result) = in_flight.join_next().await {
        reap(Some(result));
    }

    info!("Visit worker stopped");
}

fn reap(result: Option<Result<(), tokio::task::JoinError>>) {
    if let Some(Err(e)) = result {
        error!(error = %e, "Visit write task panicked");
    }
}

/// Persists a single visit, retrying only transient failures.
async fn record_with_retry<V>(repository: &V, event: VisitEvent)
where
    V: VisitRepository + ?Sized,
{
    let strategy = ExponentialBackoff::from_millis(10)
        .map(jitter)
        .take(MAX_RETRIES);
    let new_visit = event.to_new_visit();

    let result = RetryIf::start(
        strategy,
        || repository.record_visit(new_visit),
        |e: &AppError| e.is_transient(),
    )
    .await;

    match result {
        Ok(visit) => {
            debug!(
                link_id = visit.link_id,
                visit_id = visit.id,
                token = %event.short_token,
                "Visit recorded"
            );
        }
        Err(e) => {
            warn!(
                link_id = event.link_id,
                token = %event.short_token,
                error = %e,
                "Failed to record visit, dropping"
            );
            metrics::counter!("shortlinks_visits_failed_total").increment(1);
        }
    }
}
