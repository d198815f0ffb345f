//! Visit event model and the non-blocking dispatcher used on the redirect path.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::warn;

use crate::domain::entities::NewVisit;

/// An in-memory representation of a visit awaiting persistence.
///
/// Created by the resolution path and handed to
/// [`crate::domain::visit_worker::run_visit_worker`] through a bounded channel,
/// so the redirect never waits on the write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitEvent {
    pub link_id: i64,
    pub short_token: String,
    pub occurred_at: DateTime<Utc>,
}

impl VisitEvent {
    /// Creates an event stamped with the current time.
    pub fn new(link_id: i64, short_token: impl Into<String>) -> Self {
        Self {
            link_id,
            short_token: short_token.into(),
            occurred_at: Utc::now(),
        }
    }

    /// Converts the event into the store's creation input.
    pub fn to_new_visit(&self) -> NewVisit {
        NewVisit {
            link_id: self.link_id,
            created_at: self.occurred_at,
        }
    }
}

/// Sending half of the visit queue.
///
/// [`VisitSender::dispatch`] never blocks: when the queue is full or the worker
/// is gone the event is dropped and the drop is logged and counted.
#[derive(Debug, Clone)]
pub struct VisitSender {
    tx: mpsc::Sender<VisitEvent>,
}

impl VisitSender {
    pub fn new(tx: mpsc::Sender<VisitEvent>) -> Self {
        Self { tx }
    }

    /// Creates a bounded visit queue.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<VisitEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }

    /// Enqueues a visit. Returns `false` if the event was dropped.
    pub fn dispatch(&self, event: VisitEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                warn!(
                    link_id = event.link_id,
                    token = %event.short_token,
                    "Visit queue full, dropping visit"
                );
                metrics::counter!("shortlinks_visits_dropped_total", "reason" => "full")
                    .increment(1);
                false
            }
            Err(TrySendError::Closed(event)) => {
                warn!(
                    link_id = event.link_id,
                    token = %event.short_token,
                    "Visit queue closed, dropping visit"
                );
                metrics::counter!("shortlinks_visits_dropped_total", "reason" => "closed")
                    .increment(1);
                false
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Free slots currently available in the queue.
    pub fn capacity(&self) -> usize {
        self.tx.capacity()
    }
}
