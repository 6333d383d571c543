//! Background recalculation of movie ratings
//!
//! When a review changes, the triggering request must not wait for (or fail
//! because of) the aggregate-rating update. The queue gives that
//! fire-and-forget behavior an explicit shape: a bounded channel with
//! at-most-once delivery. Enqueueing never blocks and never fails the
//! caller; a full queue drops the job with a warning, and worker failures
//! are logged and swallowed.

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use core_kernel::MovieId;

use crate::ports::{MovieStore, RatingSource};

/// Handle for scheduling rating recalculations
#[derive(Clone)]
pub struct RatingQueue {
    tx: mpsc::Sender<MovieId>,
}

impl RatingQueue {
    /// Spawns the worker task and returns the queue handle alongside it
    ///
    /// The handle is cheap to clone. Dropping every handle closes the
    /// channel and lets the worker drain and exit.
    pub fn spawn(
        source: Arc<dyn RatingSource>,
        movies: Arc<dyn MovieStore>,
        capacity: usize,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity);
        let worker = tokio::spawn(run_worker(rx, source, movies));
        (Self { tx }, worker)
    }

    /// Schedules a recalculation for the movie
    ///
    /// Best effort: when the queue is full or the worker has stopped, the
    /// job is dropped with a warning. The caller's request is never blocked
    /// or failed by this path.
    pub fn enqueue(&self, movie_id: MovieId) {
        if let Err(err) = self.tx.try_send(movie_id) {
            warn!(%movie_id, %err, "rating recalculation dropped");
        }
    }
}

async fn run_worker(
    mut rx: mpsc::Receiver<MovieId>,
    source: Arc<dyn RatingSource>,
    movies: Arc<dyn MovieStore>,
) {
    while let Some(movie_id) = rx.recv().await {
        recalculate(movie_id, source.as_ref(), movies.as_ref()).await;
    }
    debug!("rating worker stopped");
}

async fn recalculate(movie_id: MovieId, source: &dyn RatingSource, movies: &dyn MovieStore) {
    let average = match source.average_rating(movie_id).await {
        Ok(Some(avg)) => avg,
        Ok(None) => {
            debug!(%movie_id, "no reviews yet, rating unchanged");
            return;
        }
        Err(err) => {
            warn!(%movie_id, %err, "failed to read average rating");
            return;
        }
    };

    if average < Decimal::ZERO || average > dec!(10) {
        warn!(%movie_id, %average, "average rating outside 0-10 scale, skipped");
        return;
    }

    if let Err(err) = movies.update_rating(movie_id, average).await {
        warn!(%movie_id, %err, "failed to store recalculated rating");
    }
}
