//! Session entity and the showtime interval

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{HallId, Money, MovieId, SessionId};

use crate::error::SchedulingError;

/// A half-open time interval `[start, end)`
///
/// Two showtimes overlap when `start < other.end && end > other.start`.
/// Back-to-back sessions (one ending exactly when the next starts) do not
/// overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Showtime {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Showtime {
    /// Creates a showtime, rejecting empty or inverted intervals
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, SchedulingError> {
        if start >= end {
            return Err(SchedulingError::InvalidShowtime { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns true if the two intervals intersect
    pub fn overlaps(&self, other: &Showtime) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Returns true if the timestamp falls inside the interval
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at < self.end
    }
}

impl fmt::Display for Showtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// A scheduled screening
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub movie_id: MovieId,
    pub hall_id: HallId,
    pub showtime: Showtime,
    /// Base adult ticket price; fare classes apply multipliers to this
    pub price: Money,
}

/// Operator input for creating or updating a session
///
/// Only the start time is accepted; the end time is derived from the
/// movie's runtime by the scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSession {
    pub movie_id: MovieId,
    pub hall_id: HallId,
    pub start_time: DateTime<Utc>,
    pub price: Money,
}
