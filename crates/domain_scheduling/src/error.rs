//! Scheduling domain errors

use chrono::{DateTime, Utc};
use thiserror::Error;

use core_kernel::{HallId, MovieId, SessionId, PortError};

/// Errors that can occur while scheduling sessions
#[derive(Debug, Error)]
pub enum SchedulingError {
    #[error("Movie not found: {0}")]
    MovieNotFound(MovieId),

    #[error("Hall not found: {0}")]
    HallNotFound(HallId),

    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    /// Start must come strictly before end
    #[error("Invalid showtime: start {start} is not before end {end}")]
    InvalidShowtime {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Cannot schedule sessions in the past")]
    StartInPast,

    #[error("Session price must be positive")]
    InvalidPrice,

    /// Another session already occupies the hall during the interval
    #[error("Hall {0} is already occupied during this time period")]
    HallOccupied(HallId),

    /// Adapter failure
    #[error(transparent)]
    Port(#[from] PortError),
}
