//! Session scheduling service
//!
//! Guards the hall-occupancy invariant: for a given hall, no two sessions'
//! `[start, end)` intervals may overlap. This check runs only at session
//! create/update time; bookings never consult the scheduler.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info};

use core_kernel::{MovieId, SessionId};
use domain_catalog::{HallStore, MovieStore};

use crate::error::SchedulingError;
use crate::ports::SessionStore;
use crate::session::{NewSession, Session, Showtime};

/// Tolerated clock drift when rejecting past start times
fn clock_skew() -> Duration {
    Duration::minutes(5)
}

/// Operator-facing session scheduling
pub struct Scheduler {
    movies: Arc<dyn MovieStore>,
    halls: Arc<dyn HallStore>,
    sessions: Arc<dyn SessionStore>,
}

impl Scheduler {
    pub fn new(
        movies: Arc<dyn MovieStore>,
        halls: Arc<dyn HallStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            movies,
            halls,
            sessions,
        }
    }

    /// Schedules a new session
    ///
    /// The end time is derived from the movie's runtime. Fails when the
    /// movie or hall is missing, the start lies in the past (beyond a small
    /// clock-skew tolerance), the price is not positive, or the hall is
    /// already occupied during the derived interval.
    pub async fn create(&self, input: NewSession) -> Result<Session, SchedulingError> {
        let session = self.validate(&input, None).await?;
        self.sessions.insert(session.clone()).await?;
        info!(session_id = %session.id, hall_id = %session.hall_id, showtime = %session.showtime, "session scheduled");
        Ok(session)
    }

    /// Reschedules an existing session
    ///
    /// Identical checks to `create`; the session being updated is excluded
    /// from the overlap set. Past start times are rejected on update by the
    /// same rule as on creation - one consistent policy.
    pub async fn update(
        &self,
        id: SessionId,
        input: NewSession,
    ) -> Result<Session, SchedulingError> {
        // Confirm the session exists before validating the replacement
        self.sessions.find(id).await.map_err(|err| {
            if err.is_not_found() {
                SchedulingError::SessionNotFound(id)
            } else {
                SchedulingError::Port(err)
            }
        })?;

        let mut session = self.validate(&input, Some(id)).await?;
        session.id = id;
        self.sessions.update(session.clone()).await?;
        info!(session_id = %id, showtime = %session.showtime, "session rescheduled");
        Ok(session)
    }

    /// Removes a session from the schedule
    pub async fn delete(&self, id: SessionId) -> Result<(), SchedulingError> {
        self.sessions.delete(id).await?;
        info!(session_id = %id, "session deleted");
        Ok(())
    }

    /// Fetches a session by id
    pub async fn find(&self, id: SessionId) -> Result<Session, SchedulingError> {
        self.sessions.find(id).await.map_err(|err| {
            if err.is_not_found() {
                SchedulingError::SessionNotFound(id)
            } else {
                SchedulingError::Port(err)
            }
        })
    }

    /// Sessions that have not started yet
    pub async fn upcoming(&self) -> Result<Vec<Session>, SchedulingError> {
        Ok(self.sessions.upcoming().await?)
    }

    /// Sessions screening the given movie
    pub async fn by_movie(&self, movie_id: MovieId) -> Result<Vec<Session>, SchedulingError> {
        Ok(self.sessions.by_movie(movie_id).await?)
    }

    /// Runs every scheduling rule and builds the resulting session
    async fn validate(
        &self,
        input: &NewSession,
        exclude: Option<SessionId>,
    ) -> Result<Session, SchedulingError> {
        let movie = self.movies.find(input.movie_id).await.map_err(|err| {
            if err.is_not_found() {
                SchedulingError::MovieNotFound(input.movie_id)
            } else {
                SchedulingError::Port(err)
            }
        })?;

        self.halls.find(input.hall_id).await.map_err(|err| {
            if err.is_not_found() {
                SchedulingError::HallNotFound(input.hall_id)
            } else {
                SchedulingError::Port(err)
            }
        })?;

        if !input.price.is_positive() {
            return Err(SchedulingError::InvalidPrice);
        }

        if input.start_time < Utc::now() - clock_skew() {
            return Err(SchedulingError::StartInPast);
        }

        // End time is always derived, never caller-supplied
        let showtime = Showtime::new(input.start_time, input.start_time + movie.runtime())?;

        let overlapping = self
            .sessions
            .overlapping_in_hall(input.hall_id, showtime)
            .await?;
        let occupied = overlapping.iter().any(|s| Some(s.id) != exclude);
        if occupied {
            debug!(hall_id = %input.hall_id, showtime = %showtime, "hall occupied");
            return Err(SchedulingError::HallOccupied(input.hall_id));
        }

        Ok(Session {
            id: SessionId::new(),
            movie_id: input.movie_id,
            hall_id: input.hall_id,
            showtime,
            price: input.price,
        })
    }
}
