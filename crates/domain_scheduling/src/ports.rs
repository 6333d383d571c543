//! Scheduling Domain Ports

use async_trait::async_trait;

use core_kernel::{HallId, MovieId, PortError, SessionId};

use crate::session::{Session, Showtime};

/// Persistence operations for sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persists a new session
    async fn insert(&self, session: Session) -> Result<(), PortError>;

    /// Replaces an existing session
    async fn update(&self, session: Session) -> Result<(), PortError>;

    /// Removes a session
    async fn delete(&self, id: SessionId) -> Result<(), PortError>;

    /// Fetches a session by id
    async fn find(&self, id: SessionId) -> Result<Session, PortError>;

    /// Returns every session in the hall whose showtime intersects the
    /// given interval (including, on update, the session being edited -
    /// the scheduler filters that one out)
    async fn overlapping_in_hall(
        &self,
        hall_id: HallId,
        showtime: Showtime,
    ) -> Result<Vec<Session>, PortError>;

    /// Sessions that have not started yet
    async fn upcoming(&self) -> Result<Vec<Session>, PortError>;

    /// All sessions screening the given movie
    async fn by_movie(&self, movie_id: MovieId) -> Result<Vec<Session>, PortError>;
}
