//! Scheduling Domain - Screening Sessions
//!
//! A session places a movie in a hall for a concrete time window. The end
//! time is always derived from the movie's runtime, never supplied by the
//! caller, and the scheduler guarantees that no two sessions ever occupy
//! the same hall at overlapping times (half-open `[start, end)` semantics).
//!
//! The scheduler is consulted only when an operator creates, updates, or
//! deletes a session; booking never goes through it.

pub mod session;
pub mod scheduler;
pub mod ports;
pub mod error;

pub use session::{Session, NewSession, Showtime};
pub use scheduler::Scheduler;
pub use ports::SessionStore;
pub use error::SchedulingError;
