//! Shared test utilities for the cinema booking workspace
//!
//! Provides in-memory implementations of every port, entity builders with
//! sensible defaults, and common fixtures. Production adapters live outside
//! this workspace; these exist so the domain crates can be tested without
//! external dependencies.

pub mod memory;
pub mod builders;
pub mod fixtures;

pub use memory::{
    MemoryHallStore, MemoryMovieStore, MemoryRatingSource, MemorySessionStore, MemoryUserStore,
    MemoryPaymentStore, MemoryCardStore, MemoryTicketStore,
};
pub use builders::{HallBuilder, MovieBuilder, UserBuilder, SessionBuilder};
pub use fixtures::{kzt, standard_price, tomorrow_at, valid_card};
