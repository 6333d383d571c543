//! Catalog Domain - Halls and Movies
//!
//! This crate holds the read-side entities the booking and scheduling
//! engines depend on:
//!
//! - **Hall**: seating geometry (rows × seats-per-row) and seat-position
//!   bounds validation
//! - **Movie**: runtime, age rating, and the derived aggregate rating
//! - **RatingQueue**: a bounded, best-effort background recalculation of a
//!   movie's average rating
//!
//! Halls and movies are never mutated by the booking engine; the only write
//! path into this domain is the rating recalculation, which is explicitly
//! best-effort (failures are logged, never surfaced to the triggering
//! request).

pub mod hall;
pub mod movie;
pub mod rating;
pub mod ports;
pub mod error;

pub use hall::{Hall, SeatPosition};
pub use movie::{Movie, AgeRating};
pub use rating::RatingQueue;
pub use ports::{HallStore, MovieStore, RatingSource};
pub use error::CatalogError;
