//! Catalog Domain Ports
//!
//! Port traits for looking up halls and movies, and for the rating
//! recalculation write path. Adapters implement these against a concrete
//! store; the booking and scheduling engines only ever see the traits.

use async_trait::async_trait;
use rust_decimal::Decimal;

use core_kernel::{HallId, MovieId, PortError};

use crate::hall::Hall;
use crate::movie::Movie;

/// Read access to halls
#[async_trait]
pub trait HallStore: Send + Sync {
    /// Fetches a hall by id
    async fn find(&self, id: HallId) -> Result<Hall, PortError>;
}

/// Read access to movies plus the single derived-value write path
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Fetches a movie by id
    async fn find(&self, id: MovieId) -> Result<Movie, PortError>;

    /// Overwrites the movie's aggregate rating
    async fn update_rating(&self, id: MovieId, rating: Decimal) -> Result<(), PortError>;
}

/// Source of review averages for the rating recalculation
///
/// Review storage itself lives outside this workspace; the queue worker
/// only needs the current average.
#[async_trait]
pub trait RatingSource: Send + Sync {
    /// Returns the current average rating, or None when the movie has no
    /// reviews yet
    async fn average_rating(&self, id: MovieId) -> Result<Option<Decimal>, PortError>;
}
