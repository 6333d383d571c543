//! Catalog domain errors

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the catalog domain
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Hall dimensions must both be positive
    #[error("Invalid hall dimensions: {rows} rows x {seats} seats per row")]
    InvalidDimensions { rows: u32, seats: u32 },

    /// Movie runtime must be positive
    #[error("Invalid movie duration: {0} minutes")]
    InvalidDuration(u32),

    /// Ratings are bounded to the 0-10 review scale
    #[error("Rating out of range: {0}")]
    RatingOutOfRange(String),

    /// Adapter failure
    #[error(transparent)]
    Port(#[from] PortError),
}
