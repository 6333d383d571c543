//! Cinema halls and seat geometry

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::HallId;

use crate::error::CatalogError;

/// A seat position within a hall, 1-based in both dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatPosition {
    /// Row number, starting at 1
    pub row: u32,
    /// Seat number within the row, starting at 1
    pub seat: u32,
}

impl SeatPosition {
    pub fn new(row: u32, seat: u32) -> Self {
        Self { row, seat }
    }
}

impl fmt::Display for SeatPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}, seat {}", self.row, self.seat)
    }
}

/// A cinema hall
///
/// The seating geometry is fixed: `total_rows` rows of `seats_per_row`
/// seats each. Any seat reference must satisfy `1 <= row <= total_rows`
/// and `1 <= seat <= seats_per_row`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hall {
    pub id: HallId,
    pub name: String,
    pub location: String,
    pub total_rows: u32,
    pub seats_per_row: u32,
}

impl Hall {
    /// Creates a new hall, validating that both dimensions are positive
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        total_rows: u32,
        seats_per_row: u32,
    ) -> Result<Self, CatalogError> {
        if total_rows == 0 || seats_per_row == 0 {
            return Err(CatalogError::InvalidDimensions {
                rows: total_rows,
                seats: seats_per_row,
            });
        }

        Ok(Self {
            id: HallId::new(),
            name: name.into(),
            location: location.into(),
            total_rows,
            seats_per_row,
        })
    }

    /// Returns true if the position falls inside this hall's geometry
    pub fn contains(&self, position: SeatPosition) -> bool {
        position.row >= 1
            && position.row <= self.total_rows
            && position.seat >= 1
            && position.seat <= self.seats_per_row
    }

    /// Total seat count
    pub fn capacity(&self) -> u32 {
        self.total_rows * self.seats_per_row
    }
}
