//! Movies and age-rating policy

use chrono::Duration;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::MovieId;

use crate::error::CatalogError;

/// Age rating assigned to a movie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeRating {
    /// Suitable for all audiences
    General,
    TwelvePlus,
    SixteenPlus,
    /// Adults only; child tickets cannot be sold
    EighteenPlus,
}

impl AgeRating {
    /// Returns true if minors are barred from this movie entirely
    pub fn restricts_minors(&self) -> bool {
        matches!(self, AgeRating::EighteenPlus)
    }
}

impl fmt::Display for AgeRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AgeRating::General => "G",
            AgeRating::TwelvePlus => "12+",
            AgeRating::SixteenPlus => "16+",
            AgeRating::EighteenPlus => "18+",
        };
        write!(f, "{}", label)
    }
}

/// A movie in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Runtime in minutes; session end times are derived from this
    pub duration_minutes: u32,
    pub age_rating: AgeRating,
    /// Average review rating on a 0-10 scale, recomputed in the background
    pub rating: Option<Decimal>,
}

impl Movie {
    /// Creates a new movie, validating that the runtime is positive
    pub fn new(
        title: impl Into<String>,
        duration_minutes: u32,
        age_rating: AgeRating,
    ) -> Result<Self, CatalogError> {
        if duration_minutes == 0 {
            return Err(CatalogError::InvalidDuration(duration_minutes));
        }

        Ok(Self {
            id: MovieId::new(),
            title: title.into(),
            duration_minutes,
            age_rating,
            rating: None,
        })
    }

    /// Runtime as a duration
    pub fn runtime(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_runtime_rejected() {
        assert!(Movie::new("Empty", 0, AgeRating::General).is_err());
    }

    #[test]
    fn test_runtime_conversion() {
        let m = Movie::new("Feature", 90, AgeRating::TwelvePlus).unwrap();
        assert_eq!(m.runtime(), Duration::minutes(90));
    }

    #[test]
    fn test_only_adult_rating_restricts_minors() {
        assert!(AgeRating::EighteenPlus.restricts_minors());
        assert!(!AgeRating::SixteenPlus.restricts_minors());
        assert!(!AgeRating::General.restricts_minors());
    }

    #[test]
    fn test_rating_display() {
        assert_eq!(AgeRating::EighteenPlus.to_string(), "18+");
        assert_eq!(AgeRating::General.to_string(), "G");
    }
}
