//! Test data builders
//!
//! Builder patterns for constructing test entities with sensible defaults,
//! so tests specify only the fields they care about.

use chrono::{DateTime, Duration, Utc};

use core_kernel::{HallId, Money, MovieId, SessionId};
use domain_catalog::{AgeRating, Hall, Movie};
use domain_ledger::User;
use domain_scheduling::{Session, Showtime};

use crate::fixtures::{kzt, standard_price, tomorrow_at};

/// Builder for halls
pub struct HallBuilder {
    name: String,
    location: String,
    total_rows: u32,
    seats_per_row: u32,
}

impl Default for HallBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HallBuilder {
    pub fn new() -> Self {
        Self {
            name: "Red Hall".into(),
            location: "Ground floor".into(),
            total_rows: 5,
            seats_per_row: 10,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_dimensions(mut self, rows: u32, seats: u32) -> Self {
        self.total_rows = rows;
        self.seats_per_row = seats;
        self
    }

    pub fn build(self) -> Hall {
        Hall::new(self.name, self.location, self.total_rows, self.seats_per_row)
            .expect("builder defaults must be valid")
    }
}

/// Builder for movies
pub struct MovieBuilder {
    title: String,
    duration_minutes: u32,
    age_rating: AgeRating,
}

impl Default for MovieBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MovieBuilder {
    pub fn new() -> Self {
        Self {
            title: "Feature Presentation".into(),
            duration_minutes: 90,
            age_rating: AgeRating::General,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    pub fn with_age_rating(mut self, rating: AgeRating) -> Self {
        self.age_rating = rating;
        self
    }

    pub fn build(self) -> Movie {
        Movie::new(self.title, self.duration_minutes, self.age_rating)
            .expect("builder defaults must be valid")
    }
}

/// Builder for users
pub struct UserBuilder {
    first_name: String,
    last_name: String,
    email: String,
    balance: Money,
}

impl Default for UserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl UserBuilder {
    pub fn new() -> Self {
        Self {
            first_name: "Aigerim".into(),
            last_name: "Serikova".into(),
            email: "aigerim@example.com".into(),
            balance: kzt(10_000),
        }
    }

    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    pub fn with_balance(mut self, balance: Money) -> Self {
        self.balance = balance;
        self
    }

    pub fn build(self) -> User {
        User::new(self.first_name, self.last_name, self.email, self.balance)
            .expect("builder defaults must be valid")
    }
}

/// Builder for sessions, placed directly into a store (bypassing the
/// scheduler) when a test needs a known schedule
pub struct SessionBuilder {
    movie_id: MovieId,
    hall_id: HallId,
    start: DateTime<Utc>,
    duration_minutes: i64,
    price: Money,
}

impl SessionBuilder {
    pub fn new(movie_id: MovieId, hall_id: HallId) -> Self {
        Self {
            movie_id,
            hall_id,
            start: tomorrow_at(12),
            duration_minutes: 90,
            price: standard_price(),
        }
    }

    pub fn starting_at(mut self, start: DateTime<Utc>) -> Self {
        self.start = start;
        self
    }

    pub fn with_duration(mut self, minutes: i64) -> Self {
        self.duration_minutes = minutes;
        self
    }

    pub fn with_price(mut self, price: Money) -> Self {
        self.price = price;
        self
    }

    pub fn build(self) -> Session {
        let showtime = Showtime::new(self.start, self.start + Duration::minutes(self.duration_minutes))
            .expect("builder showtime must be valid");
        Session {
            id: SessionId::new(),
            movie_id: self.movie_id,
            hall_id: self.hall_id,
            showtime,
            price: self.price,
        }
    }
}
