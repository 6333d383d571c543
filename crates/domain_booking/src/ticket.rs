//! Tickets and fare classes

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Money, PaymentId, SessionId, TicketId, UserId};
use domain_catalog::SeatPosition;

/// Fare category determining a price multiplier and eligibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketClass {
    Adult,
    Student,
    Senior,
    /// Rejected outright for movies whose age rating restricts minors
    Child,
}

impl TicketClass {
    /// Multiplier applied to the session's base price
    pub fn multiplier(&self) -> Decimal {
        match self {
            TicketClass::Adult => dec!(1.0),
            TicketClass::Student => dec!(0.8),
            TicketClass::Senior => dec!(0.7),
            TicketClass::Child => dec!(0.5),
        }
    }
}

/// Ticket status; a ticket is active unless cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Paid,
    Cancelled,
}

/// One seat of one session, sold to one user
///
/// Tickets are created only by the booking workflow and mutated only to
/// `Cancelled`. The movie title is denormalized at purchase time for
/// listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub user_id: UserId,
    pub session_id: SessionId,
    pub payment_id: PaymentId,
    pub position: SeatPosition,
    pub class: TicketClass,
    /// Price actually paid (base price x class multiplier)
    pub price: Money,
    pub movie_title: String,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
}

impl Ticket {
    /// Returns true if the ticket still occupies its seat
    pub fn is_active(&self) -> bool {
        self.status != TicketStatus::Cancelled
    }
}

/// One requested seat within a booking
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeatRequest {
    pub position: SeatPosition,
    pub class: TicketClass,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_table() {
        assert_eq!(TicketClass::Adult.multiplier(), dec!(1.0));
        assert_eq!(TicketClass::Student.multiplier(), dec!(0.8));
        assert_eq!(TicketClass::Senior.multiplier(), dec!(0.7));
        assert_eq!(TicketClass::Child.multiplier(), dec!(0.5));
    }

    #[test]
    fn test_class_serialization() {
        let json = serde_json::to_string(&TicketClass::Senior).unwrap();
        assert_eq!(json, "\"SENIOR\"");
    }
}
