//! Booking domain errors

use thiserror::Error;

use core_kernel::{
    HallId, Money, MoneyError, MovieId, PaymentId, PortError, SessionId, TicketId, UserId,
};
use domain_catalog::SeatPosition;
use domain_ledger::LedgerError;

/// Errors that can occur while booking or cancelling tickets
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Movie not found: {0}")]
    MovieNotFound(MovieId),

    #[error("Hall not found: {0}")]
    HallNotFound(HallId),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Ticket not found: {0}")]
    TicketNotFound(TicketId),

    #[error("Payment not found: {0}")]
    PaymentNotFound(PaymentId),

    #[error("No seats selected")]
    NoSeatsRequested,

    /// The position falls outside the hall's geometry
    #[error("Invalid seat position: {0}")]
    SeatOutOfBounds(SeatPosition),

    /// The same seat appears twice in one request
    #[error("Seat requested twice: {0}")]
    DuplicateSeatInRequest(SeatPosition),

    /// An active ticket already occupies the seat
    #[error("Seat already booked: {0}")]
    SeatTaken(SeatPosition),

    /// Child tickets cannot be sold for movies that restrict minors
    #[error("Child tickets are not allowed for 18+ movies")]
    ChildTicketRestricted,

    #[error("Insufficient balance: need {needed}, have {available}")]
    InsufficientFunds { needed: Money, available: Money },

    /// The caller does not own the ticket's payment
    #[error("Unauthorized to cancel this ticket")]
    NotTicketOwner,

    #[error("Ticket already cancelled: {0}")]
    AlreadyCancelled(TicketId),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Adapter failure
    #[error(transparent)]
    Port(#[from] PortError),
}
