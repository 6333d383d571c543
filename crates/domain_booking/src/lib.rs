//! Booking Domain - Seat Inventory and Tickets
//!
//! The booking engine turns a seat-selection request into tickets while
//! protecting the central invariant of the whole system: among the active
//! (non-cancelled) tickets of a session, no two may occupy the same seat.
//!
//! Bookings for one session are serialized through a per-session lock
//! (bookings for different sessions run concurrently), seat validation is
//! all-or-nothing, and the money side goes through the ledger's payment
//! records and atomic balance adjustments.

pub mod ticket;
pub mod locks;
pub mod workflow;
pub mod ports;
pub mod error;

pub use ticket::{Ticket, TicketClass, TicketStatus, SeatRequest};
pub use locks::SessionLocks;
pub use workflow::BookingService;
pub use ports::TicketStore;
pub use error::BookingError;
