//! Ledger Domain - Balances and Payments
//!
//! The ledger owns every monetary mutation in the system. A user's balance
//! is the single source of spending power (no escrow records exist), and
//! every movement of money leaves a payment record behind:
//!
//! - top-ups credit the balance from a registered card
//! - bookings debit the balance (the booking engine creates the payment)
//! - refunds credit the balance back and close the payment
//!
//! Payments follow a strict state machine (`Pending -> Completed ->
//! Refunded`) and are never deleted. Cards are stored for bookkeeping only
//! and never charged externally.
//!
//! Balance changes go through the store's atomic `adjust_balance`
//! primitive, so concurrent top-ups, refunds, and bookings for the same
//! user cannot lose updates or drive the balance negative.

pub mod user;
pub mod card;
pub mod payment;
pub mod ledger;
pub mod ports;
pub mod error;

pub use user::User;
pub use card::{PaymentCard, NewCard};
pub use payment::{Payment, PaymentStatus};
pub use ledger::Ledger;
pub use ports::{UserStore, PaymentStore, CardStore};
pub use error::LedgerError;
