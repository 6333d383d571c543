//! Core Kernel - Foundational types for the cinema booking system
//!
//! This crate provides the fundamental building blocks used across all domain
//! modules:
//! - Money types with precise decimal arithmetic
//! - Strongly-typed identifiers for every entity
//! - The unified port error used by all storage adapters

pub mod money;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use money::{Money, Currency, MoneyError};
pub use identifiers::{
    HallId, MovieId, SessionId, UserId, PaymentId, TicketId, CardId,
};
pub use ports::PortError;
pub use error::CoreError;
