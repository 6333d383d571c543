//! Ledger domain errors

use thiserror::Error;

use core_kernel::{CardId, Money, MoneyError, PaymentId, PortError, UserId};

use crate::payment::PaymentStatus;

/// Errors that can occur in the ledger domain
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Payment not found: {0}")]
    PaymentNotFound(PaymentId),

    #[error("Payment card not found: {0}")]
    CardNotFound(CardId),

    /// The card belongs to a different user
    #[error("Unauthorized access to payment card")]
    NotCardOwner,

    /// The payment belongs to a different user
    #[error("Unauthorized access to payment")]
    NotPaymentOwner,

    /// Illegal payment state machine transition
    #[error("Illegal payment transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },

    #[error("Insufficient balance: need {needed}, have {available}")]
    InsufficientFunds { needed: Money, available: Money },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid payment card: {0}")]
    InvalidCard(String),

    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Adapter failure
    #[error(transparent)]
    Port(#[from] PortError),
}
