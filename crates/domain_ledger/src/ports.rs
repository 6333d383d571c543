//! Ledger Domain Ports

use async_trait::async_trait;

use core_kernel::{CardId, Money, PaymentId, PortError, UserId};

use crate::card::PaymentCard;
use crate::payment::{Payment, PaymentStatus};
use crate::user::User;

/// User lookup and the single balance-mutation primitive
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetches a user by id
    async fn find(&self, id: UserId) -> Result<User, PortError>;

    /// Atomically applies a signed delta to the user's balance and returns
    /// the new balance
    ///
    /// Implementations must perform the read-modify-write under their own
    /// synchronization and fail with `PortError::Conflict` when the result
    /// would go negative. This is what makes concurrent top-ups, refunds,
    /// and bookings for one user safe.
    async fn adjust_balance(&self, id: UserId, delta: Money) -> Result<Money, PortError>;
}

/// Persistence operations for payments
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Persists a new payment
    async fn insert(&self, payment: Payment) -> Result<(), PortError>;

    /// Fetches a payment by id
    async fn find(&self, id: PaymentId) -> Result<Payment, PortError>;

    /// Moves the payment from `from` to `to`; payments are never deleted
    ///
    /// Implementations must compare-and-swap under their own
    /// synchronization: when the stored status no longer equals `from`,
    /// the call fails with `PortError::Conflict` and writes nothing. This
    /// is what makes the state machine binding under concurrent refunds.
    async fn transition(
        &self,
        id: PaymentId,
        from: PaymentStatus,
        to: PaymentStatus,
    ) -> Result<(), PortError>;

    /// All payments made by the user, newest first
    async fn for_user(&self, user_id: UserId) -> Result<Vec<Payment>, PortError>;
}

/// Persistence operations for stored cards
#[async_trait]
pub trait CardStore: Send + Sync {
    /// Persists a new card
    async fn insert(&self, card: PaymentCard) -> Result<(), PortError>;

    /// Fetches a card by id
    async fn find(&self, id: CardId) -> Result<PaymentCard, PortError>;

    /// All cards registered by the user
    async fn for_user(&self, user_id: UserId) -> Result<Vec<PaymentCard>, PortError>;
}
