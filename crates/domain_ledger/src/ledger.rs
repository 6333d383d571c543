//! The ledger service
//!
//! Orchestrates top-ups, refunds, and card registration. Every balance
//! mutation goes through `UserStore::adjust_balance`, and every mutation
//! leaves a payment record.

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;

use core_kernel::{CardId, Money, PaymentId, PortError, UserId};

use crate::card::{NewCard, PaymentCard};
use crate::error::LedgerError;
use crate::payment::{Payment, PaymentStatus};
use crate::ports::{CardStore, PaymentStore, UserStore};

/// Largest accepted top-up, in major units of the payment currency
const MAX_TOP_UP: Decimal = dec!(100_000);

/// Balance and payment orchestration
pub struct Ledger {
    users: Arc<dyn UserStore>,
    payments: Arc<dyn PaymentStore>,
    cards: Arc<dyn CardStore>,
}

impl Ledger {
    pub fn new(
        users: Arc<dyn UserStore>,
        payments: Arc<dyn PaymentStore>,
        cards: Arc<dyn CardStore>,
    ) -> Self {
        Self {
            users,
            payments,
            cards,
        }
    }

    /// Credits the user's balance from a registered card
    ///
    /// The card is recorded for bookkeeping; no external charge happens.
    /// The payment is created `Pending`, the balance credited atomically,
    /// and the payment then marked `Completed`. There is no idempotency
    /// key: a retried top-up request produces a second payment.
    pub async fn top_up(
        &self,
        user_id: UserId,
        card_id: CardId,
        amount: Money,
    ) -> Result<Payment, LedgerError> {
        validate_amount(amount)?;
        self.find_user(user_id).await?;
        let card = self.find_card(card_id).await?;
        if card.user_id != user_id {
            return Err(LedgerError::NotCardOwner);
        }

        let mut payment = Payment::new(user_id, Some(card_id), amount);
        self.payments.insert(payment.clone()).await?;

        self.users.adjust_balance(user_id, amount).await?;

        payment.complete()?;
        self.transition(payment.id, PaymentStatus::Pending, PaymentStatus::Completed)
            .await?;

        info!(
            user_id = %user_id,
            payment_id = %payment.id,
            code = %payment.transaction_code,
            %amount,
            "balance topped up"
        );
        Ok(payment)
    }

    /// Refunds a completed payment back to its owner's balance
    ///
    /// Only the payment's owner may refund it, and only from `Completed`.
    /// The status write is a compare-and-swap at the store and happens
    /// before the credit, so of any number of concurrent refunds of one
    /// payment exactly one lands the transition and credits the balance.
    pub async fn refund(&self, payment_id: PaymentId, user_id: UserId) -> Result<(), LedgerError> {
        let mut payment = self.find_payment(payment_id).await?;
        if payment.user_id != user_id {
            return Err(LedgerError::NotPaymentOwner);
        }

        // Catches stale states cheaply; the store transition below is the
        // binding check
        payment.refund()?;

        self.transition(payment_id, PaymentStatus::Completed, PaymentStatus::Refunded)
            .await?;
        self.users.adjust_balance(user_id, payment.amount).await?;

        info!(user_id = %user_id, payment_id = %payment_id, amount = %payment.amount, "payment refunded");
        Ok(())
    }

    /// Owner-checked payment lookup
    pub async fn payment(
        &self,
        payment_id: PaymentId,
        user_id: UserId,
    ) -> Result<Payment, LedgerError> {
        let payment = self.find_payment(payment_id).await?;
        if payment.user_id != user_id {
            return Err(LedgerError::NotPaymentOwner);
        }
        Ok(payment)
    }

    /// All payments made by the user
    pub async fn payments_for_user(&self, user_id: UserId) -> Result<Vec<Payment>, LedgerError> {
        Ok(self.payments.for_user(user_id).await?)
    }

    /// Validates and stores a new card for the user
    pub async fn register_card(
        &self,
        user_id: UserId,
        card: NewCard,
    ) -> Result<PaymentCard, LedgerError> {
        self.find_user(user_id).await?;
        let card = card.into_card(user_id)?;
        self.cards.insert(card.clone()).await?;
        info!(user_id = %user_id, card_id = %card.id, "payment card registered");
        Ok(card)
    }

    /// All cards registered by the user
    pub async fn cards_for_user(&self, user_id: UserId) -> Result<Vec<PaymentCard>, LedgerError> {
        Ok(self.cards.for_user(user_id).await?)
    }

    /// Runs the store-level compare-and-swap, reporting a lost race as the
    /// illegal transition it is
    async fn transition(
        &self,
        id: PaymentId,
        from: PaymentStatus,
        to: PaymentStatus,
    ) -> Result<(), LedgerError> {
        match self.payments.transition(id, from, to).await {
            Ok(()) => Ok(()),
            Err(PortError::Conflict { .. }) => {
                let current = self.find_payment(id).await?;
                Err(LedgerError::InvalidTransition {
                    from: current.status,
                    to,
                })
            }
            Err(other) => Err(other.into()),
        }
    }

    async fn find_user(&self, id: UserId) -> Result<crate::user::User, LedgerError> {
        self.users.find(id).await.map_err(|err| match err {
            PortError::NotFound { .. } => LedgerError::UserNotFound(id),
            other => LedgerError::Port(other),
        })
    }

    async fn find_card(&self, id: CardId) -> Result<PaymentCard, LedgerError> {
        self.cards.find(id).await.map_err(|err| match err {
            PortError::NotFound { .. } => LedgerError::CardNotFound(id),
            other => LedgerError::Port(other),
        })
    }

    async fn find_payment(&self, id: PaymentId) -> Result<Payment, LedgerError> {
        self.payments.find(id).await.map_err(|err| match err {
            PortError::NotFound { .. } => LedgerError::PaymentNotFound(id),
            other => LedgerError::Port(other),
        })
    }
}

fn validate_amount(amount: Money) -> Result<(), LedgerError> {
    if !amount.is_positive() {
        return Err(LedgerError::InvalidAmount(
            "amount must be greater than 0".into(),
        ));
    }
    if amount.amount() > MAX_TOP_UP {
        return Err(LedgerError::InvalidAmount(format!(
            "amount exceeds maximum limit of {MAX_TOP_UP}"
        )));
    }
    Ok(())
}
