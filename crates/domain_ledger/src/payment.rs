//! Payment records and their state machine
//!
//! A payment is created `Pending`, moves to `Completed` when the balance
//! mutation lands, and can move from `Completed` to `Refunded` exactly
//! once. No other transition is legal, and payments are never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{CardId, Money, PaymentId, UserId};

use crate::error::LedgerError;

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Created, balance not yet mutated
    Pending,
    /// Balance mutation landed
    Completed,
    /// Credited back; terminal
    Refunded,
}

/// A payment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub user_id: UserId,
    /// Absent for pure balance transactions (e.g. booking debits)
    pub card_id: Option<CardId>,
    /// Human-inspectable code for display and audit; not an idempotency key
    pub transaction_code: String,
    pub amount: Money,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a pending payment
    pub fn new(user_id: UserId, card_id: Option<CardId>, amount: Money) -> Self {
        Self {
            id: PaymentId::new(),
            user_id,
            card_id,
            transaction_code: generate_transaction_code(),
            amount,
            status: PaymentStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Creates a payment that is completed on arrival
    ///
    /// Used for internal balance debits (seat bookings), which cannot be
    /// declined after the balance check the way an external charge could.
    pub fn completed(user_id: UserId, amount: Money) -> Self {
        Self {
            status: PaymentStatus::Completed,
            ..Self::new(user_id, None, amount)
        }
    }

    /// Marks the payment completed; legal only from `Pending`
    pub fn complete(&mut self) -> Result<(), LedgerError> {
        match self.status {
            PaymentStatus::Pending => {
                self.status = PaymentStatus::Completed;
                Ok(())
            }
            from => Err(LedgerError::InvalidTransition {
                from,
                to: PaymentStatus::Completed,
            }),
        }
    }

    /// Marks the payment refunded; legal only from `Completed`
    pub fn refund(&mut self) -> Result<(), LedgerError> {
        match self.status {
            PaymentStatus::Completed => {
                self.status = PaymentStatus::Refunded;
                Ok(())
            }
            from => Err(LedgerError::InvalidTransition {
                from,
                to: PaymentStatus::Refunded,
            }),
        }
    }
}

/// Builds a display code like `TXN-1756500000-a1b2c3d4`
fn generate_transaction_code() -> String {
    let suffix: String = Uuid::new_v4().simple().to_string()[..8].to_string();
    format!("TXN-{}-{}", Utc::now().timestamp(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn amount() -> Money {
        Money::new(dec!(1000), Currency::KZT)
    }

    #[test]
    fn test_new_payment_is_pending() {
        let p = Payment::new(UserId::new(), None, amount());
        assert_eq!(p.status, PaymentStatus::Pending);
    }

    #[test]
    fn test_pending_to_completed_to_refunded() {
        let mut p = Payment::new(UserId::new(), None, amount());
        p.complete().unwrap();
        assert_eq!(p.status, PaymentStatus::Completed);
        p.refund().unwrap();
        assert_eq!(p.status, PaymentStatus::Refunded);
    }

    #[test]
    fn test_refunding_pending_payment_is_illegal() {
        let mut p = Payment::new(UserId::new(), None, amount());
        assert!(matches!(
            p.refund(),
            Err(LedgerError::InvalidTransition { from: PaymentStatus::Pending, .. })
        ));
    }

    #[test]
    fn test_double_refund_is_illegal() {
        let mut p = Payment::completed(UserId::new(), amount());
        p.refund().unwrap();
        assert!(p.refund().is_err());
    }

    #[test]
    fn test_completing_twice_is_illegal() {
        let mut p = Payment::completed(UserId::new(), amount());
        assert!(p.complete().is_err());
    }

    #[test]
    fn test_transaction_code_shape() {
        let p = Payment::new(UserId::new(), None, amount());
        let parts: Vec<&str> = p.transaction_code.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "TXN");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 8);
    }
}
