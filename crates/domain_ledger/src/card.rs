//! Payment cards
//!
//! Cards are accepted and stored for bookkeeping only - no external charge
//! is ever made against them. Validation still applies so the records stay
//! meaningful for audit.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CardId, UserId};

use crate::error::LedgerError;

/// A stored payment card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentCard {
    pub id: CardId,
    pub user_id: UserId,
    pub holder_name: String,
    pub number: String,
    /// Expiry in `MM/YY` form
    pub expiry: String,
    pub cvv: String,
    pub created_at: DateTime<Utc>,
}

/// Caller input for registering a card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCard {
    pub holder_name: String,
    pub number: String,
    pub expiry: String,
    pub cvv: String,
}

impl NewCard {
    /// Validates every field and builds the stored card
    pub fn into_card(self, user_id: UserId) -> Result<PaymentCard, LedgerError> {
        if self.holder_name.trim().is_empty() {
            return Err(LedgerError::InvalidCard("card holder name is required".into()));
        }
        validate_number(&self.number)?;
        validate_expiry(&self.expiry)?;
        validate_cvv(&self.cvv)?;

        Ok(PaymentCard {
            id: CardId::new(),
            user_id,
            holder_name: self.holder_name,
            number: self.number,
            expiry: self.expiry,
            cvv: self.cvv,
            created_at: Utc::now(),
        })
    }
}

fn validate_number(number: &str) -> Result<(), LedgerError> {
    if number.len() != 16 || !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(LedgerError::InvalidCard(
            "card number must be exactly 16 digits".into(),
        ));
    }
    Ok(())
}

fn validate_expiry(expiry: &str) -> Result<(), LedgerError> {
    let parts: Vec<&str> = expiry.split('/').collect();
    let [month_str, year_str] = parts.as_slice() else {
        return Err(LedgerError::InvalidCard(
            "expiry date must be in MM/YY format".into(),
        ));
    };
    if month_str.len() != 2 || year_str.len() != 2 {
        return Err(LedgerError::InvalidCard(
            "expiry date must be in MM/YY format".into(),
        ));
    }

    let month: u32 = month_str
        .parse()
        .map_err(|_| LedgerError::InvalidCard("invalid month in expiry date".into()))?;
    if !(1..=12).contains(&month) {
        return Err(LedgerError::InvalidCard(
            "invalid month in expiry date (must be 01-12)".into(),
        ));
    }
    let year: i32 = year_str
        .parse()
        .map_err(|_| LedgerError::InvalidCard("invalid year in expiry date".into()))?;

    let now = Utc::now();
    let current_year = now.year() % 100;
    let current_month = now.month();
    if year < current_year || (year == current_year && month < current_month) {
        return Err(LedgerError::InvalidCard("card has expired".into()));
    }

    Ok(())
}

fn validate_cvv(cvv: &str) -> Result<(), LedgerError> {
    if !(3..=4).contains(&cvv.len()) || !cvv.chars().all(|c| c.is_ascii_digit()) {
        return Err(LedgerError::InvalidCard("CVV must be 3 or 4 digits".into()));
    }
    Ok(())
}
