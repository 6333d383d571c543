//! Users as balance owners
//!
//! Identity management (registration, authentication, roles) lives outside
//! this workspace; the ledger only needs the user as the owner of a
//! non-negative balance.

use serde::{Deserialize, Serialize};

use core_kernel::{Money, UserId};

use crate::error::LedgerError;

/// A user account viewed through the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Spending power; never negative
    pub balance: Money,
}

impl User {
    /// Creates a user with an initial balance
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        balance: Money,
    ) -> Result<Self, LedgerError> {
        if balance.is_negative() {
            return Err(LedgerError::InvalidAmount(
                "initial balance cannot be negative".into(),
            ));
        }

        Ok(Self {
            id: UserId::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            balance,
        })
    }

    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
