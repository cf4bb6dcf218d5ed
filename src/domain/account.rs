use serde::{Deserialize, Serialize};

use super::{Cents, format_cents};

/// Identifier token of an account, as it appears in the accounts file (e.g. "1001").
/// Compared exactly and case-sensitively.
pub type AccountId = String;

/// A single bank account held by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    holder_name: String,
    balance: Cents,
}

impl Account {
    pub fn new(id: impl Into<AccountId>, holder_name: impl Into<String>, balance: Cents) -> Self {
        Self {
            id: id.into(),
            holder_name: holder_name.into(),
            balance,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn set_holder_name(&mut self, holder_name: impl Into<String>) {
        self.holder_name = holder_name.into();
    }

    pub fn balance(&self) -> Cents {
        self.balance
    }

    /// Add `amount` to the balance and return the new balance.
    /// The sign of `amount` is not checked here; callers that need
    /// positive amounts validate before delegating.
    pub fn deposit(&mut self, amount: Cents) -> Result<Cents, BalanceError> {
        self.balance = self.credited(amount)?;
        Ok(self.balance)
    }

    /// Take `amount` out of the balance, unless that would drive it below zero.
    pub fn withdraw(&mut self, amount: Cents) -> Result<Cents, BalanceError> {
        self.balance = self.debited(amount)?;
        Ok(self.balance)
    }

    /// Move `amount` from this account to `recipient`.
    /// Both new balances are computed first, so on failure neither changes.
    pub fn transfer_to(
        &mut self,
        recipient: &mut Account,
        amount: Cents,
    ) -> Result<(), BalanceError> {
        let from_balance = self.debited(amount)?;
        let to_balance = recipient.credited(amount)?;
        self.balance = from_balance;
        recipient.balance = to_balance;
        Ok(())
    }

    fn credited(&self, amount: Cents) -> Result<Cents, BalanceError> {
        self.balance
            .checked_add(amount)
            .ok_or(BalanceError::Overflow {
                balance: self.balance,
                amount,
            })
    }

    fn debited(&self, amount: Cents) -> Result<Cents, BalanceError> {
        if self.balance < amount {
            return Err(BalanceError::InsufficientFunds {
                balance: self.balance,
                required: amount,
            });
        }
        self.balance
            .checked_sub(amount)
            .ok_or(BalanceError::Overflow {
                balance: self.balance,
                amount,
            })
    }
}

/// Why a balance change was refused. The balance is left as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceError {
    /// A withdrawal was larger than the available balance.
    InsufficientFunds { balance: Cents, required: Cents },
    /// The new balance does not fit in `Cents`.
    Overflow { balance: Cents, amount: Cents },
}

impl std::fmt::Display for BalanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BalanceError::InsufficientFunds { balance, required } => write!(
                f,
                "insufficient balance: {} available, {} required",
                format_cents(*balance),
                format_cents(*required)
            ),
            BalanceError::Overflow { balance, amount } => write!(
                f,
                "balance {} cannot absorb {}",
                format_cents(*balance),
                format_cents(*amount)
            ),
        }
    }
}

impl std::error::Error for BalanceError {}
