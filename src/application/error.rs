use thiserror::Error;

use crate::domain::{BalanceError, Cents, format_cents};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Account already exists: {0}")]
    AccountAlreadyExists(String),

    #[error(
        "Insufficient balance in account {account_id}: balance {}, required {}",
        self::amount(.balance),
        self::amount(.required)
    )]
    InsufficientFunds {
        account_id: String,
        balance: Cents,
        required: Cents,
    },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Cannot transfer from account {0} to itself")]
    SameAccountTransfer(String),

    #[error(
        "Balance of account {account_id} cannot absorb {}: balance {}",
        self::amount(.amount),
        self::amount(.balance)
    )]
    BalanceOverflow {
        account_id: String,
        balance: Cents,
        amount: Cents,
    },
}

impl AppError {
    /// Attach the account a refused balance change was aimed at.
    pub(crate) fn from_balance(account_id: &str, err: BalanceError) -> Self {
        let account_id = account_id.to_string();
        match err {
            BalanceError::InsufficientFunds { balance, required } => AppError::InsufficientFunds {
                account_id,
                balance,
                required,
            },
            BalanceError::Overflow { balance, amount } => AppError::BalanceOverflow {
                account_id,
                balance,
                amount,
            },
        }
    }
}

fn amount(cents: &Cents) -> String {
    format_cents(*cents)
}
