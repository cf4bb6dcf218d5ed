use serde::{Deserialize, Serialize};

use crate::domain::Account;

/// Aggregate figures over every open account.
/// The total is widened to `i128`: each balance fits in `Cents`, their sum may not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub account_count: usize,
    pub total_balance: i128,
}

impl LedgerSummary {
    pub fn from_accounts(accounts: &[Account]) -> Self {
        Self {
            account_count: accounts.len(),
            total_balance: accounts.iter().map(|a| i128::from(a.balance())).sum(),
        }
    }
}
