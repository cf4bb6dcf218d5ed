use tracing::debug;

use crate::domain::{Account, AccountId, BalanceError, Cents};
use crate::storage::Repository;

use super::{AppError, LedgerSummary};

/// Application service providing the ledger operations.
/// This is the primary interface for any client (CLI, tests, scripts).
/// Nothing here prints; every operation reports through its return value.
#[derive(Debug, Default)]
pub struct LedgerService {
    repo: Repository,
}

/// Result of a deposit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositResult {
    pub account_id: AccountId,
    pub amount: Cents,
    pub balance: Cents,
}

/// Result of a withdrawal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalResult {
    pub account_id: AccountId,
    pub amount: Cents,
    pub balance: Cents,
}

/// Result of a transfer between two accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferResult {
    pub from_account: AccountId,
    pub to_account: AccountId,
    pub amount: Cents,
    pub from_balance: Cents,
    pub to_balance: Cents,
}

/// Result of renaming an account holder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolderUpdate {
    pub account_id: AccountId,
    pub previous_name: String,
    pub holder_name: String,
}

impl LedgerService {
    /// Create a service over the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    // ========================
    // Queries
    // ========================

    /// All accounts in the order they were added.
    pub fn list_accounts(&self) -> &[Account] {
        self.repo.accounts()
    }

    /// Get an account by id.
    pub fn get_account(&self, id: &str) -> Result<&Account, AppError> {
        self.repo
            .get(id)
            .ok_or_else(|| AppError::AccountNotFound(id.to_string()))
    }

    /// Account count and total holdings.
    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary::from_accounts(self.repo.accounts())
    }

    // ========================
    // Account lifecycle
    // ========================

    /// Add a new account. Ids must be unique within the ledger.
    pub fn open_account(
        &mut self,
        id: impl Into<AccountId>,
        holder_name: impl Into<String>,
        balance: Cents,
    ) -> Result<&Account, AppError> {
        self.add_account(Account::new(id, holder_name, balance))
    }

    /// Add an already-built account, rejecting a duplicate id.
    pub fn add_account(&mut self, account: Account) -> Result<&Account, AppError> {
        if self.repo.contains(account.id()) {
            return Err(AppError::AccountAlreadyExists(account.id().to_string()));
        }

        debug!(account = account.id(), "opened account");
        self.repo.insert(account);
        let last = self.repo.len() - 1;
        Ok(&self.repo.accounts()[last])
    }

    /// Close an account and return it. The balance is not checked.
    pub fn close_account(&mut self, id: &str) -> Result<Account, AppError> {
        let account = self
            .repo
            .remove(id)
            .ok_or_else(|| AppError::AccountNotFound(id.to_string()))?;

        debug!(account = id, balance = account.balance(), "closed account");
        Ok(account)
    }

    /// Replace the holder name of an account.
    pub fn update_holder(
        &mut self,
        id: &str,
        holder_name: impl Into<String>,
    ) -> Result<HolderUpdate, AppError> {
        let account = self.get_account_mut(id)?;
        let previous_name = account.holder_name().to_string();
        account.set_holder_name(holder_name);

        debug!(account = id, "updated holder name");
        Ok(HolderUpdate {
            account_id: id.to_string(),
            previous_name,
            holder_name: account.holder_name().to_string(),
        })
    }

    // ========================
    // Money movements
    // ========================

    /// Deposit a positive amount into an account.
    pub fn deposit(&mut self, id: &str, amount: Cents) -> Result<DepositResult, AppError> {
        validate_amount(amount)?;

        let account = self.get_account_mut(id)?;
        let balance = account
            .deposit(amount)
            .map_err(|e| AppError::from_balance(id, e))?;

        debug!(account = id, amount, balance, "deposit");
        Ok(DepositResult {
            account_id: id.to_string(),
            amount,
            balance,
        })
    }

    /// Withdraw a positive amount, refusing to overdraw the account.
    pub fn withdraw(&mut self, id: &str, amount: Cents) -> Result<WithdrawalResult, AppError> {
        validate_amount(amount)?;

        let account = self.get_account_mut(id)?;
        let balance = account
            .withdraw(amount)
            .map_err(|e| AppError::from_balance(id, e))?;

        debug!(account = id, amount, balance, "withdrawal");
        Ok(WithdrawalResult {
            account_id: id.to_string(),
            amount,
            balance,
        })
    }

    /// Move a positive amount between two different accounts.
    pub fn transfer(
        &mut self,
        from_id: &str,
        to_id: &str,
        amount: Cents,
    ) -> Result<TransferResult, AppError> {
        validate_amount(amount)?;

        let from_pos = self
            .repo
            .position(from_id)
            .ok_or_else(|| AppError::AccountNotFound(from_id.to_string()))?;
        let to_pos = self
            .repo
            .position(to_id)
            .ok_or_else(|| AppError::AccountNotFound(to_id.to_string()))?;

        if from_pos == to_pos {
            return Err(AppError::SameAccountTransfer(from_id.to_string()));
        }

        let (from, to) = self.repo.pair_mut(from_pos, to_pos);
        from.transfer_to(to, amount).map_err(|e| match e {
            BalanceError::InsufficientFunds { .. } => AppError::from_balance(from_id, e),
            BalanceError::Overflow { .. } => AppError::from_balance(to_id, e),
        })?;

        debug!(from = from_id, to = to_id, amount, "transfer");
        Ok(TransferResult {
            from_account: from_id.to_string(),
            to_account: to_id.to_string(),
            amount,
            from_balance: from.balance(),
            to_balance: to.balance(),
        })
    }

    fn get_account_mut(&mut self, id: &str) -> Result<&mut Account, AppError> {
        self.repo
            .get_mut(id)
            .ok_or_else(|| AppError::AccountNotFound(id.to_string()))
    }
}

fn validate_amount(amount: Cents) -> Result<(), AppError> {
    if amount <= 0 {
        return Err(AppError::InvalidAmount(
            "Amount must be positive".to_string(),
        ));
    }
    Ok(())
}
