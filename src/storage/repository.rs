use crate::domain::Account;

/// In-memory registry of accounts.
/// Accounts are kept in insertion order; lookups scan for the first exact id match.
#[derive(Debug, Default)]
pub struct Repository {
    accounts: Vec<Account>,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts held.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// All accounts in insertion order.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Position of the first account with the given id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.accounts.iter().position(|account| account.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.id() == id)
    }

    /// Borrow two distinct accounts mutably by position.
    ///
    /// Panics if `a == b` or either index is out of bounds.
    pub fn pair_mut(&mut self, a: usize, b: usize) -> (&mut Account, &mut Account) {
        assert_ne!(a, b, "pair_mut requires two distinct positions");
        if a < b {
            let (left, right) = self.accounts.split_at_mut(b);
            (&mut left[a], &mut right[0])
        } else {
            let (left, right) = self.accounts.split_at_mut(a);
            (&mut right[0], &mut left[b])
        }
    }

    /// Append an account. Uniqueness of ids is the caller's concern.
    pub fn insert(&mut self, account: Account) {
        self.accounts.push(account);
    }

    /// Remove and return the first account with the given id.
    pub fn remove(&mut self, id: &str) -> Option<Account> {
        let position = self.position(id)?;
        Some(self.accounts.remove(position))
    }
}
