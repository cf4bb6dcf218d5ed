// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use bankbook::application::LedgerService;
use bankbook::io::{ImportResult, load_ledger};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// The accounts file used by the demonstration sequence.
pub const DEMO_ACCOUNTS: &str = "AccountNumber,AccountHolderName,Balance\n\
                                 1001,John Doe,1000.00\n\
                                 1002,Jane Roe,500.00\n";

/// Write `contents` to an accounts file in a fresh temporary directory.
pub fn accounts_file(contents: &str) -> Result<(PathBuf, TempDir)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("accounts.csv");
    fs::write(&path, contents)?;
    Ok((path, temp_dir))
}

/// Helper to load a ledger from the given file contents
pub fn load_service(contents: &str) -> Result<(LedgerService, ImportResult)> {
    let (path, _temp) = accounts_file(contents)?;
    load_ledger(&path)
}

/// Helper to load the demonstration ledger
pub fn demo_service() -> Result<LedgerService> {
    let (service, result) = load_service(DEMO_ACCOUNTS)?;
    assert!(result.errors.is_empty());
    Ok(service)
}

/// Rows as `id | name | balance`, the way the listing prints them
pub fn rows(service: &LedgerService) -> Vec<String> {
    service
        .list_accounts()
        .iter()
        .map(|a| {
            format!(
                "{} | {} | {}",
                a.id(),
                a.holder_name(),
                bankbook::format_cents(a.balance())
            )
        })
        .collect()
}
