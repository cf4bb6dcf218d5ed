use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::{LedgerService, LedgerSummary};
use crate::domain::{Account, format_cents};

use super::import::ACCOUNT_COLUMNS;

/// Ledger snapshot for JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub summary: LedgerSummary,
    pub accounts: Vec<Account>,
}

/// Exporter for converting ledger data to various formats
pub struct Exporter<'a> {
    service: &'a LedgerService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Export accounts in the same CSV format the importer reads.
    pub fn export_accounts_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(ACCOUNT_COLUMNS)?;

        let mut count = 0;
        for account in self.service.list_accounts() {
            let balance = format_cents(account.balance());
            csv_writer.write_record([account.id(), account.holder_name(), balance.as_str()])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the whole ledger as a JSON snapshot
    pub fn export_snapshot_json<W: Write>(&self, mut writer: W) -> Result<LedgerSnapshot> {
        let snapshot = LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            summary: self.service.summary(),
            accounts: self.service.list_accounts().to_vec(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}
