use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::{info, warn};

use crate::application::LedgerService;
use crate::domain::{Account, parse_cents};

/// Column names, in file order, of the accounts format.
pub const ACCOUNT_COLUMNS: [&str; 3] = ["AccountNumber", "AccountHolderName", "Balance"];

/// One account read from the file, with the line it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub line: usize,
    pub account: Account,
}

/// Accounts parsed from a file, in file order, plus the lines that were skipped
#[derive(Debug, Clone, Default)]
pub struct ParsedAccounts {
    pub records: Vec<AccountRecord>,
    pub errors: Vec<ImportError>,
}

impl ParsedAccounts {
    pub fn into_accounts(self) -> Vec<Account> {
        self.records.into_iter().map(|r| r.account).collect()
    }
}

/// Result of an import operation
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub imported: usize,
    pub errors: Vec<ImportError>,
}

impl ImportResult {
    pub fn skipped(&self) -> usize {
        self.errors.len()
    }
}

/// A line that was skipped during import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportError {
    pub line: usize,
    pub field: Option<String>,
    pub error: String,
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(field) => write!(f, "line {} ({}): {}", self.line, field, self.error),
            None => write!(f, "line {}: {}", self.line, self.error),
        }
    }
}

/// Parse the accounts format: a header line, then `id,holder name,balance` per line.
///
/// The first physical line is discarded whatever it contains. Lines with fewer
/// than three fields, an empty id, text that is not UTF-8 or an unparsable
/// balance are skipped and reported; extra fields are ignored. Only a failure
/// to read the input itself is an error.
pub fn parse_accounts_csv<R: Read>(reader: R) -> Result<ParsedAccounts> {
    let mut reader = BufReader::new(reader);
    let mut header = Vec::new();
    reader
        .read_until(b'\n', &mut header)
        .context("Failed to read accounts")?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut parsed = ParsedAccounts::default();

    for result in csv_reader.byte_records() {
        let record = match result {
            Ok(r) => r,
            Err(e) if e.is_io_error() => {
                return Err(e).context("Failed to read accounts");
            }
            Err(e) => {
                let line = physical_line(e.position());
                skip(&mut parsed, line, None, e.to_string());
                continue;
            }
        };

        let line = physical_line(record.position());

        if record.len() < ACCOUNT_COLUMNS.len() {
            let missing = ACCOUNT_COLUMNS[record.len()];
            skip(
                &mut parsed,
                line,
                Some(missing),
                format!(
                    "expected {} fields, found {}",
                    ACCOUNT_COLUMNS.len(),
                    record.len()
                ),
            );
            continue;
        }

        let mut fields = [""; 3];
        let mut undecodable = None;
        for (i, column) in ACCOUNT_COLUMNS.iter().enumerate() {
            match std::str::from_utf8(&record[i]) {
                Ok(text) => fields[i] = text.trim(),
                Err(e) => {
                    undecodable = Some((*column, e));
                    break;
                }
            }
        }
        if let Some((column, e)) = undecodable {
            skip(&mut parsed, line, Some(column), format!("invalid UTF-8: {}", e));
            continue;
        }

        let [id, holder_name, balance_str] = fields;

        if id.is_empty() {
            skip(
                &mut parsed,
                line,
                Some(ACCOUNT_COLUMNS[0]),
                "empty account number".to_string(),
            );
            continue;
        }

        let balance = match parse_cents(balance_str) {
            Ok(b) => b,
            Err(e) => {
                skip(
                    &mut parsed,
                    line,
                    Some(ACCOUNT_COLUMNS[2]),
                    format!("invalid balance '{}': {}", balance_str, e),
                );
                continue;
            }
        };

        parsed.records.push(AccountRecord {
            line,
            account: Account::new(id, holder_name, balance),
        });
    }

    Ok(parsed)
}

// The csv reader starts counting after the header, which is line 1.
fn physical_line(position: Option<&csv::Position>) -> usize {
    position.map(|p| p.line() as usize + 1).unwrap_or(0)
}

fn skip(parsed: &mut ParsedAccounts, line: usize, field: Option<&str>, error: String) {
    warn!(line, field, "skipping line: {}", error);
    parsed.errors.push(ImportError {
        line,
        field: field.map(str::to_string),
        error,
    });
}

/// Importer for loading accounts into the ledger
pub struct Importer<'a> {
    service: &'a mut LedgerService,
}

impl<'a> Importer<'a> {
    pub fn new(service: &'a mut LedgerService) -> Self {
        Self { service }
    }

    /// Import accounts from the CSV accounts format.
    /// A line whose id is already in the ledger is skipped and reported.
    pub fn import_accounts_csv<R: Read>(&mut self, reader: R) -> Result<ImportResult> {
        let parsed = parse_accounts_csv(reader)?;
        let mut result = ImportResult {
            imported: 0,
            errors: parsed.errors,
        };

        for record in parsed.records {
            match self.service.add_account(record.account) {
                Ok(_) => result.imported += 1,
                Err(e) => {
                    warn!(line = record.line, "skipping line: {}", e);
                    result.errors.push(ImportError {
                        line: record.line,
                        field: Some(ACCOUNT_COLUMNS[0].to_string()),
                        error: e.to_string(),
                    });
                }
            }
        }

        result.errors.sort_by_key(|e| e.line);
        Ok(result)
    }

    /// Import accounts from a file on disk.
    pub fn import_accounts_file(&mut self, path: impl AsRef<Path>) -> Result<ImportResult> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open accounts file {}", path.display()))?;

        let result = self
            .import_accounts_csv(file)
            .with_context(|| format!("Failed to load accounts from {}", path.display()))?;

        info!(
            path = %path.display(),
            imported = result.imported,
            skipped = result.skipped(),
            "loaded accounts"
        );
        Ok(result)
    }
}

/// Build a ledger from an accounts file.
pub fn load_ledger(path: impl AsRef<Path>) -> Result<(LedgerService, ImportResult)> {
    let mut service = LedgerService::default();
    let result = Importer::new(&mut service).import_accounts_file(path)?;
    Ok((service, result))
}
