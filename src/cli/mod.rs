mod play;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::application::{AppError, LedgerService};
use crate::domain::{Cents, format_cents, parse_cents};
use crate::game::{Game, GameConfig};
use crate::io::{Exporter, ImportResult, load_ledger};

/// Bankbook - in-memory account ledger
#[derive(Parser)]
#[command(name = "bankbook")]
#[command(about = "Load bank accounts from a CSV file and run ledger operations on them")]
#[command(version)]
pub struct Cli {
    /// Accounts file (AccountNumber,AccountHolderName,Balance)
    #[arg(short, long, default_value = "accounts.csv", global = true)]
    pub accounts: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the demonstration sequence against the accounts file
    Demo,

    /// List all accounts
    List,

    /// Deposit money into an account
    Deposit {
        /// Account number
        account: String,

        /// Amount (e.g., "500.00" or "500")
        amount: String,
    },

    /// Withdraw money from an account
    Withdraw {
        /// Account number
        account: String,

        /// Amount (e.g., "200.00" or "200")
        amount: String,
    },

    /// Transfer money between two accounts
    Transfer {
        /// Amount to transfer
        amount: String,

        /// Source account number
        #[arg(long)]
        from: String,

        /// Destination account number
        #[arg(long)]
        to: String,
    },

    /// Change the holder name of an account
    Update {
        /// Account number
        account: String,

        /// New holder name
        name: String,
    },

    /// Close an account
    Close {
        /// Account number
        account: String,
    },

    /// Export the loaded accounts
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
    },

    /// Play the number-guessing game
    Play {
        /// Number of rounds
        #[arg(long, default_value_t = 3)]
        rounds: u32,

        /// Attempts per round
        #[arg(long, default_value_t = 10)]
        attempts: u32,

        /// Smallest possible number
        #[arg(long, default_value_t = 1)]
        min: u32,

        /// Largest possible number
        #[arg(long, default_value_t = 100)]
        max: u32,

        /// Seed for reproducible games
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let Cli {
            accounts,
            verbose,
            command,
        } = self;
        let load = || load_accounts(&accounts, verbose);

        match command {
            Commands::Demo => {
                let mut service = load()?;
                run_demo(&mut service);
            }

            Commands::List => {
                let service = load()?;
                print_accounts(&service);
            }

            Commands::Deposit { account, amount } => {
                let mut service = load()?;
                let amount = parse_amount(&amount)?;
                let result = service.deposit(&account, amount)?;
                println!(
                    "Deposited {} into {}. Balance: {}",
                    format_cents(result.amount),
                    result.account_id,
                    format_cents(result.balance)
                );
                print_accounts(&service);
            }

            Commands::Withdraw { account, amount } => {
                let mut service = load()?;
                let amount = parse_amount(&amount)?;
                let result = service.withdraw(&account, amount)?;
                println!(
                    "Withdrew {} from {}. Balance: {}",
                    format_cents(result.amount),
                    result.account_id,
                    format_cents(result.balance)
                );
                print_accounts(&service);
            }

            Commands::Transfer { amount, from, to } => {
                let mut service = load()?;
                let amount = parse_amount(&amount)?;
                let result = service.transfer(&from, &to, amount)?;
                println!(
                    "Transferred {} from {} to {}",
                    format_cents(result.amount),
                    result.from_account,
                    result.to_account
                );
                print_accounts(&service);
            }

            Commands::Update { account, name } => {
                let mut service = load()?;
                let update = service.update_holder(&account, name)?;
                println!(
                    "Updated account holder name for account {}: {} -> {}",
                    update.account_id, update.previous_name, update.holder_name
                );
                print_accounts(&service);
            }

            Commands::Close { account } => {
                let mut service = load()?;
                let closed = service.close_account(&account)?;
                println!(
                    "Closed account {} (final balance {})",
                    closed.id(),
                    format_cents(closed.balance())
                );
                print_accounts(&service);
            }

            Commands::Export { output, format } => {
                let service = load()?;
                run_export_command(&service, output, format)?;
            }

            Commands::Play {
                rounds,
                attempts,
                min,
                max,
                seed,
            } => {
                let config = GameConfig {
                    min,
                    max,
                    max_attempts: attempts,
                    rounds,
                };
                let rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                let mut game = Game::new(config, rng)?;
                let stdin = io::stdin();
                play::play(&mut game, stdin.lock(), io::stdout().lock())?;
            }
        }

        Ok(())
    }
}

fn load_accounts(path: &Path, verbose: bool) -> Result<LedgerService> {
    let (service, result) = load_ledger(path).context("Error reading accounts file")?;
    report_import(&result, verbose);
    Ok(service)
}

// Skipped lines are already logged as warnings by the importer.
fn report_import(result: &ImportResult, verbose: bool) {
    if verbose {
        eprintln!(
            "Loaded {} account(s), skipped {} line(s)",
            result.imported,
            result.skipped()
        );
    }
}

fn parse_amount(input: &str) -> Result<Cents> {
    parse_cents(input).with_context(|| format!("Invalid amount '{}'. Use '50.00' or '50'", input))
}

/// Fixed walkthrough: list, deposit, withdraw, transfer, list, close, update, list.
/// Failures are reported and the sequence carries on.
fn run_demo(service: &mut LedgerService) {
    print_accounts(service);
    println!();

    report(service.deposit("1001", 50000), |r| {
        format!("Deposited: {} into {}", format_cents(r.amount), r.account_id)
    });
    report(service.withdraw("1002", 20000), |r| {
        format!("Withdrawn: {} from {}", format_cents(r.amount), r.account_id)
    });
    report(service.transfer("1001", "1002", 10000), |r| {
        format!(
            "Transferred {} to account {}",
            format_cents(r.amount),
            r.to_account
        )
    });

    println!();
    print_accounts(service);
    println!();

    report(service.close_account("1001"), |a| {
        format!("Closed account {}", a.id())
    });
    report(service.update_holder("1002", "Jane Doe"), |u| {
        format!("Updated account holder name for account {}", u.account_id)
    });

    println!();
    print_accounts(service);
}

fn report<T>(result: Result<T, AppError>, describe: impl FnOnce(&T) -> String) {
    match result {
        Ok(value) => println!("{}", describe(&value)),
        Err(e) => println!("{}", e),
    }
}

fn print_accounts(service: &LedgerService) {
    let accounts = service.list_accounts();
    if accounts.is_empty() {
        println!("No accounts found.");
        return;
    }

    for account in accounts {
        println!(
            "{} | {} | {}",
            account.id(),
            account.holder_name(),
            format_cents(account.balance())
        );
    }
}

fn run_export_command(
    service: &LedgerService,
    output: Option<PathBuf>,
    format: ExportFormat,
) -> Result<()> {
    let writer: Box<dyn Write> = match &output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let exporter = Exporter::new(service);
    match format {
        ExportFormat::Csv => {
            let count = exporter.export_accounts_csv(writer)?;
            eprintln!("Exported {} accounts", count);
        }
        ExportFormat::Json => {
            let snapshot = exporter.export_snapshot_json(writer)?;
            if output.is_none() {
                println!();
            }
            eprintln!("Exported {} accounts", snapshot.accounts.len());
        }
    }
    Ok(())
}
