use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use piggybank::backup::BackupService;
use piggybank::cli::{
    handle_account_command, handle_audit_command, handle_backup_command, handle_history_command,
    handle_restore_command, handle_transaction_command, AccountCommands, BackupCommands,
    HistoryArgs, TransactionArgs,
};
use piggybank::config::{paths::PiggyPaths, settings::Settings};
use piggybank::models::TransactionKind;
use piggybank::storage::Storage;

#[derive(Parser)]
#[command(
    name = "piggybank",
    author = "Kaylee Beyene",
    version,
    about = "Savings ledger for children's pocket-money accounts",
    long_about = "PiggyBank keeps a savings account for each of your children: \
                  record deposits and withdrawals, track wishes and savings goals, \
                  and back up or restore the whole ledger as a single JSON file."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Put money into an account
    Deposit(TransactionArgs),

    /// Take money out of an account
    Withdraw(TransactionArgs),

    /// Show transactions, newest first
    #[command(alias = "log")]
    History(HistoryArgs),

    /// Backup commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Replace all data with the contents of a backup file
    Restore {
        /// Backup file to restore from
        file: PathBuf,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Include full details
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show current configuration and paths
    Config {
        /// Write the current settings to config.json
        #[arg(long)]
        init: bool,
    },
}

/// Diagnostics go to stderr so command output stays clean.
/// `RUST_LOG` picks the level; `PIGGYBANK_LOG_FORMAT=json` switches format.
fn init_tracing() {
    let log_format = std::env::var("PIGGYBANK_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = PiggyPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Arc::new(Storage::new(paths.clone(), &settings)?);
    storage.load_all()?;

    match cli.command {
        Some(Commands::Account(cmd)) => {
            handle_account_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Deposit(args)) => {
            handle_transaction_command(&storage, &settings, TransactionKind::Deposit, args)?;
        }
        Some(Commands::Withdraw(args)) => {
            handle_transaction_command(&storage, &settings, TransactionKind::Withdraw, args)?;
        }
        Some(Commands::History(args)) => {
            handle_history_command(&storage, &settings, args)?;
        }
        Some(Commands::Backup(cmd)) => {
            let service = BackupService::new(storage.clone(), &settings);
            handle_backup_command(&service, cmd)?;
        }
        Some(Commands::Restore { file, force }) => {
            let service = BackupService::new(storage.clone(), &settings);
            handle_restore_command(&service, &file, force)?;
        }
        Some(Commands::Audit { limit, verbose }) => {
            handle_audit_command(&storage, limit, verbose)?;
        }
        Some(Commands::Config { init }) => {
            if init {
                settings.save(&paths)?;
                println!("Settings written to {}", paths.settings_file().display());
                println!();
            }
            println!("PiggyBank Configuration");
            println!("=======================");
            println!("Data directory: {}", paths.base_dir().display());
            println!("Ledger file:    {}", paths.ledger_file().display());
            println!("Backup file:    {}", paths.backup_file().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:    {}", settings.currency_symbol);
            println!("  Date format:        {}", settings.date_format);
            println!("  History limit:      {}", settings.history_limit);
            println!("  Allow empty backup: {}", settings.allow_empty_backup);
            println!("  Audit enabled:      {}", settings.audit_enabled);
        }
        None => {
            println!("PiggyBank - savings accounts for kids");
            println!();
            println!("Run 'piggybank --help' for usage information.");
            println!("Run 'piggybank account create <name>' to open the first account.");
        }
    }

    Ok(())
}
