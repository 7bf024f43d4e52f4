//! Transaction CLI commands
//!
//! Implements the `deposit`, `withdraw` and `history` commands.

use clap::Args;

use crate::config::settings::Settings;
use crate::display::transaction::format_history;
use crate::error::{PiggyError, PiggyResult};
use crate::models::{Money, TransactionKind};
use crate::services::{AccountService, TransactionFilter, TransactionService};
use crate::storage::Storage;

/// Arguments shared by `deposit` and `withdraw`
#[derive(Args)]
pub struct TransactionArgs {
    /// Account name or ID
    pub account: String,
    /// Amount (e.g., "5", "2.50" or "$2.50")
    pub amount: String,
    /// What the money was for
    #[arg(short, long, default_value = "")]
    pub note: String,
}

/// Arguments for `history`
#[derive(Args)]
pub struct HistoryArgs {
    /// Only show this account (name or ID)
    #[arg(short, long)]
    pub account: Option<String>,
    /// Only show deposits or withdrawals
    #[arg(short = 't', long = "type")]
    pub kind: Option<String>,
    /// Number of transactions to show (defaults to the configured limit)
    #[arg(short, long)]
    pub limit: Option<usize>,
    /// Show every transaction
    #[arg(long, conflicts_with = "limit")]
    pub all: bool,
}

/// Record a deposit or withdrawal
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    kind: TransactionKind,
    args: TransactionArgs,
) -> PiggyResult<()> {
    let account_service = AccountService::new(storage);
    let service = TransactionService::new(storage);

    let account = account_service.find_required(&args.account)?;
    let amount = Money::parse(&args.amount).map_err(|e| {
        PiggyError::Validation(format!(
            "Invalid amount: '{}'. Use format like '5.00' or '5'. Error: {}",
            args.amount, e
        ))
    })?;

    let transaction = service.record(account.id, amount, kind, &args.note)?;
    let balance = account_service
        .get(account.id)?
        .map(|a| a.balance)
        .unwrap_or_default();

    let symbol = &settings.currency_symbol;
    let verb = match kind {
        TransactionKind::Deposit => "Deposited",
        TransactionKind::Withdraw => "Withdrew",
    };
    println!(
        "{} {} {} {}",
        verb,
        transaction.amount.format_with_symbol(symbol),
        if transaction.is_deposit() { "into" } else { "from" },
        account.name
    );
    println!("  New balance: {}", balance.format_with_symbol(symbol));
    println!("  ID: {}", transaction.id);

    Ok(())
}

/// Print the transaction history, newest first
pub fn handle_history_command(
    storage: &Storage,
    settings: &Settings,
    args: HistoryArgs,
) -> PiggyResult<()> {
    let mut filter = TransactionFilter::new();

    if let Some(account) = &args.account {
        let found = AccountService::new(storage).find_required(account)?;
        filter = filter.account(found.id);
    }

    if let Some(kind) = &args.kind {
        let kind = TransactionKind::parse(kind).ok_or_else(|| {
            PiggyError::Validation(format!(
                "Invalid type: '{}'. Valid types: deposit, withdraw",
                kind
            ))
        })?;
        filter = filter.kind(kind);
    }

    if !args.all {
        filter = filter.limit(args.limit.unwrap_or(settings.history_limit));
    }

    let entries = TransactionService::new(storage).history(&filter)?;
    print!("{}", format_history(&entries, settings));

    Ok(())
}
