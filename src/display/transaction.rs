//! Transaction display formatting
//!
//! Renders the transaction history, newest first, as a plain-text register.

use crate::config::settings::Settings;
use crate::models::{Transaction, TransactionKind};
use crate::services::transaction::HistoryEntry;

use super::{format_date, truncate};

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction, settings: &Settings) -> String {
    let arrow = match txn.kind {
        TransactionKind::Deposit => "+",
        TransactionKind::Withdraw => "-",
    };

    format!(
        "{} {:10} {:<8} {:>12}  {}",
        arrow,
        format_date(txn.date.date_naive(), &settings.date_format),
        txn.kind.to_string(),
        txn.amount.format_with_symbol(&settings.currency_symbol),
        txn.note
    )
    .trim_end()
    .to_string()
}

/// Format history entries (with account names) as a register
pub fn format_history(entries: &[HistoryEntry], settings: &Settings) -> String {
    if entries.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:1} {:10} {:<8} {:>12}  {:16}  {}\n",
        "", "Date", "Type", "Amount", "Account", "Note"
    ));
    output.push_str(&"-".repeat(64));
    output.push('\n');

    for entry in entries {
        let txn = &entry.transaction;
        let arrow = if txn.is_deposit() { "+" } else { "-" };
        let row = format!(
            "{} {:10} {:<8} {:>12}  {}  {}",
            arrow,
            format_date(txn.date.date_naive(), &settings.date_format),
            txn.kind.to_string(),
            txn.amount.format_with_symbol(&settings.currency_symbol),
            truncate(&entry.account_name, 16),
            txn.note
        );
        output.push_str(row.trim_end());
        output.push('\n');
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(entry: &HistoryEntry, settings: &Settings) -> String {
    let txn = &entry.transaction;
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Account:     {}\n", entry.account_name));
    output.push_str(&format!("Date:        {}\n", txn.date.to_rfc3339()));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(&settings.currency_symbol)
    ));

    if !txn.note.is_empty() {
        output.push_str(&format!("Note:        {}\n", txn.note));
    }

    output
}
