//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use crate::config::settings::Settings;
use crate::models::Money;
use crate::services::account::AccountSummary;

use super::{format_date, truncate};

/// Progress towards a goal as a short bar, e.g. `[#####-----]  50%`
pub fn format_progress(progress: Option<f64>) -> String {
    match progress {
        Some(fraction) => {
            let filled = (fraction * 10.0).round() as usize;
            format!(
                "[{}{}] {:>3.0}%",
                "#".repeat(filled),
                "-".repeat(10 - filled.min(10)),
                fraction * 100.0
            )
        }
        None => "(no goal)".to_string(),
    }
}

/// Format a list of accounts with balances as a table
pub fn format_account_list(summaries: &[AccountSummary], settings: &Settings) -> String {
    if summaries.is_empty() {
        return "No accounts found.".to_string();
    }

    let symbol = &settings.currency_symbol;

    let name_width = summaries
        .iter()
        .map(|s| s.account.name.chars().count())
        .max()
        .unwrap_or(4)
        .clamp(4, 24);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<14}  {:<name_width$}  {:>3}  {:>12}  {}\n",
        "ID",
        "Name",
        "Age",
        "Balance",
        "Short-term goal",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<14}  {:-<name_width$}  {:->3}  {:->12}  {:-<16}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for summary in summaries {
        output.push_str(&format!(
            "{:<14}  {:<name_width$}  {:>3}  {:>12}  {}\n",
            summary.account.id.to_string(),
            truncate(&summary.account.name, name_width),
            summary.age,
            summary.account.balance.format_with_symbol(symbol),
            format_progress(summary.short_term_progress),
            name_width = name_width,
        ));
    }

    let total: Money = summaries.iter().map(|s| s.account.balance).sum();
    output.push_str(&format!(
        "{:-<14}  {:-<name_width$}  {:->3}  {:->12}  {:-<16}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:<14}  {:<name_width$}  {:>3}  {:>12}\n",
        "TOTAL",
        "",
        "",
        total.format_with_symbol(symbol),
        name_width = name_width,
    ));

    output
}

/// Format a single account's details
pub fn format_account_details(summary: &AccountSummary, settings: &Settings) -> String {
    let account = &summary.account;
    let symbol = &settings.currency_symbol;
    let money = |m: Money| m.format_with_symbol(symbol);

    let mut output = String::new();

    output.push_str(&format!("Account: {}\n", account.name));
    output.push_str(&format!("  ID:             {}\n", account.id));
    output.push_str(&format!("  Gender:         {}\n", account.gender));
    output.push_str(&format!(
        "  Birthday:       {} (age {})\n",
        format_date(account.birthday, &settings.date_format),
        summary.age
    ));
    output.push_str(&format!(
        "  Avatar:         {}\n",
        match &account.avatar_data {
            Some(bytes) if !bytes.is_empty() => format!("{} bytes", bytes.len()),
            _ => "none".to_string(),
        }
    ));
    output.push('\n');
    output.push_str(&format!("  Balance:          {}\n", money(account.balance)));
    output.push_str(&format!("  Total Deposited:  {}\n", money(summary.total_deposited)));
    output.push_str(&format!("  Total Withdrawn:  {}\n", money(summary.total_withdrawn)));
    output.push_str(&format!("  Transactions:     {}\n", summary.transaction_count));

    output.push('\n');
    output.push_str(&format_goal(
        "Short-term",
        &account.short_term_wish,
        money(account.short_term_savings_goal),
        summary.short_term_progress,
    ));
    output.push_str(&format_goal(
        "Long-term",
        &account.long_term_wish,
        money(account.long_term_savings_goal),
        summary.long_term_progress,
    ));

    output
}

fn format_goal(label: &str, wish: &str, goal: String, progress: Option<f64>) -> String {
    let wish = if wish.is_empty() { "(none)" } else { wish };
    format!(
        "  {} wish: {}\n    Goal: {}  {}\n",
        label,
        wish,
        goal,
        format_progress(progress)
    )
}
