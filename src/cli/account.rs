//! Account CLI commands
//!
//! Implements CLI commands for opening, editing and closing accounts.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::account::{format_account_details, format_account_list};
use crate::error::{PiggyError, PiggyResult};
use crate::models::{Gender, Money, NewAccount};
use crate::services::{AccountChanges, AccountService};
use crate::storage::Storage;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Open a new account
    Create {
        /// Child's name
        name: String,
        /// Gender (male, female, other)
        #[arg(short, long, default_value = "other")]
        gender: String,
        /// Birthday (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        birthday: Option<String>,
        /// Something to save up for soon
        #[arg(long)]
        short_wish: Option<String>,
        /// Something to save up for over time
        #[arg(long)]
        long_wish: Option<String>,
        /// Savings goal for the short-term wish
        #[arg(long, default_value = "0")]
        short_goal: String,
        /// Savings goal for the long-term wish
        #[arg(long, default_value = "0")]
        long_goal: String,
        /// Image file to use as the avatar
        #[arg(long)]
        avatar: Option<PathBuf>,
    },
    /// List all accounts
    List,
    /// Show account details
    Show {
        /// Account name or ID
        account: String,
    },
    /// Edit an account
    Edit {
        /// Account name or ID
        account: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New gender
        #[arg(short, long)]
        gender: Option<String>,
        /// New birthday (YYYY-MM-DD)
        #[arg(short, long)]
        birthday: Option<String>,
        #[arg(long)]
        short_wish: Option<String>,
        #[arg(long)]
        long_wish: Option<String>,
        #[arg(long)]
        short_goal: Option<String>,
        #[arg(long)]
        long_goal: Option<String>,
    },
    /// Delete an account and its transaction history
    Delete {
        /// Account name or ID
        account: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Set or remove an account's avatar image
    Avatar {
        /// Account name or ID
        account: String,
        /// Image file
        #[arg(required_unless_present = "clear")]
        file: Option<PathBuf>,
        /// Remove the current avatar
        #[arg(long, conflicts_with = "file")]
        clear: bool,
    },
}

/// Handle an account command
pub fn handle_account_command(
    storage: &Storage,
    settings: &Settings,
    cmd: AccountCommands,
) -> PiggyResult<()> {
    let service = AccountService::new(storage);

    match cmd {
        AccountCommands::Create {
            name,
            gender,
            birthday,
            short_wish,
            long_wish,
            short_goal,
            long_goal,
            avatar,
        } => {
            let fields = NewAccount {
                name,
                gender: parse_gender(&gender)?,
                birthday: match birthday {
                    Some(date) => parse_date(&date)?,
                    None => Utc::now().date_naive(),
                },
                short_term_wish: short_wish.unwrap_or_default(),
                long_term_wish: long_wish.unwrap_or_default(),
                short_term_savings_goal: parse_goal(&short_goal)?,
                long_term_savings_goal: parse_goal(&long_goal)?,
                avatar_data: avatar.map(|path| read_avatar(&path)).transpose()?,
            };

            let account = service.create(fields)?;

            println!("Created account: {}", account.name);
            println!("  Birthday: {}", account.birthday);
            println!("  ID: {}", account.id);
        }

        AccountCommands::List => {
            let summaries = service.list_summaries(Utc::now().date_naive())?;
            println!("{}", format_account_list(&summaries, settings).trim_end());
        }

        AccountCommands::Show { account } => {
            let found = service.find_required(&account)?;
            let summary = service.summary(&found, Utc::now().date_naive());
            print!("{}", format_account_details(&summary, settings));
        }

        AccountCommands::Edit {
            account,
            name,
            gender,
            birthday,
            short_wish,
            long_wish,
            short_goal,
            long_goal,
        } => {
            let found = service.find_required(&account)?;

            let changes = AccountChanges {
                name,
                gender: gender.as_deref().map(parse_gender).transpose()?,
                birthday: birthday.as_deref().map(parse_date).transpose()?,
                short_term_wish: short_wish,
                long_term_wish: long_wish,
                short_term_savings_goal: short_goal.as_deref().map(parse_goal).transpose()?,
                long_term_savings_goal: long_goal.as_deref().map(parse_goal).transpose()?,
            };

            if changes.is_empty() {
                println!("No changes specified. See 'piggybank account edit --help'.");
                return Ok(());
            }

            let updated = service.update(found.id, changes)?;
            println!("Updated account: {}", updated.name);
        }

        AccountCommands::Delete { account, force } => {
            let found = service.find_required(&account)?;

            if !force {
                println!(
                    "This will delete {} and {} transaction(s) (balance {}).",
                    found.name,
                    found.transactions.len(),
                    found.balance.format_with_symbol(&settings.currency_symbol)
                );
                println!("To proceed, run again with --force flag:");
                println!("  piggybank account delete \"{}\" --force", found.name);
                return Ok(());
            }

            let removed = service.delete(found.id)?;
            println!("Deleted account: {}", removed.name);
        }

        AccountCommands::Avatar {
            account,
            file,
            clear,
        } => {
            let found = service.find_required(&account)?;

            let avatar = file
                .filter(|_| !clear)
                .map(|path| read_avatar(&path))
                .transpose()?;
            let updated = service.set_avatar(found.id, avatar)?;

            match &updated.avatar_data {
                Some(bytes) => println!("Avatar set for {} ({} bytes)", updated.name, bytes.len()),
                None => println!("Avatar removed for {}", updated.name),
            }
        }
    }

    Ok(())
}

fn parse_gender(s: &str) -> PiggyResult<Gender> {
    Gender::parse(s).ok_or_else(|| {
        PiggyError::Validation(format!(
            "Invalid gender: '{}'. Valid values: male, female, other",
            s
        ))
    })
}

fn parse_date(s: &str) -> PiggyResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        PiggyError::Validation(format!("Invalid date: '{}'. Use YYYY-MM-DD format.", s))
    })
}

fn parse_goal(s: &str) -> PiggyResult<Money> {
    Money::parse(s).map_err(|e| {
        PiggyError::Validation(format!(
            "Invalid goal: '{}'. Use format like '25.00' or '25'. Error: {}",
            s, e
        ))
    })
}

fn read_avatar(path: &Path) -> PiggyResult<Vec<u8>> {
    fs::read(path).map_err(|e| {
        PiggyError::Io(format!("Failed to read avatar {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_gender("girl").unwrap(), Gender::Female);
        assert!(parse_gender("robot").is_err());

        assert_eq!(
            parse_date("2015-06-01").unwrap(),
            NaiveDate::from_ymd_opt(2015, 6, 1).unwrap()
        );
        assert!(matches!(parse_date("June 1st"), Err(PiggyError::Validation(_))));

        assert_eq!(parse_goal("$40").unwrap(), Money::new(40.0));
        assert!(parse_goal("lots").is_err());
    }
}
