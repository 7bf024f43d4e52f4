//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod audit;
pub mod backup;
pub mod transaction;

pub use account::{handle_account_command, AccountCommands};
pub use audit::handle_audit_command;
pub use backup::{handle_backup_command, handle_restore_command, BackupCommands};
pub use transaction::{
    handle_history_command, handle_transaction_command, HistoryArgs, TransactionArgs,
};
