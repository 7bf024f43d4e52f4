//! Backup and restore for PiggyBank
//!
//! # Architecture
//!
//! - `BackupService`: writes the ledger to `bankDataBackup.json` and
//!   replaces the ledger from a backup document
//! - `BackgroundTask`: handle for an operation running on a worker thread
//!
//! # Backup Format
//!
//! A backup is the same JSON document as the live `bankData.json`: an array
//! of accounts with their nested transactions. Any copy of the live file is
//! therefore a valid backup and vice versa.
//!
//! # Example
//!
//! ```rust,ignore
//! use piggybank::backup::BackupService;
//!
//! let service = BackupService::new(storage.clone(), &settings);
//! let outcome = service.backup().wait();
//! println!("{}", outcome.message);
//!
//! let bytes = std::fs::read(service.backup_path())?;
//! let outcome = service.restore(bytes).wait();
//! ```

mod manager;
mod restore;
mod task;

pub use manager::{BackupOutcome, BackupService, BackupSummary};
pub use restore::RestoreOutcome;
pub use task::{BackgroundTask, Outcome};
