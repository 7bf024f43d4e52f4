//! Backup creation
//!
//! Writes the current ledger to `bankDataBackup.json`, a separate file from
//! the live `bankData.json`, in exactly the same document format so the
//! artifact can be handed to any "save/share" mechanism and restored later.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::settings::Settings;
use crate::error::{PiggyError, PiggyResult};
use crate::models::{Ledger, Money};
use crate::storage::{encode_json, write_json_atomic, Storage};

use super::task::{BackgroundTask, Outcome};

/// Counts describing a ledger document
#[derive(Debug, Clone, PartialEq)]
pub struct BackupSummary {
    pub account_count: usize,
    pub transaction_count: usize,
    pub total_balance: Money,
}

impl BackupSummary {
    pub fn of(ledger: &Ledger) -> Self {
        Self {
            account_count: ledger.len(),
            transaction_count: ledger.iter().map(|a| a.transactions.len()).sum(),
            total_balance: ledger.iter().map(|a| a.balance).sum(),
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "{} account(s), {} transaction(s), total balance {}",
            self.account_count, self.transaction_count, self.total_balance
        )
    }
}

/// Reported when a background backup finishes
#[derive(Debug, Clone)]
pub struct BackupOutcome {
    pub success: bool,
    /// Location of the artifact, when one was written
    pub path: Option<PathBuf>,
    pub message: String,
}

impl Outcome for BackupOutcome {
    fn failure(message: String) -> Self {
        Self {
            success: false,
            path: None,
            message,
        }
    }
}

/// Backs up and restores the ledger owned by a `Storage`
///
/// Clones share the same storage and the same operation lock, so at most one
/// backup or restore runs at a time.
#[derive(Clone)]
pub struct BackupService {
    pub(super) storage: Arc<Storage>,
    backup_path: PathBuf,
    allow_empty: bool,
    operation_lock: Arc<Mutex<()>>,
}

impl BackupService {
    pub fn new(storage: Arc<Storage>, settings: &Settings) -> Self {
        let backup_path = storage.paths().backup_file();
        Self {
            storage,
            backup_path,
            allow_empty: settings.allow_empty_backup,
            operation_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn backup_path(&self) -> &PathBuf {
        &self.backup_path
    }

    /// Serialize backup and restore operations against each other
    pub(super) fn exclusive(&self) -> PiggyResult<MutexGuard<'_, ()>> {
        self.operation_lock
            .lock()
            .map_err(|e| PiggyError::Storage(format!("Failed to acquire backup lock: {}", e)))
    }

    /// Snapshot of the ledger, refused when empty unless the policy allows it
    fn snapshot(&self) -> PiggyResult<Ledger> {
        let ledger = self.storage.ledger.accounts()?;
        if ledger.is_empty() && !self.allow_empty {
            return Err(PiggyError::EmptyLedger);
        }
        Ok(ledger)
    }

    /// Write the backup artifact and return its path
    ///
    /// Fails with `EmptyLedger`, leaving any earlier artifact untouched, when
    /// there are no accounts.
    pub fn create_backup(&self) -> PiggyResult<PathBuf> {
        let _guard = self.exclusive()?;

        let ledger = self.snapshot()?;
        write_json_atomic(&self.backup_path, &ledger)?;

        tracing::info!(
            path = %self.backup_path.display(),
            accounts = ledger.len(),
            "backup written"
        );
        Ok(self.backup_path.clone())
    }

    /// The ledger document as bytes, for handing to an export mechanism
    pub fn export_bytes(&self) -> PiggyResult<Vec<u8>> {
        let _guard = self.exclusive()?;
        encode_json(&self.snapshot()?)
    }

    /// Run `create_backup` on a background thread
    pub fn backup(&self) -> BackgroundTask<BackupOutcome> {
        let service = self.clone();
        BackgroundTask::spawn(move || match service.create_backup() {
            Ok(path) => BackupOutcome {
                success: true,
                message: format!("Backup saved to {}", path.display()),
                path: Some(path),
            },
            Err(e) => {
                tracing::error!(error = %e, "backup failed");
                BackupOutcome::failure(format!("Backup failed: {}", e))
            }
        })
    }
}
