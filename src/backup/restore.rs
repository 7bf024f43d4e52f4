//! Backup restoration
//!
//! A restore decodes the whole document before touching the store, so a
//! corrupt or foreign file leaves the current ledger exactly as it was.

use std::fs;
use std::path::Path;

use crate::audit::AuditEntry;
use crate::error::{PiggyError, PiggyResult};
use crate::models::Ledger;
use crate::storage::decode_json;

use super::manager::{BackupService, BackupSummary};
use super::task::{BackgroundTask, Outcome};

/// Reported when a background restore finishes
#[derive(Debug, Clone)]
pub struct RestoreOutcome {
    pub success: bool,
    pub message: String,
}

impl Outcome for RestoreOutcome {
    fn failure(message: String) -> Self {
        Self {
            success: false,
            message,
        }
    }
}

impl BackupService {
    /// Replace the ledger with the document in `bytes` and save it
    pub fn restore_from_bytes(&self, bytes: &[u8]) -> PiggyResult<BackupSummary> {
        let _guard = self.exclusive()?;

        let ledger: Ledger = decode_json(bytes)?;
        let summary = BackupSummary::of(&ledger);
        self.storage.ledger.replace_all(ledger)?;

        tracing::info!(
            accounts = summary.account_count,
            transactions = summary.transaction_count,
            "ledger restored"
        );
        self.storage
            .audit(AuditEntry::restore(format!("Restored {}", summary.describe())));
        Ok(summary)
    }

    pub fn restore_from_file(&self, path: &Path) -> PiggyResult<BackupSummary> {
        let bytes = fs::read(path).map_err(|e| {
            PiggyError::Io(format!("Failed to read backup {}: {}", path.display(), e))
        })?;
        self.restore_from_bytes(&bytes)
    }

    /// Run `restore_from_bytes` on a background thread
    pub fn restore(&self, bytes: Vec<u8>) -> BackgroundTask<RestoreOutcome> {
        let service = self.clone();
        BackgroundTask::spawn(move || match service.restore_from_bytes(&bytes) {
            Ok(summary) => RestoreOutcome {
                success: true,
                message: format!("Restored {}", summary.describe()),
            },
            Err(e) => {
                tracing::error!(error = %e, "restore failed");
                RestoreOutcome::failure(format!("Restore failed: {}", e))
            }
        })
    }

    /// Validate a backup document without restoring it
    pub fn inspect(&self, bytes: &[u8]) -> PiggyResult<BackupSummary> {
        let ledger: Ledger = decode_json(bytes)?;
        Ok(BackupSummary::of(&ledger))
    }
}
