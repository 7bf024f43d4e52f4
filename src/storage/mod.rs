//! Storage layer for PiggyBank
//!
//! JSON file storage with atomic writes. The whole ledger lives in one
//! document; `Storage` ties it to the configured paths and the audit log.

pub mod file_io;
pub mod ledger;

pub use file_io::{decode_json, encode_json, read_json, write_json_atomic};
pub use ledger::LedgerStore;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::PiggyPaths;
use crate::config::settings::Settings;
use crate::error::PiggyError;

/// Main storage coordinator shared by the services
pub struct Storage {
    paths: PiggyPaths,
    pub ledger: LedgerStore,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Create a Storage instance; the ledger is empty until `load_all`
    pub fn new(paths: PiggyPaths, settings: &Settings) -> Result<Self, PiggyError> {
        paths.ensure_directories()?;

        let audit = settings
            .audit_enabled
            .then(|| AuditLogger::new(paths.audit_log()));

        Ok(Self {
            ledger: LedgerStore::new(paths.ledger_file()),
            audit,
            paths,
        })
    }

    pub fn paths(&self) -> &PiggyPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<usize, PiggyError> {
        self.ledger.load()
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), PiggyError> {
        self.ledger.save()
    }

    /// The audit logger, if auditing is enabled
    pub fn audit_logger(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Record an audit entry.
    ///
    /// The mutation it describes has already been saved, so a failure to
    /// write the audit line is logged rather than returned.
    pub fn audit(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry) {
                tracing::warn!(error = %e, operation = %entry.operation, "failed to write audit entry");
            }
        }
    }
}
