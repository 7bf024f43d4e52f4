//! Path management for PiggyBank
//!
//! ## Path Resolution Order
//!
//! 1. `PIGGYBANK_DATA_DIR` environment variable (if set)
//! 2. `<documents>/piggybank` (the user's documents directory)
//! 3. The platform data directory (e.g. `~/.local/share/piggybank`)

use std::path::PathBuf;

use directories::{ProjectDirs, UserDirs};

use crate::error::PiggyError;

/// File name of the live ledger document
pub const LEDGER_FILE_NAME: &str = "bankData.json";

/// File name of the most recent backup artifact
pub const BACKUP_FILE_NAME: &str = "bankDataBackup.json";

/// Manages all paths used by PiggyBank
#[derive(Debug, Clone)]
pub struct PiggyPaths {
    /// Base directory for all PiggyBank files
    base_dir: PathBuf,
}

impl PiggyPaths {
    /// Resolve the base directory for this user
    ///
    /// # Errors
    ///
    /// Returns an error if neither a documents directory nor a platform data
    /// directory can be determined.
    pub fn new() -> Result<Self, PiggyError> {
        let base_dir = if let Ok(custom) = std::env::var("PIGGYBANK_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create PiggyPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Path of the live ledger document
    pub fn ledger_file(&self) -> PathBuf {
        self.base_dir.join(LEDGER_FILE_NAME)
    }

    /// Path of the backup artifact, distinct from the live document
    pub fn backup_file(&self) -> PathBuf {
        self.base_dir.join(BACKUP_FILE_NAME)
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), PiggyError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PiggyError::Io(format!("Failed to create data directory: {}", e)))
    }
}

fn resolve_default_path() -> Result<PathBuf, PiggyError> {
    if let Some(documents) = UserDirs::new().and_then(|u| u.document_dir().map(PathBuf::from)) {
        return Ok(documents.join("piggybank"));
    }

    ProjectDirs::from("", "", "piggybank")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| PiggyError::Config("Could not determine a data directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PiggyPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.ledger_file(), temp_dir.path().join("bankData.json"));
        assert_eq!(
            paths.backup_file(),
            temp_dir.path().join("bankDataBackup.json")
        );
    }

    #[test]
    fn test_live_and_backup_paths_differ() {
        let paths = PiggyPaths::with_base_dir(PathBuf::from("/tmp/piggy"));
        assert_ne!(paths.ledger_file(), paths.backup_file());
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var("PIGGYBANK_DATA_DIR", custom_path);
        let paths = PiggyPaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());
        env::remove_var("PIGGYBANK_DATA_DIR");
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PiggyPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();
        assert!(paths.base_dir().exists());
    }
}
