//! Backup CLI commands
//!
//! Implements CLI commands for creating, inspecting and restoring backups.

use clap::Subcommand;
use std::fs;
use std::path::{Path, PathBuf};

use crate::backup::{BackupService, BackupSummary};
use crate::error::{PiggyError, PiggyResult};

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Write the ledger to the backup file
    Create,

    /// Show what a backup file contains without restoring it
    Inspect {
        /// Backup file (defaults to the standard backup location)
        file: Option<PathBuf>,
    },

    /// Write the ledger document to a file, or to stdout
    Export {
        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a backup command
pub fn handle_backup_command(service: &BackupService, cmd: BackupCommands) -> PiggyResult<()> {
    match cmd {
        BackupCommands::Create => {
            println!("Creating backup...");
            let outcome = service.backup().wait();
            if !outcome.success {
                return Err(PiggyError::Storage(outcome.message));
            }
            println!("{}", outcome.message);
        }

        BackupCommands::Inspect { file } => {
            let path = file.unwrap_or_else(|| service.backup_path().clone());
            let (summary, size) = inspect_file(service, &path)?;

            println!("Backup Details");
            println!("==============");
            println!("File: {}", path.display());
            println!("Size: {}", format_size(size));
            println!();
            println!("Contents:");
            println!("  Accounts:      {}", summary.account_count);
            println!("  Transactions:  {}", summary.transaction_count);
            println!("  Total balance: {}", summary.total_balance);
        }

        BackupCommands::Export { output } => {
            let bytes = service.export_bytes()?;
            match output {
                Some(path) => {
                    fs::write(&path, &bytes).map_err(|e| {
                        PiggyError::Io(format!("Failed to write {}: {}", path.display(), e))
                    })?;
                    println!("Exported {} to {}", format_size(bytes.len() as u64), path.display());
                }
                None => println!("{}", String::from_utf8_lossy(&bytes)),
            }
        }
    }

    Ok(())
}

/// Replace the ledger with the contents of a backup file
pub fn handle_restore_command(service: &BackupService, file: &Path, force: bool) -> PiggyResult<()> {
    // Read once up front: the pre-restore backup below may overwrite `file`.
    let bytes = fs::read(file).map_err(|e| {
        PiggyError::Io(format!("Failed to read backup {}: {}", file.display(), e))
    })?;
    let summary = service.inspect(&bytes)?;

    println!("Backup Information");
    println!("==================");
    println!("File: {}", file.display());
    println!("Contents: {}", summary.describe());
    println!();

    if !force {
        println!("WARNING: This will overwrite ALL current data!");
        println!("To proceed, run again with --force flag:");
        println!("  piggybank restore {} --force", file.display());
        return Ok(());
    }

    println!("Creating backup of current data before restore...");
    match service.create_backup() {
        Ok(path) => println!("Pre-restore backup saved: {}", path.display()),
        Err(PiggyError::EmptyLedger) => println!("Current ledger is empty, nothing to save."),
        Err(e) => return Err(e),
    }
    println!();

    let outcome = service.restore(bytes).wait();
    if !outcome.success {
        return Err(PiggyError::Storage(outcome.message));
    }
    println!("Restore complete!");
    println!("{}", outcome.message);

    Ok(())
}

fn inspect_file(service: &BackupService, path: &Path) -> PiggyResult<(BackupSummary, u64)> {
    let bytes = fs::read(path).map_err(|e| {
        PiggyError::Io(format!("Failed to read backup {}: {}", path.display(), e))
    })?;
    Ok((service.inspect(&bytes)?, bytes.len() as u64))
}

/// Format a file size in human-readable form
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
