//! Audit CLI command

use crate::error::PiggyResult;
use crate::storage::Storage;

/// Print the most recent audit entries, oldest first
pub fn handle_audit_command(storage: &Storage, limit: usize, verbose: bool) -> PiggyResult<()> {
    let Some(logger) = storage.audit_logger() else {
        println!("Audit logging is disabled (set \"audit_enabled\": true in config.json).");
        return Ok(());
    };

    let entries = logger.read_recent(limit)?;
    if entries.is_empty() {
        println!("No audit entries yet.");
        return Ok(());
    }

    for entry in &entries {
        if verbose {
            println!("{}", entry.format_human_readable());
        } else {
            println!(
                "[{}] {} {} {}{}",
                entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                entry.operation,
                entry.entity_type,
                entry.entity_name.as_deref().unwrap_or(&entry.entity_id),
                entry
                    .summary
                    .as_deref()
                    .map(|s| format!(" ({})", s))
                    .unwrap_or_default()
            );
        }
    }

    Ok(())
}
