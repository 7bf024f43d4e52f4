//! Audit logging for PiggyBank
//!
//! Every create, update, delete, deposit, withdrawal and restore is appended
//! to `audit.log` as one JSON line, with before/after snapshots where they
//! apply.
//!
//! - `AuditEntry`: one record (timestamp, operation, entity, snapshots)
//! - `AuditLogger`: appends entries and reads them back

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
