//! Service layer for PiggyBank
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, lookups, computed fields, and audit entries.

pub mod account;
pub mod transaction;

pub use account::{AccountChanges, AccountService, AccountSummary};
pub use transaction::{HistoryEntry, TransactionFilter, TransactionService, UNKNOWN_ACCOUNT};
