//! Core data models for PiggyBank
//!
//! Accounts (one per child), their transactions, and the supporting id and
//! money types.

pub mod account;
pub mod ids;
pub mod money;
pub mod transaction;

pub use account::{Account, AccountValidationError, Gender, NewAccount};
pub use ids::{AccountId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use transaction::{Transaction, TransactionKind};

/// The full ledger: every account with its nested transactions
pub type Ledger = Vec<Account>;
