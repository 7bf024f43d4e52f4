//! PiggyBank - savings ledger for children's pocket-money accounts
//!
//! This library provides the core of the PiggyBank application: a ledger of
//! children's accounts with their deposits and withdrawals, persisted as a
//! single JSON document, plus backup and restore of that document.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (accounts, transactions, money, ids)
//! - `storage`: The ledger store and JSON file storage
//! - `events`: Change notifications for ledger consumers
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `backup`: Backup and restore of the ledger document
//! - `cli`, `display`: Command-line front end
//!
//! # Example
//!
//! ```rust,ignore
//! use piggybank::config::{paths::PiggyPaths, settings::Settings};
//! use piggybank::models::{Money, NewAccount};
//! use piggybank::storage::Storage;
//!
//! let paths = PiggyPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths, &settings)?;
//! storage.load_all()?;
//!
//! let alice = storage.ledger.create_account(NewAccount::named("Alice"))?;
//! storage.ledger.deposit(alice.id, Money::new(20.0), "allowance")?;
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{PiggyError, PiggyResult};
