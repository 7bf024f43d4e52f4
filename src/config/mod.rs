//! Configuration module for PiggyBank
//!
//! This module provides configuration management including:
//! - Data directory and file path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::PiggyPaths;
pub use settings::Settings;
