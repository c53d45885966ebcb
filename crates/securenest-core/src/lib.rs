//! SecureNest Core Library
//!
//! This crate provides the core functionality for SecureNest, including:
//! - Vault storage (flat-file record store with active and trash files)
//! - Breach lookup (k-anonymity range queries against a breach corpus)
//! - Password generation
//! - Password strength evaluation
//! - Configuration management

pub mod breach;
pub mod config;
pub mod error;
pub mod generator;
pub mod strength;
pub mod vault;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::breach::{BreachClient, BreachQueryResult};
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::vault::{Record, VaultStore};
}
