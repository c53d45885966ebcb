//! Vault storage
//!
//! Records are persisted in a human-readable, line-oriented flat-file
//! format. Two independent store files share the format: the active
//! store holds live entries, the trash store holds soft-deleted entries
//! pending restore or permanent deletion.

pub mod codec;
pub mod store;

pub use store::VaultStore;

/// A single stored credential.
///
/// The title acts as the lookup key within a store file. Lookups are
/// first-match; duplicate titles are not rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub title: String,
    pub username: String,
    pub password: String,
    pub web_address: String,
    pub note: String,
}

impl Record {
    /// Create a record with the given title and empty remaining fields.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}
