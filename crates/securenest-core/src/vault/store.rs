//! Flat-file record store
//!
//! `VaultStore` performs durable CRUD-style operations over the two
//! store files. All operations are synchronous full-file reads and
//! rewrites; there is no locking or atomic rename, so a single writer
//! is assumed. A crash mid-rewrite can leave a store file partially
//! written.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::codec::{format_record, parse_records};
use super::Record;
use crate::Result;

/// Default file name for the active store.
pub const ACTIVE_FILE: &str = "passwords.txt";

/// Default file name for the trash store.
pub const TRASH_FILE: &str = "trash.txt";

/// Store over a data directory holding the active and trash files.
#[derive(Debug, Clone)]
pub struct VaultStore {
    dir: PathBuf,
    active_file: String,
    trash_file: String,
}

impl VaultStore {
    /// Create a store rooted at the given directory with the default
    /// file names.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            active_file: ACTIVE_FILE.to_string(),
            trash_file: TRASH_FILE.to_string(),
        }
    }

    /// Override the store file names.
    pub fn with_files(
        mut self,
        active_file: impl Into<String>,
        trash_file: impl Into<String>,
    ) -> Self {
        self.active_file = active_file.into();
        self.trash_file = trash_file.into();
        self
    }

    /// Path of the active store file.
    pub fn active_path(&self) -> PathBuf {
        self.dir.join(&self.active_file)
    }

    /// Path of the trash store file.
    pub fn trash_path(&self) -> PathBuf {
        self.dir.join(&self.trash_file)
    }

    /// List all records in the active store.
    pub fn list_active(&self) -> Result<Vec<Record>> {
        read_store(&self.active_path())
    }

    /// List all records in the trash store.
    pub fn list_trash(&self) -> Result<Vec<Record>> {
        read_store(&self.trash_path())
    }

    /// Append a record to the active store, creating the file if
    /// absent. Existing content is not re-parsed or rewritten.
    pub fn add(&self, record: &Record) -> Result<()> {
        debug!(title = %record.title, "appending record to active store");
        append_record(&self.active_path(), record)
    }

    /// Find the first active record with the given title.
    pub fn find(&self, title: &str) -> Result<Option<Record>> {
        Ok(self
            .list_active()?
            .into_iter()
            .find(|r| r.title == title))
    }

    /// Find the first trashed record with the given title.
    pub fn find_in_trash(&self, title: &str) -> Result<Option<Record>> {
        Ok(self
            .list_trash()?
            .into_iter()
            .find(|r| r.title == title))
    }

    /// Move the first active record with the given title to the trash
    /// store. Returns `Ok(false)` without touching either file if no
    /// record matches.
    pub fn move_to_trash(&self, title: &str) -> Result<bool> {
        let entries = self.list_active()?;
        let Some(entry) = entries.iter().find(|r| r.title == title) else {
            return Ok(false);
        };

        debug!(title = %title, "moving record to trash");
        append_record(&self.trash_path(), entry)?;

        let remaining: Vec<Record> = entries
            .iter()
            .filter(|r| r.title != title)
            .cloned()
            .collect();
        rewrite_store(&self.active_path(), &remaining)?;
        Ok(true)
    }

    /// Restore a trashed record: append it back to the active store,
    /// then remove it from trash. The record's original position in the
    /// active store is not preserved.
    pub fn restore(&self, record: &Record) -> Result<()> {
        debug!(title = %record.title, "restoring record from trash");
        append_record(&self.active_path(), record)?;
        self.remove_by_title(&self.trash_path(), &record.title)
    }

    /// Permanently delete every trashed record with the given title.
    /// The active store is untouched.
    pub fn purge(&self, title: &str) -> Result<()> {
        debug!(title = %title, "purging record from trash");
        self.remove_by_title(&self.trash_path(), title)
    }

    /// Filter out every record whose title matches exactly and rewrite
    /// the whole file with the remainder. Idempotent.
    fn remove_by_title(&self, path: &Path, title: &str) -> Result<()> {
        let remaining: Vec<Record> = read_store(path)?
            .into_iter()
            .filter(|r| r.title != title)
            .collect();
        rewrite_store(path, &remaining)
    }
}

/// Read all records from a store file. An absent file is a valid empty
/// store; any other I/O failure propagates.
fn read_store(path: &Path) -> Result<Vec<Record>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let contents = fs::read_to_string(path)?;
    Ok(parse_records(&contents))
}

fn append_record(path: &Path, record: &Record) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(format_record(record).as_bytes())?;
    Ok(())
}

/// Rewrite a store file from scratch. Formatted blocks are joined with
/// a blank line between them; the parser skips blank lines.
fn rewrite_store(path: &Path, records: &[Record]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = records
        .iter()
        .map(format_record)
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(path, contents)?;
    Ok(())
}
