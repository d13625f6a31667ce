//! Host collaborator contracts.
//!
//! # Responsibility
//! - Describe what the core needs from the note host (file IO, link
//!   resolution, daily-note lookup) and from the remote memo store.
//! - Keep host transport details outside the memo pipeline.
//!
//! # Invariants
//! - Calls are synchronous and sequential; one logical write is always
//!   read -> compute -> write against a single file handle.
//! - Link resolution never fails: a missing target is `None`.

use crate::model::memo::Memo;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod fs_vault;

pub use fs_vault::FsVault;

pub type HostResult<T> = Result<T, HostError>;

/// Failure reported by a host or remote collaborator.
#[derive(Debug)]
pub enum HostError {
    Io {
        path: String,
        source: std::io::Error,
    },
    /// Collaborator is reachable but refused or could not serve the call.
    Unavailable(String),
    InvalidData(String),
}

impl Display for HostError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error on `{path}`: {source}"),
            Self::Unavailable(message) => write!(f, "host unavailable: {message}"),
            Self::InvalidData(message) => write!(f, "invalid host data: {message}"),
        }
    }
}

impl Error for HostError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Unavailable(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

/// Opaque reference to one note file, addressed by vault-relative path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileHandle {
    pub path: String,
}

impl FileHandle {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// File-level access to the note host.
pub trait FileStore {
    fn read_file(&self, file: &FileHandle) -> HostResult<String>;
    fn write_file(&self, file: &FileHandle, content: &str) -> HostResult<()>;
    /// Resolves a wiki/markdown link target relative to `context_path`.
    fn resolve_link_path(&self, link: &str, context_path: &str) -> Option<FileHandle>;
    /// Path the UI can load the file from (e.g. an image `src`).
    fn resource_path(&self, file: &FileHandle) -> String;
}

/// Daily notes keyed by [`daily_note_key`].
pub type DailyNoteMap = BTreeMap<String, FileHandle>;

/// Index key for one calendar date: `day-YYYY-MM-DD`.
pub fn daily_note_key(date: NaiveDate) -> String {
    format!("day-{}", date.format("%Y-%m-%d"))
}

/// Lookup and creation of daily notes.
pub trait DailyNoteIndex {
    fn list_all(&self) -> HostResult<DailyNoteMap>;

    fn get_for_date(&self, date: NaiveDate, index: &DailyNoteMap) -> Option<FileHandle> {
        index.get(&daily_note_key(date)).cloned()
    }

    fn create_for_date(&self, date: NaiveDate) -> HostResult<FileHandle>;
}

/// Payload of [`RemoteStore::list_memos`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteMemos {
    pub memos: Vec<Memo>,
    pub comment_memos: Vec<Memo>,
}

/// Remote memo store used for listing and soft/hard deletion.
pub trait RemoteStore {
    fn list_memos(&self) -> HostResult<RemoteMemos>;
    fn list_deleted_memos(&self) -> HostResult<Vec<Memo>>;
    fn hide(&self, id: &str) -> HostResult<()>;
    fn restore(&self, id: &str) -> HostResult<()>;
    fn delete(&self, id: &str) -> HostResult<()>;
}

#[cfg(test)]
mod tests {
    use super::{daily_note_key, FileHandle};
    use chrono::NaiveDate;

    #[test]
    fn daily_note_key_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(daily_note_key(date), "day-2024-02-29");
    }
}
