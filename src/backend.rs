//! The contract between the dictionary and its persistent word lists.
//!
//! A backend owns one file path and a cached change token (the file's
//! modification time as of the last read). The dictionary polls
//! `has_changed` before every operation and re-reads when the file moved
//! under it; `write_all` refuses to clobber a file that changed since it
//! was last read.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::Result;
use crate::trie::Trie;

/// A persistent store of dictionary words.
pub trait DictionaryFile {
    /// True when the file changed on disk since the last `read_into`.
    fn has_changed(&self) -> bool;

    /// True when `write_all` can never succeed for this backend.
    fn is_read_only(&self) -> bool;

    /// Insert every word in the file into `trie`. The caller clears the
    /// trie first; the backend normalizes words before inserting them.
    fn read_into(&mut self, trie: &mut Trie) -> Result<()>;

    /// Replace the file's contents with the trie's words.
    fn write_all(&mut self, trie: &Trie) -> Result<()>;
}

/// File path plus the last-known modification time, shared by the file
/// backends.
#[derive(Debug, Clone)]
pub(crate) struct FileState {
    path: PathBuf,
    last_known_write: Option<SystemTime>,
}

impl FileState {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        FileState {
            path: path.into(),
            // no write time recorded yet: the first sighting of an
            // existing file reads as a change
            last_known_write: None,
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// The file's current modification time; `None` when it cannot be
    /// stat'ed (most commonly: it does not exist yet).
    pub(crate) fn current_write_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).and_then(|m| m.modified()).ok()
    }

    pub(crate) fn has_changed(&self) -> bool {
        self.last_known_write != self.current_write_time()
    }

    /// Record the current modification time as the last-known one. Called
    /// just before a read opens the file and after a successful write.
    pub(crate) fn mark_synced(&mut self) {
        self.last_known_write = self.current_write_time();
    }
}
