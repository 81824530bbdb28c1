//! The word-level dictionary API.
//!
//! A `SpellDictionary` couples the trie with one file backend. Every
//! public operation first asks the backend whether the file changed on
//! disk; if it did, the trie is dropped and repopulated before the
//! operation runs, so external edits are always observed. Mutations are
//! flushed back through the backend unless it is read-only.
//!
//! Words are normalized to NFD on the way in, so lookups are insensitive
//! to the composition form the host happens to use.

use std::path::Path;

use log::{debug, warn};

use crate::backend::DictionaryFile;
use crate::convert;
use crate::error::Result;
use crate::line_file::LineFile;
use crate::trie::Trie;

/// Default tolerance for `suggest`'s primary edit-distance pass.
pub const DEFAULT_ERROR_TOLERANCE: u32 = 2;

/// Default ceiling for the best-match fallback pass. The ceiling keeps a
/// hopeless query from dragging in the entire word list.
pub const DEFAULT_BEST_ERROR_TOLERANCE: u32 = 6;

/// A spell-checking dictionary backed by one word-list file.
pub struct SpellDictionary {
    words: Trie,
    file: Box<dyn DictionaryFile>,
    error_tolerance: u32,
    best_error_tolerance: u32,
}

impl SpellDictionary {
    /// Create a dictionary over the given backend. The file is read
    /// lazily, on the first operation that needs it.
    pub fn new(file: Box<dyn DictionaryFile>) -> Self {
        SpellDictionary {
            words: Trie::new(),
            file,
            error_tolerance: DEFAULT_ERROR_TOLERANCE,
            best_error_tolerance: DEFAULT_BEST_ERROR_TOLERANCE,
        }
    }

    /// Open a line-format dictionary file, reading it eagerly.
    ///
    /// The file must already exist: a missing or unreadable path fails
    /// with `Error::Io`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut dictionary = SpellDictionary::new(Box::new(LineFile::new(path.as_ref())));
        dictionary.ensure_fresh()?;
        Ok(dictionary)
    }

    /// Replace the backend. The in-memory word list is dropped; the next
    /// operation reads the new file.
    pub fn load(&mut self, file: Box<dyn DictionaryFile>) {
        self.words.clear();
        self.file = file;
    }

    /// Check whether a word is in the dictionary.
    pub fn contains(&mut self, word: &str) -> Result<bool> {
        self.ensure_fresh()?;
        Ok(self.words.contains(&convert::nfd(word)))
    }

    /// Add a word. Adding a word that is already present (or the empty
    /// word) succeeds without touching the file.
    pub fn add(&mut self, word: &str) -> Result<()> {
        self.ensure_fresh()?;
        if self.words.insert(&convert::nfd(word)) {
            self.flush()?;
        }
        Ok(())
    }

    /// Remove a word. Removing an absent word succeeds without touching
    /// the file.
    pub fn remove(&mut self, word: &str) -> Result<()> {
        self.ensure_fresh()?;
        if self.words.remove(&convert::nfd(word)) {
            self.flush()?;
        }
        Ok(())
    }

    /// Remove every word.
    pub fn remove_all(&mut self) -> Result<()> {
        self.ensure_fresh()?;
        if !self.words.is_empty() {
            self.words.clear();
            self.flush()?;
        }
        Ok(())
    }

    /// Number of words in the dictionary.
    pub fn entry_count(&mut self) -> Result<usize> {
        self.ensure_fresh()?;
        Ok(self.words.len())
    }

    /// Suggest replacements for a (presumably misspelled) word.
    ///
    /// Candidates come in three groups: first the word as typed with a
    /// space inserted wherever both halves are themselves words, then
    /// every word within the error tolerance, and - only when that pass
    /// found nothing - the closest words within the best-error ceiling.
    pub fn suggest(&mut self, word: &str) -> Result<Vec<String>> {
        self.ensure_fresh()?;

        // split positions are taken in the word as the caller typed it;
        // only the lookups normalize, so the emitted candidate keeps the
        // caller's composition form
        let typed: Vec<char> = word.chars().collect();
        let mut suggestions = Vec::new();
        for split in 1..typed.len() {
            let head: String = typed[..split].iter().collect();
            let tail: String = typed[split..].iter().collect();
            if self.words.contains(&convert::nfd(&head)) && self.words.contains(&convert::nfd(&tail))
            {
                suggestions.push(format!("{head} {tail}"));
            }
        }

        let query = convert::nfd(word);
        let mut found = self.words.approximate_find(&query, self.error_tolerance);
        if found.is_empty() {
            found = self.words.best_find(&query, self.best_error_tolerance);
        }
        suggestions.append(&mut found);
        Ok(suggestions)
    }

    /// Tolerance used by `suggest`'s primary pass.
    pub fn error_tolerance(&self) -> u32 {
        self.error_tolerance
    }

    pub fn set_error_tolerance(&mut self, tolerance: u32) {
        self.error_tolerance = tolerance;
    }

    /// Ceiling for `suggest`'s best-match fallback pass.
    pub fn best_error_tolerance(&self) -> u32 {
        self.best_error_tolerance
    }

    pub fn set_best_error_tolerance(&mut self, tolerance: u32) {
        self.best_error_tolerance = tolerance;
    }

    /// Re-read the word list if the file changed on disk.
    pub(crate) fn ensure_fresh(&mut self) -> Result<()> {
        if self.file.has_changed() {
            debug!("word list changed on disk, reloading");
            self.words.clear();
            self.file.read_into(&mut self.words)?;
        }
        Ok(())
    }

    /// Write the word list back, unless the backend can never take it.
    ///
    /// A write refused because the file changed under us surfaces as
    /// `Error::StaleWrite`; the in-memory words stay authoritative until
    /// the next operation absorbs the external edit.
    fn flush(&mut self) -> Result<()> {
        if self.file.is_read_only() {
            return Ok(());
        }
        let result = self.file.write_all(&self.words);
        if let Err(e) = &result {
            warn!("word list not saved: {e}");
        }
        result
    }
}
