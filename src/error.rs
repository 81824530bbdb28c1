//! Error type shared by the dictionary and its file backends.

use thiserror::Error;

/// Errors surfaced by dictionary and backend operations.
///
/// Invalid arguments (empty words, null handles at the C ABI) are not
/// errors; those are reported as `false`/no-op results by the operations
/// themselves.
#[derive(Debug, Error)]
pub enum Error {
    /// The backing file could not be read or written.
    #[error("dictionary I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file could not be decoded or parsed.
    #[error("malformed dictionary file: {0}")]
    Parse(String),

    /// A write was attempted on a read-only backend.
    #[error("dictionary file is read-only")]
    ReadOnly,

    /// The backing file changed on disk after the last read; writing now
    /// would clobber the external edit.
    #[error("dictionary file changed on disk since it was last read")]
    StaleWrite,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
