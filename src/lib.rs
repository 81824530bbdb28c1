//! # triespell
//!
//! A trie-based spell checking engine.
//!
//! Words live in a trie whose shared prefixes also share the dynamic-
//! programming columns of the edit-distance computation, following Shang
//! & Merrett's approximate string matching scheme, so "which known words
//! are close to this one?" is answered without scanning the whole
//! dictionary. Word lists are plain line files (UTF-8 or UTF-16) or
//! read-only XML documents, and the engine re-reads a list whenever the
//! file changes on disk.
//!
//! ## Quick Start
//!
//! ```rust
//! use triespell::Trie;
//!
//! let mut words = Trie::new();
//! for w in ["cat", "hat", "that", "bat", "tot"] {
//!     words.insert(&w.chars().collect::<Vec<char>>());
//! }
//!
//! let query: Vec<char> = "tat".chars().collect();
//! let close = words.approximate_find(&query, 1);
//! assert_eq!(close, vec!["bat", "cat", "hat", "that", "tot"]);
//! ```
//!
//! ## File-backed dictionaries
//!
//! A [`SpellDictionary`] ties a trie to a word-list file, normalizes
//! every word to NFD, observes external edits, and writes additions
//! back:
//!
//! ```rust,no_run
//! use triespell::SpellDictionary;
//!
//! let mut dictionary = SpellDictionary::open("words.txt")?;
//! if !dictionary.contains("recieve")? {
//!     for suggestion in dictionary.suggest("recieve")? {
//!         println!("{suggestion}");
//!     }
//! }
//! # Ok::<(), triespell::Error>(())
//! ```
//!
//! ## C ABI
//!
//! The crate also builds as a cdylib exporting the `triespell_*`
//! functions in [`ffi`] for host applications.

pub mod backend;
pub mod convert;
pub mod dictionary;
pub mod error;
pub mod ffi;
pub mod line_file;
pub mod settings;
pub mod trie;
pub mod xml_file;

mod search;

// Re-export the main types for convenience
pub use backend::DictionaryFile;
pub use convert::ByteOrder;
pub use dictionary::{SpellDictionary, DEFAULT_BEST_ERROR_TOLERANCE, DEFAULT_ERROR_TOLERANCE};
pub use error::{Error, Result};
pub use line_file::LineFile;
pub use trie::Trie;
pub use xml_file::XmlFile;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
