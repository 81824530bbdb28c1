//! Line-format dictionary files: one word per line.
//!
//! The encoding is sniffed from the leading byte order mark: FF FE is
//! UTF-16 little-endian, FE FF UTF-16 big-endian, EF BB BF UTF-8; a file
//! with no BOM is read as UTF-8. Lines end with LF, CR, or CR LF; each
//! line is trimmed of ASCII whitespace and blank lines are skipped.
//!
//! Writing truncates and rewrites the whole file. A file that was read as
//! UTF-16 (either order) is written back as UTF-16 little-endian with an
//! FF FE BOM; everything else is written as BOM-less UTF-8. Words are
//! terminated with a bare LF.

use std::fs;

use log::debug;

use crate::backend::{DictionaryFile, FileState};
use crate::convert::{self, ByteOrder};
use crate::error::{Error, Result};
use crate::trie::Trie;

/// A line-per-word dictionary file.
#[derive(Debug)]
pub struct LineFile {
    state: FileState,
    /// Whether the file was last seen in UTF-16; governs the write
    /// encoding. New files default to UTF-8.
    utf16: bool,
}

impl LineFile {
    /// Create a backend for the given path. The file is not opened until
    /// the first read or write.
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        LineFile {
            state: FileState::new(path),
            utf16: false,
        }
    }
}

impl DictionaryFile for LineFile {
    fn has_changed(&self) -> bool {
        self.state.has_changed()
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn read_into(&mut self, trie: &mut Trie) -> Result<()> {
        self.state.mark_synced();
        let bytes = fs::read(self.state.path())?;

        let chars = if bytes.starts_with(&[0xFF, 0xFE]) {
            self.utf16 = true;
            convert::utf16_to_chars(&bytes[2..], ByteOrder::LittleEndian)
        } else if bytes.starts_with(&[0xFE, 0xFF]) {
            self.utf16 = true;
            convert::utf16_to_chars(&bytes[2..], ByteOrder::BigEndian)
        } else if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
            self.utf16 = false;
            convert::utf8_to_chars(&bytes[3..])
        } else {
            self.utf16 = false;
            convert::utf8_to_chars(&bytes)
        };

        let mut count = 0;
        for line in chars.split(|&c| c == '\n' || c == '\r') {
            let word = trim_ascii_whitespace(line);
            if word.is_empty() {
                continue;
            }
            trie.insert(&convert::nfd_chars(word));
            count += 1;
        }
        debug!(
            "read {} words from {}",
            count,
            self.state.path().display()
        );
        Ok(())
    }

    fn write_all(&mut self, trie: &Trie) -> Result<()> {
        if self.has_changed() {
            return Err(Error::StaleWrite);
        }

        let mut buf = Vec::new();
        if self.utf16 {
            buf.extend_from_slice(&[0xFF, 0xFE]);
            for word in trie.words() {
                buf.extend_from_slice(&convert::string_to_utf16le(&word));
                buf.extend_from_slice(&[0x0A, 0x00]);
            }
        } else {
            for word in trie.words() {
                buf.extend_from_slice(word.as_bytes());
                buf.push(b'\n');
            }
        }
        fs::write(self.state.path(), buf)?;
        self.state.mark_synced();
        debug!(
            "wrote {} words to {}",
            trie.len(),
            self.state.path().display()
        );
        Ok(())
    }
}

fn trim_ascii_whitespace(mut line: &[char]) -> &[char] {
    const WHITESPACE: [char; 4] = [' ', '\t', '\r', '\n'];
    while let Some(first) = line.first() {
        if !WHITESPACE.contains(first) {
            break;
        }
        line = &line[1..];
    }
    while let Some(last) = line.last() {
        if !WHITESPACE.contains(last) {
            break;
        }
        line = &line[..line.len() - 1];
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn read_words(bytes: &[u8]) -> (Vec<String>, LineFile, tempfile::NamedTempFile) {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(bytes).expect("write");
        let mut backend = LineFile::new(file.path().to_path_buf());
        let mut trie = Trie::new();
        backend.read_into(&mut trie).expect("read");
        (trie.words().collect(), backend, file)
    }

    #[test]
    fn test_read_plain_utf8() {
        let (words, _, _file) = read_words(b"cat\nhat\nthat\n");
        assert_eq!(words, vec!["cat", "hat", "that"]);
    }

    #[test]
    fn test_read_utf8_bom_is_skipped() {
        let (words, _, _file) = read_words(b"\xEF\xBB\xBFcat\nhat\n");
        assert_eq!(words, vec!["cat", "hat"]);
    }

    #[test]
    fn test_read_mixed_line_endings_and_blanks() {
        let (words, _, _file) = read_words(b"cat\r\nhat\r\rthat\n\n  \nbat");
        assert_eq!(words, vec!["bat", "cat", "hat", "that"]);
    }

    #[test]
    fn test_read_trims_whitespace() {
        let (words, _, _file) = read_words(b"  cat\t\nhat   \n");
        assert_eq!(words, vec!["cat", "hat"]);
    }

    #[test]
    fn test_read_utf16_le() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "cat\nhat\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let (words, backend, _file) = read_words(&bytes);
        assert_eq!(words, vec!["cat", "hat"]);
        assert!(backend.utf16);
    }

    #[test]
    fn test_read_utf16_be() {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in "cat\nhat\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        let (words, backend, _file) = read_words(&bytes);
        assert_eq!(words, vec!["cat", "hat"]);
        assert!(backend.utf16);
    }

    #[test]
    fn test_read_normalizes_to_nfd() {
        let (words, _, _file) = read_words("caf\u{00E9}\n".as_bytes());
        assert_eq!(words, vec!["cafe\u{0301}"]);
    }

    #[test]
    fn test_write_utf8_round_trip() {
        let file = tempfile::NamedTempFile::new().expect("tempfile");
        let mut backend = LineFile::new(file.path().to_path_buf());

        let mut trie = Trie::new();
        backend.read_into(&mut trie).expect("read empty");
        for w in ["tot", "cat", "bat"] {
            trie.insert(&w.chars().collect::<Vec<_>>());
        }
        backend.write_all(&trie).expect("write");

        let bytes = fs::read(file.path()).expect("reread");
        assert_eq!(bytes, b"bat\ncat\ntot\n");
    }

    #[test]
    fn test_write_keeps_utf16_with_le_bom() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        let mut bytes = vec![0xFE, 0xFF]; // big-endian source
        for unit in "cat\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        file.write_all(&bytes).expect("write");

        let mut backend = LineFile::new(file.path().to_path_buf());
        let mut trie = Trie::new();
        backend.read_into(&mut trie).expect("read");
        backend.write_all(&trie).expect("write back");

        let written = fs::read(file.path()).expect("reread");
        // rewritten little-endian regardless of the source byte order
        assert_eq!(written[..2], [0xFF, 0xFE]);
        let decoded = convert::utf16_to_chars(&written[2..], ByteOrder::LittleEndian);
        assert_eq!(decoded.iter().collect::<String>(), "cat\n");
    }

    #[test]
    fn test_write_refused_after_external_change() {
        let file = tempfile::NamedTempFile::new().expect("tempfile");
        let mut backend = LineFile::new(file.path().to_path_buf());
        let mut trie = Trie::new();
        backend.read_into(&mut trie).expect("read");

        let bumped = backend.state.current_write_time().expect("mtime")
            + std::time::Duration::from_secs(2);
        file.as_file().set_modified(bumped).expect("set mtime");

        trie.insert(&['c', 'a', 't']);
        assert!(matches!(backend.write_all(&trie), Err(Error::StaleWrite)));
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut backend = LineFile::new(dir.path().join("absent.txt"));
        let mut trie = Trie::new();
        assert!(matches!(backend.read_into(&mut trie), Err(Error::Io(_))));
    }
}
