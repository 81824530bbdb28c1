//! Settings files that describe how to open a dictionary.
//!
//! A host names a dictionary with a small TOML file instead of a raw
//! path, so the same configuration can point at either backend kind:
//!
//! ```toml
//! [dictionary]
//! path = "words.txt"      # resolved against the settings file's directory
//! type = "line"           # or "xml"
//! # xpath = "//entry/lexical-unit"   # required for type = "xml"
//! # error_tolerance = 1
//! # best_error_tolerance = 4
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::backend::DictionaryFile;
use crate::dictionary::SpellDictionary;
use crate::error::{Error, Result};
use crate::line_file::LineFile;
use crate::xml_file::XmlFile;

#[derive(Debug, Deserialize)]
struct SettingsFile {
    #[serde(alias = "Dictionary")]
    dictionary: DictionarySection,
}

// capitalized aliases accepted for settings files written by hosts that
// use the classic `[Dictionary]` section spelling
#[derive(Debug, Deserialize)]
struct DictionarySection {
    #[serde(alias = "Path")]
    path: PathBuf,
    #[serde(rename = "type", alias = "Type")]
    kind: DictionaryKind,
    #[serde(alias = "XPath")]
    xpath: Option<String>,
    error_tolerance: Option<u32>,
    best_error_tolerance: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum DictionaryKind {
    Line,
    Xml,
}

/// Open the dictionary described by a settings file, reading the word
/// list eagerly.
pub fn open(settings_path: impl AsRef<Path>) -> Result<SpellDictionary> {
    let settings_path = settings_path.as_ref();
    let text = fs::read_to_string(settings_path)?;
    let settings: SettingsFile =
        toml::from_str(&text).map_err(|e| Error::Parse(e.to_string()))?;
    let section = settings.dictionary;

    let word_path = resolve(settings_path, &section.path);
    let file: Box<dyn DictionaryFile> = match section.kind {
        DictionaryKind::Line => Box::new(LineFile::new(word_path)),
        DictionaryKind::Xml => {
            let xpath = section.xpath.ok_or_else(|| {
                Error::Parse("xml dictionaries require an `xpath` key".into())
            })?;
            Box::new(XmlFile::new(word_path, &xpath)?)
        }
    };

    let mut dictionary = SpellDictionary::new(file);
    if let Some(tolerance) = section.error_tolerance {
        dictionary.set_error_tolerance(tolerance);
    }
    if let Some(tolerance) = section.best_error_tolerance {
        dictionary.set_best_error_tolerance(tolerance);
    }
    dictionary.ensure_fresh()?;
    Ok(dictionary)
}

/// Relative dictionary paths are taken relative to the settings file.
fn resolve(settings_path: &Path, word_path: &Path) -> PathBuf {
    if word_path.is_absolute() {
        return word_path.to_path_buf();
    }
    settings_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(word_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).expect("create");
        file.write_all(contents.as_bytes()).expect("write");
        path
    }

    #[test]
    fn test_line_settings_with_relative_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(dir.path(), "words.txt", "cat\nhat\n");
        let settings = write_file(
            dir.path(),
            "en_TEST",
            "[dictionary]\npath = \"words.txt\"\ntype = \"line\"\n",
        );

        let mut dict = open(&settings).expect("open");
        assert!(dict.contains("cat").expect("contains"));
        assert_eq!(dict.entry_count().expect("count"), 2);
    }

    #[test]
    fn test_xml_settings() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(
            dir.path(),
            "words.xml",
            "<lift><entry><lexical-unit>cat</lexical-unit></entry></lift>",
        );
        let settings = write_file(
            dir.path(),
            "xml_TEST",
            "[dictionary]\npath = \"words.xml\"\ntype = \"xml\"\nxpath = \"//entry/lexical-unit\"\n",
        );

        let mut dict = open(&settings).expect("open");
        assert!(dict.contains("cat").expect("contains"));
    }

    #[test]
    fn test_xml_settings_require_xpath() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(dir.path(), "words.xml", "<d/>");
        let settings = write_file(
            dir.path(),
            "bad_TEST",
            "[dictionary]\npath = \"words.xml\"\ntype = \"xml\"\n",
        );

        assert!(matches!(open(&settings), Err(Error::Parse(_))));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = write_file(
            dir.path(),
            "bad_TEST",
            "[dictionary]\npath = \"words.txt\"\ntype = \"sqlite\"\n",
        );

        assert!(matches!(open(&settings), Err(Error::Parse(_))));
    }

    #[test]
    fn test_capitalized_section_and_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(dir.path(), "words.txt", "cat\n");
        let settings = write_file(
            dir.path(),
            "caps_TEST",
            "[Dictionary]\nPath = \"words.txt\"\nType = \"line\"\n",
        );

        let mut dict = open(&settings).expect("open");
        assert!(dict.contains("cat").expect("contains"));
    }

    #[test]
    fn test_tolerance_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(dir.path(), "words.txt", "cat\n");
        let settings = write_file(
            dir.path(),
            "tol_TEST",
            "[dictionary]\npath = \"words.txt\"\ntype = \"line\"\n\
             error_tolerance = 1\nbest_error_tolerance = 4\n",
        );

        let dict = open(&settings).expect("open");
        assert_eq!(dict.error_tolerance(), 1);
        assert_eq!(dict.best_error_tolerance(), 4);
    }
}
