//! XML dictionary files, selected by an element path.
//!
//! An XML backend is read-only: it is constructed with a path and a
//! selector naming the elements whose text content holds the words. The
//! selector covers the path fragment of XPath that word lists actually
//! use: an absolute element path such as `/dictionary/entry/word`, or a
//! descendant-anchored one such as `//entry/lexical-unit` that matches at
//! any depth. A trailing `text()` step is accepted and ignored, since the
//! concatenated text content is what gets extracted either way.
//!
//! Each selected element contributes one word: the concatenation of all
//! text below it, trimmed of ASCII whitespace. Blank results are skipped.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::backend::{DictionaryFile, FileState};
use crate::convert;
use crate::error::{Error, Result};
use crate::trie::Trie;

/// Selector for LIFT lexicon files, where words live in each entry's
/// lexical-unit element.
const LIFT_WORD_SELECTOR: &str = "//entry/lexical-unit";

/// A read-only XML dictionary file.
#[derive(Debug)]
pub struct XmlFile {
    state: FileState,
    selector: Selector,
}

impl XmlFile {
    /// Create a backend for the given path, selecting word elements with
    /// `selector`. Fails when the selector is not an element path.
    pub fn new(path: impl Into<PathBuf>, selector: &str) -> Result<Self> {
        Ok(XmlFile {
            state: FileState::new(path),
            selector: Selector::parse(selector)?,
        })
    }

    /// Create a backend for a LIFT lexicon file.
    pub fn lift(path: impl Into<PathBuf>) -> Self {
        XmlFile {
            state: FileState::new(path),
            selector: Selector {
                anchored: false,
                steps: LIFT_WORD_SELECTOR
                    .trim_start_matches('/')
                    .split('/')
                    .map(str::to_owned)
                    .collect(),
            },
        }
    }
}

impl DictionaryFile for XmlFile {
    fn has_changed(&self) -> bool {
        self.state.has_changed()
    }

    fn is_read_only(&self) -> bool {
        true
    }

    fn read_into(&mut self, trie: &mut Trie) -> Result<()> {
        self.state.mark_synced();
        let file = File::open(self.state.path())?;
        let mut reader = Reader::from_reader(BufReader::new(file));

        // open-element stack matched against the selector, plus one text
        // accumulator per selected element currently open (selected
        // elements may nest)
        let mut stack: Vec<String> = Vec::new();
        let mut captures: Vec<(usize, String)> = Vec::new();
        let mut count = 0;
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    stack.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                    if self.selector.matches(&stack) {
                        captures.push((stack.len(), String::new()));
                    }
                }
                Ok(Event::Empty(_)) => {
                    // a self-closing element has no text to contribute
                }
                Ok(Event::Text(t)) => {
                    let text = t
                        .unescape()
                        .map_err(|e| Error::Parse(e.to_string()))?;
                    for (_, acc) in &mut captures {
                        acc.push_str(&text);
                    }
                }
                Ok(Event::CData(t)) => {
                    let raw = t.into_inner();
                    let text = String::from_utf8_lossy(&raw);
                    for (_, acc) in &mut captures {
                        acc.push_str(&text);
                    }
                }
                Ok(Event::End(_)) => {
                    if let Some(&(depth, _)) = captures.last() {
                        if depth == stack.len() {
                            let (_, word) = captures.pop().unwrap_or_default();
                            let word: Vec<char> = word.trim().chars().collect();
                            if !word.is_empty() {
                                trie.insert(&convert::nfd_chars(&word));
                                count += 1;
                            }
                        }
                    }
                    stack.pop();
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(Error::Parse(e.to_string())),
            }
            buf.clear();
        }
        debug!(
            "read {} words from {}",
            count,
            self.state.path().display()
        );
        Ok(())
    }

    fn write_all(&mut self, _trie: &Trie) -> Result<()> {
        Err(Error::ReadOnly)
    }
}

/// An element path: the names an element and its ancestors must carry.
#[derive(Debug, Clone)]
struct Selector {
    /// Whether the path is anchored at the document root (`/a/b`) rather
    /// than matching any element whose ancestry ends in the steps (`//a/b`).
    anchored: bool,
    steps: Vec<String>,
}

impl Selector {
    fn parse(expr: &str) -> Result<Self> {
        let expr = expr.trim();
        let (anchored, body) = if let Some(rest) = expr.strip_prefix("//") {
            (false, rest)
        } else if let Some(rest) = expr.strip_prefix('/') {
            (true, rest)
        } else {
            (false, expr)
        };

        let mut steps: Vec<String> = Vec::new();
        for step in body.split('/') {
            if step == "text()" && !steps.is_empty() {
                // text content is extracted regardless
                continue;
            }
            if step.is_empty()
                || !step
                    .chars()
                    .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
            {
                return Err(Error::Parse(format!(
                    "unsupported word selector {expr:?}: expected an element path \
                     like /dictionary/entry or //entry/lexical-unit"
                )));
            }
            steps.push(step.to_owned());
        }
        if steps.is_empty() {
            return Err(Error::Parse(format!(
                "unsupported word selector {expr:?}: no element names"
            )));
        }
        Ok(Selector { anchored, steps })
    }

    fn matches(&self, stack: &[String]) -> bool {
        if self.anchored {
            stack.len() == self.steps.len() && stack == self.steps.as_slice()
        } else {
            stack.len() >= self.steps.len() && stack.ends_with(&self.steps)
        }
    }
}
