//! Catalogue loading and category label handling.
//!
//! The catalogue is an ordered JSON array of question objects, loaded once
//! and immutable for the lifetime of a session.

use crate::core::Question;
use crate::errors::LoadError;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// The immutable question catalogue.
#[derive(Clone, Debug)]
pub struct Catalog {
    questions: Vec<Question>,
}

impl Catalog {
    /// Build from already-parsed questions. Rejects an empty sequence.
    pub fn new(questions: Vec<Question>) -> Result<Self, LoadError> {
        if questions.is_empty() {
            return Err(LoadError::Empty);
        }
        Ok(Self { questions })
    }

    /// Load and validate a catalogue JSON file.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&contents)?;
        log::debug!(
            "loaded catalogue {} ({} questions)",
            path.display(),
            catalog.len()
        );
        Ok(catalog)
    }

    pub fn from_json(contents: &str) -> Result<Self, LoadError> {
        let questions: Vec<Question> = serde_json::from_str(contents)?;
        Self::new(questions)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Clamp an arbitrary index into catalogue bounds.
    pub fn clamp_index(&self, index: i64) -> usize {
        let max = self.questions.len().saturating_sub(1) as i64;
        index.clamp(0, max) as usize
    }

    pub fn id_set(&self) -> HashSet<&str> {
        self.questions.iter().map(|q| q.id.as_str()).collect()
    }
}

/// A category label split into display code and name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitLabel {
    pub code: String,
    pub name: String,
}

fn label_with_parens_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // "PR.AT (Awareness and Training)", full-width parens accepted
    RE.get_or_init(|| Regex::new(r"^([A-Z]{2}\.[A-Z]{2})[\s\u{3000}]*[（(](.+)[）)]$").unwrap())
}

fn label_with_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // "PR.AT Awareness and Training"
    RE.get_or_init(|| Regex::new(r"^([A-Z]{2}\.[A-Z]{2})\b\s*(.+)$").unwrap())
}

fn bare_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z]{2}\.[A-Z]{2}").unwrap())
}

/// Split a display label like `"PR.AT (Awareness and Training)"` into code
/// and name. Labels without a leading code yield an empty code and the full
/// label as the name.
pub fn split_category_label(label: &str) -> SplitLabel {
    let s = label.trim();
    if let Some(caps) = label_with_parens_re().captures(s) {
        return SplitLabel {
            code: caps[1].to_string(),
            name: caps[2].to_string(),
        };
    }
    if let Some(caps) = label_with_code_re().captures(s) {
        return SplitLabel {
            code: caps[1].to_string(),
            name: caps[2].trim().to_string(),
        };
    }
    SplitLabel {
        code: String::new(),
        name: s.to_string(),
    }
}

/// Display code for a category: the label's code part when present, else a
/// leading code embedded in the key, else the full key.
pub fn category_code(key: &str, label: &str) -> String {
    let split = split_category_label(label);
    if !split.code.is_empty() {
        return split.code;
    }
    bare_code_re()
        .find(key)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| key.to_string())
}
