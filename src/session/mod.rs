//! Versioned session document codec.
//!
//! A session document is an explicit, user-triggered snapshot of the
//! answer store plus a progress cursor. Structural problems (wrong kind,
//! wrong version, missing answers map) reject the whole document;
//! per-entry problems (stale id, unrecognized value) drop that entry,
//! counted and logged, and the rest of the import proceeds.

use crate::catalog::Catalog;
use crate::core::{Answer, AnswerStore};
use crate::errors::FormatError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Discriminator carried by every session document.
pub const SESSION_KIND: &str = "gapmap-session";

/// The single supported document version. Anything else is rejected, not
/// migrated.
pub const SESSION_VERSION: u64 = 2;

/// The persisted session snapshot.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionDocument {
    pub kind: String,
    pub version: u64,
    #[serde(rename = "generatedAt")]
    pub generated_at: DateTime<Utc>,
    #[serde(rename = "dataFile")]
    pub data_file: String,
    #[serde(rename = "questionCount")]
    pub question_count: usize,
    #[serde(rename = "currentIndex")]
    pub current_index: i64,
    pub answers: BTreeMap<String, Answer>,
}

/// Result of a successful import.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionImport {
    pub answers: AnswerStore,
    /// Saved cursor clamped into bounds, then overridden to the first
    /// unanswered question when one exists.
    pub index: usize,
    /// Entries filtered out (unknown id or unrecognized value).
    pub dropped: usize,
    pub all_answered: bool,
}

/// Snapshot the answer store for export. Only ids present in the current
/// catalogue are included, protecting the document from malformed
/// in-memory state.
pub fn serialize_session(
    answers: &AnswerStore,
    current_index: usize,
    catalog: &Catalog,
    data_file: &str,
    generated_at: DateTime<Utc>,
) -> SessionDocument {
    let mut exported = BTreeMap::new();
    for q in catalog.questions() {
        if let Some(answer) = answers.get(&q.id) {
            exported.insert(q.id.clone(), *answer);
        }
    }
    SessionDocument {
        kind: SESSION_KIND.to_string(),
        version: SESSION_VERSION,
        generated_at,
        data_file: data_file.to_string(),
        question_count: catalog.len(),
        current_index: current_index as i64,
        answers: exported,
    }
}

/// Parse and validate a session document from JSON text.
pub fn import_session(json: &str, catalog: &Catalog) -> Result<SessionImport, FormatError> {
    let value: Value = serde_json::from_str(json)?;
    import_session_value(&value, catalog)
}

/// Validate an already-parsed document and restore the answer store.
pub fn import_session_value(
    value: &Value,
    catalog: &Catalog,
) -> Result<SessionImport, FormatError> {
    let obj = value.as_object().ok_or(FormatError::NotAnObject)?;

    let kind = obj.get("kind").and_then(Value::as_str).unwrap_or_default();
    if kind != SESSION_KIND {
        return Err(FormatError::WrongKind {
            found: kind.to_string(),
        });
    }

    let version = obj.get("version");
    if version.and_then(Value::as_u64) != Some(SESSION_VERSION) {
        return Err(FormatError::UnsupportedVersion {
            found: version.map(Value::to_string).unwrap_or_else(|| "none".into()),
            expected: SESSION_VERSION as u32,
        });
    }

    let saved_answers = obj
        .get("answers")
        .and_then(Value::as_object)
        .ok_or(FormatError::MissingAnswers)?;

    let id_set = catalog.id_set();
    let mut answers = AnswerStore::new();
    let mut dropped = 0usize;

    for (raw_id, raw_value) in saved_answers {
        let id = normalize_id(raw_id);
        if !id_set.contains(id) {
            dropped += 1;
            log::debug!("import: dropping unknown question id {raw_id:?}");
            continue;
        }
        let Some(answer) = raw_value.as_str().and_then(Answer::parse) else {
            dropped += 1;
            log::debug!("import: dropping unrecognized value {raw_value} for {id}");
            continue;
        };
        answers.insert(id.to_string(), answer);
    }

    let saved_index = obj
        .get("currentIndex")
        .and_then(Value::as_i64)
        .unwrap_or(0);
    let clamped = catalog.clamp_index(saved_index);

    // Resume-where-you-left-off beats the literal saved cursor.
    let first_unanswered = catalog
        .questions()
        .iter()
        .position(|q| !answers.contains_key(&q.id));
    let index = first_unanswered.unwrap_or(clamped);

    Ok(SessionImport {
        answers,
        index,
        dropped,
        all_answered: first_unanswered.is_none(),
    })
}

/// Trim a long-form answer key like `"GV.OC-01 - Organizational context"`
/// down to the bare question id.
fn normalize_id(raw: &str) -> &str {
    raw.split(" - ").next().unwrap_or(raw)
}
