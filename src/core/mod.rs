use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Mutable per-session answer state, keyed by question id.
///
/// A missing key and [`Answer::NotApplicable`] mean the same thing: the
/// question is not scored.
pub type AnswerStore = BTreeMap<String, Answer>;

/// A single answer on the five-level scale, or "not applicable".
///
/// This is a closed set: any other input string fails to parse and is
/// handled at the boundary that received it, never inside scoring.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Answer {
    #[serde(rename = "1")]
    Level1,
    #[serde(rename = "2")]
    Level2,
    #[serde(rename = "3")]
    Level3,
    #[serde(rename = "4")]
    Level4,
    #[serde(rename = "5")]
    Level5,
    #[serde(rename = "na")]
    NotApplicable,
}

impl Answer {
    /// All recognized wire symbols, in scale order.
    pub const ALL: [Answer; 6] = [
        Answer::Level1,
        Answer::Level2,
        Answer::Level3,
        Answer::Level4,
        Answer::Level5,
        Answer::NotApplicable,
    ];

    /// Parse a wire symbol. Fails closed for anything outside the six-symbol set.
    pub fn parse(s: &str) -> Option<Answer> {
        match s {
            "1" => Some(Answer::Level1),
            "2" => Some(Answer::Level2),
            "3" => Some(Answer::Level3),
            "4" => Some(Answer::Level4),
            "5" => Some(Answer::Level5),
            "na" => Some(Answer::NotApplicable),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Answer::Level1 => "1",
            Answer::Level2 => "2",
            Answer::Level3 => "3",
            Answer::Level4 => "4",
            Answer::Level5 => "5",
            Answer::NotApplicable => "na",
        }
    }

    /// Scale level 1..=5, or `None` for "not applicable".
    pub fn level(self) -> Option<u32> {
        match self {
            Answer::Level1 => Some(1),
            Answer::Level2 => Some(2),
            Answer::Level3 => Some(3),
            Answer::Level4 => Some(4),
            Answer::Level5 => Some(5),
            Answer::NotApplicable => None,
        }
    }

    /// Maturity score on the 0-100 scale. `NotApplicable` has no score and
    /// is excluded from every average, never coerced to 0.
    pub fn maturity(self) -> Option<u32> {
        self.level().map(|l| (l - 1) * 25)
    }

    pub fn is_scored(self) -> bool {
        self.level().is_some()
    }

    /// Human label for result listings.
    pub fn label(self) -> &'static str {
        match self {
            Answer::Level5 => "5: established",
            Answer::Level4 => "4: mostly implemented",
            Answer::Level3 => "3: partially implemented",
            Answer::Level2 => "2: in preparation",
            Answer::Level1 => "1: not implemented",
            Answer::NotApplicable => "not assessed",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the six top-level control functions, in fixed display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Function {
    pub tag: &'static str,
    pub label: &'static str,
}

/// Fixed function order. Radar values and function stats are emitted in
/// exactly this order.
pub const FUNCTION_ORDER: [Function; 6] = [
    Function { tag: "GV", label: "Govern" },
    Function { tag: "ID", label: "Identify" },
    Function { tag: "PR", label: "Protect" },
    Function { tag: "DE", label: "Detect" },
    Function { tag: "RS", label: "Respond" },
    Function { tag: "RC", label: "Recover" },
];

/// Function tag of a question id: the substring before the first `.`.
/// Ids without a `.` yield the whole id, accepted literally as an
/// unmapped tag.
pub fn function_tag(id: &str) -> &str {
    id.split('.').next().unwrap_or(id)
}

/// Display label for a function tag; unmapped tags fall back to the tag.
pub fn function_label(tag: &str) -> &str {
    FUNCTION_ORDER
        .iter()
        .find(|f| f.tag == tag)
        .map(|f| f.label)
        .unwrap_or(tag)
}

/// An illustrative entry attached to a question.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExampleEntry {
    #[serde(default, rename = "implementationExample")]
    pub code: Option<String>,
    #[serde(default, alias = "text_ja")]
    pub text: Option<String>,
}

/// One assessable control statement, loaded from the catalogue and never
/// mutated afterwards.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "category_label", alias = "category_ja")]
    pub category_label: Option<String>,
    pub question: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<ExampleEntry>,
    #[serde(default, rename = "riskText", skip_serializing_if = "Option::is_none")]
    pub risk_text: Option<String>,
    #[serde(
        default,
        rename = "improvementHint",
        skip_serializing_if = "Option::is_none"
    )]
    pub improvement_hint: Option<String>,
}

impl Question {
    /// Canonical category key: the canonical field, falling back to the
    /// display label when absent.
    pub fn category_key(&self) -> &str {
        self.category
            .as_deref()
            .or(self.category_label.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("UNKNOWN_CATEGORY")
    }

    /// Display label, falling back to the canonical key.
    pub fn display_label(&self) -> &str {
        self.category_label
            .as_deref()
            .or(self.category.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("Uncategorized")
    }

    pub fn function_tag(&self) -> &str {
        function_tag(&self.id)
    }
}

/// A question tied at a category's minimum scored value.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct LowItem {
    pub index: usize,
    pub id: String,
    pub answer: Answer,
    pub score: u32,
}

/// Per-category aggregate, rebuilt on demand and never persisted.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct CategoryStat {
    pub key: String,
    pub label: String,
    /// Short display code, e.g. "PR.AT"; full key when no code is present.
    pub code: String,
    /// Display name with the code prefix stripped.
    pub name: String,
    pub function_tag: String,
    pub function_label: String,
    /// Index of the category's first question in catalogue order.
    pub first_index: usize,
    pub total: usize,
    pub answered: usize,
    pub coverage_pct: u32,
    /// Rounded mean of scored maturities; `None` when nothing is scored.
    pub average_maturity: Option<u32>,
    pub min_score: Option<u32>,
    /// Every question tied at `min_score`, not just one.
    pub min_items: Vec<LowItem>,
}

/// Per-function aggregate. Unlike categories, a function with no scored
/// answers reports average 0 rather than `None`: every function has a
/// fixed, non-zero question total.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct FunctionStat {
    pub tag: &'static str,
    pub label: &'static str,
    pub total: usize,
    pub answered: usize,
    pub coverage_pct: u32,
    pub average_maturity: u32,
}
