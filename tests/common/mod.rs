//! Shared fixture builders for integration tests.
#![allow(dead_code)]

use gapmap::{Answer, AnswerStore, Catalog, Question};

/// A question with the given id and category label; the canonical key is
/// derived from the label's code part by the engine.
pub fn question(id: &str, category: &str, label: &str) -> Question {
    Question {
        id: id.to_string(),
        category: Some(category.to_string()),
        category_label: Some(label.to_string()),
        question: format!("Is control {id} in place?"),
        examples: Vec::new(),
        risk_text: None,
        improvement_hint: None,
    }
}

pub fn catalog(questions: Vec<Question>) -> Catalog {
    Catalog::new(questions).expect("non-empty catalogue")
}

pub fn answers(entries: &[(&str, Answer)]) -> AnswerStore {
    entries
        .iter()
        .map(|(id, answer)| (id.to_string(), *answer))
        .collect()
}

/// Two-category fixture: A (2 questions), B (1 question).
pub fn two_category_catalog() -> Catalog {
    catalog(vec![
        question("GV.AA-01", "GV.AA", "GV.AA (Category A)"),
        question("GV.AA-02", "GV.AA", "GV.AA (Category A)"),
        question("GV.BB-01", "GV.BB", "GV.BB (Category B)"),
    ])
}
