mod common;

use common::{answers, catalog, question, two_category_catalog};
use gapmap::{select_top_weak_categories, select_unassessed_categories, Answer};
use pretty_assertions::assert_eq;

#[test]
fn reference_scenario_splits_weak_and_unassessed() {
    // A: "2","4" -> avg 50; B: "na" -> unassessed
    let cat = two_category_catalog();
    let store = answers(&[
        ("GV.AA-01", Answer::Level2),
        ("GV.AA-02", Answer::Level4),
        ("GV.BB-01", Answer::NotApplicable),
    ]);

    let weak = select_top_weak_categories(cat.questions(), &store, 3);
    assert_eq!(weak.len(), 1);
    assert_eq!(weak[0].key, "GV.AA");

    let unassessed = select_unassessed_categories(cat.questions(), &store);
    assert_eq!(unassessed.len(), 1);
    assert_eq!(unassessed[0].key, "GV.BB");
}

#[test]
fn zero_answer_categories_never_rank_as_weak() {
    let cat = two_category_catalog();
    let store = answers(&[("GV.BB-01", Answer::NotApplicable)]);

    assert!(select_top_weak_categories(cat.questions(), &store, 3).is_empty());
    let unassessed = select_unassessed_categories(cat.questions(), &store);
    assert_eq!(unassessed.len(), 2);
    // first-appearance order, not alphabetical
    assert_eq!(unassessed[0].key, "GV.AA");
    assert_eq!(unassessed[1].key, "GV.BB");
}

#[test]
fn ranks_ascending_by_average_maturity() {
    let cat = catalog(vec![
        question("GV.AA-01", "GV.AA", "GV.AA (A)"),
        question("GV.BB-01", "GV.BB", "GV.BB (B)"),
        question("GV.CC-01", "GV.CC", "GV.CC (C)"),
    ]);
    let store = answers(&[
        ("GV.AA-01", Answer::Level4),
        ("GV.BB-01", Answer::Level1),
        ("GV.CC-01", Answer::Level2),
    ]);

    let weak = select_top_weak_categories(cat.questions(), &store, 3);
    let keys: Vec<&str> = weak.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, ["GV.BB", "GV.CC", "GV.AA"]);
}

#[test]
fn equal_maturity_ties_break_on_lower_coverage() {
    // Both categories average 25; B is under-sampled (1 of 2 answered).
    let cat = catalog(vec![
        question("ID.AA-01", "ID.AA", "ID.AA (A)"),
        question("ID.BB-01", "ID.BB", "ID.BB (B)"),
        question("ID.BB-02", "ID.BB", "ID.BB (B)"),
    ]);
    let store = answers(&[
        ("ID.AA-01", Answer::Level2),
        ("ID.BB-01", Answer::Level2),
    ]);

    let weak = select_top_weak_categories(cat.questions(), &store, 3);
    assert_eq!(weak[0].key, "ID.BB");
    assert_eq!(weak[0].coverage_pct, 50);
    assert_eq!(weak[1].key, "ID.AA");
}

#[test]
fn full_ties_break_on_category_code() {
    let cat = catalog(vec![
        question("PR.BB-01", "PR.BB", "PR.BB (B)"),
        question("PR.AA-01", "PR.AA", "PR.AA (A)"),
    ]);
    let store = answers(&[
        ("PR.BB-01", Answer::Level3),
        ("PR.AA-01", Answer::Level3),
    ]);

    let weak = select_top_weak_categories(cat.questions(), &store, 3);
    let keys: Vec<&str> = weak.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, ["PR.AA", "PR.BB"]);
}

#[test]
fn selection_is_deterministic_and_idempotent() {
    let cat = catalog(vec![
        question("RC.AA-01", "RC.AA", "RC.AA (A)"),
        question("RC.BB-01", "RC.BB", "RC.BB (B)"),
        question("RC.CC-01", "RC.CC", "RC.CC (C)"),
        question("RC.DD-01", "RC.DD", "RC.DD (D)"),
    ]);
    let store = answers(&[
        ("RC.AA-01", Answer::Level2),
        ("RC.BB-01", Answer::Level2),
        ("RC.CC-01", Answer::Level2),
        ("RC.DD-01", Answer::Level2),
    ]);

    let first = select_top_weak_categories(cat.questions(), &store, 3);
    let second = select_top_weak_categories(cat.questions(), &store, 3);
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
    let keys: Vec<&str> = first.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, ["RC.AA", "RC.BB", "RC.CC"]);
}

#[test]
fn takes_at_most_n() {
    let cat = catalog(vec![
        question("GV.AA-01", "GV.AA", "GV.AA (A)"),
        question("GV.BB-01", "GV.BB", "GV.BB (B)"),
        question("GV.CC-01", "GV.CC", "GV.CC (C)"),
    ]);
    let store = answers(&[
        ("GV.AA-01", Answer::Level1),
        ("GV.BB-01", Answer::Level2),
        ("GV.CC-01", Answer::Level3),
    ]);

    let weak = select_top_weak_categories(cat.questions(), &store, 2);
    assert_eq!(weak.len(), 2);
    assert_eq!(weak[0].key, "GV.AA");
}
