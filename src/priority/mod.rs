//! Remediation priority selection over category statistics.
//!
//! A pure filter -> sort -> limit pipeline: categories with at least one
//! scored answer are ranked by weakness; categories with none are reported
//! separately as unassessed (they cannot be judged "weak").

use crate::core::{AnswerStore, CategoryStat, Question};
use crate::scoring::compute_category_stats;
use std::cmp::Ordering;

/// Default size of the top-priority list.
pub const DEFAULT_TOP_N: usize = 3;

/// Weakness ordering: ascending average maturity, then ascending coverage
/// (an equally weak but under-sampled category surfaces first), then
/// lexicographic category code for full determinism.
fn weakness_order(a: &CategoryStat, b: &CategoryStat) -> Ordering {
    a.average_maturity
        .cmp(&b.average_maturity)
        .then(a.coverage_pct.cmp(&b.coverage_pct))
        .then_with(|| a.code.cmp(&b.code))
}

/// Top `n` weakest categories among those with at least one scored answer.
pub fn select_top_weak_categories(
    questions: &[Question],
    answers: &AnswerStore,
    n: usize,
) -> Vec<CategoryStat> {
    let mut evaluated: Vec<CategoryStat> = compute_category_stats(questions, answers)
        .into_iter()
        .filter(|s| s.answered > 0 && s.average_maturity.is_some())
        .collect();
    evaluated.sort_by(weakness_order);
    evaluated.truncate(n);
    evaluated
}

/// Categories with no scored answer, in first-appearance order.
pub fn select_unassessed_categories(
    questions: &[Question],
    answers: &AnswerStore,
) -> Vec<CategoryStat> {
    compute_category_stats(questions, answers)
        .into_iter()
        .filter(|s| s.answered == 0)
        .collect()
}
