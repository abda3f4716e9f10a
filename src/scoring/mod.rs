//! Pure scoring and aggregation over (catalogue, answer store).
//!
//! Every function here recomputes from scratch: derived statistics are a
//! pure function of the inputs at read time and are never cached across
//! answer mutations.

use crate::catalog::category_code;
use crate::core::{
    function_label, Answer, AnswerStore, CategoryStat, FunctionStat, LowItem, Question,
    FUNCTION_ORDER,
};
use std::collections::HashMap;

/// Maturity score of an answer slot; absent and "na" both have no value.
pub fn maturity_score(answer: Option<Answer>) -> Option<u32> {
    answer.and_then(Answer::maturity)
}

/// Round-half-up mean, applied once to the raw sum. Downstream tie-breaks
/// operate on this already-rounded value to stay consistent with what is
/// displayed.
pub(crate) fn rounded_mean(sum: u32, count: usize) -> u32 {
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as u32
}

/// `round(part/whole*100)`, 0 when the scope is empty.
pub(crate) fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

struct CategoryBucket {
    key: String,
    label: String,
    function_tag: String,
    first_index: usize,
    total: usize,
    answered: usize,
    sum: u32,
    min_score: Option<u32>,
    min_items: Vec<LowItem>,
}

/// Aggregate per category key, bucketed in a single pass and emitted in
/// first-appearance order (stable, not alphabetical), so results are
/// deterministic run-to-run given the same catalogue ordering.
pub fn compute_category_stats(questions: &[Question], answers: &AnswerStore) -> Vec<CategoryStat> {
    let mut order: Vec<CategoryBucket> = Vec::new();
    let mut index_of: HashMap<String, usize> = HashMap::new();

    for (idx, q) in questions.iter().enumerate() {
        let key = q.category_key();
        let slot = *index_of.entry(key.to_string()).or_insert_with(|| {
            order.push(CategoryBucket {
                key: key.to_string(),
                label: q.display_label().to_string(),
                function_tag: q.function_tag().to_string(),
                first_index: idx,
                total: 0,
                answered: 0,
                sum: 0,
                min_score: None,
                min_items: Vec::new(),
            });
            order.len() - 1
        });

        let bucket = &mut order[slot];
        bucket.total += 1;

        let answer = answers.get(&q.id).copied();
        let Some(score) = maturity_score(answer) else {
            continue;
        };
        bucket.answered += 1;
        bucket.sum += score;

        let item = LowItem {
            index: idx,
            id: q.id.clone(),
            // maturity_score above guarantees the slot is occupied
            answer: answer.unwrap_or(Answer::NotApplicable),
            score,
        };
        match bucket.min_score {
            None => {
                bucket.min_score = Some(score);
                bucket.min_items = vec![item];
            }
            Some(min) if score < min => {
                bucket.min_score = Some(score);
                bucket.min_items = vec![item];
            }
            Some(min) if score == min => bucket.min_items.push(item),
            Some(_) => {}
        }
    }

    order
        .into_iter()
        .map(|b| {
            let split = crate::catalog::split_category_label(&b.label);
            let name = if split.name.is_empty() {
                b.label.clone()
            } else {
                split.name
            };
            CategoryStat {
                code: category_code(&b.key, &b.label),
                name,
                function_label: function_label(&b.function_tag).to_string(),
                average_maturity: if b.answered > 0 {
                    Some(rounded_mean(b.sum, b.answered))
                } else {
                    None
                },
                coverage_pct: percentage(b.answered, b.total),
                key: b.key,
                label: b.label,
                function_tag: b.function_tag,
                first_index: b.first_index,
                total: b.total,
                answered: b.answered,
                min_score: b.min_score,
                min_items: b.min_items,
            }
        })
        .collect()
}

/// Aggregate per fixed function tag, always exactly six entries in fixed
/// order. Questions with an unmapped id prefix are excluded here (they
/// still count in category stats).
pub fn compute_function_stats(questions: &[Question], answers: &AnswerStore) -> [FunctionStat; 6] {
    let mut totals = [0usize; 6];
    let mut answered = [0usize; 6];
    let mut sums = [0u32; 6];

    for q in questions {
        let Some(slot) = FUNCTION_ORDER
            .iter()
            .position(|f| f.tag == q.function_tag())
        else {
            continue;
        };
        totals[slot] += 1;
        if let Some(score) = maturity_score(answers.get(&q.id).copied()) {
            answered[slot] += 1;
            sums[slot] += score;
        }
    }

    let mut out = [FunctionStat {
        tag: "",
        label: "",
        total: 0,
        answered: 0,
        coverage_pct: 0,
        average_maturity: 0,
    }; 6];
    for (i, f) in FUNCTION_ORDER.iter().enumerate() {
        out[i] = FunctionStat {
            tag: f.tag,
            label: f.label,
            total: totals[i],
            answered: answered[i],
            coverage_pct: percentage(answered[i], totals[i]),
            average_maturity: rounded_mean(sums[i], answered[i]),
        };
    }
    out
}

/// Radar axis values: one integer in [0, 100] per function in fixed order,
/// the rounded mean of the function's scored maturities (0 when none).
pub fn compute_radar_values(questions: &[Question], answers: &AnswerStore) -> [u32; 6] {
    let stats = compute_function_stats(questions, answers);
    let mut values = [0u32; 6];
    for (i, s) in stats.iter().enumerate() {
        values[i] = s.average_maturity;
    }
    values
}
