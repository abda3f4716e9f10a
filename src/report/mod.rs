//! Report assembly: overall summary, qualitative banding, detail
//! groupings, and the one-way result-export document.

use crate::core::{Answer, AnswerStore, CategoryStat, FunctionStat, Question};
use crate::priority::{select_top_weak_categories, select_unassessed_categories, DEFAULT_TOP_N};
use crate::scoring::{
    compute_function_stats, compute_radar_values, maturity_score, percentage, rounded_mean,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Reference framework line carried in the result export.
pub const REPORT_BASIS: &str = "NIST CSF 2.0 Subcategory (1:1)";

/// How many unassessed category labels the summary lists before falling
/// back to the true count.
const UNASSESSED_LABEL_LIMIT: usize = 12;

/// Qualitative maturity band for the overall score.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MaturityLevel {
    High,
    Adequate,
    NeedsImprovement,
    Urgent,
}

impl MaturityLevel {
    pub fn from_overall(overall: u32) -> Self {
        match overall {
            80.. => MaturityLevel::High,
            60..=79 => MaturityLevel::Adequate,
            40..=59 => MaturityLevel::NeedsImprovement,
            _ => MaturityLevel::Urgent,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MaturityLevel::High => "high",
            MaturityLevel::Adequate => "adequate",
            MaturityLevel::NeedsImprovement => "needs improvement",
            MaturityLevel::Urgent => "urgent",
        }
    }
}

/// Recommended next action. The four bands are mutually exclusive and
/// evaluated in this order: coverage first, then overall score.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    CloseCoverageGaps,
    EstablishBaseline,
    WidenPartialControls,
    ContinuousImprovement,
}

impl RecommendedAction {
    pub fn select(coverage_pct: u32, overall: u32) -> Self {
        if coverage_pct < 70 {
            RecommendedAction::CloseCoverageGaps
        } else if overall < 40 {
            RecommendedAction::EstablishBaseline
        } else if overall < 60 {
            RecommendedAction::WidenPartialControls
        } else {
            RecommendedAction::ContinuousImprovement
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            RecommendedAction::CloseCoverageGaps => {
                "Many items are still unassessed. Work with the owning teams to \
                 take stock of current practice and close the data-collection gaps first."
            }
            RecommendedAction::EstablishBaseline => {
                "Start with the highest-priority unaddressed areas and put minimum \
                 rules, responsibilities and operating procedures in place."
            }
            RecommendedAction::WidenPartialControls => {
                "Raise partially implemented controls to reliable coverage of their \
                 intended scope: clarify applicability, reduce exceptions, embed operation."
            }
            RecommendedAction::ContinuousImprovement => {
                "Prioritize the remaining low-maturity gaps and strengthen the \
                 continuous measure-review-improve loop."
            }
        }
    }
}

/// Answer distribution across the five levels plus not-assessed.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct LevelCounts {
    pub level5: usize,
    pub level4: usize,
    pub level3: usize,
    pub level2: usize,
    pub level1: usize,
    pub not_assessed: usize,
}

impl LevelCounts {
    fn record(&mut self, answer: Option<Answer>) {
        match answer.and_then(Answer::level) {
            Some(5) => self.level5 += 1,
            Some(4) => self.level4 += 1,
            Some(3) => self.level3 += 1,
            Some(2) => self.level2 += 1,
            Some(1) => self.level1 += 1,
            _ => self.not_assessed += 1,
        }
    }

    /// (label, count) rows in display order, highest level first.
    pub fn rows(&self) -> [(&'static str, usize); 6] {
        [
            (Answer::Level5.label(), self.level5),
            (Answer::Level4.label(), self.level4),
            (Answer::Level3.label(), self.level3),
            (Answer::Level2.label(), self.level2),
            (Answer::Level1.label(), self.level1),
            (Answer::NotApplicable.label(), self.not_assessed),
        ]
    }
}

/// Aggregate assessment summary, recomputed fresh from the answer store.
#[derive(Clone, Debug, Serialize)]
pub struct Summary {
    pub total: usize,
    pub scored: usize,
    pub unanswered: usize,
    pub counts: LevelCounts,
    pub coverage_pct: u32,
    pub overall: u32,
    pub level: MaturityLevel,
    pub weakest: FunctionStat,
    /// Up to three top-priority category labels.
    pub top_priority: Vec<String>,
    /// Up to twelve unassessed category labels; `unassessed_count` carries
    /// the true total.
    pub unassessed: Vec<String>,
    pub unassessed_count: usize,
    pub action: RecommendedAction,
}

impl Summary {
    /// Percentage of the question total, 0 when the catalogue is empty.
    pub fn pct_of_total(&self, n: usize) -> u32 {
        percentage(n, self.total)
    }
}

/// Build the summary from precomputed parts.
pub fn build_summary(
    function_stats: &[FunctionStat; 6],
    top_weak: &[CategoryStat],
    unassessed_cats: &[CategoryStat],
    questions: &[Question],
    answers: &AnswerStore,
) -> Summary {
    let total = questions.len();
    let mut counts = LevelCounts::default();
    let mut scored = 0usize;
    let mut score_sum = 0u32;

    for q in questions {
        let answer = answers.get(&q.id).copied();
        counts.record(answer);
        if let Some(score) = maturity_score(answer) {
            scored += 1;
            score_sum += score;
        }
    }

    let overall = rounded_mean(score_sum, scored);
    let coverage_pct = percentage(scored, total);

    Summary {
        total,
        scored,
        unanswered: counts.not_assessed,
        counts,
        coverage_pct,
        overall,
        level: MaturityLevel::from_overall(overall),
        weakest: weakest_function(function_stats),
        top_priority: top_weak
            .iter()
            .take(DEFAULT_TOP_N)
            .map(|c| c.label.clone())
            .collect(),
        unassessed: unassessed_cats
            .iter()
            .take(UNASSESSED_LABEL_LIMIT)
            .map(|c| c.label.clone())
            .collect(),
        unassessed_count: unassessed_cats.len(),
        action: RecommendedAction::select(coverage_pct, overall),
    }
}

/// Minimum-average function among those with answers; with no answers
/// anywhere, the minimum over all six (all 0, first in fixed order wins).
fn weakest_function(stats: &[FunctionStat; 6]) -> FunctionStat {
    let answered: Vec<FunctionStat> = stats
        .iter()
        .copied()
        .filter(|s| s.answered > 0)
        .collect();
    let base: &[FunctionStat] = if answered.is_empty() {
        stats.as_slice()
    } else {
        &answered
    };
    // min_by_key keeps the first of equal minima: ties break by fixed order
    base.iter()
        .copied()
        .min_by_key(|s| s.average_maturity)
        .unwrap_or(stats[0])
}

/// One item inside a detail grouping.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct GroupedItem {
    pub index: usize,
    pub id: String,
    pub answer: Option<Answer>,
}

/// A category's worth of detail-list items.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct CategoryGroup {
    pub key: String,
    pub label: String,
    pub items: Vec<GroupedItem>,
}

fn group_by_category<F>(
    questions: &[Question],
    answers: &AnswerStore,
    predicate: F,
) -> Vec<CategoryGroup>
where
    F: Fn(&Question, Option<Answer>) -> bool,
{
    let mut groups: Vec<CategoryGroup> = Vec::new();
    let mut index_of: BTreeMap<String, usize> = BTreeMap::new();

    for (idx, q) in questions.iter().enumerate() {
        let answer = answers.get(&q.id).copied();
        if !predicate(q, answer) {
            continue;
        }
        let key = q.category_key().to_string();
        let slot = *index_of.entry(key.clone()).or_insert_with(|| {
            groups.push(CategoryGroup {
                key,
                label: q.display_label().to_string(),
                items: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].items.push(GroupedItem {
            index: idx,
            id: q.id.clone(),
            answer,
        });
    }

    groups.sort_by(|a, b| {
        b.items
            .len()
            .cmp(&a.items.len())
            .then_with(|| a.key.cmp(&b.key))
    });
    groups
}

/// Scored items at or below `max_level`, grouped by category. Groups are
/// ordered by descending item count, then category key.
pub fn group_low_maturity(
    questions: &[Question],
    answers: &AnswerStore,
    max_level: u32,
) -> Vec<CategoryGroup> {
    group_by_category(questions, answers, |_, answer| {
        answer
            .and_then(Answer::level)
            .is_some_and(|level| level <= max_level)
    })
}

/// Unanswered or not-applicable items, grouped the same way.
pub fn group_unanswered(questions: &[Question], answers: &AnswerStore) -> Vec<CategoryGroup> {
    group_by_category(questions, answers, |_, answer| {
        maturity_score(answer).is_none()
    })
}

/// Radar axis entry in the export document.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct RadarEntry {
    #[serde(rename = "functionTag")]
    pub function_tag: &'static str,
    #[serde(rename = "functionLabel")]
    pub function_label: &'static str,
    pub value: u32,
}

/// Tied-lowest item reference inside a top-priority entry.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct LowestItemRef {
    pub id: String,
    pub answer: Answer,
}

/// Top-priority category entry in the export document.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct TopPriorityEntry {
    pub category: String,
    #[serde(rename = "categoryLabel")]
    pub category_label: String,
    #[serde(rename = "functionTag")]
    pub function_tag: String,
    #[serde(rename = "functionLabel")]
    pub function_label: String,
    #[serde(rename = "avgMaturity")]
    pub avg_maturity: Option<u32>,
    #[serde(rename = "coveragePct")]
    pub coverage_pct: u32,
    #[serde(rename = "lowestScore")]
    pub lowest_score: Option<u32>,
    #[serde(rename = "lowestItems")]
    pub lowest_items: Vec<LowestItemRef>,
}

/// Unassessed category entry in the export document.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct UnassessedEntry {
    pub category: String,
    #[serde(rename = "categoryLabel")]
    pub category_label: String,
    #[serde(rename = "functionTag")]
    pub function_tag: String,
    #[serde(rename = "functionLabel")]
    pub function_label: String,
}

/// The one-way result export. A terminal artifact: produced on demand,
/// never re-imported.
#[derive(Clone, Debug, Serialize)]
pub struct ReportDocument {
    #[serde(rename = "generatedAt")]
    pub generated_at: DateTime<Utc>,
    pub basis: &'static str,
    #[serde(rename = "maturityOverall")]
    pub maturity_overall: u32,
    #[serde(rename = "coveragePct")]
    pub coverage_pct: u32,
    pub radar: Vec<RadarEntry>,
    #[serde(rename = "topPriorities")]
    pub top_priorities: Vec<TopPriorityEntry>,
    #[serde(rename = "unassessedCategories")]
    pub unassessed_categories: Vec<UnassessedEntry>,
    pub answers: BTreeMap<String, Answer>,
}

/// The full recomputed report: human summary plus export document.
#[derive(Clone, Debug)]
pub struct AssessmentReport {
    pub summary: Summary,
    pub export: ReportDocument,
    pub function_stats: [FunctionStat; 6],
    pub top_weak: Vec<CategoryStat>,
    pub unassessed: Vec<CategoryStat>,
}

/// Recompute everything from (catalogue, answers). The only entry point
/// consumers need; called on every transition into review.
pub fn build_report(
    questions: &[Question],
    answers: &AnswerStore,
    generated_at: DateTime<Utc>,
) -> AssessmentReport {
    let function_stats = compute_function_stats(questions, answers);
    let radar_values = compute_radar_values(questions, answers);
    let top_weak = select_top_weak_categories(questions, answers, DEFAULT_TOP_N);
    let unassessed = select_unassessed_categories(questions, answers);
    let summary = build_summary(&function_stats, &top_weak, &unassessed, questions, answers);

    let radar = crate::core::FUNCTION_ORDER
        .iter()
        .enumerate()
        .map(|(i, f)| RadarEntry {
            function_tag: f.tag,
            function_label: f.label,
            value: radar_values[i],
        })
        .collect();

    let top_priorities = top_weak
        .iter()
        .map(|cat| TopPriorityEntry {
            category: cat.key.clone(),
            category_label: cat.label.clone(),
            function_tag: cat.function_tag.clone(),
            function_label: cat.function_label.clone(),
            avg_maturity: cat.average_maturity,
            coverage_pct: cat.coverage_pct,
            lowest_score: cat.min_score,
            lowest_items: cat
                .min_items
                .iter()
                .map(|item| LowestItemRef {
                    id: item.id.clone(),
                    answer: item.answer,
                })
                .collect(),
        })
        .collect();

    let unassessed_entries = unassessed
        .iter()
        .map(|cat| UnassessedEntry {
            category: cat.key.clone(),
            category_label: cat.label.clone(),
            function_tag: cat.function_tag.clone(),
            function_label: cat.function_label.clone(),
        })
        .collect();

    let export = ReportDocument {
        generated_at,
        basis: REPORT_BASIS,
        maturity_overall: summary.overall,
        coverage_pct: summary.coverage_pct,
        radar,
        top_priorities,
        unassessed_categories: unassessed_entries,
        answers: answers.clone(),
    };

    AssessmentReport {
        summary,
        export,
        function_stats,
        top_weak,
        unassessed,
    }
}
