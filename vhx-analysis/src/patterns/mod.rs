//! Recurring-defect pattern mining.
//!
//! Defect free text is categorized against an ordered keyword table,
//! first matching category wins (category-list order, not position in
//! the text). Categories recurring across the history become patterns.

use aho_corasick::AhoCorasick;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::normalize::NormalizedHistory;

/// Minimum occurrences for a category to become a pattern.
const MIN_PATTERN_OCCURRENCES: usize = 2;
/// Occurrences at which concern escalates to high.
const HIGH_CONCERN_OCCURRENCES: usize = 4;

/// Defect category, named after its primary keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectCategory {
    Brake,
    Tyre,
    Suspension,
    Lighting,
    Exhaust,
    Steering,
    Corrosion,
    Emission,
    Windscreen,
    Seatbelt,
    Horn,
    Mirror,
}

/// Keyword table, in priority order. "corrosion" and "rust" are two
/// spellings of the same category.
const KEYWORDS: [(&str, DefectCategory); 13] = [
    ("brake", DefectCategory::Brake),
    ("tyre", DefectCategory::Tyre),
    ("suspension", DefectCategory::Suspension),
    ("lighting", DefectCategory::Lighting),
    ("exhaust", DefectCategory::Exhaust),
    ("steering", DefectCategory::Steering),
    ("corrosion", DefectCategory::Corrosion),
    ("rust", DefectCategory::Corrosion),
    ("emission", DefectCategory::Emission),
    ("windscreen", DefectCategory::Windscreen),
    ("seatbelt", DefectCategory::Seatbelt),
    ("horn", DefectCategory::Horn),
    ("mirror", DefectCategory::Mirror),
];

/// How worried a buyer should be about a recurring category.
///
/// `Low` exists for completeness but is never emitted: any count that
/// clears the inclusion threshold already lands in `Medium` or `High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcernLevel {
    High,
    Medium,
    Low,
}

impl ConcernLevel {
    fn from_occurrences(occurrences: usize) -> Self {
        if occurrences >= HIGH_CONCERN_OCCURRENCES {
            Self::High
        } else if occurrences >= MIN_PATTERN_OCCURRENCES {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// A category that recurred across the history. Compute-once, read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailurePattern {
    pub category: DefectCategory,
    pub occurrences: usize,
    pub concern_level: ConcernLevel,
}

/// Keyword-driven defect categorizer and tally.
#[derive(Debug, Clone)]
pub struct DefectPatternMiner {
    automaton: AhoCorasick,
}

impl Default for DefectPatternMiner {
    fn default() -> Self {
        Self::new()
    }
}

impl DefectPatternMiner {
    pub fn new() -> Self {
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(KEYWORDS.iter().map(|(kw, _)| *kw))
            .expect("keyword table is a valid pattern set");
        Self { automaton }
    }

    /// Categorize one defect description. The winning category is the
    /// earliest entry of the keyword table found anywhere in the text;
    /// text matching no keyword is excluded from mining.
    pub fn categorize(&self, text: &str) -> Option<DefectCategory> {
        self.automaton
            .find_overlapping_iter(text)
            .map(|m| m.pattern().as_usize())
            .min()
            .map(|idx| KEYWORDS[idx].1)
    }

    /// Mine recurring categories across the whole history, ordered by
    /// descending occurrence count.
    pub fn mine(&self, history: &NormalizedHistory) -> Vec<FailurePattern> {
        let mut counts: FxHashMap<DefectCategory, usize> = FxHashMap::default();
        for record in history.records() {
            for defect in &record.defects {
                if let Some(category) = self.categorize(&defect.text) {
                    *counts.entry(category).or_insert(0) += 1;
                }
            }
        }

        let mut patterns: Vec<FailurePattern> = counts
            .into_iter()
            .filter(|(_, occurrences)| *occurrences >= MIN_PATTERN_OCCURRENCES)
            .map(|(category, occurrences)| FailurePattern {
                category,
                occurrences,
                concern_level: ConcernLevel::from_occurrences(occurrences),
            })
            .collect();

        patterns.sort_by(|a, b| {
            b.occurrences
                .cmp(&a.occurrences)
                .then(a.category.cmp(&b.category))
        });
        patterns
    }
}
