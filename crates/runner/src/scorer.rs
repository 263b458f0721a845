//! Accuracy of extracted pairs against the ground-truth annotation

use lawabbr_core::AbbrPair;
use std::fmt;

/// Counts contributed by a single dataset item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemScore {
    pub ground_truth: usize,
    pub abbr_correct: usize,
    pub formal_correct: usize,
}

/// Compare one item's extracted pairs with its ground truth.
///
/// Ground-truth pairs with an empty abbreviation are ignored. Each remaining
/// abbreviation is matched against the first extracted pair with exactly the
/// same `abbr`; the formal name only counts when that first match also has
/// the same `formal`.
pub fn score_item(ground_truth: &[AbbrPair], extracted: &[AbbrPair]) -> ItemScore {
    let mut score = ItemScore::default();

    for expected in ground_truth.iter().filter(|p| !p.abbr.is_empty()) {
        score.ground_truth += 1;

        if let Some(found) = extracted.iter().find(|p| p.abbr == expected.abbr) {
            score.abbr_correct += 1;
            if found.formal == expected.formal {
                score.formal_correct += 1;
            }
        }
    }

    score
}

/// Run-wide counters, rebuilt from scratch on every run
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    abbr_ground_truth_total: usize,
    abbr_correct: usize,
    formal_correct: usize,
}

impl Scorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one item's comparison to the totals
    pub fn record_item(&mut self, ground_truth: &[AbbrPair], extracted: &[AbbrPair]) -> ItemScore {
        let score = score_item(ground_truth, extracted);
        self.abbr_ground_truth_total += score.ground_truth;
        self.abbr_correct += score.abbr_correct;
        self.formal_correct += score.formal_correct;

        debug_assert!(self.formal_correct <= self.abbr_correct);
        debug_assert!(self.abbr_correct <= self.abbr_ground_truth_total);
        score
    }

    pub fn abbr_ground_truth_total(&self) -> usize {
        self.abbr_ground_truth_total
    }

    pub fn abbr_correct(&self) -> usize {
        self.abbr_correct
    }

    pub fn formal_correct(&self) -> usize {
        self.formal_correct
    }

    pub fn report(&self) -> AccuracyReport {
        AccuracyReport {
            abbr_ground_truth_total: self.abbr_ground_truth_total,
            abbr_correct: self.abbr_correct,
            formal_correct: self.formal_correct,
        }
    }
}

/// Final counts and the two accuracy ratios derived from them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccuracyReport {
    pub abbr_ground_truth_total: usize,
    pub abbr_correct: usize,
    pub formal_correct: usize,
}

impl AccuracyReport {
    /// Share of ground-truth abbreviations that were extracted.
    /// `None` when no ground-truth abbreviation was seen.
    pub fn abbr_accuracy(&self) -> Option<f64> {
        if self.abbr_ground_truth_total == 0 {
            None
        } else {
            Some(self.abbr_correct as f64 / self.abbr_ground_truth_total as f64)
        }
    }

    /// Share of matched abbreviations whose formal name also matched.
    /// Exactly `0.0` when nothing matched.
    pub fn formal_accuracy(&self) -> f64 {
        if self.abbr_correct == 0 {
            0.0
        } else {
            self.formal_correct as f64 / self.abbr_correct as f64
        }
    }
}

impl fmt::Display for AccuracyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(abbr_accuracy) = self.abbr_accuracy() else {
            return write!(
                f,
                "Warning: no ground-truth abbreviations were found; accuracy cannot be computed."
            );
        };

        writeln!(f, "----- Accuracy -----")?;
        writeln!(
            f,
            "Abbreviations extracted correctly: {abbr_accuracy:.3} ({}/{})",
            self.abbr_correct, self.abbr_ground_truth_total
        )?;
        write!(
            f,
            "Formal names correct among matched abbreviations: {:.3} ({}/{})",
            self.formal_accuracy(),
            self.formal_correct,
            self.abbr_correct.max(1)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pair(formal: &str, abbr: &str) -> AbbrPair {
        AbbrPair::new(formal, abbr)
    }

    #[test]
    fn test_first_match_wins() {
        let score = score_item(&[pair("X", "Y")], &[pair("Z", "Y"), pair("X", "Y")]);
        assert_eq!(
            score,
            ItemScore {
                ground_truth: 1,
                abbr_correct: 1,
                formal_correct: 0,
            }
        );
    }

    #[test]
    fn test_empty_abbr_skipped() {
        let score = score_item(&[pair("X", "")], &[pair("X", "")]);
        assert_eq!(score, ItemScore::default());
    }

    #[test]
    fn test_full_miss() {
        let score = score_item(&[pair("X", "Y")], &[]);
        assert_eq!(
            score,
            ItemScore {
                ground_truth: 1,
                abbr_correct: 0,
                formal_correct: 0,
            }
        );
    }

    #[test]
    fn test_exact_match_counts_both() {
        let score = score_item(&[pair("X", "Y"), pair("P", "Q")], &[pair("P", "Q"), pair("X", "Y")]);
        assert_eq!(score.abbr_correct, 2);
        assert_eq!(score.formal_correct, 2);
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let score = score_item(&[pair("Act", "ACT")], &[pair("Act", "Act")]);
        assert_eq!(score.abbr_correct, 0);
    }

    #[test]
    fn test_one_extracted_pair_can_match_several_ground_truths() {
        let score = score_item(&[pair("X", "Y"), pair("X", "Y")], &[pair("X", "Y")]);
        assert_eq!(score.ground_truth, 2);
        assert_eq!(score.abbr_correct, 2);
    }

    #[test]
    fn test_scorer_accumulates() {
        let mut scorer = Scorer::new();
        scorer.record_item(&[pair("X", "Y")], &[pair("X", "Y")]);
        scorer.record_item(&[pair("A", "B"), pair("C", "")], &[pair("Z", "B")]);
        scorer.record_item(&[pair("M", "N")], &[]);

        assert_eq!(scorer.abbr_ground_truth_total(), 3);
        assert_eq!(scorer.abbr_correct(), 2);
        assert_eq!(scorer.formal_correct(), 1);
    }

    #[test]
    fn test_report_ratios() {
        let report = AccuracyReport {
            abbr_ground_truth_total: 4,
            abbr_correct: 3,
            formal_correct: 2,
        };
        assert_eq!(report.abbr_accuracy(), Some(0.75));
        assert!((report.formal_accuracy() - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_ground_truth_cannot_be_computed() {
        let report = Scorer::new().report();
        assert_eq!(report.abbr_accuracy(), None);
        assert_eq!(report.formal_accuracy(), 0.0);
        assert!(report.to_string().contains("cannot be computed"));
    }

    #[test]
    fn test_formal_accuracy_zero_without_matches() {
        let report = AccuracyReport {
            abbr_ground_truth_total: 2,
            abbr_correct: 0,
            formal_correct: 0,
        };
        assert_eq!(report.abbr_accuracy(), Some(0.0));
        assert_eq!(report.formal_accuracy(), 0.0);
        assert!(report.to_string().contains("0.000 (0/1)"));
    }

    #[test]
    fn test_report_display() {
        let report = AccuracyReport {
            abbr_ground_truth_total: 4,
            abbr_correct: 3,
            formal_correct: 2,
        };
        let text = report.to_string();
        assert!(text.contains("Abbreviations extracted correctly: 0.750 (3/4)"));
        assert!(text.contains("Formal names correct among matched abbreviations: 0.667 (2/3)"));
    }
}
