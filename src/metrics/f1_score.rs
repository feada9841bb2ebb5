//! F1 Score calculation and per-label rate derivation.

use crate::metrics::precision_recall::{calculate_precision_recall, PrecisionRecall};
use serde::{Deserialize, Serialize};

/// Precision, recall and F1 derived from one set of counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rates {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

/// Calculate F1 score from precision and recall.
///
/// F1 = 2 × (Precision × Recall) / (Precision + Recall)
///
/// Returns 0.0 if both precision and recall are 0.
///
/// # Example
///
/// ```
/// use uibox_eval::metrics::f1_score::calculate_f1_score;
///
/// let f1 = calculate_f1_score(0.8, 0.6);
/// assert!((f1 - 0.6857).abs() < 0.001);
/// ```
pub fn calculate_f1_score(precision: f64, recall: f64) -> f64 {
    if !(precision + recall > 0.0) {
        return 0.0;
    }

    2.0 * (precision * recall) / (precision + recall)
}

/// Calculate F1 score from a PrecisionRecall struct.
pub fn calculate_f1_from_pr(pr: &PrecisionRecall) -> f64 {
    calculate_f1_score(pr.precision, pr.recall)
}

/// Derive precision, recall and F1 from TP, FP, and FN counts.
///
/// Precision and recall are computed first, each guarded against an empty
/// denominator; F1 is then taken from those two values, not from the counts.
///
/// # Example
///
/// ```
/// use uibox_eval::metrics::f1_score::derive_rates;
///
/// let rates = derive_rates(8, 2, 3);
/// assert!((rates.f1_score - 0.7619).abs() < 0.001);
///
/// let empty = derive_rates(0, 0, 0);
/// assert_eq!(empty.f1_score, 0.0);
/// ```
pub fn derive_rates(
    true_positives: usize,
    false_positives: usize,
    false_negatives: usize,
) -> Rates {
    let pr = calculate_precision_recall(true_positives, false_positives, false_negatives);
    Rates {
        precision: pr.precision,
        recall: pr.recall,
        f1_score: calculate_f1_from_pr(&pr),
    }
}
