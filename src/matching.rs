//! Assignment of predictions to ground-truth annotations.

use crate::metrics::iou::calculate_iou;
use crate::types::{Annotation, Label};
use pathfinding::kuhn_munkres::kuhn_munkres;
use pathfinding::matrix::Matrix;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Fixed-point scale for IoU weights fed to the assignment solver.
const IOU_WEIGHT_SCALE: f64 = 1_000_000.0;

/// How predictions are assigned to ground-truth annotations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingStrategy {
    /// Each ground-truth box, in input order, claims its best unclaimed
    /// prediction. Earlier ground truth gets first choice.
    #[default]
    Greedy,
    /// Per label, the one-to-one assignment maximizing total IoU.
    OptimalBipartite,
}

impl MatchingStrategy {
    /// Run this strategy over one pair of annotation sets.
    pub fn assign(
        self,
        ground_truths: &[Annotation],
        predictions: &[Annotation],
        iou_threshold: f64,
    ) -> MatchResult {
        match self {
            MatchingStrategy::Greedy => greedy_match(ground_truths, predictions, iou_threshold),
            MatchingStrategy::OptimalBipartite => {
                optimal_match(ground_truths, predictions, iou_threshold)
            }
        }
    }
}

/// A ground-truth box paired with the prediction it claimed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    pub prediction_index: usize,
    pub iou: f64,
}

/// Outcome of matching one image's annotations.
///
/// `matches[i]` belongs to ground-truth index `i`. A prediction index appears
/// in at most one match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub matches: Vec<Option<Match>>,
    claimed: HashSet<usize>,
    num_predictions: usize,
}

impl MatchResult {
    /// Whether a prediction was claimed by some ground-truth box.
    pub fn is_claimed(&self, prediction_index: usize) -> bool {
        self.claimed.contains(&prediction_index)
    }

    /// Prediction indices never claimed, in ascending order.
    pub fn unclaimed_predictions(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.num_predictions).filter(move |idx| !self.claimed.contains(idx))
    }

    /// Number of matched ground-truth boxes.
    pub fn num_matched(&self) -> usize {
        self.matches.iter().filter(|m| m.is_some()).count()
    }
}

/// Match predictions to ground truth with the given strategy.
///
/// Only predictions with the same label as a ground-truth box are
/// candidates for it. A pair counts as a match when its IoU is at least
/// `iou_threshold`; pairs with zero overlap never match.
///
/// # Example
///
/// ```
/// use uibox_eval::matching::{match_annotations, MatchingStrategy};
/// use uibox_eval::types::{Annotation, Label};
///
/// let gt = vec![Annotation::new(0.0, 0.0, 100.0, 50.0, Label::Button)];
/// let preds = vec![Annotation::new(0.0, 0.0, 100.0, 50.0, Label::Button)];
///
/// let result = match_annotations(&gt, &preds, 0.5, MatchingStrategy::Greedy);
/// assert_eq!(result.matches[0].unwrap().prediction_index, 0);
/// ```
pub fn match_annotations(
    ground_truths: &[Annotation],
    predictions: &[Annotation],
    iou_threshold: f64,
    strategy: MatchingStrategy,
) -> MatchResult {
    strategy.assign(ground_truths, predictions, iou_threshold)
}

/// Greedy per-ground-truth matching.
///
/// Ground truth is processed in input order. For each box, the unclaimed
/// same-label prediction with the strictly greatest IoU is selected, so ties
/// go to the earliest prediction index. The selection is kept only when its
/// IoU reaches the threshold; otherwise the ground-truth box stays unmatched.
fn greedy_match(
    ground_truths: &[Annotation],
    predictions: &[Annotation],
    iou_threshold: f64,
) -> MatchResult {
    let mut claimed: HashSet<usize> = HashSet::new();
    let mut matches = Vec::with_capacity(ground_truths.len());

    for gt in ground_truths {
        let mut best_iou = 0.0;
        let mut best_pred_idx: Option<usize> = None;

        for (pred_idx, pred) in predictions.iter().enumerate() {
            if pred.label != gt.label || claimed.contains(&pred_idx) {
                continue;
            }

            let iou = calculate_iou(&gt.bbox, &pred.bbox);
            if iou > best_iou {
                best_iou = iou;
                best_pred_idx = Some(pred_idx);
            }
        }

        let matched = match best_pred_idx {
            Some(pred_idx) if best_iou >= iou_threshold => {
                claimed.insert(pred_idx);
                Some(Match {
                    prediction_index: pred_idx,
                    iou: best_iou,
                })
            }
            _ => None,
        };
        matches.push(matched);
    }

    MatchResult {
        matches,
        claimed,
        num_predictions: predictions.len(),
    }
}

/// Maximum-weight bipartite matching, solved independently per label.
fn optimal_match(
    ground_truths: &[Annotation],
    predictions: &[Annotation],
    iou_threshold: f64,
) -> MatchResult {
    let mut claimed: HashSet<usize> = HashSet::new();
    let mut matches = vec![None; ground_truths.len()];

    let accepts = |iou: f64| iou > 0.0 && iou >= iou_threshold;

    for label in Label::ALL {
        let gt_indices = indices_with_label(ground_truths, label);
        let pred_indices = indices_with_label(predictions, label);

        if gt_indices.is_empty() || pred_indices.is_empty() {
            continue;
        }

        // Square matrix padded with zero-weight dummies
        let size = gt_indices.len().max(pred_indices.len());
        let mut weights = Matrix::new(size, size, 0i64);
        for (row, &gt_idx) in gt_indices.iter().enumerate() {
            for (col, &pred_idx) in pred_indices.iter().enumerate() {
                let iou = calculate_iou(&ground_truths[gt_idx].bbox, &predictions[pred_idx].bbox);
                if accepts(iou) {
                    weights[(row, col)] = (iou * IOU_WEIGHT_SCALE).round() as i64;
                }
            }
        }

        let (_, assignment) = kuhn_munkres(&weights);

        for (row, &col) in assignment.iter().enumerate().take(gt_indices.len()) {
            if col >= pred_indices.len() {
                continue;
            }

            let (gt_idx, pred_idx) = (gt_indices[row], pred_indices[col]);
            let iou = calculate_iou(&ground_truths[gt_idx].bbox, &predictions[pred_idx].bbox);
            if accepts(iou) {
                claimed.insert(pred_idx);
                matches[gt_idx] = Some(Match {
                    prediction_index: pred_idx,
                    iou,
                });
            }
        }
    }

    MatchResult {
        matches,
        claimed,
        num_predictions: predictions.len(),
    }
}

fn indices_with_label(annotations: &[Annotation], label: Label) -> Vec<usize> {
    annotations
        .iter()
        .enumerate()
        .filter(|(_, ann)| ann.label == label)
        .map(|(idx, _)| idx)
        .collect()
}
