//! Evaluation entry points: matching followed by per-label aggregation.

use crate::error::Result;
use crate::matching::{match_annotations, MatchResult, MatchingStrategy};
use crate::threshold::validate_threshold;
use crate::types::{Annotation, EvaluationConfig, EvaluationResult, Label, Metrics};

/// Evaluate predicted annotations against ground truth for one image.
///
/// Uses greedy matching. `iou_threshold` defaults to 0.5.
///
/// # Errors
///
/// Fails with `InvalidBox` when any box has a negative dimension or a
/// non-finite coordinate, and with `InvalidThreshold` when the threshold is
/// outside [0.0, 1.0]. Both checks are stricter than plain matching: a
/// threshold above 1.0 is an error here rather than matching nothing, and
/// malformed boxes are rejected rather than scored.
///
/// # Example
///
/// ```
/// use uibox_eval::evaluator::evaluate;
/// use uibox_eval::types::{Annotation, Label};
///
/// let gt = vec![Annotation::new(0.0, 0.0, 100.0, 50.0, Label::Button)];
/// let preds = vec![Annotation::new(0.0, 0.0, 100.0, 50.0, Label::Button)];
///
/// let result = evaluate(&gt, &preds, None).unwrap();
/// assert_eq!(result.get(Label::Button).f1_score, 1.0);
/// ```
pub fn evaluate(
    ground_truth: &[Annotation],
    predictions: &[Annotation],
    iou_threshold: Option<f64>,
) -> Result<EvaluationResult> {
    let config = EvaluationConfig::with_threshold(
        iou_threshold.unwrap_or(EvaluationConfig::DEFAULT_IOU_THRESHOLD),
    );
    evaluate_with_config(ground_truth, predictions, &config)
}

/// Evaluate with an explicit configuration (threshold and matching strategy).
pub fn evaluate_with_config(
    ground_truth: &[Annotation],
    predictions: &[Annotation],
    config: &EvaluationConfig,
) -> Result<EvaluationResult> {
    validate_threshold(config.iou_threshold)?;
    validate_annotations(ground_truth, "ground truth")?;
    validate_annotations(predictions, "prediction")?;

    let matches = match_annotations(
        ground_truth,
        predictions,
        config.iou_threshold,
        config.strategy,
    );
    let result = aggregate(ground_truth, predictions, &matches);

    let overall = result.overall();
    log::debug!(
        "evaluated {} ground truth / {} predictions at IoU {} ({:?}): tp={} fp={} fn={}",
        ground_truth.len(),
        predictions.len(),
        config.iou_threshold,
        config.strategy,
        overall.true_positives,
        overall.false_positives,
        overall.false_negatives,
    );

    Ok(result)
}

/// Evaluate at several IoU thresholds, one result per threshold.
///
/// Inputs are validated once; every threshold must be in [0.0, 1.0].
pub fn evaluate_at_thresholds(
    ground_truth: &[Annotation],
    predictions: &[Annotation],
    iou_thresholds: &[f64],
    strategy: MatchingStrategy,
) -> Result<Vec<(f64, EvaluationResult)>> {
    for &threshold in iou_thresholds {
        validate_threshold(threshold)?;
    }
    validate_annotations(ground_truth, "ground truth")?;
    validate_annotations(predictions, "prediction")?;

    Ok(iou_thresholds
        .iter()
        .map(|&threshold| {
            let matches = match_annotations(ground_truth, predictions, threshold, strategy);
            (threshold, aggregate(ground_truth, predictions, &matches))
        })
        .collect())
}

/// Tally a match result into per-label metrics.
///
/// Every label starts at zero. Each ground-truth box adds a true positive
/// or a false negative under its label; each unclaimed prediction adds a
/// false positive under its own label. Rates are derived last.
pub fn aggregate(
    ground_truth: &[Annotation],
    predictions: &[Annotation],
    matches: &MatchResult,
) -> EvaluationResult {
    // (tp, fp, fn) per label
    let mut counts = [(0usize, 0usize, 0usize); Label::COUNT];

    for (gt, matched) in ground_truth.iter().zip(&matches.matches) {
        let entry = &mut counts[gt.label.index()];
        if matched.is_some() {
            entry.0 += 1;
        } else {
            entry.2 += 1;
        }
    }

    for pred_idx in matches.unclaimed_predictions() {
        if let Some(pred) = predictions.get(pred_idx) {
            counts[pred.label.index()].1 += 1;
        }
    }

    let mut result = EvaluationResult::new();
    for label in Label::ALL {
        let (tp, fp, fn_) = counts[label.index()];
        result.set(label, Metrics::from_counts(tp, fp, fn_));
    }
    result
}

fn validate_annotations(annotations: &[Annotation], kind: &str) -> Result<()> {
    for (idx, ann) in annotations.iter().enumerate() {
        if let Err(err) = ann.bbox.validate() {
            log::warn!("rejecting {} annotation {}: {}", kind, idx, err);
            return Err(err);
        }
    }
    Ok(())
}
