//! Core data types for UI annotations and evaluation results.

use crate::error::{Result, UiBoxEvalError};
use crate::matching::MatchingStrategy;
use crate::metrics::f1_score::derive_rates;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// UI element class of an annotation.
///
/// The set is closed: every evaluation reports all four labels, including
/// those that never occur in either input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Label {
    Button,
    Input,
    Radio,
    Drop,
}

impl Label {
    /// Number of labels in the fixed label set.
    pub const COUNT: usize = 4;

    /// All labels in declaration order.
    pub const ALL: [Label; Label::COUNT] = [Label::Button, Label::Input, Label::Radio, Label::Drop];

    /// Position of the label within [`Label::ALL`].
    pub fn index(self) -> usize {
        match self {
            Label::Button => 0,
            Label::Input => 1,
            Label::Radio => 2,
            Label::Drop => 3,
        }
    }

    /// Lowercase name used in JSON and in display output.
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Button => "button",
            Label::Input => "input",
            Label::Radio => "radio",
            Label::Drop => "drop",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Label {
    type Error = UiBoxEvalError;

    fn try_from(name: String) -> Result<Self> {
        name.parse()
    }
}

impl FromStr for Label {
    type Err = UiBoxEvalError;

    /// Parse a label name, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Label::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| UiBoxEvalError::InvalidLabel(format!("unknown label '{}'", s)))
    }
}

/// Axis-aligned rectangle in image-pixel space (x, y, width, height).
///
/// The origin is the top-left corner of the image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Get the area of the bounding box.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Get the right coordinate (x + width).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom coordinate (y + height).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check that all four coordinates are finite.
    pub fn is_finite(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Check that every coordinate is finite and both dimensions are non-negative.
    ///
    /// Zero-area boxes are accepted.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }

    /// Like [`BoundingBox::is_valid`], but reports what is wrong.
    pub fn validate(&self) -> Result<()> {
        if !self.is_finite() {
            return Err(UiBoxEvalError::InvalidBox(format!(
                "non-finite coordinate in {:?}",
                self
            )));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(UiBoxEvalError::InvalidBox(format!(
                "negative dimensions {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// A labeled rectangle, either drawn by a human or predicted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(flatten)]
    pub bbox: BoundingBox,
    pub label: Label,
}

impl Annotation {
    /// Create a new annotation.
    pub fn new(x: f64, y: f64, width: f64, height: f64, label: Label) -> Self {
        Self {
            bbox: BoundingBox::new(x, y, width, height),
            label,
        }
    }
}

/// Counts and rates for one label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_ground_truth: usize,
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

impl Metrics {
    /// Build metrics from raw counts, deriving precision, recall and F1.
    ///
    /// `total_ground_truth` is `true_positives + false_negatives`.
    pub fn from_counts(true_positives: usize, false_positives: usize, false_negatives: usize) -> Self {
        let rates = derive_rates(true_positives, false_positives, false_negatives);
        Self {
            total_ground_truth: true_positives + false_negatives,
            true_positives,
            false_positives,
            false_negatives,
            precision: rates.precision,
            recall: rates.recall,
            f1_score: rates.f1_score,
        }
    }

    /// Number of predictions counted under this label.
    pub fn total_predictions(&self) -> usize {
        self.true_positives + self.false_positives
    }

    /// True when the label occurred in neither input.
    pub fn is_empty(&self) -> bool {
        self.total_ground_truth == 0 && self.false_positives == 0
    }
}

/// Per-label metrics covering the whole label set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationResult {
    per_label: [Metrics; Label::COUNT],
}

impl EvaluationResult {
    /// Create a result with an all-zero entry for every label.
    pub fn new() -> Self {
        Self::default()
    }

    /// Metrics for one label.
    pub fn get(&self, label: Label) -> &Metrics {
        &self.per_label[label.index()]
    }

    pub(crate) fn set(&mut self, label: Label, metrics: Metrics) {
        self.per_label[label.index()] = metrics;
    }

    /// Iterate over `(label, metrics)` in [`Label::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Label, &Metrics)> {
        Label::ALL.into_iter().zip(self.per_label.iter())
    }

    /// Micro-averaged metrics: counts summed over all labels, rates re-derived.
    pub fn overall(&self) -> Metrics {
        let (tp, fp, fn_) = self.per_label.iter().fold((0, 0, 0), |(tp, fp, fn_), m| {
            (
                tp + m.true_positives,
                fp + m.false_positives,
                fn_ + m.false_negatives,
            )
        });
        Metrics::from_counts(tp, fp, fn_)
    }

    /// Mean F1 over labels that occurred in at least one input.
    ///
    /// Returns 0.0 when both inputs were empty.
    pub fn macro_f1(&self) -> f64 {
        let present: Vec<f64> = self
            .per_label
            .iter()
            .filter(|m| !m.is_empty())
            .map(|m| m.f1_score)
            .collect();

        if present.is_empty() {
            return 0.0;
        }

        present.iter().sum::<f64>() / present.len() as f64
    }
}

impl Serialize for EvaluationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Options for one evaluation call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Minimum IoU for a prediction to count as a match.
    pub iou_threshold: f64,
    /// How predictions are assigned to ground truth.
    pub strategy: MatchingStrategy,
}

impl EvaluationConfig {
    /// Default IoU threshold.
    pub const DEFAULT_IOU_THRESHOLD: f64 = 0.5;

    /// Create a config with the given threshold and the greedy strategy.
    pub fn with_threshold(iou_threshold: f64) -> Self {
        Self {
            iou_threshold,
            ..Self::default()
        }
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            iou_threshold: Self::DEFAULT_IOU_THRESHOLD,
            strategy: MatchingStrategy::Greedy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parsing_ignores_case() {
        assert_eq!("Button".parse::<Label>().unwrap(), Label::Button);
        assert_eq!(" DROP ".parse::<Label>().unwrap(), Label::Drop);
        assert!(matches!(
            "checkbox".parse::<Label>(),
            Err(UiBoxEvalError::InvalidLabel(_))
        ));
    }

    #[test]
    fn test_label_index_matches_all_order() {
        for (i, label) in Label::ALL.iter().enumerate() {
            assert_eq!(label.index(), i);
        }
    }

    #[test]
    fn test_bbox_validation() {
        assert!(BoundingBox::new(0.0, 0.0, 0.0, 0.0).is_valid());
        assert!(!BoundingBox::new(0.0, 0.0, -1.0, 5.0).is_valid());
        assert!(!BoundingBox::new(f64::NAN, 0.0, 1.0, 1.0).is_valid());
        assert!(BoundingBox::new(0.0, 0.0, 5.0, -1.0).validate().is_err());
        assert!(BoundingBox::new(0.0, f64::INFINITY, 5.0, 1.0).validate().is_err());
    }

    #[test]
    fn test_metrics_from_counts() {
        let m = Metrics::from_counts(3, 1, 2);
        assert_eq!(m.total_ground_truth, 5);
        assert_eq!(m.total_predictions(), 4);
        assert!((m.precision - 0.75).abs() < 1e-10);
        assert!((m.recall - 0.6).abs() < 1e-10);
    }

    #[test]
    fn test_new_result_covers_all_labels() {
        let result = EvaluationResult::new();
        assert_eq!(result.iter().count(), Label::COUNT);
        assert!(result.iter().all(|(_, m)| *m == Metrics::default()));
        assert_eq!(result.macro_f1(), 0.0);
    }

    #[test]
    fn test_result_serializes_as_label_map() {
        let mut result = EvaluationResult::new();
        result.set(Label::Radio, Metrics::from_counts(1, 0, 0));

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["radio"]["true_positives"], 1);
        assert_eq!(json["button"]["true_positives"], 0);
        assert!(json.get("input").is_some());
        assert!(json.get("drop").is_some());
    }

    #[test]
    fn test_annotation_json_is_flat() {
        let ann: Annotation =
            serde_json::from_str(r#"{"x":1,"y":2,"width":3,"height":4,"label":"input"}"#).unwrap();
        assert_eq!(ann, Annotation::new(1.0, 2.0, 3.0, 4.0, Label::Input));
    }

    #[test]
    fn test_label_deserialization_ignores_case() {
        let ann: Annotation =
            serde_json::from_str(r#"{"x":0,"y":0,"width":1,"height":1,"label":"Button"}"#).unwrap();
        assert_eq!(ann.label, Label::Button);

        let label: Label = serde_json::from_str(r#""RADIO""#).unwrap();
        assert_eq!(label, Label::Radio);
        assert_eq!(serde_json::to_string(&Label::Radio).unwrap(), r#""radio""#);

        let err = serde_json::from_str::<Label>(r#""checkbox""#).unwrap_err();
        assert!(err.to_string().contains("Invalid label"));
    }

    #[test]
    fn test_config_defaults() {
        let config: EvaluationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EvaluationConfig::default());
        assert_eq!(config.iou_threshold, 0.5);
        assert_eq!(config.strategy, MatchingStrategy::Greedy);
    }
}
