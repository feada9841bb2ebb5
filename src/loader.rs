//! JSON loading for annotation sets and evaluation configs.
//!
//! An annotation set looks like:
//!
//! ```json
//! {
//!   "annotations": [
//!     {"x": 0, "y": 0, "width": 100, "height": 50, "label": "button"}
//!   ]
//! }
//! ```
//!
//! Label names are matched case-insensitively.

use crate::error::{Result, UiBoxEvalError};
use crate::types::{Annotation, BoundingBox, EvaluationConfig, Label};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawAnnotation {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    label: String,
}

#[derive(Debug, Deserialize)]
struct RawAnnotationSet {
    annotations: Vec<RawAnnotation>,
}

/// Load an annotation set from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, if a label is not
/// one of the known UI element classes, or if a box is malformed.
///
/// # Example
///
/// ```no_run
/// use uibox_eval::loader::load_from_file;
///
/// let annotations = load_from_file("ground_truth.json").unwrap();
/// println!("Loaded {} annotations", annotations.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Annotation>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let raw: RawAnnotationSet = serde_json::from_reader(reader)?;
    convert(raw)
}

/// Load an annotation set from a JSON string.
///
/// # Example
///
/// ```
/// use uibox_eval::loader::load_from_string;
/// use uibox_eval::types::Label;
///
/// let json = r#"{"annotations": [
///     {"x": 0, "y": 0, "width": 100, "height": 50, "label": "Button"}
/// ]}"#;
/// let annotations = load_from_string(json).unwrap();
/// assert_eq!(annotations[0].label, Label::Button);
/// ```
pub fn load_from_string(json_str: &str) -> Result<Vec<Annotation>> {
    let raw: RawAnnotationSet = serde_json::from_str(json_str)?;
    convert(raw)
}

/// Load an [`EvaluationConfig`] from a JSON string. Missing fields take defaults.
pub fn load_config_from_string(json_str: &str) -> Result<EvaluationConfig> {
    let config: EvaluationConfig = serde_json::from_str(json_str)?;
    crate::threshold::validate_threshold(config.iou_threshold)?;
    Ok(config)
}

fn convert(raw: RawAnnotationSet) -> Result<Vec<Annotation>> {
    raw.annotations
        .into_iter()
        .enumerate()
        .map(|(idx, ann)| -> Result<Annotation> {
            let label = ann.label.parse::<Label>().map_err(|_| {
                UiBoxEvalError::InvalidLabel(format!(
                    "Annotation {} has unknown label '{}'",
                    idx, ann.label
                ))
            })?;

            let bbox = BoundingBox::new(ann.x, ann.y, ann.width, ann.height);
            bbox.validate().map_err(|err| match err {
                UiBoxEvalError::InvalidBox(reason) => {
                    UiBoxEvalError::InvalidBox(format!("Annotation {}: {}", idx, reason))
                }
                other => other,
            })?;

            Ok(Annotation { bbox, label })
        })
        .collect()
}
