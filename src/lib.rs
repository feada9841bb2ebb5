//! # uibox-eval
//!
//! Scores predicted UI-element annotations against human-drawn ground truth.
//!
//! Annotations are labeled rectangles on a screenshot, one of four classes:
//! button, input, radio and drop(down). For one image the library:
//! - computes **IoU** (Intersection over Union) between boxes
//! - assigns each ground-truth box at most one same-label prediction
//!   (greedy by default, optionally a globally optimal assignment)
//! - reports **precision**, **recall** and **F1** for every label
//!
//! ## Quick Start
//!
//! ```rust
//! use uibox_eval::{evaluate, Annotation, Label};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ground_truth = vec![Annotation::new(0.0, 0.0, 100.0, 50.0, Label::Button)];
//! let predictions = vec![Annotation::new(0.0, 0.0, 100.0, 50.0, Label::Button)];
//!
//! let result = evaluate(&ground_truth, &predictions, None)?;
//! for (label, metrics) in result.iter() {
//!     println!("{label}: P={:.3} R={:.3} F1={:.3}", metrics.precision, metrics.recall, metrics.f1_score);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod types;
pub mod loader;
pub mod threshold;
pub mod metrics;
pub mod matching;
pub mod evaluator;

// Re-export commonly used types and functions
pub use error::{Result, UiBoxEvalError};
pub use types::{Annotation, BoundingBox, EvaluationConfig, EvaluationResult, Label, Metrics};
pub use matching::{match_annotations, Match, MatchResult, MatchingStrategy};
pub use evaluator::{aggregate, evaluate, evaluate_at_thresholds, evaluate_with_config};
pub use loader::{load_from_file, load_from_string};
pub use threshold::generate_threshold_range;
