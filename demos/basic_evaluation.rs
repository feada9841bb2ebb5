//! Basic evaluation example demonstrating core functionality.

use uibox_eval::{
    evaluate, evaluate_with_config, load_from_string, metrics::iou::calculate_iou,
    EvaluationConfig, MatchingStrategy,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== UI Annotation Evaluation Example ===\n");

    let ground_truth = load_from_string(
        r#"{"annotations": [
            {"x": 20, "y": 20, "width": 120, "height": 32, "label": "button"},
            {"x": 20, "y": 70, "width": 300, "height": 28, "label": "input"},
            {"x": 20, "y": 120, "width": 16, "height": 16, "label": "radio"},
            {"x": 20, "y": 160, "width": 200, "height": 30, "label": "drop"}
        ]}"#,
    )?;
    let predictions = load_from_string(
        r#"{"annotations": [
            {"x": 22, "y": 21, "width": 118, "height": 32, "label": "button"},
            {"x": 20, "y": 74, "width": 290, "height": 28, "label": "input"},
            {"x": 60, "y": 120, "width": 16, "height": 16, "label": "radio"},
            {"x": 20, "y": 160, "width": 200, "height": 30, "label": "input"}
        ]}"#,
    )?;

    println!("1. IoU per ground-truth box against the prediction at the same index");
    for (gt, pred) in ground_truth.iter().zip(&predictions) {
        println!(
            "   {:>6} vs {:<6} IoU = {:.4}",
            gt.label.as_str(),
            pred.label.as_str(),
            calculate_iou(&gt.bbox, &pred.bbox)
        );
    }
    println!();

    println!("2. Per-label metrics (greedy, IoU >= 0.5)");
    let result = evaluate(&ground_truth, &predictions, None)?;
    println!("   {:<8} {:>4} {:>4} {:>4} {:>9} {:>9} {:>9}", "label", "tp", "fp", "fn", "precision", "recall", "f1");
    for (label, m) in result.iter() {
        println!(
            "   {:<8} {:>4} {:>4} {:>4} {:>9.3} {:>9.3} {:>9.3}",
            label.as_str(),
            m.true_positives,
            m.false_positives,
            m.false_negatives,
            m.precision,
            m.recall,
            m.f1_score
        );
    }
    let overall = result.overall();
    println!("   overall F1 = {:.3}, macro F1 = {:.3}", overall.f1_score, result.macro_f1());
    println!();

    println!("3. Optimal assignment at IoU >= 0.75");
    let config = EvaluationConfig {
        iou_threshold: 0.75,
        strategy: MatchingStrategy::OptimalBipartite,
    };
    let strict = evaluate_with_config(&ground_truth, &predictions, &config)?;
    println!("   {}", serde_json::to_string_pretty(&strict)?);

    Ok(())
}
