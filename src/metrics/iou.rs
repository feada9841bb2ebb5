//! Intersection over Union (IoU) calculation.

use crate::types::BoundingBox;

/// Calculate the Intersection over Union (IoU) between two bounding boxes.
///
/// IoU is defined as the area of intersection divided by the area of union.
/// Labels play no part here; callers filter by label before comparing.
///
/// # Arguments
///
/// * `bbox1` - First bounding box
/// * `bbox2` - Second bounding box
///
/// # Returns
///
/// Returns a value between 0.0 (no overlap) and 1.0 (perfect overlap).
/// A union that is not strictly positive (two zero-area boxes, or malformed
/// input) yields 0.0 rather than NaN, as does any non-finite coordinate.
///
/// # Example
///
/// ```
/// use uibox_eval::metrics::iou::calculate_iou;
/// use uibox_eval::types::BoundingBox;
///
/// let bbox1 = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
/// let bbox2 = BoundingBox::new(5.0, 5.0, 10.0, 10.0);
/// let iou = calculate_iou(&bbox1, &bbox2);
/// assert!(iou > 0.0 && iou < 1.0);
/// ```
pub fn calculate_iou(bbox1: &BoundingBox, bbox2: &BoundingBox) -> f64 {
    // f64::min/max drop NaN operands, so non-finite input must be rejected first
    if !bbox1.is_finite() || !bbox2.is_finite() {
        return 0.0;
    }

    let inter_width = (bbox1.right().min(bbox2.right()) - bbox1.x.max(bbox2.x)).max(0.0);
    let inter_height = (bbox1.bottom().min(bbox2.bottom()) - bbox1.y.max(bbox2.y)).max(0.0);
    let intersection_area = inter_width * inter_height;

    let union_area = bbox1.area() + bbox2.area() - intersection_area;

    // Also catches NaN and the negative unions malformed boxes can produce
    if !(union_area > 0.0) {
        return 0.0;
    }

    (intersection_area / union_area).min(1.0)
}

/// Calculate IoU matrix between two sets of bounding boxes.
///
/// # Returns
///
/// Returns a 2D vector where `result[i][j]` is the IoU between `bboxes1[i]` and `bboxes2[j]`.
///
/// # Example
///
/// ```
/// use uibox_eval::metrics::iou::calculate_iou_matrix;
/// use uibox_eval::types::BoundingBox;
///
/// let bboxes1 = vec![BoundingBox::new(0.0, 0.0, 10.0, 10.0)];
/// let bboxes2 = vec![BoundingBox::new(5.0, 5.0, 10.0, 10.0)];
/// let iou_matrix = calculate_iou_matrix(&bboxes1, &bboxes2);
/// assert_eq!(iou_matrix.len(), 1);
/// assert_eq!(iou_matrix[0].len(), 1);
/// ```
pub fn calculate_iou_matrix(bboxes1: &[BoundingBox], bboxes2: &[BoundingBox]) -> Vec<Vec<f64>> {
    bboxes1
        .iter()
        .map(|bbox1| {
            bboxes2
                .iter()
                .map(|bbox2| calculate_iou(bbox1, bbox2))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_boxes() {
        let bbox1 = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let bbox2 = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let iou = calculate_iou(&bbox1, &bbox2);
        assert!((iou - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_no_overlap() {
        let bbox1 = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let bbox2 = BoundingBox::new(20.0, 20.0, 10.0, 10.0);
        assert_eq!(calculate_iou(&bbox1, &bbox2), 0.0);
    }

    #[test]
    fn test_touching_edges() {
        let bbox1 = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let bbox2 = BoundingBox::new(10.0, 0.0, 10.0, 10.0);
        assert_eq!(calculate_iou(&bbox1, &bbox2), 0.0);
    }

    #[test]
    fn test_overlap_on_one_axis_only() {
        // x ranges overlap, y ranges do not
        let bbox1 = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let bbox2 = BoundingBox::new(5.0, 50.0, 10.0, 10.0);
        assert_eq!(calculate_iou(&bbox1, &bbox2), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        let bbox1 = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let bbox2 = BoundingBox::new(5.0, 5.0, 10.0, 10.0);
        let iou = calculate_iou(&bbox1, &bbox2);

        // Intersection: 5x5 = 25
        // Union: 100 + 100 - 25 = 175
        assert!((iou - 0.142857).abs() < 1e-5);
    }

    #[test]
    fn test_contained_box() {
        let outer = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let inner = BoundingBox::new(2.5, 2.5, 5.0, 5.0);
        assert!((calculate_iou(&outer, &inner) - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_zero_area_boxes() {
        let point = BoundingBox::new(10.0, 10.0, 0.0, 0.0);
        assert_eq!(calculate_iou(&point, &point), 0.0);
    }

    #[test]
    fn test_malformed_boxes_stay_in_range() {
        let normal = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let negative = BoundingBox::new(5.0, 5.0, -20.0, 10.0);
        let iou = calculate_iou(&normal, &negative);
        assert!((0.0..=1.0).contains(&iou));

        let nan = BoundingBox::new(f64::NAN, 0.0, 10.0, 10.0);
        assert_eq!(calculate_iou(&normal, &nan), 0.0);
        assert_eq!(calculate_iou(&nan, &normal), 0.0);
    }

    #[test]
    fn test_infinite_coordinates() {
        let normal = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let wide = BoundingBox::new(0.0, 0.0, f64::INFINITY, 10.0);
        let far = BoundingBox::new(f64::NEG_INFINITY, 0.0, 10.0, 10.0);
        assert_eq!(calculate_iou(&normal, &wide), 0.0);
        assert_eq!(calculate_iou(&far, &normal), 0.0);
    }

    #[test]
    fn test_iou_matrix() {
        let bboxes1 = vec![
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            BoundingBox::new(5.0, 5.0, 10.0, 10.0),
        ];
        let bboxes2 = vec![BoundingBox::new(0.0, 0.0, 10.0, 10.0)];

        let matrix = calculate_iou_matrix(&bboxes1, &bboxes2);
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix[0].len(), 1);
        assert!((matrix[0][0] - 1.0).abs() < 1e-10);
    }
}
