//! Radial reference grid for the radar chart
//!
//! Concentric percentage rings, one spoke per axis, and axis name labels
//! placed just outside the boundary. Label anchoring follows the quadrant
//! of the axis angle so a label never overlaps its own spoke.

use crate::radar::axis_angle;
use crate::scene::{Shape, TextAnchor, TextBaseline};

/// Ring positions as fractions of the boundary radius
const RING_FRACTIONS: [f32; 5] = [0.2, 0.4, 0.6, 0.8, 1.0];

/// Distance of axis name labels beyond the boundary
const LABEL_DISTANCE: f32 = 15.0;

/// Font size of the ring percentage labels
const RING_LABEL_SIZE: f32 = 8.0;

/// Font size of the axis name labels
const AXIS_LABEL_SIZE: f32 = 9.0;

const EPSILON: f32 = 1e-4;

/// Concentric-ring grid for one radar chart
#[derive(Debug, Clone, Copy)]
pub struct RadialGrid {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
}

impl RadialGrid {
    pub fn new(center_x: f32, center_y: f32, radius: f32) -> Self {
        Self {
            center_x,
            center_y,
            radius,
        }
    }

    /// Rings at {20,40,60,80,100}% of the radius, each labeled with its
    /// percentage at the top of the ring
    pub fn rings(&self) -> Vec<Shape> {
        let mut shapes = Vec::with_capacity(RING_FRACTIONS.len() * 2);
        for fraction in RING_FRACTIONS {
            shapes.push(Shape::Circle {
                cx: self.center_x,
                cy: self.center_y,
                r: self.radius * fraction,
                filled: false,
            });
            shapes.push(Shape::Text {
                x: self.center_x,
                y: self.center_y - self.radius * fraction,
                content: format!("{}%", (fraction * 100.0).round() as u32),
                size: RING_LABEL_SIZE,
                anchor: TextAnchor::Middle,
                baseline: TextBaseline::Middle,
            });
        }
        shapes
    }

    /// One spoke and one name label per axis
    pub fn spokes(&self, axis_names: &[&str]) -> Vec<Shape> {
        let n = axis_names.len();
        let mut shapes = Vec::with_capacity(n * 2);

        for (i, name) in axis_names.iter().enumerate() {
            let angle = axis_angle(i, n);
            let (sin, cos) = angle.sin_cos();

            shapes.push(Shape::Line {
                x1: self.center_x,
                y1: self.center_y,
                x2: self.center_x + self.radius * cos,
                y2: self.center_y + self.radius * sin,
                width: 0.5,
                opacity: 1.0,
            });

            let label_distance = self.radius + LABEL_DISTANCE;
            shapes.push(Shape::Text {
                x: self.center_x + label_distance * cos,
                y: self.center_y + label_distance * sin,
                content: (*name).to_string(),
                size: AXIS_LABEL_SIZE,
                anchor: label_anchor(angle),
                baseline: label_baseline(angle),
            });
        }
        shapes
    }

    /// Full grid in draw order: rings first, spokes and labels on top
    pub fn shapes(&self, axis_names: &[&str]) -> Vec<Shape> {
        let mut shapes = self.rings();
        shapes.extend(self.spokes(axis_names));
        shapes
    }
}

/// Horizontal anchor for an axis label at `angle`
///
/// The top axis centers its label; right-half axes anchor at the start so
/// text runs away from the spoke; left-half axes anchor at the end.
pub fn label_anchor(angle: f32) -> TextAnchor {
    use std::f32::consts::FRAC_PI_2;

    if (angle + FRAC_PI_2).abs() < EPSILON {
        TextAnchor::Middle
    } else if angle > -FRAC_PI_2 && angle < FRAC_PI_2 {
        TextAnchor::Start
    } else {
        TextAnchor::End
    }
}

/// Vertical baseline for an axis label at `angle`
///
/// Vertical extremes center on the meridian; labels above the horizontal
/// meridian sit on the alphabetic baseline, labels below hang from it.
pub fn label_baseline(angle: f32) -> TextBaseline {
    use std::f32::consts::FRAC_PI_2;

    if (angle - FRAC_PI_2).abs() < EPSILON || (angle + FRAC_PI_2).abs() < EPSILON {
        TextBaseline::Middle
    } else if angle < 0.0 {
        TextBaseline::Alphabetic
    } else {
        TextBaseline::Hanging
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn rings_cover_all_fractions_with_labels() {
        let grid = RadialGrid::new(150.0, 150.0, 110.0);
        let rings = grid.rings();

        assert_eq!(rings.len(), 10);

        let radii: Vec<f32> = rings
            .iter()
            .filter_map(|s| match s {
                Shape::Circle { r, filled: false, .. } => Some(*r),
                _ => None,
            })
            .collect();
        assert_eq!(radii, vec![22.0, 44.0, 66.0, 88.0, 110.0]);

        let labels: Vec<&str> = rings
            .iter()
            .filter_map(|s| match s {
                Shape::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["20%", "40%", "60%", "80%", "100%"]);
    }

    #[test]
    fn ring_labels_sit_at_the_top_of_each_ring() {
        let grid = RadialGrid::new(150.0, 150.0, 100.0);
        let rings = grid.rings();

        let Shape::Text { x, y, .. } = &rings[1] else {
            panic!("expected ring label after ring circle");
        };
        assert_eq!(*x, 150.0);
        assert_eq!(*y, 150.0 - 20.0);
    }

    #[test]
    fn spokes_run_from_center_to_boundary() {
        let grid = RadialGrid::new(150.0, 150.0, 100.0);
        let spokes = grid.spokes(&["A", "B", "C", "D"]);

        assert_eq!(spokes.len(), 8);

        // Axis 0 points straight up
        let Shape::Line { x1, y1, x2, y2, .. } = &spokes[0] else {
            panic!("expected spoke line first");
        };
        assert_eq!((*x1, *y1), (150.0, 150.0));
        assert!((*x2 - 150.0).abs() < 1e-3);
        assert!((*y2 - 50.0).abs() < 1e-3);
    }

    #[test]
    fn axis_labels_sit_outside_the_boundary() {
        let grid = RadialGrid::new(150.0, 150.0, 100.0);
        let spokes = grid.spokes(&["Top", "Right", "Bottom", "Left"]);

        // Right axis (angle 0) label at radius + 15 along the x axis
        let Shape::Text { x, y, .. } = &spokes[3] else {
            panic!("expected label after spoke");
        };
        assert!((*x - 265.0).abs() < 1e-3);
        assert!((*y - 150.0).abs() < 1e-3);
    }

    #[test]
    fn top_axis_label_is_centered() {
        assert_eq!(label_anchor(-FRAC_PI_2), TextAnchor::Middle);
        assert_eq!(label_baseline(-FRAC_PI_2), TextBaseline::Middle);
    }

    #[test]
    fn right_half_labels_anchor_at_start() {
        assert_eq!(label_anchor(0.0), TextAnchor::Start);
        assert_eq!(label_anchor(-0.5), TextAnchor::Start);
        assert_eq!(label_anchor(0.5), TextAnchor::Start);
    }

    #[test]
    fn left_half_labels_anchor_at_end() {
        assert_eq!(label_anchor(PI), TextAnchor::End);
        assert_eq!(label_anchor(2.0), TextAnchor::End);
        assert_eq!(label_anchor(-2.0), TextAnchor::End);
    }

    #[test]
    fn baseline_splits_at_the_horizontal_meridian() {
        // Above the meridian (negative angles) text sits on its baseline
        assert_eq!(label_baseline(-0.5), TextBaseline::Alphabetic);
        // Below it text hangs
        assert_eq!(label_baseline(0.5), TextBaseline::Hanging);
        // Bottom extreme centers
        assert_eq!(label_baseline(FRAC_PI_2), TextBaseline::Middle);
    }

    #[test]
    fn full_grid_draws_rings_before_spokes() {
        let grid = RadialGrid::new(150.0, 150.0, 100.0);
        let shapes = grid.shapes(&["A", "B", "C"]);

        assert_eq!(shapes.len(), 10 + 6);
        assert!(matches!(shapes[0], Shape::Circle { filled: false, .. }));
        assert!(matches!(shapes[10], Shape::Line { .. }));
    }
}
