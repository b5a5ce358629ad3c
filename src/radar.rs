//! Percentile radar chart geometry
//!
//! Deterministic polar-coordinate geometry: an ordered list of named
//! metrics maps to evenly spaced axes (axis 0 at the top, proceeding
//! clockwise), each value to a radial distance, and the whole set to a
//! closed polygon plus interactive markers.

use serde::{Deserialize, Serialize};

use crate::interaction::Tooltip;
use crate::radial_grid::RadialGrid;
use crate::scene::{Scene, Shape, ViewBox};

/// Normalization divisor for metric values
///
/// Values up to 100 stay within ~2/3 of the radius, leaving margin for
/// values slightly above 100. Values beyond 150 land outside the drawn
/// grid; that is not an error.
const VALUE_SCALE: f32 = 150.0;

/// Radius of the interactive point markers
const MARKER_RADIUS: f32 = 4.0;

/// A named percentile metric, one radar axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    /// Expected range 0-100, not enforced
    pub value: f32,
}

impl Metric {
    /// Create a metric, clamping non-finite values to 0 so geometry never
    /// sees a not-a-number position
    pub fn new(name: impl Into<String>, value: f32) -> Self {
        Self {
            name: name.into(),
            value: if value.is_finite() { value } else { 0.0 },
        }
    }
}

/// A metric resolved to its Cartesian position on the chart
#[derive(Debug, Clone, PartialEq)]
pub struct RadarPoint {
    pub x: f32,
    pub y: f32,
    pub value: f32,
    pub name: String,
}

/// Angle of axis `index` among `count` axes
///
/// Axis 0 sits at the top (-pi/2), subsequent axes proceed clockwise at
/// even spacing.
pub fn axis_angle(index: usize, count: usize) -> f32 {
    use std::f32::consts::PI;

    index as f32 * (2.0 * PI / count.max(1) as f32) - PI / 2.0
}

/// Parse a raw percentile input, clamping junk to 0
///
/// Unparsable or non-finite input yields 0 rather than propagating a
/// not-a-number position into the geometry.
pub fn parse_percentile(input: &str) -> f32 {
    match input.trim().parse::<f32>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Radar chart dimensions and fixed-metric configuration
#[derive(Debug, Clone, Copy)]
pub struct RadarConfig {
    /// Base chart width in pixels
    pub width: f32,
    /// Base chart height in pixels
    pub height: f32,
    /// Extra view-box margin for axis labels
    pub margin: f32,
    /// Value of the fixed "Label Effectiveness" axis
    pub label_effectiveness: f32,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 300.0,
            margin: 40.0,
            label_effectiveness: 65.0,
        }
    }
}

/// A radar chart instance with its metrics and tooltip state
#[derive(Debug)]
pub struct RadarChart {
    config: RadarConfig,
    metrics: Vec<Metric>,
    tooltip: Option<Tooltip>,
}

impl RadarChart {
    /// Create a chart over an explicit metric list
    pub fn new(config: RadarConfig, metrics: Vec<Metric>) -> Self {
        Self {
            config,
            metrics,
            tooltip: None,
        }
    }

    /// Create a chart from the three percentile inputs
    ///
    /// The standard axes: price competitiveness (inverted, so a cheap
    /// listing scores high), likeability, the configured label
    /// effectiveness, and photos appeal.
    pub fn from_percentiles(config: RadarConfig, price: f32, likes: f32, photos: f32) -> Self {
        let metrics = vec![
            Metric::new("Price Competitiveness", 100.0 - price),
            Metric::new("Likeability", likes),
            Metric::new("Label Effectiveness", config.label_effectiveness),
            Metric::new("Photos Appeal", photos),
        ];
        Self::new(config, metrics)
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Boundary radius of the chart
    pub fn radius(&self) -> f32 {
        self.config.width.min(self.config.height) / 2.0 - 40.0
    }

    /// Chart center
    pub fn center(&self) -> (f32, f32) {
        (self.config.width / 2.0, self.config.height / 2.0)
    }

    /// Metrics resolved to Cartesian positions
    pub fn points(&self) -> Vec<RadarPoint> {
        let n = self.metrics.len();
        let radius = self.radius();
        let (cx, cy) = self.center();

        self.metrics
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let angle = axis_angle(i, n);
                let distance = m.value / VALUE_SCALE * radius;
                RadarPoint {
                    x: cx + distance * angle.cos(),
                    y: cy + distance * angle.sin(),
                    value: m.value,
                    name: m.name.clone(),
                }
            })
            .collect()
    }

    /// The closed polygon through all radar points
    pub fn polygon(&self) -> Vec<(f32, f32)> {
        self.points().iter().map(|p| (p.x, p.y)).collect()
    }

    /// Emit the full chart scene: grid, polygon, then point markers
    pub fn render(&self) -> Scene {
        let margin = self.config.margin;
        let mut scene = Scene::with_view_box(
            self.config.width,
            self.config.height,
            ViewBox::new(
                -margin,
                -margin,
                self.config.width + margin * 2.0,
                self.config.height + margin * 2.0,
            ),
        );

        if self.metrics.is_empty() {
            return scene;
        }

        let (cx, cy) = self.center();
        let grid = RadialGrid::new(cx, cy, self.radius());
        let names: Vec<&str> = self.metrics.iter().map(|m| m.name.as_str()).collect();
        for shape in grid.shapes(&names) {
            scene.push(shape);
        }

        scene.push(Shape::Polygon {
            points: self.polygon(),
            filled: true,
        });

        for point in self.points() {
            scene.push(Shape::Circle {
                cx: point.x,
                cy: point.y,
                r: MARKER_RADIUS,
                filled: true,
            });
        }

        scene
    }

    /// Pointer entered a point marker: show its value tooltip
    pub fn on_marker_hover(&mut self, index: usize, pointer_x: f32, pointer_y: f32) {
        let Some(metric) = self.metrics.get(index) else {
            return;
        };
        self.tooltip = Some(Tooltip {
            title: None,
            lines: vec![format!("{}: {:.1}%", metric.name, metric.value)],
            x: pointer_x + 10.0,
            y: pointer_y - 20.0,
        });
    }

    /// Pointer left: release the tooltip
    pub fn on_hover_end(&mut self) {
        self.tooltip = None;
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn four_axes_start_at_top_and_space_evenly() {
        assert!((axis_angle(0, 4) + FRAC_PI_2).abs() < 1e-6);
        assert!((axis_angle(1, 4) - 0.0).abs() < 1e-6);
        assert!((axis_angle(2, 4) - FRAC_PI_2).abs() < 1e-6);
        assert!((axis_angle(3, 4) - PI).abs() < 1e-6);

        for i in 0..3 {
            let spacing = axis_angle(i + 1, 4) - axis_angle(i, 4);
            assert!((spacing - FRAC_PI_2).abs() < 1e-6);
        }
    }

    #[test]
    fn parse_percentile_clamps_junk_to_zero() {
        assert_eq!(parse_percentile("30"), 30.0);
        assert_eq!(parse_percentile(" 72.5 "), 72.5);
        assert_eq!(parse_percentile("abc"), 0.0);
        assert_eq!(parse_percentile(""), 0.0);
        assert_eq!(parse_percentile("NaN"), 0.0);
        assert_eq!(parse_percentile("inf"), 0.0);
    }

    #[test]
    fn metric_clamps_non_finite_values() {
        assert_eq!(Metric::new("x", f32::NAN).value, 0.0);
        assert_eq!(Metric::new("x", f32::INFINITY).value, 0.0);
        assert_eq!(Metric::new("x", 65.0).value, 65.0);
    }

    #[test]
    fn standard_metric_set_inverts_price() {
        let chart = RadarChart::from_percentiles(RadarConfig::default(), 30.0, 70.0, 90.0);

        let metrics = chart.metrics();
        assert_eq!(metrics.len(), 4);
        assert_eq!(metrics[0], Metric::new("Price Competitiveness", 70.0));
        assert_eq!(metrics[1], Metric::new("Likeability", 70.0));
        assert_eq!(metrics[2], Metric::new("Label Effectiveness", 65.0));
        assert_eq!(metrics[3], Metric::new("Photos Appeal", 90.0));
    }

    #[test]
    fn label_effectiveness_is_configurable() {
        let config = RadarConfig {
            label_effectiveness: 80.0,
            ..Default::default()
        };
        let chart = RadarChart::from_percentiles(config, 50.0, 50.0, 50.0);

        assert_eq!(chart.metrics()[2].value, 80.0);
    }

    #[test]
    fn default_dimensions_match_contract() {
        let chart = RadarChart::from_percentiles(RadarConfig::default(), 50.0, 50.0, 50.0);

        assert_eq!(chart.radius(), 110.0);
        assert_eq!(chart.center(), (150.0, 150.0));

        let scene = chart.render();
        assert_eq!(scene.view_box, ViewBox::new(-40.0, -40.0, 380.0, 380.0));
    }

    #[test]
    fn first_point_lies_straight_up_at_scaled_distance() {
        let chart = RadarChart::from_percentiles(RadarConfig::default(), 30.0, 70.0, 90.0);

        let points = chart.points();
        let expected = 70.0 / 150.0 * chart.radius();

        // Axis 0 at -pi/2: straight up from center
        assert!((points[0].x - 150.0).abs() < 1e-3);
        assert!((points[0].y - (150.0 - expected)).abs() < 1e-3);
        assert_eq!(points[0].value, 70.0);
    }

    #[test]
    fn values_above_scale_land_outside_the_grid() {
        let chart = RadarChart::new(
            RadarConfig::default(),
            vec![Metric::new("big", 200.0), Metric::new("small", 10.0)],
        );

        let points = chart.points();
        let (cx, cy) = chart.center();
        let distance = ((points[0].x - cx).powi(2) + (points[0].y - cy).powi(2)).sqrt();
        assert!(distance > chart.radius());
    }

    #[test]
    fn polygon_closes_through_all_points() {
        let chart = RadarChart::from_percentiles(RadarConfig::default(), 30.0, 70.0, 90.0);

        assert_eq!(chart.polygon().len(), 4);
    }

    #[test]
    fn render_orders_grid_polygon_markers() {
        let chart = RadarChart::from_percentiles(RadarConfig::default(), 30.0, 70.0, 90.0);
        let scene = chart.render();

        // Grid: 5 rings x2 + 4 spokes x2; then polygon; then 4 markers
        assert_eq!(scene.shapes.len(), 10 + 8 + 1 + 4);
        let polygon_index = scene
            .shapes
            .iter()
            .position(|s| matches!(s, Shape::Polygon { .. }))
            .unwrap();
        assert_eq!(polygon_index, 18);
        assert!(matches!(
            scene.shapes[polygon_index + 1],
            Shape::Circle { filled: true, .. }
        ));
    }

    #[test]
    fn empty_metrics_render_empty_scene() {
        let chart = RadarChart::new(RadarConfig::default(), Vec::new());

        assert!(chart.render().is_empty());
    }

    #[test]
    fn marker_hover_shows_and_releases_tooltip() {
        let mut chart = RadarChart::from_percentiles(RadarConfig::default(), 30.0, 70.0, 90.0);

        chart.on_marker_hover(3, 100.0, 100.0);
        let tip = chart.tooltip().expect("tooltip should be showing");
        assert_eq!(tip.lines, vec!["Photos Appeal: 90.0%"]);
        assert_eq!((tip.x, tip.y), (110.0, 80.0));

        chart.on_hover_end();
        assert!(chart.tooltip().is_none());
    }

    #[test]
    fn marker_hover_out_of_range_is_ignored() {
        let mut chart = RadarChart::from_percentiles(RadarConfig::default(), 30.0, 70.0, 90.0);

        chart.on_marker_hover(9, 0.0, 0.0);
        assert!(chart.tooltip().is_none());
    }
}
