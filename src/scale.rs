//! Density-aware layout parameters
//!
//! Pure calculation logic deriving node sizes, link distances, and font
//! sizes from graph density and canvas dimensions. All damping heuristics
//! are monotone and trigger only past a density threshold, so small graphs
//! render with fixed, predictable sizes.

/// Node count above which the density damping heuristics kick in
const DENSITY_THRESHOLD: usize = 50;

/// Smallest node radius, the lower end of the sqrt scale range
const MIN_RADIUS: f32 = 3.0;

/// Link rest length for sparse graphs
const BASE_LINK_DISTANCE: f32 = 100.0;

/// Node label font size for sparse graphs
const BASE_FONT_SIZE: f32 = 12.0;

/// Size/distance/font parameters for one dataset
///
/// A pure function of node count and canvas dimensions; recomputed once per
/// dataset and immutable during a simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParameters {
    /// Largest node radius, the upper end of the sqrt scale range
    pub max_radius: f32,
    /// Largest node count, the upper end of the sqrt scale domain
    pub max_count: u32,
    /// Link rest length for the spring force
    pub link_distance: f32,
    /// Node label font size
    pub font_size: f32,
}

impl LayoutParameters {
    /// Derive parameters for a graph of `node_count` nodes on a
    /// `width` x `height` canvas, with `max_count` the largest node count.
    pub fn derive(node_count: usize, width: f32, height: f32, max_count: u32) -> Self {
        let n = node_count as f32;
        let base_max_radius = width.min(height) / 15.0;

        let (max_radius, link_distance, font_size) = if node_count > DENSITY_THRESHOLD {
            (
                base_max_radius / n.ln(),
                BASE_LINK_DISTANCE * (1.0 - (n / 100.0).ln() / 10.0),
                BASE_FONT_SIZE / (n / 10.0).ln(),
            )
        } else {
            (base_max_radius, BASE_LINK_DISTANCE, BASE_FONT_SIZE)
        };

        Self {
            max_radius,
            max_count,
            link_distance,
            font_size,
        }
    }

    /// Node radius for a given count
    ///
    /// Square-root scale over domain `[0, max_count]` into range
    /// `[MIN_RADIUS, max_radius]`, so node area (not radius) tracks
    /// frequency. A degenerate domain yields the range minimum.
    pub fn radius_of(&self, count: u32) -> f32 {
        if self.max_count == 0 {
            return MIN_RADIUS;
        }

        let t = (count as f32).sqrt() / (self.max_count as f32).sqrt();
        MIN_RADIUS + (self.max_radius - MIN_RADIUS) * t
    }
}
