//! corad - co-occurrence network graphs and percentile radar charts as
//! renderable geometry.
//!
//! This crate turns raw labeled records into renderable vector geometry:
//! a weighted co-occurrence graph resolved to 2D positions by an iterative
//! force-directed layout, and a multi-axis percentile radar chart built
//! from deterministic polar geometry. Charts emit [`scene::Scene`] display
//! lists against an abstract [`scene::RenderSurface`]; a reference SVG
//! backend is bundled.

pub mod graph;
pub mod interaction;
pub mod network;
pub mod radar;
pub mod radial_grid;
pub mod scale;
pub mod scene;
pub mod simulation;
pub mod svg;

pub use graph::{GraphBuilder, LabelGraph, Link, Node, Record};
pub use interaction::{InteractionController, Tooltip};
pub use network::{NetworkChart, NetworkConfig};
pub use radar::{Metric, RadarChart, RadarConfig, RadarPoint};
pub use radial_grid::RadialGrid;
pub use scale::LayoutParameters;
pub use scene::{RenderError, RenderSurface, Scene, Shape, ViewBox};
pub use simulation::{Phase, Simulation};
pub use svg::SvgRenderer;
