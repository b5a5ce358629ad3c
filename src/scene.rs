//! Drawing primitives and the rendering-surface seam
//!
//! Charts emit a `Scene`: an ordered display list of geometric primitives
//! together with the declared pixel size and a view box describing the
//! scale-to-fit contract. A host backend implements `RenderSurface` to draw
//! scenes however it likes (canvas, DOM, the bundled SVG serializer).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors a rendering surface can report
#[derive(Error, Debug)]
pub enum RenderError {
    /// Backend-specific failure (lost context, rejected draw call, ...)
    #[error("surface error: {0}")]
    Surface(String),

    /// Formatting failed while serializing drawing instructions
    #[error("format error: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Horizontal anchoring of text relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Vertical placement of text relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextBaseline {
    Hanging,
    Middle,
    Alphabetic,
}

/// One drawing instruction in chart coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        /// Filled disc versus outline-only ring
        filled: bool,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        /// Stroke width (data-derived for network links)
        width: f32,
        /// Stroke opacity (hover emphasis lives here)
        opacity: f32,
    },
    /// Closed polygon through the given vertices
    Polygon { points: Vec<(f32, f32)>, filled: bool },
    Text {
        x: f32,
        y: f32,
        content: String,
        size: f32,
        anchor: TextAnchor,
        baseline: TextBaseline,
    },
}

/// The coordinate window the scene's pixels map onto
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub min_x: f32,
    pub min_y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewBox {
    pub fn new(min_x: f32, min_y: f32, width: f32, height: f32) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }
}

/// An ordered display list plus the declared canvas geometry
///
/// Shapes draw in list order, so background elements (links, grid rings)
/// must be pushed before the elements that sit on top of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Declared pixel width
    pub width: f32,
    /// Declared pixel height
    pub height: f32,
    pub view_box: ViewBox,
    pub shapes: Vec<Shape>,
}

impl Scene {
    /// Scene whose view box matches its pixel size exactly
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_view_box(width, height, ViewBox::new(0.0, 0.0, width, height))
    }

    /// Scene with an explicit view box (for charts with outer margins)
    pub fn with_view_box(width: f32, height: f32, view_box: ViewBox) -> Self {
        Self {
            width,
            height,
            view_box,
            shapes: Vec::new(),
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// A drawing backend that consumes scenes
///
/// Implementations must treat a scene as an immutable snapshot: charts hand
/// over positions only after a simulation tick has fully completed.
pub trait RenderSurface {
    fn render(&mut self, scene: &Scene) -> Result<(), RenderError>;
}
