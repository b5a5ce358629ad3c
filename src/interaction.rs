//! Hover and drag state management
//!
//! An explicit controller object holding hover, drag, and tooltip state as
//! fields. Each chart instance owns one controller and, through it, one
//! tooltip resource, so multiple charts coexist without collision. Host
//! input events are serialized, so last-writer-wins on the tooltip is fine.

use crate::simulation::{SimLink, SimNode, Simulation};

/// Link opacity while emphasized by a hover
pub const EMPHASIZED_OPACITY: f32 = 0.9;
/// Link opacity while dimmed by a hover elsewhere
pub const DIMMED_OPACITY: f32 = 0.2;
/// Uniform link opacity with nothing hovered
pub const BASE_OPACITY: f32 = 0.6;

/// What the pointer is currently over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTarget {
    Node(usize),
    Link(usize),
}

/// Floating tooltip content and placement
///
/// The host floats this element at `(x, y)`; the controller owns its
/// lifecycle and releases it on hover end, dataset replacement, and
/// teardown.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// Bold heading line, when present
    pub title: Option<String>,
    /// Body lines
    pub lines: Vec<String>,
    /// Placement in host page coordinates
    pub x: f32,
    pub y: f32,
}

/// Hover/drag controller for one chart instance
#[derive(Debug, Default)]
pub struct InteractionController {
    hovered: Option<HoverTarget>,
    dragged: Option<usize>,
    tooltip: Option<Tooltip>,
    record_count: usize,
}

impl InteractionController {
    /// Create a controller; `record_count` is the tooltip percentage
    /// denominator
    pub fn new(record_count: usize) -> Self {
        Self {
            record_count,
            ..Default::default()
        }
    }

    /// Current tooltip, if one is showing
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Current hover target
    pub fn hovered(&self) -> Option<HoverTarget> {
        self.hovered
    }

    /// Index of the node being dragged, if any
    pub fn dragged(&self) -> Option<usize> {
        self.dragged
    }

    /// Pointer entered a node: show its tooltip and emphasize its links
    pub fn on_node_hover(&mut self, index: usize, node: &SimNode, pointer_x: f32, pointer_y: f32) {
        let percentage = if self.record_count > 0 {
            node.count as f32 / self.record_count as f32 * 100.0
        } else {
            0.0
        };

        self.hovered = Some(HoverTarget::Node(index));
        self.tooltip = Some(Tooltip {
            title: Some(node.id.clone()),
            lines: vec![
                format!("Count: {}", node.count),
                format!("Percentage: {percentage:.1}%"),
            ],
            x: pointer_x + 10.0,
            y: pointer_y - 28.0,
        });
    }

    /// Pointer entered a link: show its tooltip and emphasize it
    pub fn on_link_hover(
        &mut self,
        index: usize,
        source_id: &str,
        target_id: &str,
        weight: u32,
        pointer_x: f32,
        pointer_y: f32,
    ) {
        self.hovered = Some(HoverTarget::Link(index));
        self.tooltip = Some(Tooltip {
            title: Some("Connection".to_string()),
            lines: vec![
                format!("{source_id} — {target_id}"),
                format!("Strength: {weight}"),
            ],
            x: pointer_x + 10.0,
            y: pointer_y - 28.0,
        });
    }

    /// Pointer left: release the tooltip and restore uniform opacity
    pub fn on_hover_end(&mut self) {
        self.hovered = None;
        self.tooltip = None;
    }

    /// Opacity of one link under the current hover state
    pub fn link_opacity(&self, index: usize, link: &SimLink) -> f32 {
        match self.hovered {
            Some(HoverTarget::Node(n)) => {
                if link.source == n || link.target == n {
                    EMPHASIZED_OPACITY
                } else {
                    DIMMED_OPACITY
                }
            }
            Some(HoverTarget::Link(l)) => {
                if l == index {
                    EMPHASIZED_OPACITY
                } else {
                    BASE_OPACITY
                }
            }
            None => BASE_OPACITY,
        }
    }

    /// Drag start: pin the node at its current position and reheat
    pub fn on_drag_start(&mut self, sim: &mut Simulation, index: usize) {
        let Some(node) = sim.nodes.get(index) else {
            return;
        };
        let (x, y) = (node.x, node.y);
        sim.pin(index, x, y);
        self.dragged = Some(index);
    }

    /// Drag move: follow the pointer with the pin
    pub fn on_drag_move(&mut self, sim: &mut Simulation, x: f32, y: f32) {
        if let Some(index) = self.dragged {
            sim.pin(index, x, y);
        }
    }

    /// Drag end: release the pin, letting the node rejoin free simulation
    pub fn on_drag_end(&mut self, sim: &mut Simulation) {
        if let Some(index) = self.dragged.take() {
            sim.unpin(index);
        }
    }

    /// Release all interaction state (teardown and dataset replacement)
    pub fn reset(&mut self) {
        self.hovered = None;
        self.dragged = None;
        self.tooltip = None;
    }
}
