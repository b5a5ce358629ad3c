//! Network chart orchestration
//!
//! Ties the pipeline together for one chart instance: records aggregate
//! into a graph, the graph derives layout parameters, the simulation
//! relaxes positions one tick per host frame, and each frame renders to a
//! scene with the current hover emphasis. Replacing the dataset or clearing
//! the chart stops the running simulation and releases the tooltip.

use tracing::debug;

use crate::graph::{GraphBuilder, LabelGraph, Record};
use crate::interaction::{InteractionController, Tooltip};
use crate::scale::LayoutParameters;
use crate::scene::{Scene, Shape, TextAnchor, TextBaseline};
use crate::simulation::{Phase, Simulation};

/// Chart title drawn in the top-left corner
const TITLE: &str = "Network Chart";
const TITLE_SIZE: f32 = 30.0;

/// Gap between a node's circle and its label
const LABEL_GAP: f32 = 2.0;

/// Canvas dimensions for one network chart
#[derive(Debug, Clone, Copy)]
pub struct NetworkConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// A co-occurrence network chart instance
pub struct NetworkChart {
    config: NetworkConfig,
    graph: LabelGraph,
    params: LayoutParameters,
    simulation: Option<Simulation>,
    interaction: InteractionController,
}

impl NetworkChart {
    pub fn new(config: NetworkConfig) -> Self {
        Self {
            config,
            graph: LabelGraph::empty(),
            params: LayoutParameters::derive(0, config.width, config.height, 0),
            simulation: None,
            interaction: InteractionController::new(0),
        }
    }

    /// Replace the dataset
    ///
    /// Cancels the previous run: rebuilds the graph, parameters, and
    /// simulation, and resets interaction state so nothing leaks across
    /// datasets. An empty record slice leaves the chart rendering nothing.
    pub fn set_records(&mut self, records: &[Record]) {
        self.graph = GraphBuilder::from_records(records);
        self.params = LayoutParameters::derive(
            self.graph.nodes.len(),
            self.config.width,
            self.config.height,
            self.graph.max_count(),
        );
        self.interaction = InteractionController::new(self.graph.record_count);

        self.simulation = if self.graph.is_empty() {
            None
        } else {
            Some(Simulation::new(
                &self.graph,
                &self.params,
                self.config.width,
                self.config.height,
            ))
        };

        debug!(
            nodes = self.graph.nodes.len(),
            links = self.graph.links.len(),
            "network dataset replaced"
        );
    }

    /// Tear down the chart: stop the simulation and release the tooltip
    pub fn clear(&mut self) {
        self.graph = LabelGraph::empty();
        self.simulation = None;
        self.interaction.reset();
        debug!("network chart cleared");
    }

    /// Advance the layout one tick; call once per host frame
    pub fn tick(&mut self) {
        if let Some(sim) = &mut self.simulation {
            sim.tick();
        }
    }

    /// Whether the layout has stopped moving
    pub fn is_settled(&self) -> bool {
        self.simulation
            .as_ref()
            .is_none_or(|s| s.phase() == Phase::Settled)
    }

    /// Drive the layout to convergence synchronously (headless hosts)
    pub fn settle(&mut self, max_iterations: usize) {
        if let Some(sim) = &mut self.simulation {
            sim.run_to_convergence(max_iterations);
        }
    }

    pub fn graph(&self) -> &LabelGraph {
        &self.graph
    }

    pub fn params(&self) -> &LayoutParameters {
        &self.params
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.interaction.tooltip()
    }

    /// Emit the scene for the current positions
    ///
    /// Draw order: links, then node circles, then node labels, then the
    /// chart title. With no dataset the scene is empty.
    pub fn render_frame(&self) -> Scene {
        let mut scene = Scene::new(self.config.width, self.config.height);
        let Some(sim) = &self.simulation else {
            return scene;
        };

        for (i, link) in sim.links.iter().enumerate() {
            let source = &sim.nodes[link.source];
            let target = &sim.nodes[link.target];
            scene.push(Shape::Line {
                x1: source.x,
                y1: source.y,
                x2: target.x,
                y2: target.y,
                width: (link.weight as f32).sqrt(),
                opacity: self.interaction.link_opacity(i, link),
            });
        }

        for node in &sim.nodes {
            scene.push(Shape::Circle {
                cx: node.x,
                cy: node.y,
                r: self.params.radius_of(node.count),
                filled: true,
            });
        }

        for node in &sim.nodes {
            scene.push(Shape::Text {
                x: node.x,
                y: node.y - self.params.radius_of(node.count) - LABEL_GAP,
                content: node.id.clone(),
                size: self.params.font_size,
                anchor: TextAnchor::Middle,
                baseline: TextBaseline::Alphabetic,
            });
        }

        scene.push(Shape::Text {
            x: 10.0,
            y: 30.0,
            content: TITLE.to_string(),
            size: TITLE_SIZE,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
        });

        scene
    }

    /// Find the node under canvas coordinates (hit test against each
    /// node's scaled radius)
    pub fn node_at(&self, x: f32, y: f32) -> Option<usize> {
        let sim = self.simulation.as_ref()?;
        for (i, node) in sim.nodes.iter().enumerate() {
            let r = self.params.radius_of(node.count);
            let dx = x - node.x;
            let dy = y - node.y;
            if dx * dx + dy * dy <= r * r {
                return Some(i);
            }
        }
        None
    }

    /// Find a link near canvas coordinates (distance to midpoint)
    pub fn link_at(&self, x: f32, y: f32, threshold: f32) -> Option<usize> {
        let sim = self.simulation.as_ref()?;
        for (i, link) in sim.links.iter().enumerate() {
            let source = &sim.nodes[link.source];
            let target = &sim.nodes[link.target];

            let mid_x = (source.x + target.x) / 2.0;
            let mid_y = (source.y + target.y) / 2.0;

            let dx = x - mid_x;
            let dy = y - mid_y;
            if (dx * dx + dy * dy).sqrt() < threshold {
                return Some(i);
            }
        }
        None
    }

    /// Pointer entered node `index`
    pub fn hover_node(&mut self, index: usize, pointer_x: f32, pointer_y: f32) {
        let Some(sim) = &self.simulation else {
            return;
        };
        let Some(node) = sim.nodes.get(index) else {
            return;
        };
        self.interaction
            .on_node_hover(index, node, pointer_x, pointer_y);
    }

    /// Pointer entered link `index`
    pub fn hover_link(&mut self, index: usize, pointer_x: f32, pointer_y: f32) {
        let Some(sim) = &self.simulation else {
            return;
        };
        let Some(link) = sim.links.get(index) else {
            return;
        };
        self.interaction.on_link_hover(
            index,
            &sim.nodes[link.source].id,
            &sim.nodes[link.target].id,
            link.weight,
            pointer_x,
            pointer_y,
        );
    }

    /// Pointer left whatever it was over
    pub fn hover_end(&mut self) {
        self.interaction.on_hover_end();
    }

    /// Start dragging node `index`, pinning it at its current position
    pub fn drag_start(&mut self, index: usize) {
        if let Some(sim) = &mut self.simulation {
            self.interaction.on_drag_start(sim, index);
        }
    }

    /// Follow the pointer with the dragged node
    pub fn drag_move(&mut self, x: f32, y: f32) {
        if let Some(sim) = &mut self.simulation {
            self.interaction.on_drag_move(sim, x, y);
        }
    }

    /// Release the dragged node back into free simulation
    pub fn drag_end(&mut self) {
        if let Some(sim) = &mut self.simulation {
            self.interaction.on_drag_end(sim);
        }
    }
}

impl Default for NetworkChart {
    fn default() -> Self {
        Self::new(NetworkConfig::default())
    }
}
