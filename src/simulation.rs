//! Force-directed layout simulation
//!
//! Iterative relaxation that resolves a co-occurrence graph into stable 2D
//! positions: a spring force per link, pairwise repulsion, and a centering
//! pull toward the canvas center. The step function is an explicit
//! `tick(&mut self)` so any scheduler (frame callback, timer, or a test
//! harness) can drive it synchronously.

use std::collections::HashMap;

use tracing::debug;

use crate::graph::LabelGraph;
use crate::scale::LayoutParameters;

/// A node with kinematic state for simulation
#[derive(Debug, Clone)]
pub struct SimNode {
    /// Label identifier (from the graph node)
    pub id: String,
    /// Record count (from the graph node)
    pub count: u32,
    /// Position in canvas space
    pub x: f32,
    pub y: f32,
    /// Velocity
    pub vx: f32,
    pub vy: f32,
    /// Pinned position, present only while dragged
    pub fx: Option<f32>,
    pub fy: Option<f32>,
}

impl SimNode {
    /// Whether this node is pinned to a fixed position
    pub fn is_pinned(&self) -> bool {
        self.fx.is_some() && self.fy.is_some()
    }
}

/// A link for simulation (indices into the node array)
#[derive(Debug, Clone)]
pub struct SimLink {
    pub source: usize,
    pub target: usize,
    /// Co-occurrence weight (from the graph link)
    pub weight: u32,
}

/// Configuration for the force simulation
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Repulsion strength (negative = repulsion)
    pub charge: f32,
    /// Link distance (rest length)
    pub link_distance: f32,
    /// Link strength
    pub link_strength: f32,
    /// Center force strength
    pub center_strength: f32,
    /// Velocity decay (friction)
    pub velocity_decay: f32,
    /// Current alpha (simulation temperature)
    pub alpha: f32,
    /// Alpha value the relaxation pulls toward (raised while dragging)
    pub alpha_target: f32,
    /// Minimum alpha before stopping
    pub alpha_min: f32,
    /// Alpha decay rate
    pub alpha_decay: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            charge: -200.0,
            link_distance: 100.0,
            link_strength: 1.0,
            center_strength: 0.1,
            velocity_decay: 0.6,
            alpha: 1.0,
            alpha_target: 0.0,
            alpha_min: 0.001,
            alpha_decay: 0.01,
        }
    }
}

/// Alpha floor restored when a drag pins a node, so the rest of the graph
/// keeps adjusting around it
pub const DRAG_ALPHA_TARGET: f32 = 0.3;

/// Lifecycle of one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nodes placed at starting positions, no tick run yet
    Initializing,
    /// Iterative relaxation in progress
    Running,
    /// Alpha decayed below the stop threshold; positions frozen
    Settled,
}

/// Force-directed layout engine
pub struct Simulation {
    pub nodes: Vec<SimNode>,
    pub links: Vec<SimLink>,
    pub config: SimulationConfig,
    phase: Phase,
    center_x: f32,
    center_y: f32,
}

impl Simulation {
    /// Create a simulation from graph topology and layout parameters
    ///
    /// Nodes start distributed on a circle around the canvas center, so the
    /// initial placement is fully deterministic. Link endpoint ids resolve
    /// to node indices; a link naming an unknown id is dropped rather than
    /// panicking (GraphBuilder never produces one).
    pub fn new(graph: &LabelGraph, params: &LayoutParameters, width: f32, height: f32) -> Self {
        let total = graph.nodes.len();
        let center_x = width / 2.0;
        let center_y = height / 2.0;

        let nodes: Vec<SimNode> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let angle = 2.0 * std::f32::consts::PI * (i as f32) / (total.max(1) as f32);
                SimNode {
                    id: n.id.clone(),
                    count: n.count,
                    x: center_x + 100.0 * angle.cos(),
                    y: center_y + 100.0 * angle.sin(),
                    vx: 0.0,
                    vy: 0.0,
                    fx: None,
                    fy: None,
                }
            })
            .collect();

        let node_id_to_index: HashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect();

        let links: Vec<SimLink> = graph
            .links
            .iter()
            .filter_map(|l| {
                let source = *node_id_to_index.get(l.source.as_str())?;
                let target = *node_id_to_index.get(l.target.as_str())?;
                Some(SimLink {
                    source,
                    target,
                    weight: l.weight,
                })
            })
            .collect();

        let config = SimulationConfig {
            charge: -200.0 * (width / 800.0),
            link_distance: params.link_distance,
            ..Default::default()
        };

        Self {
            nodes,
            links,
            config,
            phase: Phase::Initializing,
            center_x,
            center_y,
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Check if more ticks will move the layout
    pub fn is_running(&self) -> bool {
        self.config.alpha >= self.config.alpha_min
            || self.config.alpha_target >= self.config.alpha_min
    }

    /// Run one simulation tick
    ///
    /// Applies link, many-body, and center forces, integrates velocities,
    /// and relaxes alpha one step toward its target. Positions read after
    /// this returns are fully computed for the tick.
    pub fn tick(&mut self) {
        if self.nodes.is_empty() {
            self.phase = Phase::Settled;
            return;
        }
        if self.phase == Phase::Settled {
            return;
        }
        self.phase = Phase::Running;

        self.config.alpha +=
            (self.config.alpha_target - self.config.alpha) * self.config.alpha_decay;

        self.apply_link_force();
        self.apply_many_body_force();
        self.apply_center_force();

        for node in &mut self.nodes {
            if let (Some(fx), Some(fy)) = (node.fx, node.fy) {
                // Pinned nodes are immune to force integration
                node.x = fx;
                node.y = fy;
                node.vx = 0.0;
                node.vy = 0.0;
                continue;
            }
            node.vx *= self.config.velocity_decay;
            node.vy *= self.config.velocity_decay;
            node.x += node.vx * self.config.alpha;
            node.y += node.vy * self.config.alpha;
        }

        if self.config.alpha < self.config.alpha_min
            && self.config.alpha_target < self.config.alpha_min
        {
            self.phase = Phase::Settled;
            debug!(nodes = self.nodes.len(), "layout settled");
        }
    }

    /// Pin a node to `(x, y)` and reheat the simulation (drag start/move)
    ///
    /// The position applies eagerly, so it is observable without an
    /// intervening tick. Raising the alpha target keeps the rest of the
    /// graph adjusting around the pinned node.
    pub fn pin(&mut self, index: usize, x: f32, y: f32) {
        let Some(node) = self.nodes.get_mut(index) else {
            return;
        };
        node.fx = Some(x);
        node.fy = Some(y);
        node.x = x;
        node.y = y;
        node.vx = 0.0;
        node.vy = 0.0;

        self.config.alpha_target = DRAG_ALPHA_TARGET;
        if self.phase == Phase::Settled {
            self.phase = Phase::Running;
        }
    }

    /// Release a pinned node, letting it rejoin free simulation (drag end)
    pub fn unpin(&mut self, index: usize) {
        let Some(node) = self.nodes.get_mut(index) else {
            return;
        };
        node.fx = None;
        node.fy = None;

        self.config.alpha_target = 0.0;
    }

    /// Current positions of both endpoints of every link
    pub fn link_endpoints(&self) -> impl Iterator<Item = ((f32, f32), (f32, f32))> + '_ {
        self.links.iter().map(|l| {
            let s = &self.nodes[l.source];
            let t = &self.nodes[l.target];
            ((s.x, s.y), (t.x, t.y))
        })
    }

    /// Apply spring force between connected nodes
    fn apply_link_force(&mut self) {
        for link in &self.links {
            let (source, target) = (link.source, link.target);

            let dx = self.nodes[target].x - self.nodes[source].x;
            let dy = self.nodes[target].y - self.nodes[source].y;

            let dist = (dx * dx + dy * dy).sqrt().max(1.0);

            // Hooke's law: F = k * (x - x0)
            let stretch = dist - self.config.link_distance;
            let force = self.config.link_strength * stretch / dist;

            let fx = force * dx;
            let fy = force * dy;

            self.nodes[source].vx += fx;
            self.nodes[source].vy += fy;
            self.nodes[target].vx -= fx;
            self.nodes[target].vy -= fy;
        }
    }

    /// Apply repulsion between all node pairs
    fn apply_many_body_force(&mut self) {
        let n = self.nodes.len();

        for i in 0..n {
            for j in (i + 1)..n {
                let dx = self.nodes[j].x - self.nodes[i].x;
                let dy = self.nodes[j].y - self.nodes[i].y;

                let dist_sq = (dx * dx + dy * dy).max(1.0);
                let dist = dist_sq.sqrt();

                // Coulomb's law: F = k * q1 * q2 / r^2
                let force = self.config.charge / dist_sq;

                let fx = force * dx / dist;
                let fy = force * dy / dist;

                self.nodes[i].vx -= fx;
                self.nodes[i].vy -= fy;
                self.nodes[j].vx += fx;
                self.nodes[j].vy += fy;
            }
        }
    }

    /// Apply centering force toward the canvas center
    fn apply_center_force(&mut self) {
        for node in &mut self.nodes {
            node.vx -= (node.x - self.center_x) * self.config.center_strength;
            node.vy -= (node.y - self.center_y) * self.config.center_strength;
        }
    }

    /// Run the simulation to convergence (or max iterations)
    pub fn run_to_convergence(&mut self, max_iterations: usize) {
        for _ in 0..max_iterations {
            if !self.is_running() {
                break;
            }
            self.tick();
        }
    }
}
