//! Co-occurrence graph construction
//!
//! Aggregates raw records into a weighted label graph: one node per distinct
//! label with its record count, one link per unordered label pair with its
//! co-occurrence count. Outputs graph topology without positions - positions
//! are computed at runtime by the force simulation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A raw input record carrying a set of labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Labels attached to this record
    pub labels: Vec<String>,
}

impl Record {
    /// Create a record from anything yielding label strings
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }
}

/// A node in the co-occurrence graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique label identifier
    pub id: String,

    /// Number of records containing this label (duplicates within one
    /// record count once)
    pub count: u32,
}

/// A weighted link between two labels
///
/// Identity is the unordered pair of endpoints; the builder stores the
/// lexically smaller label as `source` so `(a, b)` and `(b, a)` aggregate
/// to the same entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    /// Lexically smaller endpoint label
    pub source: String,

    /// Lexically larger endpoint label
    pub target: String,

    /// Number of records where both labels co-occur
    pub weight: u32,
}

/// Complete co-occurrence graph topology
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelGraph {
    /// All nodes, in first-seen order
    pub nodes: Vec<Node>,

    /// All links, in first-co-occurrence order
    pub links: Vec<Link>,

    /// Total records pushed, including unlabeled ones - the denominator
    /// for tooltip percentages
    pub record_count: usize,
}

impl LabelGraph {
    /// An empty graph for the no-data render path
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            links: Vec::new(),
            record_count: 0,
        }
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Largest node count - the domain maximum for the radius scale
    pub fn max_count(&self) -> u32 {
        self.nodes.iter().map(|n| n.count).max().unwrap_or(0)
    }

    /// Export the topology as pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Builder that aggregates records into a [`LabelGraph`]
///
/// O(sum of labels-per-record squared) over the pair loop.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    node_index: HashMap<String, usize>,
    links: Vec<Link>,
    link_index: HashMap<(String, String), usize>,
    record_count: usize,
}

impl GraphBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a record slice in one shot
    pub fn from_records(records: &[Record]) -> LabelGraph {
        let mut builder = Self::new();
        for record in records {
            builder.push_record(record);
        }
        builder.build()
    }

    /// Aggregate one record into the graph
    ///
    /// Duplicate labels within the record are treated as a single
    /// occurrence: each distinct label increments its node count once, and
    /// no self-links are created.
    pub fn push_record(&mut self, record: &Record) {
        self.record_count += 1;

        // Distinct labels in first-seen order
        let mut labels: Vec<&str> = Vec::with_capacity(record.labels.len());
        for label in &record.labels {
            if !labels.contains(&label.as_str()) {
                labels.push(label);
            }
        }

        for label in &labels {
            match self.node_index.get(*label) {
                Some(&i) => self.nodes[i].count += 1,
                None => {
                    self.node_index.insert((*label).to_string(), self.nodes.len());
                    self.nodes.push(Node {
                        id: (*label).to_string(),
                        count: 1,
                    });
                }
            }
        }

        for i in 0..labels.len() {
            for j in (i + 1)..labels.len() {
                let (a, b) = if labels[i] < labels[j] {
                    (labels[i], labels[j])
                } else {
                    (labels[j], labels[i])
                };
                let key = (a.to_string(), b.to_string());
                match self.link_index.get(&key) {
                    Some(&k) => self.links[k].weight += 1,
                    None => {
                        self.link_index.insert(key, self.links.len());
                        self.links.push(Link {
                            source: a.to_string(),
                            target: b.to_string(),
                            weight: 1,
                        });
                    }
                }
            }
        }
    }

    /// Finish aggregation and yield the graph
    pub fn build(self) -> LabelGraph {
        debug!(
            nodes = self.nodes.len(),
            links = self.links.len(),
            records = self.record_count,
            "built co-occurrence graph"
        );

        LabelGraph {
            nodes: self.nodes,
            links: self.links,
            record_count: self.record_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(sets: &[&[&str]]) -> Vec<Record> {
        sets.iter().map(|labels| Record::new(labels.iter().copied())).collect()
    }

    #[test]
    fn empty_records_produce_empty_graph() {
        let graph = GraphBuilder::from_records(&[]);

        assert!(graph.is_empty());
        assert!(graph.links.is_empty());
        assert_eq!(graph.record_count, 0);
        assert_eq!(graph.max_count(), 0);
    }

    #[test]
    fn record_without_labels_counts_toward_denominator_only() {
        let graph = GraphBuilder::from_records(&records(&[&[]]));

        assert!(graph.nodes.is_empty());
        assert!(graph.links.is_empty());
        assert_eq!(graph.record_count, 1);
    }

    #[test]
    fn single_label_produces_node_without_links() {
        let graph = GraphBuilder::from_records(&records(&[&["wifi"]]));

        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.nodes[0].id, "wifi");
        assert_eq!(graph.nodes[0].count, 1);
        assert!(graph.links.is_empty());
    }

    #[test]
    fn co_occurring_labels_produce_weighted_link() {
        let graph = GraphBuilder::from_records(&records(&[&["a", "b"], &["a", "b"]]));

        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.links.len(), 1);
        assert_eq!(graph.links[0].weight, 2);
    }

    #[test]
    fn link_aggregation_is_order_independent() {
        let forward = GraphBuilder::from_records(&records(&[&["a", "b"]]));
        let reverse = GraphBuilder::from_records(&records(&[&["b", "a"]]));

        assert_eq!(forward.links.len(), 1);
        assert_eq!(reverse.links.len(), 1);
        assert_eq!(forward.links[0].source, "a");
        assert_eq!(forward.links[0].target, "b");
        assert_eq!(reverse.links[0].source, "a");
        assert_eq!(reverse.links[0].target, "b");
        assert_eq!(forward.links[0].weight, reverse.links[0].weight);
    }

    #[test]
    fn duplicate_labels_count_once_and_never_self_link() {
        let graph = GraphBuilder::from_records(&records(&[&["a", "a"]]));

        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.nodes[0].count, 1);
        assert!(graph.links.is_empty(), "duplicate label must not self-link");
    }

    #[test]
    fn counts_sum_to_distinct_labels_over_records() {
        let sets: &[&[&str]] = &[
            &["a", "b", "c"],
            &["a", "a", "b"],
            &["d"],
            &[],
        ];
        let graph = GraphBuilder::from_records(&records(sets));

        let distinct_total: u32 = 3 + 2 + 1 + 0;
        let count_total: u32 = graph.nodes.iter().map(|n| n.count).sum();
        assert_eq!(count_total, distinct_total);
    }

    #[test]
    fn triangle_example_aggregates_expected_topology() {
        let graph =
            GraphBuilder::from_records(&records(&[&["A", "B"], &["A", "C"], &["B", "C"]]));

        assert_eq!(graph.nodes.len(), 3);
        for node in &graph.nodes {
            assert_eq!(node.count, 2, "node {} should appear in two records", node.id);
        }

        assert_eq!(graph.links.len(), 3);
        for link in &graph.links {
            assert_eq!(link.weight, 1);
            assert!(link.source < link.target);
        }
        assert_eq!(graph.record_count, 3);
    }

    #[test]
    fn nodes_keep_first_seen_order() {
        let graph = GraphBuilder::from_records(&records(&[&["z", "m"], &["a", "z"]]));

        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "m", "a"]);
    }

    #[test]
    fn graph_roundtrips_through_json() {
        let graph = GraphBuilder::from_records(&records(&[&["a", "b"], &["a", "c"]]));

        let json = graph.to_json().unwrap();
        let restored: LabelGraph = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.nodes.len(), graph.nodes.len());
        assert_eq!(restored.links.len(), graph.links.len());
        assert_eq!(restored.record_count, graph.record_count);
    }
}
