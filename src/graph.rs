//! Attributed graph data structures
//!
//! The graph is an undirected simple graph whose nodes are identified by
//! `0..n` (the petgraph node index). Every node and edge carries a fixed set
//! of synthetic attributes.

use std::fmt;

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::Serialize;

/// Categorical "viable" attribute of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Viability {
    Yes,
    No,
}

impl Viability {
    /// All categories, in the order they are drawn from
    pub const ALL: [Viability; 2] = [Viability::Yes, Viability::No];

    /// String label as it appears in chart data
    pub fn as_str(&self) -> &'static str {
        match self {
            Viability::Yes => "yes",
            Viability::No => "no",
        }
    }
}

impl fmt::Display for Viability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes attached to every node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeAttributes {
    /// Continuous value drawn from the standard normal distribution
    pub weight: f64,
    /// Random integer identifier in `0..1000`
    pub name: u32,
    pub viable: Viability,
}

/// Attributes attached to every edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeAttributes {
    /// Uniform value in `[1, 10]`
    pub weight: f64,
}

/// Undirected graph with attributed nodes and edges
#[derive(Debug, Clone, Default)]
pub struct Graph {
    inner: UnGraph<NodeAttributes, EdgeAttributes>,
}

/// A borrowed view of one edge
#[derive(Debug, Clone, Copy)]
pub struct EdgeView<'a> {
    pub id: usize,
    pub source: usize,
    pub target: usize,
    pub attributes: &'a EdgeAttributes,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its id
    pub fn add_node(&mut self, attributes: NodeAttributes) -> usize {
        self.inner.add_node(attributes).index()
    }

    /// Add an edge between two existing nodes.
    ///
    /// Returns `None` for self-loops, unknown nodes, or when the edge
    /// already exists, keeping the graph simple.
    pub fn add_edge(&mut self, a: usize, b: usize, attributes: EdgeAttributes) -> Option<usize> {
        if a == b || a >= self.node_count() || b >= self.node_count() {
            return None;
        }
        let (a, b) = (NodeIndex::new(a), NodeIndex::new(b));
        if self.inner.find_edge(a, b).is_some() {
            return None;
        }
        Some(self.inner.add_edge(a, b, attributes).index())
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn node(&self, id: usize) -> Option<&NodeAttributes> {
        self.inner.node_weight(NodeIndex::new(id))
    }

    pub fn edge(&self, id: usize) -> Option<&EdgeAttributes> {
        self.inner.edge_weight(EdgeIndex::new(id))
    }

    /// Iterate over `(id, attributes)` in id order
    pub fn nodes(&self) -> impl Iterator<Item = (usize, &NodeAttributes)> {
        self.inner
            .node_indices()
            .map(move |idx| (idx.index(), &self.inner[idx]))
    }

    /// Iterate over edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> {
        self.inner.edge_references().map(|edge| EdgeView {
            id: edge.id().index(),
            source: edge.source().index(),
            target: edge.target().index(),
            attributes: edge.weight(),
        })
    }

    pub fn contains_edge(&self, a: usize, b: usize) -> bool {
        a < self.node_count()
            && b < self.node_count()
            && self
                .inner
                .find_edge(NodeIndex::new(a), NodeIndex::new(b))
                .is_some()
    }

    pub fn degree(&self, id: usize) -> usize {
        if id >= self.node_count() {
            return 0;
        }
        self.inner.neighbors(NodeIndex::new(id)).count()
    }

    /// Fraction of possible edges that are present
    pub fn density(&self) -> f64 {
        let n = self.node_count();
        if n < 2 {
            return 0.0;
        }
        let possible = n * (n - 1) / 2;
        self.edge_count() as f64 / possible as f64
    }
}

#[cfg(test)]
pub(crate) fn node(weight: f64, name: u32, viable: Viability) -> NodeAttributes {
    NodeAttributes {
        weight,
        name,
        viable,
    }
}
