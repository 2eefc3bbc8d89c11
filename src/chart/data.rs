//! Tabular chart data
//!
//! Charts read two tables: one row per node, and two rows per edge (one for
//! each endpoint) so that a line mark grouped by `edge` draws the segment.

use serde::Serialize;
use thiserror::Error;

use super::schema::FieldType;
use crate::graph::{Graph, Viability};
use crate::layout::Layout;

/// Errors that can occur while building charts
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Node {0} has no layout position")]
    MissingPosition(usize),

    #[error("Unknown field '{field}' in {table} table")]
    UnknownField { table: &'static str, field: String },

    #[error("Failed to serialize chart: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The two tables charts can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Nodes,
    Edges,
}

impl Table {
    pub const NODE_COLUMNS: [(&'static str, FieldType); 6] = [
        ("node", FieldType::Nominal),
        ("x", FieldType::Quantitative),
        ("y", FieldType::Quantitative),
        ("weight", FieldType::Quantitative),
        ("name", FieldType::Quantitative),
        ("viable", FieldType::Nominal),
    ];

    pub const EDGE_COLUMNS: [(&'static str, FieldType); 7] = [
        ("edge", FieldType::Nominal),
        ("source", FieldType::Nominal),
        ("target", FieldType::Nominal),
        ("pair", FieldType::Nominal),
        ("x", FieldType::Quantitative),
        ("y", FieldType::Quantitative),
        ("weight", FieldType::Quantitative),
    ];

    /// Dataset name used in chart documents
    pub fn name(&self) -> &'static str {
        match self {
            Table::Nodes => "nodes",
            Table::Edges => "edges",
        }
    }

    pub fn columns(&self) -> &'static [(&'static str, FieldType)] {
        match self {
            Table::Nodes => &Self::NODE_COLUMNS,
            Table::Edges => &Self::EDGE_COLUMNS,
        }
    }

    /// Vega-Lite type of a column
    pub fn field_type(&self, field: &str) -> Result<FieldType, ChartError> {
        self.columns()
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| ChartError::UnknownField {
                table: self.name(),
                field: field.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRow {
    pub node: usize,
    pub x: f64,
    pub y: f64,
    pub weight: f64,
    pub name: u32,
    pub viable: Viability,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeRow {
    pub edge: usize,
    pub source: usize,
    pub target: usize,
    pub pair: [usize; 2],
    pub x: f64,
    pub y: f64,
    pub weight: f64,
}

/// Node and edge tables, embedded once per chart document
#[derive(Debug, Clone, Default, Serialize)]
pub struct Datasets {
    pub nodes: Vec<NodeRow>,
    pub edges: Vec<EdgeRow>,
}

impl Datasets {
    pub fn from_graph(graph: &Graph, layout: &Layout) -> Result<Self, ChartError> {
        let position = |node: usize| layout.position(node).ok_or(ChartError::MissingPosition(node));

        let mut nodes = Vec::with_capacity(graph.node_count());
        for (id, attrs) in graph.nodes() {
            let p = position(id)?;
            nodes.push(NodeRow {
                node: id,
                x: p.x,
                y: p.y,
                weight: attrs.weight,
                name: attrs.name,
                viable: attrs.viable,
            });
        }

        let mut edges = Vec::with_capacity(graph.edge_count() * 2);
        for edge in graph.edges() {
            for endpoint in [edge.source, edge.target] {
                let p = position(endpoint)?;
                edges.push(EdgeRow {
                    edge: edge.id,
                    source: edge.source,
                    target: edge.target,
                    pair: [edge.source, edge.target],
                    x: p.x,
                    y: p.y,
                    weight: edge.attributes.weight,
                });
            }
        }

        Ok(Self { nodes, edges })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeAttributes, node};
    use crate::layout::Point;

    fn sample() -> (Graph, Layout) {
        let mut graph = Graph::new();
        graph.add_node(node(0.5, 10, Viability::Yes));
        graph.add_node(node(-0.5, 20, Viability::No));
        graph.add_edge(0, 1, EdgeAttributes { weight: 4.0 });
        let layout = Layout::from_positions(vec![Point::new(-1.0, 0.0), Point::new(1.0, 0.5)]);
        (graph, layout)
    }

    #[test]
    fn test_node_rows() {
        let (graph, layout) = sample();
        let data = Datasets::from_graph(&graph, &layout).unwrap();

        assert_eq!(data.nodes.len(), 2);
        assert_eq!(data.nodes[1].node, 1);
        assert_eq!(data.nodes[1].x, 1.0);
        assert_eq!(data.nodes[1].name, 20);
        assert_eq!(data.nodes[1].viable, Viability::No);
    }

    #[test]
    fn test_two_rows_per_edge() {
        let (graph, layout) = sample();
        let data = Datasets::from_graph(&graph, &layout).unwrap();

        assert_eq!(data.edges.len(), 2);
        assert!(data.edges.iter().all(|r| r.edge == 0 && r.weight == 4.0));
        assert_eq!((data.edges[0].x, data.edges[1].x), (-1.0, 1.0));
        assert_eq!(data.edges[0].pair, [0, 1]);
    }

    #[test]
    fn test_missing_position() {
        let (graph, _) = sample();
        let short = Layout::from_positions(vec![Point::default()]);
        assert!(matches!(
            Datasets::from_graph(&graph, &short),
            Err(ChartError::MissingPosition(1))
        ));
    }

    #[test]
    fn test_field_types() {
        assert_eq!(Table::Nodes.field_type("weight").unwrap(), FieldType::Quantitative);
        assert_eq!(Table::Nodes.field_type("viable").unwrap(), FieldType::Nominal);
        assert_eq!(Table::Edges.field_type("edge").unwrap(), FieldType::Nominal);
        assert!(matches!(
            Table::Edges.field_type("viable"),
            Err(ChartError::UnknownField { table: "edges", .. })
        ));
    }

    #[test]
    fn test_columns_match_serialized_rows() {
        let (graph, layout) = sample();
        let data = Datasets::from_graph(&graph, &layout).unwrap();
        let node = serde_json::to_value(&data.nodes[0]).unwrap();
        let edge = serde_json::to_value(&data.edges[0]).unwrap();

        for (column, _) in Table::Nodes.columns() {
            assert!(node.get(column).is_some(), "node row lacks {}", column);
        }
        for (column, _) in Table::Edges.columns() {
            assert!(edge.get(column).is_some(), "edge row lacks {}", column);
        }
    }
}
