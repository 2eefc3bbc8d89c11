//! Graph statistics
//!
//! Summarizes a generated graph: size, how the edge count compares with the
//! G(n, p) expectation, degree figures, and attribute distributions.

use serde::Serialize;

use crate::graph::{Graph, Viability};

/// Minimum, maximum and mean of a set of values
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl ValueSummary {
    /// Returns `None` for an empty input
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }
        (count > 0).then(|| ValueSummary {
            min,
            max,
            mean: sum / count as f64,
        })
    }
}

/// Node counts per viability category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ViableCounts {
    pub yes: usize,
    pub no: usize,
}

/// Statistics of a generated graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub edge_probability: f64,
    /// `p * n(n-1)/2`
    pub expected_edges: f64,
    /// Standard deviation of the G(n, p) edge count
    pub edge_std_dev: f64,
    pub density: f64,
    pub mean_degree: f64,
    pub max_degree: usize,
    pub isolated_nodes: usize,
    pub viable: ViableCounts,
    pub node_weight: Option<ValueSummary>,
    pub edge_weight: Option<ValueSummary>,
}

impl GraphStats {
    pub fn compute(graph: &Graph, edge_probability: f64) -> Self {
        let n = graph.node_count();
        let pairs = if n < 2 { 0.0 } else { (n * (n - 1) / 2) as f64 };
        let degrees: Vec<usize> = (0..n).map(|id| graph.degree(id)).collect();

        let mut viable = ViableCounts::default();
        for (_, attrs) in graph.nodes() {
            match attrs.viable {
                Viability::Yes => viable.yes += 1,
                Viability::No => viable.no += 1,
            }
        }

        GraphStats {
            nodes: n,
            edges: graph.edge_count(),
            edge_probability,
            expected_edges: pairs * edge_probability,
            edge_std_dev: (pairs * edge_probability * (1.0 - edge_probability)).sqrt(),
            density: graph.density(),
            mean_degree: if n == 0 {
                0.0
            } else {
                2.0 * graph.edge_count() as f64 / n as f64
            },
            max_degree: degrees.iter().copied().max().unwrap_or(0),
            isolated_nodes: degrees.iter().filter(|&&d| d == 0).count(),
            viable,
            node_weight: ValueSummary::from_values(graph.nodes().map(|(_, a)| a.weight)),
            edge_weight: ValueSummary::from_values(graph.edges().map(|e| e.attributes.weight)),
        }
    }

    /// Distance of the observed edge count from the expectation, in standard
    /// deviations (0 when the edge count is deterministic)
    pub fn edge_z_score(&self) -> f64 {
        if self.edge_std_dev == 0.0 {
            return 0.0;
        }
        (self.edges as f64 - self.expected_edges) / self.edge_std_dev
    }
}
