//! Random graph generation and attribute assignment
//!
//! Topology comes from the Erdős–Rényi G(n, p) model. Instead of flipping a
//! coin for each of the `n(n-1)/2` candidate pairs, the generator jumps over
//! runs of absent edges with geometrically distributed skips, which costs
//! O(n + m) random draws.

use rand::Rng;
use rand::seq::IndexedRandom;
use rand_distr::StandardNormal;
use tracing::debug;

use crate::graph::{EdgeAttributes, Graph, NodeAttributes, Viability};

/// Exclusive upper bound of the node `name` attribute
pub const NAME_UPPER_BOUND: u32 = 1000;

/// Inclusive range of edge weights
pub const EDGE_WEIGHT_RANGE: (f64, f64) = (1.0, 10.0);

/// Bare topology: node count plus undirected edge list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Topology {
    pub node_count: usize,
    pub edges: Vec<(usize, usize)>,
}

/// Generate a G(n, p) random graph.
///
/// `p <= 0` yields `n` isolated nodes and `p >= 1` the complete graph.
/// Edges are emitted as `(v, w)` with `w < v`.
pub fn gnp_random_graph<R: Rng + ?Sized>(n: usize, p: f64, rng: &mut R) -> Topology {
    if p <= 0.0 || n < 2 {
        return Topology {
            node_count: n,
            edges: Vec::new(),
        };
    }
    if p >= 1.0 {
        return complete_graph(n);
    }

    // ln(1 - p) without cancellation, so tiny p stays strictly negative
    let log_q = (-p).ln_1p();
    let mut edges = Vec::new();
    let mut v: usize = 1;
    let mut w: i64 = -1;

    while v < n {
        let r: f64 = rng.random();
        let skip = ((1.0 - r).ln() / log_q) as i64;
        w = w.saturating_add(1).saturating_add(skip);
        while v < n && w >= v as i64 {
            w -= v as i64;
            v += 1;
        }
        if v < n {
            edges.push((v, w as usize));
        }
    }

    Topology {
        node_count: n,
        edges,
    }
}

fn complete_graph(n: usize) -> Topology {
    let edges = (1..n)
        .flat_map(|v| (0..v).map(move |w| (v, w)))
        .collect();
    Topology {
        node_count: n,
        edges,
    }
}

/// Draw the synthetic attributes of one node.
///
/// Draw order is weight, name, viable.
pub fn sample_node_attributes<R: Rng + ?Sized>(rng: &mut R) -> NodeAttributes {
    let weight: f64 = rng.sample(StandardNormal);
    let name = rng.random_range(0..NAME_UPPER_BOUND);
    let viable = *Viability::ALL.choose(rng).unwrap_or(&Viability::No);
    NodeAttributes {
        weight,
        name,
        viable,
    }
}

pub fn sample_edge_attributes<R: Rng + ?Sized>(rng: &mut R) -> EdgeAttributes {
    let (low, high) = EDGE_WEIGHT_RANGE;
    EdgeAttributes {
        weight: rng.random_range(low..high),
    }
}

/// Attach attributes to a topology: all nodes first (in id order), then all
/// edges (in edge order).
pub fn decorate<R: Rng + ?Sized>(topology: &Topology, rng: &mut R) -> Graph {
    let mut graph = Graph::new();
    for _ in 0..topology.node_count {
        graph.add_node(sample_node_attributes(rng));
    }
    for &(a, b) in &topology.edges {
        let attributes = sample_edge_attributes(rng);
        graph.add_edge(a, b, attributes);
    }
    graph
}

/// Generate and decorate a G(n, p) graph in one step
pub fn generate<R: Rng + ?Sized>(n: usize, p: f64, rng: &mut R) -> Graph {
    let topology = gnp_random_graph(n, p, rng);
    debug!(
        nodes = topology.node_count,
        edges = topology.edges.len(),
        "generated G(n, p) topology"
    );
    decorate(&topology, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_default_graph_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = generate(30, 0.25, &mut rng);

        assert_eq!(graph.node_count(), 30);
        // Expected 108.75 edges, standard deviation ~9
        assert!(
            (63..=155).contains(&graph.edge_count()),
            "edge count {} outside tolerance",
            graph.edge_count()
        );
    }

    #[test]
    fn test_mean_edge_count_matches_probability() {
        let mut rng = StdRng::seed_from_u64(2024);
        let runs = 200;
        let total: usize = (0..runs)
            .map(|_| gnp_random_graph(30, 0.25, &mut rng).edges.len())
            .sum();
        let mean = total as f64 / runs as f64;
        // Standard error of the mean is ~0.64
        assert!((mean - 108.75).abs() < 4.0, "mean edge count {}", mean);
    }

    #[test]
    fn test_edges_are_simple_and_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let topology = gnp_random_graph(50, 0.4, &mut rng);

        let mut seen = HashSet::new();
        for &(v, w) in &topology.edges {
            assert!(w < v, "edge ({}, {}) not ordered", v, w);
            assert!(v < 50);
            assert!(seen.insert((v, w)), "duplicate edge ({}, {})", v, w);
        }
    }

    #[test]
    fn test_degenerate_probabilities() {
        let mut rng = StdRng::seed_from_u64(1);

        let empty = gnp_random_graph(10, 0.0, &mut rng);
        assert_eq!(empty.node_count, 10);
        assert!(empty.edges.is_empty());

        let complete = gnp_random_graph(10, 1.0, &mut rng);
        assert_eq!(complete.edges.len(), 45);
    }

    #[test]
    fn test_tiny_probability_terminates() {
        let mut rng = StdRng::seed_from_u64(1);
        let topology = gnp_random_graph(30, 1e-20, &mut rng);
        assert_eq!(topology.node_count, 30);
        assert!(topology.edges.is_empty());
    }

    #[test]
    fn test_tiny_graphs() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(gnp_random_graph(0, 0.5, &mut rng), Topology::default());

        let single = gnp_random_graph(1, 0.9, &mut rng);
        assert_eq!(single.node_count, 1);
        assert!(single.edges.is_empty());
    }

    #[test]
    fn test_node_attributes_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let graph = generate(30, 0.25, &mut rng);

        for (_, attrs) in graph.nodes() {
            assert!(attrs.weight.is_finite());
            assert!(attrs.name < NAME_UPPER_BOUND);
            assert!(Viability::ALL.contains(&attrs.viable));
        }
    }

    #[test]
    fn test_both_viability_categories_drawn() {
        let mut rng = StdRng::seed_from_u64(5);
        let graph = generate(30, 0.25, &mut rng);
        let yes = graph
            .nodes()
            .filter(|(_, a)| a.viable == Viability::Yes)
            .count();
        assert!(yes > 0 && yes < 30);
    }

    #[test]
    fn test_edge_weights_in_range() {
        let mut rng = StdRng::seed_from_u64(9);
        let graph = generate(30, 0.5, &mut rng);
        assert!(graph.edge_count() > 0);

        for edge in graph.edges() {
            let w = edge.attributes.weight;
            assert!((1.0..=10.0).contains(&w), "edge weight {} out of range", w);
        }
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = generate(30, 0.25, &mut StdRng::seed_from_u64(42));
        let b = generate(30, 0.25, &mut StdRng::seed_from_u64(42));

        let nodes_a: Vec<_> = a.nodes().map(|(_, n)| n.clone()).collect();
        let nodes_b: Vec<_> = b.nodes().map(|(_, n)| n.clone()).collect();
        assert_eq!(nodes_a, nodes_b);

        let edges_a: Vec<_> = a.edges().map(|e| (e.source, e.target)).collect();
        let edges_b: Vec<_> = b.edges().map(|e| (e.source, e.target)).collect();
        assert_eq!(edges_a, edges_b);
    }
}
