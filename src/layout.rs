//! Force-directed layout (Fruchterman–Reingold)
//!
//! The layout is computed once per run and shared by every renderer so that
//! all artifacts place nodes at the same coordinates.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::Graph;

/// Distances below this are clipped to avoid infinite repulsion
const MIN_DISTANCE: f64 = 0.01;

/// A 2D coordinate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Parameters of the spring layout
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpringParams {
    /// Maximum number of iterations
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Half-width of the square the result is scaled into
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// Stop early once the mean node movement drops below this
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Optimal distance between nodes, `sqrt(1/n)` when unset
    #[serde(default)]
    pub optimal_distance: Option<f64>,
}

fn default_iterations() -> usize {
    50
}

fn default_scale() -> f64 {
    1.0
}

fn default_threshold() -> f64 {
    1e-4
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            scale: default_scale(),
            threshold: default_threshold(),
            optimal_distance: None,
        }
    }
}

/// Node id -> position mapping
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    positions: Vec<Point>,
}

impl Layout {
    pub fn from_positions(positions: Vec<Point>) -> Self {
        Self { positions }
    }

    pub fn position(&self, node: usize) -> Option<Point> {
        self.positions.get(node).copied()
    }

    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Bounding box as `(min, max)` corners
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let first = *self.positions.first()?;
        let bounds = self.positions.iter().fold((first, first), |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        });
        Some(bounds)
    }
}

/// Compute a force-directed layout of `graph`.
///
/// Edge weights act as spring strengths. Initial positions are drawn from
/// `rng`, so a seeded generator gives a reproducible layout.
pub fn spring_layout<R: Rng + ?Sized>(
    graph: &Graph,
    params: &SpringParams,
    rng: &mut R,
) -> Layout {
    let n = graph.node_count();
    match n {
        0 => return Layout::default(),
        1 => return Layout::from_positions(vec![Point::default()]),
        _ => {}
    }

    let mut positions: Vec<Point> = (0..n)
        .map(|_| Point::new(rng.random(), rng.random()))
        .collect();
    let adjacency = weighted_adjacency(graph);
    let iterations = fruchterman_reingold(&mut positions, &adjacency, params);
    debug!(iterations, nodes = n, "spring layout converged");

    rescale(&mut positions, params.scale);
    Layout::from_positions(positions)
}

/// Dense symmetric adjacency matrix holding edge weights, row-major
fn weighted_adjacency(graph: &Graph) -> Vec<f64> {
    let n = graph.node_count();
    let mut matrix = vec![0.0; n * n];
    for edge in graph.edges() {
        let w = edge.attributes.weight;
        matrix[edge.source * n + edge.target] = w;
        matrix[edge.target * n + edge.source] = w;
    }
    matrix
}

/// Run the simulation in place; returns the number of iterations performed
fn fruchterman_reingold(
    positions: &mut [Point],
    adjacency: &[f64],
    params: &SpringParams,
) -> usize {
    let n = positions.len();
    let k = params
        .optimal_distance
        .unwrap_or_else(|| (1.0 / n as f64).sqrt());

    let (lo, hi) = Layout::from_positions(positions.to_vec())
        .bounds()
        .unwrap_or_default();
    let mut temperature = (hi.x - lo.x).max(hi.y - lo.y) * 0.1;
    let cooling = temperature / (params.iterations + 1) as f64;

    let mut displacement = vec![Point::default(); n];
    for iteration in 0..params.iterations {
        for (i, disp) in displacement.iter_mut().enumerate() {
            let (mut dx_sum, mut dy_sum) = (0.0, 0.0);
            for j in 0..n {
                let dx = positions[i].x - positions[j].x;
                let dy = positions[i].y - positions[j].y;
                let distance = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                let force = k * k / (distance * distance) - adjacency[i * n + j] * distance / k;
                dx_sum += dx * force;
                dy_sum += dy * force;
            }
            *disp = Point::new(dx_sum, dy_sum);
        }

        let mut moved_sq = 0.0;
        for (pos, disp) in positions.iter_mut().zip(&displacement) {
            let mut length = (disp.x * disp.x + disp.y * disp.y).sqrt();
            if length < MIN_DISTANCE {
                length = 0.1;
            }
            let step_x = disp.x * temperature / length;
            let step_y = disp.y * temperature / length;
            pos.x += step_x;
            pos.y += step_y;
            moved_sq += step_x * step_x + step_y * step_y;
        }
        temperature -= cooling;

        if moved_sq.sqrt() / (n as f64) < params.threshold {
            return iteration + 1;
        }
    }
    params.iterations
}

/// Center positions on the origin and scale the largest absolute coordinate
/// to `scale`
pub fn rescale(positions: &mut [Point], scale: f64) {
    if positions.is_empty() {
        return;
    }
    let count = positions.len() as f64;
    let mean_x = positions.iter().map(|p| p.x).sum::<f64>() / count;
    let mean_y = positions.iter().map(|p| p.y).sum::<f64>() / count;

    let mut limit: f64 = 0.0;
    for p in positions.iter_mut() {
        p.x -= mean_x;
        p.y -= mean_y;
        limit = limit.max(p.x.abs()).max(p.y.abs());
    }

    if limit > 0.0 {
        let factor = scale / limit;
        for p in positions.iter_mut() {
            p.x *= factor;
            p.y *= factor;
        }
    }
}
