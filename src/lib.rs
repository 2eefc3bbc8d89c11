//! # netchart - Random Graph Visualization
//!
//! Generates a random attributed graph and exports it as a static image and
//! as interactive Vega-Lite charts.
//!
//! ## Overview
//!
//! A run is a straight pipeline:
//!
//! 1. **Generate** - Erdős–Rényi G(n, p) topology (30 nodes, p = 0.25 by default)
//! 2. **Decorate** - node `weight`, `name`, `viable`; edge `weight`
//! 3. **Layout** - Fruchterman–Reingold spring layout, computed once
//! 4. **Render** - a PNG figure plus four Vega-Lite documents
//!
//! ## Usage
//!
//! ```bash
//! # Write data/networkx-mpl.png and data/chart1.json .. chart4.json
//! netchart
//!
//! # Reproducible run into another directory
//! netchart --seed 42 -o out
//! ```
//!
//! ## Charts
//!
//! - `chart1.json` - nodes and edges, pan/zoom enabled
//! - `chart2.json` - adds node tooltips (`name`, `weight`, `viable`)
//! - `chart3.json` - node fill and edge width encode `weight`
//! - `chart4.json` - brushing nodes filters a bar chart of `viable` counts

pub mod chart;
pub mod config;
pub mod generator;
pub mod graph;
pub mod layout;
pub mod metrics;
pub mod plot;
pub mod raster;
pub mod report;

pub use chart::{
    BrushOptions, ChartError, Datasets, DrawOptions, Encodable, NetworkChart, Table,
    draw_networkx, linked_brush,
};
pub use config::{
    ConfigError, GraphConfig, OutputConfig, PlotConfig, find_config_file, load_config,
    load_config_file,
};
pub use generator::{Topology, decorate, generate, gnp_random_graph};
pub use graph::{EdgeAttributes, Graph, NodeAttributes, Viability};
pub use layout::{Layout, Point, SpringParams, spring_layout};
pub use metrics::{GraphStats, ValueSummary, ViableCounts};
pub use plot::{Artifact, ArtifactKind, PlotError, PlotOutput, chart_views, run};
pub use raster::{FigureStyle, RenderError, render_svg, save_png};
pub use report::{RunSummary, generate_json, generate_summary};
