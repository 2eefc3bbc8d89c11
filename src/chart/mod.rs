//! Interactive chart generation
//!
//! Produces Vega-Lite v5 documents for the node-link drawing:
//! - node and edge tables derived from the graph and its layout
//! - a two-layer chart (edges, nodes) with constant or field encodings
//! - pan/zoom interactivity bound to the scales
//! - a linked brush + bar chart composition

pub mod brush;
pub mod data;
pub mod draw;
pub mod schema;

pub use brush::{BrushOptions, linked_brush};
pub use data::{ChartError, Datasets, Table};
pub use draw::{DrawOptions, Encodable, NetworkChart, draw_networkx};
pub use schema::{Document, View};

/// Wrap a view and its datasets into a pretty-printed JSON document
pub fn to_json(datasets: &Datasets, view: View) -> Result<String, ChartError> {
    let document = Document::new(datasets, view);
    Ok(serde_json::to_string_pretty(&document)?)
}
