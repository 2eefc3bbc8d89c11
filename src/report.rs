//! Run summary output
//!
//! Writes a short human-readable summary of a run, or the same information
//! as JSON for scripting.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::metrics::{GraphStats, ValueSummary};
use crate::plot::{Artifact, PlotOutput};

/// Machine-readable run summary
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary<'a> {
    pub seed: u64,
    pub stats: &'a GraphStats,
    pub edge_z_score: f64,
    pub artifacts: &'a [Artifact],
}

impl<'a> RunSummary<'a> {
    pub fn new(output: &'a PlotOutput) -> Self {
        Self {
            seed: output.seed,
            stats: &output.stats,
            edge_z_score: output.stats.edge_z_score(),
            artifacts: &output.artifacts,
        }
    }
}

fn format_summary(summary: Option<ValueSummary>) -> String {
    match summary {
        Some(s) => format!("{:.2} .. {:.2} (mean {:.2})", s.min, s.max, s.mean),
        None => "-".to_string(),
    }
}

fn format_bytes(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MiB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Generate a summary report to the given writer
pub fn generate_summary<W: Write>(output: &PlotOutput, writer: &mut W) -> io::Result<()> {
    let stats = &output.stats;

    writeln!(writer, "Random Graph Plot (seed {})", output.seed)?;
    writeln!(writer, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
    writeln!(writer)?;
    writeln!(
        writer,
        "Nodes: {} | Edges: {} (expected {:.1} ± {:.1}, z = {:+.2})",
        stats.nodes,
        stats.edges,
        stats.expected_edges,
        stats.edge_std_dev,
        stats.edge_z_score()
    )?;
    writeln!(
        writer,
        "Density: {:.3} | Mean degree: {:.2} | Max degree: {} | Isolated: {}",
        stats.density, stats.mean_degree, stats.max_degree, stats.isolated_nodes
    )?;
    writeln!(
        writer,
        "Viable: {} yes / {} no",
        stats.viable.yes, stats.viable.no
    )?;
    writeln!(writer, "Node weight: {}", format_summary(stats.node_weight))?;
    writeln!(writer, "Edge weight: {}", format_summary(stats.edge_weight))?;

    if !output.artifacts.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Artifacts:")?;
        for artifact in &output.artifacts {
            writeln!(
                writer,
                "  {:<20} {:>10}  {}",
                file_name(&artifact.path),
                format_bytes(artifact.bytes),
                artifact.description
            )?;
        }
    }

    Ok(())
}

/// Generate the JSON summary to the given writer
pub fn generate_json<W: Write>(output: &PlotOutput, writer: &mut W) -> io::Result<()> {
    let summary = RunSummary::new(output);
    serde_json::to_writer_pretty(&mut *writer, &summary)?;
    writeln!(writer)
}
