//! End-to-end plotting run
//!
//! Generates the graph, lays it out once, and writes the static image and the
//! four interactive charts into the configured output directory.

use std::fs;
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::chart::{
    self, BrushOptions, ChartError, Datasets, DrawOptions, Encodable, View, draw_networkx,
    linked_brush,
};
use crate::config::{ConfigError, PlotConfig};
use crate::generator::generate;
use crate::graph::Graph;
use crate::layout::{Layout, spring_layout};
use crate::metrics::GraphStats;
use crate::raster::{FigureStyle, RenderError, save_png};

/// Errors that can occur during a run
#[derive(Error, Debug)]
pub enum PlotError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Image,
    Chart,
}

/// A file written by the run
#[derive(Debug, Clone, Serialize)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub bytes: u64,
    pub description: &'static str,
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct PlotOutput {
    /// Seed the run used (drawn at random when not configured)
    pub seed: u64,
    pub graph: Graph,
    pub layout: Layout,
    pub stats: GraphStats,
    pub artifacts: Vec<Artifact>,
}

/// The four chart variants, in output order
pub fn chart_views() -> Result<Vec<(&'static str, View)>, ChartError> {
    let basic = draw_networkx(&DrawOptions::default())?.interactive();

    let tooltips = draw_networkx(&DrawOptions {
        node_tooltip: vec!["name".into(), "weight".into(), "viable".into()],
        ..DrawOptions::default()
    })?
    .interactive();

    let encoded = draw_networkx(&DrawOptions {
        node_size: Encodable::Constant(200.0),
        node_color: Encodable::field("weight"),
        cmap: Some("viridis".into()),
        width: Encodable::field("weight"),
        ..DrawOptions::default()
    })?
    .interactive();

    let brushed = linked_brush(
        draw_networkx(&DrawOptions::default())?,
        &BrushOptions::default(),
    )?;

    Ok(vec![
        ("interactive node-link chart", basic.into_view()),
        ("node-link chart with node tooltips", tooltips.into_view()),
        ("node-link chart encoding weights", encoded.into_view()),
        ("linked brush and bar chart", brushed),
    ])
}

fn write_file(path: &Path, contents: &[u8]) -> Result<u64, PlotError> {
    fs::write(path, contents).map_err(|source| PlotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(contents.len() as u64)
}

fn prepare_output_dir(config: &PlotConfig) -> Result<(), PlotError> {
    let dir = &config.output.dir;
    if config.output.create_dir && !dir.as_os_str().is_empty() {
        fs::create_dir_all(dir).map_err(|source| PlotError::Io {
            path: dir.clone(),
            source,
        })?;
    }
    Ok(())
}

/// Run the whole pipeline
pub fn run(config: &PlotConfig) -> Result<PlotOutput, PlotError> {
    config.validate()?;

    let seed = config.graph.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    info!(
        nodes = config.graph.nodes,
        p = config.graph.edge_probability,
        seed,
        "generating random graph"
    );
    let graph = generate(config.graph.nodes, config.graph.edge_probability, &mut rng);
    let stats = GraphStats::compute(&graph, config.graph.edge_probability);
    debug!(
        edges = stats.edges,
        expected = stats.expected_edges,
        "graph generated"
    );

    info!(iterations = config.layout.iterations, "computing spring layout");
    let layout = spring_layout(&graph, &config.layout, &mut rng);

    prepare_output_dir(config)?;
    let mut artifacts = Vec::with_capacity(5);

    let image_path = config.output.image_path();
    info!(path = %image_path.display(), "rendering static image");
    let style = FigureStyle {
        dpi: config.output.dpi,
        ..FigureStyle::default()
    };
    save_png(&graph, &layout, &style, &image_path)?;
    let bytes = fs::metadata(&image_path)
        .map(|m| m.len())
        .map_err(|source| PlotError::Io {
            path: image_path.clone(),
            source,
        })?;
    artifacts.push(Artifact {
        kind: ArtifactKind::Image,
        path: image_path,
        bytes,
        description: "static node-link figure",
    });

    let datasets = Datasets::from_graph(&graph, &layout)?;
    for (index, (description, view)) in chart_views()?.into_iter().enumerate() {
        let path = config.output.chart_path(index + 1);
        info!(path = %path.display(), "writing chart");
        let json = chart::to_json(&datasets, view)?;
        let bytes = write_file(&path, json.as_bytes())?;
        artifacts.push(Artifact {
            kind: ArtifactKind::Chart,
            path,
            bytes,
            description,
        });
    }

    Ok(PlotOutput {
        seed,
        graph,
        layout,
        stats,
        artifacts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GraphConfig, OutputConfig};
    use serde_json::Value;

    fn config_in(dir: &Path, seed: u64) -> PlotConfig {
        PlotConfig {
            graph: GraphConfig {
                seed: Some(seed),
                ..GraphConfig::default()
            },
            output: OutputConfig {
                dir: dir.join("data"),
                ..OutputConfig::default()
            },
            ..PlotConfig::default()
        }
    }

    fn read_json(path: &Path) -> Value {
        let text = fs::read_to_string(path).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn test_run_writes_five_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let output = run(&config_in(dir.path(), 42)).unwrap();

        assert_eq!(output.artifacts.len(), 5);
        for artifact in &output.artifacts {
            assert!(artifact.path.exists(), "{} missing", artifact.path.display());
            assert!(artifact.bytes > 0);
        }

        let png = fs::read(dir.path().join("data/networkx-mpl.png")).unwrap();
        assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);

        for i in 1..=4 {
            let doc = read_json(&dir.path().join(format!("data/chart{}.json", i)));
            assert_eq!(doc["$schema"], crate::chart::schema::VEGA_LITE_SCHEMA);
            assert_eq!(doc["datasets"]["nodes"].as_array().unwrap().len(), 30);
        }
    }

    #[test]
    fn test_graph_properties() {
        let dir = tempfile::tempdir().unwrap();
        let output = run(&config_in(dir.path(), 3)).unwrap();

        assert_eq!(output.graph.node_count(), 30);
        assert!(output.stats.edge_z_score().abs() < 5.0);
        assert_eq!(output.layout.len(), 30);
        for edge in output.graph.edges() {
            assert!((1.0..=10.0).contains(&edge.attributes.weight));
        }
    }

    #[test]
    fn test_chart_contents() {
        let dir = tempfile::tempdir().unwrap();
        let output = run(&config_in(dir.path(), 5)).unwrap();
        let data = dir.path().join("data");

        let chart1 = read_json(&data.join("chart1.json"));
        assert_eq!(
            chart1["datasets"]["edges"].as_array().unwrap().len(),
            output.graph.edge_count() * 2
        );
        assert_eq!(chart1["layer"][0]["params"][0]["bind"], "scales");

        let chart2 = read_json(&data.join("chart2.json"));
        assert_eq!(chart2["layer"][1]["encoding"]["tooltip"].as_array().unwrap().len(), 3);

        let chart3 = read_json(&data.join("chart3.json"));
        assert_eq!(chart3["layer"][1]["mark"]["size"], 200.0);
        assert_eq!(chart3["layer"][1]["encoding"]["fill"]["scale"]["scheme"], "viridis");
        assert_eq!(chart3["layer"][0]["encoding"]["strokeWidth"]["field"], "weight");

        let chart4 = read_json(&data.join("chart4.json"));
        assert_eq!(chart4["vconcat"][1]["transform"][0]["filter"]["param"], "brush");
    }

    #[test]
    fn test_seeded_runs_match() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        run(&config_in(a.path(), 11)).unwrap();
        run(&config_in(b.path(), 11)).unwrap();

        for i in 1..=4 {
            let name = format!("data/chart{}.json", i);
            assert_eq!(read_json(&a.path().join(&name)), read_json(&b.path().join(&name)));
        }
    }

    #[test]
    fn test_missing_dir_without_create() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), 1);
        config.output.create_dir = false;

        let err = run(&config).unwrap_err();
        assert!(matches!(err, PlotError::Render(RenderError::Io { .. })));
    }

    #[test]
    fn test_invalid_config_rejected_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), 1);
        config.graph.edge_probability = -0.1;

        assert!(matches!(run(&config), Err(PlotError::Config(_))));
        assert!(!dir.path().join("data").exists());
    }

    #[test]
    fn test_chart_views_order() {
        let views = chart_views().unwrap();
        assert_eq!(views.len(), 4);
        assert!(matches!(views[0].1, View::Layer(_)));
        assert!(matches!(views[3].1, View::VConcat(_)));
    }
}
