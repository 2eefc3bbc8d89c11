//! Configuration file support for netchart
//!
//! This module handles parsing and validating `netchart.toml` configuration
//! files. Every value has a default, so a missing file (or an empty one)
//! reproduces the stock run: 30 nodes, edge probability 0.25, output in
//! `data/`.
//!
//! ## Configuration File Format
//!
//! ```toml
//! # netchart.toml
//!
//! [graph]
//! nodes = 30
//! edge_probability = 0.25
//! # Fixed seed for reproducible output (random when omitted)
//! seed = 42
//!
//! [layout]
//! iterations = 50
//! scale = 1.0
//! threshold = 1e-4
//! # Optimal node distance, sqrt(1/n) when omitted
//! optimal_distance = 0.2
//!
//! [output]
//! dir = "data"
//! dpi = 80
//! image = "networkx-mpl.png"
//! chart_prefix = "chart"
//! # Create the output directory when it does not exist
//! create_dir = true
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::layout::SpringParams;

/// File names searched for, in order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["netchart.toml", ".netchart.toml"];

/// Highest accepted `output.dpi` (7680 x 5760 px for the default figure)
pub const MAX_DPI: f64 = 1200.0;

/// Errors that can occur when loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Random graph section
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    /// Number of nodes
    #[serde(default = "default_nodes")]
    pub nodes: usize,

    /// Probability of each possible edge
    #[serde(default = "default_edge_probability")]
    pub edge_probability: f64,

    /// RNG seed; the generator is seeded from the OS when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_nodes() -> usize {
    30
}

fn default_edge_probability() -> f64 {
    0.25
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            nodes: default_nodes(),
            edge_probability: default_edge_probability(),
            seed: None,
        }
    }
}

/// Output section
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving all artifacts
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// Resolution of the static image
    #[serde(default = "default_dpi")]
    pub dpi: f64,

    /// File name of the static image
    #[serde(default = "default_image")]
    pub image: String,

    /// Chart files are named `<prefix>1.json` .. `<prefix>4.json`
    #[serde(default = "default_chart_prefix")]
    pub chart_prefix: String,

    #[serde(default = "default_create_dir")]
    pub create_dir: bool,
}

fn default_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_dpi() -> f64 {
    80.0
}

fn default_image() -> String {
    "networkx-mpl.png".to_string()
}

fn default_chart_prefix() -> String {
    "chart".to_string()
}

fn default_create_dir() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            dpi: default_dpi(),
            image: default_image(),
            chart_prefix: default_chart_prefix(),
            create_dir: default_create_dir(),
        }
    }
}

impl OutputConfig {
    pub fn image_path(&self) -> PathBuf {
        self.dir.join(&self.image)
    }

    /// Path of the `index`-th chart (1-based)
    pub fn chart_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}{}.json", self.chart_prefix, index))
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PlotConfig {
    #[serde(default)]
    pub graph: GraphConfig,

    #[serde(default)]
    pub layout: SpringParams,

    #[serde(default)]
    pub output: OutputConfig,
}

impl PlotConfig {
    /// Check value ranges that the types alone cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = self.graph.edge_probability;
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::Invalid(format!(
                "edge_probability must be within [0, 1], got {}",
                p
            )));
        }

        let positive = [
            ("output.dpi", self.output.dpi),
            ("layout.scale", self.layout.scale),
            ("layout.threshold", self.layout.threshold),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        if self.output.dpi > MAX_DPI {
            return Err(ConfigError::Invalid(format!(
                "output.dpi must be at most {}, got {}",
                MAX_DPI, self.output.dpi
            )));
        }

        if let Some(k) = self
            .layout
            .optimal_distance
            .filter(|k| !k.is_finite() || *k <= 0.0)
        {
            return Err(ConfigError::Invalid(format!(
                "layout.optimal_distance must be a positive number, got {}",
                k
            )));
        }

        if self.output.image.is_empty() {
            return Err(ConfigError::Invalid("output.image must not be empty".into()));
        }

        Ok(())
    }
}

/// Load configuration starting from the given directory
///
/// Searches for `netchart.toml` in the given directory and parent directories.
pub fn load_config(start: &Path) -> Result<PlotConfig, ConfigError> {
    match find_config_file(start) {
        Some(path) => load_config_file(&path),
        None => Ok(PlotConfig::default()),
    }
}

/// Load a specific configuration file.
///
/// Values are not range-checked here; callers apply overrides first and then
/// call [`PlotConfig::validate`].
pub fn load_config_file(path: &Path) -> Result<PlotConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Find the config file by searching up the directory tree
pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
    let mut current = if start_path.is_file() {
        start_path.parent()?.to_path_buf()
    } else {
        start_path.to_path_buf()
    };

    loop {
        for name in &CONFIG_FILE_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        // Move to parent directory
        if let Some(parent) = current.parent() {
            current = parent.to_path_buf();
        } else {
            break;
        }
    }

    None
}
