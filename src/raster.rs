//! Static figure rendering
//!
//! Draws the graph as an SVG document styled like a default node-link
//! figure (blue nodes, thin black edges, id labels, framed axes without
//! ticks) and rasterizes it to PNG with resvg.

use std::fs;
use std::path::{Path, PathBuf};

use resvg::{tiny_skia, usvg};
use thiserror::Error;
use tracing::debug;

use crate::graph::Graph;
use crate::layout::{Layout, Point};

/// Points per inch
const POINTS_PER_INCH: f64 = 72.0;

/// Axes rectangle as figure fractions: left, bottom, right, top
const AXES_BOX: [f64; 4] = [0.125, 0.11, 0.9, 0.88];

/// Fraction of the data range added on each side of the axes
const DATA_MARGIN: f64 = 0.05;

/// Errors that can occur while producing the static image
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Node {0} has no layout position")]
    MissingPosition(usize),

    #[error("Failed to parse generated SVG: {0}")]
    Svg(#[from] usvg::Error),

    #[error("Cannot allocate a {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },

    #[error("Failed to encode PNG: {0}")]
    Encode(String),

    #[error("Failed to write image {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Appearance of the static figure
#[derive(Debug, Clone, PartialEq)]
pub struct FigureStyle {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: f64,
    /// Marker area in square points
    pub node_size: f64,
    pub node_color: String,
    pub edge_color: String,
    /// Edge line width in points
    pub edge_width: f64,
    /// Label size in points
    pub font_size: f64,
    pub font_family: String,
    pub with_labels: bool,
    pub background: String,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            width_in: 6.4,
            height_in: 4.8,
            dpi: 80.0,
            node_size: 300.0,
            node_color: "#1f78b4".to_string(),
            edge_color: "#000000".to_string(),
            edge_width: 1.0,
            font_size: 12.0,
            font_family: "DejaVu Sans, Arial, sans-serif".to_string(),
            with_labels: true,
            background: "#ffffff".to_string(),
        }
    }
}

impl FigureStyle {
    /// Figure size in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi).round() as u32,
            (self.height_in * self.dpi).round() as u32,
        )
    }

    fn points_to_px(&self, points: f64) -> f64 {
        points * self.dpi / POINTS_PER_INCH
    }
}

/// Maps data coordinates into the axes rectangle (SVG y grows downward)
struct Viewport {
    data_min: Point,
    data_span: Point,
    left: f64,
    bottom: f64,
    width: f64,
    height: f64,
}

impl Viewport {
    fn new(layout: &Layout, figure_width: f64, figure_height: f64) -> Self {
        let (lo, hi) = layout
            .bounds()
            .unwrap_or((Point::new(-1.0, -1.0), Point::new(1.0, 1.0)));
        let (min_x, span_x) = padded(lo.x, hi.x);
        let (min_y, span_y) = padded(lo.y, hi.y);
        let [left, bottom, right, top] = AXES_BOX;

        Self {
            data_min: Point::new(min_x, min_y),
            data_span: Point::new(span_x, span_y),
            left: left * figure_width,
            bottom: (1.0 - bottom) * figure_height,
            width: (right - left) * figure_width,
            height: (top - bottom) * figure_height,
        }
    }

    fn map(&self, p: Point) -> Point {
        Point::new(
            self.left + (p.x - self.data_min.x) / self.data_span.x * self.width,
            self.bottom - (p.y - self.data_min.y) / self.data_span.y * self.height,
        )
    }
}

/// Lower limit and span of a data range after adding margins
fn padded(lo: f64, hi: f64) -> (f64, f64) {
    let span = hi - lo;
    if span <= f64::EPSILON {
        return (lo - 0.5, 1.0);
    }
    let margin = span * DATA_MARGIN;
    (lo - margin, span + 2.0 * margin)
}

/// Render the graph as an SVG document
pub fn render_svg(
    graph: &Graph,
    layout: &Layout,
    style: &FigureStyle,
) -> Result<String, RenderError> {
    let (width, height) = style.pixel_size();
    let viewport = Viewport::new(layout, width as f64, height as f64);
    let position = |node: usize| {
        layout
            .position(node)
            .map(|p| viewport.map(p))
            .ok_or(RenderError::MissingPosition(node))
    };

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        style.background
    ));

    let edge_width = style.points_to_px(style.edge_width);
    for edge in graph.edges() {
        let a = position(edge.source)?;
        let b = position(edge.target)?;
        svg.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{:.2}\"/>",
            a.x, a.y, b.x, b.y, style.edge_color, edge_width
        ));
    }

    let radius = style.points_to_px(style.node_size.sqrt()) / 2.0;
    let font_size = style.points_to_px(style.font_size);
    for (id, _) in graph.nodes() {
        let p = position(id)?;
        svg.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\"/>",
            p.x, p.y, radius, style.node_color
        ));
        if style.with_labels {
            svg.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{:.2}\" fill=\"#000000\">{}</text>",
                p.x, p.y, style.font_family, font_size, id
            ));
        }
    }

    // Axes frame without ticks
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"none\" stroke=\"#000000\" stroke-width=\"{:.2}\"/>",
        viewport.left,
        viewport.bottom - viewport.height,
        viewport.width,
        viewport.height,
        style.points_to_px(0.8)
    ));

    svg.push_str("</svg>");
    Ok(svg)
}

/// Rasterize an SVG document into PNG bytes
pub fn rasterize(svg: &str, style: &FigureStyle) -> Result<Vec<u8>, RenderError> {
    let mut options = usvg::Options::default();
    options.dpi = style.dpi as f32;
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &options)?;
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height()).ok_or(
        RenderError::Pixmap {
            width: size.width(),
            height: size.height(),
        },
    )?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    pixmap
        .encode_png()
        .map_err(|e| RenderError::Encode(e.to_string()))
}

/// Draw the graph and write it to `path` as PNG
pub fn save_png(
    graph: &Graph,
    layout: &Layout,
    style: &FigureStyle,
    path: &Path,
) -> Result<(), RenderError> {
    let svg = render_svg(graph, layout, style)?;
    let png = rasterize(&svg, style)?;
    debug!(bytes = png.len(), path = %path.display(), "writing static image");
    fs::write(path, png).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeAttributes, Viability, node};

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn sample() -> (Graph, Layout) {
        let mut graph = Graph::new();
        for i in 0..3 {
            graph.add_node(node(0.0, i, Viability::No));
        }
        graph.add_edge(0, 1, EdgeAttributes { weight: 2.0 });
        graph.add_edge(1, 2, EdgeAttributes { weight: 3.0 });
        let layout = Layout::from_positions(vec![
            Point::new(-1.0, -1.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 0.0),
        ]);
        (graph, layout)
    }

    #[test]
    fn test_default_pixel_size() {
        assert_eq!(FigureStyle::default().pixel_size(), (512, 384));
    }

    #[test]
    fn test_svg_contains_all_elements() {
        let (graph, layout) = sample();
        let svg = render_svg(&graph, &layout, &FigureStyle::default()).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<line").count(), 2);
        assert_eq!(svg.matches("<circle").count(), 3);
        assert_eq!(svg.matches("<text").count(), 3);
        assert!(svg.contains("width=\"512\" height=\"384\""));
    }

    #[test]
    fn test_labels_can_be_disabled() {
        let (graph, layout) = sample();
        let style = FigureStyle {
            with_labels: false,
            ..FigureStyle::default()
        };
        let svg = render_svg(&graph, &layout, &style).unwrap();
        assert!(!svg.contains("<text"));
    }

    #[test]
    fn test_nodes_stay_inside_axes() {
        let (_, layout) = sample();
        let viewport = Viewport::new(&layout, 512.0, 384.0);
        for p in layout.positions() {
            let px = viewport.map(*p);
            assert!(px.x > viewport.left && px.x < viewport.left + viewport.width);
            assert!(px.y < viewport.bottom && px.y > viewport.bottom - viewport.height);
        }
    }

    #[test]
    fn test_missing_position_is_an_error() {
        let (graph, _) = sample();
        let short = Layout::from_positions(vec![Point::default()]);
        let result = render_svg(&graph, &short, &FigureStyle::default());
        assert!(matches!(result, Err(RenderError::MissingPosition(1))));
    }

    #[test]
    fn test_rasterize_produces_png() {
        let (graph, layout) = sample();
        let style = FigureStyle::default();
        let svg = render_svg(&graph, &layout, &style).unwrap();
        let png = rasterize(&svg, &style).unwrap();
        assert!(png.len() > PNG_SIGNATURE.len());
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_save_png_writes_file() {
        let (graph, layout) = sample();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.png");
        save_png(&graph, &layout, &FigureStyle::default(), &path).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);
    }
}
