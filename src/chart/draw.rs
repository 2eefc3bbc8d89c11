//! Node-link chart construction
//!
//! Builds a two-layer chart (edges below, nodes above) from the node and
//! edge tables. Visual properties can be constants or table fields.

use super::data::{ChartError, Table};
use super::schema::{
    Axis, Binding, Channel, FieldDef, LayerSpec, Mark, MarkKind, Param, Scale, UnitSpec, View,
};

/// Name of the pan/zoom selection added by [`NetworkChart::interactive`]
pub const ZOOM_PARAM: &str = "grid";

/// A visual property given either as a constant or as a data field
#[derive(Debug, Clone, PartialEq)]
pub enum Encodable<T> {
    Constant(T),
    Field(String),
}

impl<T> Encodable<T> {
    pub fn field(name: &str) -> Self {
        Encodable::Field(name.to_string())
    }
}

/// Drawing options for [`draw_networkx`]
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOptions {
    pub node_size: Encodable<f64>,
    pub node_color: Encodable<String>,
    /// Color scheme used when `node_color` is a field
    pub cmap: Option<String>,
    pub alpha: f64,
    /// Edge stroke width
    pub width: Encodable<f64>,
    pub edge_color: Encodable<String>,
    /// Color scheme used when `edge_color` is a field
    pub edge_cmap: Option<String>,
    pub node_tooltip: Vec<String>,
    pub edge_tooltip: Vec<String>,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            node_size: Encodable::Constant(300.0),
            node_color: Encodable::Constant("#1f78b4".to_string()),
            cmap: None,
            alpha: 1.0,
            width: Encodable::Constant(1.0),
            edge_color: Encodable::Constant("black".to_string()),
            edge_cmap: None,
            node_tooltip: Vec::new(),
            edge_tooltip: Vec::new(),
        }
    }
}

/// Edge layer and node layer of a node-link chart
#[derive(Debug, Clone)]
pub struct NetworkChart {
    pub edges: UnitSpec,
    pub nodes: UnitSpec,
}

impl NetworkChart {
    /// Bind an x/y interval selection to the scales of the first layer,
    /// enabling pan and zoom
    pub fn interactive(mut self) -> Self {
        let mut param = Param::xy_interval(ZOOM_PARAM);
        param.bind = Some(Binding::Scales);
        self.edges.params.push(param);
        self
    }

    pub fn into_view(self) -> View {
        View::Layer(LayerSpec {
            layer: vec![self.edges, self.nodes],
        })
    }
}

fn field_def(table: Table, field: &str) -> Result<FieldDef, ChartError> {
    Ok(FieldDef::new(field, table.field_type(field)?))
}

fn position_channel(table: Table, field: &str) -> Result<Channel, ChartError> {
    Ok(Channel::Field(field_def(table, field)?.with_axis(Axis::hidden())))
}

fn scheme_scale(scheme: &Option<String>) -> Option<Scale> {
    scheme.as_ref().map(|name| Scale {
        scheme: Some(name.clone()),
        domain: None,
    })
}

fn tooltips(table: Table, fields: &[String]) -> Result<Vec<FieldDef>, ChartError> {
    fields.iter().map(|field| field_def(table, field)).collect()
}

fn draw_edges(options: &DrawOptions) -> Result<UnitSpec, ChartError> {
    let table = Table::Edges;
    let mut mark = Mark::new(MarkKind::Line);
    mark.opacity = Some(options.alpha);
    let mut layer = UnitSpec::new(table.name(), mark);

    layer.encoding.x = Some(position_channel(table, "x")?);
    layer.encoding.y = Some(position_channel(table, "y")?);
    layer.encoding.detail = Some(Channel::Field(field_def(table, "edge")?));

    match &options.width {
        Encodable::Constant(width) => layer.mark.stroke_width = Some(*width),
        Encodable::Field(field) => {
            layer.encoding.stroke_width =
                Some(Channel::Field(field_def(table, field)?.without_legend()));
        }
    }

    match &options.edge_color {
        Encodable::Constant(color) => layer.mark.color = Some(color.clone()),
        Encodable::Field(field) => {
            let mut def = field_def(table, field)?.without_legend();
            def.scale = scheme_scale(&options.edge_cmap);
            layer.encoding.color = Some(Channel::Field(def));
        }
    }

    layer.encoding.tooltip = tooltips(table, &options.edge_tooltip)?;
    Ok(layer)
}

fn draw_nodes(options: &DrawOptions) -> Result<UnitSpec, ChartError> {
    let table = Table::Nodes;
    let mut mark = Mark::new(MarkKind::Point);
    mark.filled = Some(true);
    mark.opacity = Some(options.alpha);
    let mut layer = UnitSpec::new(table.name(), mark);

    layer.encoding.x = Some(position_channel(table, "x")?);
    layer.encoding.y = Some(position_channel(table, "y")?);

    match &options.node_size {
        Encodable::Constant(size) => layer.mark.size = Some(*size),
        Encodable::Field(field) => {
            layer.encoding.size = Some(Channel::Field(field_def(table, field)?.without_legend()));
        }
    }

    match &options.node_color {
        Encodable::Constant(color) => layer.mark.fill = Some(color.clone()),
        Encodable::Field(field) => {
            let mut def = field_def(table, field)?;
            def.scale = scheme_scale(&options.cmap);
            layer.encoding.fill = Some(Channel::Field(def));
        }
    }

    layer.encoding.tooltip = tooltips(table, &options.node_tooltip)?;
    Ok(layer)
}

/// Draw a node-link chart.
///
/// Fields referenced by the options must exist in the corresponding table.
pub fn draw_networkx(options: &DrawOptions) -> Result<NetworkChart, ChartError> {
    Ok(NetworkChart {
        edges: draw_edges(options)?,
        nodes: draw_nodes(options)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::schema::FieldType;
    use serde_json::json;

    #[test]
    fn test_default_layers() {
        let chart = draw_networkx(&DrawOptions::default()).unwrap();

        assert_eq!(chart.edges.data.name, "edges");
        assert_eq!(chart.edges.mark.kind, MarkKind::Line);
        assert_eq!(chart.edges.mark.stroke_width, Some(1.0));
        assert_eq!(chart.edges.mark.color.as_deref(), Some("black"));

        assert_eq!(chart.nodes.data.name, "nodes");
        assert_eq!(chart.nodes.mark.kind, MarkKind::Point);
        assert_eq!(chart.nodes.mark.size, Some(300.0));
        assert_eq!(chart.nodes.mark.fill.as_deref(), Some("#1f78b4"));
        assert!(chart.nodes.encoding.tooltip.is_empty());
    }

    #[test]
    fn test_edges_grouped_by_edge_id() {
        let chart = draw_networkx(&DrawOptions::default()).unwrap();
        let detail = serde_json::to_value(&chart.edges.encoding.detail).unwrap();
        assert_eq!(detail, json!({"field": "edge", "type": "nominal"}));
    }

    #[test]
    fn test_node_tooltip() {
        let options = DrawOptions {
            node_tooltip: vec!["name".into(), "weight".into(), "viable".into()],
            ..DrawOptions::default()
        };
        let chart = draw_networkx(&options).unwrap();
        let kinds: Vec<FieldType> = chart.nodes.encoding.tooltip.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![FieldType::Quantitative, FieldType::Quantitative, FieldType::Nominal]
        );
    }

    #[test]
    fn test_field_encodings() {
        let options = DrawOptions {
            node_size: Encodable::Constant(200.0),
            node_color: Encodable::field("weight"),
            cmap: Some("viridis".into()),
            width: Encodable::field("weight"),
            ..DrawOptions::default()
        };
        let chart = draw_networkx(&options).unwrap();

        assert_eq!(chart.nodes.mark.size, Some(200.0));
        assert!(chart.nodes.mark.fill.is_none());
        let fill = serde_json::to_value(&chart.nodes.encoding.fill).unwrap();
        assert_eq!(
            fill,
            json!({"field": "weight", "type": "quantitative", "scale": {"scheme": "viridis"}})
        );

        assert!(chart.edges.mark.stroke_width.is_none());
        let width = serde_json::to_value(&chart.edges.encoding.stroke_width).unwrap();
        assert_eq!(
            width,
            json!({"field": "weight", "type": "quantitative", "legend": null})
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let options = DrawOptions {
            node_tooltip: vec!["colour".into()],
            ..DrawOptions::default()
        };
        let err = draw_networkx(&options).unwrap_err();
        assert_eq!(err.to_string(), "Unknown field 'colour' in nodes table");

        let options = DrawOptions {
            width: Encodable::field("viable"),
            ..DrawOptions::default()
        };
        assert!(draw_networkx(&options).is_err());
    }

    #[test]
    fn test_interactive_binds_first_layer() {
        let chart = draw_networkx(&DrawOptions::default()).unwrap().interactive();

        assert_eq!(chart.edges.params.len(), 1);
        assert_eq!(chart.edges.params[0].name, ZOOM_PARAM);
        assert_eq!(chart.edges.params[0].bind, Some(Binding::Scales));
        assert!(chart.nodes.params.is_empty());

        let view = serde_json::to_value(chart.into_view()).unwrap();
        assert_eq!(view["layer"].as_array().map(|l| l.len()), Some(2));
    }
}
