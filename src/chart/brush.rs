//! Linked brush composition
//!
//! Adds an interval brush to the node layer of a node-link chart and stacks
//! a bar chart under it that counts the brushed nodes per category.

use super::data::{ChartError, Table};
use super::draw::NetworkChart;
use super::schema::{
    Channel, Condition, ConditionalDef, FieldDef, LayerSpec, Mark, MarkKind, Param, Scale,
    Transform, UnitSpec, VConcatSpec, View,
};

/// Options for [`linked_brush`]
#[derive(Debug, Clone, PartialEq)]
pub struct BrushOptions {
    pub name: String,
    /// Nominal node field that colors brushed nodes and groups the bars
    pub field: String,
    /// Fill of nodes outside the brush
    pub unselected: String,
    /// Fixed domain of the count axis
    pub count_domain: [f64; 2],
}

impl Default for BrushOptions {
    fn default() -> Self {
        Self {
            name: "brush".to_string(),
            field: "viable".to_string(),
            unselected: "gray".to_string(),
            count_domain: [0.0, 20.0],
        }
    }
}

/// Compose `layer[edges, nodes + brush]` above a brush-filtered bar chart
pub fn linked_brush(chart: NetworkChart, options: &BrushOptions) -> Result<View, ChartError> {
    let table = Table::Nodes;
    let kind = table.field_type(&options.field)?;
    let NetworkChart { edges, mut nodes } = chart;

    nodes.encoding.fill = Some(Channel::Conditional(ConditionalDef {
        condition: Condition {
            param: options.name.clone(),
            field: FieldDef::new(&options.field, kind).without_legend(),
        },
        value: options.unselected.clone(),
    }));
    nodes.mark.fill = None;
    nodes.params.push(Param::xy_interval(&options.name));

    let mut bars = UnitSpec::new(table.name(), Mark::new(MarkKind::Bar));
    bars.encoding.x = Some(Channel::Field(FieldDef::count().with_scale(Scale {
        scheme: None,
        domain: Some(options.count_domain),
    })));
    bars.encoding.y = Some(Channel::Field(FieldDef::new(&options.field, kind)));
    bars.encoding.color = Some(Channel::Field(FieldDef::new(&options.field, kind)));
    bars.transform.push(Transform::filter_by(&options.name));

    Ok(View::VConcat(VConcatSpec {
        vconcat: vec![
            View::Layer(LayerSpec {
                layer: vec![edges, nodes],
            }),
            View::Unit(bars),
        ],
    }))
}
