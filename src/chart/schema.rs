//! Vega-Lite v5 document model
//!
//! Only the subset needed for node-link charts is modelled: unit views with
//! point/line/bar marks, layering, vertical concatenation, interval
//! selections, and filter transforms.

use serde::Serialize;

use super::data::Datasets;

pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// Serializes as JSON `null`, which Vega-Lite reads as "disabled"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Disabled;

/// Top-level chart document
#[derive(Debug, Clone, Serialize)]
pub struct Document<'a> {
    #[serde(rename = "$schema")]
    pub schema: &'static str,
    pub config: Config,
    pub datasets: &'a Datasets,
    #[serde(flatten)]
    pub view: View,
}

impl<'a> Document<'a> {
    pub fn new(datasets: &'a Datasets, view: View) -> Self {
        Self {
            schema: VEGA_LITE_SCHEMA,
            config: Config::default(),
            datasets,
            view,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub view: ViewConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            view: ViewConfig {
                continuous_width: 400,
                continuous_height: 300,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewConfig {
    pub continuous_width: u32,
    pub continuous_height: u32,
}

/// Any view: a single mark, a layer stack, or a vertical concatenation
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum View {
    Unit(UnitSpec),
    Layer(LayerSpec),
    VConcat(VConcatSpec),
}

#[derive(Debug, Clone, Serialize)]
pub struct LayerSpec {
    pub layer: Vec<UnitSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VConcatSpec {
    pub vconcat: Vec<View>,
}

/// Reference to a named entry of the top-level `datasets`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataRef {
    pub name: String,
}

/// A single-mark view
#[derive(Debug, Clone, Serialize)]
pub struct UnitSpec {
    pub data: DataRef,
    pub mark: Mark,
    pub encoding: Encoding,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<Transform>,
}

impl UnitSpec {
    pub fn new(dataset: &str, mark: Mark) -> Self {
        Self {
            data: DataRef {
                name: dataset.to_string(),
            },
            mark,
            encoding: Encoding::default(),
            params: Vec::new(),
            transform: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkKind {
    Point,
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: MarkKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl Mark {
    pub fn new(kind: MarkKind) -> Self {
        Self {
            kind,
            filled: None,
            size: None,
            color: None,
            fill: None,
            stroke_width: None,
            opacity: None,
        }
    }
}

/// Encoding channels used by node-link charts
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Encoding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<Channel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tooltip: Vec<FieldDef>,
}

/// Value of an encoding channel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Channel {
    Field(FieldDef),
    Conditional(ConditionalDef),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Quantitative,
    Nominal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregate {
    Count,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(rename = "type")]
    pub kind: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<Aggregate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Scale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Disabled>,
}

impl FieldDef {
    pub fn new(field: &str, kind: FieldType) -> Self {
        Self {
            field: Some(field.to_string()),
            kind,
            aggregate: None,
            axis: None,
            scale: None,
            legend: None,
        }
    }

    /// `count()` aggregate
    pub fn count() -> Self {
        Self {
            field: None,
            kind: FieldType::Quantitative,
            aggregate: Some(Aggregate::Count),
            axis: None,
            scale: None,
            legend: None,
        }
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = Some(axis);
        self
    }

    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn without_legend(mut self) -> Self {
        self.legend = Some(Disabled);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
    pub grid: bool,
    pub labels: bool,
    pub ticks: bool,
    pub domain: bool,
}

impl Axis {
    /// Axis with no visible decoration
    pub fn hidden() -> Self {
        Self {
            title: String::new(),
            grid: false,
            labels: false,
            ticks: false,
            domain: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Scale {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,
}

/// Field encoding applied when a selection matches, constant otherwise
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionalDef {
    pub condition: Condition,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    pub param: String,
    #[serde(flatten)]
    pub field: FieldDef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionKind {
    Interval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingChannel {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Binding {
    Scales,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    #[serde(rename = "type")]
    pub kind: SelectionKind,
    pub encodings: Vec<EncodingChannel>,
}

/// A named selection parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    pub select: Selection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bind: Option<Binding>,
}

impl Param {
    /// Interval selection over both position channels
    pub fn xy_interval(name: &str) -> Self {
        Self {
            name: name.to_string(),
            select: Selection {
                kind: SelectionKind::Interval,
                encodings: vec![EncodingChannel::X, EncodingChannel::Y],
            },
            bind: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transform {
    pub filter: ParamPredicate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamPredicate {
    pub param: String,
}

impl Transform {
    pub fn filter_by(param: &str) -> Self {
        Self {
            filter: ParamPredicate {
                param: param.to_string(),
            },
        }
    }
}
