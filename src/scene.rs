//! Scenegraph data model.
//!
//! A scene is a tree of [`Mark`]s. Each mark holds an ordered list of
//! [`Item`]s; group items in turn hold child marks (plus axis and legend
//! layers). The layout mirrors the scenegraph JSON so whole scenes can be
//! deserialized directly.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::errors::{LoadError, SourceContext};
use crate::render::defaults;
use crate::types::Num;

/// The kind of a mark group.
///
/// Unrecognized names are kept in [`MarkType::Unknown`] so scenes produced by
/// newer producers still load; the renderer skips them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum MarkType {
    Group,
    Area,
    Line,
    Arc,
    Path,
    Symbol,
    Rect,
    Rule,
    Text,
    Image,
    Unknown(String),
}

impl MarkType {
    pub fn as_str(&self) -> &str {
        match self {
            MarkType::Group => "group",
            MarkType::Area => "area",
            MarkType::Line => "line",
            MarkType::Arc => "arc",
            MarkType::Path => "path",
            MarkType::Symbol => "symbol",
            MarkType::Rect => "rect",
            MarkType::Rule => "rule",
            MarkType::Text => "text",
            MarkType::Image => "image",
            MarkType::Unknown(name) => name,
        }
    }
}

impl FromStr for MarkType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "group" => MarkType::Group,
            "area" => MarkType::Area,
            "line" => MarkType::Line,
            "arc" => MarkType::Arc,
            "path" => MarkType::Path,
            "symbol" => MarkType::Symbol,
            "rect" => MarkType::Rect,
            "rule" => MarkType::Rule,
            "text" => MarkType::Text,
            "image" => MarkType::Image,
            other => MarkType::Unknown(other.to_string()),
        })
    }
}

impl From<String> for MarkType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(t) => t,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for MarkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One mark group in the scene: a mark type plus its items.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mark {
    pub marktype: MarkType,
    /// Optional user-facing name, appended to the CSS class.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default = "default_interactive")]
    pub interactive: bool,
    /// Axis layer placement; `"back"` draws the axis beneath the group's marks.
    #[serde(default)]
    pub layer: Option<String>,
}

fn default_interactive() -> bool {
    true
}

impl Mark {
    pub fn new(marktype: MarkType) -> Self {
        Self {
            marktype,
            name: None,
            items: Vec::new(),
            interactive: true,
            layer: None,
        }
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = Some(layer.into());
        self
    }

    /// Whether this (axis) mark draws beneath the group's own marks.
    pub fn is_back_layer(&self) -> bool {
        self.layer.as_deref() == Some(defaults::BACK_LAYER)
    }
}

/// One datum within a mark.
///
/// Every field is optional; the attribute encoders default missing geometry
/// to zero. Fields are grouped by the mark types that read them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    // geometry
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub x2: Option<f64>,
    pub y2: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub angle: Option<f64>,
    pub radius: Option<f64>,
    pub theta: Option<f64>,
    pub dx: Option<f64>,
    pub dy: Option<f64>,

    // arc
    pub inner_radius: Option<f64>,
    pub outer_radius: Option<f64>,
    pub start_angle: Option<f64>,
    pub end_angle: Option<f64>,

    // symbol
    pub size: Option<f64>,
    pub shape: Option<String>,

    // line / area
    pub interpolate: Option<String>,
    pub orient: Option<String>,

    // path
    pub path: Option<String>,

    // text
    pub text: Option<Datum>,
    pub align: Option<String>,
    pub baseline: Option<String>,
    pub font: Option<String>,
    pub font_size: Option<f64>,
    pub font_style: Option<Datum>,
    pub font_variant: Option<Datum>,
    pub font_weight: Option<Datum>,

    // image
    pub url: Option<String>,

    // style
    pub fill: Option<StyleValue>,
    pub fill_opacity: Option<StyleValue>,
    pub stroke: Option<StyleValue>,
    pub stroke_width: Option<StyleValue>,
    pub stroke_opacity: Option<StyleValue>,
    pub stroke_cap: Option<StyleValue>,
    pub stroke_dash: Option<StyleValue>,
    pub stroke_dash_offset: Option<StyleValue>,
    pub opacity: Option<StyleValue>,

    // group
    pub clip: bool,
    pub items: Vec<Mark>,
    pub axis_items: Vec<Mark>,
    pub legend_items: Vec<Mark>,
}

impl Item {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }
}

/// A scalar datum such as text content or a font weight.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Datum {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Datum {
    /// Whether the datum counts as "set" (non-empty, non-zero, true).
    pub fn is_truthy(&self) -> bool {
        match self {
            Datum::Bool(b) => *b,
            Datum::Number(n) => *n != 0.0 && !n.is_nan(),
            Datum::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Bool(b) => write!(f, "{b}"),
            Datum::Number(n) => write!(f, "{}", Num(*n)),
            Datum::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Datum {
    fn from(s: &str) -> Self {
        Datum::Text(s.to_string())
    }
}

impl From<String> for Datum {
    fn from(s: String) -> Self {
        Datum::Text(s)
    }
}

impl From<f64> for Datum {
    fn from(n: f64) -> Self {
        Datum::Number(n)
    }
}

/// The value of a style property.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    Text(String),
    /// Dash arrays and similar lists, written comma-separated.
    List(Vec<f64>),
    /// A paint that must be declared in the defs block and referenced by id.
    Gradient(Gradient),
}

impl StyleValue {
    /// The gradient behind this value, if it is a reference.
    pub fn as_gradient(&self) -> Option<&Gradient> {
        match self {
            StyleValue::Gradient(g) => Some(g),
            _ => None,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Number(n) => write!(f, "{}", Num(*n)),
            StyleValue::Text(s) => f.write_str(s),
            StyleValue::List(values) => {
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", Num(*v))?;
                }
                Ok(())
            }
            StyleValue::Gradient(g) => write!(f, "url(#{})", g.id),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Text(s.to_string())
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        StyleValue::Number(n)
    }
}

impl From<Gradient> for StyleValue {
    fn from(g: Gradient) -> Self {
        StyleValue::Gradient(g)
    }
}

/// A linear color ramp with a caller-supplied identifier.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Gradient {
    pub id: String,
    #[serde(default)]
    pub x1: f64,
    #[serde(default)]
    pub y1: f64,
    #[serde(default = "default_x2")]
    pub x2: f64,
    #[serde(default)]
    pub y2: f64,
    /// Paint order along the gradient axis.
    #[serde(default)]
    pub stops: Vec<Stop>,
}

fn default_x2() -> f64 {
    1.0
}

impl Gradient {
    /// A left-to-right gradient with no stops.
    pub fn linear(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            x1: 0.0,
            y1: 0.0,
            x2: 1.0,
            y2: 0.0,
            stops: Vec::new(),
        }
    }

    pub fn with_axis(mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        self.x1 = x1;
        self.y1 = y1;
        self.x2 = x2;
        self.y2 = y2;
        self
    }

    pub fn stop(mut self, offset: f64, color: impl Into<String>) -> Self {
        self.stops.push(Stop {
            offset,
            color: color.into(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Stop {
    pub offset: f64,
    pub color: String,
}

/// Parse a scene tree from JSON text.
pub fn from_json(name: &str, text: &str) -> Result<Mark, LoadError> {
    serde_json::from_str(text).map_err(|e| SourceContext::new(name, text).json_error("scene", &e))
}

/// Read and parse a scene tree from a JSON file.
pub fn from_path(path: impl AsRef<Path>) -> Result<Mark, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_json(&path.display().to_string(), &text)
}
