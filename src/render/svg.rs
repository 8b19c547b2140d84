//! SVG markup primitives
//!
//! Tag builders, attribute encoding and the small lookup tables shared by the
//! attribute encoders and the style pipeline.

use std::fmt;

use crate::config::RenderConfig;
use crate::scene::{Datum, Item, Mark};
use crate::types::Num;

/// Attributes every root element carries.
pub const METADATA: [(&str, &str); 3] = [
    ("version", "1.1"),
    ("xmlns", "http://www.w3.org/2000/svg"),
    ("xmlns:xlink", "http://www.w3.org/1999/xlink"),
];

/// Ordered element attributes.
///
/// Insertion order is output order. Values are formatted eagerly; pass `None`
/// through [`Attrs::opt`] to leave an attribute out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attrs(Vec<(&'static str, String)>);

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: &'static str, value: impl fmt::Display) -> Self {
        self.0.push((name, value.to_string()));
        self
    }

    pub fn num(self, name: &'static str, value: f64) -> Self {
        self.set(name, Num(value))
    }

    pub fn opt(self, name: &'static str, value: Option<impl fmt::Display>) -> Self {
        match value {
            Some(v) => self.set(name, v),
            None => self,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(n, v)| (*n, v.as_str()))
    }
}

/// `<name a="b" ...>`, with the style declarations appended last when present.
pub fn open_tag(name: &str, attrs: &Attrs, style: Option<&str>) -> String {
    let mut out = String::new();
    out.push('<');
    out.push_str(name);
    for (key, value) in attrs.iter() {
        push_attr(&mut out, key, value);
    }
    if let Some(style) = style {
        push_attr(&mut out, "style", style);
    }
    out.push('>');
    out
}

/// `</name>`
pub fn close_tag(name: &str) -> String {
    format!("</{name}>")
}

fn push_attr(out: &mut String, key: &str, value: &str) {
    out.push(' ');
    out.push_str(key);
    out.push_str("=\"");
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

/// Escape text content for placement between tags.
///
/// `&` is replaced first so the entities introduced for `<` and `>` are not
/// escaped a second time.
pub fn escape_text(text: Option<&Datum>) -> String {
    let Some(text) = text else {
        return String::new();
    };
    text.to_string()
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// CSS class of the wrapper group emitted for a mark.
pub fn css_class(mark: &Mark) -> String {
    match &mark.name {
        Some(name) if !name.is_empty() => format!("mark-{} {}", mark.marktype, name),
        _ => format!("mark-{}", mark.marktype),
    }
}

/// CSS `font` shorthand for a text item.
pub fn font_string(item: &Item, config: &RenderConfig) -> String {
    let mut out = String::new();
    for part in [&item.font_style, &item.font_variant, &item.font_weight]
        .into_iter()
        .flatten()
    {
        if part.is_truthy() {
            out.push_str(&format!("{part} "));
        }
    }
    let size = item.font_size.unwrap_or(config.font_size);
    let family = match item.font.as_deref() {
        Some(f) if !f.is_empty() => f,
        _ => config.font.as_str(),
    };
    out.push_str(&format!("{}px {family}", Num(size)));
    out
}

/// `text-anchor` keyword for an item's `align`.
pub fn text_anchor(align: Option<&str>) -> &'static str {
    match align {
        Some("left") => "start",
        Some("center") => "middle",
        Some("right") => "end",
        _ => "start",
    }
}

/// `alignment-baseline` keyword for an item's `baseline`.
pub fn text_baseline(baseline: Option<&str>) -> &'static str {
    match baseline {
        Some("top") => "before-edge",
        Some("middle") => "central",
        Some("bottom") => "after-edge",
        _ => "alphabetic",
    }
}
