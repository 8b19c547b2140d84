//! Style pipeline - turns an item's style fields into inline CSS
//!
//! Declarations follow the fixed [`STYLE_PROPERTIES`] order. A missing `fill`
//! still emits `fill: none;` so shapes never fall back to the SVG default
//! black fill; other missing properties are left out.


use super::marks::MarkUnit;
use super::registry::ResourceRegistry;
use super::svg::font_string;
use crate::config::RenderConfig;
use crate::scene::{Item, Mark, StyleValue};

/// Which element the declarations are for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleTarget {
    /// The background rectangle of a group item.
    Background,
    /// A `<text>` element, which also gets a font declaration.
    Text,
    /// Any other leaf element.
    Element,
}

/// A style property: how to read it from an item and its CSS name.
pub struct StyleProperty {
    pub css: &'static str,
    pub read: fn(&Item) -> Option<&StyleValue>,
}

/// Style properties in output order.
pub const STYLE_PROPERTIES: [StyleProperty; 9] = [
    StyleProperty { css: "fill", read: |o| o.fill.as_ref() },
    StyleProperty { css: "fill-opacity", read: |o| o.fill_opacity.as_ref() },
    StyleProperty { css: "stroke", read: |o| o.stroke.as_ref() },
    StyleProperty { css: "stroke-width", read: |o| o.stroke_width.as_ref() },
    StyleProperty { css: "stroke-opacity", read: |o| o.stroke_opacity.as_ref() },
    StyleProperty { css: "stroke-linecap", read: |o| o.stroke_cap.as_ref() },
    StyleProperty { css: "stroke-dasharray", read: |o| o.stroke_dash.as_ref() },
    StyleProperty { css: "stroke-dashoffset", read: |o| o.stroke_dash_offset.as_ref() },
    StyleProperty { css: "opacity", read: |o| o.opacity.as_ref() },
];

/// Build the inline style for one emitted element.
///
/// Nested marks take their style from the first item of the sequence.
/// Gradient values are registered with `registry` and referenced by id.
/// Returns `None` when there is nothing to declare.
pub fn style_declarations(
    unit: MarkUnit<'_>,
    mark: &Mark,
    target: StyleTarget,
    registry: &mut ResourceRegistry,
    config: &RenderConfig,
) -> Option<String> {
    let item = unit.representative()?;
    let mut decls: Vec<String> = Vec::new();

    if target == StyleTarget::Background && !mark.interactive {
        decls.push("pointer-events: none;".to_string());
    }

    if target == StyleTarget::Text {
        decls.push(format!("font: {};", font_string(item, config)));
    }

    for prop in &STYLE_PROPERTIES {
        match (prop.read)(item) {
            None if prop.css == "fill" => decls.push("fill: none;".to_string()),
            None => {}
            Some(value) => {
                if let Some(gradient) = value.as_gradient() {
                    registry.register_gradient(gradient);
                }
                decls.push(format!("{}: {};", prop.css, value));
            }
        }
    }

    if decls.is_empty() {
        None
    } else {
        Some(decls.join(" "))
    }
}
