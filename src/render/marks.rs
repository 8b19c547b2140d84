//! Mark encoders
//!
//! Each supported mark type has an encoder that knows its output element and
//! how to compute that element's attributes from an item (or, for nested
//! marks, from the whole item sequence).

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};

use super::geometry::{arc_path, area_path, line_path, symbol_path};
use super::image::ImageResolver;
use super::registry::{ClipRect, NodeKey, ResourceRegistry};
use super::svg::{Attrs, text_anchor, text_baseline};
use crate::scene::{Item, MarkType};
use crate::types::{Num, or_zero};

/// What one emitted element is built from.
#[derive(Debug, Clone, Copy)]
pub enum MarkUnit<'a> {
    /// One item of a per-item mark.
    Single(&'a Item),
    /// The whole item sequence of a nested mark.
    Sequence(&'a [Item]),
}

impl<'a> MarkUnit<'a> {
    /// The item whose style stands for the whole unit.
    pub fn representative(self) -> Option<&'a Item> {
        match self {
            MarkUnit::Single(item) => Some(item),
            MarkUnit::Sequence(items) => items.first(),
        }
    }

    fn single(self) -> Option<&'a Item> {
        match self {
            MarkUnit::Single(item) => Some(item),
            MarkUnit::Sequence(_) => None,
        }
    }

    fn sequence(self) -> &'a [Item] {
        match self {
            MarkUnit::Single(item) => std::slice::from_ref(item),
            MarkUnit::Sequence(items) => items,
        }
    }
}

/// Renderer state available to encoders.
pub struct EncodeContext<'a> {
    pub registry: &'a mut ResourceRegistry,
    pub images: &'a dyn ImageResolver,
    /// Identity of the node being encoded.
    pub node: &'a NodeKey,
}

/// Per-mark-type element encoding.
#[enum_dispatch]
pub trait EncodeMark {
    /// Output element name.
    fn tag(&self) -> &'static str;

    /// Whether the whole item sequence forms a single element.
    fn is_nested(&self) -> bool {
        false
    }

    /// Attributes for one element, or `None` to omit the element.
    fn attributes(&self, unit: MarkUnit<'_>, cx: &mut EncodeContext<'_>) -> Option<Attrs>;
}

#[derive(Debug, Clone, Copy)]
pub struct GroupMark;
#[derive(Debug, Clone, Copy)]
pub struct AreaMark;
#[derive(Debug, Clone, Copy)]
pub struct LineMark;
#[derive(Debug, Clone, Copy)]
pub struct ArcMark;
#[derive(Debug, Clone, Copy)]
pub struct PathMark;
#[derive(Debug, Clone, Copy)]
pub struct SymbolMark;
#[derive(Debug, Clone, Copy)]
pub struct RectMark;
#[derive(Debug, Clone, Copy)]
pub struct RuleMark;
#[derive(Debug, Clone, Copy)]
pub struct TextMark;
#[derive(Debug, Clone, Copy)]
pub struct ImageMark;

/// Encoder for each supported mark type.
#[enum_dispatch(EncodeMark)]
#[derive(Debug, Clone, Copy)]
pub enum MarkEncoder {
    Group(GroupMark),
    Area(AreaMark),
    Line(LineMark),
    Arc(ArcMark),
    Path(PathMark),
    Symbol(SymbolMark),
    Rect(RectMark),
    Rule(RuleMark),
    Text(TextMark),
    Image(ImageMark),
}

impl MarkEncoder {
    /// Look up the encoder for a mark type; unknown types have none.
    pub fn for_type(marktype: &MarkType) -> Option<Self> {
        Some(match marktype {
            MarkType::Group => GroupMark.into(),
            MarkType::Area => AreaMark.into(),
            MarkType::Line => LineMark.into(),
            MarkType::Arc => ArcMark.into(),
            MarkType::Path => PathMark.into(),
            MarkType::Symbol => SymbolMark.into(),
            MarkType::Rect => RectMark.into(),
            MarkType::Rule => RuleMark.into(),
            MarkType::Text => TextMark.into(),
            MarkType::Image => ImageMark.into(),
            MarkType::Unknown(_) => return None,
        })
    }
}

fn origin(item: &Item) -> DVec2 {
    dvec2(or_zero(item.x), or_zero(item.y))
}

fn translate(p: DVec2) -> String {
    format!("translate({},{})", Num(p.x), Num(p.y))
}

impl EncodeMark for GroupMark {
    fn tag(&self) -> &'static str {
        "g"
    }

    fn attributes(&self, unit: MarkUnit<'_>, cx: &mut EncodeContext<'_>) -> Option<Attrs> {
        let item = unit.single()?;
        let attrs = Attrs::new().set("transform", translate(origin(item)));
        if !item.clip {
            return Some(attrs);
        }
        let rect = ClipRect {
            width: or_zero(item.width),
            height: or_zero(item.height),
        };
        let id = cx.registry.register_clip(cx.node, rect);
        Some(attrs.set("clip-path", format!("url(#{id})")))
    }
}

impl EncodeMark for AreaMark {
    fn tag(&self) -> &'static str {
        "path"
    }

    fn is_nested(&self) -> bool {
        true
    }

    fn attributes(&self, unit: MarkUnit<'_>, _cx: &mut EncodeContext<'_>) -> Option<Attrs> {
        let items = unit.sequence();
        if items.is_empty() {
            return None;
        }
        Some(Attrs::new().set("d", area_path(items)))
    }
}

impl EncodeMark for LineMark {
    fn tag(&self) -> &'static str {
        "path"
    }

    fn is_nested(&self) -> bool {
        true
    }

    fn attributes(&self, unit: MarkUnit<'_>, _cx: &mut EncodeContext<'_>) -> Option<Attrs> {
        let items = unit.sequence();
        if items.is_empty() {
            return None;
        }
        Some(Attrs::new().set("d", line_path(items)))
    }
}

impl EncodeMark for ArcMark {
    fn tag(&self) -> &'static str {
        "path"
    }

    fn attributes(&self, unit: MarkUnit<'_>, _cx: &mut EncodeContext<'_>) -> Option<Attrs> {
        let item = unit.single()?;
        Some(
            Attrs::new()
                .set("transform", translate(origin(item)))
                .set("d", arc_path(item)),
        )
    }
}

impl EncodeMark for PathMark {
    fn tag(&self) -> &'static str {
        "path"
    }

    fn attributes(&self, unit: MarkUnit<'_>, _cx: &mut EncodeContext<'_>) -> Option<Attrs> {
        let item = unit.single()?;
        Some(
            Attrs::new()
                .set("transform", translate(origin(item)))
                .opt("d", item.path.as_deref()),
        )
    }
}

impl EncodeMark for SymbolMark {
    fn tag(&self) -> &'static str {
        "path"
    }

    fn attributes(&self, unit: MarkUnit<'_>, _cx: &mut EncodeContext<'_>) -> Option<Attrs> {
        let item = unit.single()?;
        Some(
            Attrs::new()
                .set("transform", translate(origin(item)))
                .set("d", symbol_path(item)),
        )
    }
}

impl EncodeMark for RectMark {
    fn tag(&self) -> &'static str {
        "rect"
    }

    fn attributes(&self, unit: MarkUnit<'_>, _cx: &mut EncodeContext<'_>) -> Option<Attrs> {
        let item = unit.single()?;
        Some(
            Attrs::new()
                .num("x", or_zero(item.x))
                .num("y", or_zero(item.y))
                .num("width", or_zero(item.width))
                .num("height", or_zero(item.height)),
        )
    }
}

impl EncodeMark for RuleMark {
    fn tag(&self) -> &'static str {
        "line"
    }

    fn attributes(&self, unit: MarkUnit<'_>, _cx: &mut EncodeContext<'_>) -> Option<Attrs> {
        let item = unit.single()?;
        let start = origin(item);
        // A rule missing its end point collapses to zero length.
        let end = dvec2(item.x2.unwrap_or(start.x), item.y2.unwrap_or(start.y));
        Some(
            Attrs::new()
                .num("x1", start.x)
                .num("y1", start.y)
                .num("x2", end.x)
                .num("y2", end.y),
        )
    }
}

impl EncodeMark for TextMark {
    fn tag(&self) -> &'static str {
        "text"
    }

    fn attributes(&self, unit: MarkUnit<'_>, _cx: &mut EncodeContext<'_>) -> Option<Attrs> {
        let item = unit.single()?;
        let mut anchor = origin(item);
        let radius = or_zero(item.radius);
        let angle = or_zero(item.angle);

        if radius != 0.0 {
            // theta = 0 points straight up.
            let theta = or_zero(item.theta) - std::f64::consts::FRAC_PI_2;
            anchor += DVec2::from_angle(theta) * radius;
        }

        let pos = anchor + dvec2(or_zero(item.dx), or_zero(item.dy));
        let rotate = (angle != 0.0).then(|| {
            format!("rotate({} {},{})", Num(angle), Num(anchor.x), Num(anchor.y))
        });

        Some(
            Attrs::new()
                .num("x", pos.x)
                .num("y", pos.y)
                .set("text-anchor", text_anchor(item.align.as_deref()))
                .set("alignment-baseline", text_baseline(item.baseline.as_deref()))
                .opt("transform", rotate),
        )
    }
}

impl EncodeMark for ImageMark {
    fn tag(&self) -> &'static str {
        "image"
    }

    fn attributes(&self, unit: MarkUnit<'_>, cx: &mut EncodeContext<'_>) -> Option<Attrs> {
        let item = unit.single()?;
        let size = dvec2(or_zero(item.width), or_zero(item.height));
        let shift = dvec2(
            match item.align.as_deref() {
                Some("center") => size.x / 2.0,
                Some("right") => size.x,
                _ => 0.0,
            },
            match item.baseline.as_deref() {
                Some("middle") => size.y / 2.0,
                Some("bottom") => size.y,
                _ => 0.0,
            },
        );
        let pos = origin(item) - shift;

        Some(
            Attrs::new()
                .set("xlink:href", cx.images.image_url(item.url.as_deref()))
                .num("x", pos.x)
                .num("y", pos.y)
                .num("width", size.x)
                .num("height", size.y),
        )
    }
}
