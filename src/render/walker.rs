//! Scene walker - depth-first traversal that emits the document body

use super::image::ImageResolver;
use super::marks::{EncodeContext, EncodeMark, MarkEncoder, MarkUnit};
use super::registry::{NodeKey, ResourceRegistry};
use super::style::{StyleTarget, style_declarations};
use super::svg::{Attrs, close_tag, css_class, escape_text, open_tag};
use crate::config::RenderConfig;
use crate::scene::{Item, Mark};
use crate::types::or_zero;

/// Walks one scene tree, registering resources as it goes.
pub struct SceneWalker<'a> {
    registry: &'a mut ResourceRegistry,
    images: &'a dyn ImageResolver,
    config: &'a RenderConfig,
    out: String,
}

impl<'a> SceneWalker<'a> {
    pub fn new(
        registry: &'a mut ResourceRegistry,
        images: &'a dyn ImageResolver,
        config: &'a RenderConfig,
    ) -> Self {
        Self {
            registry,
            images,
            config,
            out: String::new(),
        }
    }

    /// Emit the body markup for a scene rooted at `scene`.
    pub fn render(mut self, scene: &Mark) -> String {
        self.render_mark(scene, &NodeKey::root());
        self.out
    }

    /// Emit one mark: its wrapper group and an element per unit.
    pub fn render_mark(&mut self, mark: &Mark, key: &NodeKey) {
        let Some(encoder) = MarkEncoder::for_type(&mark.marktype) else {
            crate::log::debug!(marktype = %mark.marktype, node = %key, "skipping unknown mark type");
            return;
        };
        let tag = encoder.tag();
        let is_group = matches!(encoder, MarkEncoder::Group(_));

        let wrapper = Attrs::new().set("class", css_class(mark));
        let wrapper_style = (!is_group && !mark.interactive).then_some("pointer-events: none;");
        self.out += &open_tag("g", &wrapper, wrapper_style);

        let units: Vec<(MarkUnit<'_>, NodeKey)> = if encoder.is_nested() {
            vec![(MarkUnit::Sequence(&mark.items), key.clone())]
        } else {
            mark.items
                .iter()
                .enumerate()
                .map(|(i, item)| (MarkUnit::Single(item), key.child(i)))
                .collect()
        };

        let target = if tag == "text" {
            StyleTarget::Text
        } else {
            StyleTarget::Element
        };

        for (unit, node) in units {
            let style = if is_group {
                None
            } else {
                style_declarations(unit, mark, target, self.registry, self.config)
            };

            let mut cx = EncodeContext {
                registry: &mut *self.registry,
                images: self.images,
                node: &node,
            };
            let Some(attrs) = encoder.attributes(unit, &mut cx) else {
                crate::log::debug!(marktype = %mark.marktype, node = %node, "omitting element without attributes");
                continue;
            };

            self.out += &open_tag(tag, &attrs, style.as_deref());
            if let MarkUnit::Single(item) = unit {
                if target == StyleTarget::Text {
                    self.out += &escape_text(item.text.as_ref());
                }
                if is_group {
                    self.render_background(item, mark);
                    self.render_group(item, &node);
                }
            }
            self.out += &close_tag(tag);
        }

        self.out += &close_tag("g");
    }

    fn render_background(&mut self, item: &Item, mark: &Mark) {
        let attrs = Attrs::new()
            .set("class", "background")
            .num("width", or_zero(item.width))
            .num("height", or_zero(item.height));
        let style = style_declarations(
            MarkUnit::Single(item),
            mark,
            StyleTarget::Background,
            self.registry,
            self.config,
        );
        self.out += &open_tag("rect", &attrs, style.as_deref());
        self.out += &close_tag("rect");
    }

    /// Emit the children of a group item in paint order: back axes, marks,
    /// remaining axes, legends.
    pub fn render_group(&mut self, item: &Item, key: &NodeKey) {
        let layers = item
            .axis_items
            .iter()
            .filter(|axis| axis.is_back_layer())
            .chain(&item.items)
            .chain(item.axis_items.iter().filter(|axis| !axis.is_back_layer()))
            .chain(&item.legend_items);

        for (i, mark) in layers.enumerate() {
            self.render_mark(mark, &key.child(i));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::image::ImageLoader;
    use crate::scene::MarkType;

    fn walk(scene: &Mark) -> (String, ResourceRegistry) {
        let mut registry = ResourceRegistry::new();
        let images = ImageLoader::default();
        let config = RenderConfig::default();
        let body = SceneWalker::new(&mut registry, &images, &config).render(scene);
        (body, registry)
    }

    #[test]
    fn empty_mark_is_a_bare_wrapper() {
        let (body, registry) = walk(&Mark::new(MarkType::Symbol));
        assert_eq!(body, r#"<g class="mark-symbol"></g>"#);
        assert!(registry.is_empty());
    }

    #[test]
    fn unknown_marks_are_skipped() {
        let (body, _) = walk(&Mark::new(MarkType::Unknown("sparkle".into())));
        assert_eq!(body, "");
    }

    #[test]
    fn empty_nested_mark_emits_no_path() {
        let (body, _) = walk(&Mark::new(MarkType::Line));
        assert_eq!(body, r#"<g class="mark-line"></g>"#);
    }

    #[test]
    fn non_interactive_leaf_wrapper() {
        let mark = Mark::new(MarkType::Rect)
            .with_interactive(false)
            .with_items(vec![Item::new()]);
        let (body, _) = walk(&mark);
        assert_eq!(
            body,
            concat!(
                r#"<g class="mark-rect" style="pointer-events: none;">"#,
                r#"<rect x="0" y="0" width="0" height="0" style="fill: none;"></rect>"#,
                r#"</g>"#,
            )
        );
    }

    #[test]
    fn text_content_is_escaped() {
        let item = Item {
            text: Some("a < b".into()),
            ..Item::new()
        };
        let (body, _) = walk(&Mark::new(MarkType::Text).with_items(vec![item]));
        assert!(body.contains(">a &lt; b</text>"), "{body}");
    }

    #[test]
    fn group_children_follow_paint_order() {
        let group = Item {
            axis_items: vec![
                Mark::new(MarkType::Rule).with_name("front-axis"),
                Mark::new(MarkType::Rule).with_name("back-axis").with_layer("back"),
            ],
            items: vec![Mark::new(MarkType::Rect).with_name("bars")],
            legend_items: vec![Mark::new(MarkType::Group).with_name("legend")],
            ..Item::new()
        };
        let (body, _) = walk(&Mark::new(MarkType::Group).with_items(vec![group]));

        let order: Vec<usize> = ["back-axis", "bars", "front-axis", "legend"]
            .iter()
            .map(|name| body.find(name).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]), "{body}");
    }

    #[test]
    fn group_item_gets_background_before_children() {
        let group = Item {
            width: Some(40.0),
            height: Some(30.0),
            fill: Some("#eee".into()),
            items: vec![Mark::new(MarkType::Rect)],
            ..Item::at(5.0, 5.0)
        };
        let (body, _) = walk(&Mark::new(MarkType::Group).with_items(vec![group]));
        assert_eq!(
            body,
            concat!(
                r#"<g class="mark-group">"#,
                r#"<g transform="translate(5,5)">"#,
                r#"<rect class="background" width="40" height="30" style="fill: #eee;"></rect>"#,
                r#"<g class="mark-rect"></g>"#,
                r#"</g>"#,
                r#"</g>"#,
            )
        );
    }

    #[test]
    fn sibling_clipped_groups_get_distinct_ids() {
        let clipped = || Item {
            clip: true,
            width: Some(10.0),
            height: Some(10.0),
            ..Item::new()
        };
        let (body, registry) =
            walk(&Mark::new(MarkType::Group).with_items(vec![clipped(), clipped()]));
        assert!(body.contains("url(#clip1)"));
        assert!(body.contains("url(#clip2)"));
        assert_eq!(registry.clip_count(), 2);
    }
}
