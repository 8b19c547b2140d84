//! Resource registry - tracks defs discovered while walking the scene
//!
//! Gradients and clip rectangles are registered as a side effect of emitting
//! the body and rendered into the `<defs>` block afterwards. Tables accumulate
//! across renders and are only cleared by [`ResourceRegistry::reset`], so
//! entries for marks that later disappear from the scene stay until then.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;

use super::svg::{Attrs, close_tag, open_tag};
use crate::scene::Gradient;

/// Stable identity of a scene node: its position in the tree.
///
/// The path alternates mark positions within a group (in paint order) and item
/// indices within a mark, starting at the root mark. The same node in an
/// unchanged tree always gets the same key. Keys follow position rather than
/// the node itself: once an earlier sibling is inserted or removed, a clipped
/// group takes the id of whatever node held its new position, and its old id
/// stays in the clip table until reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodeKey(Vec<u32>);

impl NodeKey {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(index as u32);
        Self(path)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/")?;
        for (i, idx) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{idx}")?;
        }
        Ok(())
    }
}

/// Size of a clip rectangle anchored at the group origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClipRect {
    pub width: f64,
    pub height: f64,
}

/// Gradient and clip definitions owned by one renderer.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    gradients: IndexMap<String, Gradient>,
    clips: IndexMap<String, ClipRect>,
    clip_ids: HashMap<NodeKey, String>,
    clip_counter: u32,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a gradient under its own id. A later registration with the same
    /// id replaces the earlier one.
    pub fn register_gradient(&mut self, gradient: &Gradient) {
        crate::log::trace!(id = %gradient.id, stops = gradient.stops.len(), "register gradient");
        self.gradients.insert(gradient.id.clone(), gradient.clone());
    }

    /// Record the clip rectangle of a node and return its id.
    ///
    /// The first registration for a node allocates `clip<N>`; later ones reuse
    /// that id and only refresh the stored size.
    pub fn register_clip(&mut self, node: &NodeKey, rect: ClipRect) -> String {
        let id = match self.clip_ids.get(node) {
            Some(id) => id.clone(),
            None => {
                self.clip_counter += 1;
                let id = format!("clip{}", self.clip_counter);
                self.clip_ids.insert(node.clone(), id.clone());
                id
            }
        };
        crate::log::trace!(node = %node, id = %id, width = rect.width, height = rect.height, "register clip");
        self.clips.insert(id.clone(), rect);
        id
    }

    /// The clip id previously assigned to a node, if any.
    pub fn clip_id(&self, node: &NodeKey) -> Option<&str> {
        self.clip_ids.get(node).map(String::as_str)
    }

    pub fn gradient(&self, id: &str) -> Option<&Gradient> {
        self.gradients.get(id)
    }

    pub fn clip(&self, id: &str) -> Option<ClipRect> {
        self.clips.get(id).copied()
    }

    pub fn gradient_count(&self) -> usize {
        self.gradients.len()
    }

    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gradients.is_empty() && self.clips.is_empty()
    }

    /// Clear every table and restart clip numbering at `clip1`.
    pub fn reset(&mut self) {
        crate::log::debug!(
            gradients = self.gradients.len(),
            clips = self.clips.len(),
            "reset resource registry"
        );
        self.gradients.clear();
        self.clips.clear();
        self.clip_ids.clear();
        self.clip_counter = 0;
    }

    /// Render the `<defs>` block, or nothing when no resource is registered.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut defs = open_tag("defs", &Attrs::new(), None);

        for (id, gradient) in &self.gradients {
            let attrs = Attrs::new()
                .set("id", id)
                .num("x1", gradient.x1)
                .num("x2", gradient.x2)
                .num("y1", gradient.y1)
                .num("y2", gradient.y2);
            defs += &open_tag("linearGradient", &attrs, None);
            for stop in &gradient.stops {
                let attrs = Attrs::new()
                    .num("offset", stop.offset)
                    .set("stop-color", &stop.color);
                defs += &open_tag("stop", &attrs, None);
                defs += &close_tag("stop");
            }
            defs += &close_tag("linearGradient");
        }

        for (id, clip) in &self.clips {
            defs += &open_tag("clipPath", &Attrs::new().set("id", id), None);
            let attrs = Attrs::new()
                .num("x", 0.0)
                .num("y", 0.0)
                .num("width", clip.width)
                .num("height", clip.height);
            defs += &open_tag("rect", &attrs, None);
            defs += &close_tag("rect");
            defs += &close_tag("clipPath");
        }

        defs += &close_tag("defs");
        defs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(width: f64, height: f64) -> ClipRect {
        ClipRect { width, height }
    }

    #[test]
    fn empty_registry_renders_nothing() {
        assert_eq!(ResourceRegistry::new().render(), "");
    }

    #[test]
    fn clip_ids_start_at_one() {
        let mut reg = ResourceRegistry::new();
        let a = reg.register_clip(&NodeKey::root().child(0), rect(10.0, 20.0));
        let b = reg.register_clip(&NodeKey::root().child(1), rect(5.0, 5.0));
        assert_eq!(a, "clip1");
        assert_eq!(b, "clip2");
    }

    #[test]
    fn clip_id_is_reused_for_same_node() {
        let mut reg = ResourceRegistry::new();
        let node = NodeKey::root().child(0).child(3);
        let first = reg.register_clip(&node, rect(10.0, 20.0));
        let second = reg.register_clip(&node, rect(30.0, 40.0));
        assert_eq!(first, second);
        assert_eq!(reg.clip_count(), 1);
        assert_eq!(reg.clip(&first), Some(rect(30.0, 40.0)));
    }

    #[test]
    fn clip_ids_track_position_not_node() {
        let mut reg = ResourceRegistry::new();
        let first = NodeKey::root().child(0);
        let second = NodeKey::root().child(1);
        reg.register_clip(&first, rect(10.0, 10.0));
        reg.register_clip(&second, rect(20.0, 20.0));

        // The first sibling is gone, so the second now sits at position 0.
        assert_eq!(reg.register_clip(&first, rect(20.0, 20.0)), "clip1");
        assert_eq!(reg.clip_count(), 2);
        assert_eq!(reg.clip("clip2"), Some(rect(20.0, 20.0)));
    }

    #[test]
    fn reset_restarts_numbering() {
        let mut reg = ResourceRegistry::new();
        let node = NodeKey::root().child(0);
        reg.register_clip(&NodeKey::root(), rect(1.0, 1.0));
        assert_eq!(reg.register_clip(&node, rect(1.0, 1.0)), "clip2");
        reg.reset();
        assert!(reg.is_empty());
        assert_eq!(reg.clip_id(&node), None);
        assert_eq!(reg.register_clip(&node, rect(1.0, 1.0)), "clip1");
    }

    #[test]
    fn gradient_registration_is_idempotent() {
        let mut reg = ResourceRegistry::new();
        let g = Gradient::linear("g1").stop(0.0, "red").stop(1.0, "blue");
        reg.register_gradient(&g);
        reg.register_gradient(&g);
        assert_eq!(reg.gradient_count(), 1);
        assert_eq!(reg.gradient("g1"), Some(&g));
    }

    #[test]
    fn render_gradients_then_clips() {
        let mut reg = ResourceRegistry::new();
        reg.register_clip(&NodeKey::root(), rect(100.0, 50.0));
        reg.register_gradient(&Gradient::linear("g1").stop(0.0, "red").stop(1.0, "blue"));
        assert_eq!(
            reg.render(),
            concat!(
                r#"<defs>"#,
                r#"<linearGradient id="g1" x1="0" x2="1" y1="0" y2="0">"#,
                r#"<stop offset="0" stop-color="red"></stop>"#,
                r#"<stop offset="1" stop-color="blue"></stop>"#,
                r#"</linearGradient>"#,
                r#"<clipPath id="clip1"><rect x="0" y="0" width="100" height="50"></rect></clipPath>"#,
                r#"</defs>"#,
            )
        );
    }

    #[test]
    fn node_key_display() {
        assert_eq!(NodeKey::root().to_string(), "/");
        assert_eq!(NodeKey::root().child(0).child(2).to_string(), "/0/2");
    }
}
