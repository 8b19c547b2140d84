//! SVG string rendering for scenegraphs
//!
//! This module is organized into submodules:
//! - `defaults`: Default fonts, symbol sizes and layer names
//! - `svg`: Markup primitives (tags, attributes, escaping, CSS helpers)
//! - `registry`: Gradient and clip definitions discovered during a render
//! - `style`: Inline style declarations for emitted elements
//! - `marks`: Per-mark-type element encoders
//! - `geometry`: Path data for area, line, arc and symbol marks
//! - `image`: Image URL resolution
//! - `walker`: Depth-first traversal producing the document body
//! - `document`: Assembly of the final document text

pub mod defaults;
pub mod document;
pub mod geometry;
pub mod image;
pub mod marks;
pub mod registry;
pub mod style;
pub mod svg;
pub mod walker;

pub use document::Document;
pub use image::{ImageLoader, ImageResolver};
pub use registry::{ClipRect, NodeKey, ResourceRegistry};
pub use walker::SceneWalker;

use crate::config::RenderConfig;
use crate::scene::Mark;
use crate::types::Padding;

/// Renderer lifecycle: size the output, then render scenes into it.
pub trait Renderer {
    /// Set the plot size and the margins around it.
    fn resize(&mut self, width: f64, height: f64, padding: Padding) -> &mut Self;

    /// Render a scene tree at the current size.
    fn render(&mut self, scene: &Mark) -> &mut Self;
}

/// The last size passed to [`Renderer::resize`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
}

/// Renders scenes into an SVG document string.
///
/// Gradient and clip definitions accumulate across renders until
/// [`SvgStringRenderer::reset`] is called, so a clipped group keeps its id
/// while the tree around it is unchanged.
pub struct SvgStringRenderer<R: ImageResolver = ImageLoader> {
    config: RenderConfig,
    images: R,
    registry: ResourceRegistry,
    document: Document,
    viewport: Viewport,
}

impl SvgStringRenderer {
    /// A renderer that resolves image URLs against `config.base_url`.
    pub fn new(config: RenderConfig) -> Self {
        let images = ImageLoader::new(config.base_url.clone());
        Self::with_resolver(config, images)
    }
}

impl<R: ImageResolver> SvgStringRenderer<R> {
    pub fn with_resolver(config: RenderConfig, images: R) -> Self {
        Self {
            config,
            images,
            registry: ResourceRegistry::new(),
            document: Document::new(),
            viewport: Viewport::default(),
        }
    }

    /// The serialized document.
    pub fn svg(&self) -> String {
        self.document.serialize()
    }

    /// Forget every registered gradient and clip; clip ids restart at `clip1`.
    pub fn reset(&mut self) {
        self.registry.reset();
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}

impl<R: ImageResolver> Renderer for SvgStringRenderer<R> {
    fn resize(&mut self, width: f64, height: f64, padding: Padding) -> &mut Self {
        self.viewport = Viewport {
            width,
            height,
            padding,
        };
        self.document.configure(width, height, &padding);
        self
    }

    fn render(&mut self, scene: &Mark) -> &mut Self {
        let body = SceneWalker::new(&mut self.registry, &self.images, &self.config).render(scene);
        let defs = self.registry.render();
        crate::log::debug!(
            body_len = body.len(),
            gradients = self.registry.gradient_count(),
            clips = self.registry.clip_count(),
            "render pass complete"
        );
        self.document.set_body(body);
        self.document.set_defs(defs);
        self
    }
}
