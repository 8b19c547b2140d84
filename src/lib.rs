//! Serialize a scenegraph of visual marks into an SVG document string.
//!
//! A scene is a tree of [`Mark`]s (groups, areas, lines, arcs, paths,
//! symbols, rects, rules, text and images) whose [`Item`]s carry geometry and
//! style. [`SvgStringRenderer`] walks the tree once, collecting gradients and
//! clip regions as it meets them, and places their definitions ahead of the
//! body so every `url(#id)` reference is declared before use.
//!
//! ```
//! use scenesvg::{Item, Mark, MarkType, Padding, RenderConfig, render_svg};
//!
//! let scene = Mark::new(MarkType::Rule).with_items(vec![Item::at(10.0, 20.0)]);
//! let svg = render_svg(&scene, 100.0, 100.0, Padding::default(), RenderConfig::default());
//! assert!(svg.contains(r#"<line x1="10" y1="20" x2="10" y2="20""#));
//! ```

pub mod config;
pub mod errors;
pub mod log;
pub mod render;
pub mod scene;
pub mod types;

pub use config::RenderConfig;
pub use errors::LoadError;
pub use render::{ImageLoader, ImageResolver, Renderer, SvgStringRenderer, Viewport};
pub use scene::{Datum, Gradient, Item, Mark, MarkType, Stop, StyleValue};
pub use types::Padding;

/// Render `scene` at the given size with a fresh renderer and return the
/// document.
pub fn render_svg(
    scene: &Mark,
    width: f64,
    height: f64,
    padding: Padding,
    config: RenderConfig,
) -> String {
    let mut renderer = SvgStringRenderer::new(config);
    renderer.resize(width, height, padding).render(scene);
    renderer.svg()
}
