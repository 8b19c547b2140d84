//! Render a scenegraph JSON file to SVG on stdout.
//!
//! ```text
//! cargo run --example render_scene --features tracing -- scene.json [width height padding]
//! ```

use scenesvg::{Padding, RenderConfig, Renderer, SvgStringRenderer, scene};

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        miette::bail!("usage: render_scene <scene.json> [width height padding]");
    };
    let mut dims = args.map(|arg| {
        arg.parse::<f64>()
            .map_err(|e| miette::miette!("invalid number {arg:?}: {e}"))
    });
    let width = dims.next().transpose()?.unwrap_or(500.0);
    let height = dims.next().transpose()?.unwrap_or(300.0);
    let padding = dims.next().transpose()?.unwrap_or(5.0);

    let scene = scene::from_path(&path)?;
    let mut renderer = SvgStringRenderer::new(RenderConfig::default());
    renderer
        .resize(width, height, Padding::uniform(padding))
        .render(&scene);

    println!("{}", renderer.svg());
    Ok(())
}
