//! SDF scene renderer
//!
//! Sphere-traces a JSON scene description into a PPM or PNG raster.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use log::info;

use raymarcher::objects::Scene;
use raymarcher::output::write_image;
use raymarcher::render::render;

/// Render a JSON scene description into an image by sphere tracing
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Output image width in pixels
    width: u32,
    /// Output image height in pixels
    height: u32,
    /// Scene description file (.json)
    scene: PathBuf,
    /// Output image file (.ppm or .png)
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.width == 0 || cli.height == 0 {
        bail!("width and height must be greater than 0");
    }
    if cli.scene.extension().and_then(|e| e.to_str()) != Some("json") {
        bail!("input scene file must have a .json extension");
    }
    match cli.output.extension().and_then(|e| e.to_str()) {
        Some("ppm") | Some("png") => {}
        _ => bail!("output image file must have a .ppm or .png extension"),
    }

    let text = fs::read_to_string(&cli.scene)
        .with_context(|| format!("failed to read scene file {}", cli.scene.display()))?;
    let scene = Scene::from_json(&text)
        .with_context(|| format!("invalid scene description {}", cli.scene.display()))?;
    info!(
        "scene loaded: {} objects, {} lights",
        scene.objects.len(),
        scene.lights.len()
    );

    let buffer = render(&scene, cli.width as usize, cli.height as usize);
    write_image(&cli.output, &buffer)?;
    info!(
        "wrote {}x{} image to {}",
        cli.width,
        cli.height,
        cli.output.display()
    );
    Ok(())
}
