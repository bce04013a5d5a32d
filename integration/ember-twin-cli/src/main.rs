//! Render built-in Ember-GS verification scenes through the digital
//! twin and dump the resulting frame as a PNG.

mod scenes;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use ember_twin::GpuTwin;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scene {
    /// Gouraud-shaded RGB triangle.
    Gouraud,
    /// Two depth-tested overlapping triangles.
    DepthTest,
    /// Checker-textured triangle through the MODULATE combiner.
    Textured,
    /// Stippled, dithered color ramp.
    Stipple,
}

#[derive(Parser)]
#[command(about = "Ember-GS digital twin scene renderer")]
struct Args {
    /// Scene to render.
    #[arg(value_enum)]
    scene: Scene,

    /// Output PNG path.
    #[arg(short, long, default_value = "frame.png")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut gpu = GpuTwin::new();
    match args.scene {
        Scene::Gouraud => scenes::gouraud(&mut gpu),
        Scene::DepthTest => scenes::depth_test(&mut gpu),
        Scene::Textured => scenes::textured(&mut gpu),
        Scene::Stipple => scenes::stipple(&mut gpu),
    }
    gpu.run_until_idle();
    log::info!(
        "rendered in {} cycles, {} pixels written",
        gpu.cycles(),
        gpu.stats().written
    );

    gpu.save_frame_png(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("wrote {}", args.output.display());
    Ok(())
}
