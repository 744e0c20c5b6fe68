mod scene;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tilemap_render::{CaptureSink, DebugTextSink, TilemapRenderer, TilemapView};
use tracing_subscriber::EnvFilter;

use crate::scene::Scene;

#[derive(Parser)]
#[command(name = "tilemap-cli", about = "CLI tool for tilemap culling and batch generation")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the visible tile window for a scene
    Cull {
        #[command(flatten)]
        scene: SceneArgs,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate one batch and print frame stats
    Render {
        #[command(flatten)]
        scene: SceneArgs,
        /// Dump every emitted quad
        #[arg(long)]
        dump: bool,
    },
    /// Time repeated renders while the camera spins
    Bench {
        #[command(flatten)]
        scene: SceneArgs,
        /// Number of frames to render
        #[arg(short, long, default_value = "1000")]
        frames: u32,
        /// Camera rotation per frame, in degrees
        #[arg(long, default_value = "0.5")]
        spin: f32,
    },
}

#[derive(Args)]
struct SceneArgs {
    /// YAML scene file; defaults are used when omitted
    #[arg(short, long)]
    scene: Option<PathBuf>,
    /// Camera X position override
    #[arg(long, allow_hyphen_values = true)]
    x: Option<f32>,
    /// Camera Y position override
    #[arg(long, allow_hyphen_values = true)]
    y: Option<f32>,
    /// Camera angle override, in degrees
    #[arg(long, allow_hyphen_values = true)]
    angle: Option<f32>,
    /// Camera zoom override
    #[arg(long)]
    zoom: Option<f32>,
}

impl SceneArgs {
    fn load(&self) -> anyhow::Result<Scene> {
        let mut scene = match &self.scene {
            Some(path) => Scene::load(path)?,
            None => Scene::default(),
        };
        let camera = &mut scene.camera;
        if let Some(x) = self.x {
            camera.position.x = x;
        }
        if let Some(y) = self.y {
            camera.position.y = y;
        }
        if let Some(angle) = self.angle {
            camera.angle = angle.to_radians();
        }
        if let Some(zoom) = self.zoom {
            camera.zoom = zoom;
        }
        Ok(scene)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("tilemap-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", tilemap_common::crate_info());
            println!("cull: {}", tilemap_cull::crate_info());
            println!("render: {}", tilemap_render::crate_info());
        }
        Commands::Cull { scene, json } => {
            let scene = scene.load()?;
            let (grid, tileset) = scene.build_map()?;
            let view = TilemapView::new(&grid, &tileset, scene.transform);
            let renderer = TilemapRenderer::new(scene.params);
            let result = renderer.cull(&scene.camera, &view);

            if json {
                let text =
                    serde_json::to_string_pretty(&result).context("serializing culling result")?;
                println!("{text}");
            } else {
                println!(
                    "Visible: start=({}, {}) count=({}, {}) of ({}, {})",
                    result.visible_start.x,
                    result.visible_start.y,
                    result.visible_count.x,
                    result.visible_count.y,
                    view.tile_count().x,
                    view.tile_count().y
                );
                let o = result.render_origin_world;
                println!("Origin: ({:.2}, {:.2}, {:.2})", o.x, o.y, o.z);
                println!(
                    "Axes: x=({:.3}, {:.3}) y=({:.3}, {:.3})",
                    result.x_axis_world.x,
                    result.x_axis_world.y,
                    result.y_axis_world.x,
                    result.y_axis_world.y
                );
            }
        }
        Commands::Render { scene, dump } => {
            let scene = scene.load()?;
            let (grid, tileset) = scene.build_map()?;
            let view = TilemapView::new(&grid, &tileset, scene.transform);
            let mut renderer = TilemapRenderer::new(scene.params);
            let mut sink = DebugTextSink::new(dump);

            let stats = renderer.render(&scene.camera, &view, &mut sink);
            print!("{}", sink.output());
            println!("{stats}");
        }
        Commands::Bench {
            scene,
            frames,
            spin,
        } => {
            anyhow::ensure!(frames > 0, "--frames must be at least 1");
            let mut scene = scene.load()?;
            let (grid, tileset) = scene.build_map()?;
            let view = TilemapView::new(&grid, &tileset, scene.transform);
            let mut renderer = TilemapRenderer::new(scene.params);
            let mut sink = CaptureSink::new();

            println!("Bench: {frames} frames, spin={spin} deg/frame");
            let start = Instant::now();
            let mut peak_quads = 0;
            for _ in 0..frames {
                let stats = renderer.render(&scene.camera, &view, &mut sink);
                peak_quads = peak_quads.max(stats.emitted_quads);
                scene.camera.rotate(spin.to_radians());
            }
            let elapsed = start.elapsed();
            println!(
                "Rendered {} quads total (peak {peak_quads}/frame): {:?}/frame, total {elapsed:?}",
                sink.total_tiles,
                elapsed / frames
            );
        }
    }

    Ok(())
}
