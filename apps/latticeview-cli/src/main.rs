use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use latticeview_render::{DebugTextRenderer, RenderView, Renderer};
use latticeview_scene::{DemoScene, SceneConfig};
use latticeview_tools::{DebugOptions, HelperHandles, NodeInfo, SceneInspector, SceneSummary};
use latticeview_tween::{Tweens, animate_lattice};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "latticeview-cli", about = "CLI tool for latticeview scenes")]
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
    /// Build the demo scene and describe it
    Describe {
        /// Print a JSON summary instead of text
        #[arg(long)]
        json: bool,
        /// Scene config (YAML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Run the lattice tweens without a window
    Simulate {
        /// Number of frames to step
        #[arg(short, long, default_value = "120")]
        frames: u32,
        /// Simulated frame rate
        #[arg(long, default_value = "60")]
        fps: f32,
        /// Print every Nth frame
        #[arg(long, default_value = "10")]
        every: u32,
        /// Scene config (YAML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Write the default config as YAML
    Config {
        /// Destination file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Serialize)]
struct Description {
    summary: SceneSummary,
    panel: DebugOptions,
    nodes: Vec<NodeInfo>,
}

fn load_config(path: Option<&Path>) -> Result<SceneConfig> {
    match path {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(SceneConfig::default()),
    }
}

fn describe(config: &SceneConfig, json: bool) -> Result<String> {
    let demo = DemoScene::build(config);
    if json {
        let description = Description {
            summary: SceneInspector::summary(&demo.scene, &HelperHandles::from(&demo)),
            panel: DebugOptions {
                show_axis: config.helpers.show_axis,
                show_grid: config.helpers.show_grid,
                ..DebugOptions::default()
            },
            nodes: SceneInspector::list_attached(&demo.scene),
        };
        return Ok(serde_json::to_string_pretty(&description)?);
    }
    let view = RenderView::from_config(&config.camera, 16.0 / 9.0);
    Ok(DebugTextRenderer::new().render(&demo.scene, &view))
}

fn simulate(config: &SceneConfig, frames: u32, fps: f32, every: u32) -> Result<()> {
    if fps <= 0.0 {
        bail!("fps must be positive, got {fps}");
    }
    let mut demo = DemoScene::build(config);
    let mut tweens = Tweens::new();
    animate_lattice(&mut tweens, &demo.cubes, &config.tween)?;

    let Some(&tracked) = demo.cubes.first() else {
        println!("lattice is empty, nothing to simulate");
        return Ok(());
    };
    let dt = 1.0 / fps;
    let every = every.max(1);
    println!(
        "Simulating {frames} frames at {fps} fps ({} tweens)",
        tweens.len()
    );

    for frame in 0..=frames {
        if frame > 0 {
            tweens.update(dt, &mut demo.scene);
        }
        if frame % every == 0 || frame == frames {
            if let Some(info) = SceneInspector::inspect_node(&demo.scene, tracked) {
                println!("t={:>6.3}s {info}", frame as f32 * dt);
            }
        }
    }
    println!("Active tweens: {}", tweens.len());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("latticeview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", latticeview_common::crate_info());
            println!("scene: {}", latticeview_scene::crate_info());
            println!("tween: {}", latticeview_tween::crate_info());
            println!("input: {}", latticeview_input::crate_info());
            println!("tools: {}", latticeview_tools::crate_info());
            println!("render: {}", latticeview_render::crate_info());
        }
        Commands::Describe { json, config } => {
            let config = load_config(config.as_deref())?;
            print!("{}", describe(&config, json)?);
            if json {
                println!();
            }
        }
        Commands::Simulate {
            frames,
            fps,
            every,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            simulate(&config, frames, fps, every)?;
        }
        Commands::Config { output } => {
            SceneConfig::default()
                .save(&output)
                .with_context(|| format!("failed to write {}", output.display()))?;
            tracing::info!("wrote default config to {}", output.display());
        }
    }

    Ok(())
}
