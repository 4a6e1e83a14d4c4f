use anyhow::Context;
use clap::{Parser, Subcommand};
use partlight_bridge::{Delivery, UiConnector};
use partlight_common::{NodeId, Transform};
use partlight_highlight::{HighlightConfig, HighlightMaterials, HighlightRegistry};
use partlight_input::{DragRotate, PointerSample};
use partlight_render::{DebugTextRenderer, RenderView, Renderer};
use partlight_scene::{Scene, SceneDescription};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "partlight-cli", about = "Highlight named parts of a model")]
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
    /// Build a Chest/Arm/Leg model and drive it with sample UI messages
    Demo,
    /// Apply UI messages to a scene file
    Run {
        /// Scene description (YAML, or JSON by extension)
        #[arg(short, long)]
        scene: PathBuf,
        /// Highlight configuration (YAML, or JSON by extension)
        #[arg(short, long)]
        config: PathBuf,
        /// Message to apply; repeatable. Reads one message per stdin line when absent.
        #[arg(short = 'm', long = "message")]
        messages: Vec<String>,
    },
    /// Simulate dragging the model's root node for a number of ticks
    Spin {
        /// Scene description to spin; the built-in Chest/Arm/Leg model when absent
        #[arg(long)]
        scene: Option<PathBuf>,
        /// Number of ticks the button is held
        #[arg(short, long, default_value = "10")]
        ticks: u32,
        /// Horizontal pointer delta per tick
        #[arg(short, long, default_value = "0.1", allow_hyphen_values = true)]
        delta_x: f32,
        /// Rotation speed
        #[arg(short, long, default_value = "0.4")]
        speed: f32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();
    tracing::info!("partlight-cli v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Info => {
            println!("partlight-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("scene: {}", partlight_scene::crate_info());
            println!("highlight: {}", partlight_highlight::crate_info());
            println!("bridge: {}", partlight_bridge::crate_info());
            println!("input: {}", partlight_input::crate_info());
            println!("render: {}", partlight_render::crate_info());
        }
        Commands::Demo => run_demo()?,
        Commands::Run {
            scene,
            config,
            messages,
        } => run_messages(&scene, &config, messages)?,
        Commands::Spin {
            scene,
            ticks,
            delta_x,
            speed,
        } => {
            let mut scene = match scene {
                Some(path) => Scene::from_description(
                    &SceneDescription::load(&path)
                        .with_context(|| format!("loading scene {}", path.display()))?,
                )?,
                None => demo_scene()?.0,
            };
            let root = *scene.roots().first().context("scene has no root node")?;
            let sample = PointerSample {
                button_held: true,
                delta_x,
            };
            let transform = spin(&mut scene, root, &DragRotate::new(speed), &sample, ticks)
                .context("root node missing")?;
            let (axis, angle) = transform.rotation.to_axis_angle();
            println!(
                "After {ticks} ticks: {:.2} degrees about ({:.2}, {:.2}, {:.2})",
                angle.to_degrees(),
                axis.x,
                axis.y,
                axis.z
            );
        }
    }

    Ok(())
}

/// Chest/Arm/Leg model under a `Body` root, all on the neutral material.
fn demo_scene() -> anyhow::Result<(Scene, NodeId, HighlightMaterials)> {
    let mut scene = Scene::new();
    let materials = HighlightMaterials {
        neutral: scene.register_material("Neutral"),
        highlight: scene.register_material("Highlight"),
    };
    let root = scene.add_root("Body");
    for name in ["Chest", "Arm", "Leg"] {
        let node = scene.add_child(root, name)?;
        scene.attach_surface(node, materials.neutral)?;
    }
    Ok((scene, root, materials))
}

/// Hand one message to the connector, then drop the scene's per-message event log.
fn deliver(connector: &mut UiConnector, scene: &mut Scene, message: &str) -> Option<Delivery> {
    let delivery = connector.receive(scene, message);
    scene.drain_events();
    delivery
}

/// Drag `node` for `ticks` ticks with the same pointer sample. Returns its final transform.
fn spin(
    scene: &mut Scene,
    node: NodeId,
    rotate: &DragRotate,
    sample: &PointerSample,
    ticks: u32,
) -> Option<Transform> {
    let transform = scene.transform_mut(node)?;
    for _ in 0..ticks {
        rotate.update(transform, sample);
    }
    Some(*transform)
}

fn run_demo() -> anyhow::Result<()> {
    let (mut scene, root, materials) = demo_scene()?;

    let registry = HighlightRegistry::build(&scene, root, materials);
    let mut connector = UiConnector::with_registry(registry);
    let renderer = DebugTextRenderer::new();
    let view = RenderView {
        highlight: Some(materials.highlight),
        show_bare_nodes: false,
    };

    for message in ["Highlight:Chest", "Chest,Leg", "Clear"] {
        println!("> {message}");
        deliver(&mut connector, &mut scene, message);
        print!("{}", renderer.render(&scene, &view));
    }
    Ok(())
}

fn run_messages(
    scene_path: &Path,
    config_path: &Path,
    messages: Vec<String>,
) -> anyhow::Result<()> {
    let desc = SceneDescription::load(scene_path)
        .with_context(|| format!("loading scene {}", scene_path.display()))?;
    let mut scene = Scene::from_description(&desc)?;
    let config = HighlightConfig::load(config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;
    let registry = config.build_registry(&scene)?;
    let view = RenderView {
        highlight: Some(registry.materials().highlight),
        show_bare_nodes: false,
    };
    let mut connector = UiConnector::with_registry(registry);

    if messages.is_empty() {
        for line in std::io::stdin().lock().lines() {
            deliver(&mut connector, &mut scene, &line?);
        }
    } else {
        for message in &messages {
            deliver(&mut connector, &mut scene, message);
        }
    }

    print!("{}", DebugTextRenderer::new().render(&scene, &view));
    Ok(())
}
