use clap::{Parser, Subcommand};
use shadowbox_common::Viewport;
use shadowbox_render::{Bootstrap, BootstrapConfig, Bootstrapper, Capability, CapabilityProbe};
use shadowbox_render_wgpu::{GpuContext, GpuOptions, HeadlessRenderer, WgpuProbe};
use shadowbox_scene::build_scene;
use shadowbox_tools::SceneInspector;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shadowbox-cli", about = "Headless shadowbox scene tool")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML file overriding scene and renderer defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report whether 3D rendering is supported on this machine
    Probe,
    /// Render the scene once and save the frame as PNG
    Render {
        #[arg(long, default_value = "800")]
        width: u32,
        #[arg(long, default_value = "600")]
        height: u32,
        #[arg(short, long, default_value = "frame.png")]
        output: PathBuf,
    },
    /// Build the scene without a GPU and print its contents
    Inspect {
        #[arg(long, default_value = "800")]
        width: u32,
        #[arg(long, default_value = "600")]
        height: u32,
        /// Print the scene as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("shadowbox-cli starting");

    let config = BootstrapConfig::load_or_default(cli.config.as_deref())?;
    tracing::debug!(config = ?cli.config, "configuration loaded");

    match cli.command {
        Commands::Probe => match WgpuProbe::default().probe() {
            Capability::Supported(adapter) => println!("supported: {adapter}"),
            Capability::Unsupported { reason } => println!("unsupported: {reason}"),
        },
        Commands::Render {
            width,
            height,
            output,
        } => {
            let viewport = Viewport::new(width, height);
            let options = GpuOptions::default();
            let boot = Bootstrapper::new(WgpuProbe::new(options), config, viewport);
            let outcome = boot.run(|settings, viewport| {
                let gpu = GpuContext::headless(&options)?;
                HeadlessRenderer::new(gpu, settings, viewport)
            })?;

            match outcome {
                Bootstrap::Rendered { context, frame } => {
                    frame.write_png(&output)?;
                    println!(
                        "Rendered {}x{} frame of {} nodes to {}",
                        frame.width,
                        frame.height,
                        context.scene().len(),
                        output.display()
                    );
                }
                Bootstrap::Unsupported { reason } => {
                    println!("3D rendering is not supported: {reason}");
                }
            }
        }
        Commands::Inspect {
            width,
            height,
            json,
        } => {
            let context = build_scene(&config.scene, Viewport::new(width, height));
            let scene = context.scene();
            let summary = SceneInspector::summary(scene);

            if json {
                let doc = serde_json::json!({
                    "summary": summary,
                    "scene": scene,
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                println!("{summary}");
                for node in SceneInspector::list_nodes(scene) {
                    println!("  {node}");
                }
            }
        }
    }

    Ok(())
}
