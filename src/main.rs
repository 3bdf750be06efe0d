use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info, trace, warn};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use regrowth_common::SimulationConfig;
use regrowth_visualizer::{FrameRenderer, RenderOptions};
use vascular_regrowth::{FrameEvent, RegrowthSimulation};

/// Command-line arguments for the simulation driver
#[derive(Parser, Debug)]
#[command(author, version, about = "Vascular and tissue regrowth cellular automaton", long_about = None)]
struct Args {
    /// Path to the TOML configuration (built-in defaults are used if it does not exist)
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the random seed from the configuration
    #[arg(long)]
    seed: Option<u64>,

    /// Override the total number of steps
    #[arg(long)]
    steps: Option<u32>,

    /// Output GIF path (defaults to <base_filename>.gif)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip rendering the animation
    #[arg(long, default_value_t = false)]
    no_render: bool,
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = if args.config.exists() {
        SimulationConfig::load(&args.config)
            .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?
    } else {
        warn!("Config file '{}' not found, using built-in defaults.", args.config.display());
        SimulationConfig::default()
    };

    if let Some(seed) = args.seed {
        config.run.seed = seed;
    }
    if let Some(steps) = args.steps {
        config.timing.total_steps = steps;
    }
    if args.no_render {
        config.output.save_animation = false;
    }

    // Overrides can break an otherwise valid file
    config.validate().context("Invalid simulation configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    // Initialize the logger, showing info by default
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    info!("Starting Vascular Regrowth Simulation...");

    // --- Load Configuration ---
    let config = load_config(&args)?;

    // --- Initialize Simulation ---
    let mut sim = RegrowthSimulation::new(config)?;
    debug!("Simulation Parameters: {:#?}", sim.params());

    let total_steps = sim.params().total_steps;
    let grid_size = sim.params().grid_size;
    let output = sim.config().output.clone();

    let mut renderer = if output.save_animation {
        let options = RenderOptions {
            cell_scale: output.cell_scale,
            fps: output.fps,
            ..RenderOptions::default()
        };
        Some(FrameRenderer::new(grid_size, options))
    } else {
        info!("Animation output disabled.");
        None
    };

    // --- Simulation Loop ---
    info!(
        "Starting simulation loop for {} steps (injury at step {})...",
        total_steps,
        sim.params().injury_step
    );
    let start_time = Instant::now();
    sim.record_snapshot();

    while !sim.is_finished() {
        let step_start_time = Instant::now();
        match sim.tick() {
            FrameEvent::InjuryApplied => info!("Step {} | Injury Applied", sim.current_step() - 1),
            FrameEvent::Advanced { step, scar_count } => {
                if step % 25 == 0 {
                    info!("Step {} | Scar Area: {}", step, scar_count);
                } else {
                    trace!("Step {} | Scar Area: {}", step, scar_count);
                }
            }
        }
        sim.record_snapshot();

        if let Some(renderer) = renderer.as_mut() {
            renderer.push_grid(sim.grid().as_slice())?;
        }
        trace!(
            "Step [{}/{}] completed in {:.3} ms",
            sim.current_step(),
            total_steps,
            step_start_time.elapsed().as_secs_f64() * 1000.0
        );
    }

    let total_duration = start_time.elapsed();
    let final_counts = sim.label_counts();
    info!(
        "Simulation finished in {:.3} seconds. Final scar area: {}, necrosis: {}, vessels: {}.",
        total_duration.as_secs_f64(),
        final_counts.scar,
        final_counts.necrosis,
        final_counts.vessel
    );

    // --- Save Outputs ---
    if let Some(renderer) = renderer {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.gif", output.base_filename)));
        info!("Rendering {} frames to {}...", renderer.frame_count(), path.display());
        renderer.write_gif(&path)?;
    }

    if output.save_stats {
        let filename = format!("{}_stats.json", output.base_filename);
        match serde_json::to_string_pretty(sim.recorded_snapshots()) {
            Ok(json_string) => match File::create(&filename) {
                Ok(mut file) => {
                    if let Err(e) = file.write_all(json_string.as_bytes()) {
                        error!("Error writing stats JSON to file '{}': {}", filename, e);
                    } else {
                        info!("Step statistics saved to {}", filename);
                    }
                }
                Err(e) => error!("Error creating stats file '{}': {}", filename, e),
            },
            Err(e) => error!("Error serializing step statistics to JSON: {}", e),
        }
    } else {
        info!("Skipping saving statistics as per config (save_stats is false).");
    }

    info!("Simulation Complete.");
    Ok(())
}
