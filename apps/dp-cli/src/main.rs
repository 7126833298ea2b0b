mod error;

use clap::{Parser, Subcommand};
use dp_config::{Preset, SimConfig};
use dp_core::{BodyId, wrap_angle};
use dp_sim::{SimOptions, run_sim, total_energy};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use crate::error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "dp-cli")]
#[command(about = "Headless double pendulum ensemble runner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the simulation config comes from.
#[derive(clap::Args)]
struct ConfigSource {
    /// Path to a YAML or JSON config file
    config_path: Option<PathBuf>,
    /// Built-in preset used when no file is given (reference, long-trail, single)
    #[arg(long)]
    preset: Option<Preset>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a config file
    Validate {
        /// Path to the config file
        config_path: PathBuf,
    },
    /// Tick an ensemble and print per-body summaries
    Run {
        #[command(flatten)]
        source: ConfigSource,
        /// Number of frames to tick
        #[arg(long, default_value_t = 600)]
        frames: usize,
        /// Sample energies every N frames
        #[arg(long, default_value_t = 60)]
        record_every: usize,
        /// Step bodies in parallel
        #[arg(long)]
        parallel: bool,
        /// Number of bodies to list
        #[arg(long, default_value_t = 10)]
        show: usize,
    },
    /// Export one body's trail as CSV after ticking
    Trail {
        #[command(flatten)]
        source: ConfigSource,
        /// Body index
        #[arg(long, default_value_t = 0)]
        body: u32,
        /// Number of frames to tick
        #[arg(long, default_value_t = 600)]
        frames: usize,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write a preset config
    Preset {
        /// Preset name (reference, long-trail, single)
        name: Preset,
        /// Output file path; extension picks YAML or JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Run {
            source,
            frames,
            record_every,
            parallel,
            show,
        } => cmd_run(&source, frames, record_every, parallel, show),
        Commands::Trail {
            source,
            body,
            frames,
            output,
        } => cmd_trail(&source, body, frames, output.as_deref()),
        Commands::Preset { name, output } => cmd_preset(name, output.as_deref()),
    }
}

fn resolve_config(source: &ConfigSource) -> CliResult<SimConfig> {
    match (&source.config_path, source.preset) {
        (Some(_), Some(_)) => Err(CliError::InvalidArg(
            "give either a config path or --preset, not both".to_string(),
        )),
        (Some(path), None) => Ok(dp_config::load(path)?),
        (None, Some(preset)) => Ok(preset.config()),
        (None, None) => Ok(Preset::Reference.config()),
    }
}

fn cmd_validate(config_path: &Path) -> CliResult<()> {
    println!("Validating config: {}", config_path.display());
    let config = dp_config::load(config_path)?;
    config.params().validate()?;
    println!(
        "✓ Config is valid ({} bodies, trail {} points)",
        config.ensemble.count, config.trail.capacity
    );
    Ok(())
}

fn cmd_run(
    source: &ConfigSource,
    frames: usize,
    record_every: usize,
    parallel: bool,
    show: usize,
) -> CliResult<()> {
    let config = resolve_config(source)?;
    let params = config.params();
    let mut ensemble = config.build_ensemble()?;
    let opts = SimOptions {
        frames,
        record_every,
        tick: config.tick_options(),
        parallel,
    };

    println!(
        "Running '{}': {} bodies, {} frames, {:?} x{} sub-steps",
        config.name,
        ensemble.len(),
        frames,
        opts.tick.integrator,
        opts.tick.substep_count()
    );

    let started = Instant::now();
    let record = run_sim(&mut ensemble, &params, &opts)?;
    let elapsed = started.elapsed();
    info!(elapsed_ms = elapsed.as_millis() as u64, "run finished");

    let t_end = record.samples.last().map_or(0.0, |s| s.t);
    println!(
        "✓ Simulated t = {:.3} in {:.3}s ({} samples)",
        t_end,
        elapsed.as_secs_f64(),
        record.samples.len()
    );
    if !record.non_finite.is_empty() {
        println!(
            "⚠ {} bodies became non-finite: {:?}",
            record.non_finite.len(),
            record.non_finite
        );
    }

    println!(
        "{:>5} {:>9} {:>9} {:>9} {:>9} {:>19} {:>12} {:>10}",
        "body", "theta1", "theta2", "omega1", "omega2", "tip", "energy", "drift"
    );
    for (id, body) in ensemble.iter().take(show) {
        let index = id.index() as usize;
        let state = &body.state;
        let p = body.params(&params);
        let tip = state.trail().latest();
        let tip = tip.map_or_else(|| "-".to_string(), |t| format!("({:.1}, {:.1})", t.x, t.y));
        let drift = record
            .max_relative_energy_drift(index)
            .map_or_else(|| "-".to_string(), |d| format!("{d:.2e}"));
        println!(
            "{:>5} {:>9.4} {:>9.4} {:>9.4} {:>9.4} {:>19} {:>12.3} {:>10}",
            id,
            wrap_angle(state.theta1()),
            wrap_angle(state.theta2()),
            state.omega1(),
            state.omega2(),
            tip,
            total_energy(&state.phase(), &p),
            drift
        );
    }
    if ensemble.len() > show {
        println!("  ... {} more", ensemble.len() - show);
    }
    Ok(())
}

fn cmd_trail(
    source: &ConfigSource,
    body: u32,
    frames: usize,
    output: Option<&Path>,
) -> CliResult<()> {
    let config = resolve_config(source)?;
    let params = config.params();
    let mut ensemble = config.build_ensemble()?;
    let tick = config.tick_options();

    let id = BodyId::from_index(body)
        .filter(|id| (id.index() as usize) < ensemble.len())
        .ok_or_else(|| {
            CliError::InvalidArg(format!(
                "body {body} out of range (ensemble has {} bodies)",
                ensemble.len()
            ))
        })?;

    for _ in 0..frames {
        ensemble.tick(&params, &tick);
    }

    let Some(selected) = ensemble.body(id) else {
        return Err(CliError::InvalidArg(format!("body {body} not found")));
    };
    let color = selected.state.trail_color();

    let mut csv = String::new();
    csv.push_str(&format!(
        "# body {id} color ({:.3}, {:.3}, {:.3})\n",
        color.r, color.g, color.b
    ));
    csv.push_str("index,x,y,alpha\n");
    for (i, (p, alpha)) in selected.state.trail().faded().enumerate() {
        csv.push_str(&format!("{},{},{},{}\n", i, p.x, p.y, alpha));
    }

    write_output(output, &csv)
}

fn cmd_preset(preset: Preset, output: Option<&Path>) -> CliResult<()> {
    let config = preset.config();
    match output {
        Some(path) => {
            match path.extension().and_then(|e| e.to_str()) {
                Some("json") => dp_config::save_json(path, &config)?,
                _ => dp_config::save_yaml(path, &config)?,
            }
            println!("✓ Wrote preset '{}' to {}", preset, path.display());
            Ok(())
        }
        None => {
            let yaml = dp_config::to_yaml_string(&config)?;
            write_output(None, &yaml)
        }
    }
}

fn write_output(output: Option<&Path>, content: &str) -> CliResult<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)?;
            println!("✓ Wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
