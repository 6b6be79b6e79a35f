#![deny(unsafe_code)]
//! CLI binary for the equipotential visualizer core.
//!
//! Subcommands:
//! - `contours` - equipotential polylines for every level of the scene
//! - `probe <X> <Y>` - potential and field at one point
//! - `vectors` - field-direction arrows
//! - `scene` - print the effective scene after overrides

mod error;

use clap::{Parser, Subcommand};
use equipotential_contour::contour_scene;
use equipotential_core::{compute_field, compute_potential, Scene};
use error::CliError;
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Endpoint gap under which a stitched polyline is reported as a loop.
const CLOSED_TOLERANCE: f64 = 1e-6;

#[derive(Parser)]
#[command(name = "equipotential", about = "2-D electrostatics contour generator")]
struct Cli {
    /// Scene JSON file; the built-in three-charge scene when omitted.
    #[arg(long, global = true)]
    scene: Option<PathBuf>,

    /// Flat overrides as a JSON object (vmin, vmax, num_levels, nx, ny,
    /// field_step, min_length, max_length).
    #[arg(long, global = true, default_value = "{}")]
    params: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract and stitch equipotential contours.
    Contours {
        /// Write JSON here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Evaluate potential and field at a point.
    Probe {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Sample field-direction arrows on a lattice.
    Vectors {
        /// Write JSON here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the effective scene.
    Scene,
}

fn load_scene(path: Option<&Path>, params: &str) -> Result<Scene, CliError> {
    let params: serde_json::Value = serde_json::from_str(params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    let mut scene = match path {
        Some(p) => Scene::load(p)?,
        None => Scene::default(),
    };
    scene.apply_overrides(&params);
    scene.validate()?;
    Ok(scene)
}

fn write_output(path: Option<&Path>, json: &str) -> Result<(), CliError> {
    match path {
        Some(p) => {
            std::fs::write(p, json).map_err(|e| CliError::Io(format!("{}: {e}", p.display())))?;
            info!(path = %p.display(), bytes = json.len(), "wrote output");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn probe_json(scene: &Scene, x: f64, y: f64) -> Result<String, CliError> {
    if !x.is_finite() || !y.is_finite() {
        return Err(CliError::Input(format!("probe point ({x}, {y}) is not finite")));
    }
    let potential = compute_potential(&scene.charges, x, y)?;
    let field = compute_field(&scene.charges, x, y)?;
    let info = serde_json::json!({
        "x": x,
        "y": y,
        "potential": potential,
        "field": field,
    });
    Ok(serde_json::to_string_pretty(&info)?)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let scene = load_scene(cli.scene.as_deref(), &cli.params)?;

    match cli.command {
        Command::Contours { output } => {
            let contours = contour_scene(&scene)?;
            let polylines = contours.iter().flat_map(|c| &c.polylines);
            let total = polylines.clone().count();
            let closed = polylines.clone().filter(|p| p.is_closed(CLOSED_TOLERANCE)).count();
            let length: f64 = polylines.map(|p| p.length()).sum();
            info!(levels = contours.len(), polylines = total, closed, length, "contours extracted");
            write_output(output.as_deref(), &serde_json::to_string_pretty(&contours)?)?;
        }
        Command::Probe { x, y } => {
            println!("{}", probe_json(&scene, x, y)?);
        }
        Command::Vectors { output } => {
            let arrows = scene.arrows()?;
            info!(arrows = arrows.len(), "arrows sampled");
            write_output(output.as_deref(), &serde_json::to_string_pretty(&arrows)?)?;
        }
        Command::Scene => {
            println!("{}", serde_json::to_string_pretty(&scene)?);
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(e.exit_code());
    }
}
