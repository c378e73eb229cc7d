use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use snooker::core::{Container, Simulation, Snapshot};
use snooker::error::Result;
use snooker::output::{Recorder, ReportWriter};
use snooker::state;

/// Event-driven hard-disc gas in a circular container.
#[derive(Debug, Parser)]
#[command(name = "snooker", version, about)]
struct Args {
    /// Radius of the circular container.
    #[arg(long, default_value_t = 10.0)]
    container_radius: f64,

    /// Number of collision events to run.
    #[arg(long, default_value_t = 1000)]
    events: u64,

    /// Initial state file (headerless CSV rows: x, y, vx, vy, mass, radius).
    /// When omitted, a layout is generated from the --balls options.
    #[arg(long, conflicts_with = "balls")]
    state: Option<PathBuf>,

    /// Number of discs to generate.
    #[arg(long, default_value_t = 15)]
    balls: usize,

    /// Radius of generated discs.
    #[arg(long, default_value_t = 1.0)]
    ball_radius: f64,

    /// Mass of generated discs.
    #[arg(long, default_value_t = 1.0)]
    ball_mass: f64,

    /// Speed of every generated disc (the initial RMS speed).
    #[arg(long, default_value_t = 5.0)]
    rms_speed: f64,

    /// RNG seed for generation; omit for a fresh layout every run.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the generated layout to this file so the run can be replayed.
    #[arg(long)]
    save_state: Option<PathBuf>,

    /// Write the per-event observable time series to this CSV file.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write start/end per-disc reports to this CSV file.
    #[arg(long)]
    reports: Option<PathBuf>,
}

fn print_snapshot(label: &str, s: &Snapshot) {
    println!(
        "{label}: t = {:.4}, KE = {:.4}, rms speed = {:.4}, pressure = {:.6}, \
         ball collisions = {}, wall collisions = {}",
        s.time,
        s.kinetic_energy,
        s.rms_speed,
        s.pressure,
        s.ball_collisions,
        s.wall_collisions,
    );
}

fn run(args: &Args) -> Result<()> {
    let container = Container::new(args.container_radius)?;
    let particles = match &args.state {
        Some(path) => state::read_state(File::open(path)?)?,
        None => {
            let discs = state::generate(
                args.container_radius,
                args.balls,
                args.ball_radius,
                args.ball_mass,
                args.rms_speed,
                args.seed,
            )?;
            if let Some(path) = &args.save_state {
                state::write_state(File::create(path)?, &discs)?;
            }
            discs
        }
    };

    let mut sim = Simulation::new(container, particles)?;
    let mut recorder = Recorder::new();
    let mut report_writer = match &args.reports {
        Some(path) => Some(ReportWriter::new(File::create(path)?)?),
        None => None,
    };

    print_snapshot("start", &sim.snapshot());
    recorder.record(sim.snapshot());
    if let Some(w) = report_writer.as_mut() {
        w.write_checkpoint(sim.time(), &sim.particle_reports())?;
    }

    for _ in 0..args.events {
        sim.step()?;
        recorder.record(sim.snapshot());
    }

    print_snapshot("end", &sim.snapshot());
    if let Some(w) = report_writer.as_mut() {
        w.write_checkpoint(sim.time(), &sim.particle_reports())?;
        w.flush()?;
    }
    if let Some(path) = &args.output {
        recorder.save(File::create(path)?)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
