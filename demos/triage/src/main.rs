//! triage — command-line driver for the ER triage simulator.
//!
//! Runs one simulated day with the default parameters (or a JSON config
//! file, or flag overrides) and prints the three outcome counters.  With
//! `--sweep N` it answers the question the simulator exists for: how do the
//! outcomes change as the number of treatment rooms goes from 1 to N?
//!
//! ```text
//! triage                                  # defaults: 3 rooms, 120 patients
//! triage --rooms 2 --output ./out         # CSV event trace + summary
//! triage --config demos/triage/config.json --trace
//! triage --sweep 6
//! RUST_LOG=er_sim=debug triage --patients 10
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use er_core::{Patient, TriageConfig};
use er_output::{CsvWriter, TraceObserver};
use er_queue::Event;
use er_sim::{NoopObserver, Outcome, SimBuilder, SimObserver};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Discrete-event simulation of an emergency-room triage day")]
struct Cli {
    /// JSON file with any subset of the run parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of treatment rooms
    #[arg(long)]
    rooms: Option<u32>,

    /// Override the number of patients to generate
    #[arg(long)]
    patients: Option<u32>,

    /// Directory for events.csv and summary.csv
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print every processed event to stdout (also with --output)
    #[arg(long)]
    trace: bool,

    /// Run once per room count from 1 to MAX_ROOMS and print a table
    #[arg(long, value_name = "MAX_ROOMS")]
    sweep: Option<u32>,
}

// ── Console trace ─────────────────────────────────────────────────────────────

struct PrintObserver {
    enabled: bool,
}

impl SimObserver for PrintObserver {
    fn on_event(&mut self, event: &Event, patient: Option<&Patient>) {
        if !self.enabled {
            return;
        }
        match patient {
            Some(p) => println!("{event} → {}", p.color()),
            None    => println!("{event}"),
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None       => TriageConfig::default(),
    };
    if let Some(rooms) = cli.rooms {
        config.total_rooms = rooms;
    }
    if let Some(patients) = cli.patients {
        config.total_patients = patients;
    }

    if let Some(max_rooms) = cli.sweep {
        return sweep(&config, max_rooms);
    }

    let mut sim = SimBuilder::from_config(config).build()?;
    let printer = PrintObserver { enabled: cli.trace };

    let outcome = match &cli.output {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating output directory {}", dir.display()))?;
            let mut obs = (printer, TraceObserver::new(CsvWriter::new(dir)?));
            let outcome = sim.run(&mut obs)?;
            let (_, csv) = &mut obs;
            if let Some(e) = csv.take_error() {
                return Err(e).context("writing simulation output");
            }
            tracing::info!(rows = csv.events_written(), dir = %dir.display(), "event trace written");
            outcome
        }
        None => {
            let mut printer = printer;
            sim.run(&mut printer)?
        }
    };

    print_outcome(sim.total_rooms(), &outcome);
    Ok(())
}

fn load_config(path: &Path) -> Result<TriageConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: TriageConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

fn sweep(base: &TriageConfig, max_rooms: u32) -> Result<()> {
    println!("{:>5}  {:>8}  {:>9}  {:>5}", "rooms", "treated", "abandoned", "dead");
    for rooms in 1..=max_rooms {
        let mut sim = SimBuilder::from_config(base.clone()).rooms(rooms).build()?;
        let o = sim.run(&mut NoopObserver)?;
        println!("{rooms:>5}  {:>8}  {:>9}  {:>5}", o.treated, o.abandoned, o.dead);
    }
    Ok(())
}

fn print_outcome(rooms: u32, o: &Outcome) {
    println!();
    println!("=== ER triage — {rooms} room(s), {} patient(s) ===", o.generated);
    println!("Treated   : {}", o.treated);
    println!("Abandoned : {}", o.abandoned);
    println!("Dead      : {}", o.dead);
    if o.unresolved() > 0 {
        println!("Unresolved: {}", o.unresolved());
    }
}
