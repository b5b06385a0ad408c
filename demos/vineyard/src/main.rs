//! vineyard: harvest-logistics demo.
//!
//! A row of pickers fills boxes; while fresh they carry each box to the
//! collection point themselves, and once tired they leave boxes in a shared
//! queue for drones.  `run` simulates one configuration and writes CSV (and
//! optionally JSON Lines with position frames); `sweep` compares drone
//! counts against fatigue thresholds.
//!
//! ```bash
//! vineyard run --workers 5 --num-drones 2 --policy signal --out output/vineyard --json
//! vineyard sweep --drones 0,1,2,4 --thresholds 1,3,5 --sim-time 480
//! RUST_LOG=hl_actors=debug vineyard run --sim-time 60
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hl_actors::SimEvent;
use hl_core::{HarvestConfig, WakePolicy};
use hl_output::{CsvWriter, JsonLinesWriter, OutputWriter, SimOutputObserver};
use hl_sim::sweep::grid;
use hl_sim::{Frame, RunOutcome, SimBuilder, SimObserver, Snapshot, run_sweep};

// ── Command line ──────────────────────────────────────────────────────────────

/// Drone-assisted harvest logistics, simulated in virtual time.
#[derive(Parser)]
#[command(name = "vineyard")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one configuration and write its output.
    Run {
        #[command(flatten)]
        field: FieldArgs,

        /// Directory for snapshots.csv, deliveries.csv (and trace.jsonl).
        #[arg(short, long, default_value = "output/vineyard")]
        out: PathBuf,

        /// Also write trace.jsonl, including position frames.
        #[arg(long)]
        json: bool,

        /// Virtual time between position frames (JSON output only).
        #[arg(long, default_value_t = 1.0)]
        frame_interval: f64,
    },

    /// Run every (drone count, fatigue threshold) pair and tabulate.
    Sweep {
        #[command(flatten)]
        field: FieldArgs,

        /// Drone counts to try.
        #[arg(long, value_delimiter = ',', default_values_t = [0, 1, 2, 3])]
        drones: Vec<usize>,

        /// Fatigue thresholds to try.
        #[arg(long, value_delimiter = ',', default_values_t = [1, 3, 5])]
        thresholds: Vec<u32>,

        /// Print each summary as a JSON line instead of a table.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct FieldArgs {
    /// Number of field workers.
    #[arg(short, long, default_value_t = 5)]
    workers: usize,

    /// Number of drones (ignored by `sweep`, which uses --drones).
    #[arg(short = 'd', long = "num-drones", default_value_t = 2)]
    num_drones: usize,

    /// A worker carries its own box while its fatigue is below this.
    #[arg(short, long, default_value_t = 3)]
    fatigue_threshold: u32,

    /// Virtual time to simulate.
    #[arg(short, long, default_value_t = 60.0)]
    sim_time: f64,

    /// Drone wake policy: polling or signal.
    #[arg(short, long, default_value_t = WakePolicy::Polling)]
    policy: WakePolicy,

    /// Upper bound of the random extra harvest time per box.
    #[arg(long, default_value_t = 0.0)]
    jitter: f64,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Read the configuration from a JSON file instead of the flags above.
    /// Missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl FieldArgs {
    fn config(&self) -> Result<HarvestConfig> {
        if let Some(path) = &self.config {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            return serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(HarvestConfig {
            num_workers:       self.workers,
            num_drones:        self.num_drones,
            fatigue_threshold: self.fatigue_threshold,
            sim_time:          self.sim_time,
            wake_policy:       self.policy,
            harvest_jitter:    self.jitter,
            seed:              self.seed,
            ..HarvestConfig::default()
        })
    }
}

// ── Observer fan-out ──────────────────────────────────────────────────────────

/// Drives the CSV writer and, optionally, the JSON Lines writer while
/// counting what went out.
struct CountingObserver<A: OutputWriter, B: OutputWriter> {
    csv:        SimOutputObserver<A>,
    json:       Option<SimOutputObserver<B>>,
    deliveries: usize,
    frames:     usize,
}

impl<A: OutputWriter, B: OutputWriter> CountingObserver<A, B> {
    fn take_errors(&mut self) -> Vec<hl_output::OutputError> {
        let mut errors: Vec<_> = self.csv.take_error().into_iter().collect();
        if let Some(json) = self.json.as_mut() {
            errors.extend(json.take_error());
        }
        errors
    }
}

impl<A: OutputWriter, B: OutputWriter> SimObserver for CountingObserver<A, B> {
    fn on_event(&mut self, event: &SimEvent) {
        if matches!(event, SimEvent::BoxDelivered(_)) {
            self.deliveries += 1;
        }
        self.csv.on_event(event);
        if let Some(json) = self.json.as_mut() {
            json.on_event(event);
        }
    }

    fn on_step_end(&mut self, snapshot: &Snapshot) {
        self.csv.on_step_end(snapshot);
        if let Some(json) = self.json.as_mut() {
            json.on_step_end(snapshot);
        }
    }

    fn on_frame(&mut self, frame: &Frame) {
        if let Some(json) = self.json.as_mut() {
            self.frames += 1;
            json.on_frame(frame);
        }
    }

    fn on_run_end(&mut self, snapshot: &Snapshot, outcome: RunOutcome) {
        self.csv.on_run_end(snapshot, outcome);
        if let Some(json) = self.json.as_mut() {
            json.on_run_end(snapshot, outcome);
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run(field: &FieldArgs, out: &Path, json: bool, frame_interval: f64) -> Result<()> {
    let config = field.config()?;
    println!("=== vineyard: harvest logistics ===");
    println!(
        "Workers: {}  |  Drones: {}  |  Threshold: {}  |  Policy: {}  |  Until: {}",
        config.num_workers, config.num_drones, config.fatigue_threshold, config.wake_policy, config.sim_time
    );
    println!();

    let mut builder = SimBuilder::new(config);
    if json {
        builder = builder.frame_interval(frame_interval);
    }
    let mut sim = builder.build().context("invalid configuration")?;

    std::fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
    let json_obs = if json {
        Some(SimOutputObserver::new(JsonLinesWriter::create(&out.join("trace.jsonl"))?))
    } else {
        None
    };
    let mut obs = CountingObserver {
        csv:        SimOutputObserver::new(CsvWriter::new(out)?),
        json:       json_obs,
        deliveries: 0,
        frames:     0,
    };

    let t0 = Instant::now();
    let outcome = sim.run(&mut obs)?;
    let elapsed = t0.elapsed();
    for e in obs.take_errors() {
        eprintln!("output error: {e}");
    }
    info!(?outcome, elapsed_ms = elapsed.as_millis() as u64, "done");

    let summary = sim.summary();
    println!("Simulation complete in {:.3} s ({} events)", elapsed.as_secs_f64(), summary.events_processed);
    println!("  deliveries.csv : {} rows", obs.deliveries);
    if json {
        println!("  trace.jsonl    : {} frames", obs.frames);
    }
    println!();
    println!(
        "t = {}: {} boxes filled, {} delivered ({} by workers, {} by drones), {} queued",
        summary.snapshot.time,
        summary.boxes_created,
        summary.snapshot.delivered_count,
        summary.self_delivered,
        summary.drone_delivered,
        summary.snapshot.queue_length,
    );
    if let Some(lead) = summary.mean_lead_time {
        println!("mean lead time: {lead:.2}");
    }
    println!();

    println!("{:<8} {:<8} {:<8}", "Worker", "Fatigue", "Boxes");
    println!("{}", "-".repeat(24));
    for w in sim.field().workers() {
        println!("{:<8} {:<8} {:<8}", w.id().to_string(), w.fatigue(), w.boxes_filled());
    }
    println!();

    println!("{:<8} {:<20} {:<10}", "Drone", "Status", "Delivered");
    println!("{}", "-".repeat(38));
    for d in sim.field().drones() {
        println!("{:<8} {:<20} {:<10}", d.id().to_string(), d.status().as_str(), d.delivered());
    }

    Ok(())
}

fn sweep(field: &FieldArgs, drones: &[usize], thresholds: &[u32], json: bool) -> Result<()> {
    let configs = grid(&field.config()?, drones, thresholds);
    let t0 = Instant::now();
    let results = run_sweep(&configs);
    info!(runs = results.len(), elapsed_ms = t0.elapsed().as_millis() as u64, "sweep done");

    if !json {
        println!(
            "{:<7} {:<10} {:<10} {:<6} {:<7} {:<7} {:<10}",
            "Drones", "Threshold", "Delivered", "Self", "Drone", "Queued", "Lead time"
        );
        println!("{}", "-".repeat(62));
    }
    for (config, result) in configs.iter().zip(results) {
        let summary = result.with_context(|| {
            format!("drones = {}, threshold = {}", config.num_drones, config.fatigue_threshold)
        })?;
        if json {
            println!("{}", serde_json::to_string(&summary)?);
            continue;
        }
        println!(
            "{:<7} {:<10} {:<10} {:<6} {:<7} {:<7} {:<10}",
            summary.num_drones,
            summary.fatigue_threshold,
            summary.snapshot.delivered_count,
            summary.self_delivered,
            summary.drone_delivered,
            summary.snapshot.queue_length,
            summary.mean_lead_time.map_or_else(|| "-".to_owned(), |t| format!("{t:.2}")),
        );
    }
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run { field, out, json, frame_interval } => run(&field, &out, json, frame_interval),
        Commands::Sweep { field, drones, thresholds, json } => sweep(&field, &drones, &thresholds, json),
    }
}
