//! four_way — a signalised four-way intersection under random traffic.
//!
//! Spawns a fleet on random lanes with random destinations, runs the first
//! half of the simulation under one signal policy and the second half under
//! the other, and prints the throughput and waits of each half.
//!
//! ```text
//! cargo run -p four_way --release -- [config.json] [output_dir]
//! RUST_LOG=ls_vehicle=debug cargo run -p four_way
//! ```
//!
//! `config.json` is a (partial) `TrafficConfig`; missing fields take their
//! defaults.

mod network;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ls_core::{SimRng, Tick, VehicleId};
use ls_network::{AStarRouter, analyze};
use ls_output::{CsvWriter, OutputWriter, SimOutputObserver};
use ls_signal::{PhaseChange, SignalPolicy};
use ls_sim::{
    Incident, RandomDispatcher, SimBuilder, SimObserver, StatsSnapshot, TickSummary, TrafficConfig,
};

use network::build_network;

// ── Constants ─────────────────────────────────────────────────────────────────

const VEHICLE_COUNT:      usize = 48;
const TOTAL_TICKS:        u64   = 12_000; // 10 simulated minutes at 50 ms
const PROGRESS_EVERY:     u64   = 1_200;  // once per simulated minute
const DEFAULT_OUTPUT_DIR: &str  = "output/four_way";
const DEFAULT_FILTER:     &str  = "four_way=info,ls_sim=info,ls_signal=warn,ls_vehicle=warn,ls_network=warn";
/// Separates the dispatcher's stream from the sim's own child streams.
const DISPATCH_SEED_SALT: u64   = 0xD15;

// ── Observer wrapper to count rows and report progress ────────────────────────

struct ProgressObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    snapshot_rows: usize,
    summary_rows:  usize,
    phase_changes: usize,
    incidents:     usize,
}

impl<W: OutputWriter> ProgressObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, summary_rows: 0, phase_changes: 0, incidents: 0 }
    }
}

impl<W: OutputWriter> SimObserver for ProgressObserver<W> {
    fn on_completion(&mut self, tick: Tick, vehicle: VehicleId, wait_secs: f32) {
        self.inner.on_completion(tick, vehicle, wait_secs);
    }

    fn on_phase_change(&mut self, tick: Tick, change: &PhaseChange) {
        self.phase_changes += 1;
        self.inner.on_phase_change(tick, change);
    }

    fn on_incident(&mut self, tick: Tick, incident: &Incident) {
        self.incidents += 1;
        self.inner.on_incident(tick, incident);
    }

    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        self.summary_rows += 1;
        if (tick.0 + 1).is_multiple_of(PROGRESS_EVERY) {
            info!(
                tick = tick.0 + 1,
                completions = summary.stats.completions,
                throughput_per_min = summary.stats.throughput_per_min,
                stopped = summary.stopped,
                "progress"
            );
        }
        self.inner.on_tick_end(tick, summary);
    }

    fn on_snapshot(
        &mut self,
        tick:     Tick,
        vehicles: &ls_vehicle::VehicleStore,
        network:  &ls_network::LaneNetwork,
    ) {
        self.snapshot_rows += vehicles.len();
        self.inner.on_snapshot(tick, vehicles, network);
    }

    fn on_sim_end(&mut self, final_tick: Tick, stats: &StatsSnapshot) {
        self.inner.on_sim_end(final_tick, stats);
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<TrafficConfig> {
    let Some(path) = path else {
        let mut config = TrafficConfig { vehicle_count: VEHICLE_COUNT, ..TrafficConfig::default() };
        config.sim.total_ticks = TOTAL_TICKS;
        return Ok(config);
    };
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

fn other(policy: SignalPolicy) -> SignalPolicy {
    match policy {
        SignalPolicy::Adaptive => SignalPolicy::FixedCycle,
        SignalPolicy::FixedCycle => SignalPolicy::Adaptive,
    }
}

fn print_stats(label: &str, s: &StatsSnapshot) {
    println!(
        "{label:<12} {:>11} {:>12.2} {:>13.2} {:>12.1} {:>14.1}",
        s.completions, s.throughput_per_min, s.average_wait_secs, s.max_wait_secs, s.wasted_green_secs,
    );
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let output_dir = args.next().map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR), PathBuf::from);

    println!("=== four_way — lanesim signalised intersection ===");

    // 1. Config.
    let config = load_config(config_path.as_deref())?;
    let first_policy = config.policy;
    println!(
        "Vehicles: {}  |  Ticks: {} ({:.0} s)  |  Seed: {}  |  Policy: {}",
        config.vehicle_count,
        config.sim.total_ticks,
        config.sim.duration_secs(),
        config.sim.seed,
        first_policy.as_str(),
    );

    // 2. Lane network.
    let (network, approaches) = build_network()?;
    analyze(&network).log(&network);
    println!("Lane network: {} lanes", network.lane_count());

    // 3. One controller with a group per arm.  Groups hold only the turn
    //    lanes: a group's lanes are the ones its Red closes, so adding the
    //    `*_in` lanes would stop traffic short of the stop line.  The queue on
    //    `*_in` is therefore not scored; the adaptive controller reacts to
    //    vehicles already in the box and otherwise rotates on idle.
    let mut signals = config.signal_builder();
    let centre = signals.add_controller("centre");
    for a in &approaches {
        signals.add_group(centre, a.name, a.turns.iter().copied(), 3)?;
    }

    // 4. Build sim.
    let dispatcher = RandomDispatcher::new(SimRng::new(config.sim.seed ^ DISPATCH_SEED_SALT));
    let mut sim = SimBuilder::new(config, network, AStarRouter, dispatcher)
        .signals(signals)
        .random_fleet()
        .build()?;

    // 5. Output.
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;
    let writer = CsvWriter::new(&output_dir)?;
    let mut obs = ProgressObserver::new(SimOutputObserver::new(writer, &sim.config));

    // 6. Run: first half under the configured policy, the rest under the
    //    other one.
    let half = sim.config.total_ticks / 2;
    let t0 = Instant::now();
    sim.run_ticks(half, &mut obs)?;
    let first = sim.stats_snapshot();
    let second_policy = other(first_policy);
    sim.set_policy(second_policy);
    sim.run(&mut obs)?;
    let second = sim.stats_snapshot();
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 7. Summary.
    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  vehicle_snapshots.csv : {} rows", obs.snapshot_rows);
    println!("  tick_summaries.csv    : {} rows", obs.summary_rows);
    println!("  phase changes         : {}", obs.phase_changes);
    println!("  incidents             : {}", obs.incidents);
    println!();
    println!(
        "{:<12} {:>11} {:>12} {:>13} {:>12} {:>14}",
        "Policy", "Completions", "Cars/min", "Avg wait (s)", "Max wait (s)", "Wasted green"
    );
    println!("{}", "-".repeat(80));
    print_stats(first_policy.as_str(), &first);
    print_stats(second_policy.as_str(), &second);

    Ok(())
}
