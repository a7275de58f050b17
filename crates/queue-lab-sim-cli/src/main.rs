use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use queue_lab_abstract::{ClockMode, ForwardPolicy, RoutingPolicy, SimConfig};
use queue_lab_simulator::{Scheduler, SimulationReport, scenario_runner};

#[derive(Parser, Debug)]
#[command(author, version, about = "Queueing switch network simulator")]
struct Args {
    /// Load the simulation configuration from a TOML file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run a scenario file and check its assertions (mutually exclusive with --config).
    #[arg(long)]
    scenario: Option<PathBuf>,

    #[arg(long)]
    sources: Option<u32>,

    #[arg(long)]
    duration_ms: Option<u64>,

    #[arg(long)]
    seed: Option<u64>,

    /// How sources pick an ingress switch.
    #[arg(long, value_enum)]
    routing: Option<Routing>,

    /// What a switch does when the next hop is full.
    #[arg(long, value_enum)]
    forward_policy: Option<Forwarding>,

    /// Pace events by real elapsed time instead of virtual time.
    #[arg(long, default_value_t = false)]
    wall_clock: bool,

    /// Keep servicing after the run until every queue is empty.
    #[arg(long, default_value_t = false)]
    drain: bool,

    /// Write a JSON trace of the finished simulation.
    #[arg(long)]
    trace_out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Routing {
    Random,
    #[value(aliases = ["overflow", "random_overflow"])]
    RandomOverflow,
    #[value(alias = "capacity_aware")]
    CapacityAware,
}

impl From<Routing> for RoutingPolicy {
    fn from(routing: Routing) -> Self {
        match routing {
            Routing::Random => RoutingPolicy::Random,
            Routing::RandomOverflow => RoutingPolicy::RandomOverflow,
            Routing::CapacityAware => RoutingPolicy::CapacityAware,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Forwarding {
    Drop,
    Requeue,
}

impl From<Forwarding> for ForwardPolicy {
    fn from(forwarding: Forwarding) -> Self {
        match forwarding {
            Forwarding::Drop => ForwardPolicy::Drop,
            Forwarding::Requeue => ForwardPolicy::Requeue,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt::init();
    info!("queue-lab-sim starting…");

    if args.scenario.is_some() && args.config.is_some() {
        anyhow::bail!("--scenario and --config cannot be used together");
    }

    let report = if let Some(path) = &args.scenario {
        scenario_runner::run_scenario(path)?
    } else {
        let config = args.build_config()?;
        let mut sim = Scheduler::new(config).context("Cannot start simulation")?;
        sim.run_until_complete()
    };

    print_report(&report);

    if let Some(trace_path) = &args.trace_out {
        write_trace(trace_path, &report)?;
    }

    Ok(())
}

impl Args {
    fn build_config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => SimConfig::default(),
        };

        if let Some(v) = self.sources {
            config.sources = v;
        }
        if let Some(v) = self.duration_ms {
            config.duration_ms = v;
        }
        if let Some(v) = self.seed {
            config.seed = v;
        }
        if let Some(routing) = self.routing {
            config.routing = routing.into();
        }
        if let Some(forwarding) = self.forward_policy {
            config.forward_policy = forwarding.into();
        }
        if self.wall_clock {
            config.clock = ClockMode::WallClock;
        }
        if self.drain {
            config.drain = true;
        }
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<SimConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: SimConfig = toml::from_str(&content).context("Failed to parse config file")?;
    Ok(config)
}

fn print_report(report: &SimulationReport) {
    println!(
        "Average Latency: {:.4} ms ({} delivered)",
        report.summary.mean_latency_ms, report.summary.delivered
    );
    for (switch, dropped) in report.summary.drops_per_switch.iter().enumerate() {
        println!(
            "Total Packets Dropped at SW{}: {} (peak queue {})",
            switch,
            dropped,
            report.peak_occupancy.get(switch).copied().unwrap_or(0)
        );
    }
    println!(
        "Generated {} packets, {} still queued at {} ms",
        report.generated_packets, report.in_flight_packets, report.duration_ms
    );
}

fn write_trace(path: &Path, report: &SimulationReport) -> Result<()> {
    let data = serde_json::to_vec_pretty(report).context("Failed to serialize simulation trace")?;
    fs::write(path, &data)
        .with_context(|| format!("Failed to write trace file {}", path.display()))?;
    Ok(())
}
