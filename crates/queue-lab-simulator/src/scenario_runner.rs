use crate::engine::Scheduler;
use crate::trace::SimulationReport;
use anyhow::{Context, anyhow};
use queue_lab_abstract::{SimConfig, TestAssertion, TestScenario};
use std::fs;
use std::path::Path;
use tracing::info;

pub fn load_scenario(path: &Path) -> anyhow::Result<TestScenario> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
    parse_scenario(&content)
}

pub fn parse_scenario(content: &str) -> anyhow::Result<TestScenario> {
    toml::from_str(content).context("Failed to parse scenario")
}

/// Run the scenario at `path` and check its assertions.
pub fn run_scenario(path: &Path) -> anyhow::Result<SimulationReport> {
    let scenario = load_scenario(path)?;
    execute(&scenario)
}

pub fn run_scenario_str(content: &str) -> anyhow::Result<SimulationReport> {
    let scenario = parse_scenario(content)?;
    execute(&scenario)
}

pub fn execute(scenario: &TestScenario) -> anyhow::Result<SimulationReport> {
    info!("Running Scenario: {}", scenario.name);
    if !scenario.description.is_empty() {
        info!("Description: {}", scenario.description);
    }

    let mut config = SimConfig::default();
    scenario.config.apply_to(&mut config);

    let mut sim = Scheduler::new(config)
        .with_context(|| format!("Scenario {} has an invalid configuration", scenario.name))?;
    let report = sim.run_until_complete();

    for assertion in &scenario.assertions {
        check(assertion, &report)?;
    }

    info!("Scenario {} passed", scenario.name);
    Ok(report)
}

fn check(assertion: &TestAssertion, report: &SimulationReport) -> anyhow::Result<()> {
    match assertion {
        TestAssertion::GeneratedPackets { count } => {
            if report.generated_packets != *count {
                return Err(anyhow!(
                    "Assertion Failed: generated {} packets, expected {}",
                    report.generated_packets,
                    count
                ));
            }
        }
        TestAssertion::SwitchDrops { switch, min, max } => {
            let dropped = *report
                .summary
                .drops_per_switch
                .get(*switch)
                .ok_or_else(|| anyhow!("Assertion refers to unknown switch {}", switch))?;
            if dropped < *min {
                return Err(anyhow!(
                    "Assertion Failed: switch {} dropped {} packets, expected min {}",
                    switch,
                    dropped,
                    min
                ));
            }
            if let Some(max) = max
                && dropped > *max
            {
                return Err(anyhow!(
                    "Assertion Failed: switch {} dropped {} packets, expected max {}",
                    switch,
                    dropped,
                    max
                ));
            }
        }
        TestAssertion::MaxOccupancy { switch, max } => {
            let peak = *report
                .peak_occupancy
                .get(*switch)
                .ok_or_else(|| anyhow!("Assertion refers to unknown switch {}", switch))?;
            if peak > *max {
                return Err(anyhow!(
                    "Assertion Failed: switch {} held {} packets, expected at most {}",
                    switch,
                    peak,
                    max
                ));
            }
        }
        TestAssertion::MeanLatencyBelow { ms } => {
            let mean = report.summary.mean_latency_ms;
            if mean >= *ms {
                return Err(anyhow!(
                    "Assertion Failed: mean latency {:.2} ms, expected below {} ms",
                    mean,
                    ms
                ));
            }
        }
        TestAssertion::Conservation => {
            if !report.conservation_holds() {
                return Err(anyhow!(
                    "Assertion Failed: generated {} != delivered {} + dropped {} + queued {}",
                    report.generated_packets,
                    report.delivered_packets,
                    report.dropped_packets,
                    report.in_flight_packets
                ));
            }
        }
    }
    Ok(())
}
