pub mod clock;
pub mod engine;
pub mod metrics;
pub mod observer;
pub mod routing;
pub mod scenario_runner;
pub mod source;
pub mod switch;
pub mod trace;

pub use clock::{Clock, VirtualClock, WallClock};
pub use engine::{EventKind, Scheduler};
pub use metrics::{MetricsCollector, MetricsSummary, Sample};
pub use observer::{PacketEvent, SimulationObserver, StopHandle};
pub use routing::{RouteOutcome, Router};
pub use source::TrafficSource;
pub use switch::{Admission, QueueingSwitch};
pub use trace::{PacketEventSummary, SimulationReport, StopReason};

use queue_lab_abstract::{ConfigError, SimConfig};

/// Validate `config`, run it to completion and hand back the finalised report.
pub fn run(config: SimConfig) -> Result<SimulationReport, ConfigError> {
    let mut scheduler = Scheduler::new(config)?;
    Ok(scheduler.run_until_complete())
}
