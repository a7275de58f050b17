use crate::metrics::{self, MetricsSummary, Sample};
use queue_lab_abstract::SimConfig;
use serde::Serialize;

/// A compact textual summary of one packet event, for timelines and visualisers.
#[derive(Debug, Clone, Serialize)]
pub struct PacketEventSummary {
    pub time: u64,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The configured duration elapsed (and queues drained, if requested).
    Duration,
    EventLimit,
    Cancelled,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub config: SimConfig,
    pub duration_ms: u64,
    pub stop_reason: StopReason,
    pub generated_packets: u64,
    pub delivered_packets: u64,
    pub dropped_packets: u64,
    /// Still queued when the run ended.
    pub in_flight_packets: u64,
    pub generation_events: u64,
    pub service_events: u64,
    pub peak_occupancy: Vec<usize>,
    pub samples: Vec<Sample>,
    pub latencies: Vec<u64>,
    pub summary: MetricsSummary,
    pub packet_events: Vec<PacketEventSummary>,
}

impl SimulationReport {
    /// Every generated packet is accounted for exactly once.
    pub fn conservation_holds(&self) -> bool {
        self.generated_packets
            == self.delivered_packets + self.dropped_packets + self.in_flight_packets
    }

    /// `(time, queue length)` points for one switch.
    pub fn queue_length_series(&self, switch: usize) -> Vec<(u64, usize)> {
        metrics::queue_length_series(&self.samples, switch)
    }

    /// `(time, cumulative drops)` points for one switch.
    pub fn drop_series(&self, switch: usize) -> Vec<(u64, u64)> {
        metrics::drop_series(&self.samples, switch)
    }
}
