use crate::switch::QueueingSwitch;
use serde::Serialize;

/// Switch state after all mutations of one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub time: u64,
    pub queue_lengths: Vec<usize>,
    /// Cumulative drop counters.
    pub drops: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSummary {
    pub drops_per_switch: Vec<u64>,
    pub total_dropped: u64,
    pub delivered: u64,
    /// Zero when no packet reached the terminal hop.
    pub mean_latency_ms: f64,
    pub p50_latency_ms: u64,
    pub p99_latency_ms: u64,
    pub max_latency_ms: u64,
}

#[derive(Debug, Default, Clone)]
pub struct MetricsCollector {
    samples: Vec<Sample>,
    latencies: Vec<u64>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a snapshot of `switches`. Refused (returns false) unless `time`
    /// is strictly later than the previous sample.
    pub fn sample(&mut self, time: u64, switches: &[QueueingSwitch]) -> bool {
        if self.samples.last().is_some_and(|last| last.time >= time) {
            return false;
        }
        self.samples.push(Sample {
            time,
            queue_lengths: switches.iter().map(QueueingSwitch::occupancy).collect(),
            drops: switches.iter().map(QueueingSwitch::dropped_count).collect(),
        });
        true
    }

    pub fn record_latency(&mut self, latency_ms: u64) {
        self.latencies.push(latency_ms);
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn latencies(&self) -> &[u64] {
        &self.latencies
    }

    /// `(time, queue length)` points for one switch.
    pub fn queue_length_series(&self, switch: usize) -> Vec<(u64, usize)> {
        queue_length_series(&self.samples, switch)
    }

    /// `(time, cumulative drops)` points for one switch.
    pub fn drop_series(&self, switch: usize) -> Vec<(u64, u64)> {
        drop_series(&self.samples, switch)
    }

    pub fn summary(&self) -> MetricsSummary {
        let drops_per_switch = self
            .samples
            .last()
            .map(|s| s.drops.clone())
            .unwrap_or_default();

        let mut sorted = self.latencies.clone();
        sorted.sort_unstable();
        let mean_latency_ms = if sorted.is_empty() {
            0.0
        } else {
            sorted.iter().sum::<u64>() as f64 / sorted.len() as f64
        };

        MetricsSummary {
            total_dropped: drops_per_switch.iter().sum(),
            drops_per_switch,
            delivered: sorted.len() as u64,
            mean_latency_ms,
            p50_latency_ms: percentile(&sorted, 50),
            p99_latency_ms: percentile(&sorted, 99),
            max_latency_ms: sorted.last().copied().unwrap_or(0),
        }
    }
}

pub(crate) fn queue_length_series(samples: &[Sample], switch: usize) -> Vec<(u64, usize)> {
    samples
        .iter()
        .filter_map(|s| s.queue_lengths.get(switch).map(|&len| (s.time, len)))
        .collect()
}

pub(crate) fn drop_series(samples: &[Sample], switch: usize) -> Vec<(u64, u64)> {
    samples
        .iter()
        .filter_map(|s| s.drops.get(switch).map(|&d| (s.time, d)))
        .collect()
}

// Nearest-rank percentile over an already sorted slice.
fn percentile(sorted: &[u64], pct: usize) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let rank = (pct * sorted.len()).div_ceil(100).max(1);
    sorted[rank - 1]
}
