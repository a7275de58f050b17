use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// How a source's packet picks its ingress switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingPolicy {
    /// Uniformly random ingress; dropped there if it is full.
    #[default]
    Random,
    /// Uniformly random ingress, falling back to the other ingress switches before dropping.
    RandomOverflow,
    /// First ingress switch (in configured order) with free space.
    CapacityAware,
}

/// Which switch is charged when every candidate ingress switch is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropAttribution {
    #[default]
    FirstChoice,
    LastChoice,
    Random,
}

/// What a switch does with a packet its downstream neighbour refuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForwardPolicy {
    /// Drop it, charging the downstream switch.
    #[default]
    Drop,
    /// Put it back at the tail of the forwarding switch.
    Requeue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockMode {
    #[default]
    Virtual,
    /// Events are paced by real elapsed time.
    WallClock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchConfig {
    pub capacity: usize,
    /// Overrides the global service cadence for this switch.
    pub service_interval_ms: Option<u64>,
}

impl SwitchConfig {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            service_interval_ms: None,
        }
    }

    pub fn service_every(mut self, interval_ms: u64) -> Self {
        self.service_interval_ms = Some(interval_ms);
        self
    }
}

/// Times are in milliseconds of simulated time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub sources: u32,
    /// Switches form a chain in this order; the last one is the terminal hop.
    pub switches: Vec<SwitchConfig>,
    /// Switches the sources can reach, in preference order.
    /// Empty means every switch.
    pub ingress: Vec<usize>,
    pub min_packet_size: u32,
    pub max_packet_size: u32,
    pub min_generation_delay_ms: u64,
    pub max_generation_delay_ms: u64,
    pub duration_ms: u64,
    pub service_interval_ms: u64,
    /// When false switches are never serviced and queues only fill.
    pub service_enabled: bool,
    pub sample_interval_ms: u64,
    pub routing: RoutingPolicy,
    pub drop_attribution: DropAttribution,
    pub forward_policy: ForwardPolicy,
    pub clock: ClockMode,
    /// Keep servicing after the duration until every queue is empty.
    pub drain: bool,
    pub max_events: Option<u64>,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            sources: 4,
            switches: vec![SwitchConfig::with_capacity(50), SwitchConfig::with_capacity(50)],
            ingress: Vec::new(),
            min_packet_size: 100,
            max_packet_size: 1200,
            min_generation_delay_ms: 20,
            max_generation_delay_ms: 100,
            duration_ms: 10_000,
            service_interval_ms: 60,
            service_enabled: true,
            sample_interval_ms: 50,
            routing: RoutingPolicy::Random,
            drop_attribution: DropAttribution::FirstChoice,
            forward_policy: ForwardPolicy::Drop,
            clock: ClockMode::Virtual,
            drain: false,
            max_events: None,
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Ingress switches in preference order, with the empty list expanded to every switch.
    pub fn ingress_switches(&self) -> Vec<usize> {
        if self.ingress.is_empty() {
            (0..self.switches.len()).collect()
        } else {
            self.ingress.clone()
        }
    }

    /// Service cadence of one switch: its own override or the global interval.
    pub fn service_interval_of(&self, switch: usize) -> u64 {
        self.switches
            .get(switch)
            .and_then(|s| s.service_interval_ms)
            .unwrap_or(self.service_interval_ms)
    }

    pub fn terminal_switch(&self) -> Option<usize> {
        self.switches.len().checked_sub(1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sources == 0 {
            return Err(ConfigError::NoSources);
        }
        if self.switches.is_empty() {
            return Err(ConfigError::NoSwitches);
        }
        if let Some(switch) = self.switches.iter().position(|s| s.capacity == 0) {
            return Err(ConfigError::ZeroCapacity { switch });
        }
        if self.min_packet_size == 0 {
            return Err(ConfigError::ZeroPacketSize);
        }
        if self.min_packet_size > self.max_packet_size {
            return Err(ConfigError::EmptySizeRange {
                min: self.min_packet_size,
                max: self.max_packet_size,
            });
        }
        if self.min_generation_delay_ms == 0
            || self.min_generation_delay_ms > self.max_generation_delay_ms
        {
            return Err(ConfigError::EmptyDelayRange {
                min: self.min_generation_delay_ms,
                max: self.max_generation_delay_ms,
            });
        }
        if self.duration_ms == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if self.service_enabled
            && (0..self.switches.len()).any(|s| self.service_interval_of(s) == 0)
        {
            return Err(ConfigError::ZeroServiceInterval);
        }
        if self.sample_interval_ms == 0 {
            return Err(ConfigError::ZeroSampleInterval);
        }
        let switches = self.switches.len();
        if let Some(&switch) = self.ingress.iter().find(|&&s| s >= switches) {
            return Err(ConfigError::UnknownIngress { switch, switches });
        }
        Ok(())
    }
}
