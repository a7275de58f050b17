use crate::config::{
    ClockMode, DropAttribution, ForwardPolicy, RoutingPolicy, SimConfig, SwitchConfig,
};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub config: SimConfigOverride,
    #[serde(default)]
    pub assertions: Vec<TestAssertion>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct SimConfigOverride {
    pub sources: Option<u32>,
    pub switches: Option<Vec<SwitchConfig>>,
    pub ingress: Option<Vec<usize>>,
    pub min_packet_size: Option<u32>,
    pub max_packet_size: Option<u32>,
    pub min_generation_delay_ms: Option<u64>,
    pub max_generation_delay_ms: Option<u64>,
    pub duration_ms: Option<u64>,
    pub service_interval_ms: Option<u64>,
    pub service_enabled: Option<bool>,
    pub sample_interval_ms: Option<u64>,
    pub routing: Option<RoutingPolicy>,
    pub drop_attribution: Option<DropAttribution>,
    pub forward_policy: Option<ForwardPolicy>,
    pub clock: Option<ClockMode>,
    pub drain: Option<bool>,
    pub max_events: Option<u64>,
    pub seed: Option<u64>,
}

impl SimConfigOverride {
    pub fn apply_to(&self, config: &mut SimConfig) {
        if let Some(v) = self.sources {
            config.sources = v;
        }
        if let Some(v) = &self.switches {
            config.switches = v.clone();
        }
        if let Some(v) = &self.ingress {
            config.ingress = v.clone();
        }
        if let Some(v) = self.min_packet_size {
            config.min_packet_size = v;
        }
        if let Some(v) = self.max_packet_size {
            config.max_packet_size = v;
        }
        if let Some(v) = self.min_generation_delay_ms {
            config.min_generation_delay_ms = v;
        }
        if let Some(v) = self.max_generation_delay_ms {
            config.max_generation_delay_ms = v;
        }
        if let Some(v) = self.duration_ms {
            config.duration_ms = v;
        }
        if let Some(v) = self.service_interval_ms {
            config.service_interval_ms = v;
        }
        if let Some(v) = self.service_enabled {
            config.service_enabled = v;
        }
        if let Some(v) = self.sample_interval_ms {
            config.sample_interval_ms = v;
        }
        if let Some(v) = self.routing {
            config.routing = v;
        }
        if let Some(v) = self.drop_attribution {
            config.drop_attribution = v;
        }
        if let Some(v) = self.forward_policy {
            config.forward_policy = v;
        }
        if let Some(v) = self.clock {
            config.clock = v;
        }
        if let Some(v) = self.drain {
            config.drain = v;
        }
        if self.max_events.is_some() {
            config.max_events = self.max_events;
        }
        if let Some(v) = self.seed {
            config.seed = v;
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TestAssertion {
    /// Assert the exact number of packets the sources generated
    GeneratedPackets { count: u64 },
    /// Assert the final drop counter of a switch is within range
    SwitchDrops {
        switch: usize,
        min: u64,
        max: Option<u64>,
    },
    /// Assert a switch queue never held more than `max` packets
    MaxOccupancy { switch: usize, max: usize },
    /// Assert mean end-to-end latency stays below a bound
    MeanLatencyBelow { ms: f64 },
    /// Assert generated = delivered + dropped + still queued
    Conservation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_only_touches_set_fields() {
        let scenario: TestScenario = toml::from_str(
            r#"
            name = "fill"
            description = "one switch, no service"

            [config]
            sources = 4
            switches = [{ capacity = 50 }]
            service_enabled = false
            routing = "random_overflow"

            [[assertions]]
            type = "switch_drops"
            switch = 0
            min = 30
            max = 30

            [[assertions]]
            type = "conservation"
            "#,
        )
        .unwrap();

        let mut config = SimConfig::default();
        scenario.config.apply_to(&mut config);

        assert_eq!(config.switches, vec![SwitchConfig::with_capacity(50)]);
        assert!(!config.service_enabled);
        assert_eq!(config.routing, RoutingPolicy::RandomOverflow);
        assert_eq!(config.min_packet_size, 100);
        assert_eq!(scenario.assertions.len(), 2);
        assert!(matches!(
            scenario.assertions[0],
            TestAssertion::SwitchDrops {
                switch: 0,
                min: 30,
                max: Some(30)
            }
        ));
    }
}
