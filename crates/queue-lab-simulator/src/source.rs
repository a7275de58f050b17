use queue_lab_abstract::{Packet, PacketId, RoutingPolicy, SimConfig};
use rand::Rng;
use std::ops::RangeInclusive;

/// A traffic-generating node. Each call to [`TrafficSource::generate`] manufactures one packet.
#[derive(Debug, Clone)]
pub struct TrafficSource {
    id: u32,
    ingress: Vec<usize>,
    pick_target: bool,
    size_range: RangeInclusive<u32>,
    delay_range: RangeInclusive<u64>,
    next_seq: u64,
}

impl TrafficSource {
    pub fn new(id: u32, config: &SimConfig) -> Self {
        Self {
            id,
            ingress: config.ingress_switches(),
            pick_target: config.routing != RoutingPolicy::CapacityAware,
            size_range: config.min_packet_size..=config.max_packet_size,
            delay_range: config.min_generation_delay_ms..=config.max_generation_delay_ms,
            next_seq: 0,
        }
    }

    /// Build a packet stamped with `now`. The first-choice switch is drawn
    /// uniformly from the reachable ones unless the router picks it.
    pub fn generate<R: Rng>(&mut self, now: u64, rng: &mut R) -> Packet {
        let id = PacketId {
            source: self.id,
            seq: self.next_seq,
        };
        self.next_seq += 1;

        let size = rng.random_range(self.size_range.clone());
        let target = if self.pick_target && !self.ingress.is_empty() {
            Some(self.ingress[rng.random_range(0..self.ingress.len())])
        } else {
            None
        };
        Packet::new(id, size, now, target)
    }

    /// Delay until this source's next generation event.
    pub fn next_delay<R: Rng>(&self, rng: &mut R) -> u64 {
        rng.random_range(self.delay_range.clone())
    }

    pub fn generated(&self) -> u64 {
        self.next_seq
    }
}
