use crate::switch::{Admission, QueueingSwitch};
use queue_lab_abstract::{DropAttribution, Packet, RoutingPolicy, SimConfig};
use rand::Rng;

/// Where a freshly generated packet ended up.
#[derive(Debug)]
pub enum RouteOutcome {
    Admitted { switch: usize },
    /// Every candidate was full; `switch` was charged with the drop.
    Dropped { switch: usize, packet: Packet },
}

/// Picks the ingress switch for source traffic.
#[derive(Debug, Clone)]
pub struct Router {
    policy: RoutingPolicy,
    attribution: DropAttribution,
    ingress: Vec<usize>,
}

impl Router {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            policy: config.routing,
            attribution: config.drop_attribution,
            ingress: config.ingress_switches(),
        }
    }

    /// Switches to try, in order, for a packet.
    fn candidates(&self, packet: &Packet) -> Vec<usize> {
        let first = packet.target().unwrap_or(self.ingress[0]);
        match self.policy {
            RoutingPolicy::Random => vec![first],
            RoutingPolicy::RandomOverflow => std::iter::once(first)
                .chain(self.ingress.iter().copied().filter(|&s| s != first))
                .collect(),
            RoutingPolicy::CapacityAware => self.ingress.clone(),
        }
    }

    /// Admit `packet` to the first candidate with room. When all are full, the
    /// attributed switch's `admit` rejects it so exactly one drop is counted.
    pub fn route<R: Rng>(
        &self,
        packet: Packet,
        switches: &mut [QueueingSwitch],
        rng: &mut R,
    ) -> RouteOutcome {
        let candidates = self.candidates(&packet);

        let chosen = candidates
            .iter()
            .copied()
            .find(|&s| switches[s].has_space())
            .unwrap_or_else(|| match self.attribution {
                DropAttribution::FirstChoice => candidates[0],
                DropAttribution::LastChoice => candidates[candidates.len() - 1],
                DropAttribution::Random => candidates[rng.random_range(0..candidates.len())],
            });

        match switches[chosen].admit(packet) {
            Admission::Accepted => RouteOutcome::Admitted { switch: chosen },
            Admission::Dropped(packet) => RouteOutcome::Dropped {
                switch: chosen,
                packet,
            },
        }
    }
}
