use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a packet within one run: the generating source plus its sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PacketId {
    pub source: u32,
    pub seq: u64,
}

impl fmt::Display for PacketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node{}_Packet{}", self.source, self.seq)
    }
}

/// Why a packet left the network without being delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DropReason {
    /// Tail drop: the switch queue was full when the packet arrived.
    QueueFull { switch: usize },
    /// The upstream switch could not hand the packet to its full neighbour.
    DownstreamFull { from: usize, to: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PacketStatus {
    #[default]
    InFlight,
    Delivered,
    Dropped(DropReason),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Packet {
    id: PacketId,
    /// Size in bytes
    size: u32,
    /// Simulated creation time (ms)
    created_at: u64,
    /// First-choice ingress switch picked by the source, if any.
    target: Option<usize>,
    status: PacketStatus,
}

impl Packet {
    pub fn new(id: PacketId, size: u32, created_at: u64, target: Option<usize>) -> Self {
        Self {
            id,
            size,
            created_at,
            target,
            status: PacketStatus::InFlight,
        }
    }

    pub fn id(&self) -> PacketId {
        self.id
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    pub fn target(&self) -> Option<usize> {
        self.target
    }

    pub fn status(&self) -> PacketStatus {
        self.status
    }

    pub fn is_in_flight(&self) -> bool {
        self.status == PacketStatus::InFlight
    }

    /// Tag the packet as delivered. Terminal: a packet that already left the
    /// network keeps its first status.
    pub fn mark_delivered(&mut self) {
        if self.is_in_flight() {
            self.status = PacketStatus::Delivered;
        }
    }

    /// Tag the packet as dropped with the given reason. Terminal, like `mark_delivered`.
    pub fn mark_dropped(&mut self, reason: DropReason) {
        if self.is_in_flight() {
            self.status = PacketStatus::Dropped(reason);
        }
    }

    /// Time the packet spent in the network if it left at `now`.
    pub fn latency_at(&self, now: u64) -> u64 {
        now.saturating_sub(self.created_at)
    }
}
