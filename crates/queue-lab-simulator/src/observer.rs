use crate::metrics::Sample;
use queue_lab_abstract::{DropReason, PacketId};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Something that happened to a single packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PacketEvent {
    Admitted {
        packet: PacketId,
        switch: usize,
        size: u32,
    },
    Forwarded {
        packet: PacketId,
        from: usize,
        to: usize,
    },
    /// Downstream was full and the packet went back to the tail of `switch`.
    Requeued { packet: PacketId, switch: usize },
    Dropped { packet: PacketId, reason: DropReason },
    Delivered {
        packet: PacketId,
        switch: usize,
        latency_ms: u64,
    },
}

impl PacketEvent {
    pub fn describe(&self) -> String {
        match self {
            PacketEvent::Admitted {
                packet,
                switch,
                size,
            } => format!(
                "[Node{}->SW{}] ADMIT {} ({} bytes)",
                packet.source, switch, packet, size
            ),
            PacketEvent::Forwarded { packet, from, to } => {
                format!("[SW{}->SW{}] FORWARD {}", from, to, packet)
            }
            PacketEvent::Requeued { packet, switch } => {
                format!("[SW{}] REQUEUE {} (next hop full)", switch, packet)
            }
            PacketEvent::Dropped { packet, reason } => match reason {
                DropReason::QueueFull { switch } => {
                    format!("[SW{}] DROP {} (queue full)", switch, packet)
                }
                DropReason::DownstreamFull { from, to } => {
                    format!("[SW{}->SW{}] DROP {} (next hop full)", from, to, packet)
                }
            },
            PacketEvent::Delivered {
                packet,
                switch,
                latency_ms,
            } => format!(
                "[SW{}] DELIVER {} (latency={}ms)",
                switch, packet, latency_ms
            ),
        }
    }
}

/// Subscriber to the metrics feed, e.g. a live chart or animation front end.
pub trait SimulationObserver {
    fn on_sample(&mut self, _sample: &Sample) {}

    fn on_packet_event(&mut self, _time: u64, _event: &PacketEvent) {}
}

/// Cooperative cancellation flag, checked by the scheduler once per event.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}
