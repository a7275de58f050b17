use queue_lab_abstract::{DropReason, Packet};
use std::collections::VecDeque;
use tracing::debug;

/// Outcome of offering a packet to a switch.
#[derive(Debug)]
pub enum Admission {
    Accepted,
    /// The queue was full. The packet comes back tagged with its drop reason.
    Dropped(Packet),
}

impl Admission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Admission::Accepted)
    }
}

/// A bounded FIFO buffer with tail-drop admission.
#[derive(Debug)]
pub struct QueueingSwitch {
    id: usize,
    queue: VecDeque<Packet>,
    capacity: usize,
    dropped: u64,
    admitted: u64,
    peak_occupancy: usize,
}

impl QueueingSwitch {
    pub fn new(id: usize, capacity: usize) -> Self {
        Self {
            id,
            queue: VecDeque::with_capacity(capacity),
            capacity,
            dropped: 0,
            admitted: 0,
            peak_occupancy: 0,
        }
    }

    /// Append `packet` to the tail if there is room, otherwise count a drop.
    pub fn admit(&mut self, packet: Packet) -> Admission {
        let reason = DropReason::QueueFull { switch: self.id };
        self.offer(packet, reason)
    }

    /// Same as [`QueueingSwitch::admit`] for a packet handed over by upstream switch `from`.
    pub fn admit_forwarded(&mut self, packet: Packet, from: usize) -> Admission {
        let reason = DropReason::DownstreamFull { from, to: self.id };
        self.offer(packet, reason)
    }

    fn offer(&mut self, mut packet: Packet, reason: DropReason) -> Admission {
        if self.has_space() {
            self.push(packet);
            self.admitted += 1;
            Admission::Accepted
        } else {
            self.dropped += 1;
            debug!(
                "Switch {} full ({}/{}), dropping {}",
                self.id,
                self.queue.len(),
                self.capacity,
                packet.id()
            );
            packet.mark_dropped(reason);
            Admission::Dropped(packet)
        }
    }

    /// Put a packet this switch could not forward back at the tail.
    /// Neither an admission nor a drop is counted; a refused packet is
    /// returned untouched so the caller decides its fate.
    pub fn requeue(&mut self, packet: Packet) -> Admission {
        if self.has_space() {
            self.push(packet);
            Admission::Accepted
        } else {
            Admission::Dropped(packet)
        }
    }

    /// Remove the head packet, if any. One unit of forwarding work.
    pub fn service(&mut self) -> Option<Packet> {
        self.queue.pop_front()
    }

    fn push(&mut self, packet: Packet) {
        self.queue.push_back(packet);
        self.peak_occupancy = self.peak_occupancy.max(self.queue.len());
    }

    pub fn has_space(&self) -> bool {
        self.queue.len() < self.capacity
    }

    pub fn occupancy(&self) -> usize {
        self.queue.len()
    }

    pub fn dropped_count(&self) -> u64 {
        self.dropped
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn admitted_count(&self) -> u64 {
        self.admitted
    }

    pub fn peak_occupancy(&self) -> usize {
        self.peak_occupancy
    }
}
