use crate::clock::{Clock, clock_for};
use crate::metrics::MetricsCollector;
use crate::observer::{PacketEvent, SimulationObserver, StopHandle};
use crate::routing::{RouteOutcome, Router};
use crate::source::TrafficSource;
use crate::switch::{Admission, QueueingSwitch};
use crate::trace::{PacketEventSummary, SimulationReport, StopReason};
use queue_lab_abstract::{ConfigError, ForwardPolicy, Packet, PacketStatus, SimConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Generation { source: usize },
    Service { switch: usize },
    Sample,
}

impl EventKind {
    // Same-time order: generations, then services, then the sample.
    fn rank(&self) -> u8 {
        match self {
            EventKind::Generation { .. } => 0,
            EventKind::Service { .. } => 1,
            EventKind::Sample => 2,
        }
    }
}

#[derive(Debug)]
struct Event {
    time: u64,
    kind: EventKind,
    id: u64, // Unique ID to keep scheduling order among equal events
}

// Custom Ord for Min-Heap (smallest time pops first)
impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.id == other.id
    }
}

impl Eq for Event {}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse comparison: the earliest event is Greater in BinaryHeap
        other
            .time
            .cmp(&self.time)
            .then_with(|| other.kind.rank().cmp(&self.kind.rank()))
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Discrete-event driver for sources and switches.
pub struct Scheduler {
    clock: Box<dyn Clock>,
    event_queue: BinaryHeap<Event>,
    event_id_counter: u64,

    config: SimConfig,
    rng: StdRng,
    router: Router,
    sources: Vec<TrafficSource>,
    switches: Vec<QueueingSwitch>,
    terminal: usize,

    metrics: MetricsCollector,
    observers: Vec<Box<dyn SimulationObserver>>,
    stop: StopHandle,

    dispatched: u64,
    generation_events: u64,
    service_events: u64,
    delivered: u64,

    // Admissions, forwards, drops and deliveries, in dispatch order.
    packet_events: Vec<PacketEventSummary>,

    initialized: bool,
    stop_reason: Option<StopReason>,
}

impl Scheduler {
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let clock = clock_for(config.clock);
        Self::with_clock(config, clock)
    }

    /// Build a scheduler driven by a caller-supplied time source.
    pub fn with_clock(config: SimConfig, clock: Box<dyn Clock>) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = StdRng::seed_from_u64(config.seed);
        let sources = (0..config.sources)
            .map(|id| TrafficSource::new(id, &config))
            .collect();
        let switches: Vec<QueueingSwitch> = config
            .switches
            .iter()
            .enumerate()
            .map(|(id, s)| QueueingSwitch::new(id, s.capacity))
            .collect();
        let terminal = config.terminal_switch().ok_or(ConfigError::NoSwitches)?;

        Ok(Self {
            clock,
            event_queue: BinaryHeap::new(),
            event_id_counter: 0,
            router: Router::new(&config),
            config,
            rng,
            sources,
            switches,
            terminal,
            metrics: MetricsCollector::new(),
            observers: Vec::new(),
            stop: StopHandle::default(),
            dispatched: 0,
            generation_events: 0,
            service_events: 0,
            delivered: 0,
            packet_events: Vec::new(),
            initialized: false,
            stop_reason: None,
        })
    }

    pub fn add_observer(&mut self, observer: Box<dyn SimulationObserver>) {
        self.observers.push(observer);
    }

    /// Handle for requesting a stop from elsewhere (another thread, a UI).
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn switches(&self) -> &[QueueingSwitch] {
        &self.switches
    }

    /// Packet timeline recorded so far.
    pub fn packet_events(&self) -> &[PacketEventSummary] {
        &self.packet_events
    }

    pub fn is_finished(&self) -> bool {
        self.stop_reason.is_some()
    }

    fn push_event(&mut self, time: u64, kind: EventKind) {
        self.event_queue.push(Event {
            time,
            kind,
            id: self.event_id_counter,
        });
        self.event_id_counter += 1;
    }

    /// Schedule `kind` at `now + delay`. An event past the end of the clock's
    /// range is never due, so it is dropped.
    fn push_after(&mut self, now: u64, delay: u64, kind: EventKind) {
        match now.checked_add(delay) {
            Some(time) => self.push_event(time, kind),
            None => debug!("Not scheduling {:?}: time overflows", kind),
        }
    }

    /// Seed the first event of every source, switch and the sampler.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        info!(
            "Starting simulation: {} sources, {} switches, {} ms ({:?} routing, {:?} forwarding)",
            self.sources.len(),
            self.switches.len(),
            self.config.duration_ms,
            self.config.routing,
            self.config.forward_policy
        );

        let now = self.clock.now();
        for source in 0..self.sources.len() {
            self.push_event(now, EventKind::Generation { source });
        }
        if self.config.service_enabled {
            for switch in 0..self.switches.len() {
                let interval = self.config.service_interval_of(switch);
                self.push_after(now, interval, EventKind::Service { switch });
            }
        }
        self.push_event(now, EventKind::Sample);
    }

    fn queued_packets(&self) -> usize {
        self.switches.iter().map(QueueingSwitch::occupancy).sum()
    }

    fn draining(&self) -> bool {
        self.config.drain && self.config.service_enabled && self.queued_packets() > 0
    }

    /// Whether an event popped from the queue should still fire.
    fn is_due(&self, event: &Event) -> bool {
        if event.time < self.config.duration_ms {
            return true;
        }
        !matches!(event.kind, EventKind::Generation { .. }) && self.draining()
    }

    /// Process the next event. Returns true if an event was processed, false once the run is over.
    pub fn step(&mut self) -> bool {
        self.init();
        if self.stop_reason.is_some() {
            return false;
        }
        if self.stop.is_stopped() {
            self.stop_reason = Some(StopReason::Cancelled);
            return false;
        }
        if self
            .config
            .max_events
            .is_some_and(|limit| self.dispatched >= limit)
        {
            self.stop_reason = Some(StopReason::EventLimit);
            return false;
        }

        let event = loop {
            match self.event_queue.pop() {
                Some(e) if self.is_due(&e) => break e,
                Some(e) => debug!("Discarding event past the end of the run: {:?}", e.kind),
                None => {
                    self.stop_reason = Some(StopReason::Duration);
                    return false;
                }
            }
        };

        self.clock.advance_to(event.time);
        self.dispatched += 1;
        debug!("Processing event at {}: {:?}", event.time, event.kind);

        match event.kind {
            EventKind::Generation { source } => self.on_generation(source),
            EventKind::Service { switch } => self.on_service(switch),
            EventKind::Sample => self.on_sample(),
        }
        true
    }

    fn on_generation(&mut self, source: usize) {
        let now = self.clock.now();
        self.generation_events += 1;

        let packet = self.sources[source].generate(now, &mut self.rng);
        let (id, size) = (packet.id(), packet.size());
        match self.router.route(packet, &mut self.switches, &mut self.rng) {
            RouteOutcome::Admitted { switch } => self.emit(PacketEvent::Admitted {
                packet: id,
                switch,
                size,
            }),
            RouteOutcome::Dropped { packet, .. } => self.emit_drop(&packet),
        }

        let delay = self.sources[source].next_delay(&mut self.rng);
        if let Some(next) = now.checked_add(delay)
            && next < self.config.duration_ms
        {
            self.push_event(next, EventKind::Generation { source });
        }
    }

    fn on_service(&mut self, switch: usize) {
        let now = self.clock.now();
        self.service_events += 1;

        if let Some(packet) = self.switches[switch].service() {
            if switch == self.terminal {
                self.deliver(switch, packet);
            } else {
                self.forward(switch, packet);
            }
        }

        let interval = self.config.service_interval_of(switch);
        if now.saturating_add(interval) < self.config.duration_ms || self.config.drain {
            self.push_after(now, interval, EventKind::Service { switch });
        }
    }

    fn deliver(&mut self, switch: usize, mut packet: Packet) {
        let latency_ms = packet.latency_at(self.clock.now());
        packet.mark_delivered();
        self.metrics.record_latency(latency_ms);
        self.delivered += 1;
        self.emit(PacketEvent::Delivered {
            packet: packet.id(),
            switch,
            latency_ms,
        });
    }

    fn forward(&mut self, from: usize, packet: Packet) {
        let to = from + 1;
        let id = packet.id();

        if self.switches[to].has_space() || self.config.forward_policy == ForwardPolicy::Drop {
            match self.switches[to].admit_forwarded(packet, from) {
                Admission::Accepted => self.emit(PacketEvent::Forwarded {
                    packet: id,
                    from,
                    to,
                }),
                Admission::Dropped(packet) => self.emit_drop(&packet),
            }
            return;
        }

        match self.switches[from].requeue(packet) {
            Admission::Accepted => self.emit(PacketEvent::Requeued {
                packet: id,
                switch: from,
            }),
            // The slot freed by `service` is gone; charge the blocked hop.
            Admission::Dropped(packet) => {
                if let Admission::Dropped(packet) = self.switches[to].admit_forwarded(packet, from)
                {
                    self.emit_drop(&packet);
                }
            }
        }
    }

    fn on_sample(&mut self) {
        let now = self.clock.now();
        self.take_sample(now);

        // Periodic samples stop with the window; `finish` takes the closing one.
        if let Some(next) = now.checked_add(self.config.sample_interval_ms)
            && next < self.config.duration_ms
        {
            self.push_event(next, EventKind::Sample);
        }
    }

    fn take_sample(&mut self, now: u64) {
        if self.metrics.sample(now, &self.switches)
            && let Some(sample) = self.metrics.samples().last()
        {
            for observer in &mut self.observers {
                observer.on_sample(sample);
            }
        }
    }

    fn emit_drop(&mut self, packet: &Packet) {
        if let PacketStatus::Dropped(reason) = packet.status() {
            self.emit(PacketEvent::Dropped {
                packet: packet.id(),
                reason,
            });
        }
    }

    fn emit(&mut self, event: PacketEvent) {
        let time = self.clock.now();
        for observer in &mut self.observers {
            observer.on_packet_event(time, &event);
        }
        self.packet_events.push(PacketEventSummary {
            time,
            description: event.describe(),
        });
    }

    /// Close the run: move the clock to the end of the window, take the final
    /// sample and log the totals.
    pub fn finish(&mut self) {
        let reason = *self.stop_reason.get_or_insert(StopReason::Duration);
        if reason == StopReason::Duration {
            self.clock.advance_to(self.config.duration_ms);
        }
        let now = self.clock.now();
        self.take_sample(now);

        let summary = self.metrics.summary();
        info!(
            "Simulation finished at {} ms ({:?}): {} generated, {} delivered, {} dropped {:?}, mean latency {:.2} ms",
            now,
            reason,
            self.generated_packets(),
            self.delivered,
            summary.total_dropped,
            summary.drops_per_switch,
            summary.mean_latency_ms
        );
    }

    pub fn generated_packets(&self) -> u64 {
        self.sources.iter().map(TrafficSource::generated).sum()
    }

    /// Produce a serializable snapshot of the current simulation state.
    pub fn export_report(&self) -> SimulationReport {
        SimulationReport {
            config: self.config.clone(),
            duration_ms: self.clock.now(),
            stop_reason: self.stop_reason.unwrap_or(StopReason::Duration),
            generated_packets: self.generated_packets(),
            delivered_packets: self.delivered,
            dropped_packets: self.switches.iter().map(QueueingSwitch::dropped_count).sum(),
            in_flight_packets: self.queued_packets() as u64,
            generation_events: self.generation_events,
            service_events: self.service_events,
            peak_occupancy: self
                .switches
                .iter()
                .map(QueueingSwitch::peak_occupancy)
                .collect(),
            samples: self.metrics.samples().to_vec(),
            latencies: self.metrics.latencies().to_vec(),
            summary: self.metrics.summary(),
            packet_events: self.packet_events.clone(),
        }
    }

    pub fn run_until_complete(&mut self) -> SimulationReport {
        self.init();
        while self.step() {}
        self.finish();
        self.export_report()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::VirtualClock;
    use queue_lab_abstract::{ClockMode, DropReason, RoutingPolicy, SwitchConfig};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorded {
        events: Vec<(u64, PacketEvent)>,
        sample_times: Vec<u64>,
    }

    struct Recorder(Rc<RefCell<Recorded>>);

    impl SimulationObserver for Recorder {
        fn on_sample(&mut self, sample: &crate::metrics::Sample) {
            self.0.borrow_mut().sample_times.push(sample.time);
        }

        fn on_packet_event(&mut self, time: u64, event: &PacketEvent) {
            self.0.borrow_mut().events.push((time, event.clone()));
        }
    }

    fn recorded(scheduler: &mut Scheduler) -> Rc<RefCell<Recorded>> {
        let log = Rc::new(RefCell::new(Recorded::default()));
        scheduler.add_observer(Box::new(Recorder(Rc::clone(&log))));
        log
    }

    fn fixed_rate(sources: u32, interval: u64, capacities: &[usize]) -> SimConfig {
        SimConfig {
            sources,
            switches: capacities
                .iter()
                .map(|&c| SwitchConfig::with_capacity(c))
                .collect(),
            min_generation_delay_ms: interval,
            max_generation_delay_ms: interval,
            ..Default::default()
        }
    }

    #[test]
    fn fills_single_switch_without_service() {
        let config = SimConfig {
            duration_ms: 1_000,
            service_enabled: false,
            ..fixed_rate(4, 50, &[50])
        };
        let mut scheduler = Scheduler::new(config).unwrap();
        let report = scheduler.run_until_complete();

        assert_eq!(report.generation_events, 80);
        assert_eq!(report.generated_packets, 80);
        assert_eq!(report.service_events, 0);
        assert_eq!(scheduler.switches()[0].occupancy(), 50);
        assert_eq!(report.dropped_packets, 30);
        assert_eq!(report.summary.drops_per_switch, vec![30]);
        assert_eq!(report.summary.mean_latency_ms, 0.0);
        assert_eq!(report.in_flight_packets, 50);
        assert!(report.conservation_holds());
    }

    #[test]
    fn same_time_events_run_generation_service_sample() {
        let mut heap = BinaryHeap::new();
        for (id, kind) in [
            EventKind::Sample,
            EventKind::Service { switch: 1 },
            EventKind::Service { switch: 0 },
            EventKind::Generation { source: 2 },
        ]
        .into_iter()
        .enumerate()
        {
            heap.push(Event {
                time: 100,
                kind,
                id: id as u64,
            });
        }
        heap.push(Event {
            time: 50,
            kind: EventKind::Sample,
            id: 9,
        });

        let order: Vec<(u64, EventKind)> =
            std::iter::from_fn(|| heap.pop().map(|e| (e.time, e.kind))).collect();
        assert_eq!(
            order,
            vec![
                (50, EventKind::Sample),
                (100, EventKind::Generation { source: 2 }),
                (100, EventKind::Service { switch: 1 }),
                (100, EventKind::Service { switch: 0 }),
                (100, EventKind::Sample),
            ]
        );
    }

    #[test]
    fn samples_are_strictly_increasing_and_end_at_duration() {
        let config = SimConfig {
            duration_ms: 1_000,
            ..Default::default()
        };
        let mut scheduler = Scheduler::new(config).unwrap();
        let log = recorded(&mut scheduler);
        let report = scheduler.run_until_complete();

        let times: Vec<u64> = report.samples.iter().map(|s| s.time).collect();
        assert!(times.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(times.first(), Some(&0));
        assert_eq!(times.last(), Some(&1_000));
        assert_eq!(times.len(), 21);
        assert_eq!(log.borrow().sample_times, times);
    }

    #[test]
    fn latency_is_exact_under_virtual_time() {
        let config = SimConfig {
            duration_ms: 2_000,
            service_interval_ms: 15,
            ..fixed_rate(3, 40, &[20, 20])
        };
        let mut scheduler = Scheduler::new(config).unwrap();
        let log = recorded(&mut scheduler);
        let report = scheduler.run_until_complete();

        let mut created = HashMap::new();
        let mut delivered = 0;
        for (time, event) in &log.borrow().events {
            match event {
                PacketEvent::Admitted { packet, .. } => {
                    created.insert(*packet, *time);
                }
                PacketEvent::Delivered {
                    packet, latency_ms, ..
                } => {
                    assert_eq!(*latency_ms, time - created[packet]);
                    delivered += 1;
                }
                _ => {}
            }
        }
        assert!(delivered > 0);
        assert_eq!(delivered, report.delivered_packets);
        assert_eq!(report.latencies.len() as u64, delivered);
    }

    #[test]
    fn drain_accounts_for_every_packet() {
        let config = SimConfig {
            duration_ms: 3_000,
            drain: true,
            switches: vec![SwitchConfig::with_capacity(5), SwitchConfig::with_capacity(3)],
            seed: 42,
            ..Default::default()
        };
        let mut scheduler = Scheduler::new(config).unwrap();
        let report = scheduler.run_until_complete();

        assert_eq!(report.in_flight_packets, 0);
        assert!(report.dropped_packets > 0);
        assert_eq!(
            report.generated_packets,
            report.delivered_packets + report.dropped_packets
        );
        assert!(report.duration_ms >= 3_000);
    }

    #[test]
    fn upstream_blocking_drops_are_charged_downstream() {
        // Switch 1 only receives forwarded traffic and is serviced five times slower.
        let config = SimConfig {
            duration_ms: 500,
            ingress: vec![0],
            service_interval_ms: 10,
            switches: vec![
                SwitchConfig::with_capacity(100),
                SwitchConfig::with_capacity(1).service_every(50),
            ],
            ..fixed_rate(4, 10, &[])
        };
        let mut scheduler = Scheduler::new(config).unwrap();
        let log = recorded(&mut scheduler);
        let report = scheduler.run_until_complete();

        assert!(report.summary.drops_per_switch[1] > 0);
        assert!(log.borrow().events.iter().any(|(_, e)| matches!(
            e,
            PacketEvent::Dropped {
                reason: DropReason::DownstreamFull { from: 0, to: 1 },
                ..
            }
        )));
        assert!(report.conservation_holds());
    }

    #[test]
    fn requeue_policy_never_drops_between_hops() {
        let config = SimConfig {
            duration_ms: 500,
            ingress: vec![0],
            forward_policy: ForwardPolicy::Requeue,
            routing: RoutingPolicy::CapacityAware,
            service_interval_ms: 10,
            switches: vec![
                SwitchConfig::with_capacity(10),
                SwitchConfig::with_capacity(1).service_every(50),
            ],
            ..fixed_rate(2, 10, &[])
        };
        let mut scheduler = Scheduler::new(config).unwrap();
        let log = recorded(&mut scheduler);
        let report = scheduler.run_until_complete();

        assert_eq!(report.summary.drops_per_switch[1], 0);
        assert!(report.summary.drops_per_switch[0] > 0);
        let events = &log.borrow().events;
        assert!(
            events
                .iter()
                .any(|(_, e)| matches!(e, PacketEvent::Requeued { switch: 0, .. }))
        );
        assert!(!events.iter().any(|(_, e)| matches!(
            e,
            PacketEvent::Dropped {
                reason: DropReason::DownstreamFull { .. },
                ..
            }
        )));
        assert!(report.conservation_holds());
    }

    #[test]
    fn event_limit_stops_the_run() {
        let config = SimConfig {
            max_events: Some(25),
            ..Default::default()
        };
        let mut scheduler = Scheduler::new(config).unwrap();
        let report = scheduler.run_until_complete();

        assert_eq!(report.stop_reason, StopReason::EventLimit);
        assert!(report.duration_ms < 10_000);
        assert!(report.conservation_holds());
    }

    #[test]
    fn stop_handle_cancels_between_events() {
        let mut scheduler = Scheduler::new(SimConfig::default()).unwrap();
        let stop = scheduler.stop_handle();

        for _ in 0..10 {
            assert!(scheduler.step());
        }
        stop.stop();
        assert!(!scheduler.step());
        assert!(scheduler.is_finished());

        scheduler.finish();
        let report = scheduler.export_report();
        assert_eq!(report.stop_reason, StopReason::Cancelled);
        assert!(report.generated_packets > 0);
    }

    #[test]
    fn same_seed_same_report() {
        let run = || {
            let mut scheduler = Scheduler::new(SimConfig {
                seed: 9,
                duration_ms: 2_000,
                ..Default::default()
            })
            .unwrap();
            scheduler.run_until_complete()
        };
        let (a, b) = (run(), run());
        assert_eq!(a.samples, b.samples);
        assert_eq!(a.latencies, b.latencies);
        assert_eq!(a.summary, b.summary);
    }

    #[test]
    fn invalid_configuration_is_rejected_up_front() {
        let config = SimConfig {
            switches: vec![SwitchConfig::with_capacity(0)],
            ..Default::default()
        };
        assert_eq!(
            Scheduler::new(config).err(),
            Some(ConfigError::ZeroCapacity { switch: 0 })
        );
    }

    #[test]
    fn custom_clock_is_honoured() {
        let config = SimConfig {
            clock: ClockMode::WallClock,
            duration_ms: 200,
            ..Default::default()
        };
        // The injected clock overrides the configured mode, so this run does not sleep.
        let mut scheduler = Scheduler::with_clock(config, Box::new(VirtualClock::default())).unwrap();
        let report = scheduler.run_until_complete();
        assert_eq!(report.duration_ms, 200);
    }

    #[test]
    fn wall_clock_run_matches_virtual_run() {
        let run = |clock: ClockMode| {
            Scheduler::new(SimConfig {
                seed: 4,
                duration_ms: 300,
                clock,
                ..Default::default()
            })
            .unwrap()
            .run_until_complete()
        };
        let started = std::time::Instant::now();
        let wall = run(ClockMode::WallClock);
        assert!(started.elapsed() >= std::time::Duration::from_millis(250));

        let virtual_run = run(ClockMode::Virtual);
        assert_eq!(wall.duration_ms, 300);
        assert_eq!(wall.samples, virtual_run.samples);
        assert_eq!(wall.latencies, virtual_run.latencies);
        assert_eq!(wall.summary, virtual_run.summary);
    }

    fn slow_drain(sample_interval_ms: u64) -> SimConfig {
        let huge = u64::MAX / 2 + 1;
        SimConfig {
            sources: 1,
            duration_ms: 100,
            drain: true,
            sample_interval_ms,
            switches: vec![SwitchConfig::with_capacity(5).service_every(huge)],
            ..Default::default()
        }
    }

    #[test]
    fn drain_with_huge_service_interval_terminates() {
        let huge = u64::MAX / 2 + 1;
        for sample_interval_ms in [huge, 50] {
            let mut scheduler = Scheduler::new(slow_drain(sample_interval_ms)).unwrap();
            let report = scheduler.run_until_complete();

            assert_eq!(report.stop_reason, StopReason::Duration);
            // The second service would land past u64::MAX and is never scheduled.
            assert_eq!(report.service_events, 1);
            assert_eq!(report.delivered_packets, 1);
            assert_eq!(report.duration_ms, huge);
            assert_eq!(
                report.in_flight_packets,
                report.generated_packets - 1 - report.dropped_packets
            );
            assert!(report.conservation_holds());
        }
    }

    #[test]
    fn sampling_stops_at_the_window_while_draining() {
        let report = Scheduler::new(slow_drain(50)).unwrap().run_until_complete();
        let times: Vec<u64> = report.samples.iter().map(|s| s.time).collect();
        assert_eq!(times, vec![0, 50, u64::MAX / 2 + 1]);
    }

    #[test]
    fn timeline_matches_observed_packet_events() {
        let mut scheduler = Scheduler::new(SimConfig {
            duration_ms: 400,
            ..Default::default()
        })
        .unwrap();
        let log = recorded(&mut scheduler);
        let report = scheduler.run_until_complete();

        let observed = &log.borrow().events;
        assert_eq!(scheduler.packet_events().len(), observed.len());
        assert_eq!(report.packet_events.len(), observed.len());
        for (summary, (time, event)) in scheduler.packet_events().iter().zip(observed) {
            assert_eq!(summary.time, *time);
            assert_eq!(summary.description, event.describe());
        }
    }
}
