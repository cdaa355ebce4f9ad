//! Integration tests for catena-telemetry.

use std::sync::mpsc;

use catena_telemetry::bus::EventBus;
use catena_telemetry::events::{EventKind, RopeEvent};
use catena_telemetry::sinks::{EventSink, SummarySink, TracingSink, VecSink};

/// Sink that forwards events over a channel so tests can count them.
struct ForwardSink {
    tx: mpsc::Sender<RopeEvent>,
}

impl EventSink for ForwardSink {
    fn handle(&mut self, event: &RopeEvent) {
        let _ = self.tx.send(event.clone());
    }

    fn name(&self) -> &str {
        "forward_sink"
    }
}

/// Sink that reports finalization over a channel.
struct FinalizeSink {
    tx: mpsc::Sender<&'static str>,
}

impl EventSink for FinalizeSink {
    fn handle(&mut self, _event: &RopeEvent) {}

    fn finalize(&mut self) {
        let _ = self.tx.send("finalized");
    }

    fn name(&self) -> &str {
        "finalize_sink"
    }
}

#[test]
fn emit_and_flush_delivers_to_sinks() {
    let (tx, rx) = mpsc::channel();
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(ForwardSink { tx }));

    bus.emit(RopeEvent::new(0, EventKind::StepBegin { sim_time: 0.0 }));
    bus.emit(RopeEvent::new(0, EventKind::StepEnd { wall_time: 0.001 }));
    bus.flush();

    let delivered: Vec<RopeEvent> = rx.try_iter().collect();
    assert_eq!(delivered.len(), 2, "both events should reach the sink");
    assert!(matches!(delivered[0].kind, EventKind::StepBegin { .. }));
    assert!(matches!(delivered[1].kind, EventKind::StepEnd { .. }));
}

#[test]
fn events_are_not_delivered_before_flush() {
    let (tx, rx) = mpsc::channel();
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(ForwardSink { tx }));

    bus.emit(RopeEvent::new(3, EventKind::StretchResidual { residual: 0.01 }));
    assert!(rx.try_recv().is_err(), "events stay queued until flush");

    bus.flush();
    assert_eq!(rx.try_iter().count(), 1);
}

#[test]
fn disabled_bus_drops_events() {
    let (tx, rx) = mpsc::channel();
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(ForwardSink { tx }));

    bus.set_enabled(false);
    assert!(!bus.is_enabled());

    bus.emit(RopeEvent::new(0, EventKind::StepBegin { sim_time: 0.0 }));
    bus.flush();
    assert!(rx.try_recv().is_err(), "disabled bus must drop events");

    bus.set_enabled(true);
    bus.emit(RopeEvent::new(1, EventKind::StepBegin { sim_time: 0.0 }));
    bus.flush();
    assert_eq!(rx.try_iter().count(), 1, "re-enabled bus delivers again");
}

#[test]
fn disabled_bus_counts_drops() {
    let mut bus = EventBus::new();
    assert_eq!(bus.dropped(), 0);

    bus.set_enabled(false);
    bus.emit(RopeEvent::new(0, EventKind::StepBegin { sim_time: 0.0 }));
    bus.emit(RopeEvent::new(0, EventKind::StepEnd { wall_time: 0.001 }));
    assert_eq!(bus.dropped(), 2);

    bus.set_enabled(true);
    bus.emit(RopeEvent::new(1, EventKind::StepBegin { sim_time: 0.016 }));
    assert_eq!(bus.dropped(), 2, "accepted events do not count as drops");
}

#[test]
fn flush_reports_dispatch_count() {
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(VecSink::new()));

    bus.emit_at(0, EventKind::StepBegin { sim_time: 0.0 });
    bus.emit_at(0, EventKind::StretchResidual { residual: 0.02 });
    bus.emit_at(0, EventKind::StepEnd { wall_time: 0.001 });

    assert_eq!(bus.flush(), 3);
    assert_eq!(bus.flush(), 0, "queue is empty after a flush");
}

#[test]
fn emit_at_stamps_the_timestep() {
    let (tx, rx) = mpsc::channel();
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(ForwardSink { tx }));

    bus.emit_at(42, EventKind::StretchResidual { residual: 0.5 });
    bus.flush();

    let delivered: Vec<RopeEvent> = rx.try_iter().collect();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].timestep, 42);
    assert!(matches!(
        delivered[0].kind,
        EventKind::StretchResidual { .. }
    ));
}

#[test]
fn multiple_sinks_each_receive_events() {
    let (tx_a, rx_a) = mpsc::channel();
    let (tx_b, rx_b) = mpsc::channel();
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(ForwardSink { tx: tx_a }));
    bus.add_sink(Box::new(ForwardSink { tx: tx_b }));
    assert_eq!(bus.sink_count(), 2);

    bus.emit(RopeEvent::new(
        7,
        EventKind::Energy {
            kinetic: 1.0,
            potential: -2.0,
        },
    ));
    bus.flush();

    assert_eq!(rx_a.try_iter().count(), 1);
    assert_eq!(rx_b.try_iter().count(), 1);
}

#[test]
fn finish_flushes_then_finalizes() {
    let (event_tx, event_rx) = mpsc::channel();
    let (done_tx, done_rx) = mpsc::channel();
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(ForwardSink { tx: event_tx }));
    bus.add_sink(Box::new(FinalizeSink { tx: done_tx }));

    bus.emit(RopeEvent::new(9, EventKind::StepEnd { wall_time: 0.002 }));
    bus.finish();

    assert_eq!(event_rx.try_iter().count(), 1, "pending events flush first");
    assert_eq!(done_rx.try_recv().unwrap(), "finalized");
}

#[test]
fn vec_sink_collects_events() {
    let mut sink = VecSink::new();
    sink.handle(&RopeEvent::new(0, EventKind::StepBegin { sim_time: 0.0 }));
    sink.handle(&RopeEvent::new(1, EventKind::StepBegin { sim_time: 0.016 }));

    assert_eq!(sink.events.len(), 2);
    assert_eq!(sink.events[1].timestep, 1);
    assert_eq!(sink.name(), "vec_sink");
}

#[test]
fn vec_sink_extracts_physics_traces() {
    let mut sink = VecSink::new();
    assert_eq!(sink.peak_residual(), None);

    sink.handle(&RopeEvent::new(0, EventKind::StepBegin { sim_time: 0.0 }));
    sink.handle(&RopeEvent::new(0, EventKind::StretchResidual { residual: 0.02 }));
    sink.handle(&RopeEvent::new(
        0,
        EventKind::Energy {
            kinetic: 1.0,
            potential: -2.0,
        },
    ));
    sink.handle(&RopeEvent::new(1, EventKind::StretchResidual { residual: 0.05 }));
    sink.handle(&RopeEvent::new(
        1,
        EventKind::Energy {
            kinetic: 0.5,
            potential: -1.5,
        },
    ));

    assert_eq!(sink.residual_trace(), vec![0.02, 0.05]);
    assert_eq!(sink.energy_trace(), vec![(1.0, -2.0), (0.5, -1.5)]);
    assert_eq!(sink.peak_residual(), Some(0.05));
}

#[test]
fn summary_sink_aggregates_run() {
    let mut sink = SummarySink::new();

    sink.handle(&RopeEvent::new(0, EventKind::StepEnd { wall_time: 0.001 }));
    sink.handle(&RopeEvent::new(0, EventKind::StretchResidual { residual: 0.1 }));
    sink.handle(&RopeEvent::new(
        0,
        EventKind::Energy {
            kinetic: 2.0,
            potential: -3.0,
        },
    ));
    sink.handle(&RopeEvent::new(1, EventKind::StepEnd { wall_time: 0.002 }));
    sink.handle(&RopeEvent::new(1, EventKind::StretchResidual { residual: 0.03 }));
    sink.handle(&RopeEvent::new(
        1,
        EventKind::Energy {
            kinetic: 1.0,
            potential: -2.0,
        },
    ));

    assert_eq!(sink.steps(), 2);
    assert!((sink.solver_time() - 0.003).abs() < 1e-12);
    assert_eq!(sink.peak_residual(), 0.1, "keeps the worst residual");
    assert_eq!(sink.final_energy(), (1.0, -2.0), "keeps the latest split");
    assert_eq!(sink.name(), "summary_sink");

    // Finalize just logs the summary; the aggregates stay readable.
    sink.finalize();
    assert_eq!(sink.steps(), 2);
}

#[test]
fn tracing_sink_accepts_every_event_kind() {
    // No subscriber is installed, so records go nowhere; this pins down
    // that every kind is handled without panicking, verbose or not.
    for verbose in [false, true] {
        let mut sink = TracingSink::new(verbose);
        sink.handle(&RopeEvent::new(0, EventKind::StepBegin { sim_time: 0.0 }));
        sink.handle(&RopeEvent::new(0, EventKind::StretchResidual { residual: 0.01 }));
        sink.handle(&RopeEvent::new(
            0,
            EventKind::Energy {
                kinetic: 1.0,
                potential: -1.0,
            },
        ));
        sink.handle(&RopeEvent::new(
            0,
            EventKind::Custom {
                label: "note".to_string(),
                payload: "{}".to_string(),
            },
        ));
        sink.handle(&RopeEvent::new(0, EventKind::StepEnd { wall_time: 0.001 }));
        assert_eq!(sink.name(), "tracing_sink");
    }
}

#[test]
fn event_serialization_round_trip() {
    let event = RopeEvent::new(
        5,
        EventKind::Energy {
            kinetic: 1.0,
            potential: -2.0,
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    let recovered: RopeEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered.timestep, 5);
    match recovered.kind {
        EventKind::Energy { kinetic, potential } => {
            assert_eq!(kinetic, 1.0);
            assert_eq!(potential, -2.0);
        }
        other => panic!("wrong kind after round trip: {other:?}"),
    }
}

#[test]
fn custom_event_carries_payload() {
    let event = RopeEvent::new(
        10,
        EventKind::Custom {
            label: "max_sag".to_string(),
            payload: "{\"y\":-3.5}".to_string(),
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("max_sag"));
}
