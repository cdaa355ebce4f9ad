//! Integration tests for catena-debug.

use catena_debug::{PolylineCapture, RopeSnapshot};
use catena_math::Vec2;
use catena_solver::{Rope, RopeDefinition, RopeTuning};

fn test_rope() -> Rope {
    let def = RopeDefinition {
        vertices: vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(3.0, 0.0),
        ],
        masses: vec![0.0, 1.0, 1.0, 1.0],
        anchor: Vec2::new(0.0, 5.0),
        gravity: Vec2::new(0.0, -9.81),
        tuning: RopeTuning::default(),
    };
    Rope::new(&def).unwrap()
}

// ─── Capture Tests ────────────────────────────────────────────

#[test]
fn capture_records_chain_geometry() {
    let rope = test_rope();
    let mut capture = PolylineCapture::new();

    rope.draw(&mut capture);

    assert_eq!(capture.segments.len(), 3);
    assert_eq!(capture.points.len(), 4);

    // Segments connect consecutive points.
    for i in 0..3 {
        assert_eq!(capture.segments[i].0, capture.points[i].0);
        assert_eq!(capture.segments[i].1, capture.points[i + 1].0);
    }
}

#[test]
fn capture_flags_pinned_particles() {
    let rope = test_rope();
    let mut capture = PolylineCapture::new();

    rope.draw(&mut capture);

    assert!(capture.points[0].1);
    assert!(capture.points[1..].iter().all(|&(_, pinned)| !pinned));
}

#[test]
fn capture_polyline_matches_positions() {
    let rope = test_rope();
    let mut capture = PolylineCapture::new();

    rope.draw(&mut capture);

    assert_eq!(capture.polyline(), rope.positions().to_vec());
}

#[test]
fn capture_clear_resets_buffers() {
    let rope = test_rope();
    let mut capture = PolylineCapture::new();

    rope.draw(&mut capture);
    capture.clear();

    assert!(capture.segments.is_empty());
    assert!(capture.points.is_empty());

    // Reusable after clearing.
    rope.draw(&mut capture);
    assert_eq!(capture.points.len(), 4);
}

// ─── Snapshot Tests ───────────────────────────────────────────

#[test]
fn snapshot_interleaves_coordinates() {
    let rope = test_rope();
    let snapshot = RopeSnapshot::capture(&rope, 0, 0.0);

    assert_eq!(snapshot.particle_count, 4);
    assert_eq!(snapshot.positions.len(), 8);
    assert_eq!(snapshot.velocities.len(), 8);

    // [x0, y0, x1, y1, ...] with the anchor offset applied.
    assert_eq!(snapshot.positions[0], 0.0);
    assert_eq!(snapshot.positions[1], 5.0);
    assert_eq!(snapshot.positions[2], 1.0);
    assert_eq!(snapshot.positions[3], 5.0);
}

#[test]
fn snapshot_binary_round_trip() {
    let mut rope = test_rope();
    for _ in 0..10 {
        rope.step(1.0 / 60.0, 4, Vec2::new(0.0, 5.0));
    }

    let snapshot = RopeSnapshot::capture(&rope, 10, 10.0 / 60.0);
    let bytes = snapshot.to_bytes().unwrap();
    let restored = RopeSnapshot::from_bytes(&bytes).unwrap();

    assert_eq!(restored.timestep, 10);
    assert_eq!(restored.particle_count, 4);
    assert_eq!(restored.positions, snapshot.positions);
    assert_eq!(restored.velocities, snapshot.velocities);
    assert!((restored.sim_time - snapshot.sim_time).abs() < 1e-12);
}

#[test]
fn snapshot_rejects_corrupt_bytes() {
    let result = RopeSnapshot::from_bytes(&[0xde, 0xad, 0xbe]);
    assert!(result.is_err());
}

#[test]
fn snapshot_reflects_motion() {
    let mut rope = test_rope();
    let before = RopeSnapshot::capture(&rope, 0, 0.0);

    for _ in 0..30 {
        rope.step(1.0 / 60.0, 4, Vec2::new(0.0, 5.0));
    }
    let after = RopeSnapshot::capture(&rope, 30, 0.5);

    // Free end fell; pinned end did not.
    assert!(after.positions[7] < before.positions[7]);
    assert!((after.positions[1] - before.positions[1]).abs() < 1e-5);
}
