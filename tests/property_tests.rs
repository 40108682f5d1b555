//! Property tests for slider invariants.
//!
//! Uses proptest to verify:
//! 1. Value round trip: mapping a value to an angle and back recovers it
//! 2. Angle adjustment is idempotent
//! 3. Arc length is always within one turn
//! 4. Handle hit-testing: always hits at the rendered center, never past the slop
//! 5. Bar drags preserve arc length

use proptest::prelude::*;
use ring_slider::consts::{HANDLE_HIT_SLOP_PX, TAU};
use ring_slider::geometry::{Geometry, angular_distance, arc_length, point_on_ring};
use ring_slider::hit::hit_handle;
use ring_slider::render::RingLayout;
use ring_slider::surface::{Orientation, Point, SurfaceDescriptor};
use ring_slider::{SliderConfig, SliderCore};

fn descriptor() -> SurfaceDescriptor {
    SurfaceDescriptor::new(320.0, 320.0, 2.0, Orientation::Portrait)
}

// ── Strategies (proptest) ────────────────────────────────────────────

/// A stepped domain `(min, step, steps)` with at least three steps.
fn arb_stepped() -> impl Strategy<Value = (f64, f64, u32)> {
    (-100.0..100.0_f64, prop::sample::select(vec![0.25, 0.5, 1.0, 2.5, 5.0]), 3_u32..200)
}

fn arb_angle() -> impl Strategy<Value = f64> {
    -20.0..20.0_f64
}

// ── 1. Value Round Trip ──────────────────────────────────────────────

proptest! {
    /// Continuous mode recovers any in-range value.
    #[test]
    fn continuous_value_round_trip(min in -100.0..100.0_f64, range in 1.0..500.0_f64, t in 0.0..0.999_f64) {
        let geometry = Geometry::new(min, min + range, None);
        let value = min + t * range;
        let back = geometry.angle_to_value(geometry.value_to_angle(value));
        prop_assert!((back - value).abs() < 1e-9 * range, "{value} -> {back}");
    }

    /// Stepped mode recovers every grid value below the maximum.
    #[test]
    fn stepped_value_round_trip((min, step, steps) in arb_stepped(), t in 0.0..1.0_f64) {
        let k = (t * f64::from(steps)).floor().min(f64::from(steps - 1));
        let geometry = Geometry::new(min, min + step * f64::from(steps), Some(step));
        let value = min + step * k;
        let back = geometry.angle_to_value(geometry.value_to_angle(value));
        prop_assert!((back - value).abs() < 1e-9, "{value} -> {back}");
    }
}

// ── 2. Idempotent Adjustment ─────────────────────────────────────────

proptest! {
    #[test]
    fn adjust_angle_is_idempotent((min, step, steps) in arb_stepped(), angle in arb_angle()) {
        let geometry = Geometry::new(min, min + step * f64::from(steps), Some(step));
        let once = geometry.adjust_angle(angle);
        let twice = geometry.adjust_angle(once);
        prop_assert!((0.0..TAU).contains(&once));
        prop_assert!((twice - once).abs() < 1e-12, "{once} vs {twice}");
    }

    #[test]
    fn continuous_adjust_is_idempotent(angle in arb_angle()) {
        let geometry = Geometry::new(0.0, 48.0, None);
        let once = geometry.adjust_angle(angle);
        prop_assert_eq!(geometry.adjust_angle(once), once);
    }
}

// ── 3. Arc Length ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn arc_length_within_one_turn(from in arb_angle(), to in arb_angle()) {
        let length = arc_length(from, to);
        prop_assert!((0.0..TAU).contains(&length), "{length}");
        prop_assert_eq!(arc_length(from, from), 0.0);
    }
}

// ── 4. Handle Hit-Testing ────────────────────────────────────────────

proptest! {
    #[test]
    fn handle_hit_at_rendered_center(angle in 0.0..TAU, handle_radius in 4.0..30.0_f64) {
        let config = SliderConfig { handle_radius, ..SliderConfig::default() };
        let layout = RingLayout::new(&config, &descriptor());
        prop_assert!(hit_handle(layout.handle_center(angle), &layout, handle_radius, angle));
    }

    #[test]
    fn handle_miss_past_slop(
        angle in 0.0..TAU,
        handle_radius in 4.0..30.0_f64,
        direction in 0.0..TAU,
        extra in 0.01..80.0_f64,
    ) {
        let config = SliderConfig { handle_radius, ..SliderConfig::default() };
        let layout = RingLayout::new(&config, &descriptor());
        let center = layout.handle_center(angle);
        let distance = handle_radius + HANDLE_HIT_SLOP_PX + extra;
        let pt = Point::new(center.x + direction.cos() * distance, center.y + direction.sin() * distance);
        prop_assert!(!hit_handle(pt, &layout, handle_radius, angle));
    }
}

// ── 5. Bar Drag ──────────────────────────────────────────────────────

/// Grab the bar at its midpoint and run `moves` through it, checking the
/// arc length after every move.
fn drag_bar(config: SliderConfig, moves: &[f64], tolerance: f64) -> Result<(), TestCaseError> {
    let mut core = SliderCore::new(config, descriptor()).map_err(|err| TestCaseError::fail(err.to_string()))?;
    let (from, to) = core.angles();
    let length = arc_length(from, to);
    let center = core.layout().center;
    let radius = core.layout().track_radius;

    let grab = point_on_ring(center, radius, from + length / 2.0);
    prop_assert!(!core.on_pointer_down(grab).is_empty(), "bar not grabbed");

    for &angle in moves {
        core.on_pointer_move(point_on_ring(center, radius, angle));
        let (from, to) = core.angles();
        let after = arc_length(from, to);
        prop_assert!(angular_distance(after, length) <= tolerance, "{length} -> {after}");
    }
    Ok(())
}

proptest! {
    #[test]
    fn continuous_bar_drag_preserves_length(
        from in 0.0..48.0_f64,
        span in 6.0..40.0_f64,
        moves in prop::collection::vec(0.0..TAU, 1..12),
    ) {
        let config = SliderConfig { step: None, from, to: from + span, ..SliderConfig::default() };
        drag_bar(config, &moves, 1e-9)?;
    }

    #[test]
    fn stepped_bar_drag_preserves_length(
        from in 0_u32..48,
        span in 6_u32..40,
        moves in prop::collection::vec(0.0..TAU, 1..12),
    ) {
        let config = SliderConfig {
            step: Some(1.0),
            from: f64::from(from),
            to: f64::from(from + span),
            ..SliderConfig::default()
        };
        // At most one quantization step.
        drag_bar(config, &moves, TAU / 48.0 + 1e-9)?;
    }
}
