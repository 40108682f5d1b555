#![allow(clippy::float_cmp)]

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use super::*;

const EPS: f64 = 1e-9;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

fn day() -> Geometry {
    Geometry::new(0.0, 48.0, Some(1.0))
}

fn continuous() -> Geometry {
    Geometry::new(0.0, 48.0, None)
}

// =============================================================
// Free angle helpers
// =============================================================

#[test]
fn normalize_angle_wraps_into_one_turn() {
    assert_eq!(normalize_angle(0.0), 0.0);
    assert!(approx(normalize_angle(TAU + 1.0), 1.0));
    assert!(approx(normalize_angle(-FRAC_PI_2), 3.0 * FRAC_PI_2));
    assert_eq!(normalize_angle(TAU), 0.0);
}

#[test]
fn normalize_angle_never_returns_full_turn() {
    let a = normalize_angle(-1e-18);
    assert!(a < TAU);
}

#[test]
fn normalize_angle_maps_non_finite_to_zero() {
    assert_eq!(normalize_angle(f64::NAN), 0.0);
    assert_eq!(normalize_angle(f64::INFINITY), 0.0);
}

#[test]
fn arc_length_handles_wrap() {
    assert!(approx(arc_length(0.0, FRAC_PI_2), FRAC_PI_2));
    assert!(approx(arc_length(3.0 * FRAC_PI_2, FRAC_PI_2), PI));
    assert_eq!(arc_length(1.0, 1.0), 0.0);
}

#[test]
fn angular_distance_takes_shorter_way() {
    assert!(approx(angular_distance(0.1, TAU - 0.1), 0.2));
    assert!(approx(angular_distance(TAU - 0.1, 0.1), 0.2));
    assert!(approx(angular_distance(0.0, PI), PI));
}

#[test]
fn signed_angle_delta_picks_shortest_direction() {
    assert!(approx(signed_angle_delta(0.1, TAU - 0.1), 0.2));
    assert!(approx(signed_angle_delta(TAU - 0.1, 0.1), -0.2));
}

#[test]
fn is_angle_between_plain_interval_is_closed() {
    assert!(is_angle_between(0.0, 0.0, 1.0));
    assert!(is_angle_between(1.0, 0.0, 1.0));
    assert!(is_angle_between(0.5, 0.0, 1.0));
    assert!(!is_angle_between(1.5, 0.0, 1.0));
}

#[test]
fn is_angle_between_wrapped_interval_is_union() {
    let from = 3.0 * FRAC_PI_2;
    let to = FRAC_PI_2;
    assert!(is_angle_between(0.0, from, to));
    assert!(is_angle_between(5.0, from, to));
    assert!(!is_angle_between(PI, from, to));
}

#[test]
fn arc_midpoint_of_plain_arc() {
    assert!(approx(arc_midpoint(0.0, FRAC_PI_2), FRAC_PI_4));
}

#[test]
fn arc_midpoint_of_wrapped_arc() {
    // 315° .. 45° has its midpoint at 0°.
    let mid = arc_midpoint(7.0 * FRAC_PI_4, FRAC_PI_4);
    assert!(approx(mid, 0.0) || approx(mid, TAU));
    // 270° .. 180° (wrapping, long arc) has its midpoint at 45°.
    assert!(approx(arc_midpoint(3.0 * FRAC_PI_2, PI), FRAC_PI_4));
}

#[test]
fn canvas_frame_is_a_quarter_turn_behind() {
    assert!(approx(to_canvas_angle(0.0), -FRAC_PI_2));
    assert!(approx(from_canvas_angle(to_canvas_angle(1.25)), 1.25));
}

#[test]
fn geometry_angle_of_top_is_zero() {
    let center = Point::new(100.0, 100.0);
    assert!(approx(geometry_angle_of(center, Point::new(100.0, 10.0)).unwrap(), 0.0));
    assert!(approx(geometry_angle_of(center, Point::new(190.0, 100.0)).unwrap(), FRAC_PI_2));
    assert!(approx(geometry_angle_of(center, Point::new(100.0, 190.0)).unwrap(), PI));
    assert!(approx(geometry_angle_of(center, Point::new(10.0, 100.0)).unwrap(), 3.0 * FRAC_PI_2));
}

#[test]
fn angle_of_center_is_undefined() {
    let center = Point::new(50.0, 50.0);
    assert!(canvas_angle_of(center, center).is_none());
    assert!(geometry_angle_of(center, center).is_none());
}

#[test]
fn point_on_ring_puts_zero_at_top() {
    let p = point_on_ring(Point::new(100.0, 100.0), 50.0, 0.0);
    assert!(approx(p.x, 100.0));
    assert!(approx(p.y, 50.0));
    let p = point_on_ring(Point::new(100.0, 100.0), 50.0, FRAC_PI_2);
    assert!(approx(p.x, 150.0));
    assert!(approx(p.y, 100.0));
}

// =============================================================
// Geometry: value <-> angle
// =============================================================

#[test]
fn value_to_angle_is_linear() {
    let g = day();
    assert_eq!(g.value_to_angle(0.0), 0.0);
    assert!(approx(g.value_to_angle(12.0), FRAC_PI_2));
    assert!(approx(g.value_to_angle(24.0), PI));
    assert!(approx(g.value_to_angle(48.0), TAU));
}

#[test]
fn value_to_angle_wraps_below_min_from_max() {
    let g = day();
    assert!(approx(g.value_to_angle(-12.0), g.value_to_angle(36.0)));
    assert!(approx(g.value_to_angle(-60.0), g.value_to_angle(36.0)));
}

#[test]
fn value_to_angle_wraps_above_max_by_modulo() {
    let g = day();
    assert!(approx(g.value_to_angle(50.0), g.value_to_angle(2.0)));
    assert!(approx(g.value_to_angle(96.0), 0.0));
}

#[test]
fn wrap_value_with_offset_domain_stays_in_range() {
    let g = Geometry::new(10.0, 20.0, None);
    assert!(approx(g.wrap_value(25.0), 15.0));
    assert!(approx(g.wrap_value(5.0), 15.0));
    assert_eq!(g.wrap_value(f64::NAN), 10.0);
}

#[test]
fn angle_to_value_maps_linearly_in_continuous_mode() {
    let g = continuous();
    assert!(approx(g.angle_to_value(FRAC_PI_2), 12.0));
    assert!(approx(g.angle_to_value(FRAC_PI_4 / 3.0), 2.0));
    // No integer snapping without a step.
    assert!(approx(g.angle_to_value(g.value_to_angle(12.3)), 12.3));
}

#[test]
fn angle_to_value_rounds_to_step() {
    let g = Geometry::new(0.0, 48.0, Some(2.0));
    let a = g.value_to_angle(12.9);
    assert_eq!(g.angle_to_value(a), 12.0);
    let a = g.value_to_angle(13.1);
    assert_eq!(g.angle_to_value(a), 14.0);
}

#[test]
fn angle_to_value_normalizes_input() {
    let g = day();
    assert_eq!(g.angle_to_value(TAU + FRAC_PI_2), 12.0);
    assert_eq!(g.angle_to_value(-FRAC_PI_2), 36.0);
}

#[test]
fn quantize_snaps_near_max_to_min() {
    let g = day();
    assert_eq!(g.quantize(47.7), 0.0);
    assert_eq!(g.quantize(47.2), 47.0);
}

#[test]
fn quantize_counts_steps_from_min() {
    let g = Geometry::new(1.0, 13.0, Some(2.0));
    assert_eq!(g.quantize(2.2), 3.0);
    assert_eq!(g.quantize(1.4), 1.0);
}

#[test]
fn roundtrip_recovers_stepped_values() {
    let g = day();
    for v in 0..48 {
        let v = f64::from(v);
        assert_eq!(g.angle_to_value(g.value_to_angle(v)), v);
    }
}

// =============================================================
// Geometry: adjust_angle
// =============================================================

#[test]
fn adjust_angle_lands_on_step_boundary() {
    let g = day();
    let one_step = TAU / 48.0;
    assert!(approx(g.adjust_angle(one_step * 3.4), one_step * 3.0));
    assert!(approx(g.adjust_angle(one_step * 3.6), one_step * 4.0));
}

#[test]
fn adjust_angle_is_idempotent() {
    let g = Geometry::new(0.0, 10.0, Some(2.8));
    for i in 0..200 {
        let a = f64::from(i) * 0.037 - 1.0;
        let once = g.adjust_angle(a);
        assert_eq!(g.adjust_angle(once), once, "angle {a}");
    }
}

#[test]
fn adjust_angle_continuous_only_normalizes() {
    let g = continuous();
    assert!(approx(g.adjust_angle(1.234), 1.234));
    assert!(approx(g.adjust_angle(-0.5), TAU - 0.5));
}

#[test]
fn adjust_angle_full_turn_is_zero() {
    assert_eq!(day().adjust_angle(TAU), 0.0);
    assert_eq!(day().adjust_angle(day().value_to_angle(48.0)), 0.0);
}

// =============================================================
// Geometry: step_angle
// =============================================================

#[test]
fn step_angle_matches_one_step() {
    assert!(approx(day().step_angle(1.0), TAU / 48.0));
    assert!(approx(day().step_angle(-10.0), -10.0 * TAU / 48.0));
}

#[test]
fn step_angle_continuous_is_one_percent_of_turn() {
    assert!(approx(continuous().step_angle(1.0), PI / 50.0));
}
