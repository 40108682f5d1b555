//! Shared numeric constants for the slider crate.

use std::f64::consts::PI;

// ── Math ────────────────────────────────────────────────────────

/// A full turn in radians.
pub const TAU: f64 = 2.0 * PI;

/// Canvas angles closer than this are treated as the same position.
pub const ANGLE_EPSILON: f64 = 0.001;

// ── Hit-testing ─────────────────────────────────────────────────

/// Extra slop around a handle's radius that still counts as a hit, in CSS pixels.
pub const HANDLE_HIT_SLOP_PX: f64 = 5.0;

// ── Rendering ───────────────────────────────────────────────────

/// Added to the configured handle radius when drawing, in CSS pixels.
pub const HANDLE_DRAW_PAD_PX: f64 = 0.5;

/// Tick length base as a fraction of the ring radius.
pub const TICK_BASE_RATIO: f64 = 0.03;

/// Alpha of the bar gradient at its faint end.
pub const BAR_GRADIENT_START_ALPHA: f64 = 0.5;

// ── Input ───────────────────────────────────────────────────────

/// Angular increment per unit of input in continuous mode (1% of a turn).
pub const CONTINUOUS_STEP_RAD: f64 = PI / 50.0;

/// Key-step multiplier while Shift is held.
pub const SHIFT_MULTIPLIER: f64 = 10.0;

/// Scale applied to the wheel's vertical delta before converting to radians.
pub const WHEEL_WEIGHT: f64 = 0.01;

// ── Configuration / notification ────────────────────────────────

/// Minimum number of steps a stepped configuration must span.
pub const MIN_STEPS: f64 = 3.0;

/// Minimum value change that triggers a continuous notification without a step.
pub const STEPLESS_NOTIFY_DELTA: f64 = 0.1;

/// Relative slack on the notification threshold. One step of `0.1` between
/// quantized values can come out as `0.09999…`.
pub const NOTIFY_THRESHOLD_SLACK: f64 = 1e-9;

/// Largest accepted `tickCount`.
pub const MAX_TICK_COUNT: u32 = 3600;
