//! Geometry model: value/angle mapping, step quantization and arc math.
//!
//! Two angle frames exist. The geometry frame stores state: `0` is the
//! minimum value and angles grow clockwise on screen. The canvas frame is what
//! `atan2` and the 2D context use: `0` points to 3 o'clock. The geometry frame
//! is the canvas frame rotated by a quarter turn so the minimum renders at the
//! top. Conversions happen only when drawing or hit-testing.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::f64::consts::{FRAC_PI_2, PI};

use crate::config::SliderConfig;
use crate::consts::{CONTINUOUS_STEP_RAD, TAU};
use crate::surface::Point;

/// Relative tolerance for treating a quantized value as the range maximum.
const MAX_SNAP_TOLERANCE: f64 = 1e-9;

/// Wrap any angle into `[0, 2π)`. Non-finite input maps to `0`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Clockwise arc length from `from` to `to`, in `[0, 2π)`.
#[must_use]
pub fn arc_length(from: f64, to: f64) -> f64 {
    normalize_angle(to - from)
}

/// Shortest angular distance between two angles, in `[0, π]`.
#[must_use]
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let delta = normalize_angle(a - b);
    delta.min(TAU - delta)
}

/// Signed shortest delta from `start` to `current`, in `(-π, π]`.
#[must_use]
pub fn signed_angle_delta(current: f64, start: f64) -> f64 {
    let delta = normalize_angle(current - start);
    if delta > PI { delta - TAU } else { delta }
}

/// Whether `angle` lies on the clockwise arc `from..=to`.
///
/// All three angles must share a frame and normalization. When `from > to`
/// the arc wraps through zero.
#[must_use]
pub fn is_angle_between(angle: f64, from: f64, to: f64) -> bool {
    if from <= to {
        angle >= from && angle <= to
    } else {
        angle >= from || angle <= to
    }
}

/// Midpoint of the clockwise arc `from..to`, in `[0, 2π)`.
#[must_use]
pub fn arc_midpoint(from: f64, to: f64) -> f64 {
    if from <= to {
        (from + to) / 2.0
    } else {
        normalize_angle((from + to + TAU) / 2.0)
    }
}

/// Geometry angle to canvas angle.
#[must_use]
pub fn to_canvas_angle(angle: f64) -> f64 {
    angle - FRAC_PI_2
}

/// Canvas angle to geometry angle.
#[must_use]
pub fn from_canvas_angle(angle: f64) -> f64 {
    angle + FRAC_PI_2
}

/// Canvas-frame angle of `point` around `center`, or `None` when the point is
/// the center itself.
#[must_use]
pub fn canvas_angle_of(center: Point, point: Point) -> Option<f64> {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    if dx.abs() < f64::EPSILON && dy.abs() < f64::EPSILON {
        return None;
    }
    Some(dy.atan2(dx))
}

/// Normalized geometry-frame angle of `point` around `center`.
#[must_use]
pub fn geometry_angle_of(center: Point, point: Point) -> Option<f64> {
    canvas_angle_of(center, point).map(|a| normalize_angle(from_canvas_angle(a)))
}

/// Point on a circle of `radius` around `center` at a geometry angle.
#[must_use]
pub fn point_on_ring(center: Point, radius: f64, angle: f64) -> Point {
    let canvas = to_canvas_angle(angle);
    Point::new(center.x + canvas.cos() * radius, center.y + canvas.sin() * radius)
}

/// Value domain and quantization for one configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    min: f64,
    max: f64,
    step: Option<f64>,
}

impl Geometry {
    /// Build from raw bounds. Callers validate (`max > min`, positive step) first.
    #[must_use]
    pub fn new(min: f64, max: f64, step: Option<f64>) -> Self {
        Self { min, max, step }
    }

    #[must_use]
    pub fn from_config(config: &SliderConfig) -> Self {
        Self::new(config.min, config.max, config.step)
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn step(&self) -> Option<f64> {
        self.step
    }

    #[must_use]
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Wrap a value into `[min, max]`.
    ///
    /// Values below `min` wrap around from `max`; values above `max` wrap by
    /// modulo against `max`, falling back to a range wrap if that still lands
    /// outside the domain.
    #[must_use]
    pub fn wrap_value(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.min;
        }
        if value > self.max {
            let folded = value % self.max;
            if folded >= self.min && folded <= self.max {
                return folded;
            }
            return self.wrap_below(value);
        }
        if value < self.min {
            return self.wrap_below(value);
        }
        value
    }

    fn wrap_below(&self, value: f64) -> f64 {
        let wrapped = self.min + (value - self.min).rem_euclid(self.range());
        if wrapped >= self.max { self.min } else { wrapped }
    }

    /// Map a value to a geometry angle. `max` maps to a full turn.
    #[must_use]
    pub fn value_to_angle(&self, value: f64) -> f64 {
        let value = self.wrap_value(value);
        (value - self.min) / self.range() * TAU
    }

    /// Map a geometry angle to a value, quantized to the step grid when stepped.
    #[must_use]
    pub fn angle_to_value(&self, angle: f64) -> f64 {
        let ratio = normalize_angle(angle) / TAU;
        self.quantize(self.min + ratio * self.range())
    }

    /// Round a value to the nearest step counted from `min`.
    ///
    /// A value that rounds up to `max` (or past it, when the step does not
    /// divide the range) snaps to `min`: both sit at the same ring position.
    #[must_use]
    pub fn quantize(&self, value: f64) -> f64 {
        let Some(step) = self.step else {
            return value;
        };
        let stepped = self.min + step * ((value - self.min) / step).round();
        if stepped >= self.max - step * MAX_SNAP_TOLERANCE {
            self.min
        } else {
            stepped
        }
    }

    /// Normalize an angle and, when stepped, land it exactly on a step boundary.
    #[must_use]
    pub fn adjust_angle(&self, angle: f64) -> f64 {
        let angle = normalize_angle(angle);
        if self.step.is_none() {
            return angle;
        }
        normalize_angle(self.value_to_angle(self.angle_to_value(angle)))
    }

    /// Angle spanned by `count` steps. Continuous mode uses a fixed 1% of a turn.
    #[must_use]
    pub fn step_angle(&self, count: f64) -> f64 {
        match self.step {
            Some(step) => count * step / self.range() * TAU,
            None => count * CONTINUOUS_STEP_RAD,
        }
    }
}
