//! Hit-testing against the two handles and the bar.
//!
//! Handles are tested by distance to their rendered centers; the bar by the
//! pointer's angle alone. Order is from-handle, to-handle, bar: the first
//! match wins, so overlapping handles always resolve to "from".

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::HANDLE_HIT_SLOP_PX;
use crate::geometry::{geometry_angle_of, is_angle_between};
use crate::render::RingLayout;
use crate::surface::Point;

/// One of the two handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleId {
    From,
    To,
}

/// What a pointer-down grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Handle(HandleId),
    Bar,
}

/// Whether `pt` is within the handle's radius plus slop.
#[must_use]
pub fn hit_handle(pt: Point, layout: &RingLayout, handle_radius: f64, angle: f64) -> bool {
    pt.distance(layout.handle_center(angle)) <= handle_radius + HANDLE_HIT_SLOP_PX
}

/// Whether the pointer's angle falls on the arc `angle_from..=angle_to`.
#[must_use]
pub fn hit_bar(pt: Point, layout: &RingLayout, angle_from: f64, angle_to: f64) -> bool {
    geometry_angle_of(layout.center, pt).is_some_and(|angle| is_angle_between(angle, angle_from, angle_to))
}

/// Resolve what a pointer-down at `pt` grabs, if anything.
#[must_use]
pub fn hit_test(pt: Point, layout: &RingLayout, handle_radius: f64, angle_from: f64, angle_to: f64) -> Option<DragTarget> {
    if hit_handle(pt, layout, handle_radius, angle_from) {
        return Some(DragTarget::Handle(HandleId::From));
    }
    if hit_handle(pt, layout, handle_radius, angle_to) {
        return Some(DragTarget::Handle(HandleId::To));
    }
    if hit_bar(pt, layout, angle_from, angle_to) {
        return Some(DragTarget::Bar);
    }
    None
}
