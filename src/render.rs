//! Rendering: builds the full draw pass for the current angles.
//!
//! A pass is a [`Scene`], a flat list of [`DrawOp`]s in paint order: clear,
//! rail, ticks, bar, handles. Building a scene touches no drawing backend and
//! mutates nothing, so two calls with the same inputs produce identical
//! scenes. The browser backend in [`crate::web`] replays the ops onto a 2D
//! context.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::color::with_alpha;
use crate::config::SliderConfig;
use crate::consts::{ANGLE_EPSILON, BAR_GRADIENT_START_ALPHA, HANDLE_DRAW_PAD_PX, TAU, TICK_BASE_RATIO};
use crate::geometry::{Geometry, point_on_ring, to_canvas_angle};
use crate::surface::{Orientation, Point, SurfaceDescriptor};

/// How a stroke is colored.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(String),
    /// Linear gradient between two points with `(offset, color)` stops.
    LinearGradient { start: Point, end: Point, stops: Vec<(f64, String)> },
}

/// One drawing primitive. Coordinates are CSS pixels; angles are canvas-frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Clear the whole surface.
    Clear { width: f64, height: f64 },
    /// Stroke a clockwise arc.
    StrokeArc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        line_width: f64,
        paint: Paint,
        round_cap: bool,
    },
    /// Stroke a straight segment.
    Line { from: Point, to: Point, line_width: f64, color: String },
    /// Fill a full circle.
    FillCircle { center: Point, radius: f64, color: String },
}

/// A complete draw pass in paint order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub ops: Vec<DrawOp>,
}

impl Scene {
    /// Whether the pass contains the selection bar.
    #[must_use]
    pub fn has_bar(&self) -> bool {
        self.ops.iter().any(|op| matches!(op, DrawOp::StrokeArc { round_cap: true, .. }))
    }

    /// Number of tick segments in the pass.
    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Line { .. })).count()
    }
}

/// Tick lengths and widths for one orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSizes {
    pub major_length: f64,
    pub minor_length: f64,
    pub major_width: f64,
    pub minor_width: f64,
}

impl TickSizes {
    /// Landscape viewports get shorter, thinner ticks than portrait ones.
    #[must_use]
    pub fn for_ring(radius: f64, orientation: Orientation) -> Self {
        let base = radius * TICK_BASE_RATIO;
        match orientation {
            Orientation::Landscape => Self {
                major_length: base * 1.5,
                minor_length: base,
                major_width: 1.5,
                minor_width: 0.8,
            },
            Orientation::Portrait => Self {
                major_length: base * 2.0,
                minor_length: base * 1.5,
                major_width: 2.0,
                minor_width: 1.0,
            },
        }
    }
}

/// Placement of the ring on a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingLayout {
    pub center: Point,
    /// Radius of the rail/bar centerline and of the handle centers.
    pub track_radius: f64,
    /// Radius at which ticks end, just inside the rail.
    pub tick_outer_radius: f64,
    pub rail_width: f64,
    pub bar_width: f64,
}

impl RingLayout {
    #[must_use]
    pub fn new(config: &SliderConfig, descriptor: &SurfaceDescriptor) -> Self {
        let rail_width = config.stroke_width + config.stroke_padding * 2.0;
        Self {
            center: descriptor.center(),
            track_radius: config.radius - config.stroke_width / 2.0 - config.stroke_padding,
            tick_outer_radius: config.radius - rail_width,
            rail_width,
            bar_width: config.stroke_width,
        }
    }

    /// Center of the handle at a geometry angle.
    #[must_use]
    pub fn handle_center(&self, angle: f64) -> Point {
        point_on_ring(self.center, self.track_radius, angle)
    }
}

/// Build the draw pass for the given angles.
#[must_use]
pub fn build_scene(
    config: &SliderConfig,
    geometry: &Geometry,
    angle_from: f64,
    angle_to: f64,
    descriptor: &SurfaceDescriptor,
) -> Scene {
    let layout = RingLayout::new(config, descriptor);
    let mut ops = Vec::with_capacity((config.tick_count as usize).saturating_add(5));

    ops.push(DrawOp::Clear { width: descriptor.css_width, height: descriptor.css_height });
    ops.push(rail(config, &layout));
    push_ticks(&mut ops, config, &layout, descriptor.orientation);
    if let Some(bar) = bar(config, geometry, &layout, angle_from, angle_to) {
        ops.push(bar);
    }
    ops.push(handle(config, &layout, angle_from));
    ops.push(handle(config, &layout, angle_to));

    Scene { ops }
}

fn rail(config: &SliderConfig, layout: &RingLayout) -> DrawOp {
    DrawOp::StrokeArc {
        center: layout.center,
        radius: layout.track_radius,
        start_angle: 0.0,
        end_angle: TAU,
        line_width: layout.rail_width,
        paint: Paint::Solid(config.colors.rail.clone()),
        round_cap: false,
    }
}

fn push_ticks(ops: &mut Vec<DrawOp>, config: &SliderConfig, layout: &RingLayout, orientation: Orientation) {
    let sizes = TickSizes::for_ring(config.radius, orientation);
    let count = f64::from(config.tick_count);

    for i in 0..config.tick_count {
        let angle = to_canvas_angle(f64::from(i) / count * TAU);
        let is_major = i % config.major_tick_every == 0;
        let (length, width) = if is_major {
            (sizes.major_length, sizes.major_width)
        } else {
            (sizes.minor_length, sizes.minor_width)
        };

        let outer = layout.tick_outer_radius - 1.0;
        let inner = layout.tick_outer_radius - length;
        let (sin, cos) = angle.sin_cos();
        ops.push(DrawOp::Line {
            from: Point::new(layout.center.x + cos * inner, layout.center.y + sin * inner),
            to: Point::new(layout.center.x + cos * outer, layout.center.y + sin * outer),
            line_width: width,
            color: config.colors.tick.clone(),
        });
    }
}

/// The selection arc, or `None` when it would be degenerate.
///
/// A zero-length arc would otherwise render as a full circle.
#[allow(clippy::float_cmp)]
fn bar(
    config: &SliderConfig,
    geometry: &Geometry,
    layout: &RingLayout,
    angle_from: f64,
    angle_to: f64,
) -> Option<DrawOp> {
    if geometry.angle_to_value(angle_from) == geometry.angle_to_value(angle_to) {
        return None;
    }
    let start_angle = to_canvas_angle(angle_from);
    let end_angle = to_canvas_angle(angle_to);
    if (start_angle - end_angle).abs() < ANGLE_EPSILON {
        return None;
    }

    // Fixed top-right to bottom-left axis, independent of the arc's position.
    let r = layout.track_radius;
    let c = layout.center;
    let paint = Paint::LinearGradient {
        start: Point::new(c.x + r, c.y - r),
        end: Point::new(c.x - r, c.y + r),
        stops: vec![
            (0.0, with_alpha(&config.colors.bar, BAR_GRADIENT_START_ALPHA)),
            (1.0, config.colors.bar.clone()),
        ],
    };

    Some(DrawOp::StrokeArc {
        center: c,
        radius: r,
        start_angle,
        end_angle,
        line_width: layout.bar_width,
        paint,
        round_cap: true,
    })
}

fn handle(config: &SliderConfig, layout: &RingLayout, angle: f64) -> DrawOp {
    DrawOp::FillCircle {
        center: layout.handle_center(angle),
        radius: config.handle_radius + HANDLE_DRAW_PAD_PX,
        color: config.colors.handle.clone(),
    }
}
