use tracing::{debug, warn};

use crate::config::{NotifyMode, SliderConfig};
use crate::consts::{
    CONTINUOUS_STEP_RAD, NOTIFY_THRESHOLD_SLACK, SHIFT_MULTIPLIER, STEPLESS_NOTIFY_DELTA, WHEEL_WEIGHT,
};
use crate::error::{ConfigError, SliderError};
use crate::geometry::{Geometry, angular_distance, arc_length, arc_midpoint, geometry_angle_of, signed_angle_delta};
use crate::hit::{DragTarget, HandleId, hit_test};
use crate::input::{Drag, InputEvent, InputSource, InputState, Key, LISTENERS, Modifiers, SubscriptionId, WheelDelta};
use crate::render::{RingLayout, Scene, build_scene};
use crate::surface::{Point, Surface, SurfaceDescriptor};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// A `{from, to}` value pair as reported to the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderValues {
    pub from: f64,
    pub to: f64,
}

/// Actions returned from input handlers for the wrapper (or host) to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Angles changed; the surface should be redrawn.
    RenderNeeded,
    /// A pointer-down grabbed a handle or the bar.
    DragStarted(DragTarget),
    /// The active drag was released.
    DragEnded,
    /// Values changed since the last notification.
    Change(SliderValues),
    /// A discrete gesture completed.
    Finish(SliderValues),
}

/// Core slider state: all logic that doesn't depend on a drawing backend.
///
/// Separated from [`Slider`] so it can be tested without a surface or DOM.
/// The two angles are the only authoritative state; values are derived.
#[derive(Debug, Clone)]
pub struct SliderCore {
    config: SliderConfig,
    geometry: Geometry,
    descriptor: SurfaceDescriptor,
    layout: RingLayout,
    angle_from: f64,
    angle_to: f64,
    pub input: InputState,
    focused: bool,
    last_notified: SliderValues,
}

impl SliderCore {
    /// Validate `config` and place both handles at its initial values.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] when the configuration is unusable.
    pub fn new(config: SliderConfig, descriptor: SurfaceDescriptor) -> Result<Self, ConfigError> {
        for warning in config.validate()? {
            warn!(%warning, "slider configuration warning");
        }
        let geometry = Geometry::from_config(&config);
        let layout = RingLayout::new(&config, &descriptor);
        let mut core = Self {
            config,
            geometry,
            descriptor,
            layout,
            angle_from: 0.0,
            angle_to: 0.0,
            input: InputState::Idle,
            focused: false,
            last_notified: SliderValues { from: 0.0, to: 0.0 },
        };
        core.reset_angles();
        Ok(core)
    }

    fn reset_angles(&mut self) {
        self.angle_from = self.geometry.adjust_angle(self.geometry.value_to_angle(self.config.from));
        self.angle_to = self.geometry.adjust_angle(self.geometry.value_to_angle(self.config.to));
        self.last_notified = self.values();
    }

    // --- Data inputs ---

    /// Replace the configuration wholesale and re-seed the angles from it.
    ///
    /// An in-flight drag is not reconciled: it keeps its captured context.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] and leaves the current state untouched
    /// when the new configuration is unusable.
    pub fn reconfigure(&mut self, config: SliderConfig) -> Result<Vec<Action>, ConfigError> {
        for warning in config.validate()? {
            warn!(%warning, "slider configuration warning");
        }
        self.geometry = Geometry::from_config(&config);
        self.layout = RingLayout::new(&config, &self.descriptor);
        self.config = config;
        self.reset_angles();
        debug!(min = self.geometry.min(), max = self.geometry.max(), "slider reconfigured");
        Ok(vec![Action::RenderNeeded])
    }

    /// Update the surface size and density.
    pub fn set_descriptor(&mut self, descriptor: SurfaceDescriptor) -> Vec<Action> {
        self.descriptor = descriptor;
        self.layout = RingLayout::new(&self.config, &descriptor);
        vec![Action::RenderNeeded]
    }

    /// Move both handles to the given values. Does not notify.
    pub fn set_values(&mut self, from: f64, to: f64) -> Vec<Action> {
        self.angle_from = self.geometry.adjust_angle(self.geometry.value_to_angle(from));
        self.angle_to = self.geometry.adjust_angle(self.geometry.value_to_angle(to));
        self.last_notified = self.values();
        vec![Action::RenderNeeded]
    }

    // --- Queries ---

    /// Values derived from the current angles.
    #[must_use]
    pub fn values(&self) -> SliderValues {
        SliderValues {
            from: self.geometry.angle_to_value(self.angle_from),
            to: self.geometry.angle_to_value(self.angle_to),
        }
    }

    /// `(angle_from, angle_to)` in the geometry frame.
    #[must_use]
    pub fn angles(&self) -> (f64, f64) {
        (self.angle_from, self.angle_to)
    }

    #[must_use]
    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    #[must_use]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    #[must_use]
    pub fn layout(&self) -> &RingLayout {
        &self.layout
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    #[must_use]
    pub fn drag_target(&self) -> Option<DragTarget> {
        self.input.target()
    }

    /// The draw pass for the current state.
    #[must_use]
    pub fn scene(&self) -> Scene {
        build_scene(&self.config, &self.geometry, self.angle_from, self.angle_to, &self.descriptor)
    }

    // --- Input events ---

    /// Route a host-neutral event to its handler.
    pub fn handle(&mut self, event: InputEvent) -> Vec<Action> {
        match event {
            InputEvent::PointerDown(pt) => self.on_pointer_down(pt),
            InputEvent::PointerMove(pt) => self.on_pointer_move(pt),
            InputEvent::PointerUp => self.on_pointer_up(),
            InputEvent::DoubleClick(pt) => self.on_double_click(pt),
            InputEvent::Wheel(delta) => self.on_wheel(delta),
            InputEvent::KeyDown { key, modifiers } => self.on_key_down(&key, modifiers),
            InputEvent::Focus => {
                self.focused = true;
                Vec::new()
            }
            InputEvent::Blur => {
                self.focused = false;
                Vec::new()
            }
        }
    }

    /// Start a drag on whatever is under `pt`: from-handle, to-handle, then bar.
    ///
    /// Ignored while a drag is already active.
    pub fn on_pointer_down(&mut self, pt: Point) -> Vec<Action> {
        if self.input.is_dragging() {
            return Vec::new();
        }
        let Some(target) = hit_test(pt, &self.layout, self.config.handle_radius, self.angle_from, self.angle_to)
        else {
            return Vec::new();
        };

        let drag = match target {
            DragTarget::Handle(handle) => Drag::Handle(handle),
            DragTarget::Bar => {
                let Some(angle) = geometry_angle_of(self.layout.center, pt) else {
                    return Vec::new();
                };
                Drag::Bar {
                    offset: signed_angle_delta(angle, arc_midpoint(self.angle_from, self.angle_to)),
                    arc_length: arc_length(self.angle_from, self.angle_to),
                }
            }
        };
        self.input = InputState::Dragging(drag);
        debug!(?target, "drag started");
        vec![Action::DragStarted(target)]
    }

    /// Follow the pointer with the dragged handle(s).
    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        let InputState::Dragging(drag) = self.input else {
            return Vec::new();
        };
        let Some(angle) = geometry_angle_of(self.layout.center, pt) else {
            return Vec::new();
        };

        match drag {
            Drag::Handle(HandleId::From) => self.angle_from = self.geometry.adjust_angle(angle),
            Drag::Handle(HandleId::To) => self.angle_to = self.geometry.adjust_angle(angle),
            Drag::Bar { offset, arc_length } => {
                let center = angle - offset;
                self.angle_from = self.geometry.adjust_angle(center - arc_length / 2.0);
                // Anchoring on the adjusted start keeps the span exact on the step grid.
                self.angle_to = self.geometry.adjust_angle(self.angle_from + arc_length);
            }
        }

        let mut actions = vec![Action::RenderNeeded];
        if let Some(change) = self.throttled_change() {
            actions.push(change);
        }
        actions
    }

    /// Release the active drag, if any.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        if !self.input.is_dragging() {
            return Vec::new();
        }
        self.input = InputState::Idle;
        debug!("drag ended");
        let mut actions = vec![Action::DragEnded];
        self.complete_gesture(&mut actions);
        actions
    }

    /// Move the handle nearest to the clicked angle there. Ties go to "from".
    pub fn on_double_click(&mut self, pt: Point) -> Vec<Action> {
        let Some(angle) = geometry_angle_of(self.layout.center, pt) else {
            return Vec::new();
        };
        let angle = self.geometry.adjust_angle(angle);
        if angular_distance(angle, self.angle_from) <= angular_distance(angle, self.angle_to) {
            self.angle_from = angle;
        } else {
            self.angle_to = angle;
        }
        let mut actions = vec![Action::RenderNeeded];
        self.complete_gesture(&mut actions);
        actions
    }

    /// Scroll down spreads the handles apart, scroll up draws them together.
    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        if !delta.dy.is_finite() || delta.dy == 0.0 {
            return Vec::new();
        }
        let mut spread = WHEEL_WEIGHT * delta.dy * CONTINUOUS_STEP_RAD;
        if self.geometry.step().is_some() {
            // Whole steps only, and never less than one per tick.
            let mut steps = (spread / self.geometry.step_angle(1.0)).round();
            if steps == 0.0 {
                steps = delta.dy.signum();
            }
            spread = self.geometry.step_angle(steps);
        }

        self.angle_from = self.geometry.adjust_angle(self.angle_from - spread);
        self.angle_to = self.geometry.adjust_angle(self.angle_to + spread);
        let mut actions = vec![Action::RenderNeeded];
        self.complete_gesture(&mut actions);
        actions
    }

    /// Arrow keys while focused: Left/Right translate, Up/Down contract/expand.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if !self.focused {
            return Vec::new();
        }
        let Some(arrow) = key.arrow() else {
            return Vec::new();
        };

        let (direction, scale) = arrow.motion();
        let count = if modifiers.shift { direction * SHIFT_MULTIPLIER } else { direction };
        let delta = self.geometry.step_angle(count);
        if scale {
            self.angle_from = self.geometry.adjust_angle(self.angle_from - delta);
        } else {
            self.angle_from = self.geometry.adjust_angle(self.angle_from + delta);
        }
        self.angle_to = self.geometry.adjust_angle(self.angle_to + delta);

        let mut actions = vec![Action::RenderNeeded];
        self.complete_gesture(&mut actions);
        actions
    }

    // --- Notification ---

    fn notify_threshold(&self) -> f64 {
        self.geometry.step().unwrap_or(STEPLESS_NOTIFY_DELTA)
    }

    /// A change notification during a drag, when either value moved far enough.
    fn throttled_change(&mut self) -> Option<Action> {
        if self.config.notify != NotifyMode::Continuous {
            return None;
        }
        let values = self.values();
        let threshold = self.notify_threshold() * (1.0 - NOTIFY_THRESHOLD_SLACK);
        let moved = (values.from - self.last_notified.from).abs() >= threshold
            || (values.to - self.last_notified.to).abs() >= threshold;
        if !moved {
            return None;
        }
        self.last_notified = values;
        Some(Action::Change(values))
    }

    /// Flush any unreported change, then report the finished gesture.
    fn complete_gesture(&mut self, actions: &mut Vec<Action>) {
        let values = self.values();
        if values != self.last_notified {
            self.last_notified = values;
            actions.push(Action::Change(values));
        }
        actions.push(Action::Finish(values));
    }
}

type Callback = Box<dyn FnMut(SliderValues)>;

/// The full slider: a [`SliderCore`] bound to a drawing surface and an input source.
///
/// Construction attaches every listener in [`LISTENERS`] and draws once.
/// [`Slider::destroy`] (also run on drop) detaches them all.
pub struct Slider<S: Surface, L: InputSource> {
    core: SliderCore,
    surface: S,
    listeners: L,
    subscriptions: Vec<SubscriptionId>,
    on_change: Option<Callback>,
    on_finish: Option<Callback>,
    destroyed: bool,
}

impl<S: Surface, L: InputSource> Slider<S, L> {
    /// Bind a slider to `surface`, validate `config`, attach listeners and draw.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration, a refused listener, or a failing
    /// first draw. Listeners attached before the failure are released.
    pub fn new(surface: S, listeners: L, config: SliderConfig) -> Result<Self, SliderError> {
        let core = SliderCore::new(config, surface.descriptor())?;
        let mut slider = Self {
            core,
            surface,
            listeners,
            subscriptions: Vec::with_capacity(LISTENERS.len()),
            on_change: None,
            on_finish: None,
            destroyed: false,
        };

        for kind in LISTENERS {
            let id = slider.listeners.subscribe(kind)?;
            slider.subscriptions.push(id);
        }
        let scene = slider.core.scene();
        slider.surface.present(&scene)?;
        Ok(slider)
    }

    /// Replace the configuration and redraw.
    ///
    /// # Errors
    ///
    /// Returns the configuration error; the previous configuration stays active.
    pub fn set_config(&mut self, config: SliderConfig) -> Result<(), SliderError> {
        if self.destroyed {
            debug!("set_config on destroyed slider ignored");
            return Ok(());
        }
        let mut actions = self.core.set_descriptor(self.surface.descriptor());
        actions.extend(self.core.reconfigure(config)?);
        self.apply(actions);
        Ok(())
    }

    /// Re-read the surface descriptor (after a resize) and redraw.
    pub fn resize(&mut self) {
        if self.destroyed {
            return;
        }
        let actions = self.core.set_descriptor(self.surface.descriptor());
        self.apply(actions);
    }

    /// Move both handles to the given values and redraw. Does not notify.
    pub fn set_values(&mut self, from: f64, to: f64) {
        if self.destroyed {
            debug!("set_values on destroyed slider ignored");
            return;
        }
        let actions = self.core.set_values(from, to);
        self.apply(actions);
    }

    #[must_use]
    pub fn values(&self) -> SliderValues {
        self.core.values()
    }

    /// Register the change callback, replacing any previous one.
    pub fn set_change_callback(&mut self, callback: impl FnMut(SliderValues) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Register the finish callback, replacing any previous one.
    pub fn set_finish_callback(&mut self, callback: impl FnMut(SliderValues) + 'static) {
        self.on_finish = Some(Box::new(callback));
    }

    /// Feed one input event through the state machine.
    ///
    /// Returns whether the slider consumed the event; the host uses this to
    /// suppress default browser handling.
    pub fn dispatch(&mut self, event: InputEvent) -> bool {
        if self.destroyed {
            return false;
        }
        let actions = self.core.handle(event);
        let consumed = !actions.is_empty();
        self.apply(actions);
        consumed
    }

    /// Detach every listener and stop reacting to input. Idempotent.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        for id in self.subscriptions.drain(..) {
            self.listeners.unsubscribe(id);
        }
        self.core.input = InputState::Idle;
        self.on_change = None;
        self.on_finish = None;
        debug!("slider destroyed");
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    #[must_use]
    pub fn core(&self) -> &SliderCore {
        &self.core
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn listeners(&self) -> &L {
        &self.listeners
    }

    fn apply(&mut self, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::RenderNeeded => self.redraw(),
                Action::Change(values) => {
                    if let Some(callback) = self.on_change.as_mut() {
                        callback(values);
                    }
                }
                Action::Finish(values) => {
                    if let Some(callback) = self.on_finish.as_mut() {
                        callback(values);
                    }
                }
                Action::DragStarted(_) | Action::DragEnded => {}
            }
        }
    }

    fn redraw(&mut self) {
        let scene = self.core.scene();
        if let Err(error) = self.surface.present(&scene) {
            warn!(%error, "slider redraw failed");
        }
    }
}

impl<S: Surface, L: InputSource> Drop for Slider<S, L> {
    fn drop(&mut self) {
        self.destroy();
    }
}
