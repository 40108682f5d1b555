//! Browser bindings.
//!
//! This module is the only place that touches `web_sys`. [`CanvasSurface`]
//! paints a [`Scene`] onto a `<canvas>` 2D context, [`DomInputSource`]
//! attaches DOM listeners and translates events into [`InputEvent`]s, and
//! [`WebSlider`] is the `wasm-bindgen` export tying both to a [`Slider`].
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`
//! internally and surface as [`SliderError`] at the module boundary.

use std::cell::{Cell, RefCell, RefMut};
use std::rc::{Rc, Weak};

use js_sys::Function;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, CanvasRenderingContext2d, Document, Event, EventTarget, HtmlCanvasElement,
    KeyboardEvent, MouseEvent, TouchEvent, WheelEvent,
};

use crate::config::SliderConfig;
use crate::consts::TAU;
use crate::engine::{Slider, SliderValues};
use crate::error::SliderError;
use crate::input::{InputEvent, InputSource, Key, ListenScope, ListenerKind, Modifiers, SubscriptionId, WheelDelta};
use crate::render::{DrawOp, Paint, Scene};
use crate::surface::{Orientation, Point, Surface, SurfaceDescriptor};

fn js_error(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn to_js(error: SliderError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn device_pixel_ratio() -> f64 {
    web_sys::window().map_or(1.0, |window| window.device_pixel_ratio())
}

/// `innerWidth` and `innerHeight` of the window, when both are readable.
fn viewport_size() -> Option<(f64, f64)> {
    let window = web_sys::window()?;
    match (window.inner_width(), window.inner_height()) {
        (Ok(width), Ok(height)) => Some((width.as_f64()?, height.as_f64()?)),
        _ => None,
    }
}

// =============================================================
// Surface
// =============================================================

/// A `<canvas>` element with its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    css_width: f64,
    css_height: f64,
}

impl CanvasSurface {
    /// Acquire the 2D context, make the canvas focusable and size its
    /// backing store for the device pixel ratio.
    ///
    /// # Errors
    ///
    /// Returns [`SliderError::MissingContext`] when the canvas has no 2D
    /// context, or [`SliderError::Render`] when it cannot be resized.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SliderError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|err| SliderError::Render(js_error(&err)))?
            .ok_or(SliderError::MissingContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SliderError::MissingContext)?;
        canvas.set_tab_index(0);

        let mut surface = Self { canvas, ctx, css_width: 0.0, css_height: 0.0 };
        surface.remeasure()?;
        Ok(surface)
    }

    /// Re-read the element's CSS size and resize the backing store.
    ///
    /// # Errors
    ///
    /// Returns [`SliderError::Render`] when the element style cannot be set.
    pub fn remeasure(&mut self) -> Result<(), SliderError> {
        let rect = self.canvas.get_bounding_client_rect();
        let (width, height) = if rect.width() > 0.0 && rect.height() > 0.0 {
            (rect.width(), rect.height())
        } else {
            (f64::from(self.canvas.width()), f64::from(self.canvas.height()))
        };
        self.css_width = width;
        self.css_height = height;

        let descriptor = self.descriptor();
        self.canvas.set_width(backing_px(descriptor.backing_width()));
        self.canvas.set_height(backing_px(descriptor.backing_height()));

        // Pin the CSS size so the larger backing store does not grow the element.
        let style = self.canvas.style();
        style
            .set_property("width", &format!("{width}px"))
            .map_err(|err| SliderError::Render(js_error(&err)))?;
        style
            .set_property("height", &format!("{height}px"))
            .map_err(|err| SliderError::Render(js_error(&err)))?;
        Ok(())
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn backing_px(size: f64) -> u32 {
    size.max(0.0) as u32
}

impl Surface for CanvasSurface {
    fn descriptor(&self) -> SurfaceDescriptor {
        SurfaceDescriptor::new(
            self.css_width,
            self.css_height,
            device_pixel_ratio(),
            Orientation::from_viewport(viewport_size(), self.css_width, self.css_height),
        )
    }

    fn present(&mut self, scene: &Scene) -> Result<(), SliderError> {
        let dpr = self.descriptor().pixel_ratio;
        paint(&self.ctx, scene, dpr).map_err(|err| SliderError::Render(js_error(&err)))
    }
}

/// Replay a scene. Coordinates stay in CSS pixels; the transform scales them.
fn paint(ctx: &CanvasRenderingContext2d, scene: &Scene, dpr: f64) -> Result<(), JsValue> {
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    for op in &scene.ops {
        draw_op(ctx, op)?;
    }
    Ok(())
}

fn draw_op(ctx: &CanvasRenderingContext2d, op: &DrawOp) -> Result<(), JsValue> {
    match op {
        DrawOp::Clear { width, height } => ctx.clear_rect(0.0, 0.0, *width, *height),
        DrawOp::StrokeArc { center, radius, start_angle, end_angle, line_width, paint, round_cap } => {
            ctx.begin_path();
            ctx.arc(center.x, center.y, *radius, *start_angle, *end_angle)?;
            ctx.set_line_width(*line_width);
            ctx.set_line_cap(if *round_cap { "round" } else { "butt" });
            set_stroke(ctx, paint)?;
            ctx.stroke();
        }
        DrawOp::Line { from, to, line_width, color } => {
            ctx.begin_path();
            ctx.move_to(from.x, from.y);
            ctx.line_to(to.x, to.y);
            ctx.set_line_width(*line_width);
            ctx.set_line_cap("butt");
            ctx.set_stroke_style_str(color);
            ctx.stroke();
        }
        DrawOp::FillCircle { center, radius, color } => {
            ctx.begin_path();
            ctx.arc(center.x, center.y, *radius, 0.0, TAU)?;
            ctx.set_fill_style_str(color);
            ctx.fill();
        }
    }
    Ok(())
}

#[allow(clippy::cast_possible_truncation)]
fn set_stroke(ctx: &CanvasRenderingContext2d, paint: &Paint) -> Result<(), JsValue> {
    match paint {
        Paint::Solid(color) => ctx.set_stroke_style_str(color),
        Paint::LinearGradient { start, end, stops } => {
            let gradient = ctx.create_linear_gradient(start.x, start.y, end.x, end.y);
            for (offset, color) in stops {
                gradient.add_color_stop(*offset as f32, color)?;
            }
            ctx.set_stroke_style_canvas_gradient(&gradient);
        }
    }
    Ok(())
}

// =============================================================
// Input
// =============================================================

/// Where translated events go. Installed once the slider exists.
type Sink = Rc<RefCell<Option<Box<dyn Fn(InputEvent) -> bool>>>>;

struct Listener {
    id: SubscriptionId,
    kind: ListenerKind,
    target: EventTarget,
    closure: Closure<dyn FnMut(Event)>,
}

/// DOM listeners on the canvas (presses, wheel, focus) and the document
/// (moves, releases, keys).
pub struct DomInputSource {
    canvas: HtmlCanvasElement,
    document: Document,
    sink: Sink,
    listeners: Vec<Listener>,
    next_id: u64,
}

impl DomInputSource {
    /// # Errors
    ///
    /// Returns [`SliderError::Listener`] when the canvas is not attached to a document.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SliderError> {
        let document = canvas
            .owner_document()
            .ok_or_else(|| SliderError::Listener("canvas has no owner document".to_owned()))?;
        Ok(Self { canvas, document, sink: Rc::default(), listeners: Vec::new(), next_id: 0 })
    }

    fn sink(&self) -> Sink {
        Rc::clone(&self.sink)
    }
}

impl InputSource for DomInputSource {
    fn subscribe(&mut self, kind: ListenerKind) -> Result<SubscriptionId, SliderError> {
        let target: EventTarget = match kind.scope() {
            ListenScope::Surface => self.canvas.clone().into(),
            ListenScope::Global => self.document.clone().into(),
        };

        let canvas = self.canvas.clone();
        let sink = Rc::clone(&self.sink);
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(input) = translate(kind, &event, &canvas) else {
                return;
            };
            let consumed = sink.borrow().as_ref().is_some_and(|dispatch| dispatch(input));
            if consumed && !kind.passive() {
                event.prevent_default();
            }
        });

        let options = AddEventListenerOptions::new();
        options.set_passive(kind.passive());
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind.event_name(),
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|err| SliderError::Listener(js_error(&err)))?;

        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.push(Listener { id, kind, target, closure });
        Ok(id)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        let Some(pos) = self.listeners.iter().position(|listener| listener.id == id) else {
            return;
        };
        let listener = self.listeners.swap_remove(pos);
        let event = listener.kind.event_name();
        if let Err(err) = listener
            .target
            .remove_event_listener_with_callback(event, listener.closure.as_ref().unchecked_ref())
        {
            warn!(event, error = %js_error(&err), "failed to remove listener");
        }
    }
}

/// Position of a client-space point relative to the canvas, in CSS pixels.
fn local_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Point {
    let rect = canvas.get_bounding_client_rect();
    Point::new(f64::from(client_x) - rect.left(), f64::from(client_y) - rect.top())
}

fn mouse_point(event: &Event, canvas: &HtmlCanvasElement) -> Option<Point> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(local_point(canvas, mouse.client_x(), mouse.client_y()))
}

/// The first active touch. Multi-touch is not interpreted.
fn touch_point(event: &Event, canvas: &HtmlCanvasElement) -> Option<Point> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some(local_point(canvas, touch.client_x(), touch.client_y()))
}

fn translate(kind: ListenerKind, event: &Event, canvas: &HtmlCanvasElement) -> Option<InputEvent> {
    match kind {
        ListenerKind::MouseDown => mouse_point(event, canvas).map(InputEvent::PointerDown),
        ListenerKind::TouchStart => touch_point(event, canvas).map(InputEvent::PointerDown),
        ListenerKind::MouseMove => mouse_point(event, canvas).map(InputEvent::PointerMove),
        ListenerKind::TouchMove => touch_point(event, canvas).map(InputEvent::PointerMove),
        ListenerKind::MouseUp | ListenerKind::TouchEnd => Some(InputEvent::PointerUp),
        ListenerKind::DoubleClick => mouse_point(event, canvas).map(InputEvent::DoubleClick),
        ListenerKind::Wheel => {
            let wheel = event.dyn_ref::<WheelEvent>()?;
            Some(InputEvent::Wheel(WheelDelta { dy: wheel.delta_y() }))
        }
        ListenerKind::KeyDown => {
            let key = event.dyn_ref::<KeyboardEvent>()?;
            Some(InputEvent::KeyDown {
                key: Key::new(key.key()),
                modifiers: Modifiers { shift: key.shift_key() },
            })
        }
        ListenerKind::Focus => Some(InputEvent::Focus),
        ListenerKind::Blur => Some(InputEvent::Blur),
    }
}

// =============================================================
// JS export
// =============================================================

type DomSlider = Slider<CanvasSurface, DomInputSource>;

fn dispatch(slider: &Weak<RefCell<DomSlider>>, event: InputEvent) -> bool {
    let Some(slider) = slider.upgrade() else {
        return false;
    };
    let Ok(mut guard) = slider.try_borrow_mut() else {
        debug!("input event dropped while slider is busy");
        return false;
    };
    guard.dispatch(event)
}

/// Wrap a JS function as a values callback. Throwing callbacks are logged.
fn js_callback(
    function: Function,
    latest: Rc<Cell<SliderValues>>,
    name: &'static str,
) -> impl FnMut(SliderValues) + 'static {
    move |values: SliderValues| {
        latest.set(values);
        let from = JsValue::from_f64(values.from);
        let to = JsValue::from_f64(values.to);
        if let Err(err) = function.call2(&JsValue::NULL, &from, &to) {
            warn!(callback = name, error = %js_error(&err), "slider callback threw");
        }
    }
}

/// Circular range slider bound to a `<canvas>` element.
#[wasm_bindgen]
pub struct WebSlider {
    inner: Rc<RefCell<DomSlider>>,
    /// Values last reported to a callback, served while `inner` is borrowed.
    latest: Rc<Cell<SliderValues>>,
}

impl WebSlider {
    fn borrow_mut(&self) -> Result<RefMut<'_, DomSlider>, JsValue> {
        self.inner.try_borrow_mut().map_err(|_| to_js(SliderError::Busy))
    }

    fn values(&self) -> SliderValues {
        match self.inner.try_borrow() {
            Ok(slider) => slider.values(),
            Err(_) => self.latest.get(),
        }
    }
}

#[wasm_bindgen]
impl WebSlider {
    /// Create a slider on `canvas`. `config` is a JSON object; omitted fields
    /// take their defaults.
    ///
    /// # Errors
    ///
    /// Throws on malformed JSON, an invalid configuration, or a canvas
    /// without a 2D context.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config: Option<String>) -> Result<WebSlider, JsValue> {
        let config = match config {
            Some(raw) => SliderConfig::from_json(&raw).map_err(|err| to_js(err.into()))?,
            None => SliderConfig::default(),
        };
        let surface = CanvasSurface::new(canvas.clone()).map_err(to_js)?;
        let input = DomInputSource::new(canvas).map_err(to_js)?;
        let sink = input.sink();

        let slider = Slider::new(surface, input, config).map_err(to_js)?;
        let latest = Rc::new(Cell::new(slider.values()));
        let inner = Rc::new(RefCell::new(slider));
        let weak = Rc::downgrade(&inner);
        *sink.borrow_mut() = Some(Box::new(move |event| dispatch(&weak, event)));
        debug!("web slider attached");
        Ok(Self { inner, latest })
    }

    /// Current "from" value.
    #[wasm_bindgen(getter)]
    pub fn from(&self) -> f64 {
        self.values().from
    }

    /// Current "to" value.
    #[wasm_bindgen(getter)]
    pub fn to(&self) -> f64 {
        self.values().to
    }

    /// # Errors
    ///
    /// Throws when called from inside one of this slider's callbacks.
    #[wasm_bindgen(js_name = setValues)]
    pub fn set_values(&self, from: f64, to: f64) -> Result<(), JsValue> {
        let mut slider = self.borrow_mut()?;
        slider.set_values(from, to);
        self.latest.set(slider.values());
        Ok(())
    }

    /// Replace the configuration with a new JSON object.
    ///
    /// # Errors
    ///
    /// Throws on malformed JSON or an invalid configuration; the previous
    /// configuration stays active.
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&self, config: &str) -> Result<(), JsValue> {
        let config = SliderConfig::from_json(config).map_err(|err| to_js(err.into()))?;
        let mut slider = self.borrow_mut()?;
        slider.set_config(config).map_err(to_js)?;
        self.latest.set(slider.values());
        Ok(())
    }

    /// Re-measure the canvas after a layout change and redraw.
    ///
    /// # Errors
    ///
    /// Throws when the canvas cannot be resized.
    pub fn resize(&self) -> Result<(), JsValue> {
        let mut slider = self.borrow_mut()?;
        slider.surface_mut().remeasure().map_err(to_js)?;
        slider.resize();
        Ok(())
    }

    /// Called with `(from, to)` whenever the values change.
    ///
    /// # Errors
    ///
    /// Throws when called from inside one of this slider's callbacks.
    #[wasm_bindgen(js_name = setChangeCallback)]
    pub fn set_change_callback(&self, callback: Function) -> Result<(), JsValue> {
        let latest = Rc::clone(&self.latest);
        self.borrow_mut()?.set_change_callback(js_callback(callback, latest, "change"));
        Ok(())
    }

    /// Called with `(from, to)` when a gesture completes.
    ///
    /// # Errors
    ///
    /// Throws when called from inside one of this slider's callbacks.
    #[wasm_bindgen(js_name = setFinishCallback)]
    pub fn set_finish_callback(&self, callback: Function) -> Result<(), JsValue> {
        let latest = Rc::clone(&self.latest);
        self.borrow_mut()?.set_finish_callback(js_callback(callback, latest, "finish"));
        Ok(())
    }

    /// Detach every listener. Safe to call more than once.
    ///
    /// # Errors
    ///
    /// Throws when called from inside one of this slider's callbacks.
    pub fn destroy(&self) -> Result<(), JsValue> {
        self.borrow_mut()?.destroy();
        Ok(())
    }
}
