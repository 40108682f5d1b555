//! Input model: events, listener registrations and the drag state machine.
//!
//! [`InputEvent`] is the host-neutral form of everything the slider reacts
//! to. [`InputSource`] is the capability the slider uses to attach and detach
//! listeners; the browser implementation lives in [`crate::web`], tests
//! supply a recording fake. [`InputState`] is the active gesture tracked
//! between pointer-down and pointer-up.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::error::SliderError;
use crate::hit::{DragTarget, HandleId};
use crate::surface::Point;

/// Keyboard modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift multiplies key steps by ten.
    pub shift: bool,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"ArrowLeft"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The arrow this key represents, if any.
    #[must_use]
    pub fn arrow(&self) -> Option<Arrow> {
        match self.0.as_str() {
            "ArrowLeft" => Some(Arrow::Left),
            "ArrowRight" => Some(Arrow::Right),
            "ArrowUp" => Some(Arrow::Up),
            "ArrowDown" => Some(Arrow::Down),
            _ => None,
        }
    }
}

/// Arrow keys the slider responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    /// Move both handles counter-clockwise.
    Left,
    /// Move both handles clockwise.
    Right,
    /// Contract the arc on both sides.
    Up,
    /// Expand the arc on both sides.
    Down,
}

impl Arrow {
    /// `(direction, scale)`: the sign of the step and whether it scales the
    /// arc instead of translating it.
    #[must_use]
    pub fn motion(self) -> (f64, bool) {
        match self {
            Self::Left => (-1.0, false),
            Self::Right => (1.0, false),
            Self::Up => (-1.0, true),
            Self::Down => (1.0, true),
        }
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDelta {
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// A host-neutral input event. Positions are CSS pixels relative to the surface.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    DoubleClick(Point),
    Wheel(WheelDelta),
    KeyDown { key: Key, modifiers: Modifiers },
    Focus,
    Blur,
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenScope {
    /// The slider's own surface.
    Surface,
    /// A document-wide target, so drags keep tracking after the pointer
    /// leaves the ring.
    Global,
}

/// One DOM-level listener the slider registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    MouseDown,
    MouseMove,
    MouseUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    DoubleClick,
    Wheel,
    KeyDown,
    Focus,
    Blur,
}

impl ListenerKind {
    /// Scope the listener is attached to.
    #[must_use]
    pub fn scope(self) -> ListenScope {
        match self {
            Self::MouseMove | Self::MouseUp | Self::TouchMove | Self::TouchEnd | Self::KeyDown => ListenScope::Global,
            Self::MouseDown | Self::TouchStart | Self::DoubleClick | Self::Wheel | Self::Focus | Self::Blur => {
                ListenScope::Surface
            }
        }
    }

    /// DOM event name.
    #[must_use]
    pub fn event_name(self) -> &'static str {
        match self {
            Self::MouseDown => "mousedown",
            Self::MouseMove => "mousemove",
            Self::MouseUp => "mouseup",
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::DoubleClick => "dblclick",
            Self::Wheel => "wheel",
            Self::KeyDown => "keydown",
            Self::Focus => "focus",
            Self::Blur => "blur",
        }
    }

    /// Listeners whose default action is cancelled when the slider consumes
    /// the event (page scroll, emulated mouse events) must not be passive.
    #[must_use]
    pub fn passive(self) -> bool {
        !matches!(self, Self::TouchStart | Self::TouchMove | Self::Wheel | Self::KeyDown)
    }
}

/// Every listener attached at construction, in attachment order.
pub const LISTENERS: [ListenerKind; 11] = [
    ListenerKind::MouseDown,
    ListenerKind::MouseMove,
    ListenerKind::MouseUp,
    ListenerKind::TouchStart,
    ListenerKind::TouchMove,
    ListenerKind::TouchEnd,
    ListenerKind::DoubleClick,
    ListenerKind::Wheel,
    ListenerKind::KeyDown,
    ListenerKind::Focus,
    ListenerKind::Blur,
];

/// Handle for one attached listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Capability to attach and detach input listeners.
pub trait InputSource {
    /// Attach a listener for `kind` at its scope.
    ///
    /// # Errors
    ///
    /// Returns [`SliderError::Listener`] when the host refuses the listener.
    fn subscribe(&mut self, kind: ListenerKind) -> Result<SubscriptionId, SliderError>;

    /// Detach a listener. Unknown ids are ignored.
    fn unsubscribe(&mut self, id: SubscriptionId);
}

/// What is being dragged, with the context captured at drag start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Drag {
    /// A single handle follows the pointer.
    Handle(HandleId),
    /// The whole arc follows the pointer.
    Bar {
        /// Pointer angle minus arc midpoint at drag start, in `(-π, π]`.
        offset: f64,
        /// Arc length at drag start; held constant for the whole drag.
        arc_length: f64,
    },
}

impl Drag {
    #[must_use]
    pub fn target(self) -> DragTarget {
        match self {
            Self::Handle(handle) => DragTarget::Handle(handle),
            Self::Bar { .. } => DragTarget::Bar,
        }
    }
}

/// Gesture state between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    Dragging(Drag),
}

impl InputState {
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    /// Current drag target, if dragging.
    #[must_use]
    pub fn target(&self) -> Option<DragTarget> {
        match self {
            Self::Idle => None,
            Self::Dragging(drag) => Some(drag.target()),
        }
    }
}
