//! Circular range slider engine.
//!
//! A ring divided into ticks, two draggable handles marking a "from" and a
//! "to" position, and the arc ("bar") between them. The crate owns the whole
//! engine: mapping angles to values, interpreting pointer, wheel and keyboard
//! input, and producing a deterministic draw pass. The browser layer in
//! [`web`] only forwards DOM events and paints the resulting [`render::Scene`].
//!
//! Angles are the single source of truth. Values are always derived from them
//! through [`geometry::Geometry`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Lifecycle wrapper [`engine::Slider`] and testable [`engine::SliderCore`] |
//! | [`config`] | Configuration object, defaults and validation |
//! | [`geometry`] | Value/angle mapping, quantization and wrap-aware arc math |
//! | [`input`] | Input event types, listener registrations and the drag state machine |
//! | [`hit`] | Hit-testing against handles and the bar |
//! | [`render`] | Scene construction (rail, ticks, bar, handles) |
//! | [`surface`] | Surface descriptor and the drawing-surface seam |
//! | [`color`] | Hex color helpers for the bar gradient |
//! | [`error`] | Error and warning types |
//! | [`web`] | Browser bindings (`web-sys` canvas + DOM listeners) |
//! | [`consts`] | Shared numeric constants |

pub mod color;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod render;
pub mod surface;
pub mod web;

pub use config::{NotifyMode, SliderColors, SliderConfig};
pub use engine::{Action, Slider, SliderCore, SliderValues};
pub use error::{ConfigError, ConfigWarning, SliderError};
