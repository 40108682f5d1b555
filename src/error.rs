//! Error and warning types.

/// A configuration that cannot drive the engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// `max` must be strictly greater than `min`.
    #[error("invalid value range: min {min} must be below max {max}")]
    InvalidRange { min: f64, max: f64 },
    /// A step was given but is zero, negative or not finite.
    #[error("invalid step: {0}")]
    InvalidStep(f64),
    /// The step leaves fewer than three positions on the ring.
    #[error("not enough steps: at least three are required, got {steps}")]
    NotEnoughSteps { steps: f64 },
    /// `tickCount` must be positive and at most [`MAX_TICK_COUNT`](crate::consts::MAX_TICK_COUNT).
    #[error("tick count must be between 1 and {}", crate::consts::MAX_TICK_COUNT)]
    InvalidTickCount,
    /// `majorTickEvery` must be positive.
    #[error("major tick interval must be greater than zero")]
    InvalidMajorTickEvery,
    /// A pixel dimension is negative or not finite.
    #[error("invalid geometry: {0} must be a finite, non-negative number")]
    InvalidGeometry(&'static str),
}

/// A configuration that works but probably looks wrong.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigWarning {
    /// Fewer steps than ticks: some ticks can never be reached.
    StepCoarserThanTicks { steps: f64, tick_count: u32 },
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StepCoarserThanTicks { steps, tick_count } => {
                write!(f, "step size might be too big for the number of ticks ({steps} steps, {tick_count} ticks)")
            }
        }
    }
}

/// Errors surfaced by the slider lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum SliderError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The host's configuration JSON could not be parsed.
    #[error("failed to parse slider config: {0}")]
    Json(#[from] serde_json::Error),
    /// The surface could not produce a 2D drawing context.
    #[error("drawing surface has no 2d context")]
    MissingContext,
    /// Attaching an input listener failed.
    #[error("failed to attach listener: {0}")]
    Listener(String),
    /// A draw pass failed.
    #[error("render failed: {0}")]
    Render(String),
    /// The slider is already borrowed by an in-progress event handler.
    #[error("slider is busy handling another event")]
    Busy,
}
