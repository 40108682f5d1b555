//! Slider configuration supplied by the host.
//!
//! The host hands over a plain object (camelCase keys). Every field has a
//! default so a partial object is enough. A configuration is immutable for the
//! lifetime of one engine setup; reconfiguring replaces it wholesale.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_TICK_COUNT, MIN_STEPS};
use crate::error::{ConfigError, ConfigWarning};

/// When change notifications are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyMode {
    /// Report changes while dragging, throttled by a minimum delta.
    #[default]
    Continuous,
    /// Report changes only when a gesture completes.
    Finish,
}

/// Named colors used by the renderer. Any CSS color string is accepted; the
/// bar gradient derives its faint end from `bar` when it is a hex color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderColors {
    pub rail: String,
    pub bar: String,
    pub handle: String,
    pub tick: String,
    pub text: String,
}

impl Default for SliderColors {
    fn default() -> Self {
        Self {
            rail: "#E5E7EB".to_owned(),
            bar: "#24C7D4".to_owned(),
            handle: "#FFFFFF".to_owned(),
            tick: "#9CA3AF".to_owned(),
            text: "#374151".to_owned(),
        }
    }
}

/// Full slider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SliderConfig {
    /// Lower bound of the value domain.
    pub min: f64,
    /// Upper bound of the value domain; must exceed `min`.
    pub max: f64,
    /// Initial "from" value.
    pub from: f64,
    /// Initial "to" value.
    pub to: f64,
    /// Quantization unit; `None` means continuous.
    pub step: Option<f64>,
    /// Outer ring radius in CSS pixels.
    pub radius: f64,
    /// Width of the bar stroke.
    pub stroke_width: f64,
    /// Rail padding on each side of the bar stroke.
    pub stroke_padding: f64,
    /// Handle radius used for drawing and hit-testing.
    pub handle_radius: f64,
    /// Number of tick marks around the ring.
    pub tick_count: u32,
    /// Every n-th tick is drawn as a major tick.
    pub major_tick_every: u32,
    pub colors: SliderColors,
    pub notify: NotifyMode,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 48.0,
            from: 0.0,
            to: 12.0,
            step: None,
            radius: 120.0,
            stroke_width: 8.0,
            stroke_padding: 4.0,
            handle_radius: 12.0,
            tick_count: 48,
            major_tick_every: 4,
            colors: SliderColors::default(),
            notify: NotifyMode::default(),
        }
    }
}

impl SliderConfig {
    /// Parse a configuration from the host's JSON object. Missing keys take
    /// their defaults. The result is not validated.
    ///
    /// # Errors
    ///
    /// Returns the parse error when `raw` is not a valid configuration object.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Number of steps spanning the value range, when stepped.
    #[must_use]
    pub fn step_count(&self) -> Option<f64> {
        self.step.map(|step| (self.max - self.min) / step)
    }

    /// Check the configuration. Returns non-fatal warnings on success.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the engine cannot operate on this
    /// configuration, most notably when a step leaves fewer than three
    /// positions on the ring.
    pub fn validate(&self) -> Result<Vec<ConfigWarning>, ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.max <= self.min {
            return Err(ConfigError::InvalidRange { min: self.min, max: self.max });
        }
        for (name, value) in [
            ("radius", self.radius),
            ("strokeWidth", self.stroke_width),
            ("strokePadding", self.stroke_padding),
            ("handleRadius", self.handle_radius),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidGeometry(name));
            }
        }
        if self.tick_count == 0 || self.tick_count > MAX_TICK_COUNT {
            return Err(ConfigError::InvalidTickCount);
        }
        if self.major_tick_every == 0 {
            return Err(ConfigError::InvalidMajorTickEvery);
        }

        let mut warnings = Vec::new();
        if let Some(step) = self.step {
            if !step.is_finite() || step <= 0.0 {
                return Err(ConfigError::InvalidStep(step));
            }
            let steps = (self.max - self.min) / step;
            if steps < MIN_STEPS {
                return Err(ConfigError::NotEnoughSteps { steps });
            }
            if steps < f64::from(self.tick_count) {
                warnings.push(ConfigWarning::StepCoarserThanTicks { steps, tick_count: self.tick_count });
            }
        }
        Ok(warnings)
    }
}
