#![allow(clippy::float_cmp)]

use super::*;

fn stepped(min: f64, max: f64, step: f64) -> SliderConfig {
    SliderConfig { min, max, step: Some(step), ..SliderConfig::default() }
}

// =============================================================
// Defaults and parsing
// =============================================================

#[test]
fn default_config_is_valid_without_warnings() {
    let warnings = SliderConfig::default().validate().unwrap();
    assert!(warnings.is_empty());
}

#[test]
fn from_json_fills_missing_fields_with_defaults() {
    let cfg = SliderConfig::from_json(r#"{"min": 0, "max": 24, "step": 1}"#).unwrap();
    assert_eq!(cfg.max, 24.0);
    assert_eq!(cfg.step, Some(1.0));
    assert_eq!(cfg.radius, 120.0);
    assert_eq!(cfg.tick_count, 48);
    assert_eq!(cfg.colors, SliderColors::default());
    assert_eq!(cfg.notify, NotifyMode::Continuous);
}

#[test]
fn from_json_reads_camel_case_keys() {
    let cfg = SliderConfig::from_json(
        r##"{
            "strokeWidth": 10,
            "strokePadding": 2,
            "handleRadius": 9,
            "tickCount": 24,
            "majorTickEvery": 6,
            "notify": "finish",
            "colors": {"bar": "#ff0000"}
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.stroke_width, 10.0);
    assert_eq!(cfg.stroke_padding, 2.0);
    assert_eq!(cfg.handle_radius, 9.0);
    assert_eq!(cfg.tick_count, 24);
    assert_eq!(cfg.major_tick_every, 6);
    assert_eq!(cfg.notify, NotifyMode::Finish);
    assert_eq!(cfg.colors.bar, "#ff0000");
    assert_eq!(cfg.colors.rail, "#E5E7EB");
}

#[test]
fn from_json_null_step_is_continuous() {
    let cfg = SliderConfig::from_json(r#"{"step": null}"#).unwrap();
    assert_eq!(cfg.step, None);
}

#[test]
fn from_json_rejects_malformed_input() {
    assert!(SliderConfig::from_json("{not json").is_err());
    assert!(SliderConfig::from_json(r#"{"tickCount": -3}"#).is_err());
}

// =============================================================
// Validation
// =============================================================

#[test]
fn validate_rejects_two_steps() {
    let err = stepped(0.0, 10.0, 5.0).validate().unwrap_err();
    assert_eq!(err, ConfigError::NotEnoughSteps { steps: 2.0 });
}

#[test]
fn validate_accepts_exactly_three_steps() {
    assert!(stepped(0.0, 9.0, 3.0).validate().is_ok());
}

#[test]
fn validate_warns_when_steps_fewer_than_ticks() {
    let warnings = stepped(0.0, 12.0, 1.0).validate().unwrap();
    assert_eq!(warnings, vec![ConfigWarning::StepCoarserThanTicks { steps: 12.0, tick_count: 48 }]);
}

#[test]
fn validate_does_not_warn_when_steps_cover_ticks() {
    let warnings = stepped(0.0, 48.0, 1.0).validate().unwrap();
    assert!(warnings.is_empty());
}

#[test]
fn validate_rejects_inverted_or_empty_range() {
    let cfg = SliderConfig { min: 10.0, max: 10.0, ..SliderConfig::default() };
    assert!(matches!(cfg.validate(), Err(ConfigError::InvalidRange { .. })));
    let cfg = SliderConfig { min: 10.0, max: 0.0, ..SliderConfig::default() };
    assert!(matches!(cfg.validate(), Err(ConfigError::InvalidRange { .. })));
}

#[test]
fn validate_rejects_non_positive_step() {
    assert_eq!(stepped(0.0, 48.0, 0.0).validate().unwrap_err(), ConfigError::InvalidStep(0.0));
    assert_eq!(stepped(0.0, 48.0, -1.0).validate().unwrap_err(), ConfigError::InvalidStep(-1.0));
}

#[test]
fn validate_rejects_out_of_range_tick_counts() {
    let cfg = SliderConfig { tick_count: 0, ..SliderConfig::default() };
    assert_eq!(cfg.validate().unwrap_err(), ConfigError::InvalidTickCount);
    let cfg = SliderConfig { tick_count: u32::MAX, ..SliderConfig::default() };
    assert_eq!(cfg.validate().unwrap_err(), ConfigError::InvalidTickCount);
    let cfg = SliderConfig { tick_count: MAX_TICK_COUNT, ..SliderConfig::default() };
    assert!(cfg.validate().is_ok());
    let cfg = SliderConfig { major_tick_every: 0, ..SliderConfig::default() };
    assert_eq!(cfg.validate().unwrap_err(), ConfigError::InvalidMajorTickEvery);
}

#[test]
fn validate_rejects_negative_geometry() {
    let cfg = SliderConfig { stroke_width: -1.0, ..SliderConfig::default() };
    assert_eq!(cfg.validate().unwrap_err(), ConfigError::InvalidGeometry("strokeWidth"));
    let cfg = SliderConfig { radius: f64::NAN, ..SliderConfig::default() };
    assert_eq!(cfg.validate().unwrap_err(), ConfigError::InvalidGeometry("radius"));
}

#[test]
fn step_count_reports_range_over_step() {
    assert_eq!(stepped(0.0, 48.0, 2.0).step_count(), Some(24.0));
    assert_eq!(SliderConfig::default().step_count(), None);
}

#[test]
fn config_error_messages_are_readable() {
    let msg = ConfigError::NotEnoughSteps { steps: 2.0 }.to_string();
    assert!(msg.contains("at least three"));
}
