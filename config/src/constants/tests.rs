//! Tests for the centralized configuration constants.

use super::*;

/// Ensures default constants are sane and positive.
#[test]
fn default_constants_are_valid() {
    let cfg = CutterConfig::default();
    assert!(cfg.segments >= 3);
    assert!(cfg.end_margin > 0.0);
    assert!(EPSILON_TOLERANCE > 0.0);
    assert!(MIN_FRUSTUM_HEIGHT > 0.0);
    assert!(DEFAULT_HOLE_DIAMETER > 0.0);
}

/// Validates the builder rejects invalid values.
#[test]
fn new_validates_inputs() {
    assert_eq!(
        CutterConfig::new(2, 1.0).unwrap_err(),
        ConfigError::InvalidSegments(2)
    );
    assert_eq!(
        CutterConfig::new(24, -1.0).unwrap_err(),
        ConfigError::InvalidMargin(-1.0)
    );
    assert!(CutterConfig::new(24, f64::NAN).is_err());
}

/// Timing constants must keep the orchestrator responsive.
#[test]
fn timing_constants_are_bounded() {
    assert!(SETTLE_DELAY.as_millis() <= 500);
    assert!(SOURCE_RETRY_DELAY < SETTLE_DELAY);
    assert!(RENDER_SETTLE_FRAMES >= 1);
    assert!(SOURCE_RETRY_LIMIT >= 1);
}
