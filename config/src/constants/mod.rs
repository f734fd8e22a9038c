//! Centralized configuration values shared across the JigForge CSG pipeline.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;
use std::time::Duration;

/// Numerical tolerance used by geometry kernels.
///
/// # Examples
/// ```
/// use config::constants::EPSILON_TOLERANCE;
/// assert!(EPSILON_TOLERANCE < 1.0e-6);
/// ```
pub const EPSILON_TOLERANCE: f64 = 1.0e-9;

/// Default tessellation segment count for cutter cylinders and frustums.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_SEGMENTS;
/// assert!(DEFAULT_SEGMENTS >= 12);
/// ```
pub const DEFAULT_SEGMENTS: u32 = 32;

/// Extra length, in mm, added to each end of a cutter solid beyond the
/// nominal through depth so the cut always clears both target surfaces
/// regardless of floating-point roundoff.
///
/// # Examples
/// ```
/// use config::constants::CUTTER_END_MARGIN;
/// assert_eq!(CUTTER_END_MARGIN, 2.0);
/// ```
pub const CUTTER_END_MARGIN: f64 = 2.0;

/// Lower bound, in mm, on a countersink frustum height. Guards against a
/// near-flat cone when the rim barely exceeds the bore.
///
/// # Examples
/// ```
/// use config::constants::MIN_FRUSTUM_HEIGHT;
/// assert!(MIN_FRUSTUM_HEIGHT > 0.0);
/// ```
pub const MIN_FRUSTUM_HEIGHT: f64 = 0.5;

/// Fallback bore diameter, in mm, substituted for missing or non-positive
/// hole dimensions.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_HOLE_DIAMETER;
/// assert!(DEFAULT_HOLE_DIAMETER > 0.0);
/// ```
pub const DEFAULT_HOLE_DIAMETER: f64 = 3.0;

/// Fallback countersink cone angle, in degrees (full included angle).
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_COUNTERSINK_ANGLE_DEG;
/// assert_eq!(DEFAULT_COUNTERSINK_ANGLE_DEG, 90.0);
/// ```
pub const DEFAULT_COUNTERSINK_ANGLE_DEG: f64 = 90.0;

/// Ratio applied to the bore diameter when a countersink rim diameter or
/// counterbore diameter is missing or invalid.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_ENLARGED_DIAMETER_FACTOR;
/// assert!(DEFAULT_ENLARGED_DIAMETER_FACTOR > 1.0);
/// ```
pub const DEFAULT_ENLARGED_DIAMETER_FACTOR: f64 = 2.0;

/// Fallback counterbore pocket depth, in mm.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_COUNTERBORE_DEPTH;
/// assert!(DEFAULT_COUNTERBORE_DEPTH > 0.0);
/// ```
pub const DEFAULT_COUNTERBORE_DEPTH: f64 = 3.0;

/// Delay between the end of a drag gesture and the start of a recompute,
/// letting consuming renderers settle on the final drag position first.
///
/// # Examples
/// ```
/// use config::constants::SETTLE_DELAY;
/// assert!(SETTLE_DELAY.as_millis() >= 100);
/// ```
pub const SETTLE_DELAY: Duration = Duration::from_millis(150);

/// Number of render-frame boundaries to wait after the settle delay before
/// capturing the source geometry.
///
/// # Examples
/// ```
/// use config::constants::RENDER_SETTLE_FRAMES;
/// assert_eq!(RENDER_SETTLE_FRAMES, 2);
/// ```
pub const RENDER_SETTLE_FRAMES: u32 = 2;

/// Delay between retries when the source mesh getter returns nothing.
///
/// # Examples
/// ```
/// use config::constants::SOURCE_RETRY_DELAY;
/// assert!(SOURCE_RETRY_DELAY.as_millis() > 0);
/// ```
pub const SOURCE_RETRY_DELAY: Duration = Duration::from_millis(50);

/// Maximum number of source-unavailable retries before the recompute gives
/// up silently.
///
/// # Examples
/// ```
/// use config::constants::SOURCE_RETRY_LIMIT;
/// assert!(SOURCE_RETRY_LIMIT >= 1);
/// ```
pub const SOURCE_RETRY_LIMIT: u32 = 5;

/// Default number of boolean-evaluation worker threads.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_WORKER_COUNT;
/// assert!(DEFAULT_WORKER_COUNT >= 1);
/// ```
pub const DEFAULT_WORKER_COUNT: usize = 2;

/// Immutable snapshot of the cutter-tessellation settings shared between
/// crates.
///
/// # Examples
/// ```
/// use config::constants::CutterConfig;
/// let config = CutterConfig::default();
/// assert!(config.end_margin > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutterConfig {
    /// Segment count for cylindrical cutter walls.
    pub segments: u32,
    /// Over-penetration margin, in mm, applied to each cutter end.
    pub end_margin: f64,
}

impl CutterConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// segment count and margin.
    ///
    /// # Examples
    /// ```
    /// use config::constants::CutterConfig;
    /// let cfg = CutterConfig::new(24, 1.5).expect("valid config");
    /// assert_eq!(cfg.segments, 24);
    /// ```
    pub fn new(segments: u32, end_margin: f64) -> Result<Self, ConfigError> {
        if segments < 3 {
            return Err(ConfigError::InvalidSegments(segments));
        }
        if !end_margin.is_finite() || end_margin < 0.0 {
            return Err(ConfigError::InvalidMargin(end_margin));
        }
        Ok(Self {
            segments,
            end_margin,
        })
    }
}

impl Default for CutterConfig {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            end_margin: CUTTER_END_MARGIN,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the requested segment count is too small to form a polygon.
    InvalidSegments(u32),
    /// Raised when the end margin is negative or non-finite.
    InvalidMargin(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSegments(value) => {
                write!(f, "segments must be >= 3: {value}")
            }
            ConfigError::InvalidMargin(value) => {
                write!(f, "end_margin must be finite and non-negative: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests;
