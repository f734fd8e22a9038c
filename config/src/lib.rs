//! # Config Crate
//!
//! Centralized configuration constants for the JigForge CSG pipeline.
//! All magic numbers and tunable parameters are defined here to ensure
//! consistency across crates and easy configuration management.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON_TOLERANCE, CUTTER_END_MARGIN};
//!
//! // Use EPSILON_TOLERANCE for floating-point comparisons
//! let value: f64 = 1.0e-12;
//! assert!(value.abs() < EPSILON_TOLERANCE * 10.0);
//!
//! // A 20 mm deep through hole over-penetrates by the end margin on both sides
//! let cutter_height = 20.0 + 2.0 * CUTTER_END_MARGIN;
//! assert_eq!(cutter_height, 24.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Millimeters Everywhere**: All lengths are in mm, matching the UI layer
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
