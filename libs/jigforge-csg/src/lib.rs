//! # JigForge CSG
//!
//! Boolean mesh evaluation for the fixture-design pipeline.
//! Based on the csg.js algorithm by Evan Wallace:
//! - Union: A.clipTo(B); B.clipTo(A); B.invert(); B.clipTo(A); B.invert(); combine
//! - Subtraction: A.invert(); A.clipTo(B); B.clipTo(A); B.invert(); B.clipTo(A); B.invert(); combine; invert result
//!
//! Meshes are wrapped in a [`Brush`] before evaluation: preparing a brush
//! builds its BSP tree once, so a cutter shared across a batch pays the
//! build cost a single time.
//!
//! ## Example
//!
//! ```rust,ignore
//! use jigforge_csg::{BooleanEvaluator, BooleanOp, BspEvaluator};
//!
//! let evaluator = BspEvaluator;
//! let target = evaluator.prepare(&target_mesh)?;
//! let cutter = evaluator.prepare(&cutter_mesh)?;
//! let result = evaluator.evaluate(&target, &cutter, BooleanOp::Subtraction)?;
//! ```

mod bsp;
mod plane;
mod polygon;

pub mod brush;
pub mod error;
pub mod evaluator;

pub use brush::Brush;
pub use error::CsgError;
pub use evaluator::{BooleanEvaluator, BooleanOp, BspEvaluator};
