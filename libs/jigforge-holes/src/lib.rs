//! # JigForge Holes
//!
//! Parametric hole-cutter solids for the fixture-design pipeline.
//!
//! A hole is described by a [`HoleConfig`] (bore diameter plus an optional
//! countersink or counterbore head) and placed on the target's top plane by a
//! [`PlacedHole`]. Each placed hole becomes a cutter solid slightly longer
//! than its nominal depth so the boolean subtraction always clears both
//! surfaces; [`merge_hole_set`] combines all cutters of a recompute into a
//! single transport buffer.
//!
//! ## Coordinate Convention
//!
//! Cutter solids are built in a local frame where the target's top surface
//! is the XY plane at z = 0 and the bore descends along -Z. Placement then
//! translates each solid to its world position.

pub mod error;
pub mod hole;
pub mod merge_set;
pub mod primitives;
pub mod solid;

pub use error::HoleError;
pub use hole::{HoleConfig, HoleKind, PlacedHole};
pub use merge_set::{merge_hole_set, PlacementContext};
pub use solid::{build_hole_solid, HoleSolid, SolidQuality};
