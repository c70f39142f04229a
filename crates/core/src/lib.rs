//! # Shelfgrid Core
//!
//! Core data types for the Shelfgrid placement engine.
//!
//! This crate holds the types shared between the placement engine and its
//! consumers: the error taxonomy, lane/footprint geometry, block variant
//! definitions, and the variant catalog.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod catalog;
pub mod error;
pub mod footprint;
pub mod variant;

// Re-exports
pub use catalog::Catalog;
pub use error::{Error, Result};
pub use footprint::{Footprint, Lane, LaneWindow};
pub use variant::{BlockKind, FitRule, InducedPlacement, OccupancyMode, Variant};
