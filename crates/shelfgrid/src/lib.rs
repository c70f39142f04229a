//! # Shelfgrid
//!
//! Column-based placement engine for modular storage blocks.
//!
//! Places discrete blocks (shelves, drawers, bins, desks, racks, cross
//! supports) into vertically-segmented storage columns, and auto-populates
//! a shelving unit with a proportioned mix of block types. Greedy and
//! deterministic: a priority-ordered best-local-fit heuristic, not a
//! global optimizer.
//!
//! ## Quick Start
//!
//! ```rust
//! use shelfgrid::core::Catalog;
//! use shelfgrid::engine::{fill_shelf, Shelf, ShelfConfig};
//!
//! let mut shelf = Shelf::new(Catalog::standard(), ShelfConfig::default());
//! shelf.add_column(80.0, 220.0).unwrap();
//! shelf.add_column(60.0, 220.0).unwrap();
//!
//! let report = fill_shelf(&mut shelf).unwrap();
//! assert!(report.placed > 0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialization support for catalogs and saved shelf state

/// Core data types: errors, footprints, variants, catalog.
pub use shelfgrid_core as core;

/// The placement engine: columns, scoring, search, allocation, resize.
pub use shelfgrid_engine as engine;

// Re-export commonly used types at root level
pub use shelfgrid_core::{Catalog, Error, Result, Variant};
pub use shelfgrid_engine::{fill_shelf, Shelf, ShelfConfig};
