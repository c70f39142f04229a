//! # Shelfgrid Engine
//!
//! Column occupancy, placement scoring, best-position search, fill
//! allocation, and the resize cascade for the Shelfgrid placement engine.
//!
//! The engine is single-threaded and synchronous: every placement,
//! scoring, and occupancy mutation runs to completion within one call.
//! Infeasible placements are ordinary values (a zero score / `Ok(None)`),
//! never errors.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod allocator;
pub mod block;
pub mod column;
pub mod persist;
pub mod resize;
pub mod scorer;
pub mod search;
pub mod shelf;

// Re-exports
pub use allocator::{fill_shelf, fill_status, quota_targets, set_fill_count};
pub use allocator::{FillReport, FillStatus, Pool, QuotaTarget};
pub use block::{Block, BlockArena, BlockId};
pub use column::{Column, SlotRecord};
pub use persist::{BlockState, ColumnState, ShelfState};
pub use resize::ResizeReport;
pub use scorer::{fits_column, fitness_value, score_option, ScoreContext, INFEASIBLE};
pub use search::{find_best_in_column, find_best_position, Candidate};
pub use shelf::{FillEntry, InducedRequest, Partition, PlacementOutcome, Shelf, ShelfConfig};
pub use shelfgrid_core::{Catalog, Error, Result, Variant};
