//! Error types for Shelfgrid.

use thiserror::Error;

/// Result type alias for Shelfgrid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during placement and state operations.
///
/// Infeasible placements are never errors: the scorer reports them as a
/// zero score and callers treat that as a normal negative result.
#[derive(Debug, Error)]
pub enum Error {
    /// A variant name was not found in the catalog. Indicates corrupt or
    /// mismatched saved state, not lack of space.
    #[error("Unknown variant: {0}")]
    UnknownVariant(String),

    /// A reserve call targeted a slot that already has an occupant in the
    /// same lane. Internal-consistency failure: `is_available` must be
    /// checked before `reserve`.
    #[error("Occupancy conflict in column {column} at slot {z_index} ({lane})")]
    OccupancyConflict {
        /// Column index within the shelf.
        column: usize,
        /// Slot index within the column.
        z_index: usize,
        /// Lane name (`left`, `right`, `center`, `cross`).
        lane: &'static str,
    },

    /// Saved state failed placement acceptance on load.
    #[error("Corrupt saved state: {0}")]
    CorruptState(String),

    /// Invalid column or shelf geometry.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Invalid variant definition.
    #[error("Invalid variant: {0}")]
    InvalidVariant(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
