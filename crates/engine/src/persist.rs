//! Saved-state types and the snapshot/restore path.
//!
//! Positions in saved state are authoritative: restoring re-runs placement
//! *acceptance* (availability at the recorded column and index), never
//! re-scoring. Serde derives are available behind the `serde` feature; the
//! snapshot types themselves are always present.

use shelfgrid_core::{Catalog, Result};

use crate::shelf::{Shelf, ShelfConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Saved state of one placed block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlockState {
    /// Catalog variant name.
    pub variant: String,
    /// Base slot index.
    pub z_index: usize,
}

/// Saved state of one column and its placed blocks.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColumnState {
    /// Horizontal position of the column's left edge.
    pub start_x: f64,
    /// Column width.
    pub width: f64,
    /// Column height.
    pub height: f64,
    /// Column depth.
    pub depth: f64,
    /// Placed blocks, in block-list order.
    pub blocks: Vec<BlockState>,
}

/// Saved state of a whole shelf.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShelfState {
    /// Columns in shelf order.
    pub columns: Vec<ColumnState>,
}

impl Shelf {
    /// Captures the shelf's columns and placements.
    pub fn snapshot(&self) -> ShelfState {
        let columns = self
            .columns()
            .iter()
            .enumerate()
            .map(|(i, column)| ColumnState {
                start_x: self.start_x(i).unwrap_or(0.0),
                width: column.width(),
                height: column.height(),
                depth: column.depth(),
                blocks: column
                    .blocks()
                    .iter()
                    .filter_map(|&id| self.block(id))
                    .map(|block| BlockState {
                        variant: block.variant.clone(),
                        z_index: block.z_index,
                    })
                    .collect(),
            })
            .collect();
        ShelfState { columns }
    }

    /// Rebuilds a shelf from saved state against a catalog.
    ///
    /// Each saved block goes through placement acceptance at its recorded
    /// position. A variant missing from the catalog is
    /// [`Error::UnknownVariant`](shelfgrid_core::Error::UnknownVariant);
    /// a block that fails acceptance is
    /// [`Error::CorruptState`](shelfgrid_core::Error::CorruptState).
    pub fn restore(catalog: Catalog, config: ShelfConfig, state: &ShelfState) -> Result<Self> {
        let mut shelf = Shelf::new(catalog, config);
        for column_state in &state.columns {
            let index = shelf.add_column(column_state.width, column_state.height)?;
            shelf.columns[index].set_depth(column_state.depth);
        }
        for (column_index, column_state) in state.columns.iter().enumerate() {
            for block_state in &column_state.blocks {
                shelf.place_at(&block_state.variant, column_index, block_state.z_index)?;
            }
        }
        Ok(shelf)
    }
}
