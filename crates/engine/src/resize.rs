//! Resize cascade.
//!
//! Keeps placements consistent when column geometry changes as a side
//! effect of a partition move: re-validates installed blocks with the
//! fit-only check, evicts failures, and deletes columns whose width drops
//! below the configured minimum.

use shelfgrid_core::{Error, Result};

use crate::block::Block;
use crate::scorer::fits_column;
use crate::shelf::Shelf;

/// What a resize operation did: which blocks were evicted (already removed
/// from the shelf and the fill registry — quotas are not auto-refilled)
/// and which columns were deleted outright.
#[derive(Debug, Default)]
pub struct ResizeReport {
    /// Blocks evicted by the cascade, in eviction order.
    pub evicted: Vec<Block>,
    /// Indices of deleted columns, as they were at the time of deletion.
    pub deleted_columns: Vec<usize>,
}

impl ResizeReport {
    /// Returns true if the cascade changed nothing beyond geometry.
    pub fn is_clean(&self) -> bool {
        self.evicted.is_empty() && self.deleted_columns.is_empty()
    }
}

impl Shelf {
    /// Applies a new width and height to a column and runs the cascade.
    /// A width below the minimum column width deletes the column.
    pub fn resize_column(
        &mut self,
        index: usize,
        width: f64,
        height: f64,
    ) -> Result<ResizeReport> {
        if index >= self.columns.len() {
            return Err(Error::InvalidGeometry(format!(
                "column {index} does not exist"
            )));
        }

        let mut report = ResizeReport::default();
        let delta = width - self.columns[index].width();
        self.columns[index].set_width(width);
        self.columns[index].set_height(height);
        for partition in &mut self.partitions[index + 1..] {
            partition.position += delta;
        }

        if width < self.config.min_column_width {
            self.delete_column_into(index, &mut report);
        } else {
            self.revalidate_column(index, &mut report);
        }
        Ok(report)
    }

    /// Moves an interior partition by `delta`, widening one neighbor and
    /// narrowing the other, then cascades both columns.
    pub fn move_partition(&mut self, index: usize, delta: f64) -> Result<ResizeReport> {
        if index == 0 || index >= self.columns.len() {
            return Err(Error::ConfigError(format!(
                "partition {index} is not an interior partition"
            )));
        }

        let left = index - 1;
        let right = index;
        let left_width = self.columns[left].width() + delta;
        let right_width = self.columns[right].width() - delta;
        self.columns[left].set_width(left_width);
        self.columns[right].set_width(right_width);
        self.partitions[index].position += delta;

        let mut report = ResizeReport::default();
        // Right first: deleting it leaves the left index intact.
        for (column, new_width) in [(right, right_width), (left, left_width)] {
            if new_width < self.config.min_column_width {
                self.delete_column_into(column, &mut report);
            } else {
                self.revalidate_column(column, &mut report);
            }
        }
        Ok(report)
    }

    /// Deletes a column: evicts its blocks, merges its two adjacent
    /// partitions (the left partition is removed and later partitions
    /// close the gap), and shifts later column indices down by one.
    pub fn delete_column(&mut self, index: usize) -> Result<ResizeReport> {
        if index >= self.columns.len() {
            return Err(Error::InvalidGeometry(format!(
                "column {index} does not exist"
            )));
        }
        let mut report = ResizeReport::default();
        self.delete_column_into(index, &mut report);
        Ok(report)
    }

    /// Re-runs the fit-only check for every block in a column, evicting
    /// blocks whose width bounds or vertical headroom no longer hold.
    fn revalidate_column(&mut self, index: usize, report: &mut ResizeReport) {
        let failing: Vec<_> = self.columns[index]
            .blocks()
            .iter()
            .copied()
            .filter(|&id| {
                let block = match self.arena.get(id) {
                    Some(b) => b,
                    None => return false,
                };
                match self.catalog.lookup(&block.variant) {
                    Some(variant) => !fits_column(variant, &self.columns[index], block.z_index),
                    None => false,
                }
            })
            .collect();

        for id in failing {
            if let Some(block) = self.remove_block(id) {
                log::debug!(
                    "evicted '{}' from column {} after resize",
                    block.variant,
                    index
                );
                report.evicted.push(block);
            }
        }
    }

    fn delete_column_into(&mut self, index: usize, report: &mut ResizeReport) {
        let ids: Vec<_> = self.columns[index].blocks().to_vec();
        for id in ids {
            if let Some(block) = self.remove_block(id) {
                report.evicted.push(block);
            }
        }

        let deleted = self.columns.remove(index);
        log::debug!(
            "deleted column {index} (width {} below minimum {})",
            deleted.width(),
            self.config.min_column_width
        );

        // Merge the two adjacent partitions: the left one goes away and
        // the span it opened collapses.
        let removed = self.partitions.remove(index);
        let next = self.partitions[index].position;
        let gap = next - removed.position;
        for partition in &mut self.partitions[index..] {
            partition.position -= gap;
        }

        for (_, block) in self.arena.iter_mut() {
            if block.column > index {
                block.column -= 1;
            }
        }
        report.deleted_columns.push(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::fill_shelf;
    use crate::shelf::ShelfConfig;
    use shelfgrid_core::{BlockKind, Catalog, Footprint, Variant};

    fn catalog() -> Catalog {
        Catalog::new()
            .with(
                Variant::new("desk", BlockKind::Desk)
                    .with_footprint(Footprint::full_width(3, 0))
                    .with_width_range(40.0, 140.0, 80.0)
                    .with_one_per_column(true)
                    .with_fill_per_column(true)
                    .with_priority(12)
                    .with_fill_coefficient(1.0),
            )
            .with(
                Variant::new("shelf", BlockKind::Shelf)
                    .with_width_range(20.0, 140.0, 60.0)
                    .with_priority(10)
                    .with_fill_coefficient(1.0),
            )
    }

    fn shelf() -> Shelf {
        let config = ShelfConfig::default()
            .with_vertical_step(4.0)
            .with_start_step(0.0)
            .with_min_column_width(20.0);
        let mut s = Shelf::new(catalog(), config);
        s.add_column(80.0, 40.0).unwrap();
        s.add_column(80.0, 40.0).unwrap();
        s.add_column(80.0, 40.0).unwrap();
        s
    }

    #[test]
    fn test_width_shrink_evicts_and_clears_occupancy() {
        let mut shelf = shelf();
        let outcome = shelf.place_best("desk").unwrap().unwrap();
        let column_index = outcome.column;

        // Below the desk's min_width of 40 but above the column minimum
        let report = shelf.resize_column(column_index, 30.0, 40.0).unwrap();
        assert_eq!(report.evicted.len(), 1);
        assert_eq!(report.evicted[0].variant, "desk");
        assert!(report.deleted_columns.is_empty());

        let column = shelf.column(column_index).unwrap();
        assert!(column.is_vacant());
        assert!(column.blocks().is_empty());
        assert_eq!(shelf.fill_entry("desk").unwrap().actual, 0);
    }

    #[test]
    fn test_height_shrink_evicts_by_headroom() {
        let mut shelf = shelf();
        let a = shelf.place_at("shelf", 0, 8).unwrap();
        let b = shelf.place_at("shelf", 0, 2).unwrap();

        // New height 30 => max_z 8; the block at z=8 loses its slot,
        // the one at z=2 keeps headroom.
        let report = shelf.resize_column(0, 80.0, 30.0).unwrap();
        assert_eq!(report.evicted.len(), 1);
        assert!(shelf.block(a).is_none());
        assert!(shelf.block(b).is_some());
    }

    #[test]
    fn test_degenerate_width_deletes_column() {
        let mut shelf = shelf();
        let in_last = shelf.place_at("shelf", 2, 4).unwrap();
        shelf.place_at("shelf", 1, 4).unwrap();

        let report = shelf.resize_column(1, 10.0, 40.0).unwrap();
        assert_eq!(report.deleted_columns, vec![1]);
        assert_eq!(report.evicted.len(), 1);
        assert_eq!(shelf.column_count(), 2);
        assert_eq!(shelf.partitions().len(), 3);

        // The block in the old column 2 now lives in column 1.
        let moved = shelf.block(in_last).unwrap();
        assert_eq!(moved.column, 1);
        assert_eq!(
            shelf.column(1).unwrap().blocks(),
            [in_last]
        );
    }

    #[test]
    fn test_partition_positions_stay_contiguous_after_delete() {
        let mut shelf = shelf();
        shelf.resize_column(1, 10.0, 40.0).unwrap();

        let positions: Vec<_> = shelf.partitions().iter().map(|p| p.position).collect();
        assert_eq!(positions, vec![0.0, 80.0, 160.0]);
        assert_eq!(shelf.start_x(1), Some(80.0));
    }

    #[test]
    fn test_move_partition_resizes_both_neighbors() {
        let mut shelf = shelf();
        let report = shelf.move_partition(1, 15.0).unwrap();
        assert!(report.is_clean());

        assert_eq!(shelf.column(0).unwrap().width(), 95.0);
        assert_eq!(shelf.column(1).unwrap().width(), 65.0);
        assert_eq!(shelf.partitions()[1].position, 95.0);
    }

    #[test]
    fn test_move_partition_can_delete_neighbor() {
        let mut shelf = shelf();
        // Narrow column 1 from 80 to 10: below the 20 minimum.
        let report = shelf.move_partition(1, 70.0).unwrap();
        assert_eq!(report.deleted_columns, vec![1]);
        assert_eq!(shelf.column_count(), 2);
        assert_eq!(shelf.column(0).unwrap().width(), 150.0);
    }

    #[test]
    fn test_outer_partition_cannot_move() {
        let mut shelf = shelf();
        assert!(shelf.move_partition(0, 5.0).is_err());
        assert!(shelf.move_partition(3, 5.0).is_err());
    }

    #[test]
    fn test_registry_reconciled_but_not_refilled() {
        let mut shelf = shelf();
        fill_shelf(&mut shelf).unwrap();
        let desks_before = shelf.fill_entry("desk").unwrap().actual;
        assert!(desks_before > 0);

        let report = shelf.resize_column(0, 30.0, 40.0).unwrap();
        let desk_evictions = report
            .evicted
            .iter()
            .filter(|b| b.variant == "desk")
            .count();

        let entry = shelf.fill_entry("desk").unwrap();
        assert_eq!(entry.actual, desks_before - desk_evictions);
        assert_eq!(entry.actual, entry.installed.len());
        // Quota unchanged: refilling needs an explicit fill pass.
        assert_eq!(entry.quota, desks_before);
    }
}
