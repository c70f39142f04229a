//! Column occupancy model.
//!
//! A column is the authoritative record of what occupies which slot, in
//! which lane. Each slot record holds the three parallel lanes plus the
//! `cross` side channel for structural members.

use shelfgrid_core::{Error, Footprint, Lane, Result};

use crate::block::BlockId;

/// Occupancy record for one slot index: three lanes plus the cross channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotRecord {
    /// Left lane occupant.
    pub left: Option<BlockId>,
    /// Right lane occupant.
    pub right: Option<BlockId>,
    /// Center lane occupant.
    pub center: Option<BlockId>,
    /// Cross-member side channel occupant.
    pub cross: Option<BlockId>,
}

impl SlotRecord {
    /// Returns the occupant of a lane.
    pub fn lane(&self, lane: Lane) -> Option<BlockId> {
        match lane {
            Lane::Left => self.left,
            Lane::Right => self.right,
            Lane::Center => self.center,
        }
    }

    fn lane_mut(&mut self, lane: Lane) -> &mut Option<BlockId> {
        match lane {
            Lane::Left => &mut self.left,
            Lane::Right => &mut self.right,
            Lane::Center => &mut self.center,
        }
    }

    /// Returns true if all lanes and the cross channel are empty.
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none() && self.center.is_none() && self.cross.is_none()
    }
}

/// A vertical storage bay with its own discrete slot index space.
#[derive(Debug, Clone)]
pub struct Column {
    width: f64,
    depth: f64,
    height: f64,
    vertical_step: f64,
    start_step: f64,
    slots: Vec<SlotRecord>,
    blocks: Vec<BlockId>,
}

impl Column {
    /// Creates a column with an empty occupancy map.
    pub fn new(width: f64, depth: f64, height: f64, vertical_step: f64, start_step: f64) -> Self {
        let mut column = Self {
            width,
            depth,
            height,
            vertical_step,
            start_step,
            slots: Vec::new(),
            blocks: Vec::new(),
        };
        column.reset();
        column
    }

    /// Validates the column geometry.
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0.0 || self.depth <= 0.0 || self.height <= 0.0 {
            return Err(Error::InvalidGeometry(
                "column dimensions must be positive".into(),
            ));
        }
        if self.vertical_step <= 0.0 {
            return Err(Error::InvalidGeometry(
                "vertical_step must be positive".into(),
            ));
        }
        if self.start_step < 0.0 || self.start_step >= self.height {
            return Err(Error::InvalidGeometry(
                "start_step must lie within the column height".into(),
            ));
        }
        Ok(())
    }

    /// Returns the column width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the column depth.
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Returns the column height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the slot pitch.
    pub fn vertical_step(&self) -> f64 {
        self.vertical_step
    }

    /// Returns the offset of slot 0 from the column base.
    pub fn start_step(&self) -> f64 {
        self.start_step
    }

    /// Number of valid slot indices: `ceil((height - start_step) / vertical_step)`.
    /// All valid indices lie in `[0, max_z_index())`.
    pub fn max_z_index(&self) -> usize {
        let steps = (self.height - self.start_step) / self.vertical_step;
        if steps <= 0.0 {
            0
        } else {
            steps.ceil() as usize
        }
    }

    /// Exact vertical capacity `(height - start_step) / vertical_step`,
    /// the column's contribution to the area quota pool.
    pub fn vertical_capacity(&self) -> f64 {
        ((self.height - self.start_step) / self.vertical_step).max(0.0)
    }

    /// Sets the width. Occupancy is untouched; the resize cascade decides
    /// which blocks still fit.
    pub fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    /// Sets the depth.
    pub fn set_depth(&mut self, depth: f64) {
        self.depth = depth;
    }

    /// Sets the height and resizes the occupancy map to the new index
    /// range. Occupants of truncated slots are dropped from the map; the
    /// resize cascade evicts the blocks that held them.
    pub fn set_height(&mut self, height: f64) {
        self.height = height;
        self.slots.resize(self.max_z_index(), SlotRecord::default());
    }

    /// Clears the occupancy map to one empty record per index.
    pub fn reset(&mut self) {
        self.slots = vec![SlotRecord::default(); self.max_z_index()];
    }

    /// Returns the slot record at an index.
    pub fn slot(&self, z_index: usize) -> Option<&SlotRecord> {
        self.slots.get(z_index)
    }

    /// Ids of blocks installed in this column, in insertion order.
    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    /// Appends a block to the column's block list.
    pub fn push_block(&mut self, id: BlockId) {
        self.blocks.push(id);
    }

    /// Removes a block from the column's block list.
    pub fn remove_from_list(&mut self, id: BlockId) -> bool {
        match self.blocks.iter().position(|&b| b == id) {
            Some(i) => {
                self.blocks.remove(i);
                true
            }
            None => false,
        }
    }

    /// Returns true if every lane window of `footprint` at `z_index` lies
    /// within `[0, max_z_index())` and is currently unoccupied.
    pub fn is_available(&self, z_index: usize, footprint: &Footprint) -> bool {
        let max_z = self.max_z_index();
        for lane in Lane::ALL {
            let window = footprint.window(lane);
            let range = match window.range_at(z_index) {
                Some(r) => r,
                None => return false,
            };
            if range.end > max_z {
                return false;
            }
            for z in range {
                if self.slots[z].lane(lane).is_some() {
                    return false;
                }
            }
        }
        true
    }

    /// Marks every lane window of `footprint` at `z_index` as occupied by
    /// `block`. The caller must have confirmed availability; an occupied
    /// slot here is an internal-consistency failure, reported without
    /// mutating any occupancy.
    ///
    /// `column_index` is only used for error context.
    pub fn reserve(
        &mut self,
        column_index: usize,
        block: BlockId,
        z_index: usize,
        footprint: &Footprint,
    ) -> Result<()> {
        let max_z = self.max_z_index();
        let mut ranges = Vec::with_capacity(Lane::ALL.len());
        for lane in Lane::ALL {
            let range = footprint
                .window(lane)
                .range_at(z_index)
                .ok_or(Error::OccupancyConflict {
                    column: column_index,
                    z_index,
                    lane: lane.name(),
                })?;
            if range.end > max_z {
                return Err(Error::OccupancyConflict {
                    column: column_index,
                    z_index: range.end.saturating_sub(1),
                    lane: lane.name(),
                });
            }
            for z in range.clone() {
                if self.slots[z].lane(lane).is_some() {
                    return Err(Error::OccupancyConflict {
                        column: column_index,
                        z_index: z,
                        lane: lane.name(),
                    });
                }
            }
            ranges.push((lane, range));
        }
        for (lane, range) in ranges {
            for z in range {
                *self.slots[z].lane_mut(lane) = Some(block);
            }
        }
        Ok(())
    }

    /// Inverse of [`reserve`](Self::reserve): clears every lane entry held
    /// by `block` within its footprint windows. Indices beyond the current
    /// map (after a height shrink) are skipped.
    pub fn release(&mut self, block: BlockId, z_index: usize, footprint: &Footprint) {
        for lane in Lane::ALL {
            let range = match footprint.window(lane).range_at(z_index) {
                Some(r) => r,
                None => continue,
            };
            for z in range {
                if z >= self.slots.len() {
                    break;
                }
                let entry = self.slots[z].lane_mut(lane);
                if *entry == Some(block) {
                    *entry = None;
                }
            }
        }
    }

    /// Returns the cross-channel occupant at an index.
    pub fn cross_at(&self, z_index: usize) -> Option<BlockId> {
        self.slots.get(z_index)?.cross
    }

    /// Installs a cross member at a single index, returning the displaced
    /// prior occupant (last-write-wins; the caller disposes of it).
    /// `z_index` must be below [`max_z_index`](Self::max_z_index).
    pub fn install_cross(&mut self, block: BlockId, z_index: usize) -> Option<BlockId> {
        let slot = &mut self.slots[z_index];
        slot.cross.replace(block)
    }

    /// Clears the cross channel at an index if `block` holds it.
    pub fn release_cross(&mut self, block: BlockId, z_index: usize) {
        if let Some(slot) = self.slots.get_mut(z_index) {
            if slot.cross == Some(block) {
                slot.cross = None;
            }
        }
    }

    /// Returns true if no slot in the column holds any occupant.
    pub fn is_vacant(&self) -> bool {
        self.slots.iter().all(SlotRecord::is_empty)
    }
}
