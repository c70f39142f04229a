//! Shelf: the owning aggregate of columns, partitions, blocks, and the
//! fill registry.

use std::collections::HashMap;

use shelfgrid_core::{Catalog, Error, OccupancyMode, Result, Variant};

use crate::block::{Block, BlockArena, BlockId};
use crate::column::Column;
use crate::scorer::fitness_value;
use crate::search::{find_best_in_column, find_best_position};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shared geometry configuration for a shelf's columns.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShelfConfig {
    /// Slot pitch shared by all columns.
    pub vertical_step: f64,
    /// Offset of slot 0 from each column's base.
    pub start_step: f64,
    /// Width below which a resized column is deleted outright.
    pub min_column_width: f64,
    /// Depth shared by newly added columns.
    pub depth: f64,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            vertical_step: 4.0,
            start_step: 2.0,
            min_column_width: 20.0,
            depth: 60.0,
        }
    }
}

impl ShelfConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the slot pitch.
    pub fn with_vertical_step(mut self, step: f64) -> Self {
        self.vertical_step = step;
        self
    }

    /// Sets the slot-0 offset.
    pub fn with_start_step(mut self, offset: f64) -> Self {
        self.start_step = offset;
        self
    }

    /// Sets the minimum surviving column width.
    pub fn with_min_column_width(mut self, width: f64) -> Self {
        self.min_column_width = width;
        self
    }

    /// Sets the column depth.
    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = depth;
        self
    }
}

/// A vertical divider between columns. Partition `i` is the left edge of
/// column `i`; one trailing partition closes the last column.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Partition {
    /// Horizontal position of the divider.
    pub position: f64,
}

/// Fill registry entry for one variant.
#[derive(Debug, Clone, Default)]
pub struct FillEntry {
    /// Configured target instance count.
    pub quota: usize,
    /// Number of instances currently installed.
    pub actual: usize,
    /// Ids of the installed instances.
    pub installed: Vec<BlockId>,
}

/// A companion placement request produced by a committed placement,
/// resolved to an absolute column index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InducedRequest {
    /// Variant to place.
    pub variant: String,
    /// Target column.
    pub column: usize,
}

/// The result of committing one placement.
#[derive(Debug, Clone)]
pub struct PlacementOutcome {
    /// Id of the placed block.
    pub block: BlockId,
    /// Column the block was placed in.
    pub column: usize,
    /// Base slot index.
    pub z_index: usize,
    /// Fitness score recorded on the block.
    pub score: f64,
    /// Companion placements the caller should attempt. Requests whose
    /// target column would fall outside the shelf are already dropped.
    pub induced: Vec<InducedRequest>,
}

/// A shelving unit: ordered columns and partitions, the block arena, the
/// variant catalog, and the per-variant fill registry.
#[derive(Debug)]
pub struct Shelf {
    pub(crate) config: ShelfConfig,
    pub(crate) catalog: Catalog,
    pub(crate) columns: Vec<Column>,
    pub(crate) partitions: Vec<Partition>,
    pub(crate) arena: BlockArena,
    pub(crate) registry: HashMap<String, FillEntry>,
}

impl Shelf {
    /// Creates an empty shelf.
    pub fn new(catalog: Catalog, config: ShelfConfig) -> Self {
        Self {
            config,
            catalog,
            columns: Vec::new(),
            partitions: vec![Partition { position: 0.0 }],
            arena: BlockArena::new(),
            registry: HashMap::new(),
        }
    }

    /// Appends a column of the given width and height, returning its index.
    pub fn add_column(&mut self, width: f64, height: f64) -> Result<usize> {
        let column = Column::new(
            width,
            self.config.depth,
            height,
            self.config.vertical_step,
            self.config.start_step,
        );
        column.validate()?;
        if width < self.config.min_column_width {
            return Err(Error::InvalidGeometry(format!(
                "column width {width} below minimum {}",
                self.config.min_column_width
            )));
        }
        let end = self.partitions.last().map_or(0.0, |p| p.position);
        self.columns.push(column);
        self.partitions.push(Partition {
            position: end + width,
        });
        Ok(self.columns.len() - 1)
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ShelfConfig {
        &self.config
    }

    /// Returns the catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the columns in shelf order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns a column by index.
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the partitions; always `column_count() + 1` entries.
    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    /// Horizontal position of a column's left edge.
    pub fn start_x(&self, column_index: usize) -> Option<f64> {
        Some(self.partitions.get(column_index)?.position)
    }

    /// Returns the block arena.
    pub fn blocks(&self) -> &BlockArena {
        &self.arena
    }

    /// Returns a block by id.
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.arena.get(id)
    }

    /// Returns the fill registry entry for a variant, if any instance was
    /// ever tracked for it.
    pub fn fill_entry(&self, variant: &str) -> Option<&FillEntry> {
        self.registry.get(variant)
    }

    /// Total vertical capacity of the shelf, the area-pool capacity unit:
    /// `Σ (height - start_step) / vertical_step` over all columns.
    pub fn vertical_capacity(&self) -> f64 {
        self.columns.iter().map(Column::vertical_capacity).sum()
    }

    /// Places one instance of `variant_name` at the best feasible slot
    /// across the whole shelf. Returns `Ok(None)` when no feasible slot
    /// exists (score-zero search outcome).
    pub fn place_best(&mut self, variant_name: &str) -> Result<Option<PlacementOutcome>> {
        let variant = self.catalog.get(variant_name)?.clone();
        match find_best_position(&self.columns, &self.arena, &self.catalog, &variant) {
            None => Ok(None),
            Some(c) => self.commit(&variant, c.column, c.z_index, c.score).map(Some),
        }
    }

    /// Attempts a companion placement pinned to its target column.
    pub fn place_induced(&mut self, request: &InducedRequest) -> Result<Option<PlacementOutcome>> {
        let variant = self.catalog.get(&request.variant)?.clone();
        if request.column >= self.columns.len() {
            return Ok(None);
        }
        match find_best_in_column(
            &self.columns,
            request.column,
            &self.arena,
            &self.catalog,
            &variant,
        ) {
            None => Ok(None),
            Some(c) => self.commit(&variant, c.column, c.z_index, c.score).map(Some),
        }
    }

    /// Accepts a block at an authoritative position (saved state). Runs the
    /// availability check only; the position is not re-scored, though the
    /// fitness formula is re-evaluated to give the block an eviction rank.
    pub fn place_at(
        &mut self,
        variant_name: &str,
        column_index: usize,
        z_index: usize,
    ) -> Result<BlockId> {
        let variant = self.catalog.get(variant_name)?.clone();
        let column = self.columns.get(column_index).ok_or_else(|| {
            Error::CorruptState(format!("column {column_index} does not exist"))
        })?;

        match variant.occupancy {
            OccupancyMode::Lanes => {
                if !column.is_available(z_index, &variant.footprint) {
                    return Err(Error::CorruptState(format!(
                        "'{variant_name}' not accepted in column {column_index} at slot {z_index}"
                    )));
                }
            }
            OccupancyMode::Cross => {
                if z_index >= column.max_z_index() || column.cross_at(z_index).is_some() {
                    return Err(Error::CorruptState(format!(
                        "'{variant_name}' not accepted in column {column_index} at slot {z_index}"
                    )));
                }
            }
        }

        let score = fitness_value(&variant, column, column_index, self.columns.len(), z_index);
        let outcome = self.commit(&variant, column_index, z_index, score)?;
        Ok(outcome.block)
    }

    /// Installs a cross-channel variant at an explicit index, replacing and
    /// disposing of any prior cross occupant there (last write wins). This
    /// is the direct-placement path; the search path treats an occupied
    /// cross slot as infeasible instead.
    pub fn install_cross(
        &mut self,
        variant_name: &str,
        column_index: usize,
        z_index: usize,
    ) -> Result<BlockId> {
        let variant = self.catalog.get(variant_name)?.clone();
        if variant.occupancy != OccupancyMode::Cross {
            return Err(Error::ConfigError(format!(
                "'{variant_name}' is not a cross-channel variant"
            )));
        }
        let column = self.columns.get(column_index).ok_or_else(|| {
            Error::InvalidGeometry(format!("column {column_index} does not exist"))
        })?;
        if z_index >= column.max_z_index() {
            return Err(Error::InvalidGeometry(format!(
                "slot {z_index} outside column {column_index}"
            )));
        }

        let score = fitness_value(&variant, column, column_index, self.columns.len(), z_index);
        let outcome = self.commit(&variant, column_index, z_index, score)?;
        Ok(outcome.block)
    }

    /// Removes a block: releases its occupancy, drops it from its column's
    /// block list and the arena, and reconciles the fill registry.
    pub fn remove_block(&mut self, id: BlockId) -> Option<Block> {
        let block = self.arena.remove(id)?;
        if let Some(column) = self.columns.get_mut(block.column) {
            column.remove_from_list(id);
            if let Some(variant) = self.catalog.lookup(&block.variant) {
                match variant.occupancy {
                    OccupancyMode::Lanes => column.release(id, block.z_index, &variant.footprint),
                    OccupancyMode::Cross => column.release_cross(id, block.z_index),
                }
            }
        }
        self.registry_remove(&block.variant, id);
        Some(block)
    }

    fn commit(
        &mut self,
        variant: &Variant,
        column_index: usize,
        z_index: usize,
        score: f64,
    ) -> Result<PlacementOutcome> {
        let id = self
            .arena
            .insert(Block::new(&variant.name, column_index, z_index, score));

        match variant.occupancy {
            OccupancyMode::Lanes => {
                if let Err(e) = self.columns[column_index].reserve(
                    column_index,
                    id,
                    z_index,
                    &variant.footprint,
                ) {
                    self.arena.remove(id);
                    return Err(e);
                }
            }
            OccupancyMode::Cross => {
                if let Some(displaced) = self.columns[column_index].install_cross(id, z_index) {
                    self.dispose_displaced(displaced);
                }
            }
        }

        self.columns[column_index].push_block(id);
        self.registry_add(&variant.name, id);

        let induced = variant
            .induced
            .iter()
            .filter_map(|req| {
                let target = column_index as i64 + req.column_offset as i64;
                if (0..self.columns.len() as i64).contains(&target) {
                    Some(InducedRequest {
                        variant: req.variant.clone(),
                        column: target as usize,
                    })
                } else {
                    None
                }
            })
            .collect();

        Ok(PlacementOutcome {
            block: id,
            column: column_index,
            z_index,
            score,
            induced,
        })
    }

    /// Disposes of a cross occupant displaced by a last-write-wins install.
    /// Its channel entry is already overwritten; only the block list, the
    /// arena, and the registry still reference it.
    fn dispose_displaced(&mut self, id: BlockId) {
        if let Some(block) = self.arena.remove(id) {
            if let Some(column) = self.columns.get_mut(block.column) {
                column.remove_from_list(id);
            }
            self.registry_remove(&block.variant, id);
        }
    }

    pub(crate) fn registry_add(&mut self, variant: &str, id: BlockId) {
        let entry = self.registry.entry(variant.to_string()).or_default();
        entry.actual += 1;
        entry.installed.push(id);
    }

    pub(crate) fn registry_remove(&mut self, variant: &str, id: BlockId) {
        if let Some(entry) = self.registry.get_mut(variant) {
            if let Some(i) = entry.installed.iter().position(|&b| b == id) {
                entry.installed.remove(i);
                entry.actual = entry.actual.saturating_sub(1);
            }
        }
    }
}
