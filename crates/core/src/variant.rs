//! Block variant catalog entries.
//!
//! A variant is pure data: the footprint, placement range, and scoring
//! parameters of one kind of placeable block. Non-standard blocks (cross
//! supports, stations with companion placements) are expressed through the
//! capability fields rather than through per-type subclassing.

use crate::error::{Error, Result};
use crate::footprint::Footprint;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Broad category of a block, used by [`FitRule::KindUniqueInColumn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BlockKind {
    /// Fixed shelf board.
    Shelf,
    /// Pull-out drawer unit.
    Drawer,
    /// Open storage bin.
    Bin,
    /// Work desk surface.
    Desk,
    /// Hanging rack.
    Rack,
    /// Structural cross member.
    CrossSupport,
    /// Work station with companion blocks.
    Station,
}

/// Which occupancy channel a variant reserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OccupancyMode {
    /// Reserve the three lane windows described by the footprint.
    #[default]
    Lanes,
    /// Reserve the `cross` side channel at the base index only.
    /// Installation displaces a prior cross occupant at that index.
    Cross,
}

/// Feasibility rule applied before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FitRule {
    /// Standard lane availability, range, and width gates.
    #[default]
    Standard,
    /// Additionally reject if any block of the same [`BlockKind`] is
    /// already installed anywhere in the column, regardless of lane fit.
    KindUniqueInColumn,
}

/// A companion placement requested when a block of this variant is
/// committed. The engine returns these to the caller; it never mutates
/// neighboring columns as a side effect of a single placement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InducedPlacement {
    /// Variant to place.
    pub variant: String,
    /// Column offset relative to the committed placement (-1 = left
    /// neighbor, +1 = right neighbor).
    pub column_offset: i32,
}

/// Catalog entry describing one kind of placeable block.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Variant {
    /// Unique variant name.
    pub name: String,

    /// Broad category.
    pub kind: BlockKind,

    /// Per-lane slot occupancy relative to the base index.
    pub footprint: Footprint,

    /// Minimum distance from the reference edge (absolute units).
    pub min_distance: f64,

    /// Maximum distance from the reference edge.
    pub max_distance: f64,

    /// Ideal distance from the reference edge.
    pub ideal_distance: f64,

    /// Whether distances are measured from the column bottom (otherwise
    /// from the top).
    pub reference_is_bottom: bool,

    /// Preferred horizontal position as a fraction 0..1 of shelf width.
    pub ideal_horizontal: f64,

    /// Minimum column width this block fits in.
    pub min_width: f64,

    /// Maximum column width this block fits in.
    pub max_width: f64,

    /// Ideal column width.
    pub ideal_width: f64,

    /// Weight of the vertical distance term in the fitness score.
    pub vertical_weight: f64,

    /// Weight of the horizontal position term.
    pub horizontal_weight: f64,

    /// Weight of the column width term.
    pub width_weight: f64,

    /// At most one instance of this variant per column.
    pub one_per_column: bool,

    /// Quota is drawn from the per-column pool rather than the area pool.
    pub fill_per_column: bool,

    /// Fill order priority (higher fills first).
    pub priority: i32,

    /// Share of the capacity pool this variant claims, normalized against
    /// the other variants in the same pool.
    pub fill_coefficient: f64,

    /// Occupancy channel this variant reserves.
    pub occupancy: OccupancyMode,

    /// Feasibility rule applied before scoring.
    pub fit: FitRule,

    /// Companion placements requested on commit.
    pub induced: Vec<InducedPlacement>,
}

impl Variant {
    /// Creates a variant with neutral defaults: single center slot,
    /// unconstrained placement range, unit weights.
    pub fn new(name: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            name: name.into(),
            kind,
            footprint: Footprint::center_only(1, 0),
            min_distance: 0.0,
            max_distance: f64::INFINITY,
            ideal_distance: 0.0,
            reference_is_bottom: true,
            ideal_horizontal: 0.5,
            min_width: 0.0,
            max_width: f64::INFINITY,
            ideal_width: 60.0,
            vertical_weight: 1.0,
            horizontal_weight: 1.0,
            width_weight: 1.0,
            one_per_column: false,
            fill_per_column: false,
            priority: 0,
            fill_coefficient: 0.0,
            occupancy: OccupancyMode::default(),
            fit: FitRule::default(),
            induced: Vec::new(),
        }
    }

    /// Sets the footprint.
    pub fn with_footprint(mut self, footprint: Footprint) -> Self {
        self.footprint = footprint;
        self
    }

    /// Sets the vertical placement range and ideal, measured from the
    /// reference edge.
    pub fn with_distance_range(mut self, min: f64, max: f64, ideal: f64) -> Self {
        self.min_distance = min;
        self.max_distance = max;
        self.ideal_distance = ideal;
        self
    }

    /// Sets which edge distances are measured from.
    pub fn with_reference_bottom(mut self, bottom: bool) -> Self {
        self.reference_is_bottom = bottom;
        self
    }

    /// Sets the preferred horizontal position (fraction 0..1).
    pub fn with_ideal_horizontal(mut self, fraction: f64) -> Self {
        self.ideal_horizontal = fraction;
        self
    }

    /// Sets the column width bounds and ideal.
    pub fn with_width_range(mut self, min: f64, max: f64, ideal: f64) -> Self {
        self.min_width = min;
        self.max_width = max;
        self.ideal_width = ideal;
        self
    }

    /// Sets the three scoring weights.
    pub fn with_weights(mut self, vertical: f64, horizontal: f64, width: f64) -> Self {
        self.vertical_weight = vertical;
        self.horizontal_weight = horizontal;
        self.width_weight = width;
        self
    }

    /// Limits the variant to one instance per column.
    pub fn with_one_per_column(mut self, one: bool) -> Self {
        self.one_per_column = one;
        self
    }

    /// Draws the quota from the per-column pool.
    pub fn with_fill_per_column(mut self, per_column: bool) -> Self {
        self.fill_per_column = per_column;
        self
    }

    /// Sets the fill priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the fill coefficient.
    pub fn with_fill_coefficient(mut self, coefficient: f64) -> Self {
        self.fill_coefficient = coefficient;
        self
    }

    /// Sets the occupancy mode.
    pub fn with_occupancy(mut self, mode: OccupancyMode) -> Self {
        self.occupancy = mode;
        self
    }

    /// Sets the feasibility rule.
    pub fn with_fit_rule(mut self, rule: FitRule) -> Self {
        self.fit = rule;
        self
    }

    /// Adds a companion placement request.
    pub fn with_induced(mut self, variant: impl Into<String>, column_offset: i32) -> Self {
        self.induced.push(InducedPlacement {
            variant: variant.into(),
            column_offset,
        });
        self
    }

    /// Validates the variant definition.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::InvalidVariant("name must not be empty".into()));
        }
        if self.min_distance > self.max_distance {
            return Err(Error::InvalidVariant(format!(
                "{}: min_distance exceeds max_distance",
                self.name
            )));
        }
        if self.min_width > self.max_width {
            return Err(Error::InvalidVariant(format!(
                "{}: min_width exceeds max_width",
                self.name
            )));
        }
        if self.ideal_width <= 0.0 {
            return Err(Error::InvalidVariant(format!(
                "{}: ideal_width must be positive",
                self.name
            )));
        }
        if !(0.0..=1.0).contains(&self.ideal_horizontal) {
            return Err(Error::InvalidVariant(format!(
                "{}: ideal_horizontal must be within 0..=1",
                self.name
            )));
        }
        if self.fill_coefficient < 0.0 {
            return Err(Error::InvalidVariant(format!(
                "{}: fill_coefficient must not be negative",
                self.name
            )));
        }
        Ok(())
    }
}
