//! Lane and footprint types for slot occupancy.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the three parallel occupancy tracks within a column.
///
/// The auxiliary `cross` channel for structural members is not a lane: it
/// holds single-index occupants and is managed separately by the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Lane {
    /// Left occupancy track.
    Left,
    /// Right occupancy track.
    Right,
    /// Center occupancy track.
    Center,
}

impl Lane {
    /// All three lanes in fixed order.
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Right, Lane::Center];

    /// Returns the lane name as used in error messages and saved state.
    pub fn name(self) -> &'static str {
        match self {
            Lane::Left => "left",
            Lane::Right => "right",
            Lane::Center => "center",
        }
    }
}

/// The occupancy window of one lane relative to a block's base slot index.
///
/// A window covers `[z - below, z + above)`; a window with `above == 0` and
/// `below == 0` occupies nothing in its lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LaneWindow {
    /// Number of slots occupied at and above the base index.
    pub above: u32,
    /// Number of slots occupied below the base index.
    pub below: u32,
}

impl LaneWindow {
    /// Creates a window covering `[z - below, z + above)`.
    pub fn new(above: u32, below: u32) -> Self {
        Self { above, below }
    }

    /// A window that occupies nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if the window occupies no slots.
    pub fn is_empty(self) -> bool {
        self.above == 0 && self.below == 0
    }

    /// Resolves the window to an absolute slot range for a base index.
    ///
    /// Returns `None` if the window would extend below slot 0.
    pub fn range_at(self, z_index: usize) -> Option<std::ops::Range<usize>> {
        let start = z_index.checked_sub(self.below as usize)?;
        Some(start..z_index + self.above as usize)
    }
}

/// Per-lane occupancy footprint of a block variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Footprint {
    /// Window reserved in the left lane.
    pub left: LaneWindow,
    /// Window reserved in the right lane.
    pub right: LaneWindow,
    /// Window reserved in the center lane.
    pub center: LaneWindow,
}

impl Footprint {
    /// Creates a footprint from per-lane windows.
    pub fn new(left: LaneWindow, right: LaneWindow, center: LaneWindow) -> Self {
        Self {
            left,
            right,
            center,
        }
    }

    /// A footprint occupying `above` slots in the center lane only.
    pub fn center_only(above: u32, below: u32) -> Self {
        Self {
            center: LaneWindow::new(above, below),
            ..Self::default()
        }
    }

    /// A footprint occupying the same window in all three lanes.
    pub fn full_width(above: u32, below: u32) -> Self {
        let w = LaneWindow::new(above, below);
        Self::new(w, w, w)
    }

    /// Returns the window for a lane.
    pub fn window(&self, lane: Lane) -> LaneWindow {
        match lane {
            Lane::Left => self.left,
            Lane::Right => self.right,
            Lane::Center => self.center,
        }
    }

    /// Vertical extent of the center lane (`above + below`), the unit used
    /// by the area-pool quota computation.
    pub fn center_extent(&self) -> u32 {
        self.center.above + self.center.below
    }

    /// Largest `above` component across lanes, the headroom a placed block
    /// needs to survive a column height change.
    pub fn max_above(&self) -> u32 {
        self.left.above.max(self.right.above).max(self.center.above)
    }
}
