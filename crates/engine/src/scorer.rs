//! Block placement scorer.
//!
//! Pure functions from (variant, column, candidate index) to a fitness
//! score. A score of [`INFEASIBLE`] (exactly `0.0`) means the candidate is
//! rejected; any other value, including negative ones, is a valid fitness
//! where higher is better.

use shelfgrid_core::{Catalog, FitRule, OccupancyMode, Variant};

use crate::block::BlockArena;
use crate::column::Column;

/// The score sentinel for an infeasible candidate.
///
/// The weighted formula can in principle produce exactly `0.0` for a
/// feasible candidate; that collision is accepted and the candidate is
/// treated as infeasible, matching the established allocator behavior.
pub const INFEASIBLE: f64 = 0.0;

/// Read-only context a score evaluation runs against.
#[derive(Clone, Copy)]
pub struct ScoreContext<'a> {
    /// The candidate column.
    pub column: &'a Column,
    /// Index of the candidate column within the shelf.
    pub column_index: usize,
    /// Total number of columns in the shelf.
    pub column_count: usize,
    /// Arena holding the installed blocks.
    pub blocks: &'a BlockArena,
    /// Catalog, consulted for kind-based fit rules.
    pub catalog: &'a Catalog,
}

/// Scores placing `variant` with its base at `z_index` in the context
/// column. Returns [`INFEASIBLE`] if any feasibility gate fails.
pub fn score_option(variant: &Variant, ctx: &ScoreContext<'_>, z_index: usize) -> f64 {
    if !passes_occupancy_gate(variant, ctx.column, z_index) {
        return INFEASIBLE;
    }
    if !passes_cardinality_gate(variant, ctx) {
        return INFEASIBLE;
    }

    let column = ctx.column;
    let option_height = z_index as f64 * column.vertical_step();
    let distance = if variant.reference_is_bottom {
        option_height
    } else {
        column.height() - option_height
    };
    if distance < variant.min_distance || distance > variant.max_distance {
        return INFEASIBLE;
    }
    if column.width() < variant.min_width || column.width() > variant.max_width {
        return INFEASIBLE;
    }

    fitness_value(variant, column, ctx.column_index, ctx.column_count, z_index)
}

/// The weighted fitness formula with no feasibility gates applied.
///
/// Used on its own when a position is already authoritative (restoring
/// saved state) but a score is still needed for eviction ranking.
pub fn fitness_value(
    variant: &Variant,
    column: &Column,
    column_index: usize,
    column_count: usize,
    z_index: usize,
) -> f64 {
    let option_height = z_index as f64 * column.vertical_step();
    let distance = if variant.reference_is_bottom {
        option_height
    } else {
        column.height() - option_height
    };

    let vertical_score = (distance - variant.ideal_distance).abs() / column.height();
    let horizontal_score =
        (column_index as f64 / column_count as f64 - variant.ideal_horizontal).abs();
    let width_score = (column.width() - variant.ideal_width).abs() / variant.ideal_width;

    100.0
        - (vertical_score * variant.vertical_weight
            + horizontal_score * variant.horizontal_weight
            + width_score * variant.width_weight)
}

/// Fit-only check used by the resize cascade: the column width must still
/// be within the variant's bounds and the slot range above the base index
/// must still exist. Current occupancy is deliberately not consulted.
pub fn fits_column(variant: &Variant, column: &Column, z_index: usize) -> bool {
    if column.width() < variant.min_width || column.width() > variant.max_width {
        return false;
    }
    let max_z = column.max_z_index();
    match variant.occupancy {
        OccupancyMode::Lanes => match max_z.checked_sub(z_index) {
            Some(headroom) => headroom >= variant.footprint.max_above() as usize,
            None => false,
        },
        OccupancyMode::Cross => z_index < max_z,
    }
}

fn passes_occupancy_gate(variant: &Variant, column: &Column, z_index: usize) -> bool {
    match variant.occupancy {
        OccupancyMode::Lanes => column.is_available(z_index, &variant.footprint),
        // Cross members consult the cross channel instead of the lanes.
        OccupancyMode::Cross => {
            z_index < column.max_z_index() && column.cross_at(z_index).is_none()
        }
    }
}

fn passes_cardinality_gate(variant: &Variant, ctx: &ScoreContext<'_>) -> bool {
    if variant.one_per_column {
        let duplicate = ctx
            .column
            .blocks()
            .iter()
            .filter_map(|&id| ctx.blocks.get(id))
            .any(|b| b.variant == variant.name);
        if duplicate {
            return false;
        }
    }
    if variant.fit == FitRule::KindUniqueInColumn {
        let same_kind = ctx
            .column
            .blocks()
            .iter()
            .filter_map(|&id| ctx.blocks.get(id))
            .filter_map(|b| ctx.catalog.lookup(&b.variant))
            .any(|v| v.kind == variant.kind);
        if same_kind {
            return false;
        }
    }
    true
}
