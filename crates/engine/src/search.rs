//! Best-position search.
//!
//! Exhaustively evaluates the scorer over every column and slot index and
//! reports the winning candidate. Deterministic: the running best is only
//! replaced on a strictly greater score, so the first column/index reaching
//! the maximum wins and later ties are ignored.

use shelfgrid_core::{Catalog, Variant};

use crate::block::BlockArena;
use crate::column::Column;
use crate::scorer::{score_option, ScoreContext, INFEASIBLE};

/// A winning placement candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Column index within the shelf.
    pub column: usize,
    /// Base slot index.
    pub z_index: usize,
    /// The fitness score of the candidate.
    pub score: f64,
}

/// Finds the best feasible slot for `variant` across all columns.
/// Returns `None` when no candidate beats the zero sentinel.
pub fn find_best_position(
    columns: &[Column],
    blocks: &BlockArena,
    catalog: &Catalog,
    variant: &Variant,
) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for column_index in 0..columns.len() {
        if let Some(candidate) = scan_column(columns, column_index, blocks, catalog, variant) {
            match best {
                Some(b) if candidate.score <= b.score => {}
                _ => best = Some(candidate),
            }
        }
    }
    best
}

/// Finds the best feasible slot for `variant` within a single column.
/// Used for induced companion placements, which are pinned to a column.
pub fn find_best_in_column(
    columns: &[Column],
    column_index: usize,
    blocks: &BlockArena,
    catalog: &Catalog,
    variant: &Variant,
) -> Option<Candidate> {
    scan_column(columns, column_index, blocks, catalog, variant)
}

fn scan_column(
    columns: &[Column],
    column_index: usize,
    blocks: &BlockArena,
    catalog: &Catalog,
    variant: &Variant,
) -> Option<Candidate> {
    let column = &columns[column_index];
    let ctx = ScoreContext {
        column,
        column_index,
        column_count: columns.len(),
        blocks,
        catalog,
    };

    let mut best_score = INFEASIBLE;
    let mut best_z = None;
    for z_index in 0..column.max_z_index() {
        let score = score_option(variant, &ctx, z_index);
        if score > best_score {
            best_score = score;
            best_z = Some(z_index);
        }
    }
    best_z.map(|z_index| Candidate {
        column: column_index,
        z_index,
        score: best_score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfgrid_core::{BlockKind, Footprint};

    fn columns() -> Vec<Column> {
        vec![
            Column::new(60.0, 50.0, 40.0, 4.0, 0.0),
            Column::new(60.0, 50.0, 40.0, 4.0, 0.0),
            Column::new(60.0, 50.0, 40.0, 4.0, 0.0),
        ]
    }

    fn shelf_variant() -> Variant {
        Variant::new("shelf", BlockKind::Shelf)
            .with_footprint(Footprint::center_only(1, 0))
            .with_distance_range(0.0, 200.0, 20.0)
            .with_width_range(0.0, f64::INFINITY, 60.0)
            .with_ideal_horizontal(0.0)
    }

    #[test]
    fn test_search_is_deterministic() {
        let cols = columns();
        let blocks = BlockArena::new();
        let catalog = Catalog::new();
        let variant = shelf_variant();

        let a = find_best_position(&cols, &blocks, &catalog, &variant).unwrap();
        let b = find_best_position(&cols, &blocks, &catalog, &variant).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_first_found_wins_ties() {
        let cols = columns();
        let blocks = BlockArena::new();
        let catalog = Catalog::new();
        // Horizontal weight 0: all columns score identically, so the
        // winner must be the first column scanned.
        let variant = shelf_variant().with_weights(1.0, 0.0, 0.0);

        let best = find_best_position(&cols, &blocks, &catalog, &variant).unwrap();
        assert_eq!(best.column, 0);
        assert_eq!(best.z_index, 5); // option_height 20 == ideal
    }

    #[test]
    fn test_no_feasible_slot_returns_none() {
        let cols = columns();
        let blocks = BlockArena::new();
        let catalog = Catalog::new();
        let variant = shelf_variant().with_width_range(200.0, 300.0, 250.0);

        assert!(find_best_position(&cols, &blocks, &catalog, &variant).is_none());
    }

    #[test]
    fn test_single_column_scan() {
        let cols = columns();
        let blocks = BlockArena::new();
        let catalog = Catalog::new();
        let variant = shelf_variant();

        let best = find_best_in_column(&cols, 2, &blocks, &catalog, &variant).unwrap();
        assert_eq!(best.column, 2);
    }
}
