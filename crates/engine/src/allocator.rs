//! Shelf fill allocator.
//!
//! Computes per-variant quotas from the two capacity pools and drives
//! repeated best-position searches to auto-populate a shelf. Greedy and
//! priority-ordered: a high-priority variant can consume slots that would
//! have produced a denser packing had a lower-priority variant gone first.

use shelfgrid_core::Result;

use crate::shelf::Shelf;

/// The capacity pool a variant's quota is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    /// Capacity unit: the number of columns in the shelf.
    PerColumn,
    /// Capacity unit: total vertical capacity, divided per variant by its
    /// center-lane footprint so taller units consume more per instance.
    PerArea,
}

/// A computed quota for one variant.
#[derive(Debug, Clone, PartialEq)]
pub struct QuotaTarget {
    /// Variant name.
    pub variant: String,
    /// Pool the quota was computed against.
    pub pool: Pool,
    /// Rounded target instance count.
    pub target: usize,
}

/// Per-variant view for the fill-preference UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillStatus {
    /// Configured target count (last written quota).
    pub quota: usize,
    /// Instances currently installed.
    pub actual: usize,
    /// Capacity-derived cap for the slider.
    pub max_fill: usize,
}

/// Outcome of a fill pass.
#[derive(Debug, Clone, Default)]
pub struct FillReport {
    /// Total insertions the quota computation asked for.
    pub requested: usize,
    /// Insertions committed, induced companion placements included.
    pub placed: usize,
    /// Variants whose fill stopped early on a zero-score attempt.
    pub exhausted: Vec<String>,
}

/// Computes the rounded quota target of every catalog variant against its
/// pool, in catalog source order.
pub fn quota_targets(shelf: &Shelf) -> Vec<QuotaTarget> {
    let catalog = shelf.catalog();
    let column_sum: f64 = catalog
        .iter()
        .filter(|v| v.fill_per_column)
        .map(|v| v.fill_coefficient)
        .sum();
    let area_sum: f64 = catalog
        .iter()
        .filter(|v| !v.fill_per_column)
        .map(|v| v.fill_coefficient)
        .sum();

    let column_capacity = shelf.column_count() as f64;
    let area_capacity = shelf.vertical_capacity();

    catalog
        .iter()
        .map(|v| {
            let (pool, fractional) = if v.fill_per_column {
                let fraction = if column_sum > 0.0 {
                    v.fill_coefficient / column_sum
                } else {
                    0.0
                };
                (Pool::PerColumn, fraction * column_capacity)
            } else {
                let fraction = if area_sum > 0.0 {
                    v.fill_coefficient / area_sum
                } else {
                    0.0
                };
                let extent = v.footprint.center_extent().max(1) as f64;
                (Pool::PerArea, fraction * area_capacity / extent)
            };
            QuotaTarget {
                variant: v.name.clone(),
                pool,
                target: fractional.round() as usize,
            }
        })
        .collect()
}

/// Auto-populates the shelf: every variant is filled up to its quota in
/// descending priority order. The first zero-score attempt stops filling
/// that variant only.
pub fn fill_shelf(shelf: &mut Shelf) -> Result<FillReport> {
    let targets: std::collections::HashMap<String, usize> = quota_targets(shelf)
        .into_iter()
        .map(|t| (t.variant, t.target))
        .collect();
    let order: Vec<String> = shelf
        .catalog()
        .by_priority()
        .iter()
        .map(|v| v.name.clone())
        .collect();

    let mut report = FillReport::default();
    for name in order {
        let target = targets.get(&name).copied().unwrap_or(0);
        shelf.registry.entry(name.clone()).or_default().quota = target;

        let actual = shelf.fill_entry(&name).map_or(0, |e| e.actual);
        let to_fill = target.saturating_sub(actual);
        report.requested += to_fill;

        for _ in 0..to_fill {
            match shelf.place_best(&name)? {
                None => {
                    log::debug!("no remaining room for '{name}', moving on");
                    report.exhausted.push(name.clone());
                    break;
                }
                Some(outcome) => {
                    report.placed += 1;
                    for request in &outcome.induced {
                        match shelf.place_induced(request)? {
                            Some(_) => report.placed += 1,
                            None => log::debug!(
                                "induced '{}' found no slot in column {}",
                                request.variant,
                                request.column
                            ),
                        }
                    }
                }
            }
        }
    }
    Ok(report)
}

/// Sets the desired instance count for a variant, evicting the
/// worst-scoring instances on a decrease and inserting via best-position
/// search on an increase. Returns the resulting installed count.
pub fn set_fill_count(shelf: &mut Shelf, variant: &str, target: usize) -> Result<usize> {
    shelf.catalog().get(variant)?;
    shelf.registry.entry(variant.to_string()).or_default().quota = target;

    loop {
        let actual = shelf.fill_entry(variant).map_or(0, |e| e.actual);
        if actual <= target {
            break;
        }
        let worst = shelf
            .fill_entry(variant)
            .and_then(|e| {
                e.installed
                    .iter()
                    .copied()
                    .min_by(|&a, &b| {
                        let sa = shelf.block(a).map_or(f64::INFINITY, |blk| blk.score);
                        let sb = shelf.block(b).map_or(f64::INFINITY, |blk| blk.score);
                        sa.total_cmp(&sb)
                    })
            });
        match worst {
            Some(id) => {
                shelf.remove_block(id);
            }
            None => break,
        }
    }

    loop {
        let actual = shelf.fill_entry(variant).map_or(0, |e| e.actual);
        if actual >= target {
            break;
        }
        match shelf.place_best(variant)? {
            None => {
                log::debug!("no remaining room for '{variant}' at target {target}");
                break;
            }
            Some(outcome) => {
                for request in &outcome.induced {
                    if shelf.place_induced(request)?.is_none() {
                        log::debug!(
                            "induced '{}' found no slot in column {}",
                            request.variant,
                            request.column
                        );
                    }
                }
            }
        }
    }

    Ok(shelf.fill_entry(variant).map_or(0, |e| e.actual))
}

/// Returns the `{quota, actual, max_fill}` view the fill-preference UI
/// binds to.
pub fn fill_status(shelf: &Shelf, variant: &str) -> Result<FillStatus> {
    shelf.catalog().get(variant)?;
    let max_fill = quota_targets(shelf)
        .into_iter()
        .find(|t| t.variant == variant)
        .map_or(0, |t| t.target);
    let (quota, actual) = shelf
        .fill_entry(variant)
        .map_or((0, 0), |e| (e.quota, e.actual));
    Ok(FillStatus {
        quota,
        actual,
        max_fill,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shelf::ShelfConfig;
    use shelfgrid_core::{BlockKind, Catalog, Footprint, Variant};

    fn area_catalog() -> Catalog {
        Catalog::new()
            .with(
                Variant::new("shelf", BlockKind::Shelf)
                    .with_footprint(Footprint::center_only(1, 0))
                    .with_width_range(0.0, f64::INFINITY, 60.0)
                    .with_priority(10)
                    .with_fill_coefficient(0.8),
            )
            .with(
                Variant::new("bin", BlockKind::Bin)
                    .with_footprint(Footprint::center_only(1, 0))
                    .with_width_range(0.0, f64::INFINITY, 40.0)
                    .with_priority(4)
                    .with_fill_coefficient(0.2),
            )
    }

    fn shelf_with_capacity(catalog: Catalog, columns: usize, height: f64) -> Shelf {
        let config = ShelfConfig::default()
            .with_vertical_step(4.0)
            .with_start_step(0.0);
        let mut shelf = Shelf::new(catalog, config);
        for _ in 0..columns {
            shelf.add_column(60.0, height).unwrap();
        }
        shelf
    }

    #[test]
    fn test_area_pool_proportions() {
        // 10 columns x (40 / 4) slots = capacity 100; coefficients 0.8/0.2
        // with unit footprints => quotas 80 and 20.
        let shelf = shelf_with_capacity(area_catalog(), 10, 40.0);
        assert_eq!(shelf.vertical_capacity(), 100.0);

        let targets = quota_targets(&shelf);
        assert_eq!(targets[0].target, 80);
        assert_eq!(targets[0].pool, Pool::PerArea);
        assert_eq!(targets[1].target, 20);
    }

    #[test]
    fn test_taller_units_consume_more_pool() {
        let catalog = Catalog::new().with(
            Variant::new("drawer", BlockKind::Drawer)
                .with_footprint(Footprint::center_only(2, 0))
                .with_width_range(0.0, f64::INFINITY, 60.0)
                .with_fill_coefficient(1.0),
        );
        let shelf = shelf_with_capacity(catalog, 10, 40.0);
        // capacity 100, extent 2 => 50 instances
        assert_eq!(quota_targets(&shelf)[0].target, 50);
    }

    #[test]
    fn test_per_column_pool() {
        let catalog = Catalog::new()
            .with(
                Variant::new("desk", BlockKind::Desk)
                    .with_width_range(0.0, f64::INFINITY, 60.0)
                    .with_fill_per_column(true)
                    .with_fill_coefficient(0.5),
            )
            .with(
                Variant::new("cross-support", BlockKind::CrossSupport)
                    .with_width_range(0.0, f64::INFINITY, 60.0)
                    .with_fill_per_column(true)
                    .with_fill_coefficient(0.5),
            );
        let shelf = shelf_with_capacity(catalog, 6, 40.0);
        let targets = quota_targets(&shelf);
        assert_eq!(targets[0].target, 3);
        assert_eq!(targets[1].target, 3);
        assert_eq!(targets[0].pool, Pool::PerColumn);
    }

    #[test]
    fn test_fill_respects_quota_conservation() {
        let mut shelf = shelf_with_capacity(area_catalog(), 3, 40.0);
        let report = fill_shelf(&mut shelf).unwrap();
        assert!(report.placed <= report.requested);

        for target in quota_targets(&shelf) {
            let entry = shelf.fill_entry(&target.variant).unwrap();
            assert!(entry.actual <= target.target + 1);
            assert_eq!(entry.actual, entry.installed.len());
            assert_eq!(entry.quota, target.target);
        }
    }

    #[test]
    fn test_fill_stops_per_variant_on_exhaustion() {
        // The shelf variant only accepts option heights up to 8, i.e.
        // slots 0..=2: its quota of 8 cannot be met. The bin quota must
        // still be attempted afterwards.
        let catalog = Catalog::new()
            .with(
                Variant::new("shelf", BlockKind::Shelf)
                    .with_distance_range(0.0, 8.0, 0.0)
                    .with_width_range(0.0, f64::INFINITY, 60.0)
                    .with_priority(10)
                    .with_fill_coefficient(0.8),
            )
            .with(
                Variant::new("bin", BlockKind::Bin)
                    .with_width_range(0.0, f64::INFINITY, 40.0)
                    .with_priority(4)
                    .with_fill_coefficient(0.2),
            );
        let mut shelf = shelf_with_capacity(catalog, 1, 40.0);
        let report = fill_shelf(&mut shelf).unwrap();

        assert!(report.exhausted.contains(&"shelf".to_string()));
        assert_eq!(shelf.fill_entry("shelf").unwrap().actual, 3);
        assert_eq!(shelf.fill_entry("bin").unwrap().actual, 2);
    }

    #[test]
    fn test_set_fill_count_decrease_evicts_worst_first() {
        let mut shelf = shelf_with_capacity(area_catalog(), 3, 40.0);
        for _ in 0..5 {
            shelf.place_best("shelf").unwrap().unwrap();
        }

        let before: Vec<_> = shelf
            .fill_entry("shelf")
            .unwrap()
            .installed
            .iter()
            .map(|&id| (id, shelf.block(id).unwrap().score))
            .collect();

        let remaining = set_fill_count(&mut shelf, "shelf", 3).unwrap();
        assert_eq!(remaining, 3);

        // Every surviving instance scores at least as well as every
        // evicted one.
        let evicted_max = before
            .iter()
            .filter(|(id, _)| shelf.block(*id).is_none())
            .map(|&(_, s)| s)
            .fold(f64::NEG_INFINITY, f64::max);
        let surviving_min = before
            .iter()
            .filter(|(id, _)| shelf.block(*id).is_some())
            .map(|&(_, s)| s)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(before.len() - 3, 2);
        assert!(surviving_min >= evicted_max);
    }

    #[test]
    fn test_set_fill_count_increase_inserts() {
        let mut shelf = shelf_with_capacity(area_catalog(), 3, 40.0);
        let actual = set_fill_count(&mut shelf, "bin", 4).unwrap();
        assert_eq!(actual, 4);
        assert_eq!(fill_status(&shelf, "bin").unwrap().quota, 4);
    }

    #[test]
    fn test_fill_status_reports_capacity_cap() {
        let shelf = shelf_with_capacity(area_catalog(), 10, 40.0);
        let status = fill_status(&shelf, "shelf").unwrap();
        assert_eq!(status.max_fill, 80);
        assert_eq!(status.actual, 0);
    }
}
