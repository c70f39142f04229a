//! Variant catalog: the ordered table of placeable block definitions.

use crate::error::{Error, Result};
use crate::footprint::Footprint;
use crate::variant::{BlockKind, FitRule, OccupancyMode, Variant};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered collection of block variants, keyed by name.
///
/// Source order is significant: the allocator uses it to break priority
/// ties, so two catalogs with the same entries in a different order are not
/// interchangeable.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Catalog {
    variants: Vec<Variant>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variant, validating it first. Replaces an existing entry
    /// with the same name in place, preserving source order.
    pub fn add(&mut self, variant: Variant) -> Result<()> {
        variant.validate()?;
        match self.variants.iter().position(|v| v.name == variant.name) {
            Some(i) => self.variants[i] = variant,
            None => self.variants.push(variant),
        }
        Ok(())
    }

    /// Builder-style [`add`](Self::add) that panics on an invalid variant.
    /// Intended for static catalog definitions.
    pub fn with(mut self, variant: Variant) -> Self {
        self.add(variant).unwrap_or_else(|e| panic!("{e}"));
        self
    }

    /// Looks up a variant by name.
    pub fn get(&self, name: &str) -> Result<&Variant> {
        self.lookup(name)
            .ok_or_else(|| Error::UnknownVariant(name.to_string()))
    }

    /// Looks up a variant by name, returning `None` on a miss.
    pub fn lookup(&self, name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.name == name)
    }

    /// Returns true if the catalog contains a variant with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Iterates variants in source order.
    pub fn iter(&self) -> impl Iterator<Item = &Variant> {
        self.variants.iter()
    }

    /// Number of variants.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Returns true if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Variants in descending priority order, source order for ties.
    pub fn by_priority(&self) -> Vec<&Variant> {
        let mut ordered: Vec<&Variant> = self.variants.iter().collect();
        ordered.sort_by(|a, b| b.priority.cmp(&a.priority));
        ordered
    }

    /// The standard proportioned mix of storage blocks.
    pub fn standard() -> Self {
        Self::new()
            .with(
                Variant::new("miter-station", BlockKind::Station)
                    .with_footprint(Footprint::full_width(4, 0))
                    .with_distance_range(60.0, 110.0, 75.0)
                    .with_width_range(60.0, 160.0, 90.0)
                    .with_one_per_column(true)
                    .with_fill_per_column(true)
                    .with_priority(15)
                    .with_fill_coefficient(0.1)
                    .with_fit_rule(FitRule::KindUniqueInColumn)
                    .with_induced("desk", -1)
                    .with_induced("desk", 1),
            )
            .with(
                Variant::new("desk", BlockKind::Desk)
                    .with_footprint(Footprint::full_width(3, 0))
                    .with_distance_range(60.0, 110.0, 75.0)
                    .with_width_range(40.0, 140.0, 80.0)
                    .with_one_per_column(true)
                    .with_fill_per_column(true)
                    .with_priority(12)
                    .with_fill_coefficient(0.5)
                    .with_fit_rule(FitRule::KindUniqueInColumn),
            )
            .with(
                Variant::new("shelf", BlockKind::Shelf)
                    .with_footprint(Footprint::center_only(1, 0))
                    .with_width_range(20.0, 140.0, 60.0)
                    .with_priority(10)
                    .with_fill_coefficient(0.4),
            )
            .with(
                Variant::new("drawer", BlockKind::Drawer)
                    .with_footprint(Footprint::full_width(2, 0))
                    .with_distance_range(0.0, 120.0, 40.0)
                    .with_width_range(30.0, 100.0, 60.0)
                    .with_priority(8)
                    .with_fill_coefficient(0.25),
            )
            .with(
                Variant::new("rack", BlockKind::Rack)
                    .with_footprint(Footprint::center_only(2, 0))
                    .with_distance_range(0.0, 80.0, 20.0)
                    .with_reference_bottom(false)
                    .with_width_range(20.0, 120.0, 50.0)
                    .with_priority(6)
                    .with_fill_coefficient(0.15),
            )
            .with(
                Variant::new("bin", BlockKind::Bin)
                    .with_footprint(Footprint::center_only(1, 0))
                    .with_width_range(20.0, 100.0, 40.0)
                    .with_priority(4)
                    .with_fill_coefficient(0.2),
            )
            .with(
                Variant::new("cross-support", BlockKind::CrossSupport)
                    .with_footprint(Footprint::default())
                    .with_occupancy(OccupancyMode::Cross)
                    .with_fill_per_column(true)
                    .with_priority(2)
                    .with_fill_coefficient(0.3),
            )
    }
}
