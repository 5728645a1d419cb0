//! Immutable unit catalog
//!
//! A catalog is built once, validated, and never mutated afterwards. It is
//! `Send + Sync` and can be shared freely between threads.

use std::collections::HashSet;
use tracing::debug;
use crate::{CatalogError, Category, Unit};

/// Ordered, validated list of units
#[derive(Debug, Clone)]
pub struct UnitCatalog {
    units: Vec<Unit>,
}

/// Collects units in declaration order before validation
#[derive(Debug, Default)]
pub struct UnitCatalogBuilder {
    units: Vec<Unit>,
}

impl UnitCatalogBuilder {
    pub fn unit(mut self, unit: Unit) -> Self {
        self.units.push(unit);
        self
    }

    pub fn push(&mut self, unit: Unit) {
        self.units.push(unit);
    }

    /// Validate and freeze the catalog
    ///
    /// Rejects empty names, duplicate names or abbreviations, and reference
    /// values that are zero or not finite.
    pub fn build(self) -> Result<UnitCatalog, CatalogError> {
        let mut seen = HashSet::with_capacity(self.units.len());
        let mut abbreviations = HashSet::with_capacity(self.units.len());
        for (index, unit) in self.units.iter().enumerate() {
            if unit.name.trim().is_empty() {
                return Err(CatalogError::EmptyName { kind: "unit", index });
            }
            if !unit.reference_value.is_finite() || unit.reference_value == 0.0 {
                return Err(CatalogError::InvalidScale {
                    kind: "unit",
                    name: unit.name.clone(),
                    value: unit.reference_value,
                });
            }
            if !seen.insert(unit.name.as_str()) {
                return Err(CatalogError::DuplicateName {
                    kind: "unit",
                    name: unit.name.clone(),
                });
            }
            if !abbreviations.insert(unit.abbreviation.as_str()) {
                return Err(CatalogError::DuplicateAbbreviation {
                    kind: "unit",
                    abbreviation: unit.abbreviation.clone(),
                });
            }
        }
        drop(seen);
        drop(abbreviations);

        debug!(units = self.units.len(), "unit catalog built");
        Ok(UnitCatalog { units: self.units })
    }
}

impl UnitCatalog {
    pub fn builder() -> UnitCatalogBuilder {
        UnitCatalogBuilder::default()
    }

    /// Full catalog in declaration order
    pub fn all_units(&self) -> &[Unit] {
        &self.units
    }

    /// Units of one category, declaration order preserved
    pub fn units_in_category(&self, category: Category) -> impl Iterator<Item = &Unit> + '_ {
        self.units.iter().filter(move |u| u.category == category)
    }

    /// Categories that have at least one unit, in order of first appearance
    pub fn categories(&self) -> Vec<Category> {
        let mut categories = Vec::new();
        for unit in &self.units {
            if !categories.contains(&unit.category) {
                categories.push(unit.category);
            }
        }
        categories
    }

    /// Units offered as conversion sources (everything except `other`)
    pub fn selectable_sources(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.units.iter().filter(|u| u.category != Category::Other)
    }

    /// First unit sharing `unit`'s category
    ///
    /// Used to reset a target selection after the source category changed.
    pub fn default_target_for(&self, unit: &Unit) -> Option<&Unit> {
        self.units_in_category(unit.category).next()
    }

    pub fn get(&self, name: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.name == name)
    }

    pub fn by_abbreviation(&self, abbreviation: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.abbreviation == abbreviation)
    }

    /// Name first, abbreviation second
    pub fn resolve(&self, key: &str) -> Option<&Unit> {
        self.get(key).or_else(|| self.by_abbreviation(key))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl<'a> IntoIterator for &'a UnitCatalog {
    type Item = &'a Unit;
    type IntoIter = std::slice::Iter<'a, Unit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}
