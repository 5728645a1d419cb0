//! Decimal metric prefixes

use std::collections::HashSet;
use std::sync::LazyLock;
use serde::{Serialize, Deserialize};
use crate::CatalogError;

/// Standard prefix catalog
pub static PREFIXES: LazyLock<PrefixCatalog> = LazyLock::new(PrefixCatalog::standard);

/// A decimal order-of-magnitude multiplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prefix {
    pub name: String,
    pub abbreviation: String,
    pub multiplier: f64,
}

impl Prefix {
    pub fn new(name: &str, abbreviation: &str, multiplier: f64) -> Self {
        Prefix {
            name: name.to_string(),
            abbreviation: abbreviation.to_string(),
            multiplier,
        }
    }

    /// The neutral prefix, multiplier 1
    pub fn none() -> Self {
        Prefix::new("none", "", 1.0)
    }

    pub fn is_neutral(&self) -> bool {
        self.multiplier == 1.0
    }
}

/// Immutable, ordered set of prefixes
#[derive(Debug, Clone)]
pub struct PrefixCatalog {
    prefixes: Vec<Prefix>,
}

impl PrefixCatalog {
    /// Validate and freeze a list of prefixes
    ///
    /// The neutral prefix is prepended when the list does not contain one.
    pub fn new(prefixes: Vec<Prefix>) -> Result<Self, CatalogError> {
        let mut prefixes = prefixes;
        if !prefixes.iter().any(Prefix::is_neutral) {
            prefixes.insert(0, Prefix::none());
        }

        let mut seen = HashSet::new();
        let mut abbreviations = HashSet::new();
        for (index, prefix) in prefixes.iter().enumerate() {
            if prefix.name.trim().is_empty() {
                return Err(CatalogError::EmptyName { kind: "prefix", index });
            }
            if !prefix.multiplier.is_finite() || prefix.multiplier == 0.0 {
                return Err(CatalogError::InvalidScale {
                    kind: "prefix",
                    name: prefix.name.clone(),
                    value: prefix.multiplier,
                });
            }
            if !seen.insert(prefix.name.as_str()) {
                return Err(CatalogError::DuplicateName {
                    kind: "prefix",
                    name: prefix.name.clone(),
                });
            }
            if !abbreviations.insert(prefix.abbreviation.as_str()) {
                return Err(CatalogError::DuplicateAbbreviation {
                    kind: "prefix",
                    abbreviation: prefix.abbreviation.clone(),
                });
            }
        }
        drop(seen);
        drop(abbreviations);

        Ok(PrefixCatalog { prefixes })
    }

    /// The SI prefixes from deca to tera and deci to pico
    pub fn standard() -> Self {
        let prefixes = vec![
            Prefix::none(),
            Prefix::new("deca", "da", 10.0),
            Prefix::new("hecto", "h", 100.0),
            Prefix::new("kilo", "k", 1000.0),
            Prefix::new("mega", "M", 1e6),
            Prefix::new("giga", "G", 1e9),
            Prefix::new("tera", "T", 1e12),
            Prefix::new("deci", "d", 0.1),
            Prefix::new("centi", "c", 0.01),
            Prefix::new("milli", "m", 0.001),
            Prefix::new("micro", "µ", 1e-6),
            Prefix::new("nano", "n", 1e-9),
            Prefix::new("pico", "p", 1e-12),
        ];

        match PrefixCatalog::new(prefixes) {
            Ok(catalog) => catalog,
            Err(e) => panic!("standard prefix catalog is malformed: {}", e),
        }
    }

    /// All prefixes in declaration order, neutral prefix included
    pub fn all_prefixes(&self) -> &[Prefix] {
        &self.prefixes
    }

    /// The first prefix with multiplier 1
    pub fn neutral(&self) -> &Prefix {
        self.prefixes
            .iter()
            .find(|p| p.is_neutral())
            .unwrap_or(&self.prefixes[0])
    }

    pub fn get(&self, name: &str) -> Option<&Prefix> {
        self.prefixes.iter().find(|p| p.name == name)
    }

    pub fn by_abbreviation(&self, abbreviation: &str) -> Option<&Prefix> {
        self.prefixes.iter().find(|p| p.abbreviation == abbreviation)
    }

    /// Name first, abbreviation second
    pub fn resolve(&self, key: &str) -> Option<&Prefix> {
        self.get(key).or_else(|| self.by_abbreviation(key))
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}
