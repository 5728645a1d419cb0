//! Physical categories
//!
//! Every unit belongs to exactly one category. Conversions are only
//! physically meaningful between units of the same category; the engine
//! itself never checks this.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

/// Closed set of physical dimensions known to the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Mass,
    Length,
    Time,
    Energy,
    Luminosity,
    Temperature,
    Force,
    Velocity,
    Pressure,
    /// Physical constants usable as multiplicative factors
    Constant,
    Area,
    Volume,
    FluxDensity,
    /// Dimensionless scalars (π, Avogadro number, ...)
    Other,
}

impl Category {
    /// All categories, in taxonomy order
    pub const ALL: [Category; 14] = [
        Category::Mass,
        Category::Length,
        Category::Time,
        Category::Energy,
        Category::Luminosity,
        Category::Temperature,
        Category::Force,
        Category::Velocity,
        Category::Pressure,
        Category::Constant,
        Category::Area,
        Category::Volume,
        Category::FluxDensity,
        Category::Other,
    ];

    /// Wire name of the category (matches the serde representation)
    pub fn name(&self) -> &'static str {
        match self {
            Category::Mass => "mass",
            Category::Length => "length",
            Category::Time => "time",
            Category::Energy => "energy",
            Category::Luminosity => "luminosity",
            Category::Temperature => "temperature",
            Category::Force => "force",
            Category::Velocity => "velocity",
            Category::Pressure => "pressure",
            Category::Constant => "constant",
            Category::Area => "area",
            Category::Volume => "volume",
            Category::FluxDensity => "fluxDensity",
            Category::Other => "other",
        }
    }

    /// Entries of these categories act as plain scalar factors
    pub fn is_dimensionless_scalar(&self) -> bool {
        matches!(self, Category::Constant | Category::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when a category name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
