//! Unit representation with reference values

use std::fmt;
use std::hash::{Hash, Hasher};
use serde::{Serialize, Deserialize};
use crate::{AffineScale, Category};

/// How values leave a unit during conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "scale", rename_all = "lowercase")]
pub enum ConversionStrategy {
    /// Ratio of reference values
    #[default]
    Linear,
    /// Origin-shifting scale looked up in the affine rule table
    Affine(AffineScale),
}

/// A physical unit with its scale relative to the category's reference unit
///
/// Units are identified by `name`: two units with the same name compare equal
/// regardless of their other fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    /// Display name, also the identity key (e.g. "centimeter")
    pub name: String,
    /// Short symbol (e.g. "cm")
    pub abbreviation: String,
    /// Magnitude expressed in the category's reference unit (CGS based)
    pub reference_value: f64,
    /// Physical category
    pub category: Category,
    /// Absolute magnitude in SI terms, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub si_value: Option<f64>,
    /// Label of the SI unit `si_value` is expressed in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub si_unit_label: Option<String>,
    /// LaTeX markup for rendering the symbol; no effect on conversion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_markup: Option<String>,
    #[serde(default)]
    pub strategy: ConversionStrategy,
}

impl Unit {
    /// Create a linear unit
    pub fn new(
        name: &str,
        abbreviation: &str,
        reference_value: f64,
        category: Category,
        display_markup: &str,
    ) -> Self {
        Unit {
            name: name.to_string(),
            abbreviation: abbreviation.to_string(),
            reference_value,
            category,
            si_value: None,
            si_unit_label: None,
            display_markup: Some(display_markup.to_string()),
            strategy: ConversionStrategy::Linear,
        }
    }

    /// Builder: attach an absolute SI anchor
    pub fn with_si(mut self, si_value: f64, si_unit_label: &str) -> Self {
        self.si_value = Some(si_value);
        self.si_unit_label = Some(si_unit_label.to_string());
        self
    }

    /// Builder: convert through an affine scale instead of a plain ratio
    pub fn with_affine(mut self, scale: AffineScale) -> Self {
        self.strategy = ConversionStrategy::Affine(scale);
        self
    }

    /// Check if this unit converts through an affine rule
    pub fn is_affine(&self) -> bool {
        matches!(self.strategy, ConversionStrategy::Affine(_))
    }

    /// Check if a conversion to `other` is physically meaningful
    pub fn shares_category(&self, other: &Unit) -> bool {
        self.category == other.category
    }

    /// Markup if present, abbreviation otherwise
    pub fn markup_or_abbreviation(&self) -> &str {
        self.display_markup.as_deref().unwrap_or(&self.abbreviation)
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Unit {}

impl Hash for Unit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation)
    }
}
