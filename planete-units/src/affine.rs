//! Affine (origin-shifting) conversions
//!
//! Temperature scales cannot be converted by a ratio alone. Each scale owns
//! a small set of rules keyed by the *name* of the target unit; a target the
//! scale has no rule for receives the input unchanged.

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::Unit;

/// Named affine scales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffineScale {
    Celsius,
    Kelvin,
    Fahrenheit,
}

/// One entry of the rule table: `scale` applied towards a unit named `target`
#[derive(Debug, Clone, Copy)]
pub struct AffineRule {
    pub scale: AffineScale,
    pub target: &'static str,
    pub formula: fn(f64) -> f64,
}

const ZERO_CELSIUS_IN_KELVIN: f64 = 273.15;

fn celsius_to_kelvin(x: f64) -> f64 {
    x + ZERO_CELSIUS_IN_KELVIN
}

fn celsius_to_fahrenheit(x: f64) -> f64 {
    x * 9.0 / 5.0 + 32.0
}

fn kelvin_to_celsius(x: f64) -> f64 {
    x - ZERO_CELSIUS_IN_KELVIN
}

fn kelvin_to_fahrenheit(x: f64) -> f64 {
    (x - ZERO_CELSIUS_IN_KELVIN) * 9.0 / 5.0 + 32.0
}

fn fahrenheit_to_celsius(x: f64) -> f64 {
    (x - 32.0) * 5.0 / 9.0
}

fn fahrenheit_to_kelvin(x: f64) -> f64 {
    (x - 32.0) * 5.0 / 9.0 + ZERO_CELSIUS_IN_KELVIN
}

static AFFINE_RULES: [AffineRule; 6] = [
    AffineRule {
        scale: AffineScale::Celsius,
        target: "Kelvin",
        formula: celsius_to_kelvin,
    },
    AffineRule {
        scale: AffineScale::Celsius,
        target: "Fahrenheit",
        formula: celsius_to_fahrenheit,
    },
    AffineRule {
        scale: AffineScale::Kelvin,
        target: "Celsius",
        formula: kelvin_to_celsius,
    },
    AffineRule {
        scale: AffineScale::Kelvin,
        target: "Fahrenheit",
        formula: kelvin_to_fahrenheit,
    },
    AffineRule {
        scale: AffineScale::Fahrenheit,
        target: "Celsius",
        formula: fahrenheit_to_celsius,
    },
    AffineRule {
        scale: AffineScale::Fahrenheit,
        target: "Kelvin",
        formula: fahrenheit_to_kelvin,
    },
];

/// The full rule table
pub fn affine_rules() -> &'static [AffineRule] {
    &AFFINE_RULES
}

impl AffineScale {
    /// Name of the catalog unit this scale belongs to
    pub fn unit_name(&self) -> &'static str {
        match self {
            AffineScale::Celsius => "Celsius",
            AffineScale::Kelvin => "Kelvin",
            AffineScale::Fahrenheit => "Fahrenheit",
        }
    }

    /// Look up the rule for a target unit name
    pub fn rule_for(&self, target_name: &str) -> Option<&'static AffineRule> {
        AFFINE_RULES
            .iter()
            .find(|rule| rule.scale == *self && rule.target == target_name)
    }

    /// Apply the rule for `target`, or pass `value` through unchanged
    pub fn apply(&self, value: f64, target: &Unit) -> f64 {
        match self.rule_for(&target.name) {
            Some(rule) => (rule.formula)(value),
            None => value,
        }
    }
}

impl fmt::Display for AffineScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.unit_name())
    }
}
