//! Conversion engine
//!
//! `convert` is total: every input yields an `f64`, possibly NaN or infinite
//! for degenerate data. Category agreement is the caller's responsibility;
//! mismatched pairs produce a well-defined but meaningless number.

use serde::Serialize;
use crate::{ConversionStrategy, Prefix, Unit};

/// Convert `value`, scaled by `prefix`, from `source` to `target`
///
/// Precedence is asymmetric and must stay that way:
/// 1. an affine source applies its own rule to the prefixed value;
/// 2. otherwise an affine target receives the prefixed value normalised
///    into the category's reference unit and applies its rule towards itself;
/// 3. otherwise the reference-value ratio is used.
pub fn convert(value: f64, prefix: &Prefix, source: &Unit, target: &Unit) -> f64 {
    if let ConversionStrategy::Affine(scale) = source.strategy {
        return scale.apply(value * prefix.multiplier, target);
    }

    if let ConversionStrategy::Affine(scale) = target.strategy {
        return scale.apply(value * prefix.multiplier / source.reference_value, target);
    }

    value * prefix.multiplier * (source.reference_value / target.reference_value)
}

/// A single conversion, not stored anywhere
#[derive(Debug, Clone, Copy)]
pub struct ConversionRequest<'a> {
    pub value: f64,
    pub prefix: &'a Prefix,
    pub source: &'a Unit,
    pub target: &'a Unit,
}

impl<'a> ConversionRequest<'a> {
    pub fn new(value: f64, prefix: &'a Prefix, source: &'a Unit, target: &'a Unit) -> Self {
        ConversionRequest { value, prefix, source, target }
    }

    pub fn evaluate(&self) -> Conversion<'a> {
        Conversion {
            request: *self,
            result: convert(self.value, self.prefix, self.source, self.target),
        }
    }
}

/// A request together with its result
#[derive(Debug, Clone, Copy)]
pub struct Conversion<'a> {
    pub request: ConversionRequest<'a>,
    pub result: f64,
}

impl Conversion<'_> {
    pub fn is_finite(&self) -> bool {
        self.result.is_finite()
    }

    /// Whether the pair is physically meaningful
    pub fn is_same_category(&self) -> bool {
        self.request.source.shares_category(self.request.target)
    }

    pub fn summary(&self) -> ConversionSummary {
        ConversionSummary {
            value: self.request.value,
            prefix: self.request.prefix.name.clone(),
            source: self.request.source.name.clone(),
            target: self.request.target.name.clone(),
            result: self.result,
            same_category: self.is_same_category(),
        }
    }
}

/// Owned, serializable view of a conversion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionSummary {
    pub value: f64,
    pub prefix: String,
    pub source: String,
    pub target: String,
    pub result: f64,
    pub same_category: bool,
}
