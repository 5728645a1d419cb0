//! Planete Units - Unit & Prefix Conversion Engine
//!
//! Converts a magnitude in one physical unit, optionally scaled by a decimal
//! prefix, into another unit of the same category.
//!
//! Components:
//! - Prefix catalog (deca .. tera, deci .. pico, plus the neutral prefix)
//! - Unit catalog (CGS-referenced astrophysical units grouped by category)
//! - Conversion engine (linear ratios, affine temperature rules)
//! - SI-ratio converter (absolute SI anchors, sparse data)
//!
//! Callers resolve names to catalog entries; the engine never looks anything
//! up and never checks that categories agree.

mod affine;
mod catalog;
mod category;
mod convert;
mod error;
mod prefix;
mod si;
mod unit;
mod units;

pub use affine::{affine_rules, AffineRule, AffineScale};
pub use catalog::{UnitCatalog, UnitCatalogBuilder};
pub use category::{Category, UnknownCategory};
pub use convert::{convert, Conversion, ConversionRequest, ConversionSummary};
pub use error::CatalogError;
pub use prefix::{Prefix, PrefixCatalog, PREFIXES};
pub use si::convert_by_si;
pub use unit::{ConversionStrategy, Unit};
pub use units::UNITS;
