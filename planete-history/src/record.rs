//! Conversion records

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use planete_units::{Conversion, Prefix, Unit};

/// Identifier assigned by a store
pub type RecordId = u64;

/// One saved conversion: `value1 prefix1 unit1 = value2 unit2`
///
/// Units and prefixes are stored by value so a record stays readable even
/// if the catalog changes later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRecord {
    pub timestamp: DateTime<Utc>,
    pub value1: f64,
    pub prefix1: Prefix,
    pub unit1: Unit,
    pub value2: f64,
    pub unit2: Unit,
}

impl ConversionRecord {
    pub fn new(
        timestamp: DateTime<Utc>,
        value1: f64,
        prefix1: Prefix,
        unit1: Unit,
        value2: f64,
        unit2: Unit,
    ) -> Self {
        ConversionRecord { timestamp, value1, prefix1, unit1, value2, unit2 }
    }

    /// Snapshot an evaluated conversion
    pub fn from_conversion(conversion: &Conversion<'_>, timestamp: DateTime<Utc>) -> Self {
        let request = &conversion.request;
        ConversionRecord::new(
            timestamp,
            request.value,
            request.prefix.clone(),
            request.source.clone(),
            conversion.result,
            request.target.clone(),
        )
    }
}

/// A record together with its store-assigned id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: RecordId,
    #[serde(flatten)]
    pub record: ConversionRecord,
}
