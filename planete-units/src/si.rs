//! SI-ratio conversion
//!
//! An alternate path that compares units through their absolute SI anchors
//! rather than the category reference unit. Most catalog entries carry no
//! SI anchor, in which case no result is produced.

use crate::Unit;

impl Unit {
    /// `(self.reference_value / self.si_value) * target.si_value`
    ///
    /// Returns `None` when the categories differ or either unit lacks an
    /// SI value.
    pub fn convert_by_si(&self, target: &Unit) -> Option<f64> {
        if self.category != target.category {
            return None;
        }
        let own = self.si_value?;
        let other = target.si_value?;
        Some((self.reference_value / own) * other)
    }
}

/// Free-function form of [`Unit::convert_by_si`]
pub fn convert_by_si(source: &Unit, target: &Unit) -> Option<f64> {
    source.convert_by_si(target)
}
