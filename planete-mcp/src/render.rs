//! Text rendering for tool results
//!
//! Converted values are shown in scientific notation with three fraction
//! digits; history entries use the LaTeX markup of their units.

use planete_history::HistoryEntry;
use planete_units::{Prefix, Unit};

/// `3.146e-3`, `NaN`, `inf`
pub fn scientific(value: f64) -> String {
    format!("{:.3e}", value)
}

/// Plain number for user input (no trailing `.0` for integers)
fn plain(value: f64) -> String {
    format!("{}", value)
}

/// `1 kM⊕ = 3.146e0 MJ`
pub fn conversion_line(value: f64, prefix: &Prefix, source: &Unit, result: f64, target: &Unit) -> String {
    format!(
        "{} {}{} = {} {}",
        plain(value),
        prefix.abbreviation,
        source.abbreviation,
        scientific(result),
        target.abbreviation
    )
}

/// `1 ${M_\oplus}$ = 3.146e-3 ${M_J}$`
pub fn history_line(entry: &HistoryEntry) -> String {
    let record = &entry.record;
    let prefix = if record.prefix1.is_neutral() {
        String::new()
    } else {
        format!("{} ", record.prefix1.name)
    };
    format!(
        "{} ${}{}$ = {} ${}$",
        plain(record.value1),
        prefix,
        record.unit1.markup_or_abbreviation(),
        scientific(record.value2),
        record.unit2.markup_or_abbreviation()
    )
}

/// `M⊕ (earthMass)`, the label used in unit pickers
pub fn unit_label(unit: &Unit) -> String {
    format!("{} ({})", unit.abbreviation, unit.name)
}
