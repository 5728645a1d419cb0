//! Tool implementations
//!
//! The server owns its catalogs and the history store. Tool failures caused
//! by the caller's data (unknown unit, missing SI value, unknown record) are
//! reported as `isError` content; malformed arguments are JSON-RPC errors.

use std::sync::{Mutex, MutexGuard};
use chrono::Utc;
use serde_json::{json, Value as JsonValue};
use tracing::{info, warn};
use planete_history::{ConversionRecord, HistoryEntry, HistoryError, HistoryStore, RecordId};
use planete_units::{Category, Conversion, ConversionRequest, Prefix, PrefixCatalog, Unit, UnitCatalog};
use crate::protocol::McpError;
use crate::render;

/// Converter state shared by all requests
pub struct Planete {
    units: UnitCatalog,
    prefixes: PrefixCatalog,
    history: Mutex<Box<dyn HistoryStore>>,
}

fn text_result(text: impl Into<String>, is_error: bool) -> JsonValue {
    json!({
        "content": [{ "type": "text", "text": text.into() }],
        "isError": is_error
    })
}

/// `None` when absent or null; any other non-string value is rejected
fn optional_str<'a>(args: &'a JsonValue, key: &str) -> Result<Option<&'a str>, McpError> {
    match args.get(key) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(McpError::invalid_params(format!("{} must be a string, got {}", key, other))),
    }
}

fn optional_bool(args: &JsonValue, key: &str) -> Result<Option<bool>, McpError> {
    match args.get(key) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(McpError::invalid_params(format!("{} must be a boolean, got {}", key, other))),
    }
}

fn require_str<'a>(args: &'a JsonValue, key: &str) -> Result<&'a str, McpError> {
    optional_str(args, key)?.ok_or_else(|| McpError::invalid_params(format!("Missing {} argument", key)))
}

/// Numbers are accepted as JSON numbers or numeric strings ("1e5")
fn require_f64(args: &JsonValue, key: &str) -> Result<f64, McpError> {
    let value = match args.get(key) {
        Some(JsonValue::Number(n)) => n.as_f64(),
        Some(JsonValue::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    value.ok_or_else(|| McpError::invalid_params(format!("Missing or non-numeric {} argument", key)))
}

/// JSON has no NaN or infinity
fn number_or_null(value: f64) -> JsonValue {
    if value.is_finite() { json!(value) } else { JsonValue::Null }
}

fn unit_json(unit: &Unit) -> JsonValue {
    json!({
        "name": unit.name,
        "abbreviation": unit.abbreviation,
        "category": unit.category.name(),
        "markup": unit.markup_or_abbreviation(),
        "affine": unit.is_affine(),
        "siValue": unit.si_value,
        "siUnit": unit.si_unit_label,
    })
}

fn entry_json(entry: &HistoryEntry) -> JsonValue {
    let record = &entry.record;
    json!({
        "id": entry.id,
        "timestamp": record.timestamp.to_rfc3339(),
        "value1": record.value1,
        "prefix1": record.prefix1.name,
        "unit1": record.unit1.name,
        "value2": record.value2,
        "unit2": record.unit2.name,
        "line": render::history_line(entry),
    })
}

impl Planete {
    /// Standard catalogs with the given history store
    pub fn new(history: Box<dyn HistoryStore>) -> Self {
        Planete::with_catalogs(UnitCatalog::standard(), PrefixCatalog::standard(), history)
    }

    pub fn with_catalogs(units: UnitCatalog, prefixes: PrefixCatalog, history: Box<dyn HistoryStore>) -> Self {
        Planete { units, prefixes, history: Mutex::new(history) }
    }

    pub fn units(&self) -> &UnitCatalog {
        &self.units
    }

    pub fn prefixes(&self) -> &PrefixCatalog {
        &self.prefixes
    }

    fn history(&self) -> MutexGuard<'_, Box<dyn HistoryStore>> {
        // A panic while holding the lock cannot leave a store half-updated
        self.history.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn unit(&self, key: &str) -> Result<&Unit, McpError> {
        self.units.resolve(key).ok_or_else(|| {
            McpError::invalid_params(format!("Unknown unit: {}", key))
                .with_data(json!({ "hint": "use list_units to see available names and abbreviations" }))
        })
    }

    fn prefix(&self, args: &JsonValue) -> Result<&Prefix, McpError> {
        match optional_str(args, "prefix")? {
            None => Ok(self.prefixes.neutral()),
            Some(key) => self.prefixes.resolve(key).ok_or_else(|| {
                McpError::invalid_params(format!("Unknown prefix: {}", key)).with_data(json!({
                    "available": self.prefixes.all_prefixes().iter().map(|p| &p.name).collect::<Vec<_>>()
                }))
            }),
        }
    }

    /// Resolve `value`, `prefix`, `from` and `to`
    ///
    /// Unless `require_target` is set, a missing `to` falls back to the first
    /// unit of the source's category.
    fn conversion(&self, args: &JsonValue, require_target: bool) -> Result<Conversion<'_>, McpError> {
        let value = require_f64(args, "value")?;
        let prefix = self.prefix(args)?;
        let source = self.unit(require_str(args, "from")?)?;
        let target = match optional_str(args, "to")? {
            Some(key) => self.unit(key)?,
            None if require_target => return Err(McpError::invalid_params("Missing to argument")),
            None => self.units.default_target_for(source).unwrap_or(source),
        };
        Ok(ConversionRequest::new(value, prefix, source, target).evaluate())
    }

    pub fn tool_convert(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let conversion = self.conversion(args, false)?;
        let request = &conversion.request;

        let mut text = render::conversion_line(
            request.value,
            request.prefix,
            request.source,
            conversion.result,
            request.target,
        );
        if !conversion.is_same_category() {
            text.push_str(&format!(
                "\n\nWarning: {} is a {} unit but {} is a {} unit; the result has no physical meaning.",
                request.source.name, request.source.category, request.target.name, request.target.category
            ));
        }

        let mut result = text_result(text, false);
        result["value"] = number_or_null(conversion.result);
        result["finite"] = json!(conversion.is_finite());
        result["sameCategory"] = json!(conversion.is_same_category());
        result["target"] = json!(request.target.name);
        result["conversion"] = json!(conversion.summary());
        Ok(result)
    }

    pub fn tool_convert_by_si(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let source = self.unit(require_str(args, "from")?)?;
        let target = self.unit(require_str(args, "to")?)?;

        match source.convert_by_si(target) {
            Some(value) => {
                let mut result = text_result(
                    format!("1 {} = {} {}", source.abbreviation, render::scientific(value), target.abbreviation),
                    false,
                );
                result["value"] = number_or_null(value);
                Ok(result)
            }
            None => {
                let reason = if !source.shares_category(target) {
                    "units belong to different categories"
                } else {
                    "at least one unit has no SI value"
                };
                Ok(text_result(
                    format!("Unconvertible: {} to {}: {}", source.name, target.name, reason),
                    true,
                ))
            }
        }
    }

    pub fn tool_list_units(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let category = match optional_str(args, "category")? {
            Some(name) => Some(name.parse::<Category>().map_err(|e| {
                McpError::invalid_params(e.to_string()).with_data(json!({
                    "available": Category::ALL.iter().map(|c| c.name()).collect::<Vec<_>>()
                }))
            })?),
            None => None,
        };
        let sources_only = optional_bool(args, "sourcesOnly")?.unwrap_or(false);

        let units: Vec<&Unit> = match (category, sources_only) {
            (Some(c), true) => self.units.selectable_sources().filter(|u| u.category == c).collect(),
            (Some(c), false) => self.units.units_in_category(c).collect(),
            (None, true) => self.units.selectable_sources().collect(),
            (None, false) => self.units.all_units().iter().collect(),
        };

        let text = units.iter().map(|u| render::unit_label(u)).collect::<Vec<_>>().join("\n");
        let mut result = text_result(text, false);
        result["units"] = json!(units.iter().map(|u| unit_json(u)).collect::<Vec<_>>());
        Ok(result)
    }

    pub fn tool_list_prefixes(&self) -> JsonValue {
        let prefixes = self.prefixes.all_prefixes();
        let text = prefixes
            .iter()
            .map(|p| format!("{} ({}) x{}", p.name, p.abbreviation, render::scientific(p.multiplier)))
            .collect::<Vec<_>>()
            .join("\n");

        let mut result = text_result(text, false);
        result["prefixes"] = json!(prefixes);
        result
    }

    pub fn tool_list_categories(&self) -> JsonValue {
        let categories: Vec<JsonValue> = self.units
            .categories()
            .into_iter()
            .map(|c| json!({
                "name": c.name(),
                "units": self.units.units_in_category(c).count(),
                "scalar": c.is_dimensionless_scalar(),
            }))
            .collect();
        let text = self.units
            .categories()
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ");

        let mut result = text_result(text, false);
        result["categories"] = json!(categories);
        result
    }

    pub fn tool_save_conversion(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let conversion = self.conversion(args, true)?;
        if !conversion.is_finite() {
            return Ok(text_result("Result is not a finite number; nothing saved", true));
        }

        let record = ConversionRecord::from_conversion(&conversion, Utc::now());
        let saved = self.history().create(record);
        match saved {
            Ok(entry) => {
                info!(id = entry.id, "conversion saved");
                let mut result = text_result(
                    format!("Saved #{}: {}", entry.id, render::history_line(&entry)),
                    false,
                );
                result["entry"] = entry_json(&entry);
                Ok(result)
            }
            Err(e) => {
                warn!(error = %e, "saving conversion failed");
                Ok(text_result(format!("Saving failed: {}", e), true))
            }
        }
    }

    pub fn tool_list_history(&self) -> Result<JsonValue, McpError> {
        let entries = self.history().list();
        let text = if entries.is_empty() {
            "No saved conversions".to_string()
        } else {
            entries
                .iter()
                .map(|e| format!("#{} {}", e.id, render::history_line(e)))
                .collect::<Vec<_>>()
                .join("\n")
        };

        let mut result = text_result(text, false);
        result["entries"] = json!(entries.iter().map(entry_json).collect::<Vec<_>>());
        Ok(result)
    }

    pub fn tool_delete_conversion(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let id: RecordId = args.get("id")
            .and_then(|v| v.as_u64())
            .ok_or_else(|| McpError::invalid_params("Missing or invalid id argument"))?;

        let deleted = self.history().delete(id);
        match deleted {
            Ok(entry) => {
                let mut result = text_result(format!("Deleted #{}: {}", entry.id, render::history_line(&entry)), false);
                result["entry"] = entry_json(&entry);
                Ok(result)
            }
            Err(HistoryError::NotFound(id)) => Ok(text_result(format!("No saved conversion with id {}", id), true)),
            Err(e) => {
                warn!(error = %e, id, "deleting conversion failed");
                Ok(text_result(format!("Deleting failed: {}", e), true))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planete_history::{JsonFileStore, MemoryStore};

    fn planete() -> Planete {
        Planete::new(Box::new(MemoryStore::new()))
    }

    fn text(result: &JsonValue) -> &str {
        result["content"][0]["text"].as_str().unwrap()
    }

    #[test]
    fn test_convert_by_name_and_abbreviation() {
        let planete = planete();
        let by_name = planete.tool_convert(&json!({ "value": 1, "from": "earthMass", "to": "Jupiter Mass" })).unwrap();
        let by_abbr = planete.tool_convert(&json!({ "value": 1, "from": "M⊕", "to": "MJ" })).unwrap();
        assert_eq!(by_name["value"], by_abbr["value"]);

        let ratio = by_name["value"].as_f64().unwrap();
        assert!((ratio - 3.146e-3).abs() < 1e-5);
        assert_eq!(text(&by_name), "1 M⊕ = 3.146e-3 MJ");
        assert_eq!(by_name["sameCategory"], json!(true));
    }

    #[test]
    fn test_convert_with_prefix() {
        let result = planete()
            .tool_convert(&json!({ "value": "2", "prefix": "kilo", "from": "meter", "to": "centimeter" }))
            .unwrap();
        assert_eq!(result["value"], json!(200000.0));
        assert_eq!(text(&result), "2 km = 2.000e5 cm");
    }

    #[test]
    fn test_convert_temperature() {
        let result = planete().tool_convert(&json!({ "value": 100, "from": "Celsius", "to": "°F" })).unwrap();
        assert_eq!(result["value"], json!(212.0));
    }

    #[test]
    fn test_convert_defaults_target_to_category_head() {
        let result = planete().tool_convert(&json!({ "value": 3, "from": "parsec" })).unwrap();
        assert_eq!(result["target"], json!("centimeter"));
    }

    #[test]
    fn test_convert_reports_summary() {
        let result = planete().tool_convert(&json!({ "value": 250, "from": "cm", "to": "m" })).unwrap();
        let summary = &result["conversion"];
        assert_eq!(summary["source"], json!("centimeter"));
        assert_eq!(summary["target"], json!("meter"));
        assert_eq!(summary["result"], json!(2.5));
        assert_eq!(summary["sameCategory"], json!(true));
    }

    #[test]
    fn test_convert_rejects_non_string_target() {
        let err = planete().tool_convert(&json!({ "value": 1, "from": "meter", "to": 42 })).unwrap_err();
        assert_eq!(err.code, crate::protocol::INVALID_PARAMS);
        assert!(err.message.contains("to"));
    }

    #[test]
    fn test_convert_rejects_non_string_prefix() {
        let err = planete()
            .tool_convert(&json!({ "value": 1, "from": "meter", "to": "kilometer", "prefix": 1000 }))
            .unwrap_err();
        assert_eq!(err.code, crate::protocol::INVALID_PARAMS);
        assert!(err.message.contains("prefix"));
    }

    #[test]
    fn test_convert_null_prefix_is_neutral() {
        let result = planete()
            .tool_convert(&json!({ "value": 1, "from": "meter", "to": "centimeter", "prefix": null }))
            .unwrap();
        assert_eq!(result["value"], json!(100.0));
    }

    #[test]
    fn test_list_units_rejects_bad_argument_types() {
        let planete = planete();
        let err = planete.tool_list_units(&json!({ "category": 5 })).unwrap_err();
        assert_eq!(err.code, crate::protocol::INVALID_PARAMS);

        let err = planete.tool_list_units(&json!({ "sourcesOnly": "yes" })).unwrap_err();
        assert_eq!(err.code, crate::protocol::INVALID_PARAMS);
    }

    #[test]
    fn test_save_requires_target() {
        let planete = planete();
        let err = planete.tool_save_conversion(&json!({ "value": 3, "from": "parsec" })).unwrap_err();
        assert_eq!(err.code, crate::protocol::INVALID_PARAMS);
        assert!(planete.tool_list_history().unwrap()["entries"].as_array().unwrap().is_empty());

        let err = planete.tool_save_conversion(&json!({ "value": 3, "from": "parsec", "to": 7 })).unwrap_err();
        assert_eq!(err.code, crate::protocol::INVALID_PARAMS);
        assert!(planete.tool_list_history().unwrap()["entries"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_convert_cross_category_warns() {
        let result = planete().tool_convert(&json!({ "value": 1, "from": "meter", "to": "second" })).unwrap();
        assert_eq!(result["sameCategory"], json!(false));
        assert!(text(&result).contains("Warning"));
    }

    #[test]
    fn test_convert_unknown_unit() {
        let err = planete().tool_convert(&json!({ "value": 1, "from": "furlong", "to": "m" })).unwrap_err();
        assert_eq!(err.code, crate::protocol::INVALID_PARAMS);

        let err = planete().tool_convert(&json!({ "value": 1, "from": "m", "to": "cm", "prefix": "yotta" })).unwrap_err();
        assert!(err.message.contains("yotta"));
    }

    #[test]
    fn test_convert_missing_value() {
        let err = planete().tool_convert(&json!({ "from": "m", "to": "cm" })).unwrap_err();
        assert!(err.message.contains("value"));
    }

    #[test]
    fn test_convert_by_si() {
        let planete = planete();
        let ok = planete.tool_convert_by_si(&json!({ "from": "erg", "to": "Joule" })).unwrap();
        assert_eq!(ok["isError"], json!(false));
        assert!((ok["value"].as_f64().unwrap() - 1e7).abs() < 1e-3);

        let missing = planete.tool_convert_by_si(&json!({ "from": "Planck constant", "to": "Joule" })).unwrap();
        assert_eq!(missing["isError"], json!(true));
        assert!(text(&missing).starts_with("Unconvertible"));

        let mismatch = planete.tool_convert_by_si(&json!({ "from": "second", "to": "erg" })).unwrap();
        assert!(text(&mismatch).contains("different categories"));
    }

    #[test]
    fn test_list_units_filtered() {
        let planete = planete();
        let result = planete.tool_list_units(&json!({ "category": "temperature" })).unwrap();
        let names: Vec<&str> = result["units"]
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Kelvin", "Celsius", "Fahrenheit"]);

        let all = planete.tool_list_units(&json!({})).unwrap();
        assert_eq!(all["units"].as_array().unwrap().len(), planete.units().len());

        let sources = planete.tool_list_units(&json!({ "sourcesOnly": true })).unwrap();
        assert!(sources["units"].as_array().unwrap().iter().all(|u| u["category"] != "other"));

        let err = planete.tool_list_units(&json!({ "category": "colour" })).unwrap_err();
        assert!(err.data.is_some());
    }

    #[test]
    fn test_list_prefixes_and_categories() {
        let planete = planete();
        let prefixes = planete.tool_list_prefixes();
        assert_eq!(prefixes["prefixes"].as_array().unwrap().len(), planete.prefixes().len());
        assert_eq!(prefixes["prefixes"][0]["name"], json!("none"));

        let categories = planete.tool_list_categories();
        let first = &categories["categories"][0];
        assert_eq!(first["name"], json!("mass"));
        assert!(first["units"].as_u64().unwrap() > 0);
    }

    #[test]
    fn test_history_lifecycle() {
        let planete = planete();
        let saved = planete
            .tool_save_conversion(&json!({ "value": 1, "from": "earthMass", "to": "Jupiter Mass" }))
            .unwrap();
        assert_eq!(saved["isError"], json!(false));
        let id = saved["entry"]["id"].as_u64().unwrap();
        assert_eq!(saved["entry"]["line"], json!("1 ${M_\\oplus}$ = 3.146e-3 ${M_J}$"));

        planete.tool_save_conversion(&json!({ "value": 2, "from": "m", "to": "cm" })).unwrap();
        let listed = planete.tool_list_history().unwrap();
        assert_eq!(listed["entries"].as_array().unwrap().len(), 2);

        let deleted = planete.tool_delete_conversion(&json!({ "id": id })).unwrap();
        assert_eq!(deleted["isError"], json!(false));
        let again = planete.tool_delete_conversion(&json!({ "id": id })).unwrap();
        assert_eq!(again["isError"], json!(true));

        let listed = planete.tool_list_history().unwrap();
        assert_eq!(listed["entries"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_save_rejects_non_finite() {
        let planete = planete();
        let result = planete
            .tool_save_conversion(&json!({ "value": 1e308, "prefix": "tera", "from": "parsec", "to": "cm" }))
            .unwrap();
        assert_eq!(result["isError"], json!(true));
        assert!(planete.tool_list_history().unwrap()["entries"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_history_persists_in_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        {
            let planete = Planete::new(Box::new(JsonFileStore::open(&path).unwrap()));
            planete.tool_save_conversion(&json!({ "value": 5, "from": "day", "to": "s" })).unwrap();
        }
        let planete = Planete::new(Box::new(JsonFileStore::open(&path).unwrap()));
        let listed = planete.tool_list_history().unwrap();
        assert_eq!(listed["entries"][0]["unit1"], json!("day"));
        assert_eq!(listed["entries"][0]["value2"], json!(432000.0));
    }

    #[test]
    fn test_delete_requires_id() {
        let err = planete().tool_delete_conversion(&json!({ "id": "one" })).unwrap_err();
        assert_eq!(err.code, crate::protocol::INVALID_PARAMS);
    }
}
