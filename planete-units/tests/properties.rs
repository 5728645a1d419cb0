//! Catalog-wide conversion properties

use approx::assert_relative_eq;
use planete_units::{convert, Category, Prefix, Unit, PREFIXES, UNITS};

const SAMPLES: [f64; 6] = [0.0, 1.0, -2.5, 1e-9, 42.0, 6.02e23];

fn unit(name: &str) -> &'static Unit {
    UNITS.get(name).unwrap_or_else(|| panic!("missing unit {}", name))
}

fn neutral() -> &'static Prefix {
    PREFIXES.neutral()
}

/// Same-category pairs where neither side is affine
fn linear_pairs() -> Vec<(&'static Unit, &'static Unit)> {
    let mut pairs = Vec::new();
    for a in UNITS.all_units().iter().filter(|u| !u.is_affine()) {
        for b in UNITS.units_in_category(a.category).filter(|u| !u.is_affine()) {
            pairs.push((a, b));
        }
    }
    pairs
}

#[test]
fn test_identity() {
    for u in UNITS.all_units() {
        for x in SAMPLES {
            assert_eq!(convert(x, neutral(), u, u), x, "identity failed for {}", u.name);
        }
    }
}

#[test]
fn test_linearity() {
    for (a, b) in linear_pairs() {
        for k in [2.0, -3.0, 1e5] {
            let scaled = convert(k * 7.5, neutral(), a, b);
            let expected = k * convert(7.5, neutral(), a, b);
            assert_relative_eq!(scaled, expected, max_relative = 1e-12);
        }
    }
}

#[test]
fn test_prefix_composition() {
    for prefix in PREFIXES.all_prefixes() {
        for (a, b) in linear_pairs() {
            let direct = convert(3.0, prefix, a, b);
            let pre_scaled = convert(3.0 * prefix.multiplier, neutral(), a, b);
            assert_eq!(direct, pre_scaled, "{} {} -> {}", prefix.name, a.name, b.name);
        }
    }
}

#[test]
fn test_round_trip() {
    for (a, b) in linear_pairs() {
        for x in SAMPLES {
            let there = convert(x, neutral(), a, b);
            let back = convert(there, neutral(), b, a);
            assert_relative_eq!(back, x, max_relative = 1e-9);
        }
    }
}

#[test]
fn test_temperature_fixed_points() {
    let (celsius, kelvin, fahrenheit) = (unit("Celsius"), unit("Kelvin"), unit("Fahrenheit"));
    assert_eq!(convert(0.0, neutral(), celsius, kelvin), 273.15);
    assert_eq!(convert(0.0, neutral(), celsius, fahrenheit), 32.0);
    assert_eq!(convert(100.0, neutral(), celsius, fahrenheit), 212.0);
    assert_eq!(convert(273.15, neutral(), kelvin, celsius), 0.0);
    assert_eq!(convert(212.0, neutral(), fahrenheit, celsius), 100.0);
}

#[test]
fn test_affine_source_uses_prefixed_value() {
    let milli = PREFIXES.get("milli").unwrap();
    let result = convert(1000.0, milli, unit("Celsius"), unit("Kelvin"));
    assert_eq!(result, 274.15);
}

#[test]
fn test_affine_unknown_target_passes_through() {
    // No rule from Kelvin towards a length: the value comes back unchanged
    assert_eq!(convert(12.0, neutral(), unit("Kelvin"), unit("meter")), 12.0);
}

#[test]
fn test_category_filter() {
    let total = UNITS.len();
    for category in Category::ALL {
        let matching: Vec<&Unit> = UNITS.units_in_category(category).collect();
        assert!(matching.iter().all(|u| u.category == category));

        let complement = UNITS.all_units().iter().filter(|u| u.category != category).count();
        assert_eq!(matching.len() + complement, total);
    }
}

#[test]
fn test_catalog_is_restartable() {
    let first: Vec<&str> = UNITS.all_units().iter().map(|u| u.name.as_str()).collect();
    let second: Vec<&str> = (&*UNITS).into_iter().map(|u| u.name.as_str()).collect();
    assert_eq!(first, second);
}

#[test]
fn test_si_ratio_gap() {
    let without_si = unit("Planck constant");
    assert!(without_si.si_value.is_none());
    for other in UNITS.all_units() {
        assert_eq!(without_si.convert_by_si(other), None);
    }

    for u in UNITS.all_units().iter().filter(|u| u.si_value.is_some()) {
        let result = u.convert_by_si(u).unwrap();
        assert_relative_eq!(result, u.reference_value, max_relative = 1e-12);
    }
}

#[test]
fn test_si_ratio_requires_same_category() {
    assert_eq!(unit("second").convert_by_si(unit("Joule")), None);
    assert!(unit("erg").convert_by_si(unit("Joule")).is_some());
}

#[test]
fn test_earth_mass_in_jupiter_masses() {
    let result = convert(1.0, neutral(), unit("earthMass"), unit("Jupiter Mass"));
    let expected = unit("earthGravitationalParameter").reference_value
        / unit("JupiterGravitationalParameter").reference_value;
    assert_relative_eq!(result, expected, max_relative = 1e-12);
    assert_relative_eq!(result, 3.146e-3, max_relative = 1e-3);
}

#[test]
fn test_astronomical_lengths() {
    let pc_in_au = convert(1.0, neutral(), unit("parsec"), unit("astronomicalUnit"));
    assert_relative_eq!(pc_in_au, 206_264.8, max_relative = 1e-6);

    let kilo = PREFIXES.get("kilo").unwrap();
    let km_in_cm = convert(1.0, kilo, unit("meter"), unit("centimeter"));
    assert_eq!(km_in_cm, 100_000.0);
}
