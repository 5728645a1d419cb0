//! Standard unit catalog
//!
//! Reference values are CGS based: gram, centimeter, second and Kelvin are 1.
//! Astronomical masses are derived from gravitational parameters divided by
//! the gravitational constant, so mass ratios reproduce GM ratios.

use std::f64::consts::PI;
use std::sync::LazyLock;
use crate::{AffineScale, Category, Unit, UnitCatalog, UnitCatalogBuilder};

/// Standard unit catalog
pub static UNITS: LazyLock<UnitCatalog> = LazyLock::new(UnitCatalog::standard);

// Base units
const GRAM: f64 = 1.0;
const CENTIMETER: f64 = 1.0;
const SECOND: f64 = 1.0;
const KELVIN: f64 = 1.0;

// Derived CGS quantities
const CM2: f64 = CENTIMETER * CENTIMETER;
const CM3: f64 = CM2 * CENTIMETER;
const S2: f64 = SECOND * SECOND;
const DYNE: f64 = GRAM * CENTIMETER / S2;
const ERG: f64 = CM2 * GRAM / S2;
const METER: f64 = 100.0 * CENTIMETER;
const KILOMETER: f64 = 1000.0 * METER;
const DAY: f64 = 86400.0 * SECOND;

// Physical constants
const GRAVITATIONAL_CONSTANT: f64 = 6.67408e-08 * DYNE * CM2 / (GRAM * GRAM);
const SPEED_OF_LIGHT: f64 = 2.99792458e+10 * CENTIMETER / SECOND;
const RADIATION_CONSTANT: f64 = 7.57e-15 * ERG / CM3 / (KELVIN * KELVIN * KELVIN * KELVIN);
const SOLAR_LUMINOSITY: f64 = 3.828e+33 * ERG / SECOND;

// Gravitational parameters
const GM_SUN: f64 = 1.3271244e+26 * CM3 / S2;
const GM_JUPITER: f64 = 1.2668653e+23 * CM3 / S2;
const GM_EARTH: f64 = 3.986004e+20 * CM3 / S2;

impl UnitCatalog {
    /// Build the standard catalog
    ///
    /// Panics if the built-in data is malformed.
    pub fn standard() -> Self {
        let mut builder = UnitCatalog::builder();
        register_base_units(&mut builder);
        register_mechanical_units(&mut builder);
        register_constants(&mut builder);
        register_time_and_distance_units(&mut builder);
        register_astronomical_units(&mut builder);

        match builder.build() {
            Ok(catalog) => catalog,
            Err(e) => panic!("standard unit catalog is malformed: {}", e),
        }
    }
}

fn register_base_units(b: &mut UnitCatalogBuilder) {
    b.push(Unit::new("gramm", "g", GRAM, Category::Mass, "g"));
    b.push(Unit::new("centimeter", "cm", CENTIMETER, Category::Length, "cm"));
    b.push(Unit::new("second", "s", SECOND, Category::Time, "s").with_si(1.0, "s"));
    b.push(
        Unit::new("Kelvin", "K", KELVIN, Category::Temperature, "K")
            .with_affine(AffineScale::Kelvin),
    );
    b.push(
        Unit::new("Celsius", "°C", KELVIN, Category::Temperature, "^{\\circ}C")
            .with_affine(AffineScale::Celsius),
    );
    b.push(
        Unit::new("Fahrenheit", "°F", KELVIN * 5.0 / 9.0, Category::Temperature, "^{\\circ}F")
            .with_affine(AffineScale::Fahrenheit),
    );
}

fn register_mechanical_units(b: &mut UnitCatalogBuilder) {
    b.push(Unit::new("dyne", "dyn", DYNE, Category::Force, "dyn"));
    b.push(Unit::new("erg", "erg", ERG, Category::Energy, "erg").with_si(1e-7, "J"));
    b.push(Unit::new("Joule", "J", 1e7 * ERG, Category::Energy, "J").with_si(1.0, "J"));
    b.push(Unit::new("erg per second", "erg/s", ERG / SECOND, Category::Luminosity, "\\frac{erg}{s}"));

    b.push(Unit::new("square centimeter", "cm2", CM2, Category::Area, "cm^2"));
    b.push(Unit::new("cubic centimeter", "cm3", CM3, Category::Volume, "cm^3"));
    b.push(Unit::new("meter", "m", METER, Category::Length, "m"));
    b.push(Unit::new("kilometer", "km", KILOMETER, Category::Length, "km"));
    b.push(Unit::new("meter per second", "m/s", METER / SECOND, Category::Velocity, "\\frac{m}{s}"));
    b.push(Unit::new("kilometer per second", "km/s", KILOMETER / SECOND, Category::Velocity, "\\frac{km}{s}"));
    b.push(Unit::new("Bar", "Bar", 1e6 * GRAM / CENTIMETER / S2, Category::Pressure, "Bar"));
    b.push(Unit::new("Pascale", "Pa", 10.0 * DYNE / CM2, Category::Pressure, "Pa"));
}

fn register_constants(b: &mut UnitCatalogBuilder) {
    b.push(Unit::new("Pi", "π", PI, Category::Other, "\\pi"));
    b.push(Unit::new("4*Pi", "4π", 4.0 * PI, Category::Other, "4\\pi"));
    b.push(
        Unit::new("Gravitational constant", "G", GRAVITATIONAL_CONSTANT, Category::Constant, "G")
            .with_si(6.67408e-11, "m3 / (kg s2)"),
    );
    b.push(Unit::new("Speed of light", "c", SPEED_OF_LIGHT, Category::Velocity, "c"));

    b.push(Unit::new("electron Volt", "eV", 1.6021766208e-12 * ERG, Category::Energy, "eV").with_si(1.6021766208e-19, "J"));
    b.push(Unit::new("Boltzmann constant", "kB", 1.38064852e-16 * ERG / KELVIN, Category::Energy, "k_B"));
    b.push(Unit::new("Planck constant", "h", 6.626070040e-27 * ERG * SECOND, Category::Energy, "h"));
    b.push(Unit::new("atomic mass unit", "u", 1.660539040e-24 * GRAM, Category::Mass, "u"));
    b.push(Unit::new("radiation constant A", "A", RADIATION_CONSTANT, Category::Other, "A"));
    b.push(Unit::new("Avogadro number", "Nₐ", 6.022140857e+23, Category::Other, "N_a"));
    b.push(Unit::new("gas constant", "R", 8.3144598e+07 * ERG / KELVIN / GRAM, Category::Energy, "R"));
    b.push(Unit::new("Bohr Radius", "a₀", 0.529e-8 * CENTIMETER, Category::Length, "a_0"));
    b.push(Unit::new(
        "cfrad",
        "cfrad",
        -3.0 / (16.0 * PI * RADIATION_CONSTANT * SPEED_OF_LIGHT),
        Category::Other,
        "c_{frad}",
    ));
    b.push(
        Unit::new("σ Planck", "σ", RADIATION_CONSTANT * SPEED_OF_LIGHT / 4.0, Category::Other, "\\sigma")
            .with_si(5.670374419e-8, "W / (m2 x K4)"),
    );
}

fn register_time_and_distance_units(b: &mut UnitCatalogBuilder) {
    b.push(Unit::new("minute", "min", 60.0 * SECOND, Category::Time, "min").with_si(60.0, "s"));
    b.push(Unit::new("day", "day", DAY, Category::Time, "days").with_si(86400.0, "s"));
    b.push(Unit::new("year", "yr", 365.25 * DAY, Category::Time, "years"));
    b.push(Unit::new("astronomicalUnit", "au", 1.495978707e+13 * CENTIMETER, Category::Length, "AU"));
    b.push(Unit::new("light-year", "ly", 9460730472580.8 * KILOMETER, Category::Length, "ly"));
    b.push(Unit::new("parsec", "pc", 3.085677581e+18 * CENTIMETER, Category::Length, "pc"));
    b.push(Unit::new("Jansky", "Jy", 1e-23 * ERG / S2 / CM2, Category::FluxDensity, "Jy"));
    b.push(Unit::new("milliJansky", "mJy", 1e-26 * ERG / S2 / CM2, Category::FluxDensity, "mJy"));
}

fn register_astronomical_units(b: &mut UnitCatalogBuilder) {
    b.push(Unit::new("solar radius", "R☉", 6.957e+05 * KILOMETER, Category::Length, "R_{\\odot}"));
    b.push(Unit::new("Jupiter radius", "RJ", 7.1492e+04 * KILOMETER, Category::Length, "R_{J}"));
    b.push(Unit::new("earth radius", "R⊕", 6.3781e+03 * KILOMETER, Category::Length, "R_\\oplus"));
    b.push(Unit::new("solar luminosity", "L☉", SOLAR_LUMINOSITY, Category::Luminosity, "L_{\\odot}"));
    b.push(Unit::new("Jupiter luminosity", "LJ", 8.67e-10 * SOLAR_LUMINOSITY, Category::Luminosity, "{L_J}"));

    b.push(Unit::new("solarGravitationalParameter", "GM☉", GM_SUN, Category::Other, "GM_\\odot"));
    b.push(Unit::new("solar Mass", "M☉", GM_SUN / GRAVITATIONAL_CONSTANT, Category::Mass, "M_{\\odot}"));
    b.push(Unit::new("JupiterGravitationalParameter", "GMJ", GM_JUPITER, Category::Other, "GM_J"));
    b.push(Unit::new("Jupiter Mass", "MJ", GM_JUPITER / GRAVITATIONAL_CONSTANT, Category::Mass, "{M_J}"));
    b.push(Unit::new("earthGravitationalParameter", "GM⊕", GM_EARTH, Category::Other, "GM_E"));
    b.push(Unit::new("earthMass", "M⊕", GM_EARTH / GRAVITATIONAL_CONSTANT, Category::Mass, "{M_\\oplus}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_builds() {
        let catalog = UnitCatalog::standard();
        assert_eq!(catalog.len(), 51);
        assert_eq!(catalog.all_units()[0].name, "gramm");
        assert_eq!(catalog.all_units().last().map(|u| u.name.as_str()), Some("earthMass"));
    }

    #[test]
    fn test_single_pi_entry() {
        let pis = UNITS.all_units().iter().filter(|u| u.name == "Pi").count();
        assert_eq!(pis, 1);
    }

    #[test]
    fn test_abbreviations_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for unit in UNITS.all_units() {
            assert!(seen.insert(unit.abbreviation.as_str()), "duplicate abbreviation {}", unit.abbreviation);
            assert_eq!(UNITS.by_abbreviation(&unit.abbreviation), Some(unit));
        }
    }

    #[test]
    fn test_derived_values() {
        let joule = UNITS.get("Joule").unwrap();
        assert_eq!(joule.reference_value, 1e7);

        let km = UNITS.get("kilometer").unwrap();
        assert_eq!(km.reference_value, 1e5);

        let pascal = UNITS.get("Pascale").unwrap();
        assert_eq!(pascal.reference_value, 10.0);
    }

    #[test]
    fn test_temperature_units_are_affine() {
        let temperatures: Vec<&Unit> = UNITS.units_in_category(Category::Temperature).collect();
        assert_eq!(temperatures.len(), 3);
        assert!(temperatures.iter().all(|u| u.is_affine()));
    }

    #[test]
    fn test_only_temperatures_are_affine() {
        for unit in UNITS.all_units() {
            assert_eq!(unit.is_affine(), unit.category == Category::Temperature, "{}", unit.name);
        }
    }

    #[test]
    fn test_every_unit_has_markup() {
        for unit in UNITS.all_units() {
            assert!(unit.display_markup.is_some(), "{} has no markup", unit.name);
            assert!(!unit.abbreviation.is_empty(), "{} has no abbreviation", unit.name);
        }
    }
}
