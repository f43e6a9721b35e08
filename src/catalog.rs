//! The static SI/derived-unit/prefix catalog. Plain data, not logic — the
//! `UnitDatabase` methods in `database.rs` carry the actual construction
//! algorithm (ported from `unit_database.py`); this module only supplies the
//! ~30 unit/24 prefix table rows it is called with, matching the shape
//! `examples/octofhir-ucum-rs/ucum-core/src/registry.rs::load_all_units`/
//! `load_all_prefixes` hand-writes for the UCUM catalog.
//!
//! Per `examples/original_source/tunits/api/dimension.py`, `Angle` accepts
//! either `rad` or `sr` as valid base units (not merged into one), and
//! `LogPower` accepts either `dB` or `dBm` — both confirmed by the
//! root/scaled-unit split below.

use crate::database::UnitDatabase;

/// `{symbol, name, use_prefixes}` (spec.md §6).
pub struct BaseUnitData {
    pub symbol: &'static str,
    pub name: &'static str,
    pub use_prefixes: bool,
}

/// `{symbol, name, formula, factor, numerator, denominator, exp10, use_prefixes}`.
pub struct DerivedUnitData {
    pub symbol: &'static str,
    pub name: &'static str,
    pub formula: &'static str,
    pub factor: f64,
    pub numerator: i64,
    pub denominator: i64,
    pub exp10: i64,
    pub use_prefixes: bool,
}

/// `{symbol, name, exp10}`, e.g. `("k", "kilo", 3)`.
pub struct PrefixData {
    pub symbol: &'static str,
    pub name: &'static str,
    pub exp10: i64,
}

const fn derived(
    symbol: &'static str,
    name: &'static str,
    formula: &'static str,
    use_prefixes: bool,
) -> DerivedUnitData {
    DerivedUnitData {
        symbol,
        name,
        formula,
        factor: 1.0,
        numerator: 1,
        denominator: 1,
        exp10: 0,
        use_prefixes,
    }
}

/// SI base quantities (spec.md §6: "SI base `m, kg, s, ampere, kelvin, mole,
/// candela`").
pub const SI_BASE_UNITS: &[BaseUnitData] = &[
    BaseUnitData { symbol: "m", name: "meter", use_prefixes: true },
    BaseUnitData { symbol: "kg", name: "kilogram", use_prefixes: true },
    BaseUnitData { symbol: "s", name: "second", use_prefixes: true },
    BaseUnitData { symbol: "A", name: "ampere", use_prefixes: true },
    BaseUnitData { symbol: "K", name: "kelvin", use_prefixes: true },
    BaseUnitData { symbol: "mol", name: "mole", use_prefixes: true },
    BaseUnitData { symbol: "cd", name: "candela", use_prefixes: true },
];

/// SI decadic prefixes (spec.md's "~20 prefixes" budget, extended to the
/// full 24-entry SI set with `deca`).
pub const SI_PREFIXES: &[PrefixData] = &[
    PrefixData { symbol: "q", name: "quecto", exp10: -30 },
    PrefixData { symbol: "r", name: "ronto", exp10: -27 },
    PrefixData { symbol: "y", name: "yocto", exp10: -24 },
    PrefixData { symbol: "z", name: "zepto", exp10: -21 },
    PrefixData { symbol: "a", name: "atto", exp10: -18 },
    PrefixData { symbol: "f", name: "femto", exp10: -15 },
    PrefixData { symbol: "p", name: "pico", exp10: -12 },
    PrefixData { symbol: "n", name: "nano", exp10: -9 },
    PrefixData { symbol: "u", name: "micro", exp10: -6 },
    PrefixData { symbol: "m", name: "milli", exp10: -3 },
    PrefixData { symbol: "c", name: "centi", exp10: -2 },
    PrefixData { symbol: "d", name: "deci", exp10: -1 },
    PrefixData { symbol: "da", name: "deca", exp10: 1 },
    PrefixData { symbol: "h", name: "hecto", exp10: 2 },
    PrefixData { symbol: "k", name: "kilo", exp10: 3 },
    PrefixData { symbol: "M", name: "mega", exp10: 6 },
    PrefixData { symbol: "G", name: "giga", exp10: 9 },
    PrefixData { symbol: "T", name: "tera", exp10: 12 },
    PrefixData { symbol: "P", name: "peta", exp10: 15 },
    PrefixData { symbol: "E", name: "exa", exp10: 18 },
    PrefixData { symbol: "Z", name: "zetta", exp10: 21 },
    PrefixData { symbol: "Y", name: "yotta", exp10: 24 },
    PrefixData { symbol: "R", name: "ronna", exp10: 27 },
    PrefixData { symbol: "Q", name: "quetta", exp10: 30 },
];

/// Common derived units (spec.md §6: "common derived `Hz, newton, joule,
/// watt, pascal, coulomb, V, ohm, siemens, farad, henry, tesla, weber,
/// lumen, lux`"). Formulas are built up left-to-right over previously
/// registered units, mirroring how `add_derived_unit_data` is normally
/// called in dependency order.
pub fn derived_units() -> Vec<DerivedUnitData> {
    vec![
        derived("Hz", "hertz", "s^-1", true),
        derived("N", "newton", "kg*m/s^2", true),
        derived("J", "joule", "N*m", true),
        derived("W", "watt", "J/s", true),
        derived("Pa", "pascal", "N/m^2", true),
        derived("C", "coulomb", "A*s", true),
        derived("V", "volt", "W/A", true),
        derived("ohm", "ohm", "V/A", true),
        derived("S", "siemens", "ohm^-1", true),
        derived("F", "farad", "C/V", true),
        derived("H", "henry", "V*s/A", true),
        derived("Wb", "weber", "V*s", true),
        derived("T", "tesla", "Wb/m^2", true),
        derived("lm", "lumen", "cd*sr", false),
        derived("lx", "lux", "lm/m^2", false),
    ]
}

/// Common non-SI units (spec.md §6: "common non-SI like `minute, hour, day,
/// in, gauss`"), each an exact rational multiple of an already-registered
/// unit. `in` is exact (`127/5000 m`); `gauss` is CGS magnetic flux density
/// (`1e-4 T`). Must be registered in this order: each formula references
/// the previous entry (or an SI/derived unit already in the database).
pub fn non_si_units() -> Vec<DerivedUnitData> {
    vec![
        DerivedUnitData { symbol: "minute", name: "minute", formula: "s", factor: 1.0, numerator: 60, denominator: 1, exp10: 0, use_prefixes: false },
        DerivedUnitData { symbol: "hour", name: "hour", formula: "minute", factor: 1.0, numerator: 60, denominator: 1, exp10: 0, use_prefixes: false },
        DerivedUnitData { symbol: "day", name: "day", formula: "hour", factor: 1.0, numerator: 24, denominator: 1, exp10: 0, use_prefixes: false },
        DerivedUnitData { symbol: "in", name: "inch", formula: "m", factor: 1.0, numerator: 127, denominator: 5000, exp10: 0, use_prefixes: false },
        DerivedUnitData { symbol: "gauss", name: "gauss", formula: "T", factor: 1.0, numerator: 1, denominator: 1, exp10: -4, use_prefixes: false },
    ]
}

/// Populate `db` with the SI base/derived/non-SI catalog plus the angular
/// (`rad`/`sr`/`cyc`) and logarithmic (`dB`/`dBm`) units, in dependency
/// order. Intended to run once against a fresh, empty database — re-running
/// against an already-populated one fails on the first duplicate name.
pub fn populate_default(db: &mut UnitDatabase) {
    for base in SI_BASE_UNITS {
        db.add_base_unit_data(base, SI_PREFIXES)
            .unwrap_or_else(|e| panic!("catalog bug registering base unit {}: {e}", base.symbol));
    }

    // Angular units: `rad` is a root unit; `sr = rad^2` by construction so
    // `Value(2,'rad')**2 == Value(4,'sr')` (scenario 4); `cyc = 2*PI*rad`.
    // Registered before `derived_units()` because `lm = cd*sr` depends on `sr`.
    db.add_root_unit("rad").unwrap();
    db.add_derived_unit_data(&derived("sr", "steradian", "rad^2", false), &[])
        .unwrap();
    db.add_scaled_unit("cyc", "rad", std::f64::consts::TAU, 1, 1, 0)
        .unwrap();

    for unit in derived_units() {
        db.add_derived_unit_data(&unit, SI_PREFIXES)
            .unwrap_or_else(|e| panic!("catalog bug registering derived unit {}: {e}", unit.symbol));
    }

    for unit in non_si_units() {
        db.add_derived_unit_data(&unit, SI_PREFIXES)
            .unwrap_or_else(|e| panic!("catalog bug registering non-SI unit {}: {e}", unit.symbol));
    }

    // Logarithmic units: separate incommensurable root units (§9 Open
    // Question), never collapsed into dimensionless or into each other.
    db.add_root_unit("dB").unwrap();
    db.add_root_unit("dBm").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_registers_expected_names() {
        let db = UnitDatabase::with_default_catalog();
        for name in [
            "m", "kg", "s", "A", "K", "mol", "cd", "g", "gram", "mg", "Hz", "N", "J", "W", "Pa",
            "C", "V", "ohm", "S", "F", "H", "Wb", "T", "lm", "lx", "rad", "sr", "cyc", "dB", "dBm",
            "minute", "hour", "day", "in", "gauss",
        ] {
            assert!(db.contains(name), "missing catalog unit {name}");
        }
    }
}
