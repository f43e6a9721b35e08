//! A units-of-measurement engine: quantities that carry their own unit
//! information, exact conversion between commensurable units, rejection of
//! operations between incommensurable units, and a parser for unit formulas
//! like `kg*m/s^2`.
//!
//! ```
//! let mut db = unital::UnitDatabase::with_default_catalog();
//! let a = unital::WithUnit::from_number(3.0).multiply(&db.parse_unit_formula("m").unwrap()).unwrap();
//! let b = unital::WithUnit::from_number(1.0).multiply(&db.parse_unit_formula("km").unwrap()).unwrap();
//! let sum = a.add(&b).unwrap();
//! assert_eq!(sum.value.as_f64().unwrap(), 1003.0);
//! ```

mod ast;
mod catalog;
mod database;
mod error;
mod parser;
mod quantity;
mod scale;
mod suggestions;
mod unit_array;
mod value;

pub use catalog::{BaseUnitData, DerivedUnitData, PrefixData};
pub use database::UnitDatabase;
pub use error::{Result, UnitsError};
pub use quantity::{repr, WithUnit};
pub use scale::{Scale, ScaleRatio};
pub use unit_array::UnitArray;
pub use value::{NArray, Value};

use once_cell::sync::Lazy;
use std::sync::Mutex;

/// The process-wide default database, built once from the static catalog.
/// Per SPEC_FULL.md §5, writers (here, auto-create on first lookup of each
/// new name) are serialized behind this mutex; once warmed up, lookups are
/// cheap `HashMap` reads under a short-lived lock.
static DEFAULT_DATABASE: Lazy<Mutex<UnitDatabase>> = Lazy::new(|| Mutex::new(UnitDatabase::with_default_catalog()));

/// Parse `formula` against the process-wide default database and wrap the
/// result as a quantity of magnitude 1 (§6: `parse(formula) -> Quantity`).
pub fn parse(formula: &str) -> Result<WithUnit> {
    let mut db = DEFAULT_DATABASE.lock().expect("default unit database lock poisoned");
    db.parse_unit_formula(formula)
}

/// `Quantity(value, units)`: a number together with a unit formula string
/// (§6). For the sibling form that copies units from an existing quantity,
/// see `quantity_from`.
pub fn quantity(value: f64, units: &str) -> Result<WithUnit> {
    let unit = parse(units)?;
    WithUnit::from_number(value).multiply(&unit)
}

/// `Quantity(value, units)` where `units` is itself a `Quantity` (§6): `value`
/// is taken in `existing`'s own display units, e.g.
/// `quantity_from(3.0, &quantity(1.0, "m").unwrap())` is `3 m`.
pub fn quantity_from(value: f64, existing: &WithUnit) -> Result<WithUnit> {
    WithUnit::from_number(value).multiply(&existing.unit_of_one())
}

#[cfg(test)]
mod scenario_tests {
    //! The ten concrete scenarios from spec.md §8, each exercised verbatim.
    use super::*;
    use num_rational::Ratio;

    fn fresh_db() -> UnitDatabase {
        UnitDatabase::with_default_catalog()
    }

    #[test]
    fn scenario_1_mixed_unit_addition() {
        let mut db = fresh_db();
        let a = quantity_in(&mut db, 3.0, "m");
        let b = quantity_in(&mut db, 1.0, "km");
        let sum = a.add(&b).unwrap();
        assert_eq!(sum.value.as_f64().unwrap(), 1003.0);
        assert_eq!(sum.display_units.format(), "m");
    }

    #[test]
    fn scenario_2_inch_less_than_meter() {
        let mut db = fresh_db();
        let one_in = quantity_in(&mut db, 1.0, "in");
        let one_m = quantity_in(&mut db, 1.0, "m");
        assert_eq!(one_in.partial_cmp_checked(&one_m).unwrap(), std::cmp::Ordering::Less);
    }

    #[test]
    fn scenario_3_megagram_equals_kilograms() {
        let mut db = fresh_db();
        let ten_mg = quantity_in(&mut db, 10.0, "Mg");
        let ten_thousand_kg = quantity_in(&mut db, 10000.0, "kg");
        assert_eq!(ten_mg, ten_thousand_kg);
    }

    #[test]
    fn scenario_4_radian_squared_equals_steradian() {
        let mut db = fresh_db();
        let two_rad = quantity_in(&mut db, 2.0, "rad");
        let squared = two_rad.pow_rational(Ratio::from_integer(2)).unwrap();
        let four_sr = quantity_in(&mut db, 4.0, "sr");
        assert_eq!(squared, four_sr);
    }

    #[test]
    fn scenario_5_sqrt_of_micrometer_times_meter() {
        let mut db = fresh_db();
        let um = db.parse_unit_formula("um").unwrap();
        let m = db.parse_unit_formula("m").unwrap();
        let sixteen_um_m = WithUnit::from_number(16.0).multiply(&um).unwrap().multiply(&m).unwrap();
        let root = sixteen_um_m.pow_f64(0.5).unwrap();
        let four_mm = quantity_in(&mut db, 4.0, "mm");
        assert_eq!(root, four_mm);
    }

    #[test]
    fn scenario_6_formula_base_units() {
        let mut db = fresh_db();
        let q = db.parse_unit_formula("kg*m/s^2").unwrap();
        assert_eq!(q.base_units.format(), "kg*m/s^2");
    }

    #[test]
    fn scenario_7_indexing_converts_to_millimeters() {
        let mut db = fresh_db();
        let three_m = quantity_in(&mut db, 3.0, "m");
        let mm = db.parse_unit_formula("mm").unwrap();
        assert_eq!(three_m.index(&mm).unwrap(), 3000.0);
    }

    #[test]
    fn scenario_8_incommensurable_addition_errors() {
        let mut db = fresh_db();
        let three_m = quantity_in(&mut db, 3.0, "m");
        let one_s = quantity_in(&mut db, 1.0, "s");
        assert!(matches!(three_m.add(&one_s), Err(UnitsError::UnitMismatch { .. })));
    }

    #[test]
    fn scenario_9_repr_format() {
        let mut db = fresh_db();
        let one_mm = quantity_in(&mut db, 1.0, "mm");
        assert_eq!(repr(&one_mm), "Value(1.0, 'mm')");
    }

    #[test]
    fn scenario_10_sqrt_of_four_km_str_format() {
        let mut db = fresh_db();
        let four_km = quantity_in(&mut db, 4.0, "km");
        let root = four_km.pow_f64(0.5).unwrap();
        assert_eq!(root.to_string(), "2.0 km^(1/2)");
    }

    fn quantity_in(db: &mut UnitDatabase, value: f64, units: &str) -> WithUnit {
        let unit = db.parse_unit_formula(units).unwrap();
        WithUnit::from_number(value).multiply(&unit).unwrap()
    }

    #[test]
    fn quantity_from_copies_units_of_existing_quantity() {
        let mut db = fresh_db();
        let one_mm = quantity_in(&mut db, 1.0, "mm");
        let three_mm = quantity_from(3.0, &one_mm).unwrap();
        assert_eq!(three_mm, quantity_in(&mut db, 3.0, "mm"));
        assert_eq!(three_mm.display_units, one_mm.display_units);
    }
}
