use num_rational::Ratio;
use unital::{UnitDatabase, WithUnit};

#[test]
fn custom_root_unit_is_incommensurable_with_everything_registered() {
    let mut db = UnitDatabase::with_default_catalog();
    let widget = db.parse_unit_formula("widget").unwrap();
    let meter = db.parse_unit_formula("m").unwrap();
    assert_ne!(widget.base_units, meter.base_units);
}

#[test]
fn user_defined_scaled_unit_converts_exactly() {
    let mut db = UnitDatabase::new(true);
    db.add_root_unit("m").unwrap();
    db.add_scaled_unit("furlong", "m", 1.0, 201168, 1000, 0).unwrap();
    let one_furlong = WithUnit::from_number(1.0)
        .multiply(&db.parse_unit_formula("furlong").unwrap())
        .unwrap();
    let meters = db.parse_unit_formula("m").unwrap();
    assert_eq!(one_furlong.index(&meters).unwrap(), 201.168);
}

#[test]
fn user_defined_alias_shares_identity_with_original() {
    let mut db = UnitDatabase::new(true);
    db.add_root_unit("joule_like").unwrap();
    db.add_alias("energy_unit", "joule_like").unwrap();
    let a = WithUnit::from_number(5.0)
        .multiply(&db.parse_unit_formula("joule_like").unwrap())
        .unwrap();
    let b = WithUnit::from_number(5.0)
        .multiply(&db.parse_unit_formula("energy_unit").unwrap())
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn derived_unit_formula_resolves_transitively() {
    let mut db = UnitDatabase::with_default_catalog();
    let newton = db.parse_unit_formula("N").unwrap();
    let kg_m_per_s2 = db.parse_unit_formula("kg*m/s^2").unwrap();
    assert_eq!(newton.base_units, kg_m_per_s2.base_units);
}

#[test]
fn steradian_is_radian_squared_not_a_new_base_dimension() {
    let mut db = UnitDatabase::with_default_catalog();
    let sr = db.parse_unit_formula("sr").unwrap();
    let rad_squared = db
        .parse_unit_formula("rad")
        .unwrap()
        .pow_rational(Ratio::from_integer(2))
        .unwrap();
    assert_eq!(sr.base_units, rad_squared.base_units);
}
