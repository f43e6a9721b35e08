use unital::UnitDatabase;

#[test]
fn default_catalog_has_all_si_base_units() {
    let db = UnitDatabase::with_default_catalog();
    for name in ["m", "kg", "s", "A", "K", "mol", "cd"] {
        assert!(db.contains(name), "missing SI base unit '{name}'");
    }
}

#[test]
fn default_catalog_has_prefixed_forms() {
    let db = UnitDatabase::with_default_catalog();
    for name in ["km", "mm", "um", "ns", "kHz", "MW", "mg"] {
        assert!(db.contains(name), "missing prefixed unit '{name}'");
    }
}

#[test]
fn default_catalog_has_long_name_aliases() {
    let db = UnitDatabase::with_default_catalog();
    for name in ["meter", "kilogram", "second", "kelvin", "mole", "candela", "gram"] {
        assert!(db.contains(name), "missing long-name alias '{name}'");
    }
}

#[test]
fn kg_does_not_get_a_redundant_kk_prefix() {
    let db = UnitDatabase::with_default_catalog();
    assert!(!db.contains("kkg"));
}
