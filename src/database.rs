//! `UnitDatabase`: a mapping from unit name to `WithUnit`, with constructors
//! for root, alias, scaled, prefixed, and derived units. Ported from
//! `examples/original_source/src/pyfu/unit_database.py`'s `UnitDatabase`.

use crate::ast::{Formula, Op};
use crate::catalog::{BaseUnitData, DerivedUnitData, PrefixData};
use crate::error::{Result, UnitsError};
use crate::parser;
use crate::quantity::WithUnit;
use crate::scale::Scale;
use crate::suggestions::suggest;
use crate::unit_array::UnitArray;
use num_bigint::BigInt;
use num_rational::{BigRational, Ratio};
use std::collections::HashMap;

/// Registry of named units. Mutable during population, effectively
/// read-only afterwards (see SPEC_FULL.md §5 for the concurrency model this
/// implies for multi-threaded callers).
pub struct UnitDatabase {
    units: HashMap<String, WithUnit>,
    auto_create_units: bool,
}

impl UnitDatabase {
    /// An empty database. `auto_create_units` controls whether `get_unit`
    /// invents a fresh root unit for an unrecognized name.
    pub fn new(auto_create_units: bool) -> Self {
        UnitDatabase {
            units: HashMap::new(),
            auto_create_units,
        }
    }

    /// A database pre-populated with the SI base/derived/prefix catalog
    /// (`catalog.rs`), auto-create enabled — matches the teacher's default
    /// registry construction shape.
    pub fn with_default_catalog() -> Self {
        let mut db = UnitDatabase::new(true);
        crate::catalog::populate_default(&mut db);
        db
    }

    pub fn auto_create_units(&self) -> bool {
        self.auto_create_units
    }

    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(|s| s.as_str())
    }

    /// Resolve `name` to its `WithUnit`, auto-creating a fresh root unit if
    /// `auto_create_units` is set and `name` is unrecognized; otherwise
    /// fails with `UnknownUnit` (carrying fuzzy-matched suggestions).
    pub fn get_unit(&mut self, name: &str) -> Result<WithUnit> {
        if let Some(existing) = self.units.get(name) {
            return Ok(existing.clone());
        }
        if self.auto_create_units {
            let created = self.add_root_unit(name.to_string())?;
            return Ok(created);
        }
        let suggestions = suggest(name, self.units.keys().map(|s| s.as_str()));
        Err(UnitsError::unknown_unit_with_suggestions(name, suggestions))
    }

    /// Like `get_unit` but never mutates the database (used for read-only
    /// lookups, e.g. by the CLI's `analyze` command over a shared database).
    pub fn peek_unit(&self, name: &str) -> Result<WithUnit> {
        if let Some(existing) = self.units.get(name) {
            return Ok(existing.clone());
        }
        let suggestions = suggest(name, self.units.keys().map(|s| s.as_str()));
        Err(UnitsError::unknown_unit_with_suggestions(name, suggestions))
    }

    /// Store `value` under `name`; fails with `DuplicateUnit` if `name` is
    /// already registered.
    pub fn add_unit(&mut self, name: impl Into<String>, value: WithUnit) -> Result<WithUnit> {
        let name = name.into();
        if self.units.contains_key(&name) {
            return Err(UnitsError::DuplicateUnit(name));
        }
        self.units.insert(name, value.clone());
        Ok(value)
    }

    /// A unit whose `display_units` and `base_units` are both `{name: 1}`
    /// and whose scale is one — a fresh base dimension.
    pub fn add_root_unit(&mut self, name: impl Into<String>) -> Result<WithUnit> {
        let name = name.into();
        let array = UnitArray::singleton(name.clone());
        let unit = WithUnit::raw(1.0.into(), Scale::one(), array.clone(), array);
        self.add_unit(name, unit)
    }

    /// Map `alias` to the exact same `WithUnit` as `existing`.
    pub fn add_alias(&mut self, alias: impl Into<String>, existing: &str) -> Result<WithUnit> {
        let value = self.get_unit_no_create(existing)?;
        self.add_unit(alias, value)
    }

    fn get_unit_no_create(&self, name: &str) -> Result<WithUnit> {
        self.units
            .get(name)
            .cloned()
            .ok_or_else(|| UnitsError::unknown_unit(name))
    }

    /// Parse `formula` relative to existing units (auto-creating unknown
    /// names per the database's policy); the new unit's scale is
    /// `formula.scale * (factor, numer/denom, 10^exp10)`, its `base_units`
    /// equal the parsed formula's, and its `display_units` are `{name: 1}`.
    pub fn add_scaled_unit(
        &mut self,
        name: impl Into<String>,
        formula: &str,
        factor: f64,
        numer: i64,
        denom: i64,
        exp10: i64,
    ) -> Result<WithUnit> {
        let name = name.into();
        let parsed = self.parse_unit_formula(formula)?;
        let extra_scale = Scale {
            factor,
            ratio: BigRational::new(BigInt::from(numer), BigInt::from(denom)),
            exp10: BigInt::from(exp10),
        };
        let scale = parsed.scale.multiply(&extra_scale);
        let unit = WithUnit::raw(
            1.0.into(),
            scale,
            UnitArray::singleton(name.clone()),
            parsed.base_units.clone(),
        );
        self.add_unit(name, unit)
    }

    /// Register a root unit by `symbol`, an alias by full `name`, applying
    /// the kilogram special case (§4.4/§9): when `symbol == "kg"`, register
    /// `g = kg * 10^-3` (alias `gram`) instead, and prefix `g` rather than
    /// `kg` (skipping the `k` prefix, which would otherwise duplicate `kg`).
    pub fn add_base_unit_data(&mut self, data: &BaseUnitData, prefixes: &[PrefixData]) -> Result<()> {
        self.add_root_unit(data.symbol)?;
        self.add_alias(data.name, data.symbol)?;

        let (symbol, name) = if data.symbol == "kg" {
            self.add_scaled_unit("g", "kg", 1.0, 1, 1, -3)?;
            self.add_alias("gram", "g")?;
            ("g", "gram")
        } else {
            (data.symbol, data.name)
        };

        if data.use_prefixes {
            for prefix in prefixes {
                if symbol == "g" && prefix.symbol == "k" {
                    // "kg" is already the base unit; don't register it twice.
                    continue;
                }
                let prefixed_symbol = format!("{}{}", prefix.symbol, symbol);
                self.add_scaled_unit(&prefixed_symbol, symbol, 1.0, 1, 1, prefix.exp10)?;
                self.add_alias(format!("{}{}", prefix.name, name), &prefixed_symbol)?;
            }
        }
        Ok(())
    }

    /// Register by `symbol` and by long `name`; optionally for each prefix
    /// add both `<prefix><symbol>` and the aliased `<prefix-name><name>`,
    /// adjusting `exp10` by the prefix's decimal shift.
    pub fn add_derived_unit_data(&mut self, data: &DerivedUnitData, prefixes: &[PrefixData]) -> Result<()> {
        for key in [data.symbol, data.name] {
            self.add_scaled_unit(key, data.formula, data.factor, data.numerator, data.denominator, data.exp10)?;
        }

        if data.use_prefixes {
            for prefix in prefixes {
                let prefixed_symbol = format!("{}{}", prefix.symbol, data.symbol);
                self.add_scaled_unit(
                    &prefixed_symbol,
                    data.formula,
                    data.factor,
                    data.numerator,
                    data.denominator,
                    data.exp10 + prefix.exp10,
                )?;
                self.add_alias(format!("{}{}", prefix.name, data.name), &prefixed_symbol)?;
            }
        }
        Ok(())
    }

    /// Parse a unit formula string into a `WithUnit`. The empty (or
    /// all-whitespace) string parses to dimensionless `WithUnit(1)`, per
    /// §4.5.
    pub fn parse_unit_formula(&mut self, s: &str) -> Result<WithUnit> {
        if s.trim().is_empty() {
            return Ok(WithUnit::from_number(1.0));
        }
        let ast: Formula = parser::parse_formula(s)?;
        let mut result = self.resolve_term(&ast.first)?;
        for (op, term) in &ast.rest {
            let next = self.resolve_term(term)?;
            result = match op {
                Op::Mul => result.multiply(&next)?,
                Op::Div => result.divide(&next)?,
            };
        }
        Ok(result)
    }

    fn resolve_term(&mut self, term: &crate::ast::Term) -> Result<WithUnit> {
        let base = self.get_unit(&term.name)?;
        if term.exponent == Ratio::from_integer(1) {
            Ok(base)
        } else {
            base.pow_rational(term.exponent)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_root_unit_then_alias() {
        let mut db = UnitDatabase::new(false);
        db.add_root_unit("m").unwrap();
        db.add_alias("meter", "m").unwrap();
        let a = db.get_unit("m").unwrap();
        let b = db.get_unit("meter").unwrap();
        assert_eq!(a.base_units, b.base_units);
    }

    #[test]
    fn duplicate_unit_errors() {
        let mut db = UnitDatabase::new(false);
        db.add_root_unit("m").unwrap();
        assert!(matches!(db.add_root_unit("m"), Err(UnitsError::DuplicateUnit(_))));
    }

    #[test]
    fn unknown_unit_without_auto_create_errors() {
        let mut db = UnitDatabase::new(false);
        assert!(matches!(db.get_unit("bogus"), Err(UnitsError::UnknownUnit { .. })));
    }

    #[test]
    fn auto_create_makes_incommensurable_root_units() {
        let mut db = UnitDatabase::new(true);
        let a = db.get_unit("widget").unwrap();
        let b = db.get_unit("gadget").unwrap();
        assert_ne!(a.base_units, b.base_units);
    }

    #[test]
    fn kg_gram_special_case() {
        let db = UnitDatabase::with_default_catalog();
        assert!(db.contains("kg"));
        assert!(db.contains("g"));
        assert!(db.contains("gram"));
        assert!(db.contains("mg"));
        assert!(!db.contains("kkg"));
    }

    #[test]
    fn prefix_exactness_kilogram_equals_thousand_gram() {
        let mut db = UnitDatabase::with_default_catalog();
        let one_kg = WithUnit::from_number(1.0).multiply(&db.parse_unit_formula("kg").unwrap()).unwrap();
        let thousand_g = WithUnit::from_number(1000.0).multiply(&db.parse_unit_formula("g").unwrap()).unwrap();
        assert_eq!(one_kg, thousand_g);
    }

    #[test]
    fn formula_base_units_match_scenario_six() {
        let mut db = UnitDatabase::with_default_catalog();
        let q = db.parse_unit_formula("kg*m/s^2").unwrap();
        assert_eq!(q.base_units.format(), "kg*m/s^2");
    }

    #[test]
    fn empty_formula_is_truly_dimensionless_not_a_new_unit() {
        let mut db = UnitDatabase::with_default_catalog();
        let empty = db.parse_unit_formula("").unwrap();
        assert!(empty.is_dimensionless());
        assert!(!db.contains(""));

        let m_over_m = db.parse_unit_formula("m/m").unwrap();
        assert_eq!(empty, m_over_m);
    }
}
