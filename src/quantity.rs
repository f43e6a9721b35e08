//! `WithUnit`: a numeric value together with a `Scale` and the `UnitArray`s
//! it was displayed and reduced in.

use crate::error::{Result, UnitsError};
use crate::scale::Scale;
use crate::unit_array::UnitArray;
use crate::value::Value;
use num_rational::Ratio;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A physical quantity: a numeric `value`, the `display_units` it was last
/// written in, its reduced `base_units`, and the `Scale` relating `value` in
/// `display_units` to the same magnitude in `base_units`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WithUnit {
    pub value: Value,
    pub display_units: UnitArray,
    pub base_units: UnitArray,
    pub scale: Scale,
}

impl WithUnit {
    /// Internal constructor: trusts its arguments to already be consistent.
    pub fn raw(value: Value, scale: Scale, display_units: UnitArray, base_units: UnitArray) -> Self {
        WithUnit {
            value,
            display_units,
            base_units,
            scale,
        }
    }

    /// A dimensionless quantity: scale one, empty unit arrays.
    pub fn from_number(value: impl Into<Value>) -> Self {
        WithUnit::raw(value.into(), Scale::one(), UnitArray::dimensionless(), UnitArray::dimensionless())
    }

    pub fn is_dimensionless(&self) -> bool {
        self.base_units.is_dimensionless()
    }

    pub fn is_compatible(&self, other: &WithUnit) -> bool {
        self.base_units == other.base_units
    }

    /// A quantity with the same display units, base units, and scale as
    /// `self` but value `1` — used to build a fresh quantity in an existing
    /// quantity's units (§6's `Quantity(value, existing_quantity)` form).
    pub fn unit_of_one(&self) -> WithUnit {
        WithUnit::raw(Value::Real(1.0), self.scale.clone(), self.display_units.clone(), self.base_units.clone())
    }

    /// The quantity's payload expressed purely in base units (`value *
    /// scale.value()`), as a `Value` — works uniformly for real, complex,
    /// and array payloads. Used for equality and hashing, and as the basis
    /// for scaling into another unit's magnitude.
    fn scaled_value(&self) -> Value {
        self.value.scale_by(self.scale.value())
    }

    /// The quantity's magnitude as a real scalar, expressed purely in base
    /// units. Only meaningful for real-valued quantities: floor division and
    /// ordering have no standard complex/array analogue, so these restrict
    /// themselves to `Value::Real` and surface a `TypeError` otherwise
    /// (never a panic).
    fn real_base_magnitude(&self) -> Result<f64> {
        Ok(self.value.as_f64()? * self.scale.value())
    }

    pub fn multiply(&self, other: &WithUnit) -> Result<WithUnit> {
        Ok(WithUnit::raw(
            self.value.mul(&other.value)?,
            self.scale.multiply(&other.scale),
            self.display_units.multiply(&other.display_units),
            self.base_units.multiply(&other.base_units),
        ))
    }

    pub fn inverse(&self) -> Result<WithUnit> {
        let one = Value::Real(1.0);
        Ok(WithUnit::raw(
            one.div(&self.value)?,
            self.scale.inverse(),
            self.display_units.inverse(),
            self.base_units.inverse(),
        ))
    }

    pub fn divide(&self, other: &WithUnit) -> Result<WithUnit> {
        self.multiply(&other.inverse()?)
    }

    pub fn add(&self, other: &WithUnit) -> Result<WithUnit> {
        if self.base_units != other.base_units {
            return Err(UnitsError::unit_mismatch(
                self.display_units.format(),
                other.display_units.format(),
                "addition",
            ));
        }
        let other_in_self_scale = other.value.scale_by(other.scale.value() / self.scale.value());
        Ok(WithUnit::raw(
            self.value.add(&other_in_self_scale)?,
            self.scale.clone(),
            self.display_units.clone(),
            self.base_units.clone(),
        ))
    }

    pub fn sub(&self, other: &WithUnit) -> Result<WithUnit> {
        if self.base_units != other.base_units {
            return Err(UnitsError::unit_mismatch(
                self.display_units.format(),
                other.display_units.format(),
                "subtraction",
            ));
        }
        let other_in_self_scale = other.value.scale_by(other.scale.value() / self.scale.value());
        Ok(WithUnit::raw(
            self.value.sub(&other_in_self_scale)?,
            self.scale.clone(),
            self.display_units.clone(),
            self.base_units.clone(),
        ))
    }

    /// Floor division: requires commensurable, real-valued operands; result
    /// is a bare dimensionless number, not a `WithUnit`.
    pub fn floor_div(&self, other: &WithUnit) -> Result<f64> {
        if self.base_units != other.base_units {
            return Err(UnitsError::unit_mismatch(
                self.display_units.format(),
                other.display_units.format(),
                "floor division",
            ));
        }
        let a = self.real_base_magnitude()?;
        let b = other.real_base_magnitude()?;
        Ok((a / b).floor())
    }

    /// Modulo: requires commensurable operands; result is a `WithUnit`
    /// commensurable with both, expressed in the left operand's units.
    pub fn rem(&self, other: &WithUnit) -> Result<WithUnit> {
        if self.base_units != other.base_units {
            return Err(UnitsError::unit_mismatch(
                self.display_units.format(),
                other.display_units.format(),
                "modulo",
            ));
        }
        let other_in_self_scale = other.value.scale_by(other.scale.value() / self.scale.value());
        Ok(WithUnit::raw(
            self.value.modulo(&other_in_self_scale)?,
            self.scale.clone(),
            self.display_units.clone(),
            self.base_units.clone(),
        ))
    }

    /// `self ** r` for rational `r`. Applies to the numeric payload, the
    /// display/base unit arrays, and the scale independently (see
    /// SPEC_FULL.md §4.3 implementation note).
    pub fn pow_rational(&self, r: Ratio<i64>) -> Result<WithUnit> {
        let r_f64 = *r.numer() as f64 / *r.denom() as f64;
        Ok(WithUnit::raw(
            self.value.powf(r_f64)?,
            self.scale.pow(r),
            self.display_units.pow(r),
            self.base_units.pow(r),
        ))
    }

    /// `self ** r` for an arbitrary float exponent; approximated as a
    /// rational with a bounded denominator so that exact cases (`0.5`,
    /// integers) stay exact.
    pub fn pow_f64(&self, r: f64) -> Result<WithUnit> {
        self.pow_rational(approximate_rational(r))
    }

    /// Scale-to another unit/quantity; verifies commensurability and uses an
    /// exact rational ratio when both scales are rational-only.
    pub fn in_units_of(&self, target: &WithUnit) -> Result<WithUnit> {
        if !self.is_compatible(target) {
            return Err(UnitsError::unit_mismatch(
                self.display_units.format(),
                target.display_units.format(),
                "conversion",
            ));
        }
        let ratio = self.scale.ratio_to(&target.scale);
        let converted = self.value.scale_by(ratio.to_f64());
        Ok(WithUnit::raw(
            converted,
            target.scale.clone(),
            target.display_units.clone(),
            target.base_units.clone(),
        ))
    }

    pub fn in_base_units(&self) -> Result<WithUnit> {
        Ok(WithUnit::raw(
            self.scaled_value(),
            Scale::one(),
            self.base_units.clone(),
            self.base_units.clone(),
        ))
    }

    /// Indexing sugar: `q[target]` == `q.in_units_of(target)?.value`.
    pub fn index(&self, target: &WithUnit) -> Result<f64> {
        self.in_units_of(target)?.value.as_f64()
    }

    pub fn partial_cmp_checked(&self, other: &WithUnit) -> Result<Ordering> {
        if self.base_units != other.base_units {
            return Err(UnitsError::unit_mismatch(
                self.display_units.format(),
                other.display_units.format(),
                "comparison",
            ));
        }
        let a = self.real_base_magnitude()?;
        let b = other.real_base_magnitude()?;
        a.partial_cmp(&b)
            .ok_or_else(|| UnitsError::TypeError("quantities are not orderable (NaN)".into()))
    }
}

/// Quantities compare equal iff commensurable and their base-unit magnitudes
/// coincide; incommensurable quantities compare unequal, never error (§4.3,
/// §7 policy). Works uniformly across real, complex, and array payloads via
/// `scaled_value`, so e.g. two equal-magnitude complex quantities compare
/// equal instead of silently failing.
impl PartialEq for WithUnit {
    fn eq(&self, other: &WithUnit) -> bool {
        if self.base_units != other.base_units {
            return false;
        }
        self.scaled_value() == other.scaled_value()
    }
}

/// Hash law: commensurable, equal-magnitude quantities must hash equal, so
/// hash `(magnitude_in_base_units, base_units)`, never display units or
/// scale. `Value::canonical_hash_bits` normalizes `-0.0` and covers every
/// payload kind, so this holds for complex and array quantities too.
impl Hash for WithUnit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for bits in self.scaled_value().canonical_hash_bits() {
            bits.hash(state);
        }
        self.base_units.hash(state);
    }
}

impl std::fmt::Display for WithUnit {
    /// `str`: if `value == 1` and display units non-empty, just the unit
    /// string; else `<value> <display_units>`; dimensionless with empty
    /// units prints just `<value>`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let units = self.display_units.format();
        let is_one = matches!(self.value, Value::Real(x) if x == 1.0);
        if units.is_empty() {
            write!(f, "{}", self.value)
        } else if is_one {
            write!(f, "{units}")
        } else {
            write!(f, "{} {units}", self.value)
        }
    }
}

/// `repr`: `Value(<numeric>, '<display_units>')`.
pub fn repr(q: &WithUnit) -> String {
    format!("Value({}, '{}')", repr_value(&q.value), q.display_units.format())
}

fn repr_value(v: &Value) -> String {
    match v {
        Value::Real(x) => format!("{x:?}"),
        other => other.to_string(),
    }
}

/// Approximate a float as a rational with a denominator bounded so common
/// exact cases (halves, thirds, integers) survive exactly.
fn approximate_rational(x: f64) -> Ratio<i64> {
    const MAX_DENOM: i64 = 1_000_000;
    Ratio::approximate_float(x).unwrap_or_else(|| Ratio::from_integer(x.round() as i64))
        .reduced_to(MAX_DENOM)
}

trait ReduceTo {
    fn reduced_to(self, max_denom: i64) -> Ratio<i64>;
}

impl ReduceTo for Ratio<i64> {
    fn reduced_to(self, max_denom: i64) -> Ratio<i64> {
        if *self.denom() <= max_denom {
            self
        } else {
            // fall back to a coarser rounding if the continued-fraction
            // approximation needs an unreasonably large denominator
            Ratio::new((*self.numer() * max_denom) / *self.denom(), max_denom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::UnitDatabase;

    fn db() -> UnitDatabase {
        UnitDatabase::with_default_catalog()
    }

    #[test]
    fn addition_converts_to_left_operand_scale() {
        let mut db = db();
        let three_m = db.parse_unit_formula("m").unwrap().multiply(&WithUnit::from_number(3.0)).unwrap();
        let one_km = db.parse_unit_formula("km").unwrap().multiply(&WithUnit::from_number(1.0)).unwrap();
        let sum = three_m.add(&one_km).unwrap();
        assert_eq!(sum.value.as_f64().unwrap(), 1003.0);
        assert_eq!(sum.display_units, three_m.display_units);
    }

    #[test]
    fn addition_across_incommensurable_units_errors() {
        let mut db = db();
        let three_m = WithUnit::from_number(3.0).multiply(&db.parse_unit_formula("m").unwrap()).unwrap();
        let one_s = WithUnit::from_number(1.0).multiply(&db.parse_unit_formula("s").unwrap()).unwrap();
        assert!(matches!(three_m.add(&one_s), Err(UnitsError::UnitMismatch { .. })));
    }

    #[test]
    fn equality_is_false_not_error_for_incommensurable() {
        let mut db = db();
        let three_m = WithUnit::from_number(3.0).multiply(&db.parse_unit_formula("m").unwrap()).unwrap();
        let one_s = WithUnit::from_number(1.0).multiply(&db.parse_unit_formula("s").unwrap()).unwrap();
        assert_ne!(three_m, one_s);
    }

    #[test]
    fn repr_matches_expected_format() {
        let mut db = db();
        let one_mm = WithUnit::from_number(1.0).multiply(&db.parse_unit_formula("mm").unwrap()).unwrap();
        assert_eq!(repr(&one_mm), "Value(1.0, 'mm')");
    }

    #[test]
    fn indexing_converts_units() {
        let mut db = db();
        let three_m = WithUnit::from_number(3.0).multiply(&db.parse_unit_formula("m").unwrap()).unwrap();
        let mm = db.parse_unit_formula("mm").unwrap();
        assert_eq!(three_m.index(&mm).unwrap(), 3000.0);
    }

    #[test]
    fn complex_valued_quantity_equals_itself_and_adds() {
        use num_complex::Complex64;

        let mut db = db();
        let volt = db.parse_unit_formula("V").unwrap();
        let four_j_volts = WithUnit::from_number(Complex64::new(0.0, 4.0)).multiply(&volt).unwrap();
        assert_eq!(four_j_volts, four_j_volts.clone());

        let three_j_volts = WithUnit::from_number(Complex64::new(0.0, 3.0)).multiply(&volt).unwrap();
        let sum = four_j_volts.add(&three_j_volts).unwrap();
        assert_eq!(sum.value, Value::Complex(Complex64::new(0.0, 7.0)));
    }

    #[test]
    fn complex_valued_quantity_hashes_consistently_with_equality() {
        use num_complex::Complex64;
        use std::collections::hash_map::DefaultHasher;
        use std::hash::Hasher;

        let mut db = db();
        let volt = db.parse_unit_formula("V").unwrap();
        let a = WithUnit::from_number(Complex64::new(0.0, 4.0)).multiply(&volt).unwrap();
        let b = WithUnit::from_number(Complex64::new(0.0, 4.0)).multiply(&volt).unwrap();
        assert_eq!(a, b);

        let hash_of = |q: &WithUnit| {
            let mut hasher = DefaultHasher::new();
            q.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash_of(&a), hash_of(&b));
    }
}
