//! Canonical multiset of (base-unit-name, rational-exponent) pairs.

use num_rational::Ratio;
use num_traits::Zero;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

type Exp = Ratio<i64>;

/// A product of named base units raised to rational powers, e.g. `kg^1 * m^1 * s^-2`.
///
/// Canonical form: entries with exponent zero are removed, entries are sorted
/// by name, and each exponent is stored in lowest terms (guaranteed by
/// `num_rational::Ratio`). Two `UnitArray`s are equal iff their canonical
/// entry lists are equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnitArray {
    entries: Vec<(String, Exp)>,
}

impl UnitArray {
    /// The empty (dimensionless) unit array.
    pub fn dimensionless() -> Self {
        UnitArray { entries: Vec::new() }
    }

    /// `{name: 1}`.
    pub fn singleton(name: impl Into<String>) -> Self {
        UnitArray {
            entries: vec![(name.into(), Exp::from_integer(1))],
        }
    }

    pub fn is_dimensionless(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the canonical `(name, exponent)` pairs.
    pub fn entries(&self) -> &[(String, Exp)] {
        &self.entries
    }

    fn from_pairs(mut pairs: Vec<(String, Exp)>) -> Self {
        pairs.retain(|(_, exp)| !exp.is_zero());
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        UnitArray { entries: pairs }
    }

    /// Sum exponents per name, dropping zero entries.
    pub fn multiply(&self, other: &UnitArray) -> UnitArray {
        let mut merged: Vec<(String, Exp)> = self.entries.clone();
        for (name, exp) in &other.entries {
            match merged.iter().position(|(n, _)| n == name) {
                Some(idx) => merged[idx].1 += *exp,
                None => merged.push((name.clone(), *exp)),
            }
        }
        UnitArray::from_pairs(merged)
    }

    /// Negate every exponent.
    pub fn inverse(&self) -> UnitArray {
        self.pow(Exp::from_integer(-1))
    }

    /// Scale every exponent by `r`, dropping zeros. `r == 0` yields the empty
    /// (dimensionless) array.
    pub fn pow(&self, r: Exp) -> UnitArray {
        let pairs = self
            .entries
            .iter()
            .map(|(name, exp)| (name.clone(), exp * r))
            .collect();
        UnitArray::from_pairs(pairs)
    }

    /// Canonical display string: positive-exponent factors first joined by
    /// `*`, negative factors after `/`, exponents shown as plain integers or
    /// `^(n/d)` when non-integer. Empty array formats as the empty string.
    pub fn format(&self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        let mut positive = Vec::new();
        let mut negative = Vec::new();
        for (name, exp) in &self.entries {
            if *exp.numer() >= 0 {
                positive.push(format_factor(name, *exp));
            } else {
                negative.push(format_factor(name, -*exp));
            }
        }
        let mut out = if positive.is_empty() {
            "1".to_string()
        } else {
            positive.join("*")
        };
        if !negative.is_empty() {
            out.push('/');
            out.push_str(&negative.join("/"));
        }
        out
    }
}

fn format_factor(name: &str, exp: Exp) -> String {
    if exp.is_integer() {
        let n = exp.to_integer();
        if n == 1 {
            name.to_string()
        } else {
            format!("{name}^{n}")
        }
    } else {
        format!("{name}^({}/{})", exp.numer(), exp.denom())
    }
}

impl fmt::Display for UnitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singleton_and_multiply() {
        let m = UnitArray::singleton("m");
        let s = UnitArray::singleton("s");
        let combined = m.multiply(&s.inverse()).multiply(&s.inverse());
        assert_eq!(combined.format(), "m/s^2");
    }

    #[test]
    fn zero_exponent_drops_entry() {
        let m = UnitArray::singleton("m");
        let combined = m.multiply(&m.inverse());
        assert!(combined.is_dimensionless());
        assert_eq!(combined.format(), "");
    }

    #[test]
    fn pow_zero_is_dimensionless() {
        let m = UnitArray::singleton("m");
        assert!(m.pow(Exp::from_integer(0)).is_dimensionless());
    }

    #[test]
    fn fractional_exponent_formats_with_parens() {
        let m = UnitArray::singleton("m");
        let half = m.pow(Exp::new(1, 2));
        assert_eq!(half.format(), "m^(1/2)");
    }

    #[test]
    fn equality_is_order_independent() {
        let a = UnitArray::singleton("kg").multiply(&UnitArray::singleton("m"));
        let b = UnitArray::singleton("m").multiply(&UnitArray::singleton("kg"));
        assert_eq!(a, b);
    }
}
