//! Exact-plus-floating scale factor: `factor * (numer/denom) * 10^exp10`.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::{BigRational, Ratio};
use num_traits::{One, Signed, ToPrimitive, Zero};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// `value() == factor * numer/denom * 10^exp10`.
///
/// `ratio` and `exp10` preserve exact conversion chains (`1 km = 1000 m`
/// exactly); `factor` absorbs irrational conversions (inch <-> meter is
/// rational here, but e.g. `cyc = 2*PI*rad` is not). A scale is
/// *rational-only* when `factor == 1.0`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scale {
    pub factor: f64,
    pub ratio: BigRational,
    pub exp10: BigInt,
}

impl Scale {
    pub fn one() -> Self {
        Scale {
            factor: 1.0,
            ratio: BigRational::one(),
            exp10: BigInt::zero(),
        }
    }

    pub fn from_factor(factor: f64) -> Self {
        Scale {
            factor,
            ratio: BigRational::one(),
            exp10: BigInt::zero(),
        }
    }

    pub fn from_ratio(numer: i64, denom: i64) -> Self {
        Scale {
            factor: 1.0,
            ratio: BigRational::new(BigInt::from(numer), BigInt::from(denom)),
            exp10: BigInt::zero(),
        }
    }

    pub fn from_exp10(exp10: i64) -> Self {
        Scale {
            factor: 1.0,
            ratio: BigRational::one(),
            exp10: BigInt::from(exp10),
        }
    }

    pub fn is_rational_only(&self) -> bool {
        self.factor == 1.0
    }

    pub fn multiply(&self, other: &Scale) -> Scale {
        Scale {
            factor: self.factor * other.factor,
            ratio: &self.ratio * &other.ratio,
            exp10: &self.exp10 + &other.exp10,
        }
    }

    pub fn inverse(&self) -> Scale {
        Scale {
            factor: 1.0 / self.factor,
            ratio: self.ratio.recip(),
            exp10: -&self.exp10,
        }
    }

    /// `s ** r` for rational `r = p/q`. Exact when `s.factor == 1.0` and the
    /// ratio's numerator/denominator have exact integer q-th roots and
    /// `exp10 * r` is an integer; otherwise falls back to a float scale
    /// (`value()^r`, ratio `1/1`, `exp10` `0`).
    pub fn pow(&self, r: Ratio<i64>) -> Scale {
        match self.try_pow_exact(r) {
            Some(exact) => exact,
            None => Scale::from_factor(self.value().powf(ratio_to_f64(r))),
        }
    }

    fn try_pow_exact(&self, r: Ratio<i64>) -> Option<Scale> {
        if !self.is_rational_only() {
            return None;
        }
        if self.ratio.numer().is_negative() {
            // negative scale factors don't occur for real physical units; punt
            // to the float fallback rather than reasoning about complex roots.
            return None;
        }
        let p = *r.numer();
        let q = r.denom().unsigned_abs() as u32;

        let exp10_scaled = &self.exp10 * BigInt::from(p);
        let denom_big = BigInt::from(*r.denom());
        let (exp10_q, exp10_rem) = exp10_scaled.div_mod_floor(&denom_big);
        if !exp10_rem.is_zero() {
            return None;
        }

        let root_numer = integer_nth_root(self.ratio.numer(), q)?;
        let root_denom = integer_nth_root(self.ratio.denom(), q)?;
        let rooted = BigRational::new(root_numer, root_denom);

        let powered = ratio_pow_i(&rooted, p.unsigned_abs() as u32);
        let new_ratio = if p < 0 { powered.recip() } else { powered };

        Some(Scale {
            factor: 1.0,
            ratio: new_ratio,
            exp10: exp10_q,
        })
    }

    /// `factor * numer/denom * 10^exp10` as an `f64`.
    pub fn value(&self) -> f64 {
        let ratio_f = self.ratio.numer().to_f64().unwrap_or(f64::NAN)
            / self.ratio.denom().to_f64().unwrap_or(1.0);
        let exp10_f = self.exp10.to_f64().unwrap_or(0.0);
        self.factor * ratio_f * 10f64.powf(exp10_f)
    }

    /// Exact rational ratio `self/other` when both are rational-only;
    /// otherwise a float.
    pub fn ratio_to(&self, other: &Scale) -> ScaleRatio {
        if self.is_rational_only() && other.is_rational_only() {
            let combined_exp10 = &self.exp10 - &other.exp10;
            if let Some(exp10_i) = combined_exp10.to_i64() {
                return ScaleRatio::Exact {
                    ratio: &self.ratio / &other.ratio,
                    exp10: exp10_i,
                };
            }
        }
        ScaleRatio::Float(self.value() / other.value())
    }
}

/// Result of comparing two rational-only scales exactly, or falling back to
/// a float when either scale has a non-unit `factor`.
#[derive(Clone, Debug)]
pub enum ScaleRatio {
    Exact { ratio: BigRational, exp10: i64 },
    Float(f64),
}

impl ScaleRatio {
    pub fn to_f64(&self) -> f64 {
        match self {
            ScaleRatio::Exact { ratio, exp10 } => {
                ratio.numer().to_f64().unwrap_or(f64::NAN) / ratio.denom().to_f64().unwrap_or(1.0)
                    * 10f64.powi(*exp10 as i32)
            }
            ScaleRatio::Float(f) => *f,
        }
    }
}

fn ratio_to_f64(r: Ratio<i64>) -> f64 {
    *r.numer() as f64 / *r.denom() as f64
}

fn ratio_pow_i(r: &BigRational, exp: u32) -> BigRational {
    let mut result = BigRational::one();
    for _ in 0..exp {
        result = &result * r;
    }
    result
}

/// Exact integer `q`-th root of a non-negative `BigInt`, or `None` if `n` is
/// not a perfect `q`-th power.
fn integer_nth_root(n: &BigInt, q: u32) -> Option<BigInt> {
    if q == 0 {
        return None;
    }
    if n.is_zero() {
        return Some(BigInt::zero());
    }
    if q == 1 {
        return Some(n.clone());
    }
    let mut low = BigInt::zero();
    let mut high = n.clone();
    while &low <= &high {
        let mid = (&low + &high) / BigInt::from(2);
        let powered = mid.pow(q);
        if &powered == n {
            return Some(mid);
        } else if &powered < n {
            low = &mid + BigInt::from(1);
        } else {
            high = &mid - BigInt::from(1);
        }
    }
    None
}
