//! The numeric payload carried by a `WithUnit`: a real scalar, a complex
//! scalar, or an n-dimensional array of either. This is the minimal carrier
//! the data model needs (`spec.md` explicitly keeps general-purpose numeric
//! array *wrappers* out of scope); arithmetic here is elementwise only.

use crate::error::{Result, UnitsError};
use num_complex::Complex64;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A flat, row-major n-dimensional array of `T`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NArray<T> {
    pub shape: Vec<usize>,
    pub data: Vec<T>,
}

impl<T: Clone> NArray<T> {
    pub fn new(shape: Vec<usize>, data: Vec<T>) -> Self {
        NArray { shape, data }
    }

    fn zip_with<F>(&self, other: &NArray<T>, f: F) -> Option<NArray<T>>
    where
        F: Fn(&T, &T) -> T,
    {
        if self.shape != other.shape {
            return None;
        }
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| f(a, b))
            .collect();
        Some(NArray::new(self.shape.clone(), data))
    }

    fn map<U: Clone, F: Fn(&T) -> U>(&self, f: F) -> NArray<U> {
        NArray::new(self.shape.clone(), self.data.iter().map(f).collect())
    }
}

/// The numeric payload of a `WithUnit`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    Real(f64),
    Complex(Complex64),
    RealArray(NArray<f64>),
    ComplexArray(NArray<Complex64>),
}

impl Value {
    pub fn as_f64(&self) -> Result<f64> {
        match self {
            Value::Real(x) => Ok(*x),
            other => Err(UnitsError::TypeError(format!(
                "expected a real scalar, found {other:?}"
            ))),
        }
    }

    fn to_complex(&self) -> Option<Complex64> {
        match self {
            Value::Real(x) => Some(Complex64::new(*x, 0.0)),
            Value::Complex(c) => Some(*c),
            _ => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Value::Real(x) => *x == 0.0,
            Value::Complex(c) => c.re == 0.0 && c.im == 0.0,
            Value::RealArray(a) => a.data.iter().all(|x| *x == 0.0),
            Value::ComplexArray(a) => a.data.iter().all(|c| c.re == 0.0 && c.im == 0.0),
        }
    }

    pub fn add(&self, other: &Value) -> Result<Value> {
        binop(self, other, "addition", |a, b| a + b, |a, b| a + b)
    }

    pub fn sub(&self, other: &Value) -> Result<Value> {
        binop(self, other, "subtraction", |a, b| a - b, |a, b| a - b)
    }

    pub fn mul(&self, other: &Value) -> Result<Value> {
        binop(self, other, "multiplication", |a, b| a * b, |a, b| a * b)
    }

    pub fn div(&self, other: &Value) -> Result<Value> {
        binop(self, other, "division", |a, b| a / b, |a, b| a / b)
    }

    /// Elementwise `%`. Only defined for real scalars and real arrays —
    /// modulo has no standard meaning for complex payloads.
    pub fn modulo(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::Real(a), Value::Real(b)) => Ok(Value::Real(a % b)),
            (Value::RealArray(a), Value::RealArray(b)) => a
                .zip_with(b, |p, q| p % q)
                .map(Value::RealArray)
                .ok_or_else(|| shape_mismatch("modulo")),
            _ => Err(UnitsError::TypeError(
                "modulo is only defined for real scalars and real arrays".into(),
            )),
        }
    }

    pub fn neg(&self) -> Value {
        match self {
            Value::Real(x) => Value::Real(-*x),
            Value::Complex(c) => Value::Complex(-*c),
            Value::RealArray(a) => Value::RealArray(a.map(|x| -*x)),
            Value::ComplexArray(a) => Value::ComplexArray(a.map(|c| -*c)),
        }
    }

    /// Raise a real payload to a real power; complex/array payloads raised
    /// only when every element supports it.
    pub fn powf(&self, r: f64) -> Result<Value> {
        match self {
            Value::Real(x) => Ok(Value::Real(x.powf(r))),
            Value::Complex(c) => Ok(Value::Complex(c.powf(r))),
            Value::RealArray(a) => Ok(Value::RealArray(a.map(|x| x.powf(r)))),
            Value::ComplexArray(a) => Ok(Value::ComplexArray(a.map(|c| c.powf(r)))),
        }
    }

    pub fn scale_by(&self, k: f64) -> Value {
        match self {
            Value::Real(x) => Value::Real(x * k),
            Value::Complex(c) => Value::Complex(*c * k),
            Value::RealArray(a) => Value::RealArray(a.map(|x| x * k)),
            Value::ComplexArray(a) => Value::ComplexArray(a.map(|c| *c * k)),
        }
    }

    /// Floating-point magnitude used for ordering/equality of real payloads.
    pub fn as_ordering_f64(&self) -> Result<f64> {
        self.as_f64()
    }

    pub fn canonical_hash_bits(&self) -> Vec<u64> {
        match self {
            Value::Real(x) => vec![normalize_zero(*x).to_bits()],
            Value::Complex(c) => vec![normalize_zero(c.re).to_bits(), normalize_zero(c.im).to_bits()],
            Value::RealArray(a) => a.data.iter().map(|x| normalize_zero(*x).to_bits()).collect(),
            Value::ComplexArray(a) => a
                .data
                .iter()
                .flat_map(|c| vec![normalize_zero(c.re).to_bits(), normalize_zero(c.im).to_bits()])
                .collect(),
        }
    }
}

fn normalize_zero(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x
    }
}

fn binop(
    a: &Value,
    b: &Value,
    op: &'static str,
    real_op: impl Fn(f64, f64) -> f64,
    complex_op: impl Fn(Complex64, Complex64) -> Complex64,
) -> Result<Value> {
    use Value::*;
    match (a, b) {
        (Real(x), Real(y)) => Ok(Real(real_op(*x, *y))),
        (RealArray(x), RealArray(y)) => x
            .zip_with(y, |p, q| real_op(*p, *q))
            .map(RealArray)
            .ok_or_else(|| shape_mismatch(op)),
        (ComplexArray(x), ComplexArray(y)) => x
            .zip_with(y, |p, q| complex_op(*p, *q))
            .map(ComplexArray)
            .ok_or_else(|| shape_mismatch(op)),
        // scalar-array broadcast, e.g. `k * array_quantity`
        (Real(k), RealArray(arr)) => Ok(RealArray(arr.map(|x| real_op(*k, *x)))),
        (RealArray(arr), Real(k)) => Ok(RealArray(arr.map(|x| real_op(*x, *k)))),
        (Complex(k), ComplexArray(arr)) => Ok(ComplexArray(arr.map(|c| complex_op(*k, *c)))),
        (ComplexArray(arr), Complex(k)) => Ok(ComplexArray(arr.map(|c| complex_op(*c, *k)))),
        _ => {
            let (cx, cy) = (
                a.to_complex().ok_or_else(|| mixed_kind_error(op))?,
                b.to_complex().ok_or_else(|| mixed_kind_error(op))?,
            );
            Ok(Complex(complex_op(cx, cy)))
        }
    }
}

fn shape_mismatch(op: &'static str) -> UnitsError {
    UnitsError::TypeError(format!("array shape mismatch during {op}"))
}

fn mixed_kind_error(op: &'static str) -> UnitsError {
    UnitsError::TypeError(format!("unsupported numeric payload combination during {op}"))
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Real(x)
    }
}

impl From<Complex64> for Value {
    fn from(c: Complex64) -> Self {
        Value::Complex(c)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Real(x) => write!(f, "{x:?}"),
            Value::Complex(c) => write!(f, "({}+{}i)", c.re, c.im),
            Value::RealArray(a) => write!(f, "{:?}", a.data),
            Value::ComplexArray(a) => write!(f, "{:?}", a.data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_arithmetic() {
        let a = Value::Real(3.0);
        let b = Value::Real(4.0);
        assert_eq!(a.add(&b).unwrap(), Value::Real(7.0));
        assert_eq!(a.mul(&b).unwrap(), Value::Real(12.0));
    }

    #[test]
    fn real_times_complex_promotes() {
        let a = Value::Real(2.0);
        let b = Value::Complex(Complex64::new(0.0, 1.0));
        let result = a.mul(&b).unwrap();
        assert_eq!(result, Value::Complex(Complex64::new(0.0, 2.0)));
    }

    #[test]
    fn array_elementwise_add_preserves_shape() {
        let a = Value::RealArray(NArray::new(vec![2], vec![1.0, 2.0]));
        let b = Value::RealArray(NArray::new(vec![2], vec![10.0, 20.0]));
        let sum = a.add(&b).unwrap();
        match sum {
            Value::RealArray(arr) => assert_eq!(arr.data, vec![11.0, 22.0]),
            _ => panic!("expected real array"),
        }
    }

    #[test]
    fn powf_is_exact_for_perfect_squares() {
        let a = Value::Real(16.0);
        assert_eq!(a.powf(0.5).unwrap(), Value::Real(4.0));
    }
}
