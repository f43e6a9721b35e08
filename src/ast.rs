//! Formula grammar AST:
//!
//! ```text
//! formula    := term ( ('*' | '/') term )*
//! term       := unit_name [ '^' exponent ]
//! exponent   := [ '-' ] ( integer | '(' integer '/' integer ')' | integer '/' integer )
//! unit_name  := identifier starting with a letter, subsequent letters, digits, or underscore
//! ```

use num_rational::Ratio;
use smallvec::SmallVec;

/// One `unit_name [ '^' exponent ]` factor.
#[derive(Clone, Debug, PartialEq)]
pub struct Term {
    pub name: String,
    pub exponent: Ratio<i64>,
}

/// One operator joining a term to the running product: `*` or `/`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Mul,
    Div,
}

/// Most formulas in practice (`kg*m/s^2`, `N*m`, ...) have only a handful of
/// factors after the first; inline storage avoids a heap allocation for them.
pub type FactorList = SmallVec<[(Op, Term); 4]>;

/// `term (('*'|'/') term)*`, evaluated left to right.
#[derive(Clone, Debug, PartialEq)]
pub struct Formula {
    pub first: Term,
    pub rest: FactorList,
}
