//! `nom`-combinator implementation of the formula grammar in `ast.rs`.
//!
//! The grammar itself never fails on a zero exponent denominator — `nom`
//! parsers only report syntax errors, and `num_rational::Ratio::new` panics
//! on a zero denominator. So parsing stays in terms of raw `(numer, denom)`
//! pairs until `parse_formula`, which is where the zero-denominator check
//! happens and `UnitsError::ZeroDivision` is actually raised.

use crate::ast::{FactorList, Formula, Op, Term};
use crate::error::{Result, UnitsError};
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while};
use nom::character::complete::{alpha1, char, digit1, multispace0};
use nom::combinator::{map_res, opt};
use nom::sequence::preceded;
use nom::{Finish, IResult};
use num_rational::Ratio;

fn unit_name(input: &str) -> IResult<&str, String> {
    let (input, head) = alpha1(input)?;
    let (input, tail) = take_while(|c: char| c.is_alphanumeric() || c == '_')(input)?;
    Ok((input, format!("{head}{tail}")))
}

fn integer(input: &str) -> IResult<&str, i64> {
    map_res(digit1, |s: &str| s.parse::<i64>())(input)
}

/// `['-'] (integer | '(' integer '/' integer ')' | integer '/' integer)`,
/// sign folded into `numer`. `denom` is not checked for zero here.
fn raw_exponent(input: &str) -> IResult<&str, (i64, i64)> {
    let (input, neg) = opt(char('-'))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, (numer, denom)) = alt((parenthesized_fraction, bare_fraction_or_integer))(input)?;
    let sign: i64 = if neg.is_some() { -1 } else { 1 };
    Ok((input, (sign * numer, denom)))
}

fn parenthesized_fraction(input: &str) -> IResult<&str, (i64, i64)> {
    let (input, _) = char('(')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, numer) = integer(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char('/')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, denom) = integer(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char(')')(input)?;
    Ok((input, (numer, denom)))
}

fn bare_fraction_or_integer(input: &str) -> IResult<&str, (i64, i64)> {
    let (input, numer) = integer(input)?;
    let (input, denom) = opt(preceded(
        preceded(multispace0, char('/')),
        preceded(multispace0, integer),
    ))(input)?;
    Ok((input, (numer, denom.unwrap_or(1))))
}

/// A parsed `unit_name [ '^' exponent ]` factor with an unvalidated
/// exponent denominator.
struct RawTerm {
    name: String,
    numer: i64,
    denom: i64,
}

fn raw_term(input: &str) -> IResult<&str, RawTerm> {
    let (input, _) = multispace0(input)?;
    let (input, name) = unit_name(input)?;
    let (input, _) = multispace0(input)?;
    let (input, exp) = opt(preceded(preceded(char('^'), multispace0), raw_exponent))(input)?;
    let (numer, denom) = exp.unwrap_or((1, 1));
    Ok((input, RawTerm { name, numer, denom }))
}

fn op(input: &str) -> IResult<&str, Op> {
    alt((
        nom::combinator::value(Op::Mul, tag("*")),
        nom::combinator::value(Op::Div, tag("/")),
    ))(input)
}

struct RawFormula {
    first: RawTerm,
    rest: Vec<(Op, RawTerm)>,
}

/// Builds `rest` with a manual loop rather than `nom::multi::many0` so the
/// factor list can be pushed straight into a `SmallVec` at the `Formula`
/// boundary without an intermediate `Vec` — most formulas only have a
/// handful of factors after the first, so this avoids a heap allocation for
/// the common case.
fn raw_formula(input: &str) -> IResult<&str, RawFormula> {
    let (input, _) = multispace0(input)?;
    let (mut input, first) = raw_term(input)?;
    let mut rest = Vec::new();
    loop {
        let (after_space, _) = multispace0(input)?;
        match op(after_space) {
            Ok((after_op, o)) => {
                let (after_term, t) = raw_term(after_op)?;
                rest.push((o, t));
                input = after_term;
            }
            Err(_) => {
                input = after_space;
                break;
            }
        }
    }
    let (input, _) = multispace0(input)?;
    Ok((input, RawFormula { first, rest }))
}

fn to_term(raw: RawTerm, original_input: &str) -> Result<Term> {
    if raw.denom == 0 {
        return Err(UnitsError::ZeroDivision(original_input.to_string()));
    }
    Ok(Term {
        name: raw.name,
        exponent: Ratio::new(raw.numer, raw.denom),
    })
}

/// Parse a non-empty unit formula string into its AST. Callers must handle
/// the empty/all-whitespace string specially (it denotes a dimensionless
/// quantity and never reaches the grammar).
pub fn parse_formula(input: &str) -> Result<Formula> {
    match raw_formula(input).finish() {
        Ok((remaining, parsed)) if remaining.trim().is_empty() => {
            let first = to_term(parsed.first, input)?;
            let mut rest: FactorList = FactorList::new();
            for (o, t) in parsed.rest {
                rest.push((o, to_term(t, input)?));
            }
            Ok(Formula { first, rest })
        }
        Ok((remaining, _)) => Err(UnitsError::ParseError {
            formula: input.to_string(),
            reason: format!("unexpected trailing input '{remaining}'"),
        }),
        Err(e) => Err(UnitsError::ParseError {
            formula: input.to_string(),
            reason: e.to_string(),
        }),
    }
}
