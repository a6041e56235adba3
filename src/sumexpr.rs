//! The additive-monomial intermediate representation: a sum of signed
//! products of opaque factor tokens.
//!
//! Shaped the same way as a linear combination of matrix products (compare
//! `AMatrix`/`ATerm` in a skinning-matrix compositor): a `SumExpr` is a list
//! of `Monomial`s, each a sign plus a list of factor tokens.

use std::fmt;

/// The sign of a monomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// `+`
    Pos,
    /// `-`
    Neg,
}

impl Sign {
    /// Flips the sign.
    #[must_use]
    pub fn flip(self) -> Sign {
        match self {
            Sign::Pos => Sign::Neg,
            Sign::Neg => Sign::Pos,
        }
    }
}

/// A signed product of factor tokens, e.g. `+a*c_q1*c_q3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monomial {
    /// The monomial's sign.
    pub sign: Sign,
    /// The factor tokens, in the order they were produced.
    pub factors: Vec<String>,
}

impl Monomial {
    /// The first factor beginning with a digit or `.`, if any: the
    /// monomial's scalar literal.
    #[must_use]
    pub fn scalar(&self) -> Option<&str> {
        self.factors
            .iter()
            .find(|f| f.chars().next().is_some_and(|c| c.is_ascii_digit() || c == '.'))
            .map(String::as_str)
    }
}

/// A sum of monomials.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SumExpr {
    /// The monomials, in declaration order.
    pub monomials: Vec<Monomial>,
}

impl fmt::Display for SumExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.monomials.iter().enumerate() {
            match (i, m.sign) {
                (0, Sign::Pos) => {}
                (_, Sign::Pos) => write!(f, "+")?,
                (_, Sign::Neg) => write!(f, "-")?,
            }
            write!(f, "{}", m.factors.join("*"))?;
        }
        Ok(())
    }
}

/// Parses a monomial-sum string (e.g. `"a*c_q1*c_q3-a*s_q1*s_q3"`) into a
/// `SumExpr`.
///
/// Walks the input once: a pending factor token accumulates characters until
/// it hits `+`, `-`, or `*`; `+`/`-` also closes out the current monomial and
/// starts a new one with the matching sign. Callers whose text may contain a
/// scientific-notation exponent (`1.5e-3`) must apply the exponent guard in
/// `stringify` first, or the embedded `-` will be misread as a monomial
/// boundary.
#[must_use]
pub fn parse_sum_expr(input: &str) -> SumExpr {
    let mut monomials = Vec::new();
    let mut factors = Vec::new();
    let mut token = String::new();
    let mut sign = Sign::Pos;

    for ch in input.chars() {
        match ch {
            '+' | '-' => {
                flush_factor(&mut token, &mut factors);
                flush_monomial(sign, &mut factors, &mut monomials);
                sign = if ch == '+' { Sign::Pos } else { Sign::Neg };
            }
            '*' => flush_factor(&mut token, &mut factors),
            other => token.push(other),
        }
    }
    flush_factor(&mut token, &mut factors);
    flush_monomial(sign, &mut factors, &mut monomials);

    SumExpr { monomials }
}

fn flush_factor(token: &mut String, factors: &mut Vec<String>) {
    if !token.is_empty() {
        factors.push(std::mem::take(token));
    }
}

fn flush_monomial(sign: Sign, factors: &mut Vec<String>, monomials: &mut Vec<Monomial>) {
    if !factors.is_empty() {
        monomials.push(Monomial {
            sign,
            factors: std::mem::take(factors),
        });
    }
}
