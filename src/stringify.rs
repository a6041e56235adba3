//! Serializes an expanded [`Expr`] tree into monomial-sum text and back into
//! a [`SumExpr`].
//!
//! Two steps carry real information from the original design: formatting a
//! number so that a very small or very large magnitude uses an explicit-sign
//! scientific notation (`1.5e-3`, `2e+20`), and guarding that notation's
//! embedded `-`/`+` so the monomial-level parser (which splits on a bare
//! `+`/`-`) doesn't misread it as a sign boundary. Two other normalisation
//! steps this crate's original (external, string-based) inspiration needed —
//! collapsing redundant multiplication-operator spacing and deleting
//! leftover array-indexing syntax — have no counterpart here, because this
//! stringifier never introduces that syntax in the first place.

use std::collections::HashSet;

use crate::error::CodegenError;
use crate::expr::Expr;
use crate::sumexpr::{Monomial, Sign, SumExpr};

/// Formats a non-negative `f64` the way a monomial factor token expects:
/// plain decimal within a normal magnitude range, explicit-sign scientific
/// notation outside it.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e10 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by the < 1e10 magnitude check above"
        )]
        return format!("{}", n as i64);
    }

    let abs = n.abs();
    if (1e-4..1e16).contains(&abs) {
        return format!("{n}");
    }

    let raw = format!("{n:e}");
    match raw.split_once('e') {
        Some((mantissa, exponent)) => match exponent.strip_prefix('-') {
            Some(digits) => format!("{mantissa}e-{digits}"),
            None => format!("{mantissa}e+{exponent}"),
        },
        None => raw,
    }
}

/// Replaces the literal substrings `"e+"`/`"e-"` with single-character
/// placeholders so a later char-walk parser cannot confuse them with a
/// monomial sign boundary.
#[must_use]
pub fn apply_exponent_guard(s: &str) -> String {
    s.replace("e+", "P").replace("e-", "N")
}

/// Restores placeholders produced by [`apply_exponent_guard`].
#[must_use]
pub fn restore_exponent_guard(s: &str) -> String {
    s.replace('P', "e+").replace('N', "e-")
}

/// Serializes one matrix entry's already-[`Expr::expand`]ed tree into a
/// `SumExpr`, substituting `sin(qi)`/`cos(qi)` with the atoms `s_qi`/`c_qi`
/// for every actuated joint symbol in `actuated`.
///
/// # Errors
///
/// Returns [`CodegenError::MalformedExpression`] if a `Sin`/`Cos` node's
/// argument is not a bare actuated-joint symbol, or if a bare negation
/// appears inside a product (both would mean `expr` was not actually
/// expanded first).
pub fn entry_to_sum_expr(expr: &Expr, actuated: &HashSet<String>) -> Result<SumExpr, CodegenError> {
    let mut terms = Vec::new();
    collect_terms(expr, false, &mut terms);

    let mut monomials = Vec::with_capacity(terms.len());
    for (negated, term) in terms {
        let mut factors = Vec::new();
        collect_factors(&term, actuated, &mut factors)?;
        monomials.push(Monomial {
            sign: if negated { Sign::Neg } else { Sign::Pos },
            factors,
        });
    }
    Ok(SumExpr { monomials })
}

/// Renders a `SumExpr` back to guarded text, ready for [`restore_exponent_guard`].
#[must_use]
pub fn render_guarded(expr: &SumExpr) -> String {
    apply_exponent_guard(&expr.to_string())
}

fn collect_terms(expr: &Expr, negated: bool, out: &mut Vec<(bool, Expr)>) {
    match expr {
        Expr::Add(a, b) => {
            collect_terms(a, negated, out);
            collect_terms(b, negated, out);
        }
        Expr::Neg(inner) => collect_terms(inner, !negated, out),
        other => out.push((negated, other.clone())),
    }
}

fn collect_factors(
    expr: &Expr,
    actuated: &HashSet<String>,
    factors: &mut Vec<String>,
) -> Result<(), CodegenError> {
    match expr {
        Expr::Mul(a, b) => {
            collect_factors(a, actuated, factors)?;
            collect_factors(b, actuated, factors)?;
            Ok(())
        }
        Expr::Const(n) => {
            factors.push(apply_exponent_guard(&format_number(*n)));
            Ok(())
        }
        Expr::Sym(s) => {
            factors.push(s.clone());
            Ok(())
        }
        Expr::Sin(inner) => trig_atom('s', inner, actuated, factors),
        Expr::Cos(inner) => trig_atom('c', inner, actuated, factors),
        Expr::Neg(_) | Expr::Add(_, _) => Err(CodegenError::MalformedExpression {
            reason: "expected an expanded sum-of-products term".to_string(),
        }),
    }
}

fn trig_atom(
    prefix: char,
    inner: &Expr,
    actuated: &HashSet<String>,
    factors: &mut Vec<String>,
) -> Result<(), CodegenError> {
    if let Expr::Sym(name) = inner {
        if actuated.contains(name) {
            factors.push(format!("{prefix}_{name}"));
            return Ok(());
        }
    }
    Err(CodegenError::MalformedExpression {
        reason: format!("{prefix}in/cos of a non-joint argument"),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, reason = "test assertions")]
mod tests {
    use super::*;

    #[test]
    fn format_number_keeps_small_integers_plain() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn format_number_uses_explicit_sign_scientific_notation_outside_normal_range() {
        let big = format_number(2e20);
        assert!(big.contains("e+"), "{big}");
        let small = format_number(1.5e-10);
        assert!(small.contains("e-"), "{small}");
    }

    #[test]
    fn exponent_guard_round_trips() {
        let text = "1.5e-3*a+2e+20*b";
        let guarded = apply_exponent_guard(text);
        assert!(!guarded.contains("e-") && !guarded.contains("e+"));
        assert_eq!(restore_exponent_guard(&guarded), text);
    }

    #[test]
    fn entry_to_sum_expr_substitutes_trig_atoms() {
        let mut actuated = HashSet::new();
        actuated.insert("q1".to_string());
        actuated.insert("q3".to_string());

        let a = Expr::sym("a");
        let term1 = a.clone().mul(Expr::sym("q1").cos()).mul(Expr::sym("q3").cos());
        let term2 = Expr::Neg(Box::new(
            a.mul(Expr::sym("q1").sin()).mul(Expr::sym("q3").sin()),
        ));
        let expr = term1.add(term2).expand();

        let sum = entry_to_sum_expr(&expr, &actuated).unwrap();
        assert_eq!(sum.monomials.len(), 2);
        assert_eq!(sum.monomials[0].sign, Sign::Pos);
        assert_eq!(sum.monomials[0].factors, vec!["a", "c_q1", "c_q3"]);
        assert_eq!(sum.monomials[1].sign, Sign::Neg);
        assert_eq!(sum.monomials[1].factors, vec!["a", "s_q1", "s_q3"]);
    }

    #[test]
    fn entry_to_sum_expr_rejects_sin_of_non_joint_argument() {
        let actuated = HashSet::new();
        let expr = Expr::sym("phantom").sin().expand();
        assert!(entry_to_sum_expr(&expr, &actuated).is_err());
    }
}
