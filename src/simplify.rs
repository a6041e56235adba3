//! Trig-polynomial simplifier: collapses angle-sum/difference patterns in a
//! [`SumExpr`], e.g. `a*c_q1*c_q3 - a*s_q1*s_q3` into `a*c_q1_q3` (standing
//! for `a*cos(q1+q3)`).
//!
//! Pairs of monomials are scanned in lexicographic `(i, j)` order; the first
//! reducible pair found is collapsed and the scan restarts. Each collapse
//! strictly reduces the monomial count, so the loop always terminates.
//! Ties between the two identities below are broken in favour of the
//! cosine-sum identity, simply because it is checked first.
//!
//! Disabled on purpose: a common-factor extractor that would pull a shared
//! factor out across monomials (e.g. `a*x + a*y -> a*(x+y)`) is not
//! implemented at all, per this system's explicit scope decision.

use crate::sumexpr::{Monomial, Sign, SumExpr};

/// A declaration for a hoisted compound trig atom, e.g.
/// `"double c_q1_q3 = cos(q1+q3);"`.
pub type Declaration = String;

/// Simplifies `expr` to a fixed point, returning the simplified expression
/// and the declarations for every compound atom it introduced, in the order
/// they were first introduced.
#[must_use]
pub fn simplify_sum_expr(mut expr: SumExpr) -> (SumExpr, Vec<Declaration>) {
    let mut declarations = Vec::new();
    let mut passes = 0u32;

    loop {
        let n = expr.monomials.len();
        let mut found = None;
        'scan: for i in 0..n {
            for j in (i + 1)..n {
                if let Some(reduction) = try_reduce_pair(&expr.monomials[i], &expr.monomials[j]) {
                    found = Some((i, j, reduction));
                    break 'scan;
                }
            }
        }

        match found {
            Some((i, j, (merged, declaration))) => {
                expr.monomials.remove(j);
                expr.monomials.remove(i);
                expr.monomials.push(merged);
                if !declarations.contains(&declaration) {
                    declarations.push(declaration);
                }
                passes += 1;
            }
            None => break,
        }
    }

    log::trace!("simplifier reached a fixed point after {passes} reducing pass(es)");
    (expr, declarations)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairKind {
    /// Both factors are cosine atoms.
    CosCos,
    /// Both factors are sine atoms.
    SinSin,
    /// One cosine, one sine.
    Mixed,
}

fn pair_kind(factors: &[String; 2]) -> Option<PairKind> {
    let leading: Vec<Option<char>> = factors.iter().map(|f| f.chars().next()).collect();
    match (leading[0], leading[1]) {
        (Some('c'), Some('c')) => Some(PairKind::CosCos),
        (Some('s'), Some('s')) => Some(PairKind::SinSin),
        (Some('c'), Some('s')) | (Some('s'), Some('c')) => Some(PairKind::Mixed),
        _ => None,
    }
}

/// Strips the single-character trig prefix (`"c_"`/`"s_"`) from an atom,
/// returning the bare joint name.
fn strip_prefix(atom: &str) -> Option<&str> {
    atom.strip_prefix("c_").or_else(|| atom.strip_prefix("s_"))
}

/// Splits `a`'s factors against `b`'s into (shared, `a`-only, `b`-only),
/// treating both factor lists as multisets.
fn common_and_exclusive(a: &[String], b: &[String]) -> (Vec<String>, Vec<String>, Vec<String>) {
    let mut common = Vec::new();
    let mut excl_a = Vec::new();
    let mut remaining_b = b.to_vec();

    for factor in a {
        if let Some(pos) = remaining_b.iter().position(|f| f == factor) {
            remaining_b.remove(pos);
            common.push(factor.clone());
        } else {
            excl_a.push(factor.clone());
        }
    }

    (common, excl_a, remaining_b)
}

fn try_reduce_pair(mi: &Monomial, mj: &Monomial) -> Option<(Monomial, Declaration)> {
    if mi.scalar() != mj.scalar() {
        return None;
    }

    let (common, excl_i, excl_j) = common_and_exclusive(&mi.factors, &mj.factors);
    let excl_i: [String; 2] = excl_i.try_into().ok()?;
    let excl_j: [String; 2] = excl_j.try_into().ok()?;

    let kind_i = pair_kind(&excl_i)?;
    let kind_j = pair_kind(&excl_j)?;

    let names_i = [strip_prefix(&excl_i[0])?, strip_prefix(&excl_i[1])?];
    let names_j = [strip_prefix(&excl_j[0])?, strip_prefix(&excl_j[1])?];
    if !same_unordered_pair(&names_i, &names_j) {
        return None;
    }
    let (a, b) = (names_i[0], names_i[1]);

    let is_cosine_sum = matches!(
        (kind_i, kind_j),
        (PairKind::CosCos, PairKind::SinSin) | (PairKind::SinSin, PairKind::CosCos)
    );
    let is_sine_sum = kind_i == PairKind::Mixed && kind_j == PairKind::Mixed;

    if is_cosine_sum {
        if mi.sign == mj.sign {
            return None;
        }
        let cos_cos_sign = if kind_i == PairKind::CosCos { mi.sign } else { mj.sign };
        let atom = format!("c_{a}_{b}");
        let declaration = format!("double {atom} = cos({a}+{b});");
        let mut factors = common;
        factors.push(atom);
        return Some((
            Monomial {
                sign: cos_cos_sign,
                factors,
            },
            declaration,
        ));
    }

    if is_sine_sum {
        if mi.sign != mj.sign {
            return None;
        }
        let atom = format!("s_{a}_{b}");
        let declaration = format!("double {atom} = sin({a}+{b});");
        let mut factors = common;
        factors.push(atom);
        return Some((
            Monomial {
                sign: mi.sign,
                factors,
            },
            declaration,
        ));
    }

    None
}

fn same_unordered_pair(a: &[&str; 2], b: &[&str; 2]) -> bool {
    (a[0] == b[0] && a[1] == b[1]) || (a[0] == b[1] && a[1] == b[0])
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, reason = "test assertions")]
mod tests {
    use super::*;
    use crate::sumexpr::parse_sum_expr;

    #[test]
    fn collapses_cosine_sum_identity() {
        let expr = parse_sum_expr("a*c_q1*c_q3-a*s_q1*s_q3");
        let (simplified, decls) = simplify_sum_expr(expr);
        assert_eq!(simplified.to_string(), "a*c_q1_q3");
        assert_eq!(decls, vec!["double c_q1_q3 = cos(q1+q3);".to_string()]);
    }

    #[test]
    fn collapses_sine_sum_identity() {
        let expr = parse_sum_expr("b*s_q1*c_q3+b*c_q1*s_q3");
        let (simplified, decls) = simplify_sum_expr(expr);
        assert_eq!(simplified.to_string(), "b*s_q1_q3");
        assert_eq!(decls, vec!["double s_q1_q3 = sin(q1+q3);".to_string()]);
    }

    #[test]
    fn leaves_same_signed_cosine_shape_unreduced() {
        let expr = parse_sum_expr("a*c_q1*c_q2+a*s_q1*s_q3");
        let (simplified, decls) = simplify_sum_expr(expr);
        assert_eq!(simplified.monomials.len(), 2);
        assert!(decls.is_empty());
    }

    #[test]
    fn requires_matching_scalar_text() {
        let expr = parse_sum_expr("a*c_q1*c_q3-b*s_q1*s_q3");
        let (simplified, decls) = simplify_sum_expr(expr);
        assert_eq!(simplified.monomials.len(), 2);
        assert!(decls.is_empty());
    }

    #[test]
    fn reduction_strictly_decreases_monomial_count_and_terminates() {
        // Three pairs that could each collapse: make sure the loop halts and
        // never re-grows the monomial list.
        let expr = parse_sum_expr(
            "a*c_q1*c_q2-a*s_q1*s_q2+b*c_q3*c_q4-b*s_q3*s_q4",
        );
        let (simplified, _decls) = simplify_sum_expr(expr);
        assert_eq!(simplified.monomials.len(), 2);
    }
}
