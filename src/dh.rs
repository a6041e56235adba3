//! Denavit-Hartenberg link representation.
//!
//! Follows the standard (non-modified) DH convention: a link transform is
//! built from four parameters `(theta, d, a, alpha)`, exactly one of which
//! is the link's free joint variable.

use crate::error::CodegenError;
use crate::expr::Expr;

/// What kind of joint a link represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointKind {
    /// `theta` is the free variable; `d`, `a`, `alpha` are fixed.
    Revolute,
    /// `d` is the free variable; `theta`, `a`, `alpha` are fixed.
    Prismatic,
    /// No free variable; all four parameters are fixed.
    Static,
}

/// The four Denavit-Hartenberg parameters of a single link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DhParams {
    /// Joint angle, in radians.
    pub theta: f64,
    /// Link offset along the previous joint's z axis.
    pub d: f64,
    /// Link length along the common normal.
    pub a: f64,
    /// Link twist, in radians.
    pub alpha: f64,
}

/// A single link's symbolic homogeneous transform.
///
/// Built once from numeric `DhParams` plus a `JointKind`; the free parameter
/// (if any) is left as the symbol `q{id}`, every fixed parameter is folded in
/// as a numeric literal.
#[derive(Debug, Clone)]
pub struct LinkTransform {
    id: u32,
    kind: JointKind,
    matrix: [[Expr; 4]; 4],
}

impl LinkTransform {
    /// Builds the link's symbolic transform.
    ///
    /// `id` names the joint variable (`q{id}`) when `kind` is actuated; it is
    /// otherwise unused beyond identifying the link.
    #[must_use]
    pub fn new(params: DhParams, kind: JointKind, id: u32) -> Self {
        let joint_symbol = Expr::sym(format!("q{id}"));
        let (sin_t, cos_t, d) = match kind {
            JointKind::Revolute => (joint_symbol.clone().sin(), joint_symbol.cos(), Expr::num(params.d)),
            JointKind::Prismatic => (
                Expr::num(params.theta.sin()),
                Expr::num(params.theta.cos()),
                joint_symbol,
            ),
            JointKind::Static => (
                Expr::num(params.theta.sin()),
                Expr::num(params.theta.cos()),
                Expr::num(params.d),
            ),
        };
        let a = Expr::num(params.a);
        let sin_a = Expr::num(params.alpha.sin());
        let cos_a = Expr::num(params.alpha.cos());
        let matrix = dh_matrix(sin_t, cos_t, d, a, sin_a, cos_a);
        log::debug!("link {id} built: kind={kind:?}, a={}, alpha={}", params.a, params.alpha);
        Self { id, kind, matrix }
    }

    /// This link's id.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// This link's joint kind.
    #[must_use]
    pub fn kind(&self) -> JointKind {
        self.kind
    }

    /// Whether this link has a free joint variable.
    #[must_use]
    pub fn is_actuated(&self) -> bool {
        !matches!(self.kind, JointKind::Static)
    }

    /// The link's symbolic homogeneous transform.
    #[must_use]
    pub fn matrix(&self) -> &[[Expr; 4]; 4] {
        &self.matrix
    }

    /// This link's joint variable name, e.g. `"q3"`.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::NotActuated`] if this link has no free
    /// variable.
    pub fn joint_symbol(&self) -> Result<String, CodegenError> {
        if self.is_actuated() {
            Ok(format!("q{}", self.id))
        } else {
            Err(CodegenError::NotActuated { link_id: self.id })
        }
    }

    /// Evaluates this link's transform at a numeric joint value.
    ///
    /// `joint_value` is ignored for `Static` links.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::UnresolvedSymbol`] if, after substitution, any
    /// symbol remains free.
    pub fn evaluate(&self, joint_value: f64) -> Result<[[f64; 4]; 4], CodegenError> {
        let symbol = format!("q{}", self.id);
        let mut out = [[0.0f64; 4]; 4];
        for (row, row_exprs) in self.matrix.iter().enumerate() {
            for (col, entry) in row_exprs.iter().enumerate() {
                let substituted = if self.is_actuated() {
                    entry.substitute(&symbol, &Expr::num(joint_value))
                } else {
                    entry.clone()
                };
                out[row][col] = substituted.eval()?;
            }
        }
        Ok(out)
    }
}

/// Builds the standard DH homogeneous transform:
///
/// ```text
/// [ cosθ        -sinθ·cosα   sinθ·sinα    a·cosθ ]
/// [ sinθ         cosθ·cosα  -cosθ·sinα    a·sinθ ]
/// [   0          sinα        cosα           d    ]
/// [   0           0           0             1    ]
/// ```
///
/// Callers pass `sin_t`/`cos_t`/`sin_a`/`cos_a` already built: symbolic
/// (`Sin(Sym)`/`Cos(Sym)`) when the corresponding parameter is the link's
/// free joint variable, numerically folded (`Expr::num(value.sin())`) when
/// it is one of the three fixed parameters. This function never wraps a
/// `Const` in `Sin`/`Cos` itself, since nothing downstream folds a
/// constant-argument trig node back to a literal.
fn dh_matrix(sin_t: Expr, cos_t: Expr, d: Expr, a: Expr, sin_a: Expr, cos_a: Expr) -> [[Expr; 4]; 4] {
    [
        [
            cos_t.clone(),
            Expr::Neg(Box::new(sin_t.clone().mul(cos_a.clone()))),
            sin_t.clone().mul(sin_a.clone()),
            a.clone().mul(cos_t.clone()),
        ],
        [
            sin_t.clone(),
            cos_t.clone().mul(cos_a.clone()),
            Expr::Neg(Box::new(cos_t.mul(sin_a.clone()))),
            a.mul(sin_t),
        ],
        [Expr::Const(0.0), sin_a, cos_a, d],
        [Expr::Const(0.0), Expr::Const(0.0), Expr::Const(0.0), Expr::Const(1.0)],
    ]
}
