//! A minimal symbolic expression type.
//!
//! This is deliberately not a general-purpose computer-algebra type: it has
//! exactly the primitives a Denavit-Hartenberg transform needs (a numeric
//! constant, a named symbol, negation, addition, multiplication, and the two
//! trigonometric functions that appear in a rotation matrix) and nothing
//! else. There is no division, no exponentiation, and no common-subterm
//! sharing between nodes.

use std::fmt;

use crate::error::CodegenError;

/// A symbolic expression tree.
///
/// `Const` always holds a non-negative magnitude; a negative literal is
/// represented as `Neg(Const(magnitude))` rather than a negative `f64`. This
/// keeps a bare `-` out of the interior of a serialized factor, which matters
/// once expressions are flattened into monomial text (see `stringify`).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A non-negative numeric literal.
    Const(f64),
    /// A named free variable, e.g. a joint variable `q1` or a DH constant.
    Sym(String),
    /// Unary negation.
    Neg(Box<Expr>),
    /// Binary addition.
    Add(Box<Expr>, Box<Expr>),
    /// Binary multiplication.
    Mul(Box<Expr>, Box<Expr>),
    /// The sine of its argument.
    Sin(Box<Expr>),
    /// The cosine of its argument.
    Cos(Box<Expr>),
}

impl Expr {
    /// Builds a numeric literal, pulling a negative sign out into `Neg`.
    #[must_use]
    pub fn num(value: f64) -> Expr {
        if value < 0.0 {
            Expr::Neg(Box::new(Expr::Const(-value)))
        } else {
            Expr::Const(value)
        }
    }

    /// Builds a symbol reference.
    #[must_use]
    pub fn sym(name: impl Into<String>) -> Expr {
        Expr::Sym(name.into())
    }

    /// Builds `self + other`.
    #[must_use]
    pub fn add(self, other: Expr) -> Expr {
        Expr::Add(Box::new(self), Box::new(other))
    }

    /// Builds `self - other` as `self + (-other)`.
    #[must_use]
    pub fn sub(self, other: Expr) -> Expr {
        Expr::Add(Box::new(self), Box::new(Expr::Neg(Box::new(other))))
    }

    /// Builds `self * other`.
    #[must_use]
    pub fn mul(self, other: Expr) -> Expr {
        Expr::Mul(Box::new(self), Box::new(other))
    }

    /// Builds `sin(self)`.
    #[must_use]
    pub fn sin(self) -> Expr {
        Expr::Sin(Box::new(self))
    }

    /// Builds `cos(self)`.
    #[must_use]
    pub fn cos(self) -> Expr {
        Expr::Cos(Box::new(self))
    }

    /// Replaces every occurrence of the symbol `name` with `value`.
    #[must_use]
    pub fn substitute(&self, name: &str, value: &Expr) -> Expr {
        match self {
            Expr::Const(n) => Expr::Const(*n),
            Expr::Sym(s) => {
                if s == name {
                    value.clone()
                } else {
                    Expr::Sym(s.clone())
                }
            }
            Expr::Neg(inner) => Expr::Neg(Box::new(inner.substitute(name, value))),
            Expr::Add(a, b) => Expr::Add(
                Box::new(a.substitute(name, value)),
                Box::new(b.substitute(name, value)),
            ),
            Expr::Mul(a, b) => Expr::Mul(
                Box::new(a.substitute(name, value)),
                Box::new(b.substitute(name, value)),
            ),
            Expr::Sin(inner) => Expr::Sin(Box::new(inner.substitute(name, value))),
            Expr::Cos(inner) => Expr::Cos(Box::new(inner.substitute(name, value))),
        }
    }

    /// Structural derivative with respect to the named variable.
    ///
    /// Every primitive in this type is differentiable, so this never fails;
    /// the product rule is applied at `Mul` and the chain rule at `Sin`/`Cos`.
    #[must_use]
    pub fn diff(&self, var: &str) -> Expr {
        match self {
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Sym(s) => {
                if s == var {
                    Expr::Const(1.0)
                } else {
                    Expr::Const(0.0)
                }
            }
            Expr::Neg(inner) => Expr::Neg(Box::new(inner.diff(var))),
            Expr::Add(a, b) => Expr::Add(Box::new(a.diff(var)), Box::new(b.diff(var))),
            Expr::Mul(a, b) => Expr::Add(
                Box::new(Expr::Mul(Box::new(a.diff(var)), b.clone())),
                Box::new(Expr::Mul(a.clone(), Box::new(b.diff(var)))),
            ),
            Expr::Sin(inner) => Expr::Mul(
                Box::new(Expr::Cos(inner.clone())),
                Box::new(inner.diff(var)),
            ),
            Expr::Cos(inner) => Expr::Neg(Box::new(Expr::Mul(
                Box::new(Expr::Sin(inner.clone())),
                Box::new(inner.diff(var)),
            ))),
        }
    }

    /// Folds the expression to a single number.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::UnresolvedSymbol`] if any symbol remains
    /// unsubstituted.
    pub fn eval(&self) -> Result<f64, CodegenError> {
        match self {
            Expr::Const(n) => Ok(*n),
            Expr::Sym(s) => Err(CodegenError::UnresolvedSymbol { name: s.clone() }),
            Expr::Neg(inner) => Ok(-inner.eval()?),
            Expr::Add(a, b) => Ok(a.eval()? + b.eval()?),
            Expr::Mul(a, b) => Ok(a.eval()? * b.eval()?),
            Expr::Sin(inner) => Ok(inner.eval()?.sin()),
            Expr::Cos(inner) => Ok(inner.eval()?.cos()),
        }
    }

    /// Expands the expression into a flat sum of products.
    ///
    /// After this call the tree has the shape `Add(Add(...(term)), term)`
    /// where each `term` is a (possibly negated) chain of `Mul` over atomic
    /// leaves (`Const`, `Sym`, `Sin`, `Cos`). No `Mul` node has an `Add`
    /// operand and no `Neg` node wraps an `Add` node.
    #[must_use]
    pub fn expand(&self) -> Expr {
        match self {
            Expr::Const(_) | Expr::Sym(_) => self.clone(),
            Expr::Neg(inner) => negate_sum(inner.expand()),
            Expr::Add(a, b) => Expr::Add(Box::new(a.expand()), Box::new(b.expand())),
            Expr::Mul(a, b) => mul_sum(a.expand(), b.expand()),
            Expr::Sin(inner) => Expr::Sin(Box::new(inner.expand())),
            Expr::Cos(inner) => Expr::Cos(Box::new(inner.expand())),
        }
    }
}

/// Pushes a negation into every top-level addend, cancelling double negation.
fn negate_sum(e: Expr) -> Expr {
    match e {
        Expr::Add(a, b) => Expr::Add(Box::new(negate_sum(*a)), Box::new(negate_sum(*b))),
        Expr::Neg(inner) => *inner,
        other => Expr::Neg(Box::new(other)),
    }
}

/// Distributes multiplication over addition, recursing until both operands
/// are addition-free.
fn mul_sum(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (Expr::Add(a1, a2), b) => Expr::Add(
            Box::new(mul_sum(*a1, b.clone())),
            Box::new(mul_sum(*a2, b)),
        ),
        (a, Expr::Add(b1, b2)) => Expr::Add(
            Box::new(mul_sum(a.clone(), *b1)),
            Box::new(mul_sum(a, *b2)),
        ),
        (Expr::Neg(a), b) => negate_sum(mul_sum(*a, b)),
        (a, Expr::Neg(b)) => negate_sum(mul_sum(a, *b)),
        (a, b) => Expr::Mul(Box::new(a), Box::new(b)),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(n) => write!(f, "{n}"),
            Expr::Sym(s) => write!(f, "{s}"),
            Expr::Neg(inner) => write!(f, "-({inner})"),
            Expr::Add(a, b) => write!(f, "({a}+{b})"),
            Expr::Mul(a, b) => write!(f, "({a}*{b})"),
            Expr::Sin(inner) => write!(f, "sin({inner})"),
            Expr::Cos(inner) => write!(f, "cos({inner})"),
        }
    }
}
