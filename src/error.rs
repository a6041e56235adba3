//! Crate-wide error taxonomy.
//!
//! Hand-rolled `Display`/`Error` implementations rather than a derive macro,
//! matching the rest of this crate's preference for explicit, readable error
//! text over generated text.

use std::fmt;

/// Everything that can go wrong while building, simplifying, or emitting a
/// kinematic chain.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CodegenError {
    /// A joint kind outside `{Revolute, Prismatic, Static}` was requested.
    ///
    /// Unreachable in practice: [`crate::dh::JointKind`] is a closed enum, so
    /// there is no runtime value that could trigger this. Kept for parity
    /// with the taxonomy this crate is specified against.
    InvalidJointKind {
        /// The textual description of the invalid kind, if one was available.
        found: String,
    },
    /// A query that only makes sense for an actuated link was made against a
    /// `Static` one.
    NotActuated {
        /// The link id that was queried.
        link_id: u32,
    },
    /// Numeric evaluation hit a symbol that was never substituted.
    UnresolvedSymbol {
        /// The name of the unresolved symbol.
        name: String,
    },
    /// Fewer joint values were supplied than the chain has actuated joints.
    JointUnderflow {
        /// How many joint values the chain's actuated joints require.
        expected: usize,
        /// How many were actually supplied.
        found: usize,
    },
    /// The stringifier or the monomial parser saw input that violates the
    /// grammar they expect.
    MalformedExpression {
        /// A human-readable description of what was malformed.
        reason: String,
    },
    /// An I/O operation (typically writing the emitted source file) failed.
    IOFailure {
        /// The underlying error's message.
        message: String,
    },
}

impl fmt::Display for CodegenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodegenError::InvalidJointKind { found } => {
                write!(f, "invalid joint kind: {found}")
            }
            CodegenError::NotActuated { link_id } => {
                write!(f, "link {link_id} is not actuated and has no joint variable")
            }
            CodegenError::UnresolvedSymbol { name } => {
                write!(f, "unresolved symbol `{name}` during numeric evaluation")
            }
            CodegenError::JointUnderflow { expected, found } => {
                write!(
                    f,
                    "expected {expected} joint value(s), found {found}"
                )
            }
            CodegenError::MalformedExpression { reason } => {
                write!(f, "malformed expression: {reason}")
            }
            CodegenError::IOFailure { message } => {
                write!(f, "I/O failure: {message}")
            }
        }
    }
}

impl std::error::Error for CodegenError {}

impl From<std::io::Error> for CodegenError {
    fn from(err: std::io::Error) -> Self {
        CodegenError::IOFailure {
            message: err.to_string(),
        }
    }
}
