#![forbid(unsafe_code)]
//! `dh_kinegen`: builds a serial manipulator's forward and differential
//! kinematics from Denavit-Hartenberg parameters, simplifies the resulting
//! trig polynomials, and emits numerical C source code.
//!
//! ```
//! use dh_kinegen::{Chain, DhParams, EmitConfig, JointKind, LinkTransform};
//!
//! let chain = Chain::new(vec![
//!     LinkTransform::new(
//!         DhParams { theta: 0.0, d: 0.0, a: 1.0, alpha: 0.0 },
//!         JointKind::Revolute,
//!         1,
//!     ),
//!     LinkTransform::new(
//!         DhParams { theta: 0.0, d: 0.0, a: 1.0, alpha: 0.0 },
//!         JointKind::Revolute,
//!         2,
//!     ),
//! ]);
//!
//! let mut source = Vec::new();
//! dh_kinegen::emit::emit_chain(&chain, &EmitConfig::default(), &mut source)
//!     .expect("a two-revolute-joint chain emits cleanly");
//! assert!(String::from_utf8_lossy(&source).contains("forward_kinematics"));
//! ```

pub mod chain;
pub mod dh;
pub mod emit;
pub mod error;
pub mod expr;
pub mod numeric;
pub mod simplify;
pub mod stringify;
pub mod sumexpr;

pub use chain::Chain;
pub use dh::{DhParams, JointKind, LinkTransform};
pub use emit::EmitConfig;
pub use error::CodegenError;
pub use expr::Expr;
pub use numeric::Mat4;
pub use sumexpr::{Monomial, Sign, SumExpr};

/// Alias for [`Chain`], named for parity with this crate's external
/// construction API.
pub use chain::Chain as Arm;
/// Alias for [`LinkTransform`], named for parity with this crate's external
/// construction API.
pub use dh::LinkTransform as Transform;
