//! Chain composition: stacking per-link transforms into a whole-arm pose and
//! its per-joint differentials.

use crate::dh::LinkTransform;
use crate::error::CodegenError;
use crate::expr::Expr;
use crate::numeric::Mat4;

/// An ordered sequence of link transforms, base to end-effector.
pub struct Chain {
    links: Vec<LinkTransform>,
}

impl Chain {
    /// Builds a chain from its links, in base-to-end-effector order.
    #[must_use]
    pub fn new(links: Vec<LinkTransform>) -> Self {
        Self { links }
    }

    /// The chain's links.
    #[must_use]
    pub fn links(&self) -> &[LinkTransform] {
        &self.links
    }

    /// The ids of this chain's actuated joints, in declaration order.
    #[must_use]
    pub fn actuated_joint_ids(&self) -> Vec<u32> {
        self.links
            .iter()
            .filter(|l| l.is_actuated())
            .map(LinkTransform::id)
            .collect()
    }

    /// The symbolic whole-chain pose: the product of every link's transform,
    /// base to end-effector.
    #[must_use]
    pub fn build_pose(&self) -> [[Expr; 4]; 4] {
        let mut acc = identity_expr();
        for link in &self.links {
            acc = mat_mul_expr(&acc, link.matrix());
        }
        log::debug!("pose composed over {} link(s)", self.links.len());
        acc
    }

    /// The partial derivative of the whole-chain pose with respect to each
    /// actuated joint, in declaration order.
    #[must_use]
    pub fn build_differentials(&self, pose: &[[Expr; 4]; 4]) -> Vec<(u32, [[Expr; 4]; 4])> {
        let diffs: Vec<(u32, [[Expr; 4]; 4])> = self
            .actuated_joint_ids()
            .into_iter()
            .map(|id| {
                let symbol = format!("q{id}");
                let mut d = empty_expr_matrix();
                for row in 0..4 {
                    for col in 0..4 {
                        d[row][col] = pose[row][col].diff(&symbol);
                    }
                }
                (id, d)
            })
            .collect();
        log::trace!("{} differential(s) built from the composed pose", diffs.len());
        diffs
    }

    /// Evaluates the pose at every link, returning the cumulative
    /// base-to-link pose after each link in the chain.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::JointUnderflow`] if `joint_values` has fewer
    /// entries than this chain has actuated joints.
    pub fn evaluate_positions(&self, joint_values: &[f64]) -> Result<Vec<Mat4>, CodegenError> {
        let expected = self.actuated_joint_ids().len();
        if joint_values.len() < expected {
            return Err(CodegenError::JointUnderflow {
                expected,
                found: joint_values.len(),
            });
        }

        let mut cumulative = Mat4::identity();
        let mut results = Vec::with_capacity(self.links.len());
        let mut remaining = joint_values.iter();
        for link in &self.links {
            let joint_value = if link.is_actuated() {
                *remaining
                    .next()
                    .ok_or(CodegenError::JointUnderflow { expected, found: joint_values.len() })?
            } else {
                0.0
            };
            let m: Mat4 = link.evaluate(joint_value)?.into();
            cumulative = cumulative.mul(&m);
            results.push(cumulative);
        }
        Ok(results)
    }

    /// Writes this chain's emitted source to `path`, using the default
    /// [`crate::emit::EmitConfig`].
    ///
    /// Named `export_expressions` for parity with this crate's external
    /// construction API.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::IOFailure`] if `path` cannot be created or
    /// written, or [`CodegenError::MalformedExpression`] if the chain's
    /// symbolic pose violates the emitter's invariants.
    pub fn export_expressions(&self, path: impl AsRef<std::path::Path>) -> Result<(), CodegenError> {
        let mut file = std::fs::File::create(path)?;
        crate::emit::emit_chain(self, &crate::emit::EmitConfig::default(), &mut file)
    }

    /// Alias for [`Chain::evaluate_positions`], named `get_positions` for
    /// parity with this crate's external construction API.
    ///
    /// # Errors
    ///
    /// See [`Chain::evaluate_positions`].
    pub fn get_positions(&self, joint_values: &[f64]) -> Result<Vec<Mat4>, CodegenError> {
        self.evaluate_positions(joint_values)
    }
}

fn identity_expr() -> [[Expr; 4]; 4] {
    let mut m = empty_expr_matrix();
    for (i, row) in m.iter_mut().enumerate() {
        row[i] = Expr::Const(1.0);
    }
    m
}

fn empty_expr_matrix() -> [[Expr; 4]; 4] {
    std::array::from_fn(|_| std::array::from_fn(|_| Expr::Const(0.0)))
}

fn mat_mul_expr(a: &[[Expr; 4]; 4], b: &[[Expr; 4]; 4]) -> [[Expr; 4]; 4] {
    let mut out = empty_expr_matrix();
    for row in 0..4 {
        for col in 0..4 {
            let mut acc = Expr::Const(0.0);
            for k in 0..4 {
                acc = acc.add(a[row][k].clone().mul(b[k][col].clone()));
            }
            out[row][col] = acc;
        }
    }
    out
}
