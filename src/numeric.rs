//! A plain 4x4 matrix of `f64`, used for numerically evaluated poses.
//!
//! This crate only ever multiplies fixed-size 4x4 homogeneous transforms, so
//! it carries its own tiny matrix type rather than a general linear-algebra
//! dependency.

/// A 4x4 matrix of `f64`, row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4(pub [[f64; 4]; 4]);

impl Mat4 {
    /// The 4x4 identity matrix.
    #[must_use]
    pub fn identity() -> Self {
        let mut m = [[0.0f64; 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Mat4(m)
    }

    /// Matrix product `self * rhs`.
    #[must_use]
    pub fn mul(&self, rhs: &Mat4) -> Mat4 {
        let mut out = [[0.0f64; 4]; 4];
        for row in 0..4 {
            for col in 0..4 {
                let mut acc = 0.0;
                for k in 0..4 {
                    acc += self.0[row][k] * rhs.0[k][col];
                }
                out[row][col] = acc;
            }
        }
        Mat4(out)
    }

    /// The translation column `(x, y, z)`.
    #[must_use]
    pub fn translation(&self) -> (f64, f64, f64) {
        (self.0[0][3], self.0[1][3], self.0[2][3])
    }
}

impl From<[[f64; 4]; 4]> for Mat4 {
    fn from(value: [[f64; 4]; 4]) -> Self {
        Mat4(value)
    }
}
