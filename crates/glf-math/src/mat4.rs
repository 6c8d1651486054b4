//! 4x4 matrix type for homogeneous transforms.
//!
//! [`Mat4`] holds model, view, and projection transforms. Constructors for
//! the common transforms live in [`crate::transform`].
//!
//! # Convention
//!
//! Row-major storage, column vectors. Translation lives in the last column
//! of the first three rows:
//!
//! ```text
//! | 1 0 0 tx |
//! | 0 1 0 ty |
//! | 0 0 1 tz |
//! | 0 0 0 1  |
//! ```
//!
//! OpenGL expects column-major uniforms, so [`Mat4::as_slice`] must be
//! uploaded with the transpose flag set.

use crate::{Mat3, Vec4};
use bytemuck::{Pod, Zeroable};
use std::ops::{Index, IndexMut, Mul};

/// A row-wise 4x4 32-bit floating point matrix.
///
/// `m[i][j]` is the element at row `i`, column `j`. The default value is the
/// identity.
///
/// # Example
///
/// ```rust
/// use glf_math::{Mat4, Vec4};
///
/// let mut m = Mat4::default();
/// m[0][3] = 5.0;
/// assert_eq!(m * Vec4::new(1.0, 0.0, 0.0, 1.0), Vec4::new(6.0, 0.0, 0.0, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Mat4 {
    /// Matrix rows: [row0, row1, row2, row3]
    pub m: [Vec4; 4],
}

/// 2x2 sub-determinants shared by `determinant` and `inverse`.
///
/// `s` covers rows 0-1, `c` covers rows 2-3.
struct Minors {
    s: [f32; 6],
    c: [f32; 6],
}

impl Minors {
    fn determinant(&self) -> f32 {
        let Self { s, c } = self;
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }
}

impl Mat4 {
    /// Zero matrix.
    pub const ZERO: Self = Self {
        m: [Vec4::ZERO; 4],
    };

    /// Identity matrix.
    pub const IDENTITY: Self = Self::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    );

    /// Creates a matrix from its elements, listed row by row.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub const fn new(
        m00: f32, m01: f32, m02: f32, m03: f32,
        m10: f32, m11: f32, m12: f32, m13: f32,
        m20: f32, m21: f32, m22: f32, m23: f32,
        m30: f32, m31: f32, m32: f32, m33: f32,
    ) -> Self {
        Self {
            m: [
                Vec4::new(m00, m01, m02, m03),
                Vec4::new(m10, m11, m12, m13),
                Vec4::new(m20, m21, m22, m23),
                Vec4::new(m30, m31, m32, m33),
            ],
        }
    }

    /// Creates a matrix from row arrays.
    #[inline]
    pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self {
            m: [
                Vec4::from_array(rows[0]),
                Vec4::from_array(rows[1]),
                Vec4::from_array(rows[2]),
                Vec4::from_array(rows[3]),
            ],
        }
    }

    /// Creates a matrix from column arrays.
    #[inline]
    pub const fn from_cols(cols: [[f32; 4]; 4]) -> Self {
        Self::from_rows([
            [cols[0][0], cols[1][0], cols[2][0], cols[3][0]],
            [cols[0][1], cols[1][1], cols[2][1], cols[3][1]],
            [cols[0][2], cols[1][2], cols[2][2], cols[3][2]],
            [cols[0][3], cols[1][3], cols[2][3], cols[3][3]],
        ])
    }

    /// Returns a row.
    #[inline]
    pub fn row(&self, i: usize) -> Vec4 {
        self.m[i]
    }

    /// Returns a column.
    #[inline]
    pub fn col(&self, i: usize) -> Vec4 {
        Vec4::new(self.m[0][i], self.m[1][i], self.m[2][i], self.m[3][i])
    }

    /// Returns the transpose of this matrix.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self {
            m: [self.col(0), self.col(1), self.col(2), self.col(3)],
        }
    }

    /// Upper-left 3x3 block (the linear part of an affine transform).
    #[inline]
    pub fn upper_left(&self) -> Mat3 {
        Mat3 {
            m: [
                self.m[0].truncate(),
                self.m[1].truncate(),
                self.m[2].truncate(),
            ],
        }
    }

    fn minors(&self) -> Minors {
        let a = &self.m;
        Minors {
            s: [
                a[0][0] * a[1][1] - a[1][0] * a[0][1],
                a[0][0] * a[1][2] - a[1][0] * a[0][2],
                a[0][0] * a[1][3] - a[1][0] * a[0][3],
                a[0][1] * a[1][2] - a[1][1] * a[0][2],
                a[0][1] * a[1][3] - a[1][1] * a[0][3],
                a[0][2] * a[1][3] - a[1][2] * a[0][3],
            ],
            c: [
                a[2][0] * a[3][1] - a[3][0] * a[2][1],
                a[2][0] * a[3][2] - a[3][0] * a[2][2],
                a[2][0] * a[3][3] - a[3][0] * a[2][3],
                a[2][1] * a[3][2] - a[3][1] * a[2][2],
                a[2][1] * a[3][3] - a[3][1] * a[2][3],
                a[2][2] * a[3][3] - a[3][2] * a[2][3],
            ],
        }
    }

    /// Computes the determinant by Laplace expansion over 2x2 minors.
    pub fn determinant(&self) -> f32 {
        self.minors().determinant()
    }

    /// Computes the inverse via the adjugate.
    ///
    /// Returns `None` if the determinant is zero or not finite. Nearly
    /// singular matrices are inverted anyway and may produce huge elements.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glf_math::{translation, Vec3};
    ///
    /// let t = translation(Vec3::new(1.0, 2.0, 3.0));
    /// assert_eq!(t.inverse(), Some(translation(Vec3::new(-1.0, -2.0, -3.0))));
    /// ```
    pub fn inverse(&self) -> Option<Self> {
        let a = &self.m;
        let minors = self.minors();
        let det = minors.determinant();
        let Minors { s, c } = minors;
        if det == 0.0 || !det.is_finite() {
            return None;
        }

        let adjugate = Self::new(
            a[1][1] * c[5] - a[1][2] * c[4] + a[1][3] * c[3],
            -a[0][1] * c[5] + a[0][2] * c[4] - a[0][3] * c[3],
            a[3][1] * s[5] - a[3][2] * s[4] + a[3][3] * s[3],
            -a[2][1] * s[5] + a[2][2] * s[4] - a[2][3] * s[3],
            -a[1][0] * c[5] + a[1][2] * c[2] - a[1][3] * c[1],
            a[0][0] * c[5] - a[0][2] * c[2] + a[0][3] * c[1],
            -a[3][0] * s[5] + a[3][2] * s[2] - a[3][3] * s[1],
            a[2][0] * s[5] - a[2][2] * s[2] + a[2][3] * s[1],
            a[1][0] * c[4] - a[1][1] * c[2] + a[1][3] * c[0],
            -a[0][0] * c[4] + a[0][1] * c[2] - a[0][3] * c[0],
            a[3][0] * s[4] - a[3][1] * s[2] + a[3][3] * s[0],
            -a[2][0] * s[4] + a[2][1] * s[2] - a[2][3] * s[0],
            -a[1][0] * c[3] + a[1][1] * c[1] - a[1][2] * c[0],
            a[0][0] * c[3] - a[0][1] * c[1] + a[0][2] * c[0],
            -a[3][0] * s[3] + a[3][1] * s[1] - a[3][2] * s[0],
            a[2][0] * s[3] - a[2][1] * s[1] + a[2][2] * s[0],
        );

        Some(adjugate * (1.0 / det))
    }

    /// Transforms a Vec4 by this matrix.
    #[inline]
    pub fn transform(&self, v: Vec4) -> Vec4 {
        Vec4::new(
            self.m[0].dot(v),
            self.m[1].dot(v),
            self.m[2].dot(v),
            self.m[3].dot(v),
        )
    }

    /// Multiplies two matrices.
    #[inline]
    pub fn mul_mat(&self, other: &Self) -> Self {
        let mut result = Self::ZERO;
        for i in 0..4 {
            for j in 0..4 {
                result.m[i][j] = self.m[i][0] * other.m[0][j]
                    + self.m[i][1] * other.m[1][j]
                    + self.m[i][2] * other.m[2][j]
                    + self.m[i][3] * other.m[3][j];
            }
        }
        result
    }

    /// Row-major view of the sixteen elements.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glf_math::{translation, Vec3};
    ///
    /// let t = translation(Vec3::new(7.0, 8.0, 9.0));
    /// assert_eq!(t.as_slice()[3], 7.0);
    /// assert_eq!(t.as_slice()[7], 8.0);
    /// ```
    #[inline]
    pub fn as_slice(&self) -> &[f32; 16] {
        bytemuck::cast_ref(self)
    }

    /// Returns true if all elements are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.m.iter().all(|row| row.is_finite())
    }

    /// Converts to glam Mat4 (column-major).
    #[inline]
    pub fn to_glam(&self) -> glam::Mat4 {
        glam::Mat4::from_cols(
            self.col(0).to_glam(),
            self.col(1).to_glam(),
            self.col(2).to_glam(),
            self.col(3).to_glam(),
        )
    }

    /// Creates from glam Mat4.
    #[inline]
    pub fn from_glam(m: glam::Mat4) -> Self {
        Self::from_cols(m.to_cols_array_2d())
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// Mat4 * Vec4
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    #[inline]
    fn mul(self, rhs: Vec4) -> Vec4 {
        self.transform(rhs)
    }
}

// Mat4 * Mat4
impl Mul for Mat4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_mat(&rhs)
    }
}

// Mat4 * f32
impl Mul<f32> for Mat4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self {
            m: [
                self.m[0] * rhs,
                self.m[1] * rhs,
                self.m[2] * rhs,
                self.m[3] * rhs,
            ],
        }
    }
}

impl Index<usize> for Mat4 {
    type Output = Vec4;

    #[inline]
    fn index(&self, i: usize) -> &Vec4 {
        &self.m[i]
    }
}

impl IndexMut<usize> for Mat4 {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Vec4 {
        &mut self.m[i]
    }
}
