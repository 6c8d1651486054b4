//! Transform and projection constructors.
//!
//! All constructors return a new [`Mat4`] meant to be applied to column
//! vectors (`m * v`), so transforms compose right to left:
//!
//! ```rust
//! use glf_math::{scale, translation, zrotation, Vec3};
//!
//! // Scale first, then rotate, then translate.
//! let model = translation(Vec3::new(0.0, 0.0, -5.0))
//!     * zrotation(0.5)
//!     * scale(Vec3::splat(2.0));
//! assert!(model.is_finite());
//! ```
//!
//! # Projection conventions
//!
//! Both projections follow OpenGL: the camera looks down -Z and the view
//! volume maps onto the clip cube [-1, 1]^3, with view-space `z = -near`
//! landing on clip `z = -1`.

use crate::{Mat3, Mat4, Vec3};

/// Rotation about X through `a` radians.
pub fn xrotation(a: f32) -> Mat4 {
    let (s, c) = a.sin_cos();
    Mat4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, c, -s, 0.0,
        0.0, s, c, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Rotation about Y through `a` radians.
pub fn yrotation(a: f32) -> Mat4 {
    let (s, c) = a.sin_cos();
    Mat4::new(
        c, 0.0, s, 0.0,
        0.0, 1.0, 0.0, 0.0,
        -s, 0.0, c, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Rotation about Z through `a` radians.
pub fn zrotation(a: f32) -> Mat4 {
    let (s, c) = a.sin_cos();
    Mat4::new(
        c, -s, 0.0, 0.0,
        s, c, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Rotation about an arbitrary axis through `a` radians (Rodrigues).
///
/// `axis` must be normalized. For the unit axes the result matches
/// [`xrotation`], [`yrotation`] and [`zrotation`].
pub fn rotation(axis: Vec3, a: f32) -> Mat4 {
    let (s, c) = a.sin_cos();
    let t = 1.0 - c;
    let Vec3 { x, y, z } = axis;

    Mat4::new(
        t * x * x + c, t * x * y - s * z, t * x * z + s * y, 0.0,
        t * x * y + s * z, t * y * y + c, t * y * z - s * x, 0.0,
        t * x * z - s * y, t * y * z + s * x, t * z * z + c, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Translation along `v`.
pub fn translation(v: Vec3) -> Mat4 {
    Mat4::new(
        1.0, 0.0, 0.0, v.x,
        0.0, 1.0, 0.0, v.y,
        0.0, 0.0, 1.0, v.z,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Scale along `v`.
pub fn scale(v: Vec3) -> Mat4 {
    Mat4::new(
        v.x, 0.0, 0.0, 0.0,
        0.0, v.y, 0.0, 0.0,
        0.0, 0.0, v.z, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Symmetric perspective projection.
///
/// `fov` is the vertical field of view in radians, `aspect` is width over
/// height, and `near`/`far` are positive clip distances.
///
/// # Example
///
/// ```rust
/// use glf_math::{perspective, to_radians, Vec4};
///
/// let p = perspective(to_radians(90.0), 1.0, 0.1, 100.0);
/// let clip = p * Vec4::new(0.0, 0.0, -0.1, 1.0);
/// assert!((clip.z / clip.w + 1.0).abs() < 1e-4);
/// ```
pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let y = near * (fov / 2.0).tan();
    let x = y * aspect;

    Mat4::new(
        near / x, 0.0, 0.0, 0.0,
        0.0, near / y, 0.0, 0.0,
        0.0, 0.0, (near + far) / (near - far), 2.0 * (near * far) / (near - far),
        0.0, 0.0, -1.0, 0.0,
    )
}

/// Perspective projection for an explicit, possibly off-center frustum.
///
/// `left`, `right`, `bottom` and `top` are measured on the near plane.
/// A frustum symmetric about the view axis gives the same matrix as
/// [`perspective`].
pub fn perspective_frustum(
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
) -> Mat4 {
    Mat4::new(
        (near + near) / (right - left), 0.0, (right + left) / (right - left), 0.0,
        0.0, (near + near) / (top - bottom), (top + bottom) / (top - bottom), 0.0,
        0.0, 0.0, (near + far) / (near - far), 2.0 * (near * far) / (near - far),
        0.0, 0.0, -1.0, 0.0,
    )
}

/// Orthographic projection of the box `[left, right] x [bottom, top]`
/// between the `near` and `far` planes.
///
/// Uses the same depth convention as [`perspective`]: view-space
/// `z = -near` maps to -1 and `z = -far` maps to +1. With that convention
/// `orthogonal(-1.0, 1.0, -1.0, 1.0, 1.0, -1.0)` is the identity.
pub fn orthogonal(
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
) -> Mat4 {
    Mat4::new(
        2.0 / (right - left), 0.0, 0.0, -(right + left) / (right - left),
        0.0, 2.0 / (top - bottom), 0.0, -(top + bottom) / (top - bottom),
        0.0, 0.0, -2.0 / (far - near), -(far + near) / (far - near),
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Normal matrix of a model-view transform.
///
/// Returns the transposed inverse of the upper-left 3x3 block of `m`,
/// computed from its cofactors. A block with a zero determinant has no
/// inverse and yields the identity instead.
///
/// # Example
///
/// ```rust
/// use glf_math::{normal, scale, Mat3, Vec3};
///
/// let n = normal(&scale(Vec3::new(2.0, 4.0, 8.0)));
/// assert_eq!(n, Mat3::diagonal(0.5, 0.25, 0.125));
/// assert_eq!(normal(&scale(Vec3::ZERO)), Mat3::IDENTITY);
/// ```
pub fn normal(m: &Mat4) -> Mat3 {
    let block = m.upper_left();
    let det = block.determinant();
    if det.abs() > 0.0 {
        block.cofactors() * (1.0 / det)
    } else {
        Mat3::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{to_radians, Vec4};
    use approx::assert_abs_diff_eq;

    const ANGLES: [f32; 6] = [0.0, 0.3, -1.2, 1.5707964, 2.5, -3.0];

    fn assert_mat4_near(a: &Mat4, b: &Mat4, eps: f32) {
        for (x, y) in a.as_slice().iter().zip(b.as_slice()) {
            assert_abs_diff_eq!(*x, *y, epsilon = eps);
        }
    }

    fn assert_mat3_near(a: &Mat3, b: &Mat3, eps: f32) {
        for (x, y) in a.as_slice().iter().zip(b.as_slice()) {
            assert_abs_diff_eq!(*x, *y, epsilon = eps);
        }
    }

    #[test]
    fn test_zero_rotation_is_identity() {
        assert_eq!(xrotation(0.0), Mat4::IDENTITY);
        assert_eq!(yrotation(0.0), Mat4::IDENTITY);
        assert_eq!(zrotation(0.0), Mat4::IDENTITY);
        assert_eq!(rotation(Vec3::Y, 0.0), Mat4::IDENTITY);
    }

    #[test]
    fn test_rotations_compose() {
        for a in ANGLES {
            for b in ANGLES {
                assert_mat4_near(&(xrotation(a) * xrotation(b)), &xrotation(a + b), 1e-5);
                assert_mat4_near(&(yrotation(a) * yrotation(b)), &yrotation(a + b), 1e-5);
                assert_mat4_near(&(zrotation(a) * zrotation(b)), &zrotation(a + b), 1e-5);
            }
        }
    }

    #[test]
    fn test_rotations_are_right_handed() {
        let quarter = std::f32::consts::FRAC_PI_2;
        let y_to_z = xrotation(quarter) * Vec4::new(0.0, 1.0, 0.0, 0.0);
        let z_to_x = yrotation(quarter) * Vec4::new(0.0, 0.0, 1.0, 0.0);
        let x_to_y = zrotation(quarter) * Vec4::new(1.0, 0.0, 0.0, 0.0);
        assert_abs_diff_eq!(y_to_z.z, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(z_to_x.x, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(x_to_y.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_axis_rotation_reduces_to_principal_axes() {
        for a in ANGLES {
            assert_mat4_near(&rotation(Vec3::X, a), &xrotation(a), 1e-6);
            assert_mat4_near(&rotation(Vec3::Y, a), &yrotation(a), 1e-6);
            assert_mat4_near(&rotation(Vec3::Z, a), &zrotation(a), 1e-6);
        }
    }

    #[test]
    fn test_axis_rotation_matches_glam() {
        let axis = Vec3::new(1.0, -2.0, 0.5).normalize();
        for a in ANGLES {
            let expected = Mat4::from_glam(glam::Mat4::from_axis_angle(axis.to_glam(), a));
            assert_mat4_near(&rotation(axis, a), &expected, 1e-5);
        }
    }

    #[test]
    fn test_translation_inverts() {
        let v = Vec3::new(1.5, -2.0, 30.0);
        assert_mat4_near(&(translation(v) * translation(-v)), &Mat4::IDENTITY, 1e-6);
        let p = translation(v) * Vec4::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(p, Vec4::new(2.5, -1.0, 31.0, 1.0));
    }

    #[test]
    fn test_scale_inverts() {
        let v = Vec3::new(2.0, -0.5, 3.0);
        assert_mat4_near(&(scale(v) * scale(v.recip())), &Mat4::IDENTITY, 1e-6);
    }

    #[test]
    fn test_perspective_near_plane() {
        let p = perspective(to_radians(90.0), 1.0, 0.1, 100.0);
        let near = p * Vec4::new(0.0, 0.0, -0.1, 1.0);
        let far = p * Vec4::new(0.0, 0.0, -100.0, 1.0);
        assert_abs_diff_eq!(near.z / near.w, -1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(far.z / far.w, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_perspective_pinned_values() {
        let p = perspective(to_radians(90.0), 1.0, 0.1, 100.0);
        assert_abs_diff_eq!(p[0][0], 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(p[1][1], 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(p[2][2], -100.1 / 99.9, epsilon = 1e-5);
        assert_abs_diff_eq!(p[2][3], -20.0 / 99.9, epsilon = 1e-5);
        assert_eq!(p[3], Vec4::new(0.0, 0.0, -1.0, 0.0));
    }

    #[test]
    fn test_perspective_matches_glam() {
        let fov = to_radians(60.0);
        let p = perspective(fov, 16.0 / 9.0, 0.1, 100.0);
        let expected = Mat4::from_glam(glam::Mat4::perspective_rh_gl(fov, 16.0 / 9.0, 0.1, 100.0));
        assert_mat4_near(&p, &expected, 1e-5);
    }

    #[test]
    fn test_symmetric_frustum_matches_perspective() {
        let (fov, aspect, near, far) = (to_radians(75.0), 1.5, 0.5, 50.0);
        let y = near * (fov / 2.0).tan();
        let x = y * aspect;
        let a = perspective(fov, aspect, near, far);
        let b = perspective_frustum(-x, x, -y, y, near, far);
        assert_mat4_near(&a, &b, 1e-5);
    }

    #[test]
    fn test_off_center_frustum() {
        let p = perspective_frustum(-0.2, 0.6, -0.3, 0.1, 0.5, 20.0);
        let expected = Mat4::new(
            1.25, 0.0, 0.5, 0.0,
            0.0, 2.5, -0.5, 0.0,
            0.0, 0.0, -20.5 / 19.5, -20.0 / 19.5,
            0.0, 0.0, -1.0, 0.0,
        );
        assert_mat4_near(&p, &expected, 1e-5);
    }

    #[test]
    fn test_orthogonal_canonical_cube() {
        assert_eq!(orthogonal(-1.0, 1.0, -1.0, 1.0, 1.0, -1.0), Mat4::IDENTITY);
        let flipped = orthogonal(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
        assert_eq!(flipped[2][2], -1.0);
        assert_eq!(flipped[0][0], 1.0);
        assert_eq!(flipped[1][1], 1.0);
        assert_eq!(flipped[3][3], 1.0);
    }

    #[test]
    fn test_orthogonal_matches_glam() {
        let o = orthogonal(0.0, 640.0, 480.0, 0.0, 0.1, 10.0);
        let expected = Mat4::from_glam(glam::Mat4::orthographic_rh_gl(0.0, 640.0, 480.0, 0.0, 0.1, 10.0));
        assert_mat4_near(&o, &expected, 1e-6);
    }

    #[test]
    fn test_normal_of_rotation_is_rotation() {
        let r = xrotation(0.4) * yrotation(-1.1) * zrotation(2.0);
        assert_mat3_near(&normal(&r), &r.upper_left(), 1e-5);
    }

    #[test]
    fn test_normal_ignores_translation() {
        let r = yrotation(0.7);
        let rt = translation(Vec3::new(5.0, -3.0, 2.0)) * r;
        assert_mat3_near(&normal(&rt), &normal(&r), 1e-6);
    }

    #[test]
    fn test_normal_is_inverse_transpose() {
        let m = translation(Vec3::new(1.0, 2.0, 3.0))
            * zrotation(0.3)
            * scale(Vec3::new(1.0, 3.0, 0.5));
        let expected = m.upper_left().inverse().unwrap().transpose();
        assert_mat3_near(&normal(&m), &expected, 1e-5);
    }

    #[test]
    fn test_normal_of_singular_is_identity() {
        assert_eq!(normal(&Mat4::ZERO), Mat3::IDENTITY);
        assert_eq!(normal(&scale(Vec3::new(1.0, 0.0, 1.0))), Mat3::IDENTITY);
    }
}
