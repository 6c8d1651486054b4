//! Matrix uniform upload.
//!
//! Matrices are stored row-major, so they are always sent with the
//! transpose flag set and GL sees the column-major layout it expects.

use crate::{ShaderApi, ShaderError, ShaderResult};
use glf_math::{Mat3, Mat4};
use tracing::{trace, warn};

fn locate<A: ShaderApi>(api: &A, program: &A::Program, name: &str) -> ShaderResult<A::UniformLocation> {
    api.uniform_location(program, name).ok_or_else(|| {
        warn!("uniform '{name}' is not active in program");
        ShaderError::UniformNotFound(name.to_owned())
    })
}

/// Uploads a 3x3 matrix to the uniform `name` of `program`.
///
/// The program is made current first.
pub fn set_uniform_mat3<A: ShaderApi>(
    api: &A,
    program: &A::Program,
    name: &str,
    matrix: &Mat3,
) -> ShaderResult<()> {
    let location = locate(api, program, name)?;
    api.use_program(Some(program));
    api.uniform_matrix3(&location, true, matrix.as_slice());
    trace!("uploaded mat3 '{name}'");
    Ok(())
}

/// Uploads a 4x4 matrix to the uniform `name` of `program`.
///
/// The program is made current first.
pub fn set_uniform_mat4<A: ShaderApi>(
    api: &A,
    program: &A::Program,
    name: &str,
    matrix: &Mat4,
) -> ShaderResult<()> {
    let location = locate(api, program, name)?;
    api.use_program(Some(program));
    api.uniform_matrix4(&location, true, matrix.as_slice());
    trace!("uploaded mat4 '{name}'");
    Ok(())
}
