//! # glf-math
//!
//! Vector and matrix scaffolding for renderers built on shader-only graphics
//! APIs (OpenGL 3.2 core, OpenGL ES 2.0, WebGL2).
//!
//! Without fixed-function matrix stacks every application has to build its
//! own model, view, projection and normal matrices. This crate provides the
//! handful of types and constructors needed for that:
//!
//! - [`Vec2`], [`Vec3`], [`Vec4`] - fixed-size `f32` vectors
//! - [`Mat3`], [`Mat4`] - row-major matrices, identity by default
//! - [`xrotation`], [`translation`], [`perspective`], ... - transform constructors
//! - [`normal`] - normal matrix of a model-view transform
//! - [`to_radians`] / [`to_degrees`] - angle conversion
//!
//! # Design
//!
//! All matrix operations assume **row-major** storage and **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! Every type is a plain `Copy` value; nothing here touches the graphics API.
//! The flat row-major storage returned by [`Mat4::as_slice`] goes straight to
//! a uniform upload with the transpose flag set.
//!
//! # Usage
//!
//! ```rust
//! use glf_math::{normal, perspective, to_radians, translation, yrotation, Vec3, Vec4};
//!
//! let projection = perspective(to_radians(60.0), 4.0 / 3.0, 0.1, 100.0);
//! let model_view = translation(Vec3::new(0.0, 0.0, -4.0)) * yrotation(to_radians(30.0));
//! let normal_matrix = normal(&model_view);
//!
//! let clip = projection * model_view * Vec4::new(0.0, 0.0, 0.0, 1.0);
//! assert!(clip.w > 0.0);
//! assert!(normal_matrix.is_finite());
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - conversions for interop with glam-based code
//! - [`bytemuck`] - flat slice views of matrix storage
//!
//! # Feature Flags
//!
//! - `serde` - `Serialize`/`Deserialize` for all types

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod angle;
mod mat3;
mod mat4;
mod vec2;
mod vec3;
mod vec4;
pub mod transform;

pub use angle::*;
pub use mat3::*;
pub use mat4::*;
pub use transform::*;
pub use vec2::*;
pub use vec3::*;
pub use vec4::*;

/// Re-export glam types for direct use
pub mod glam {
    pub use ::glam::{Mat3 as GlamMat3, Mat4 as GlamMat4, Vec3 as GlamVec3, Vec4 as GlamVec4};
}
