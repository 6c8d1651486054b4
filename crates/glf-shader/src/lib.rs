//! # glf-shader
//!
//! GLSL program helpers for shader-only graphics APIs.
//!
//! Every renderer on OpenGL 3.2 core, OpenGL ES 2.0 or WebGL repeats the same
//! boilerplate: read shader files, compile each stage, print the info log on
//! failure, link, look up uniforms, and poll the error flag. This crate wraps
//! that sequence over a small [`ShaderApi`] trait so the same code runs on a
//! real context or on the in-memory [`HeadlessGl`].
//!
//! # Usage
//!
//! ```rust
//! use glf_math::{perspective, to_radians};
//! use glf_shader::{check_error, init_program, set_uniform_mat4, HeadlessGl};
//!
//! let gl = HeadlessGl::new();
//! let program = init_program(
//!     &gl,
//!     "uniform mat4 Projection;\nvoid main() { gl_Position = Projection * vec4(0.0); }\n",
//!     "void main() {}\n",
//! )?;
//!
//! let projection = perspective(to_radians(60.0), 1.5, 0.1, 100.0);
//! set_uniform_mat4(&gl, &program, "Projection", &projection)?;
//! check_error(&gl)?;
//! # Ok::<(), glf_shader::ShaderError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `webgl` - [`ShaderApi`] for `web_sys::WebGl2RenderingContext`
//!
//! # Logging
//!
//! Failures are reported through `tracing` at error level (compile and link
//! logs, GL error flags, unreadable files). The crate never installs a
//! subscriber.

#![warn(missing_docs)]

mod api;
mod check;
mod error;
pub mod headless;
mod program;
mod source;
mod uniform;

#[cfg(feature = "webgl")]
mod webgl;

pub use api::{codes, ShaderApi, ShaderStage};
pub use check::{check_error, check_error_at};
pub use error::{GlError, GlErrorKind, ShaderError, ShaderResult};
pub use headless::HeadlessGl;
pub use program::{
    init_program, init_program_from_files, init_shader, link_program, report_program_status,
    report_shader_status,
};
pub use source::read_shader_source;
pub use uniform::{set_uniform_mat3, set_uniform_mat4};
