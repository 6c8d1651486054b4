//! The graphics-API boundary.
//!
//! [`ShaderApi`] lists the handful of GL entry points the helpers in this
//! crate need. Implement it for whatever binding the application uses; the
//! crate ships an implementation for `web_sys::WebGl2RenderingContext`
//! (feature `webgl`) and a software [`HeadlessGl`](crate::HeadlessGl).
//!
//! All methods take `&self` because GL contexts are used through shared
//! references; implementations needing bookkeeping use interior mutability.

use std::fmt;

/// GL enum values used by this crate.
pub mod codes {
    /// `GL_NO_ERROR`
    pub const NO_ERROR: u32 = 0;
    /// `GL_INVALID_ENUM`
    pub const INVALID_ENUM: u32 = 0x0500;
    /// `GL_INVALID_VALUE`
    pub const INVALID_VALUE: u32 = 0x0501;
    /// `GL_INVALID_OPERATION`
    pub const INVALID_OPERATION: u32 = 0x0502;
    /// `GL_OUT_OF_MEMORY`
    pub const OUT_OF_MEMORY: u32 = 0x0505;
    /// `GL_INVALID_FRAMEBUFFER_OPERATION`
    pub const INVALID_FRAMEBUFFER_OPERATION: u32 = 0x0506;
    /// `GL_FRAGMENT_SHADER`
    pub const FRAGMENT_SHADER: u32 = 0x8B30;
    /// `GL_VERTEX_SHADER`
    pub const VERTEX_SHADER: u32 = 0x8B31;
}

/// Programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader.
    Vertex,
    /// Fragment shader.
    Fragment,
}

impl ShaderStage {
    /// The GL enum passed to `glCreateShader`.
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => codes::VERTEX_SHADER,
            ShaderStage::Fragment => codes::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// GL entry points needed to build programs and upload matrices.
pub trait ShaderApi {
    /// Shader object handle.
    type Shader;
    /// Program object handle.
    type Program;
    /// Uniform location handle.
    type UniformLocation;

    /// `glCreateShader`. `None` if the object could not be created.
    fn create_shader(&self, stage: ShaderStage) -> Option<Self::Shader>;

    /// `glShaderSource` with a single string.
    fn shader_source(&self, shader: &Self::Shader, source: &str);

    /// `glCompileShader`.
    fn compile_shader(&self, shader: &Self::Shader);

    /// `GL_COMPILE_STATUS` of the shader.
    fn shader_compile_status(&self, shader: &Self::Shader) -> bool;

    /// `glGetShaderInfoLog`.
    fn shader_info_log(&self, shader: &Self::Shader) -> Option<String>;

    /// `glDeleteShader`.
    fn delete_shader(&self, shader: &Self::Shader);

    /// `glCreateProgram`. `None` if the object could not be created.
    fn create_program(&self) -> Option<Self::Program>;

    /// `glAttachShader`.
    fn attach_shader(&self, program: &Self::Program, shader: &Self::Shader);

    /// `glLinkProgram`.
    fn link_program(&self, program: &Self::Program);

    /// `GL_LINK_STATUS` of the program.
    fn program_link_status(&self, program: &Self::Program) -> bool;

    /// `glGetProgramInfoLog`.
    fn program_info_log(&self, program: &Self::Program) -> Option<String>;

    /// `glDeleteProgram`.
    fn delete_program(&self, program: &Self::Program);

    /// `glUseProgram`. `None` unbinds.
    fn use_program(&self, program: Option<&Self::Program>);

    /// `glGetUniformLocation`. `None` for inactive or unknown uniforms.
    fn uniform_location(&self, program: &Self::Program, name: &str)
        -> Option<Self::UniformLocation>;

    /// `glUniformMatrix3fv` for a single matrix.
    fn uniform_matrix3(&self, location: &Self::UniformLocation, transpose: bool, data: &[f32; 9]);

    /// `glUniformMatrix4fv` for a single matrix.
    fn uniform_matrix4(&self, location: &Self::UniformLocation, transpose: bool, data: &[f32; 16]);

    /// `glGetError`. Returns and clears the error flag.
    fn get_error(&self) -> u32;
}
