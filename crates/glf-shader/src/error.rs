//! Error types for shader and GL operations.
//!
//! Every helper in this crate reports failure through [`ShaderError`]; nothing
//! aborts the process. Compile and link errors carry the driver's info log.

use crate::ShaderStage;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for shader operations.
pub type ShaderResult<T> = Result<T, ShaderError>;

/// Shader loading, compilation, and linking errors.
#[derive(Debug, Error)]
pub enum ShaderError {
    /// Shader source file could not be read.
    #[error("failed to open '{}': {source}", .path.display())]
    Io {
        /// File that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Shader source file exists but is empty.
    #[error("shader source '{}' is empty", .0.display())]
    EmptySource(PathBuf),

    /// The API refused to create a shader object.
    #[error("failed to create {0} shader object")]
    CreateShader(ShaderStage),

    /// The API refused to create a program object.
    #[error("failed to create program object")]
    CreateProgram,

    /// Shader compilation failed.
    #[error("{stage} shader compilation failed:\n{log}")]
    Compile {
        /// Stage that failed.
        stage: ShaderStage,
        /// Driver info log.
        log: String,
    },

    /// Program linking failed.
    #[error("program link failed:\n{log}")]
    Link {
        /// Driver info log.
        log: String,
    },

    /// Uniform is not an active uniform of the program.
    #[error("uniform not found: {0}")]
    UniformNotFound(String),

    /// GL error flag was raised.
    #[error(transparent)]
    Gl(#[from] GlError),
}

/// Values of the GL error flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GlErrorKind {
    /// `GL_INVALID_ENUM`
    #[error("Invalid Enum")]
    InvalidEnum,
    /// `GL_INVALID_VALUE`
    #[error("Invalid Value")]
    InvalidValue,
    /// `GL_INVALID_OPERATION`
    #[error("Invalid Operation")]
    InvalidOperation,
    /// `GL_OUT_OF_MEMORY`
    #[error("Out of Memory")]
    OutOfMemory,
    /// `GL_INVALID_FRAMEBUFFER_OPERATION`
    #[error("Invalid Framebuffer Operation")]
    InvalidFramebufferOperation,
    /// Any other non-zero code, e.g. `CONTEXT_LOST_WEBGL`.
    #[error("Unknown Error 0x{0:04X}")]
    Unknown(u32),
}

impl GlErrorKind {
    /// Maps a `glGetError` code. Returns `None` for `GL_NO_ERROR`.
    pub fn from_code(code: u32) -> Option<Self> {
        use crate::api::codes;

        match code {
            codes::NO_ERROR => None,
            codes::INVALID_ENUM => Some(Self::InvalidEnum),
            codes::INVALID_VALUE => Some(Self::InvalidValue),
            codes::INVALID_OPERATION => Some(Self::InvalidOperation),
            codes::OUT_OF_MEMORY => Some(Self::OutOfMemory),
            codes::INVALID_FRAMEBUFFER_OPERATION => Some(Self::InvalidFramebufferOperation),
            other => Some(Self::Unknown(other)),
        }
    }
}

/// A raised GL error flag, tagged with the call site that checked it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{file}:{line}: {kind}")]
pub struct GlError {
    /// Which error flag was set.
    pub kind: GlErrorKind,
    /// Source file of the check.
    pub file: &'static str,
    /// Source line of the check.
    pub line: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(GlErrorKind::from_code(0), None);
        assert_eq!(GlErrorKind::from_code(0x0500), Some(GlErrorKind::InvalidEnum));
        assert_eq!(GlErrorKind::from_code(0x0505), Some(GlErrorKind::OutOfMemory));
        assert_eq!(GlErrorKind::from_code(0x9242), Some(GlErrorKind::Unknown(0x9242)));
    }

    #[test]
    fn test_gl_error_display() {
        let err = GlError {
            kind: GlErrorKind::InvalidOperation,
            file: "scene.rs",
            line: 42,
        };
        assert_eq!(err.to_string(), "scene.rs:42: Invalid Operation");
        assert_eq!(GlErrorKind::Unknown(0x9242).to_string(), "Unknown Error 0x9242");
    }

    #[test]
    fn test_compile_error_display() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "0:3: 'foo' : undeclared identifier".into(),
        };
        assert!(err.to_string().starts_with("fragment shader compilation failed"));
        assert!(err.to_string().contains("undeclared identifier"));
    }
}
