//! GL error flag checking.

use crate::{GlError, GlErrorKind, ShaderApi};
use std::panic::Location;
use tracing::error;

/// Reads the GL error flag and reports it against the caller's location.
///
/// Call it after a batch of GL work. A raised flag is logged with the file
/// and line of the call and returned as a [`GlError`]; the flag is cleared
/// either way.
///
/// # Example
///
/// ```rust
/// use glf_shader::{check_error, codes, HeadlessGl};
///
/// let gl = HeadlessGl::new();
/// assert!(check_error(&gl).is_ok());
///
/// gl.raise_error(codes::INVALID_VALUE);
/// let err = check_error(&gl).unwrap_err();
/// assert!(err.to_string().ends_with("Invalid Value"));
/// ```
#[track_caller]
pub fn check_error<A: ShaderApi>(api: &A) -> Result<(), GlError> {
    let caller = Location::caller();
    check_error_at(api, caller.file(), caller.line())
}

/// [`check_error`] with an explicit source location.
pub fn check_error_at<A: ShaderApi>(api: &A, file: &'static str, line: u32) -> Result<(), GlError> {
    let Some(kind) = GlErrorKind::from_code(api.get_error()) else {
        return Ok(());
    };

    let err = GlError { kind, file, line };
    error!("GL Error: {err}");
    Err(err)
}

/// Checks the GL error flag, tagging any error with the invoking file and
/// line.
///
/// ```rust
/// use glf_shader::{gl_check, HeadlessGl};
///
/// let gl = HeadlessGl::new();
/// gl_check!(&gl)?;
/// # Ok::<(), glf_shader::GlError>(())
/// ```
#[macro_export]
macro_rules! gl_check {
    ($api:expr) => {
        $crate::check_error_at($api, file!(), line!())
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{codes, HeadlessGl};

    #[test]
    fn test_no_error() {
        let gl = HeadlessGl::new();
        assert_eq!(check_error(&gl), Ok(()));
    }

    #[test]
    fn test_reports_caller_location() {
        let gl = HeadlessGl::new();
        gl.raise_error(codes::INVALID_OPERATION);

        let line = line!() + 1;
        let err = check_error(&gl).unwrap_err();
        assert_eq!(err.kind, GlErrorKind::InvalidOperation);
        assert_eq!(err.line, line);
        assert!(err.file.ends_with("check.rs"));
    }

    #[test]
    fn test_macro_reports_invocation_line() {
        let gl = HeadlessGl::new();
        gl.raise_error(codes::OUT_OF_MEMORY);

        let line = line!() + 1;
        let err = gl_check!(&gl).unwrap_err();
        assert_eq!(err.kind, GlErrorKind::OutOfMemory);
        assert_eq!(err.line, line);
    }

    #[test]
    fn test_flag_cleared_after_check() {
        let gl = HeadlessGl::new();
        gl.raise_error(0x9242);
        assert_eq!(check_error(&gl).unwrap_err().kind, GlErrorKind::Unknown(0x9242));
        assert!(check_error(&gl).is_ok());
    }
}
