//! Shader source loading.

use crate::{ShaderError, ShaderResult};
use std::fs;
use std::path::Path;
use tracing::{debug, error};

/// Reads a whole GLSL source file.
///
/// A missing, unreadable, or empty file is an error; the failure is also
/// logged so it shows up next to any later GL diagnostics.
pub fn read_shader_source(path: impl AsRef<Path>) -> ShaderResult<String> {
    let path = path.as_ref();

    let source = fs::read_to_string(path).map_err(|source| {
        error!("Failed to open '{}'.", path.display());
        ShaderError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;

    if source.is_empty() {
        error!("Shader source '{}' is empty.", path.display());
        return Err(ShaderError::EmptySource(path.to_path_buf()));
    }

    debug!("read {} bytes from {}", source.len(), path.display());
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_source() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("flat.frag");
        fs::write(&path, "void main() {}\n").unwrap();

        assert_eq!(read_shader_source(&path).unwrap(), "void main() {}\n");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_shader_source(dir.path().join("missing.vert")).unwrap_err();
        assert!(matches!(err, ShaderError::Io { .. }));
        assert!(err.to_string().contains("missing.vert"));
    }

    #[test]
    fn test_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.vert");
        fs::write(&path, "").unwrap();

        assert!(matches!(
            read_shader_source(&path),
            Err(ShaderError::EmptySource(p)) if p == path
        ));
    }
}
