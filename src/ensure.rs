use miette::Diagnostic;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::errors::{FileOperation, IoError};
use crate::utils::normalize_path;

#[derive(Debug, Error, Diagnostic)]
pub enum EnsureError {
    #[error("I/O error while preparing the target directory")]
    #[diagnostic(code(vinnig::ensure::io))]
    Io(#[from] IoError),

    #[error("'{path}' exists but is not a directory")]
    #[diagnostic(
        code(vinnig::ensure::not_a_directory),
        help("Move or rename the conflicting file, then rerun.")
    )]
    NotADirectory { path: PathBuf },
}

/// Creates every missing component of `path`, left to right, and returns the
/// normalized path. Idempotent: segments that already exist as directories
/// are left alone.
///
/// The whole argument is taken to be a directory path, dotted names
/// included; `.` and `..` markers are resolved before walking.
///
/// # Errors
///
/// Returns [`EnsureError::NotADirectory`] if an intermediate segment exists
/// as a non-directory file, or an I/O error if a segment cannot be created.
pub fn ensure_directory(path: &Path) -> Result<PathBuf, EnsureError> {
    let normalized = normalize_path(path);

    let mut accumulated = PathBuf::new();
    for component in normalized.components() {
        accumulated.push(component.as_os_str());

        if accumulated.exists() {
            if !accumulated.is_dir() {
                return Err(EnsureError::NotADirectory { path: accumulated });
            }
        } else {
            fs::create_dir(&accumulated).map_err(|error| {
                IoError::new(FileOperation::Mkdir, accumulated.clone(), error)
            })?;

            log::debug!("created directory: {}", accumulated.display());
        }
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_nested_directories() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("app").join("public");

        let created = ensure_directory(&target).unwrap();

        assert!(created.is_dir());
        assert!(root.path().join("app").is_dir());
    }

    #[test]
    fn test_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("app").join("public");

        ensure_directory(&target).unwrap();
        let second = ensure_directory(&target);

        assert!(second.is_ok());
        assert!(target.is_dir());
    }

    #[test]
    fn test_creates_dotted_directory_names() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("app").join("v1.2");

        ensure_directory(&target).unwrap();

        assert!(target.is_dir());
    }

    #[test]
    fn test_refuses_when_a_segment_is_a_file() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("app");
        fs::write(&blocker, "not a directory").unwrap();

        let error = ensure_directory(&blocker.join("public")).unwrap_err();

        assert!(matches!(error, EnsureError::NotADirectory { path } if path == blocker));
    }
}
