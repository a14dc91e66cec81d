use std::{fs, path::Path};

use crate::{
    config::{self, Config},
    ensure,
    errors::{FileOperation, IoError},
    ignore,
    materialize::{self, RunReport},
};

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum VinnigError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Ensure(#[from] ensure::EnsureError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Materialize(#[from] materialize::MaterializeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Ignore(#[from] ignore::IgnoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),
}

/// Runs the full pipeline: ensure the target directory exists, materialize
/// every configured entry under it, then add the generator's required lines
/// to the ignore file.
///
/// The stages run strictly in that order; per-entry suffix rejections are
/// recorded in the returned [`RunReport`] rather than surfaced as errors.
///
/// # Errors
///
/// Returns a [`VinnigError`] if:
///
/// - A target-directory segment exists as a non-directory file.
/// - A directory or file cannot be created or written to.
/// - Appending to the ignore file fails.
pub fn run(config: &Config) -> Result<RunReport, VinnigError> {
    let target_root = ensure::ensure_directory(&config.target_root())?;

    log::debug!("target directory ready: {}", target_root.display());

    let report = materialize::create_entries(config, &target_root)?;

    ignore::update_ignore_file(&config.ignore_path(), &config.ignore.required_lines)?;

    Ok(report)
}

/// Returns the names of the entries currently present in `directory`,
/// non-recursively.
///
/// # Errors
///
/// Returns a [`VinnigError`] if the directory cannot be read.
pub fn list_existing_files(directory: &Path) -> Result<Vec<String>, VinnigError> {
    let read_dir = fs::read_dir(directory)
        .map_err(|error| IoError::new(FileOperation::Read, directory.to_path_buf(), error))?;

    let mut names = Vec::new();

    for entry in read_dir {
        let entry = entry
            .map_err(|error| IoError::new(FileOperation::Read, directory.to_path_buf(), error))?;

        names.push(entry.file_name().to_string_lossy().into_owned());
    }

    Ok(names)
}
