use miette::Diagnostic;
use std::{fs, io::Write, path::Path};
use thiserror::Error;

use crate::errors::{FileOperation, IoError};

#[derive(Debug, Error, Diagnostic)]
pub enum IgnoreError {
    #[error("I/O error while updating the ignore file")]
    #[diagnostic(code(vinnig::ignore::io))]
    Io(#[from] IoError),
}

/// Appends each required line that is not already present in the ignore
/// file. Idempotent per line.
///
/// When the file does not exist, this is a no-op: the updater never creates
/// an ignore file. A read failure is reported and the update is abandoned
/// for this run; only an append failure is fatal.
pub fn update_ignore_file(path: &Path, required_lines: &[String]) -> Result<(), IgnoreError> {
    if !path.exists() {
        log::debug!("no ignore file at {}, skipping", path.display());

        return Ok(());
    }

    let existing = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) => {
            let report = IoError::new(FileOperation::Read, path.to_path_buf(), error);
            log::error!("{}", report);

            return Ok(());
        }
    };

    // TODO: compare whole lines; a required line that is a substring of
    // unrelated text is currently treated as already present
    let missing: Vec<&String> = required_lines
        .iter()
        .filter(|line| !existing.contains(line.as_str()))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    let mut file = fs::OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|error| IoError::new(FileOperation::Append, path.to_path_buf(), error))?;

    for line in missing {
        write!(file, "\n{}", line)
            .map_err(|error| IoError::new(FileOperation::Append, path.to_path_buf(), error))?;

        log::debug!("appended '{}' to {}", line, path.display());
    }

    Ok(())
}
