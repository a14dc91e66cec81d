use colored::Colorize;
use indexmap::IndexMap;
use miette::Diagnostic;
use std::{fs, path::Path};
use thiserror::Error;

use crate::config::{Config, FileSpec};
use crate::errors::{FileOperation, IoError};

#[derive(Debug, Error, Diagnostic)]
pub enum MaterializeError {
    #[error("I/O error while materializing entries")]
    #[diagnostic(code(vinnig::materialize::io))]
    Io(#[from] IoError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    Created,
    AlreadyExists,
    RejectedExtension,
}

/// Per-entry outcomes of one run, keyed by entry name in configuration
/// order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub entries: IndexMap<String, EntryOutcome>,
}
impl RunReport {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn count(&self, outcome: EntryOutcome) -> usize {
        self.entries
            .values()
            .filter(|recorded| **recorded == outcome)
            .count()
    }
}

/// Materializes every [`FileSpec`] under `target_root`, in configuration
/// order. Entries are independent: a rejected suffix is recorded and
/// reported but never aborts the batch. Existing targets are never
/// overwritten.
///
/// `target_root` must already exist; the directory ensurer runs first.
///
/// # Errors
///
/// Returns a [`MaterializeError`] only for underlying I/O failures, which
/// are fatal for the run.
pub fn create_entries(config: &Config, target_root: &Path) -> Result<RunReport, MaterializeError> {
    let mut report = RunReport::new();

    for spec in &config.files {
        let entry_name = spec.entry_name();
        let path = target_root.join(&entry_name);

        let outcome = if spec.is_directory() {
            create_directory_entry(config, &path)?
        } else {
            create_file_entry(config, spec, &path)?
        };

        report.entries.insert(entry_name, outcome);
    }

    Ok(report)
}

fn create_directory_entry(config: &Config, path: &Path) -> Result<EntryOutcome, MaterializeError> {
    if path.exists() {
        if config.debug {
            println!("{} {}", "exists".yellow(), path.display());
        }

        return Ok(EntryOutcome::AlreadyExists);
    }

    fs::create_dir(path)
        .map_err(|error| IoError::new(FileOperation::Mkdir, path.to_path_buf(), error))?;

    if config.debug {
        println!("{} {}", "create".green(), path.display());
    }

    Ok(EntryOutcome::Created)
}

fn create_file_entry(
    config: &Config,
    spec: &FileSpec,
    path: &Path,
) -> Result<EntryOutcome, MaterializeError> {
    // existence wins over the allow-list check: a pre-existing file is
    // never re-validated
    if path.exists() {
        if config.debug {
            println!("{} {}", "exists".yellow(), path.display());
        }

        return Ok(EntryOutcome::AlreadyExists);
    }

    if !config.allows_suffix(&spec.suffix) {
        eprintln!("{} .{} suffix is not allowed", "reject".red(), spec.suffix);

        return Ok(EntryOutcome::RejectedExtension);
    }

    fs::write(path, &spec.content)
        .map_err(|error| IoError::new(FileOperation::Write, path.to_path_buf(), error))?;

    if config.debug {
        println!("{} {}", "create".green(), path.display());
    }

    Ok(EntryOutcome::Created)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skeleton_config() -> Config {
        Config {
            files: vec![
                FileSpec {
                    name: "index".to_string(),
                    suffix: "html".to_string(),
                    content: "<html></html>".to_string(),
                },
                FileSpec {
                    name: "images".to_string(),
                    suffix: String::new(),
                    content: String::new(),
                },
            ],
            debug: false,
            ..Config::default()
        }
    }

    #[test]
    fn test_creates_files_and_directories() {
        let root = tempfile::tempdir().unwrap();
        let config = skeleton_config();

        let report = create_entries(&config, root.path()).unwrap();

        assert_eq!(report.entries["index.html"], EntryOutcome::Created);
        assert_eq!(report.entries["images"], EntryOutcome::Created);
        assert_eq!(
            fs::read_to_string(root.path().join("index.html")).unwrap(),
            "<html></html>"
        );
        assert!(root.path().join("images").is_dir());
    }

    #[test]
    fn test_never_overwrites_an_existing_file() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("index.html"), "hand edited").unwrap();
        let config = skeleton_config();

        let report = create_entries(&config, root.path()).unwrap();

        assert_eq!(report.entries["index.html"], EntryOutcome::AlreadyExists);
        assert_eq!(
            fs::read_to_string(root.path().join("index.html")).unwrap(),
            "hand edited"
        );
    }

    #[test]
    fn test_second_run_reports_every_entry_as_existing() {
        let root = tempfile::tempdir().unwrap();
        let config = skeleton_config();

        create_entries(&config, root.path()).unwrap();
        let second = create_entries(&config, root.path()).unwrap();

        assert_eq!(second.count(EntryOutcome::Created), 0);
        assert_eq!(second.count(EntryOutcome::AlreadyExists), 2);
    }

    #[test]
    fn test_rejected_suffix_skips_the_entry_but_not_the_batch() {
        let root = tempfile::tempdir().unwrap();
        let mut config = skeleton_config();
        config.files.insert(
            0,
            FileSpec {
                name: "index".to_string(),
                suffix: "css".to_string(),
                content: "body {}".to_string(),
            },
        );

        let report = create_entries(&config, root.path()).unwrap();

        assert_eq!(report.entries["index.css"], EntryOutcome::RejectedExtension);
        assert!(!root.path().join("index.css").exists());
        // the remaining entries still completed
        assert_eq!(report.entries["index.html"], EntryOutcome::Created);
        assert!(root.path().join("images").is_dir());
    }

    #[test]
    fn test_existing_file_with_disallowed_suffix_logs_exists_not_reject() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("index.css"), "body {}").unwrap();
        let mut config = skeleton_config();
        config.files = vec![FileSpec {
            name: "index".to_string(),
            suffix: "css".to_string(),
            content: String::new(),
        }];

        let report = create_entries(&config, root.path()).unwrap();

        assert_eq!(report.entries["index.css"], EntryOutcome::AlreadyExists);
    }
}
