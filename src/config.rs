use miette::Diagnostic;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::errors::{FileOperation, IoError};
use crate::utils::normalize_path;

/// Name of the optional configuration override file. Doubles as the line the
/// generator appends to the ignore file, so the manifest itself stays out of
/// version control.
pub const CONFIG_FILE_NAME: &str = "vinnig.toml";

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("I/O error within config domain")]
    #[diagnostic(code(vinnig::config::io))]
    Io(#[from] IoError),

    #[error("Unable to parse toml file at '{path}': {source}")]
    #[diagnostic(code(vinnig::config::parse_toml), help("Review toml file"))]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// One entry of the skeleton: a file when `suffix` is non-empty, a directory
/// otherwise.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileSpec {
    pub name: String,
    pub suffix: String,
    pub content: String,
}
impl FileSpec {
    pub fn is_directory(&self) -> bool {
        self.suffix.is_empty()
    }

    /// Entry name as it appears on disk: `name.suffix` for files, `name` for
    /// directories.
    pub fn entry_name(&self) -> String {
        if self.is_directory() {
            self.name.clone()
        } else {
            format!("{}.{}", self.name, self.suffix)
        }
    }
}
impl Default for FileSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            suffix: String::new(),
            content: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IgnoreSpec {
    pub ignore_file: String,
    pub required_lines: Vec<String>,
}
impl Default for IgnoreSpec {
    fn default() -> Self {
        Self {
            ignore_file: ".gitignore".to_string(),
            required_lines: vec![CONFIG_FILE_NAME.to_string()],
        }
    }
}

/// Immutable run configuration. Built once at startup, passed by reference
/// into every stage.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root everything else is resolved against.
    pub base_dir: String,
    /// Directory the skeleton is materialized under, relative to `base_dir`.
    /// A trailing separator is accepted and normalized away.
    pub target_dir: String,
    pub files: Vec<FileSpec>,
    pub ignore: IgnoreSpec,
    /// Permitted file suffixes. Entries may be written with or without a
    /// leading dot.
    pub extensions: Vec<String>,
    /// Opt-in legacy matching rule: an allow-list entry that merely contains
    /// the suffix as a substring counts as a match. Off by default.
    pub substring_extension_match: bool,
    /// Gates the per-entry create/exists console lines.
    pub debug: bool,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: "./".to_string(),
            target_dir: "app/public".to_string(),
            files: default_skeleton(),
            ignore: IgnoreSpec::default(),
            extensions: vec![".js".to_string(), ".scss".to_string(), ".html".to_string()],
            substring_extension_match: false,
            debug: true,
        }
    }
}
impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .map_err(|error| IoError::new(FileOperation::Read, path.to_path_buf(), error))?;

        let parsed = toml::from_str(&content).map_err(|error| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source: error,
        })?;

        Ok(parsed)
    }

    /// Joined and normalized `base_dir` + `target_dir`. Both the trailing
    /// separator form (`app/public/`) and the bare form (`app/public`)
    /// resolve to the identical path.
    pub fn target_root(&self) -> PathBuf {
        normalize_path(&Path::new(&self.base_dir).join(&self.target_dir))
    }

    /// Location of the ignore file, relative to `base_dir`.
    pub fn ignore_path(&self) -> PathBuf {
        normalize_path(&Path::new(&self.base_dir).join(&self.ignore.ignore_file))
    }

    pub fn allows_suffix(&self, suffix: &str) -> bool {
        if self.substring_extension_match {
            self.extensions.iter().any(|entry| entry.contains(suffix))
        } else {
            let wanted = suffix.trim_start_matches('.');
            self.extensions
                .iter()
                .any(|entry| entry.trim_start_matches('.') == wanted)
        }
    }
}

fn default_skeleton() -> Vec<FileSpec> {
    vec![
        FileSpec {
            name: "index".to_string(),
            suffix: "html".to_string(),
            content: "<!DOCTYPE html>\n\
                      <html lang='en'>\n\
                      <meta charset='UTF-8'>\n\
                      <title>Document</title>\n\
                      <meta name='keywords' content='keywords'>\n\
                      <meta name='description' content='description'>\n\
                      <meta name='format-detection' content='telephone=no'>\n\
                      <body></body>\n\
                      </html>"
                .to_string(),
        },
        FileSpec {
            name: "index".to_string(),
            suffix: "js".to_string(),
            // ${USER} and ${DATE} are written literally; there is no
            // substitution pass.
            content: "/**\n* @author ${USER}\n* @date ${DATE}\n*/\n\n'use strict';".to_string(),
        },
        FileSpec {
            name: "index".to_string(),
            suffix: "scss".to_string(),
            content: "@charset 'UTF-8';\n".to_string(),
        },
        FileSpec {
            name: "images".to_string(),
            suffix: String::new(),
            content: String::new(),
        },
    ]
}
