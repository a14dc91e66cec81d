/// Public entry points and the top-level error type.
pub mod api;

/// Configuration types and the optional `vinnig.toml` loader.
pub mod config;

/// Target-directory creation.
pub mod ensure;

/// Shared structured I/O errors.
pub mod errors;

/// Version-control ignore-file updates.
pub mod ignore;

/// Turns file specs into directories and files on disk.
pub mod materialize;

/// Path helpers.
pub mod utils;
