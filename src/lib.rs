//! Compose a C++ header that embeds every kernel source of a directory as a
//! named string constant.
//!
//! The binary runs with no arguments: it scans the current directory for
//! `*.ocl` files and writes `kernels.h` next to them. Build scripts can call
//! [`compose`] with their own [`Config`] instead.

use std::path::PathBuf;

use thiserror::Error;

pub mod config;
pub mod declaration;
pub mod header;
pub mod logging;
pub mod scan;

pub use config::{Config, Embedding};
pub use declaration::{Declaration, Literal, render_declaration};
pub use header::{GUARD, compose, compose_header};
pub use scan::enumerate;

#[derive(Error, Debug)]
pub enum ComposeError {
  #[error("Failed to list scan root {path}: {source}")]
  ScanRoot {
    path: PathBuf,
    source: walkdir::Error,
  },

  #[error("Scan root is not a directory: {path}")]
  NotADirectory { path: PathBuf },

  #[error("Failed to read source {path}: {source}")]
  ReadSource {
    path: PathBuf,
    source: std::io::Error,
  },

  #[error("Failed to write header {path}: {source}")]
  WriteHeader {
    path: PathBuf,
    source: std::io::Error,
  },

  #[error("Cannot derive an identifier from file name: {path}")]
  InvalidFileName { path: PathBuf },
}
