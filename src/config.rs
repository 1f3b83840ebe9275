use std::path::PathBuf;

use clap::{Parser, ValueEnum};

pub const DEFAULT_SCAN_ROOT: &str = ".";
pub const DEFAULT_OUTPUT: &str = "kernels.h";
pub const DEFAULT_EXTENSION: &str = "ocl";

/// How source content is turned into a C++ string literal.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Embedding {
  /// Raw string literal, with a delimiter picked so the content can't close it early
  #[default]
  Verbatim,
  /// Ordinary string literal with every special byte escaped
  Escaped,
}

/// Embed kernel sources into a generated C++ header
#[derive(Parser, Debug, Clone)]
#[command(name = "kernel-header", version, about)]
pub struct Config {
  /// Directory scanned for kernel sources (not recursive)
  #[arg(long, default_value = DEFAULT_SCAN_ROOT)]
  pub scan_root: PathBuf,

  /// Header to write, overwritten on every run
  #[arg(short, long, default_value = DEFAULT_OUTPUT)]
  pub output: PathBuf,

  /// Extension of the files to embed, without the leading dot
  #[arg(long, default_value = DEFAULT_EXTENSION)]
  pub extension: String,

  /// Order declarations by file name instead of directory listing order
  #[arg(long)]
  pub sort: bool,

  /// Literal form used for the embedded content
  #[arg(long, value_enum, default_value_t = Embedding::Verbatim)]
  pub embedding: Embedding,

  /// Enable debug logging
  #[arg(short, long)]
  pub verbose: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      scan_root: PathBuf::from(DEFAULT_SCAN_ROOT),
      output: PathBuf::from(DEFAULT_OUTPUT),
      extension: DEFAULT_EXTENSION.to_string(),
      sort: false,
      embedding: Embedding::default(),
      verbose: false,
    }
  }
}

impl Config {
  /// Config rooted at `scan_root`, with the header written inside it.
  pub fn in_dir(scan_root: impl Into<PathBuf>) -> Self {
    let scan_root = scan_root.into();
    Self {
      output: scan_root.join(DEFAULT_OUTPUT),
      scan_root,
      ..Self::default()
    }
  }

  /// File name suffix matched during the scan, e.g. `.ocl`.
  pub fn suffix(&self) -> String {
    format!(".{}", self.extension.trim_start_matches('.'))
  }
}
