use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::declaration::render_declaration;
use crate::scan::{enumerate, sort_by_file_name};
use crate::{ComposeError, Config, Embedding};

/// First bytes of every generated header.
pub const GUARD: &str = "#pragma once\n\n";

/// Writes the header for `sources` to `destination`, replacing whatever was
/// there. Declarations follow the order of `sources`.
///
/// Nothing is rolled back on failure: a source that can't be read leaves the
/// header holding the declarations written up to that point.
pub fn compose_header(
  destination: &Path,
  sources: &[PathBuf],
  embedding: Embedding,
) -> Result<(), ComposeError> {
  let write_err = |source| ComposeError::WriteHeader {
    path: destination.to_path_buf(),
    source,
  };

  let mut out = BufWriter::new(File::create(destination).map_err(write_err)?);
  out.write_all(GUARD.as_bytes()).map_err(write_err)?;

  let mut seen = HashSet::with_capacity(sources.len());
  for source in sources {
    let declaration = render_declaration(source, embedding)?;
    if !seen.insert(declaration.identifier.clone()) {
      tracing::warn!(
        path = %source.display(),
        identifier = %declaration.identifier,
        "identifier declared more than once"
      );
    }

    declaration.write_to(&mut out).map_err(write_err)?;
  }

  out.flush().map_err(write_err)?;
  Ok(())
}

/// Scans `config.scan_root` and writes `config.output`, returning the
/// embedded sources in output order.
///
/// The scan runs before the destination is opened, so a bad scan root leaves
/// any existing header untouched.
pub fn compose(config: &Config) -> Result<Vec<PathBuf>, ComposeError> {
  let mut sources = enumerate(&config.scan_root, &config.suffix())?;
  if config.sort {
    sort_by_file_name(&mut sources);
  }

  tracing::debug!(
    root = %config.scan_root.display(),
    count = sources.len(),
    "found kernel sources"
  );

  compose_header(&config.output, &sources, config.embedding)?;
  Ok(sources)
}
