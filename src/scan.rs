use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::ComposeError;

/// Lists the regular files directly inside `scan_root` whose name ends with
/// `suffix`, in directory listing order.
///
/// Symlinks are followed when deciding whether an entry is a regular file, so
/// a link to a kernel source is embedded while links to directories or
/// dangling links are skipped. Subdirectories are never descended into.
pub fn enumerate(scan_root: &Path, suffix: &str) -> Result<Vec<PathBuf>, ComposeError> {
  let mut paths = Vec::new();

  for entry in WalkDir::new(scan_root).max_depth(1) {
    let entry = entry.map_err(|source| ComposeError::ScanRoot {
      path: scan_root.to_path_buf(),
      source,
    })?;

    if entry.depth() == 0 {
      if !entry.file_type().is_dir() {
        return Err(ComposeError::NotADirectory {
          path: scan_root.to_path_buf(),
        });
      }
      continue;
    }

    if !entry
      .file_name()
      .as_encoded_bytes()
      .ends_with(suffix.as_bytes())
    {
      continue;
    }

    if !entry.path().is_file() {
      tracing::debug!(path = %entry.path().display(), "skipping, not a regular file");
      continue;
    }

    paths.push(entry.into_path());
  }

  Ok(paths)
}

/// Orders paths by file name, for output that doesn't depend on the filesystem.
pub fn sort_by_file_name(paths: &mut [PathBuf]) {
  paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::TempDir;

  fn names(paths: &[PathBuf]) -> Vec<String> {
    let mut names: Vec<String> = paths
      .iter()
      .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
      .collect();
    names.sort();
    names
  }

  #[test]
  fn test_enumerate_filters_extension_and_file_type() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("add.ocl"), "a+b").unwrap();
    fs::write(dir.path().join("sub.ocl"), "a-b").unwrap();
    fs::write(dir.path().join("notes.txt"), "not a kernel").unwrap();
    fs::write(dir.path().join("mul.ocl.bak"), "backup").unwrap();
    fs::write(dir.path().join("ocl"), "no dot").unwrap();
    fs::create_dir(dir.path().join("nested.ocl")).unwrap();
    fs::write(dir.path().join("nested.ocl").join("deep.ocl"), "deep").unwrap();

    let paths = enumerate(dir.path(), ".ocl").unwrap();

    assert_eq!(names(&paths), vec!["add.ocl", "sub.ocl"]);
    assert!(paths.iter().all(|p| p.parent() == Some(dir.path())));
  }

  #[test]
  fn test_enumerate_custom_suffix() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("add.ocl"), "a+b").unwrap();
    fs::write(dir.path().join("saxpy.cl"), "kernel").unwrap();

    let paths = enumerate(dir.path(), ".cl").unwrap();
    assert_eq!(names(&paths), vec!["saxpy.cl"]);
  }

  #[test]
  fn test_enumerate_empty_directory() {
    let dir = TempDir::new().unwrap();
    assert!(enumerate(dir.path(), ".ocl").unwrap().is_empty());
  }

  #[cfg(unix)]
  #[test]
  fn test_enumerate_symlinks() {
    use std::os::unix::fs::symlink;

    let dir = TempDir::new().unwrap();
    let outside = TempDir::new().unwrap();
    fs::write(outside.path().join("real.ocl"), "real").unwrap();
    fs::create_dir(outside.path().join("dir")).unwrap();

    symlink(outside.path().join("real.ocl"), dir.path().join("linked.ocl")).unwrap();
    symlink(outside.path().join("dir"), dir.path().join("dirlink.ocl")).unwrap();
    symlink(outside.path().join("missing"), dir.path().join("dangling.ocl")).unwrap();

    let paths = enumerate(dir.path(), ".ocl").unwrap();
    assert_eq!(names(&paths), vec!["linked.ocl"]);
  }

  #[test]
  fn test_enumerate_missing_root() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");

    let result = enumerate(&missing, ".ocl");
    assert!(matches!(result, Err(ComposeError::ScanRoot { .. })));

    if let Err(ComposeError::ScanRoot { path, .. }) = result {
      assert_eq!(path, missing);
    }
  }

  #[test]
  fn test_enumerate_file_root() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("add.ocl");
    fs::write(&file, "a+b").unwrap();

    let result = enumerate(&file, ".ocl");
    assert!(matches!(result, Err(ComposeError::NotADirectory { .. })));
  }

  #[test]
  fn test_sort_by_file_name() {
    let mut paths = vec![
      PathBuf::from("x/sub.ocl"),
      PathBuf::from("y/add.ocl"),
      PathBuf::from("mul.ocl"),
    ];
    sort_by_file_name(&mut paths);

    assert_eq!(
      paths,
      vec![
        PathBuf::from("y/add.ocl"),
        PathBuf::from("mul.ocl"),
        PathBuf::from("x/sub.ocl"),
      ]
    );
  }
}
