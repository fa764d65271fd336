//! Asset sources feeding the index.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::IndexError;

/// Raw asset contents keyed by asset name.
pub type AssetContents = BTreeMap<String, Vec<u8>>;

/// Trait describing where asset bytes come from.
pub trait AssetSource {
  /// Read every asset exposed by the source.
  fn read_assets(&self) -> Result<AssetContents, IndexError>;
}

/// Flat directory source: every regular file directly inside `root` is an asset.
///
/// Hidden files, subdirectories and names that are not valid UTF-8 are skipped, since the
/// asset namespace is a single level of plain names.
#[derive(Debug, Clone)]
pub struct DirectorySource {
  root: PathBuf,
}

impl DirectorySource {
  /// Create a source reading from `root`.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// Directory the source reads from.
  pub fn root(&self) -> &Path {
    &self.root
  }
}

impl AssetSource for DirectorySource {
  fn read_assets(&self) -> Result<AssetContents, IndexError> {
    let read_dir_error = |source| IndexError::ReadDir {
      path: self.root.clone(),
      source,
    };

    let mut assets = AssetContents::new();
    for entry in fs::read_dir(&self.root).map_err(read_dir_error)? {
      let entry = entry.map_err(read_dir_error)?;
      let path = entry.path();
      let file_name = entry.file_name();
      let Some(name) = file_name.to_str() else {
        tracing::trace!(path = %path.display(), "skipping non UTF-8 file name");
        continue;
      };
      if name.starts_with('.') {
        continue;
      }

      // Follows symlinks, unlike `DirEntry::file_type`.
      let metadata = fs::metadata(&path).map_err(|source| IndexError::ReadFile {
        path: path.clone(),
        source,
      })?;
      if !metadata.is_file() {
        tracing::trace!(path = %path.display(), "skipping non-file entry");
        continue;
      }

      let content = fs::read(&path).map_err(|source| IndexError::ReadFile {
        path: path.clone(),
        source,
      })?;
      assets.insert(name.to_string(), content);
    }

    Ok(assets)
  }
}

/// In-memory source, useful for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
  assets: AssetContents,
}

impl MemorySource {
  /// Create an empty source.
  pub fn new() -> Self {
    Self::default()
  }

  /// Add an asset, replacing any previous asset with the same name.
  pub fn with_asset(mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
    self.assets.insert(name.into(), content.into());
    self
  }
}

impl<N: Into<String>, C: Into<Vec<u8>>> FromIterator<(N, C)> for MemorySource {
  fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
    Self {
      assets: iter
        .into_iter()
        .map(|(name, content)| (name.into(), content.into()))
        .collect(),
    }
  }
}

impl AssetSource for MemorySource {
  fn read_assets(&self) -> Result<AssetContents, IndexError> {
    Ok(self.assets.clone())
  }
}
