//! Fingerprint configuration loaded from `fingerprint.config.json`.

use std::collections::BTreeMap;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::resolver::IncludeSpec;

/// Default configuration file name searched for in asset directories.
pub const DEFAULT_CONFIG_FILE: &str = "fingerprint.config.json";

/// Settings applied uniformly to every generated filename.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FingerprintConfig {
  /// Number of digest characters kept in filenames; the full digest when unset.
  pub hash_length: Option<NonZeroUsize>,
  /// Bundles to define up front, keyed by target name.
  pub bundles: BTreeMap<String, IncludeSpec>,
}

/// Errors that can occur while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// Failed to read the configuration file from disk.
  #[error("failed to read {}: {source}", path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: std::io::Error,
  },
  /// Failed to parse the JSON configuration file.
  #[error("failed to parse {}: {source}", path.display())]
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    #[source]
    source: serde_json::Error,
  },
}

impl FingerprintConfig {
  /// Configuration with a fixed hash length and no bundles.
  pub fn with_hash_length(hash_length: usize) -> Self {
    Self {
      hash_length: NonZeroUsize::new(hash_length),
      ..Self::default()
    }
  }

  /// Load configuration from `dir`, falling back to defaults when it is missing or invalid.
  pub fn discover(dir: &Path) -> Self {
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    Self::load_from_path(&candidate).unwrap_or_else(|err| {
      tracing::warn!("{err}; using default configuration");
      Self::default()
    })
  }

  /// Read configuration from a specific JSON file.
  ///
  /// A missing file is not an error and yields the default configuration.
  pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
      Ok(contents) => contents,
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
        return Ok(Self::default());
      }
      Err(err) => {
        return Err(ConfigError::Io {
          path: path.to_path_buf(),
          source: err,
        });
      }
    };

    serde_json::from_str(&contents).map_err(|err| ConfigError::Parse {
      path: path.to_path_buf(),
      source: err,
    })
  }
}
