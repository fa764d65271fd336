//! Flat name → content mapping built once from an asset source.

use crate::error::IndexError;
use crate::source::{AssetContents, AssetSource};

/// Immutable index of every asset exposed by a source.
#[derive(Debug, Clone, Default)]
pub struct AssetIndex {
  assets: AssetContents,
}

impl AssetIndex {
  /// Read the source once and index its assets.
  pub fn build(source: &dyn AssetSource) -> Result<Self, IndexError> {
    let assets = source.read_assets()?;
    tracing::debug!(assets = assets.len(), "indexed assets");
    Ok(Self { assets })
  }

  /// Returns `true` when an asset with this exact name exists.
  pub fn has(&self, name: &str) -> bool {
    self.assets.contains_key(name)
  }

  /// Raw content of an asset.
  pub fn get(&self, name: &str) -> Option<&[u8]> {
    self.assets.get(name).map(Vec::as_slice)
  }

  /// Asset names in sorted order.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.assets.keys().map(String::as_str)
  }

  /// Iterate `(name, content)` pairs in name order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
    self
      .assets
      .iter()
      .map(|(name, content)| (name.as_str(), content.as_slice()))
  }

  /// Number of indexed assets.
  pub fn len(&self) -> usize {
    self.assets.len()
  }

  /// Returns `true` when the source exposed no assets.
  pub fn is_empty(&self) -> bool {
    self.assets.is_empty()
  }
}
