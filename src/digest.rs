//! Pluggable content digests and the per-asset hash store.

use std::collections::BTreeMap;

use md5::Md5;
use sha2::{Digest, Sha256};

use crate::index::AssetIndex;

/// Pure function turning bytes into a fixed-length lowercase hex digest.
pub trait DigestFunction {
  /// Digest the provided bytes.
  fn digest(&self, bytes: &[u8]) -> String;
}

impl<F> DigestFunction for F
where
  F: Fn(&[u8]) -> String,
{
  fn digest(&self, bytes: &[u8]) -> String {
    self(bytes)
  }
}

/// MD5 digest, 32 hex characters. The default.
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5Digest;

impl DigestFunction for Md5Digest {
  fn digest(&self, bytes: &[u8]) -> String {
    hex::encode(Md5::digest(bytes))
  }
}

/// SHA-256 digest, 64 hex characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Digest;

impl DigestFunction for Sha256Digest {
  fn digest(&self, bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
  }
}

/// Digest of every indexed asset, computed once.
#[derive(Debug, Clone, Default)]
pub struct HashStore {
  digests: BTreeMap<String, String>,
}

impl HashStore {
  /// Digest the content of every asset in the index.
  pub fn compute_all(index: &AssetIndex, digest: &dyn DigestFunction) -> Self {
    let digests: BTreeMap<String, String> = index
      .iter()
      .map(|(name, content)| (name.to_string(), digest.digest(content)))
      .collect();
    tracing::debug!(assets = digests.len(), "hashed assets");
    Self { digests }
  }

  /// Digest previously computed for `name`.
  pub fn digest_of(&self, name: &str) -> Option<&str> {
    self.digests.get(name).map(String::as_str)
  }

  /// Number of stored digests.
  pub fn len(&self) -> usize {
    self.digests.len()
  }

  /// Returns `true` when no digests are stored.
  pub fn is_empty(&self) -> bool {
    self.digests.is_empty()
  }
}
