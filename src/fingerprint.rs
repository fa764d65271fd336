//! Combined digests and filename formatting.

use std::num::NonZeroUsize;

use crate::digest::{DigestFunction, HashStore};
use crate::resolver::SourceSet;

/// Prefix shared by every generated filename.
pub const FILENAME_PREFIX: &str = "asset";

/// Digest representing a whole source set.
///
/// Digests are sorted before combining so the result only depends on the set of constituent
/// digests. A single source keeps its own digest. Sources without a stored digest are skipped.
pub fn combined_digest(
  sources: &SourceSet,
  hashes: &HashStore,
  digest: &dyn DigestFunction,
) -> String {
  let mut digests: Vec<&str> = sources
    .iter()
    .filter_map(|name| hashes.digest_of(name))
    .collect();
  digests.sort_unstable();

  match digests.as_slice() {
    [single] => (*single).to_string(),
    all => digest.digest(all.concat().as_bytes()),
  }
}

/// Shorten `digest` to `hash_length` characters, keeping it whole when unset or longer.
pub fn truncate_digest(digest: &str, hash_length: Option<NonZeroUsize>) -> &str {
  match hash_length {
    Some(length) => digest.get(..length.get()).unwrap_or(digest),
    None => digest,
  }
}

/// Format the cache-busting filename `asset-<digest>-<target>`.
pub fn format_file_name(target: &str, digest: &str) -> String {
  format!("{FILENAME_PREFIX}-{digest}-{target}")
}

/// Fingerprinted filename for `target` backed by `sources`.
pub fn file_name_for(
  target: &str,
  sources: &SourceSet,
  hashes: &HashStore,
  digest: &dyn DigestFunction,
  hash_length: Option<NonZeroUsize>,
) -> String {
  let combined = combined_digest(sources, hashes, digest);
  format_file_name(target, truncate_digest(&combined, hash_length))
}
