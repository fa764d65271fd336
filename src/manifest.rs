//! Serializable summary mapping asset names to their fingerprinted filenames.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::manager::{AssetManager, AssetOptions};
use crate::resolver::IncludeSpec;

/// Fingerprinted filenames for every asset and bundle a build knows about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintManifest {
  /// Digest truncation length, omitted when full digests are used.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub hash_length: Option<usize>,
  /// Asset or bundle name mapped to its generated filename.
  pub assets: BTreeMap<String, String>,
}

/// Manifest produced for a build together with the number of failures reported.
#[derive(Debug, Clone, Default)]
pub struct ManifestOutcome {
  /// Successfully fingerprinted names.
  pub manifest: FingerprintManifest,
  /// Number of names that failed to resolve and were reported on the error channel.
  pub failures: usize,
}

/// Fingerprint every indexed asset, then every bundle in `bundles`.
///
/// Failures are reported through the manager's error observers and left out of the manifest,
/// so a build can collect every problem before deciding whether to stop.
pub fn build_manifest(
  manager: &mut AssetManager,
  bundles: &BTreeMap<String, IncludeSpec>,
) -> ManifestOutcome {
  let mut outcome = ManifestOutcome {
    manifest: FingerprintManifest {
      hash_length: manager.hash_length().map(|length| length.get()),
      assets: BTreeMap::new(),
    },
    failures: 0,
  };

  // A configured bundle takes precedence over the indexed asset of the same name.
  let names: Vec<String> = manager
    .index()
    .names()
    .filter(|name| !bundles.contains_key(*name))
    .map(str::to_string)
    .collect();
  let requests = names
    .into_iter()
    .map(|name| (name, AssetOptions::default()))
    .chain(
      bundles
        .iter()
        .map(|(target, spec)| (target.clone(), AssetOptions::include(spec.clone()))),
    );

  for (name, options) in requests {
    let file_name = manager.asset_filename_with(&name, &options);
    if file_name.is_empty() {
      outcome.failures += 1;
    } else {
      outcome.manifest.assets.insert(name, file_name);
    }
  }

  tracing::debug!(
    assets = outcome.manifest.assets.len(),
    failures = outcome.failures,
    "built fingerprint manifest"
  );
  outcome
}
