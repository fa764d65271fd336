//! Write-once cache of bundle definitions.

use std::collections::BTreeMap;

use crate::resolver::SourceSet;

/// Bundles registered so far, keyed by target name.
///
/// The first successful definition of a target wins and is never replaced.
#[derive(Debug, Clone, Default)]
pub struct BundleRegistry {
  bundles: BTreeMap<String, SourceSet>,
}

impl BundleRegistry {
  /// Create an empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// Sources registered for `target`.
  pub fn get(&self, target: &str) -> Option<&SourceSet> {
    self.bundles.get(target)
  }

  /// Register `sources` for `target` unless it already has a definition.
  ///
  /// Returns the sources now associated with the target, which are the earlier ones when a
  /// definition already existed.
  pub fn register(&mut self, target: &str, sources: SourceSet) -> &SourceSet {
    if self.bundles.contains_key(target) {
      tracing::debug!(target_asset = target, "bundle already registered; keeping first definition");
    } else {
      tracing::debug!(target_asset = target, sources = sources.len(), "registered bundle");
    }
    self.bundles.entry(target.to_string()).or_insert(sources)
  }

  /// Returns `true` when `target` has been registered.
  pub fn contains(&self, target: &str) -> bool {
    self.bundles.contains_key(target)
  }

  /// Registered bundles in target-name order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &SourceSet)> {
    self
      .bundles
      .iter()
      .map(|(target, sources)| (target.as_str(), sources))
  }

  /// Number of registered bundles.
  pub fn len(&self) -> usize {
    self.bundles.len()
  }

  /// Returns `true` when nothing has been registered.
  pub fn is_empty(&self) -> bool {
    self.bundles.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn set(names: &[&str]) -> SourceSet {
    names.iter().map(|name| name.to_string()).collect()
  }

  #[test]
  fn first_registration_wins() {
    let mut registry = BundleRegistry::new();
    registry.register("ie8.js", set(&["html5shiv.js", "respond.js"]));

    let kept = registry.register("ie8.js", set(&["jquery.js"])).clone();

    assert_eq!(kept, set(&["html5shiv.js", "respond.js"]));
    assert_eq!(registry.len(), 1);
  }

  #[test]
  fn lookups_only_see_registered_targets() {
    let mut registry = BundleRegistry::new();
    assert!(registry.get("all.js").is_none());

    registry.register("all.js", set(&["jquery.js"]));

    assert!(registry.contains("all.js"));
    assert_eq!(registry.iter().map(|(target, _)| target).collect::<Vec<_>>(), vec!["all.js"]);
  }
}
