//! Expansion of include specifications into concrete asset names.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::error::AssetError;
use crate::index::AssetIndex;
use crate::pattern::{GlobPattern, has_glob_syntax};

/// Deduplicated set of concrete asset names backing a filename.
pub type SourceSet = BTreeSet<String>;

/// Patterns identifying the sources of a bundle.
///
/// Deserializes from either a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IncludeSpec {
  /// A lone pattern.
  One(String),
  /// An ordered list of patterns.
  Many(Vec<String>),
}

impl IncludeSpec {
  /// Patterns in the order they were supplied.
  pub fn patterns(&self) -> &[String] {
    match self {
      Self::One(pattern) => std::slice::from_ref(pattern),
      Self::Many(patterns) => patterns,
    }
  }
}

impl From<&str> for IncludeSpec {
  fn from(pattern: &str) -> Self {
    Self::One(pattern.to_string())
  }
}

impl From<String> for IncludeSpec {
  fn from(pattern: String) -> Self {
    Self::One(pattern)
  }
}

impl From<Vec<String>> for IncludeSpec {
  fn from(patterns: Vec<String>) -> Self {
    Self::Many(patterns)
  }
}

impl From<Vec<&str>> for IncludeSpec {
  fn from(patterns: Vec<&str>) -> Self {
    Self::Many(patterns.into_iter().map(str::to_string).collect())
  }
}

impl<const N: usize> From<[&str; N]> for IncludeSpec {
  fn from(patterns: [&str; N]) -> Self {
    Self::Many(patterns.iter().map(|pattern| pattern.to_string()).collect())
  }
}

/// Resolve `spec` against the index on behalf of the bundle `target`.
///
/// Resolution is fail-fast: the first pattern that names a missing asset or matches nothing
/// aborts the whole spec.
pub fn resolve(target: &str, spec: &IncludeSpec, index: &AssetIndex) -> Result<SourceSet, AssetError> {
  let patterns = spec.patterns();
  if patterns.is_empty() {
    return Err(AssetError::EmptyIncludeList {
      target: target.to_string(),
    });
  }

  let mut sources = SourceSet::new();
  for pattern in patterns {
    if index.has(pattern) {
      sources.insert(pattern.clone());
      continue;
    }

    if !has_glob_syntax(pattern) {
      return Err(AssetError::AssetNotFoundInBundle {
        name: pattern.clone(),
        target: target.to_string(),
      });
    }

    let matched = match GlobPattern::new(pattern) {
      Ok(glob) => glob.matches(index.names()),
      Err(err) => {
        tracing::debug!(%pattern, %err, "glob pattern failed to compile");
        Vec::new()
      }
    };
    if matched.is_empty() {
      return Err(AssetError::PatternNoMatch {
        pattern: pattern.clone(),
        target: target.to_string(),
      });
    }
    sources.extend(matched.into_iter().map(str::to_string));
  }

  Ok(sources)
}
