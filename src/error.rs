//! Error types and the observer channel used to surface resolution failures.

use std::path::PathBuf;

use thiserror::Error;

/// Setup-time failure raised while reading the asset source.
///
/// This is the only error that stops a manager from becoming usable.
#[derive(Debug, Error)]
pub enum IndexError {
  /// The asset directory itself could not be listed.
  #[error("failed to read asset directory {}: {source}", path.display())]
  ReadDir {
    /// Directory that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: std::io::Error,
  },
  /// A file inside the asset directory could not be read.
  #[error("failed to read asset {}: {source}", path.display())]
  ReadFile {
    /// File that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: std::io::Error,
  },
}

/// Recoverable failure raised while resolving a filename.
///
/// The display form of each variant is the message delivered to error observers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
  /// A single-asset lookup named an asset that is not indexed.
  #[error("Asset \"{name}\" could not be found")]
  AssetNotFound {
    /// Requested asset name.
    name: String,
  },
  /// An exact name in a bundle's include list is not indexed.
  #[error("Asset \"{name}\" could not be found when building asset \"{target}\"")]
  AssetNotFoundInBundle {
    /// Name listed in the include spec.
    name: String,
    /// Bundle being defined.
    target: String,
  },
  /// A bundle was defined with an empty include list.
  #[error("No assets were included when building asset \"{target}\"")]
  EmptyIncludeList {
    /// Bundle being defined.
    target: String,
  },
  /// A glob pattern in a bundle's include list matched nothing.
  #[error("No assets matched the pattern \"{pattern}\" when building asset \"{target}\"")]
  PatternNoMatch {
    /// Pattern that produced no matches.
    pattern: String,
    /// Bundle being defined.
    target: String,
  },
}

impl AssetError {
  /// Name of the asset or bundle whose filename was requested.
  pub fn target(&self) -> &str {
    match self {
      Self::AssetNotFound { name } => name,
      Self::AssetNotFoundInBundle { target, .. }
      | Self::EmptyIncludeList { target }
      | Self::PatternNoMatch { target, .. } => target,
    }
  }
}

type ErrorHandler = Box<dyn FnMut(&AssetError)>;

/// Synchronous fan-out of resolution failures to registered observers.
#[derive(Default)]
pub struct ErrorChannel {
  handlers: Vec<ErrorHandler>,
}

impl ErrorChannel {
  /// Create a channel with no observers.
  pub fn new() -> Self {
    Self::default()
  }

  /// Register an observer that receives every subsequently reported failure.
  pub fn subscribe(&mut self, handler: impl FnMut(&AssetError) + 'static) {
    self.handlers.push(Box::new(handler));
  }

  /// Deliver a failure to every observer.
  pub fn report(&mut self, error: &AssetError) {
    tracing::warn!(target_asset = error.target(), "{error}");
    for handler in &mut self.handlers {
      handler(error);
    }
  }

  /// Number of registered observers.
  pub fn observer_count(&self) -> usize {
    self.handlers.len()
  }
}

impl std::fmt::Debug for ErrorChannel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ErrorChannel")
      .field("observers", &self.handlers.len())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;
  use std::rc::Rc;

  use super::*;

  #[test]
  fn formats_messages_with_target_context() {
    let missing = AssetError::AssetNotFound {
      name: "bootstrap.js".into(),
    };
    assert_eq!(missing.to_string(), "Asset \"bootstrap.js\" could not be found");

    let in_bundle = AssetError::AssetNotFoundInBundle {
      name: "bootstrap.js".into(),
      target: "libraries.js".into(),
    };
    assert_eq!(
      in_bundle.to_string(),
      "Asset \"bootstrap.js\" could not be found when building asset \"libraries.js\""
    );

    let no_match = AssetError::PatternNoMatch {
      pattern: "*.min.js".into(),
      target: "libraries.js".into(),
    };
    assert_eq!(
      no_match.to_string(),
      "No assets matched the pattern \"*.min.js\" when building asset \"libraries.js\""
    );
    assert_eq!(no_match.target(), "libraries.js");
  }

  #[test]
  fn delivers_each_report_to_every_observer() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut channel = ErrorChannel::new();
    for _ in 0..2 {
      let seen = Rc::clone(&seen);
      channel.subscribe(move |err| seen.borrow_mut().push(err.to_string()));
    }

    channel.report(&AssetError::EmptyIncludeList {
      target: "libraries.js".into(),
    });

    assert_eq!(channel.observer_count(), 2);
    assert_eq!(seen.borrow().len(), 2);
    assert!(seen.borrow()[0].contains("libraries.js"));
  }

  #[test]
  fn reporting_without_observers_is_a_no_op() {
    let mut channel = ErrorChannel::new();
    channel.report(&AssetError::AssetNotFound { name: "a.js".into() });
    assert_eq!(channel.observer_count(), 0);
  }
}
