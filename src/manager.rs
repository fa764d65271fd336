//! Asset manager tying the index, hash store, bundle registry and error channel together.
//!
//! The manager moves through `Created → Indexed → Ready`. Each step consumes the previous
//! state, so filenames can only be requested once every digest is known.

use std::marker::PhantomData;
use std::num::NonZeroUsize;

use crate::config::FingerprintConfig;
use crate::digest::{DigestFunction, HashStore, Md5Digest};
use crate::error::{AssetError, ErrorChannel, IndexError};
use crate::fingerprint::file_name_for;
use crate::index::AssetIndex;
use crate::registry::BundleRegistry;
use crate::resolver::{IncludeSpec, SourceSet, resolve};
use crate::source::AssetSource;

/// Manager state before the source has been read.
#[derive(Debug)]
pub enum Created {}
/// Manager state once assets are indexed but not yet hashed.
#[derive(Debug)]
pub enum Indexed {}
/// Manager state in which filenames can be resolved.
#[derive(Debug)]
pub enum Ready {}

/// Options accepted by [`AssetManager::asset_filename_with`].
#[derive(Debug, Clone, Default)]
pub struct AssetOptions {
  /// Sources of a bundle. Without it the name refers to a single asset or a known bundle.
  pub include: Option<IncludeSpec>,
}

impl AssetOptions {
  /// Options defining a bundle from `include`.
  pub fn include(include: impl Into<IncludeSpec>) -> Self {
    Self {
      include: Some(include.into()),
    }
  }
}

/// Fingerprinting engine for one asset source.
pub struct AssetManager<S = Ready> {
  source: Box<dyn AssetSource>,
  digest: Box<dyn DigestFunction>,
  config: FingerprintConfig,
  index: AssetIndex,
  hashes: HashStore,
  registry: BundleRegistry,
  errors: ErrorChannel,
  state: PhantomData<S>,
}

impl AssetManager<Created> {
  /// Create a manager reading from `source` and hashing with MD5.
  pub fn new(source: impl AssetSource + 'static, config: FingerprintConfig) -> Self {
    Self::with_digest(source, Md5Digest, config)
  }

  /// Create a manager with a custom digest function.
  pub fn with_digest(
    source: impl AssetSource + 'static,
    digest: impl DigestFunction + 'static,
    config: FingerprintConfig,
  ) -> Self {
    Self {
      source: Box::new(source),
      digest: Box::new(digest),
      config,
      index: AssetIndex::default(),
      hashes: HashStore::default(),
      registry: BundleRegistry::new(),
      errors: ErrorChannel::new(),
      state: PhantomData,
    }
  }

  /// Read every asset from the source.
  pub fn index_assets(self) -> Result<AssetManager<Indexed>, IndexError> {
    let index = AssetIndex::build(self.source.as_ref())?;
    Ok(AssetManager { index, ..self.into_state() })
  }
}

impl AssetManager<Indexed> {
  /// Compute the digest of every indexed asset.
  pub fn hash_assets(self) -> AssetManager<Ready> {
    let hashes = HashStore::compute_all(&self.index, self.digest.as_ref());
    AssetManager { hashes, ..self.into_state() }
  }
}

impl AssetManager<Ready> {
  /// Fingerprinted filename for a single asset or a previously defined bundle.
  ///
  /// Returns an empty string and notifies error observers when the name cannot be resolved.
  pub fn asset_filename(&mut self, name: &str) -> String {
    self.asset_filename_with(name, &AssetOptions::default())
  }

  /// Fingerprinted filename for `name`, defining it as a bundle when `options.include` is set.
  ///
  /// Returns an empty string and notifies error observers when resolution fails.
  pub fn asset_filename_with(&mut self, name: &str, options: &AssetOptions) -> String {
    match self.try_asset_filename(name, options) {
      Ok(file_name) => file_name,
      Err(err) => {
        self.errors.report(&err);
        String::new()
      }
    }
  }

  /// Resolve a filename without notifying error observers.
  pub fn try_asset_filename(
    &mut self,
    name: &str,
    options: &AssetOptions,
  ) -> Result<String, AssetError> {
    let sources = self.sources_for(name, options.include.as_ref())?;
    Ok(file_name_for(
      name,
      &sources,
      &self.hashes,
      self.digest.as_ref(),
      self.config.hash_length,
    ))
  }

  /// Register an observer for resolution failures.
  pub fn on_error(&mut self, handler: impl FnMut(&AssetError) + 'static) {
    self.errors.subscribe(handler);
  }

  /// Digest of an indexed asset.
  pub fn digest_of(&self, name: &str) -> Option<&str> {
    self.hashes.digest_of(name)
  }

  /// Registered bundles.
  pub fn bundles(&self) -> &BundleRegistry {
    &self.registry
  }

  fn sources_for(&mut self, name: &str, include: Option<&IncludeSpec>) -> Result<SourceSet, AssetError> {
    if let Some(sources) = self.registry.get(name) {
      if include.is_some() {
        tracing::debug!(target_asset = name, "ignoring include list for registered bundle");
      }
      return Ok(sources.clone());
    }

    match include {
      Some(spec) => {
        let sources = resolve(name, spec, &self.index)?;
        Ok(self.registry.register(name, sources).clone())
      }
      None if self.index.has(name) => Ok(SourceSet::from([name.to_string()])),
      None => Err(AssetError::AssetNotFound {
        name: name.to_string(),
      }),
    }
  }
}

impl<S> AssetManager<S> {
  /// Active configuration.
  pub fn config(&self) -> &FingerprintConfig {
    &self.config
  }

  /// Configured digest truncation length.
  pub fn hash_length(&self) -> Option<NonZeroUsize> {
    self.config.hash_length
  }

  /// Indexed assets. Empty until [`AssetManager::index_assets`] has run.
  pub fn index(&self) -> &AssetIndex {
    &self.index
  }

  fn into_state<T>(self) -> AssetManager<T> {
    AssetManager {
      source: self.source,
      digest: self.digest,
      config: self.config,
      index: self.index,
      hashes: self.hashes,
      registry: self.registry,
      errors: self.errors,
      state: PhantomData,
    }
  }
}

impl<S> std::fmt::Debug for AssetManager<S> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AssetManager")
      .field("config", &self.config)
      .field("assets", &self.index.len())
      .field("bundles", &self.registry.len())
      .field("errors", &self.errors)
      .finish()
  }
}
