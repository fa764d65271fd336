//! Command line front end printing fingerprinted filenames for an asset directory.

use std::cell::Cell;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use asset_fingerprint::{
  AssetManager, AssetOptions, DirectorySource, FingerprintConfig, Sha256Digest, build_manifest,
};

/// Print cache-busting filenames for static assets.
#[derive(Debug, Parser)]
#[command(name = "asset-fingerprint", version, about)]
struct Cli {
  /// Directory containing the assets.
  root: PathBuf,
  /// Asset or bundle names to fingerprint.
  names: Vec<String>,
  /// Define the single requested name as a bundle of these patterns.
  #[arg(long = "include", value_name = "PATTERN")]
  include: Vec<String>,
  /// Number of digest characters kept in filenames.
  #[arg(long, value_name = "N")]
  hash_length: Option<NonZeroUsize>,
  /// Configuration file; defaults to `fingerprint.config.json` inside ROOT.
  #[arg(long, value_name = "PATH")]
  config: Option<PathBuf>,
  /// Use SHA-256 instead of MD5.
  #[arg(long)]
  sha256: bool,
  /// Print a JSON manifest of every asset and configured bundle.
  #[arg(long, conflicts_with_all = ["names", "include"])]
  manifest: bool,
}

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(std::io::stderr)
    .init();

  match run(Cli::parse()) {
    Ok(true) => ExitCode::SUCCESS,
    Ok(false) => ExitCode::FAILURE,
    Err(err) => {
      eprintln!("error: {err:#}");
      ExitCode::FAILURE
    }
  }
}

/// Returns `Ok(false)` when any name failed to resolve.
fn run(cli: Cli) -> Result<bool> {
  if !cli.include.is_empty() && cli.names.len() != 1 {
    bail!("--include requires exactly one asset name");
  }

  let mut config = match &cli.config {
    Some(path) => FingerprintConfig::load_from_path(path)?,
    None => FingerprintConfig::discover(&cli.root),
  };
  if cli.hash_length.is_some() {
    config.hash_length = cli.hash_length;
  }
  let bundles = std::mem::take(&mut config.bundles);

  let source = DirectorySource::new(&cli.root);
  let created = if cli.sha256 {
    AssetManager::with_digest(source, Sha256Digest, config)
  } else {
    AssetManager::new(source, config)
  };
  let mut manager = created
    .index_assets()
    .with_context(|| format!("failed to index assets in {}", cli.root.display()))?
    .hash_assets();

  let failures = Rc::new(Cell::new(0usize));
  let counter = Rc::clone(&failures);
  manager.on_error(move |err| {
    counter.set(counter.get() + 1);
    eprintln!("{err}");
  });

  if cli.manifest {
    let outcome = build_manifest(&mut manager, &bundles);
    println!("{}", serde_json::to_string_pretty(&outcome.manifest)?);
    return Ok(outcome.failures == 0);
  }

  for name in &cli.names {
    let options = if !cli.include.is_empty() {
      AssetOptions::include(cli.include.clone())
    } else {
      AssetOptions {
        include: bundles.get(name).cloned(),
      }
    };
    let file_name = manager.asset_filename_with(name, &options);
    if !file_name.is_empty() {
      println!("{file_name}");
    }
  }

  Ok(failures.get() == 0)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn manifest_conflicts_with_names_and_include() {
    assert!(Cli::try_parse_from(["asset-fingerprint", "public", "--manifest"]).is_ok());
    assert!(Cli::try_parse_from(["asset-fingerprint", "public", "jquery.js", "--manifest"]).is_err());
    assert!(
      Cli::try_parse_from(["asset-fingerprint", "public", "--include", "*.js", "--manifest"]).is_err()
    );
  }
}
