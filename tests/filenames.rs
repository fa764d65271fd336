use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use asset_fingerprint::{
  AssetError, AssetManager, AssetOptions, DigestFunction, DirectorySource, FingerprintConfig,
  Md5Digest,
};
use tempfile::{TempDir, tempdir};

const JQUERY: &str = "/*! jQuery */ window.jQuery = function () {};";
const HTML5SHIV: &str = "/* html5shiv */ document.createElement('section');";
const RESPOND: &str = "/* respond.js */ window.respond = {};";

fn simple_assets() -> TempDir {
  let dir = tempdir().expect("failed to create temp dir");
  fs::write(dir.path().join("jquery.js"), JQUERY).expect("failed to write fixture");
  fs::write(dir.path().join("html5shiv.js"), HTML5SHIV).expect("failed to write fixture");
  fs::write(dir.path().join("respond.js"), RESPOND).expect("failed to write fixture");
  dir
}

fn setup(dir: &TempDir, config: FingerprintConfig) -> AssetManager {
  AssetManager::new(DirectorySource::new(dir.path()), config)
    .index_assets()
    .expect("fixture directory should index")
    .hash_assets()
}

fn collect_errors(manager: &mut AssetManager) -> Rc<RefCell<Vec<AssetError>>> {
  let seen = Rc::new(RefCell::new(Vec::new()));
  let sink = Rc::clone(&seen);
  manager.on_error(move |err| sink.borrow_mut().push(err.clone()));
  seen
}

fn bundle_digest(contents: &[&str]) -> String {
  let mut digests: Vec<String> = contents
    .iter()
    .map(|content| Md5Digest.digest(content.as_bytes()))
    .collect();
  digests.sort();
  Md5Digest.digest(digests.concat().as_bytes())
}

#[test]
fn generates_filenames_for_assets() {
  let dir = simple_assets();
  let mut manager = setup(&dir, FingerprintConfig::default());

  let expected = format!("asset-{}-jquery.js", Md5Digest.digest(JQUERY.as_bytes()));
  let file_name = manager.asset_filename("jquery.js");

  assert_eq!(file_name, expected);
  assert_eq!(file_name.len(), "asset-".len() + 32 + "-jquery.js".len());
}

#[test]
fn allows_a_configurable_hash_length() {
  let dir = simple_assets();
  let mut full = setup(&dir, FingerprintConfig::default());
  let mut short = setup(&dir, FingerprintConfig::with_hash_length(8));

  let digest = Md5Digest.digest(JQUERY.as_bytes());
  assert_eq!(short.asset_filename("jquery.js"), format!("asset-{}-jquery.js", &digest[..8]));
  assert!(full.asset_filename("jquery.js").contains(&digest));
}

#[test]
fn reports_missing_assets() {
  let dir = simple_assets();
  let mut manager = setup(&dir, FingerprintConfig::default());
  let errors = collect_errors(&mut manager);

  assert_eq!(manager.asset_filename("bootstrap.js"), "");

  let errors = errors.borrow();
  assert_eq!(errors.len(), 1);
  assert_eq!(errors[0].to_string(), "Asset \"bootstrap.js\" could not be found");
}

#[test]
fn generates_filenames_for_bundles() {
  let dir = simple_assets();
  let mut manager = setup(&dir, FingerprintConfig::default());

  let file_name =
    manager.asset_filename_with("ie8.js", &AssetOptions::include(["html5shiv.js", "respond.js"]));

  assert_eq!(file_name, format!("asset-{}-ie8.js", bundle_digest(&[HTML5SHIV, RESPOND])));
}

#[test]
fn reports_missing_assets_inside_bundles() {
  let dir = simple_assets();
  let mut manager = setup(&dir, FingerprintConfig::default());
  let errors = collect_errors(&mut manager);

  let file_name = manager
    .asset_filename_with("libraries.js", &AssetOptions::include(["jquery.js", "bootstrap.js"]));

  assert_eq!(file_name, "");
  assert_eq!(
    errors.borrow()[0].to_string(),
    "Asset \"bootstrap.js\" could not be found when building asset \"libraries.js\""
  );
}

#[test]
fn only_requires_a_bundle_to_be_defined_once() {
  let dir = simple_assets();
  let mut manager = setup(&dir, FingerprintConfig::default());

  let first =
    manager.asset_filename_with("ie8.js", &AssetOptions::include(["html5shiv.js", "respond.js"]));

  assert_eq!(manager.asset_filename("ie8.js"), first);
}

#[test]
fn ignores_order_and_duplicates_in_bundles() {
  let dir = simple_assets();
  let mut manager = setup(&dir, FingerprintConfig::default());

  let first =
    manager.asset_filename_with("ie8.js", &AssetOptions::include(["html5shiv.js", "respond.js"]));
  let second = manager.asset_filename_with(
    "ie8-b.js",
    &AssetOptions::include([
      "respond.js",
      "html5shiv.js",
      "respond.js",
      "respond.js",
      "html5shiv.js",
    ]),
  );

  assert_eq!(first.trim_end_matches("-ie8.js"), second.trim_end_matches("-ie8-b.js"));
}

#[test]
fn requires_a_populated_include_list() {
  let dir = simple_assets();
  let mut manager = setup(&dir, FingerprintConfig::default());
  let errors = collect_errors(&mut manager);

  let file_name =
    manager.asset_filename_with("libraries.js", &AssetOptions::include(Vec::<String>::new()));

  assert_eq!(file_name, "");
  assert_eq!(*errors.borrow(), vec![AssetError::EmptyIncludeList {
    target: "libraries.js".into()
  }]);
}

#[test]
fn supports_globs_in_bundles() {
  let dir = simple_assets();
  let mut manager = setup(&dir, FingerprintConfig::default());
  let digest = bundle_digest(&[HTML5SHIV, RESPOND, JQUERY]);

  let listed = manager.asset_filename_with(
    "all.js",
    &AssetOptions::include(["html5shiv.js", "respond.js", "jquery.js"]),
  );
  let starred = manager.asset_filename_with("all-b.js", &AssetOptions::include("*.js"));
  let braced = manager.asset_filename_with(
    "all-c.js",
    &AssetOptions::include(["{jquery,respond}.js", "html*.js"]),
  );

  assert_eq!(listed, format!("asset-{digest}-all.js"));
  assert_eq!(starred, format!("asset-{digest}-all-b.js"));
  assert_eq!(braced, format!("asset-{digest}-all-c.js"));
}

#[test]
fn reports_globs_that_match_nothing() {
  let dir = simple_assets();
  let mut manager = setup(&dir, FingerprintConfig::default());
  let errors = collect_errors(&mut manager);

  manager.asset_filename_with("libraries.js", &AssetOptions::include("*.min.js"));

  assert_eq!(
    errors.borrow()[0].to_string(),
    "No assets matched the pattern \"*.min.js\" when building asset \"libraries.js\""
  );
}

#[test]
fn failures_accumulate_across_calls() {
  let dir = simple_assets();
  let mut manager = setup(&dir, FingerprintConfig::default());
  let errors = collect_errors(&mut manager);

  manager.asset_filename("missing-a.js");
  manager.asset_filename("missing-b.js");
  let jquery = manager.asset_filename("jquery.js");

  assert_eq!(errors.borrow().len(), 2);
  assert!(!jquery.is_empty());
}
