#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod digest;
pub mod error;
pub mod fingerprint;
pub mod index;
pub mod manager;
pub mod manifest;
pub mod pattern;
pub mod registry;
pub mod resolver;
pub mod source;

pub use config::FingerprintConfig;
pub use digest::{DigestFunction, HashStore, Md5Digest, Sha256Digest};
pub use error::{AssetError, ErrorChannel, IndexError};
pub use manager::{AssetManager, AssetOptions};
pub use manifest::{FingerprintManifest, build_manifest};
pub use resolver::IncludeSpec;
pub use source::{AssetSource, DirectorySource, MemorySource};
