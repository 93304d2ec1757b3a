//! Manifest API and module exports.

pub mod assemble_manifest;
pub use assemble_manifest::{ManifestOptions, assemble_manifest};

mod get_manifest;
pub use get_manifest::get_manifest;
