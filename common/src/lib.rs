//! Common library exports shared by the search and manifest pipelines.

extern crate serde;


pub mod iiif_const;
pub mod highlight_document;
pub mod content_search;
pub mod manifest;
pub mod image_info;
pub mod page_metadata;
