//! OCR full-text search and IIIF manifest service.
//!
//! - **`api`**: the two request pipelines. `search` reshapes the search
//!   engine's OCR highlights into a IIIF Content Search annotation list;
//!   `manifest` assembles a IIIF Presentation manifest from a volume's hOCR
//!   page list and the image server's dimensions.
//! - **`resource_ids`**: URI minting shared by both pipelines, so canvas URIs
//!   in search results resolve to canvases in the manifest.
//! - **`service_utils`**: clients for Solr, the IIIF image server and the
//!   hOCR documents on disk.
//! - **`server_extra`**: axum routes and shared state.

pub mod api;
pub mod config;
pub mod error;
pub mod resource_ids;
pub mod server_extra;
pub mod service_utils;
