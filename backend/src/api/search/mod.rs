//! Search API and module exports.

pub mod reshape_highlights;
pub use reshape_highlights::{SearchRequest, reshape_highlights};

mod search_volume;
pub use search_volume::search_volume;
