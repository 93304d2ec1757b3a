//! JSON-LD context and profile URIs used by the IIIF envelopes.

pub const PRESENTATION_CONTEXT: &str = "http://iiif.io/api/presentation/2/context.json";
pub const SEARCH_CONTEXT: &str = "http://iiif.io/api/search/0/context.json";
pub const SEARCH_PROFILE: &str = "http://iiif.io/api/search/0/search";
pub const IMAGE_CONTEXT: &str = "http://iiif.io/api/image/2/context.json";
pub const IMAGE_PROFILE: &str = "http://iiif.io/api/image/2/level1.json";

pub const PAINTING_MOTIVATION: &str = "sc:painting";
