//! Highlighting payload produced by the OCR-aware search engine.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightDocument {
    #[serde(rename = "snippetCount")]
    pub snippet_count: u64,
    #[serde(default)]
    pub snippets: Vec<HighlightSnippet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightSnippet {
    /// Snippet body, matched terms wrapped in the emphasis markers.
    pub text: String,
    pub page: String,
    pub region: SnippetRegion,
    #[serde(default)]
    pub highlights: Vec<HighlightGroup>,
}

/// One match. A match crossing a line break spans several boxes.
pub type HighlightGroup = Vec<HighlightBox>;

/// Offset of the snippet on its page. Box coordinates are relative to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SnippetRegion {
    pub ulx: i64,
    pub uly: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightBox {
    pub ulx: i64,
    pub uly: i64,
    pub lrx: i64,
    pub lry: i64,
    pub text: String,
}

impl HighlightBox {
    /// `None` when the corners are too far apart for an `i64`.
    pub fn width(&self) -> Option<i64> {
        self.lrx.checked_sub(self.ulx)
    }

    pub fn height(&self) -> Option<i64> {
        self.lry.checked_sub(self.uly)
    }
}

impl HighlightDocument {
    pub fn empty() -> Self {
        Self { snippet_count: 0, snippets: vec![] }
    }

    pub fn group_count(&self) -> usize {
        self.snippets.iter().map(|s| s.highlights.len()).sum()
    }

    pub fn box_count(&self) -> usize {
        self.snippets
            .iter()
            .flat_map(|s| s.highlights.iter())
            .map(|group| group.len())
            .sum()
    }
}
