//! Helpers for the emphasis markers the search engine wraps around matched terms.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmphasisTags {
    pub pre: String,
    pub post: String,
}

impl Default for EmphasisTags {
    fn default() -> Self {
        Self::new("<em>", "</em>")
    }
}

impl EmphasisTags {
    pub fn new(pre: impl Into<String>, post: impl Into<String>) -> Self {
        Self { pre: pre.into(), post: post.into() }
    }

    /// Removes every start and end marker, balanced or not.
    pub fn strip(&self, text: &str) -> String {
        let mut text = text.to_string();
        for tag in [&self.pre, &self.post] {
            if !tag.is_empty() {
                text = text.replace(tag.as_str(), "");
            }
        }
        text
    }
}

/// Splits `text` around the first verbatim occurrence of `needle`.
///
/// Returns `None` when the needle is not found, which happens when a marker
/// sat between a box boundary and surrounding whitespace or punctuation.
pub fn split_around<'a>(text: &'a str, needle: &str) -> Option<(&'a str, &'a str)> {
    let start = text.find(needle)?;
    Some((&text[..start], &text[start + needle.len()..]))
}
