//! IIIF Content Search (v0) response model.

use serde::Serialize;

use crate::iiif_const::{PAINTING_MOTIVATION, PRESENTATION_CONTEXT, SEARCH_CONTEXT};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentSearchResponse {
    #[serde(rename = "@context")]
    pub context: [&'static str; 2],
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub within: SearchWithin,
    pub resources: Vec<TextAnnotation>,
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchWithin {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub total: u64,
    pub ignored: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextAnnotation {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub motivation: &'static str,
    pub resource: TextResource,
    /// Canvas URI with an `#xywh=` fragment in page pixels.
    pub on: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextResource {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub chars: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub annotations: Vec<String>,
    #[serde(rename = "match")]
    pub match_text: String,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl ContentSearchResponse {
    pub fn new(id: String, total: u64, ignored: Vec<String>) -> Self {
        Self {
            context: [PRESENTATION_CONTEXT, SEARCH_CONTEXT],
            id,
            kind: "sc:AnnotationList",
            within: SearchWithin {
                kind: "sc:Layer",
                total,
                ignored,
            },
            resources: Vec::new(),
            hits: Vec::new(),
        }
    }
}

impl TextAnnotation {
    pub fn new(id: String, chars: String, on: String) -> Self {
        Self {
            id,
            kind: "oa:Annotation",
            motivation: PAINTING_MOTIVATION,
            resource: TextResource {
                kind: "cnt:ContentAsText",
                chars,
            },
            on,
        }
    }

    /// Canvas part of the target, without the fragment.
    pub fn canvas(&self) -> &str {
        self.on.split('#').next().unwrap_or(&self.on)
    }
}

impl SearchHit {
    pub fn new(
        annotations: Vec<String>,
        match_text: String,
        before: Option<String>,
        after: Option<String>,
    ) -> Self {
        Self {
            kind: "search:Hit",
            annotations,
            match_text,
            before,
            after,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_json_ld_envelope() {
        let mut response = ContentSearchResponse::new(
            "http://localhost:8008/vol1/search?q=Paris".to_string(),
            1,
            vec!["motivation".to_string()],
        );
        response.resources.push(TextAnnotation::new(
            "http://localhost:8008/vol1/annotation/tiny-red-owl".to_string(),
            "Paris".to_string(),
            "http://localhost:8008/vol1/canvas/page_3#xywh=110,55,30,15".to_string(),
        ));
        response.hits.push(SearchHit::new(
            vec!["http://localhost:8008/vol1/annotation/tiny-red-owl".to_string()],
            "Paris".to_string(),
            None,
            Some(" was long".to_string()),
        ));

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["@type"], "sc:AnnotationList");
        assert_eq!(value["@context"][1], SEARCH_CONTEXT);
        assert_eq!(value["within"]["@type"], "sc:Layer");
        assert_eq!(value["within"]["total"], 1);
        assert_eq!(value["within"]["ignored"][0], "motivation");
        assert_eq!(value["resources"][0]["resource"]["@type"], "cnt:ContentAsText");
        assert_eq!(value["resources"][0]["resource"]["chars"], "Paris");
        assert_eq!(value["hits"][0]["@type"], "search:Hit");
        assert_eq!(value["hits"][0]["match"], "Paris");
        // absent context is explicit null, not a missing key
        assert!(value["hits"][0].as_object().unwrap().contains_key("before"));
        assert!(value["hits"][0]["before"].is_null());
    }

    #[test]
    fn canvas_strips_fragment() {
        let anno = TextAnnotation::new(
            "id".to_string(),
            "x".to_string(),
            "http://h/v/canvas/p_1#xywh=1,2,3,4".to_string(),
        );
        assert_eq!(anno.canvas(), "http://h/v/canvas/p_1");
    }
}
