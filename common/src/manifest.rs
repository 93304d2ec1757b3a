//! IIIF Presentation (v2) manifest model.

use serde::Serialize;

use crate::iiif_const::{
    IMAGE_CONTEXT, IMAGE_PROFILE, PAINTING_MOTIVATION, PRESENTATION_CONTEXT, SEARCH_CONTEXT,
    SEARCH_PROFILE,
};
use crate::image_info::ImageSize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manifest {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub label: String,
    pub metadata: Vec<MetadataPair>,
    pub attribution: String,
    pub service: SearchServiceReference,
    pub sequences: Vec<Sequence>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataPair {
    #[serde(rename = "@label")]
    pub label: String,
    #[serde(rename = "@value")]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchServiceReference {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    pub profile: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sequence {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub label: &'static str,
    #[serde(rename = "viewingDirection")]
    pub viewing_direction: &'static str,
    #[serde(rename = "viewingHint")]
    pub viewing_hint: &'static str,
    pub canvases: Vec<Canvas>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Canvas {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub width: u64,
    pub height: u64,
    pub images: Vec<ImageAnnotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageAnnotation {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub motivation: &'static str,
    pub resource: ImageResource,
    pub on: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageResource {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub format: &'static str,
    pub service: ImageServiceReference,
    pub width: u64,
    pub height: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageServiceReference {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    pub profile: &'static str,
}

impl Manifest {
    pub fn new(
        id: String,
        label: String,
        metadata: Vec<MetadataPair>,
        attribution: String,
        search_service_id: String,
        sequence: Sequence,
    ) -> Self {
        Self {
            context: PRESENTATION_CONTEXT,
            id,
            kind: "sc:Manifest",
            label,
            metadata,
            attribution,
            service: SearchServiceReference {
                context: SEARCH_CONTEXT,
                id: search_service_id,
                profile: SEARCH_PROFILE,
            },
            sequences: vec![sequence],
        }
    }

    pub fn canvases(&self) -> impl Iterator<Item = &Canvas> {
        self.sequences.iter().flat_map(|s| s.canvases.iter())
    }
}

impl Sequence {
    pub fn new(id: String, canvases: Vec<Canvas>) -> Self {
        Self {
            id,
            kind: "sc:Sequence",
            label: "Current Page Order",
            viewing_direction: "left-to-right",
            viewing_hint: "paged",
            canvases,
        }
    }
}

impl Canvas {
    /// `image_base_url` is the IIIF Image API base of the page image.
    pub fn new(id: String, image_base_url: &str, size: ImageSize) -> Self {
        let image = ImageAnnotation {
            kind: "oa:Annotation",
            motivation: PAINTING_MOTIVATION,
            resource: ImageResource {
                id: format!("{image_base_url}/full/full/0/default.jpg"),
                kind: "dctypes:Image",
                format: "image/jpeg",
                service: ImageServiceReference {
                    context: IMAGE_CONTEXT,
                    id: image_base_url.to_string(),
                    profile: IMAGE_PROFILE,
                },
                width: size.width,
                height: size.height,
            },
            on: id.clone(),
        };
        Self {
            id,
            kind: "sc:Canvas",
            width: size.width,
            height: size.height,
            images: vec![image],
        }
    }
}
