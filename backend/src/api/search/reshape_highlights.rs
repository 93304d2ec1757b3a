//! Turns the search engine's OCR snippets into a Content Search annotation list.

use std::collections::HashSet;

use common::content_search::{ContentSearchResponse, SearchHit, TextAnnotation};
use common::highlight_document::{HighlightDocument, HighlightGroup, HighlightSnippet};

use crate::error::{ServiceError, ServiceResult};
use crate::resource_ids::IdentifierGenerator;
use crate::service_utils::emphasis::{EmphasisTags, split_around};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub volume_id: String,
    /// Raw `q` parameter, as received.
    pub query: String,
    /// Query-string keys other than `q`, first-seen order.
    pub ignored: Vec<String>,
}

pub fn reshape_highlights(
    document: &HighlightDocument,
    request: &SearchRequest,
    ids: &IdentifierGenerator,
    tags: &EmphasisTags,
) -> ServiceResult<ContentSearchResponse> {
    let mut response = ContentSearchResponse::new(
        ids.search_response_uri(&request.volume_id, &request.query),
        document.snippet_count,
        request.ignored.clone(),
    );
    let mut issued = HashSet::new();

    for snippet in &document.snippets {
        let clean_text = tags.strip(&snippet.text);
        for group in &snippet.highlights {
            let hit = reshape_group(snippet, group, &clean_text, request, ids, &mut issued, &mut response.resources)?;
            response.hits.push(hit);
        }
    }
    Ok(response)
}

fn reshape_group(
    snippet: &HighlightSnippet,
    group: &HighlightGroup,
    clean_text: &str,
    request: &SearchRequest,
    ids: &IdentifierGenerator,
    issued: &mut HashSet<String>,
    resources: &mut Vec<TextAnnotation>,
) -> ServiceResult<SearchHit> {
    let match_text = group.iter().map(|b| b.text.as_str()).collect::<Vec<_>>().join(" ");

    let (before, after) = match split_around(clean_text, &match_text) {
        Some((before, after)) => (Some(before.to_string()), Some(after.to_string())),
        None => {
            tracing::warn!(
                "match {:?} not found verbatim in snippet on {}; omitting context",
                match_text,
                snippet.page
            );
            (None, None)
        }
    };

    let mut annotation_ids = Vec::with_capacity(group.len());
    for hl_box in group {
        let region = || -> Option<(i64, i64, i64, i64)> {
            Some((
                snippet.region.ulx.checked_add(hl_box.ulx)?,
                snippet.region.uly.checked_add(hl_box.uly)?,
                hl_box.width()?,
                hl_box.height()?,
            ))
        };
        let (x, y, w, h) = region().ok_or_else(|| ServiceError::MalformedUpstreamPayload {
            service: "search engine",
            detail: format!("box {:?} on {} overflows canvas coordinates", hl_box.text, snippet.page),
        })?;
        let target = ids.canvas_region_uri(&request.volume_id, &snippet.page, x, y, w, h);
        let id = fresh_annotation_id(ids, &request.volume_id, issued);
        annotation_ids.push(id.clone());
        resources.push(TextAnnotation::new(id, hl_box.text.clone(), target));
    }

    Ok(SearchHit::new(annotation_ids, match_text, before, after))
}

/// Slugs are random, so redraw on the rare clash within one response.
fn fresh_annotation_id(ids: &IdentifierGenerator, volume_id: &str, issued: &mut HashSet<String>) -> String {
    loop {
        let id = ids.annotation_id(volume_id);
        if issued.insert(id.clone()) {
            return id;
        }
        tracing::debug!("annotation id clash, drawing again: {}", id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::highlight_document::{HighlightBox, SnippetRegion};
    use std::collections::HashMap;

    fn hl_box(ulx: i64, uly: i64, lrx: i64, lry: i64, text: &str) -> HighlightBox {
        HighlightBox { ulx, uly, lrx, lry, text: text.to_string() }
    }

    fn snippet(page: &str, text: &str, region: (i64, i64), highlights: Vec<HighlightGroup>) -> HighlightSnippet {
        HighlightSnippet {
            text: text.to_string(),
            page: page.to_string(),
            region: SnippetRegion { ulx: region.0, uly: region.1 },
            highlights,
        }
    }

    fn request(query: &str) -> SearchRequest {
        SearchRequest {
            volume_id: "vol1".to_string(),
            query: query.to_string(),
            ignored: vec![],
        }
    }

    fn reshape(document: &HighlightDocument, request: &SearchRequest) -> ContentSearchResponse {
        let ids = IdentifierGenerator::new("http://localhost:8008");
        reshape_highlights(document, request, &ids, &EmphasisTags::default()).unwrap()
    }

    #[test]
    fn two_box_match_yields_one_hit_two_annotations() {
        let document = HighlightDocument {
            snippet_count: 1,
            snippets: vec![snippet(
                "page_3",
                "the road to <em>Paris</em> <em>France</em> was long",
                (100, 50),
                vec![vec![hl_box(10, 5, 40, 20, "Paris"), hl_box(0, 30, 50, 45, "France")]],
            )],
        };
        let response = reshape(&document, &request("Paris"));

        assert_eq!(response.hits.len(), 1);
        assert_eq!(response.resources.len(), 2);
        let hit = &response.hits[0];
        assert_eq!(hit.annotations.len(), 2);
        assert_eq!(hit.match_text, "Paris France");
        assert_eq!(hit.before.as_deref(), Some("the road to "));
        assert_eq!(hit.after.as_deref(), Some(" was long"));
        for (anno_id, anno) in hit.annotations.iter().zip(&response.resources) {
            assert_eq!(anno_id, &anno.id);
            assert_eq!(anno.canvas(), "http://localhost:8008/vol1/canvas/page_3");
        }
        assert_eq!(response.resources[0].on, "http://localhost:8008/vol1/canvas/page_3#xywh=110,55,30,15");
        assert_eq!(response.resources[1].on, "http://localhost:8008/vol1/canvas/page_3#xywh=100,80,50,15");
        assert_eq!(response.resources[0].resource.chars, "Paris");
        assert_eq!(response.resources[1].resource.chars, "France");
    }

    #[test]
    fn envelope_carries_total_ignored_and_query_id() {
        let document = HighlightDocument { snippet_count: 17, snippets: vec![] };
        let request = SearchRequest {
            volume_id: "vol1".to_string(),
            query: "old road".to_string(),
            ignored: vec!["motivation".to_string(), "date".to_string()],
        };
        let response = reshape(&document, &request);
        assert_eq!(response.id, "http://localhost:8008/vol1/search?q=old road");
        assert_eq!(response.within.total, 17);
        assert_eq!(response.within.ignored, vec!["motivation", "date"]);
        assert!(response.hits.is_empty());
        assert!(response.resources.is_empty());
    }

    #[test]
    fn context_uses_first_occurrence() {
        let document = HighlightDocument {
            snippet_count: 1,
            snippets: vec![snippet(
                "page_1",
                "<em>Paris</em> is Paris",
                (0, 0),
                vec![
                    vec![hl_box(0, 0, 10, 10, "Paris")],
                    vec![hl_box(40, 0, 50, 10, "Paris")],
                ],
            )],
        };
        let response = reshape(&document, &request("Paris"));
        assert_eq!(response.hits.len(), 2);
        for hit in &response.hits {
            assert_eq!(hit.before.as_deref(), Some(""));
            assert_eq!(hit.after.as_deref(), Some(" is Paris"));
        }
    }

    #[test]
    fn unlocatable_match_degrades_to_null_context() {
        // hyphenated line break: boxes join with a space the snippet never had
        let document = HighlightDocument {
            snippet_count: 1,
            snippets: vec![snippet(
                "page_9",
                "to <em>Pa-</em>\n<em>ris</em> we went",
                (5, 5),
                vec![vec![hl_box(0, 0, 10, 10, "Pa-"), hl_box(0, 20, 10, 30, "ris")]],
            )],
        };
        let response = reshape(&document, &request("Paris"));
        let hit = &response.hits[0];
        assert_eq!(hit.match_text, "Pa- ris");
        assert_eq!(hit.before, None);
        assert_eq!(hit.after, None);
        assert_eq!(hit.annotations.len(), 2);
        assert_eq!(response.resources.len(), 2);
    }

    #[test]
    fn ids_are_unique_even_for_identical_boxes() {
        let same = || vec![hl_box(1, 1, 2, 2, "a")];
        let document = HighlightDocument {
            snippet_count: 2,
            snippets: vec![
                snippet("page_1", "<em>a</em>", (0, 0), vec![same(), same(), same()]),
                snippet("page_1", "<em>a</em>", (0, 0), vec![same(), same()]),
            ],
        };
        let response = reshape(&document, &request("a"));
        let unique = response.resources.iter().map(|a| a.id.as_str()).collect::<HashSet<_>>();
        assert_eq!(unique.len(), 5);
        assert!(response.resources.iter().all(|a| a.id.starts_with("http://localhost:8008/vol1/annotation/")));
    }

    #[test]
    fn hits_point_at_annotations_on_their_own_page() {
        let document = HighlightDocument {
            snippet_count: 2,
            snippets: vec![
                snippet("page_1", "<em>x</em>", (0, 0), vec![vec![hl_box(0, 0, 1, 1, "x")]]),
                snippet("page_2", "<em>y</em> <em>z</em>", (0, 0), vec![
                    vec![hl_box(0, 0, 1, 1, "y")],
                    vec![hl_box(2, 0, 3, 1, "z")],
                ]),
            ],
        };
        let response = reshape(&document, &request("x"));
        let by_id = response
            .resources
            .iter()
            .map(|a| (a.id.as_str(), a))
            .collect::<HashMap<_, _>>();
        let pages = ["page_1", "page_2", "page_2"];
        for (hit, page) in response.hits.iter().zip(pages) {
            for id in &hit.annotations {
                let anno = by_id[id.as_str()];
                assert_eq!(anno.canvas(), format!("http://localhost:8008/vol1/canvas/{page}"));
            }
        }
    }

    #[test]
    fn overflowing_coordinates_are_a_malformed_payload() {
        let ids = IdentifierGenerator::new("http://localhost:8008");
        let document = HighlightDocument {
            snippet_count: 1,
            snippets: vec![snippet(
                "page_4",
                "<em>Paris</em>",
                (i64::MAX, 0),
                vec![vec![hl_box(1, 0, 10, 10, "Paris")]],
            )],
        };
        let err = reshape_highlights(&document, &request("Paris"), &ids, &EmphasisTags::default()).unwrap_err();
        match err {
            ServiceError::MalformedUpstreamPayload { detail, .. } => assert!(detail.contains("page_4"), "{detail}"),
            other => panic!("unexpected error: {other}"),
        }

        let document = HighlightDocument {
            snippet_count: 1,
            snippets: vec![snippet(
                "page_4",
                "<em>Paris</em>",
                (0, 0),
                vec![vec![hl_box(i64::MIN, 0, 10, 10, "Paris")]],
            )],
        };
        let err = reshape_highlights(&document, &request("Paris"), &ids, &EmphasisTags::default()).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
