//! Client for the OCR highlighting endpoint of the Solr index.

use std::collections::BTreeMap;

use common::highlight_document::HighlightDocument;
use serde::Deserialize;

use crate::config::ServiceConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::service_utils::emphasis::EmphasisTags;

const SERVICE: &str = "search engine";

#[derive(Debug, Deserialize)]
struct RawSolrResponse {
    highlighting: Option<BTreeMap<String, BTreeMap<String, serde_json::Value>>>,
}

#[derive(Debug, Clone)]
pub struct SolrClient {
    client: reqwest::Client,
    select_url: String,
    ocr_field: String,
    snippet_limit: u32,
    tags: EmphasisTags,
}

impl SolrClient {
    pub fn new(client: reqwest::Client, config: &ServiceConfig) -> Self {
        Self {
            client,
            select_url: config.solr_url.clone(),
            ocr_field: config.solr_ocr_field.clone(),
            snippet_limit: config.solr_snippet_limit,
            tags: EmphasisTags::new(&config.highlight_tag_pre, &config.highlight_tag_post),
        }
    }

    pub fn tags(&self) -> &EmphasisTags {
        &self.tags
    }

    /// Phrase query restricted to one volume, highlighting on weighted matches.
    pub fn query_params(&self, query: &str, volume_id: &str) -> Vec<(&'static str, String)> {
        vec![
            ("q", format!("\"{}\"", escape_phrase(query))),
            ("df", self.ocr_field.clone()),
            ("fq", format!("id:\"{}\"", escape_phrase(volume_id))),
            ("hl", "on".to_string()),
            ("hl.fl", self.ocr_field.clone()),
            ("hl.snippets", self.snippet_limit.to_string()),
            ("hl.weightMatches", "true".to_string()),
            ("hl.tag.pre", self.tags.pre.clone()),
            ("hl.tag.post", self.tags.post.clone()),
            ("wt", "json".to_string()),
        ]
    }

    pub async fn highlight(&self, query: &str, volume_id: &str) -> ServiceResult<HighlightDocument> {
        let params = self.query_params(query, volume_id);
        tracing::debug!("SOLR QUERY: {} {:?}", self.select_url, params);
        let t0 = std::time::Instant::now();

        let response = self
            .client
            .get(&self.select_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| ServiceError::upstream(SERVICE, e))?;
        let status = response.status();
        let response_txt = response
            .text()
            .await
            .map_err(|e| ServiceError::upstream(SERVICE, e))?;
        if status.is_client_error() || status.is_server_error() {
            return Err(ServiceError::UpstreamUnavailable {
                service: SERVICE,
                reason: format!("{}: {}", status, response_txt),
            });
        }
        tracing::debug!(
            "SOLR RESPONSE: len = {} in {}ms",
            response_txt.len(),
            t0.elapsed().as_millis()
        );

        extract_highlighting(&response_txt, volume_id, &self.ocr_field)
    }
}

/// Pulls `highlighting[volume_id][ocr_field]` out of a select response body.
pub fn extract_highlighting(body: &str, volume_id: &str, ocr_field: &str) -> ServiceResult<HighlightDocument> {
    let raw: RawSolrResponse = serde_json::from_str(body).map_err(|e| malformed(body, e.to_string()))?;
    let Some(mut highlighting) = raw.highlighting else {
        return Err(malformed(body, "response has no highlighting section".to_string()));
    };
    let Some(mut volume_entry) = highlighting.remove(volume_id) else {
        return Err(ServiceError::VolumeNotIndexed(volume_id.to_string()));
    };
    let Some(field_value) = volume_entry.remove(ocr_field) else {
        tracing::debug!("volume {} has no {} highlights", volume_id, ocr_field);
        return Ok(HighlightDocument::empty());
    };
    serde_json::from_value::<HighlightDocument>(field_value)
        .map_err(|e| malformed(body, format!("{ocr_field} highlights: {e}")))
}

fn malformed(body: &str, detail: String) -> ServiceError {
    tracing::error!(
        "malformed {} payload ({}): shape = {}",
        SERVICE,
        detail,
        payload_shape(body)
    );
    ServiceError::MalformedUpstreamPayload { service: SERVICE, detail }
}

/// Key structure of a JSON payload, two levels deep, without the values.
pub fn payload_shape(body: &str) -> String {
    fn shape(value: &serde_json::Value, depth: usize) -> String {
        match value {
            serde_json::Value::Object(obj) if depth > 0 => {
                let keys = obj
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, shape(v, depth - 1)))
                    .collect::<Vec<_>>();
                format!("{{{}}}", keys.join(", "))
            }
            serde_json::Value::Object(_) => "{..}".to_string(),
            serde_json::Value::Array(items) => format!("[{} items]", items.len()),
            serde_json::Value::String(_) => "string".to_string(),
            serde_json::Value::Number(_) => "number".to_string(),
            serde_json::Value::Bool(_) => "bool".to_string(),
            serde_json::Value::Null => "null".to_string(),
        }
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => shape(&value, 2),
        Err(_) => format!("<non-json, {} bytes>", body.len()),
    }
}

fn escape_phrase(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
