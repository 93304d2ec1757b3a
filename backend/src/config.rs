//! Service configuration read from the environment.

use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    /// Prefix of every URI this service mints, without a trailing slash.
    pub public_base_url: String,
    pub solr_url: String,
    pub solr_ocr_field: String,
    pub solr_snippet_limit: u32,
    pub highlight_tag_pre: String,
    pub highlight_tag_post: String,
    pub image_server_url: String,
    pub hocr_root: PathBuf,
    pub hocr_file_name: String,
    pub image_lookup_concurrency: usize,
    pub upstream_timeout: Duration,
    pub manifest_attribution: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8008)),
            public_base_url: "http://localhost:8008".to_string(),
            solr_url: "http://127.0.0.1:8983/solr/ocrtest/select".to_string(),
            solr_ocr_field: "ocr_text".to_string(),
            solr_snippet_limit: 4096,
            highlight_tag_pre: "<em>".to_string(),
            highlight_tag_post: "</em>".to_string(),
            image_server_url: "http://localhost:8080".to_string(),
            hocr_root: PathBuf::from("../google1000"),
            hocr_file_name: "hOCR.html".to_string(),
            image_lookup_concurrency: 8,
            upstream_timeout: Duration::from_secs(30),
            manifest_attribution: "Provided by Google via Google Books 1000 dataset".to_string(),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        let config = Self {
            bind_addr: match std::env::var("BIND_ADDR") {
                Ok(addr) => addr.parse().with_context(|| format!("BIND_ADDR is not a socket address: {addr}"))?,
                Err(_) => defaults.bind_addr,
            },
            public_base_url: env_or("PUBLIC_BASE_URL", defaults.public_base_url)
                .trim_end_matches('/')
                .to_string(),
            solr_url: env_or("SOLR_URL", defaults.solr_url),
            solr_ocr_field: env_or("SOLR_OCR_FIELD", defaults.solr_ocr_field),
            solr_snippet_limit: env_parse("SOLR_SNIPPET_LIMIT", defaults.solr_snippet_limit)?,
            highlight_tag_pre: env_or("HIGHLIGHT_TAG_PRE", defaults.highlight_tag_pre),
            highlight_tag_post: env_or("HIGHLIGHT_TAG_POST", defaults.highlight_tag_post),
            image_server_url: env_or("IMAGE_SERVER_URL", defaults.image_server_url)
                .trim_end_matches('/')
                .to_string(),
            hocr_root: std::env::var("HOCR_ROOT").map(PathBuf::from).unwrap_or(defaults.hocr_root),
            hocr_file_name: env_or("HOCR_FILE_NAME", defaults.hocr_file_name),
            image_lookup_concurrency: env_parse("IMAGE_LOOKUP_CONCURRENCY", defaults.image_lookup_concurrency)?
                .max(1),
            upstream_timeout: Duration::from_secs(env_parse(
                "UPSTREAM_TIMEOUT_SECS",
                defaults.upstream_timeout.as_secs(),
            )?),
            manifest_attribution: env_or("MANIFEST_ATTRIBUTION", defaults.manifest_attribution),
        };
        Ok(config)
    }
}

fn env_or(name: &str, default: String) -> String {
    std::env::var(name).unwrap_or(default)
}

fn env_parse<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{name} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
