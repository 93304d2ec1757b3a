//! Long-lived state shared by every request: configuration and pooled HTTP clients.

use std::path::PathBuf;

use anyhow::Context;

use crate::api::manifest::ManifestOptions;
use crate::config::ServiceConfig;
use crate::resource_ids::IdentifierGenerator;
use crate::service_utils::image_info_utils::ImageInfoClient;
use crate::service_utils::solr_utils::SolrClient;

#[derive(Debug, Clone)]
pub struct AppState {
    pub ids: IdentifierGenerator,
    pub solr: SolrClient,
    pub images: ImageInfoClient,
    pub hocr_root: PathBuf,
    pub hocr_file_name: String,
    pub manifest_options: ManifestOptions,
}

impl AppState {
    pub fn new(config: &ServiceConfig) -> anyhow::Result<Self> {
        // one connection pool for both upstreams
        let client = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            ids: IdentifierGenerator::new(&config.public_base_url),
            solr: SolrClient::new(client.clone(), config),
            images: ImageInfoClient::new(client, config),
            hocr_root: config.hocr_root.clone(),
            hocr_file_name: config.hocr_file_name.clone(),
            manifest_options: ManifestOptions {
                attribution: config.manifest_attribution.clone(),
                lookup_concurrency: config.image_lookup_concurrency,
            },
        })
    }
}
