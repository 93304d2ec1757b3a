//! Client for the IIIF image server's `info.json` documents.

use common::image_info::ImageSize;

use crate::config::ServiceConfig;
use crate::error::{ServiceError, ServiceResult};

const SERVICE: &str = "image server";

/// An image service: knows where a page image lives and how big it is.
pub trait ImageInfoLookup {
    /// IIIF Image API base URL for a zero-based page index.
    fn image_base_url(&self, volume_id: &str, image_index: u32) -> String;

    fn info(&self, image_base_url: &str) -> impl Future<Output = ServiceResult<ImageSize>> + Send;
}

#[derive(Debug, Clone)]
pub struct ImageInfoClient {
    client: reqwest::Client,
    image_server_url: String,
}

impl ImageInfoClient {
    pub fn new(client: reqwest::Client, config: &ServiceConfig) -> Self {
        Self {
            client,
            image_server_url: config.image_server_url.clone(),
        }
    }
}

pub fn image_base_url(image_server_url: &str, volume_id: &str, image_index: u32) -> String {
    format!("{}/{}/Image_{:04}.JPEG", image_server_url, volume_id, image_index)
}

impl ImageInfoLookup for ImageInfoClient {
    /// `{server}/{volume_id}/Image_{index:04}.JPEG`
    fn image_base_url(&self, volume_id: &str, image_index: u32) -> String {
        image_base_url(&self.image_server_url, volume_id, image_index)
    }

    async fn info(&self, image_base_url: &str) -> ServiceResult<ImageSize> {
        let info_url = format!("{}/info.json", image_base_url);
        tracing::debug!("IMAGE INFO: {}", info_url);
        let response = self
            .client
            .get(&info_url)
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
                reason: format!("{} for {}", status, info_url),
            });
        }
        serde_json::from_str::<ImageSize>(&response_txt).map_err(|e| {
            tracing::error!(
                "malformed {} payload for {}: {}: shape = {}",
                SERVICE,
                info_url,
                e,
                crate::service_utils::solr_utils::payload_shape(&response_txt)
            );
            ServiceError::MalformedUpstreamPayload {
                service: SERVICE,
                detail: format!("{}: {}", info_url, e),
            }
        })
    }
}
