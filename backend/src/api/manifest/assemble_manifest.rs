//! Builds a IIIF Presentation manifest from page metadata and image dimensions.

use common::manifest::{Canvas, Manifest, MetadataPair, Sequence};
use common::page_metadata::{ManifestInput, PageEntry};
use futures::{StreamExt, TryStreamExt};

use crate::error::{ServiceError, ServiceResult};
use crate::resource_ids::IdentifierGenerator;
use crate::service_utils::image_info_utils::ImageInfoLookup;

#[derive(Debug, Clone)]
pub struct ManifestOptions {
    pub attribution: String,
    /// Upper bound on image-info requests in flight for one manifest.
    pub lookup_concurrency: usize,
}

pub async fn assemble_manifest<L>(
    volume_id: &str,
    input: &ManifestInput,
    ids: &IdentifierGenerator,
    images: &L,
    options: &ManifestOptions,
) -> ServiceResult<Manifest>
where
    L: ImageInfoLookup + Sync,
{
    let label = input.title().unwrap_or(volume_id).to_string();
    let metadata = input
        .metadata
        .iter()
        .map(|field| MetadataPair {
            label: field.key.clone(),
            value: field.value.clone(),
        })
        .collect::<Vec<_>>();

    // collect first: a `.map(closure)` stage here makes the handler future non-`Send`.
    // `buffered` yields in input order whatever order the lookups finish in
    let lookups = input
        .pages
        .iter()
        .map(|page| build_canvas(volume_id, page, ids, images))
        .collect::<Vec<_>>();
    let canvases = futures::stream::iter(lookups)
        .buffered(options.lookup_concurrency.max(1))
        .try_collect::<Vec<_>>()
        .await?;

    let sequence = Sequence::new(ids.generate(volume_id, "sequence"), canvases);
    Ok(Manifest::new(
        ids.manifest_uri(volume_id),
        label,
        metadata,
        options.attribution.clone(),
        ids.search_service_uri(volume_id),
        sequence,
    ))
}

async fn build_canvas<L>(
    volume_id: &str,
    page: &PageEntry,
    ids: &IdentifierGenerator,
    images: &L,
) -> ServiceResult<Canvas>
where
    L: ImageInfoLookup + Sync,
{
    let image_url = images.image_base_url(volume_id, page.image_index());
    let size = images.info(&image_url).await.map_err(|e| match e {
        ServiceError::MalformedUpstreamPayload { service, detail } => ServiceError::MalformedUpstreamPayload {
            service,
            detail: format!("page {}: {}", page.id, detail),
        },
        other => ServiceError::ImageMetadataUnavailable {
            page_id: page.id.clone(),
            reason: other.to_string(),
        },
    })?;
    Ok(Canvas::new(ids.canvas_uri(volume_id, &page.id), &image_url, size))
}
