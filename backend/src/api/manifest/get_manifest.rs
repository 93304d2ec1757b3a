//! Manifest endpoint logic: read the volume's hOCR, then assemble.

use std::path::Path;

use common::manifest::Manifest;

use crate::api::manifest::assemble_manifest::{ManifestOptions, assemble_manifest};
use crate::error::ServiceResult;
use crate::resource_ids::IdentifierGenerator;
use crate::service_utils::hocr_utils::load_manifest_input;
use crate::service_utils::image_info_utils::ImageInfoLookup;

pub async fn get_manifest<L>(
    volume_id: &str,
    hocr_root: &Path,
    hocr_file_name: &str,
    ids: &IdentifierGenerator,
    images: &L,
    options: &ManifestOptions,
) -> ServiceResult<Manifest>
where
    L: ImageInfoLookup + Sync,
{
    let input = load_manifest_input(hocr_root, volume_id, hocr_file_name).await?;
    tracing::debug!(
        "volume {}: {} pages, {} metadata fields",
        volume_id,
        input.pages.len(),
        input.metadata.len()
    );
    assemble_manifest(volume_id, &input, ids, images, options).await
}
