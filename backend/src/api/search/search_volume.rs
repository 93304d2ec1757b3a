//! Content Search endpoint logic: one highlight query, reshaped.

use common::content_search::ContentSearchResponse;

use crate::api::search::reshape_highlights::{SearchRequest, reshape_highlights};
use crate::error::ServiceResult;
use crate::resource_ids::IdentifierGenerator;
use crate::service_utils::solr_utils::SolrClient;

pub async fn search_volume(
    solr: &SolrClient,
    ids: &IdentifierGenerator,
    request: &SearchRequest,
) -> ServiceResult<ContentSearchResponse> {
    let document = solr.highlight(&request.query, &request.volume_id).await?;
    tracing::debug!(
        "volume {}: {} snippets, {} matches, {} boxes",
        request.volume_id,
        document.snippets.len(),
        document.group_count(),
        document.box_count()
    );
    reshape_highlights(&document, request, ids, solr.tags())
}
