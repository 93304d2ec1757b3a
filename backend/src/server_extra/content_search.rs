//! `GET /{volume_id}/search?q=...`

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use common::content_search::ContentSearchResponse;
use tracing::info;

use crate::api::search::{SearchRequest, search_volume};
use crate::api::validate_volume_id;
use crate::error::{ServiceError, ServiceResult};
use crate::server_extra::app_state::AppState;

async fn _content_search(
    state: &AppState,
    volume_id: String,
    params: Vec<(String, String)>,
) -> ServiceResult<ContentSearchResponse> {
    info!("Content search: {} {:?}", volume_id, params);
    validate_volume_id(&volume_id)?;

    let query = params
        .iter()
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.clone())
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ServiceError::BadRequest("missing q parameter".to_string()))?;
    let request = SearchRequest {
        volume_id,
        query,
        ignored: ignored_params(&params),
    };
    search_volume(&state.solr, &state.ids, &request).await
}

/// Every key except `q`, once each, in first-seen order.
pub fn ignored_params(params: &[(String, String)]) -> Vec<String> {
    let mut ignored: Vec<String> = Vec::new();
    for (key, _) in params {
        if key != "q" && !ignored.contains(key) {
            ignored.push(key.clone());
        }
    }
    ignored
}

pub async fn content_search(
    State(state): State<Arc<AppState>>,
    Path(volume_id): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    match _content_search(&state, volume_id, params).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            tracing::error!("content_search: request failed: {:#}", e);
            e.into_response()
        }
    }
}
