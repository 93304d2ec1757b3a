//! `GET /{volume_id}/manifest`

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use common::manifest::Manifest;
use tracing::info;

use crate::api::manifest::get_manifest;
use crate::api::validate_volume_id;
use crate::error::ServiceResult;
use crate::server_extra::app_state::AppState;

async fn _manifest(state: &AppState, volume_id: String) -> ServiceResult<Manifest> {
    info!("Manifest: {}", volume_id);
    validate_volume_id(&volume_id)?;
    get_manifest(
        &volume_id,
        &state.hocr_root,
        &state.hocr_file_name,
        &state.ids,
        &state.images,
        &state.manifest_options,
    )
    .await
}

pub async fn manifest(State(state): State<Arc<AppState>>, Path(volume_id): Path<String>) -> Response {
    match _manifest(&state, volume_id).await {
        Ok(manifest) => Json(manifest).into_response(),
        Err(e) => {
            tracing::error!("manifest: request failed: {:#}", e);
            e.into_response()
        }
    }
}
