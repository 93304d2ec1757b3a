//! Request-scoped pipelines behind the HTTP routes.

use crate::error::{ServiceError, ServiceResult};

pub mod manifest;
pub mod search;

/// Volume ids name a directory and an index filter, so they must be a single plain path segment.
pub fn validate_volume_id(volume_id: &str) -> ServiceResult<()> {
    let unsafe_id = volume_id.is_empty()
        || volume_id.contains(['/', '\\'])
        || volume_id.contains("..");
    if unsafe_id {
        return Err(ServiceError::BadRequest(format!("invalid volume id: {volume_id:?}")));
    }
    Ok(())
}
