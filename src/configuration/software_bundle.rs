/// Software bundle revision selection
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::models::{ListResponse, SoftwareBundle, SoftwareBundleUpdateRequest};
use super::object_path;
use super::options::{list_path, SearchOptions};
use crate::api::Transport;
use crate::error::Result;

const ENDPOINT: &str = "configuration/v1/software_bundle/";

/// Software bundle operations: list, get, update
pub struct SoftwareBundles<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> SoftwareBundles<'a, T> {
    pub(crate) fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// List software bundles
    pub async fn list(
        &self,
        ctx: &CancellationToken,
        options: Option<&SearchOptions>,
    ) -> Result<ListResponse<SoftwareBundle>> {
        self.transport
            .get_json(ctx, &list_path(ENDPOINT, options))
            .await
    }

    /// Get software bundle by ID
    pub async fn get(&self, ctx: &CancellationToken, id: i64) -> Result<SoftwareBundle> {
        self.transport.get_json(ctx, &object_path(ENDPOINT, id)).await
    }

    /// Change the selected revision.
    ///
    /// Only `selected_revision` is sent; `bundle_type` cannot be changed.
    pub async fn update(
        &self,
        ctx: &CancellationToken,
        id: i64,
        request: &SoftwareBundleUpdateRequest,
    ) -> Result<SoftwareBundle> {
        debug!(
            "Updating software bundle {} selection: {:?}",
            id, request.selected_revision
        );
        self.transport
            .put_json(ctx, &object_path(ENDPOINT, id), request)
            .await
    }
}
