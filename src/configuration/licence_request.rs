/// Licence request submission and lookup
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::models::{LicenceRequest, LicenceRequestCreateRequest, ListResponse};
use super::object_path;
use super::options::{list_path, SearchOptions};
use crate::api::{PostResponse, Transport};
use crate::error::Result;

const ENDPOINT: &str = "configuration/v1/licence_request/";

/// Licence request operations: list, get, create
pub struct LicenceRequests<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> LicenceRequests<'a, T> {
    pub(crate) fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// List licence requests
    pub async fn list(
        &self,
        ctx: &CancellationToken,
        options: Option<&SearchOptions>,
    ) -> Result<ListResponse<LicenceRequest>> {
        self.transport
            .get_json(ctx, &list_path(ENDPOINT, options))
            .await
    }

    /// Get licence request by sequence number.
    ///
    /// The sequence number is used as a path segment verbatim; callers must
    /// pass a path-safe value.
    pub async fn get(&self, ctx: &CancellationToken, sequence_number: &str) -> Result<LicenceRequest> {
        self.transport
            .get_json(ctx, &object_path(ENDPOINT, sequence_number))
            .await
    }

    /// Submit a licence request.
    ///
    /// The server assigns the sequence number; it is only available through
    /// [`PostResponse::resource_uri`].
    pub async fn create(
        &self,
        ctx: &CancellationToken,
        request: &LicenceRequestCreateRequest,
    ) -> Result<PostResponse> {
        debug!(
            "Submitting licence request {} ({})",
            request.reference, request.actions
        );
        self.transport
            .post_with_response(ctx, ENDPOINT, request)
            .await
    }
}
