/// Log level management
use tokio_util::sync::CancellationToken;

use super::models::{ListResponse, LogLevel, LogLevelCreateRequest, LogLevelUpdateRequest};
use super::object_path;
use super::options::{list_path, SearchOptions};
use crate::api::{PostResponse, Transport};
use crate::error::Result;

const ENDPOINT: &str = "configuration/v1/log_level/";

/// Log level operations: list, get, create, update, delete
pub struct LogLevels<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> LogLevels<'a, T> {
    pub(crate) fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// List log levels
    pub async fn list(
        &self,
        ctx: &CancellationToken,
        options: Option<&SearchOptions>,
    ) -> Result<ListResponse<LogLevel>> {
        self.transport
            .get_json(ctx, &list_path(ENDPOINT, options))
            .await
    }

    /// Get log level by ID
    pub async fn get(&self, ctx: &CancellationToken, id: i64) -> Result<LogLevel> {
        self.transport.get_json(ctx, &object_path(ENDPOINT, id)).await
    }

    /// Create a log level.
    ///
    /// The created record is not decoded; its location is in
    /// [`PostResponse::resource_uri`].
    pub async fn create(
        &self,
        ctx: &CancellationToken,
        request: &LogLevelCreateRequest,
    ) -> Result<PostResponse> {
        self.transport
            .post_with_response(ctx, ENDPOINT, request)
            .await
    }

    /// Update a log level
    pub async fn update(
        &self,
        ctx: &CancellationToken,
        id: i64,
        request: &LogLevelUpdateRequest,
    ) -> Result<LogLevel> {
        self.transport
            .put_json(ctx, &object_path(ENDPOINT, id), request)
            .await
    }

    /// Delete a log level
    pub async fn delete(&self, ctx: &CancellationToken, id: i64) -> Result<()> {
        self.transport
            .delete_json(ctx, &object_path(ENDPOINT, id))
            .await
    }
}
