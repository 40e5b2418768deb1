//! `configuration/v1` resources.
//!
//! [`ConfigurationService`] hands out one adapter per resource. Each adapter
//! only has methods for the verbs the server supports on that resource:
//!
//! | Resource        | list | get | create | update | delete |
//! |-----------------|:----:|:---:|:------:|:------:|:------:|
//! | licence request |  ✓   |  ✓  |   ✓*   |        |        |
//! | log level       |  ✓   |  ✓  |   ✓*   |   ✓    |   ✓    |
//! | static route    |  ✓   |  ✓  |   ✓    |   ✓    |   ✓    |
//! | software bundle |  ✓   |  ✓  |        |   ✓    |        |
//! | system backup   |  ✓   |  ✓  |        |        |   ✓    |
//!
//! `✓*` creates return a [`PostResponse`] instead of a decoded record.
pub mod licence_request;
pub mod log_level;
pub mod models;
pub mod options;
pub mod software_bundle;
pub mod static_route;
pub mod system_backup;

use std::fmt::Display;

use tokio_util::sync::CancellationToken;

use crate::api::{PostResponse, Transport};
use crate::error::Result;

pub use licence_request::LicenceRequests;
pub use log_level::LogLevels;
pub use models::*;
pub use options::{ListOptions, SearchOptions};
pub use software_bundle::SoftwareBundles;
pub use static_route::StaticRoutes;
pub use system_backup::SystemBackups;

/// Path of a single object beneath `endpoint`; `key` is not percent-encoded
pub(crate) fn object_path(endpoint: &str, key: impl Display) -> String {
    format!("{}{}/", endpoint, key)
}

/// Entry point to the configuration resources.
///
/// Holds no state besides the transport, so a single instance can serve any
/// number of concurrent operations.
pub struct ConfigurationService<T> {
    transport: T,
}

impl<T: Transport> ConfigurationService<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn licence_requests(&self) -> LicenceRequests<'_, T> {
        LicenceRequests::new(&self.transport)
    }

    pub fn log_levels(&self) -> LogLevels<'_, T> {
        LogLevels::new(&self.transport)
    }

    pub fn static_routes(&self) -> StaticRoutes<'_, T> {
        StaticRoutes::new(&self.transport)
    }

    pub fn software_bundles(&self) -> SoftwareBundles<'_, T> {
        SoftwareBundles::new(&self.transport)
    }

    pub fn system_backups(&self) -> SystemBackups<'_, T> {
        SystemBackups::new(&self.transport)
    }

    /// List licence requests
    pub async fn list_licence_requests(
        &self,
        ctx: &CancellationToken,
        options: Option<&SearchOptions>,
    ) -> Result<ListResponse<LicenceRequest>> {
        self.licence_requests().list(ctx, options).await
    }

    /// Get a licence request by sequence number
    pub async fn get_licence_request(
        &self,
        ctx: &CancellationToken,
        sequence_number: &str,
    ) -> Result<LicenceRequest> {
        self.licence_requests().get(ctx, sequence_number).await
    }

    /// Submit a licence request
    pub async fn create_licence_request(
        &self,
        ctx: &CancellationToken,
        request: &LicenceRequestCreateRequest,
    ) -> Result<PostResponse> {
        self.licence_requests().create(ctx, request).await
    }

    /// List log levels
    pub async fn list_log_levels(
        &self,
        ctx: &CancellationToken,
        options: Option<&SearchOptions>,
    ) -> Result<ListResponse<LogLevel>> {
        self.log_levels().list(ctx, options).await
    }

    /// Get a log level by ID
    pub async fn get_log_level(&self, ctx: &CancellationToken, id: i64) -> Result<LogLevel> {
        self.log_levels().get(ctx, id).await
    }

    /// Create a log level
    pub async fn create_log_level(
        &self,
        ctx: &CancellationToken,
        request: &LogLevelCreateRequest,
    ) -> Result<PostResponse> {
        self.log_levels().create(ctx, request).await
    }

    /// Update a log level
    pub async fn update_log_level(
        &self,
        ctx: &CancellationToken,
        id: i64,
        request: &LogLevelUpdateRequest,
    ) -> Result<LogLevel> {
        self.log_levels().update(ctx, id, request).await
    }

    /// Delete a log level
    pub async fn delete_log_level(&self, ctx: &CancellationToken, id: i64) -> Result<()> {
        self.log_levels().delete(ctx, id).await
    }

    /// List static routes
    pub async fn list_static_routes(
        &self,
        ctx: &CancellationToken,
        options: Option<&SearchOptions>,
    ) -> Result<ListResponse<StaticRoute>> {
        self.static_routes().list(ctx, options).await
    }

    /// Get a static route by ID
    pub async fn get_static_route(&self, ctx: &CancellationToken, id: i64) -> Result<StaticRoute> {
        self.static_routes().get(ctx, id).await
    }

    /// Create a static route
    pub async fn create_static_route(
        &self,
        ctx: &CancellationToken,
        request: &StaticRouteCreateRequest,
    ) -> Result<StaticRoute> {
        self.static_routes().create(ctx, request).await
    }

    /// Update a static route
    pub async fn update_static_route(
        &self,
        ctx: &CancellationToken,
        id: i64,
        request: &StaticRouteUpdateRequest,
    ) -> Result<StaticRoute> {
        self.static_routes().update(ctx, id, request).await
    }

    /// Delete a static route
    pub async fn delete_static_route(&self, ctx: &CancellationToken, id: i64) -> Result<()> {
        self.static_routes().delete(ctx, id).await
    }

    /// List software bundles
    pub async fn list_software_bundles(
        &self,
        ctx: &CancellationToken,
        options: Option<&SearchOptions>,
    ) -> Result<ListResponse<SoftwareBundle>> {
        self.software_bundles().list(ctx, options).await
    }

    /// Get a software bundle by ID
    pub async fn get_software_bundle(
        &self,
        ctx: &CancellationToken,
        id: i64,
    ) -> Result<SoftwareBundle> {
        self.software_bundles().get(ctx, id).await
    }

    /// Change the selected revision of a software bundle
    pub async fn update_software_bundle(
        &self,
        ctx: &CancellationToken,
        id: i64,
        request: &SoftwareBundleUpdateRequest,
    ) -> Result<SoftwareBundle> {
        self.software_bundles().update(ctx, id, request).await
    }

    /// List system backups
    pub async fn list_system_backups(
        &self,
        ctx: &CancellationToken,
        options: Option<&SearchOptions>,
    ) -> Result<ListResponse<SystemBackup>> {
        self.system_backups().list(ctx, options).await
    }

    /// Get a system backup by filename
    pub async fn get_system_backup(
        &self,
        ctx: &CancellationToken,
        filename: &str,
    ) -> Result<SystemBackup> {
        self.system_backups().get(ctx, filename).await
    }

    /// Delete a system backup
    pub async fn delete_system_backup(&self, ctx: &CancellationToken, filename: &str) -> Result<()> {
        self.system_backups().delete(ctx, filename).await
    }
}
