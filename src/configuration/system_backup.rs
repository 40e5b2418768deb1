/// System backup listing and removal
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::models::{ListResponse, SystemBackup};
use super::object_path;
use super::options::{list_path, SearchOptions};
use crate::api::Transport;
use crate::error::Result;

const ENDPOINT: &str = "configuration/v1/system_backup/";

/// System backup operations: list, get, delete.
///
/// Backups are keyed by filename, which is placed in the path verbatim.
/// Callers must pass a path-safe filename.
pub struct SystemBackups<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> SystemBackups<'a, T> {
    pub(crate) fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// List system backups
    pub async fn list(
        &self,
        ctx: &CancellationToken,
        options: Option<&SearchOptions>,
    ) -> Result<ListResponse<SystemBackup>> {
        self.transport
            .get_json(ctx, &list_path(ENDPOINT, options))
            .await
    }

    /// Get system backup by filename
    pub async fn get(&self, ctx: &CancellationToken, filename: &str) -> Result<SystemBackup> {
        self.transport
            .get_json(ctx, &object_path(ENDPOINT, filename))
            .await
    }

    /// Delete a system backup
    pub async fn delete(&self, ctx: &CancellationToken, filename: &str) -> Result<()> {
        info!("Deleting system backup: {}", filename);
        self.transport
            .delete_json(ctx, &object_path(ENDPOINT, filename))
            .await
    }
}
