/// Transport contract consumed by the resource adapters
use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::Result;

/// Outcome of a POST whose created record is not decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostResponse {
    /// Raw response body as received
    pub body: Bytes,
    /// Canonical path of the created resource, empty if the server sent none
    pub resource_uri: String,
}

/// JSON-over-HTTP primitives.
///
/// Paths are relative to a base URL owned by the implementation and may carry
/// an inline query string. Every call performs one request/response exchange
/// and must give up with [`crate::Error::Cancelled`] once `ctx` is cancelled.
/// Implementations must tolerate concurrent calls through `&self`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `path` and decode the body
    async fn get_json<R>(&self, ctx: &CancellationToken, path: &str) -> Result<R>
    where
        R: DeserializeOwned + Send;

    /// POST `body` to `path` and decode the response
    async fn post_json<B, R>(&self, ctx: &CancellationToken, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned + Send;

    /// POST `body` to `path` and return the raw body with the new resource's URI
    async fn post_with_response<B>(
        &self,
        ctx: &CancellationToken,
        path: &str,
        body: &B,
    ) -> Result<PostResponse>
    where
        B: Serialize + Sync + ?Sized;

    /// PUT `body` to `path` and decode the response
    async fn put_json<B, R>(&self, ctx: &CancellationToken, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned + Send;

    /// DELETE `path`, ignoring any response body
    async fn delete_json(&self, ctx: &CancellationToken, path: &str) -> Result<()>;
}
