/// reqwest-backed management API client
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use reqwest::{header, Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use super::transport::{PostResponse, Transport};
use crate::config::ClientConfig;
use crate::error::{Error, Result};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP transport for the management API.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

/// Headers and body of a successful exchange
struct Exchange {
    headers: header::HeaderMap,
    body: Bytes,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `https://host/api/admin/`) using
    /// HTTP basic authentication
    pub fn new(base_url: &str, username: &str, password: &str) -> Result<Self> {
        Self::build(base_url, username, password, DEFAULT_TIMEOUT_SECS, false)
    }

    /// Create a client from a loaded configuration file
    pub fn from_config(config: &ClientConfig, password: &str) -> Result<Self> {
        Self::build(
            &config.base_url,
            &config.username,
            password,
            config.timeout_secs,
            config.accept_invalid_certs,
        )
    }

    fn build(
        base_url: &str,
        username: &str,
        password: &str,
        timeout_secs: u64,
        accept_invalid_certs: bool,
    ) -> Result<Self> {
        let credentials = STANDARD.encode(format!("{}:{}", username, password));
        let mut auth = header::HeaderValue::from_str(&format!("Basic {}", credentials))
            .map_err(|e| Error::Config(format!("invalid credentials: {}", e)))?;
        auth.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url)?,
        })
    }

    /// Base URL every request path is resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Run one request/response exchange, racing it against `ctx`.
    ///
    /// Dropping the exchange future on cancellation aborts the request.
    async fn execute(
        &self,
        ctx: &CancellationToken,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Exchange> {
        let url = self.base_url.join(path)?;
        debug!("{} {}", method, url);

        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes().await?;
            Ok::<_, Error>((status, headers, body))
        };

        let (status, headers, body) = tokio::select! {
            biased;
            _ = ctx.cancelled() => {
                warn!("{} {} cancelled", method, url);
                return Err(Error::Cancelled);
            }
            result = exchange => result?,
        };

        check_status(&method, &url, status, &body)?;
        Ok(Exchange { headers, body })
    }
}

#[async_trait]
impl Transport for ApiClient {
    async fn get_json<R>(&self, ctx: &CancellationToken, path: &str) -> Result<R>
    where
        R: DeserializeOwned + Send,
    {
        let exchange = self.execute(ctx, Method::GET, path, None).await?;
        decode(&exchange.body)
    }

    async fn post_json<B, R>(&self, ctx: &CancellationToken, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned + Send,
    {
        let exchange = self
            .execute(ctx, Method::POST, path, Some(encode(body)?))
            .await?;
        decode(&exchange.body)
    }

    async fn post_with_response<B>(
        &self,
        ctx: &CancellationToken,
        path: &str,
        body: &B,
    ) -> Result<PostResponse>
    where
        B: Serialize + Sync + ?Sized,
    {
        let exchange = self
            .execute(ctx, Method::POST, path, Some(encode(body)?))
            .await?;
        let resource_uri = created_resource_uri(&exchange.headers, &exchange.body);
        debug!("Created {}", resource_uri);

        Ok(PostResponse {
            body: exchange.body,
            resource_uri,
        })
    }

    async fn put_json<B, R>(&self, ctx: &CancellationToken, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned + Send,
    {
        let exchange = self
            .execute(ctx, Method::PUT, path, Some(encode(body)?))
            .await?;
        decode(&exchange.body)
    }

    async fn delete_json(&self, ctx: &CancellationToken, path: &str) -> Result<()> {
        self.execute(ctx, Method::DELETE, path, None).await?;
        Ok(())
    }
}

/// Parse the base URL, making sure relative paths resolve beneath it
fn normalize_base_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!("{} cannot be a base URL", base_url)));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn check_status(method: &Method, url: &Url, status: StatusCode, body: &[u8]) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }

    let body = String::from_utf8_lossy(body).into_owned();
    warn!("{} {} failed with status {}", method, url, status);
    Err(Error::Status {
        status: status.as_u16(),
        body,
    })
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>> {
    serde_json::to_vec(body).map_err(Error::Encode)
}

fn decode<R: DeserializeOwned>(body: &[u8]) -> Result<R> {
    serde_json::from_slice(body).map_err(Error::Decode)
}

/// Location header reduced to its path, else a `resource_uri` in the body
fn created_resource_uri(headers: &header::HeaderMap, body: &[u8]) -> String {
    if let Some(location) = headers
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
    {
        return match Url::parse(location) {
            Ok(url) => url.path().to_string(),
            Err(_) => location.to_string(),
        };
    }

    #[derive(Deserialize)]
    struct Created {
        resource_uri: Option<String>,
    }

    serde_json::from_slice::<Created>(body)
        .ok()
        .and_then(|created| created.resource_uri)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header as header_eq, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, ApiClient) {
        let server = MockServer::start().await;
        let client =
            ApiClient::new(&format!("{}/api/admin/", server.uri()), "admin", "secret").unwrap();
        (server, client)
    }

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new("https://infinity.example.com/api/admin", "admin", "secret");
        assert!(client.is_ok());
        assert_eq!(
            client.unwrap().base_url().as_str(),
            "https://infinity.example.com/api/admin/"
        );
    }

    #[test]
    fn test_client_rejects_bad_base_url() {
        assert!(matches!(
            ApiClient::new("not a url", "admin", "secret"),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            ApiClient::new("mailto:admin@example.com", "admin", "secret"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_created_resource_uri_from_absolute_location() {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::LOCATION,
            header::HeaderValue::from_static(
                "https://infinity.example.com/api/admin/configuration/v1/log_level/7/",
            ),
        );
        assert_eq!(
            created_resource_uri(&headers, b""),
            "/api/admin/configuration/v1/log_level/7/"
        );
    }

    #[test]
    fn test_created_resource_uri_from_body() {
        let headers = header::HeaderMap::new();
        let body = br#"{"resource_uri": "/api/admin/configuration/v1/log_level/8/"}"#;
        assert_eq!(
            created_resource_uri(&headers, body),
            "/api/admin/configuration/v1/log_level/8/"
        );
        assert_eq!(created_resource_uri(&headers, b"not json"), "");
    }

    #[tokio::test]
    async fn test_get_sends_basic_auth() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/admin/configuration/v1/log_level/1/"))
            .and(header_eq("authorization", "Basic YWRtaW46c2VjcmV0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let value: serde_json::Value = client
            .get_json(&CancellationToken::new(), "configuration/v1/log_level/1/")
            .await
            .unwrap();
        assert_eq!(value["ok"], true);
    }

    #[tokio::test]
    async fn test_put_sends_json_body() {
        let (server, client) = setup().await;

        Mock::given(method("PUT"))
            .and(path("/api/admin/configuration/v1/log_level/1/"))
            .and(header_eq("content-type", "application/json"))
            .and(body_json(json!({"level": "DEBUG"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"level": "DEBUG"})))
            .expect(1)
            .mount(&server)
            .await;

        let value: serde_json::Value = client
            .put_json(
                &CancellationToken::new(),
                "configuration/v1/log_level/1/",
                &json!({"level": "DEBUG"}),
            )
            .await
            .unwrap();
        assert_eq!(value["level"], "DEBUG");
    }

    #[tokio::test]
    async fn test_error_status_is_surfaced() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/admin/configuration/v1/log_level/99/"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let result: Result<serde_json::Value> = client
            .get_json(
                &CancellationToken::new(),
                "configuration/v1/log_level/99/",
            )
            .await;
        let err = result.unwrap_err();
        match err {
            Error::Status { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/admin/configuration/v1/log_level/1/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result: Result<serde_json::Value> = client
            .get_json(
                &CancellationToken::new(),
                "configuration/v1/log_level/1/",
            )
            .await;
        let err = result.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn test_post_with_response_keeps_body() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/api/admin/configuration/v1/log_level/"))
            .respond_with(
                ResponseTemplate::new(201)
                    .insert_header("Location", "/api/admin/configuration/v1/log_level/3/")
                    .set_body_string("created"),
            )
            .mount(&server)
            .await;

        let response = client
            .post_with_response(
                &CancellationToken::new(),
                "configuration/v1/log_level/",
                &json!({"name": "x", "level": "INFO"}),
            )
            .await
            .unwrap();
        assert_eq!(
            response.resource_uri,
            "/api/admin/configuration/v1/log_level/3/"
        );
        assert_eq!(response.body, Bytes::from_static(b"created"));
    }

    #[tokio::test]
    async fn test_delete_ignores_body() {
        let (server, client) = setup().await;

        Mock::given(method("DELETE"))
            .and(path("/api/admin/configuration/v1/log_level/1/"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client
            .delete_json(&CancellationToken::new(), "configuration/v1/log_level/1/")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_cancelled_before_send() {
        let (_server, client) = setup().await;
        let ctx = CancellationToken::new();
        ctx.cancel();

        let result: Result<serde_json::Value> = client
            .get_json(&ctx, "configuration/v1/log_level/")
            .await;
        let err = result.unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }

    #[tokio::test]
    async fn test_cancel_aborts_in_flight_request() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/admin/configuration/v1/log_level/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_secs(10)),
            )
            .mount(&server)
            .await;

        let ctx = CancellationToken::new();
        let trigger = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let started = std::time::Instant::now();
        let result: Result<serde_json::Value> = client
            .get_json(&ctx, "configuration/v1/log_level/")
            .await;
        let err = result.unwrap_err();
        assert!(matches!(err, Error::Cancelled));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
