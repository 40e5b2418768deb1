/// Static route management
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::models::{ListResponse, StaticRoute, StaticRouteCreateRequest, StaticRouteUpdateRequest};
use super::object_path;
use super::options::{list_path, SearchOptions};
use crate::api::Transport;
use crate::error::Result;

const ENDPOINT: &str = "configuration/v1/static_route/";

/// Static route operations: list, get, create, update, delete
pub struct StaticRoutes<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> StaticRoutes<'a, T> {
    pub(crate) fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// List static routes
    pub async fn list(
        &self,
        ctx: &CancellationToken,
        options: Option<&SearchOptions>,
    ) -> Result<ListResponse<StaticRoute>> {
        self.transport
            .get_json(ctx, &list_path(ENDPOINT, options))
            .await
    }

    /// Get static route by ID
    pub async fn get(&self, ctx: &CancellationToken, id: i64) -> Result<StaticRoute> {
        self.transport.get_json(ctx, &object_path(ENDPOINT, id)).await
    }

    /// Create a static route; the server returns the stored route
    pub async fn create(
        &self,
        ctx: &CancellationToken,
        request: &StaticRouteCreateRequest,
    ) -> Result<StaticRoute> {
        debug!(
            "Creating static route {} to {}/{} via {}",
            request.name, request.address, request.prefix, request.gateway
        );
        self.transport.post_json(ctx, ENDPOINT, request).await
    }

    /// Update a static route
    pub async fn update(
        &self,
        ctx: &CancellationToken,
        id: i64,
        request: &StaticRouteUpdateRequest,
    ) -> Result<StaticRoute> {
        self.transport
            .put_json(ctx, &object_path(ENDPOINT, id), request)
            .await
    }

    /// Delete a static route
    pub async fn delete(&self, ctx: &CancellationToken, id: i64) -> Result<()> {
        self.transport
            .delete_json(ctx, &object_path(ENDPOINT, id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{mock_service, single_request, PREFIX};
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    fn route_json(id: i64, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "address": "172.16.0.0",
            "prefix": 16,
            "gateway": "192.168.1.1",
            "resource_uri": format!("/api/admin/configuration/v1/static_route/{}/", id)
        })
    }

    #[tokio::test]
    async fn test_list_with_limit_and_search() {
        let (server, service) = mock_service().await;

        Mock::given(method("GET"))
            .and(path(format!("{}/static_route/", PREFIX)))
            .and(query_param("limit", "2"))
            .and(query_param("name__icontains", "route"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meta": {
                    "limit": 2,
                    "offset": 0,
                    "total_count": 3,
                    "next": "/api/admin/configuration/v1/static_route/?limit=2&name__icontains=route&offset=2",
                    "previous": null
                },
                "objects": [route_json(1, "route-a"), route_json(2, "route-b")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let options = SearchOptions::new().limit(2).search("route");
        let routes = service
            .static_routes()
            .list(&CancellationToken::new(), Some(&options))
            .await
            .unwrap();

        assert_eq!(routes.meta.total_count, 3);
        assert!(routes.meta.next.is_some());
        let names: Vec<_> = routes.objects.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["route-a", "route-b"]);

        let request = single_request(&server).await;
        assert_eq!(request.url.query(), Some("limit=2&name__icontains=route"));
    }

    #[tokio::test]
    async fn test_get() {
        let (server, service) = mock_service().await;

        Mock::given(method("GET"))
            .and(path(format!("{}/static_route/1/", PREFIX)))
            .respond_with(ResponseTemplate::new(200).set_body_json(route_json(1, "office")))
            .expect(1)
            .mount(&server)
            .await;

        let route = service
            .static_routes()
            .get(&CancellationToken::new(), 1)
            .await
            .unwrap();
        assert_eq!(route.id, Some(1));
        assert_eq!(route.prefix, 16);
        assert_eq!(route.gateway, "192.168.1.1");
    }

    #[tokio::test]
    async fn test_create_returns_decoded_route() {
        let (server, service) = mock_service().await;

        Mock::given(method("POST"))
            .and(path(format!("{}/static_route/", PREFIX)))
            .and(body_json(json!({
                "name": "new-route",
                "address": "172.16.0.0",
                "prefix": 16,
                "gateway": "192.168.1.1"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(route_json(7, "new-route")))
            .expect(1)
            .mount(&server)
            .await;

        let request = StaticRouteCreateRequest {
            name: "new-route".to_string(),
            address: "172.16.0.0".to_string(),
            prefix: 16,
            gateway: "192.168.1.1".to_string(),
        };
        let route = service
            .static_routes()
            .create(&CancellationToken::new(), &request)
            .await
            .unwrap();
        assert_eq!(route.id, Some(7));
        assert_eq!(
            route.resource_uri.as_deref(),
            Some("/api/admin/configuration/v1/static_route/7/")
        );
    }

    #[tokio::test]
    async fn test_update_sends_only_set_fields() {
        let (server, service) = mock_service().await;

        Mock::given(method("PUT"))
            .and(path(format!("{}/static_route/1/", PREFIX)))
            .and(body_json(json!({"gateway": "192.168.1.254"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1,
                "name": "office",
                "address": "172.16.0.0",
                "prefix": 16,
                "gateway": "192.168.1.254"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = StaticRouteUpdateRequest {
            gateway: Some("192.168.1.254".to_string()),
            ..Default::default()
        };
        let route = service
            .static_routes()
            .update(&CancellationToken::new(), 1, &request)
            .await
            .unwrap();
        assert_eq!(route.gateway, "192.168.1.254");
    }

    #[tokio::test]
    async fn test_delete() {
        let (server, service) = mock_service().await;

        Mock::given(method("DELETE"))
            .and(path(format!("{}/static_route/1/", PREFIX)))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        service
            .static_routes()
            .delete(&CancellationToken::new(), 1)
            .await
            .unwrap();
    }
}
