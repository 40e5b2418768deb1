//! Client for the conferencing platform's `configuration/v1` management API.
//!
//! Covers licence requests, log levels, static routes, software bundles and
//! system backups. Each resource exposes only the operations the server
//! supports on it.
//!
//! ```rust,no_run
//! use conference_admin::{ApiClient, ConfigurationService, SearchOptions};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> conference_admin::Result<()> {
//! let client = ApiClient::new("https://infinity.example.com/api/admin/", "admin", "secret")?;
//! let service = ConfigurationService::new(client);
//! let ctx = CancellationToken::new();
//!
//! let options = SearchOptions::new().limit(2).search("route");
//! let routes = service.static_routes().list(&ctx, Some(&options)).await?;
//! for route in &routes.objects {
//!     println!("{} {}/{} via {}", route.name, route.address, route.prefix, route.gateway);
//! }
//! # Ok(())
//! # }
//! ```
pub mod api;
pub mod config;
pub mod configuration;
pub mod error;
pub mod utils;

pub use api::{ApiClient, PostResponse, Transport};
pub use config::ClientConfig;
pub use configuration::{ConfigurationService, ListOptions, ListResponse, SearchOptions};
pub use error::{Error, Result};
pub use utils::InfinityTime;
