/// Configuration API data models
use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::InfinityTime;

/// Pagination metadata of a list response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMeta {
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub total_count: u32,
    /// URI of the next page; empty or null on the wire both mean none
    #[serde(default, deserialize_with = "empty_as_none")]
    pub next: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub previous: Option<String>,
}

/// List envelope returned by every list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default)]
    pub meta: ListMeta,
    pub objects: Vec<T>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// Licence request resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenceRequest {
    pub sequence_number: String,
    pub reference: String,
    /// Action verb such as `ISSUE` or `UPGRADE`
    pub actions: String,
    /// RFC-3339 timestamp set by the server
    pub generation_time: String,
    /// `PENDING`, `COMPLETED`, ...
    pub status: String,
    /// Licensing server reply, once available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_xml: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
}

/// Request structure for creating a licence request
#[derive(Debug, Clone, Default, Serialize)]
pub struct LicenceRequestCreateRequest {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub reference: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub actions: String,
}

/// Per-component logging level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogLevel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    /// `DEBUG`, `INFO`, `WARN`, `ERROR`, ...
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
}

/// Request structure for creating a log level
#[derive(Debug, Clone, Default, Serialize)]
pub struct LogLevelCreateRequest {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub level: String,
}

/// Request structure for updating a log level; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, Serialize)]
pub struct LogLevelUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

/// Static network route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticRoute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    /// IPv4 or IPv6 network address
    pub address: String,
    /// CIDR prefix length
    pub prefix: i64,
    /// Next-hop address
    pub gateway: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
}

/// Request structure for creating a static route
#[derive(Debug, Clone, Default, Serialize)]
pub struct StaticRouteCreateRequest {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,
    /// Always sent: 0 is a valid prefix for a default route
    pub prefix: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub gateway: String,
}

/// Request structure for updating a static route; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, Serialize)]
pub struct StaticRouteUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
}

/// Installable software bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftwareBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Server-defined category, fixed at creation
    pub bundle_type: String,
    /// Chosen revision; `None` when no revision is selected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_revision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
}

/// Request structure for updating a software bundle.
///
/// `None` omits the key, `Some(None)` sends an explicit null to clear the
/// selection and `Some(Some(rev))` selects `rev`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SoftwareBundleUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_revision: Option<Option<String>>,
}

impl SoftwareBundleUpdateRequest {
    /// Select `revision`
    pub fn select(revision: impl Into<String>) -> Self {
        Self {
            selected_revision: Some(Some(revision.into())),
        }
    }

    /// Clear the selected revision
    pub fn clear() -> Self {
        Self {
            selected_revision: Some(None),
        }
    }
}

/// System backup archive stored on the management node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemBackup {
    /// Primary key and path segment
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<InfinityTime>,
    pub build: String,
    pub version: String,
    /// Size in bytes
    pub size: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
}
