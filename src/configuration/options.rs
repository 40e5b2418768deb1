/// Query-string encoding for list filters
use url::form_urlencoded;

/// Server-side name for the free-text filter
const SEARCH_PARAM: &str = "name__icontains";

/// Pagination and sort options shared by every list endpoint.
///
/// Zero and empty values are left to the server's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub limit: u32,
    pub offset: u32,
    pub ordering: String,
}

/// [`ListOptions`] plus a case-insensitive name filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub base: ListOptions,
    pub search: String,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.base.limit = limit;
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.base.offset = offset;
        self
    }

    pub fn ordering(mut self, ordering: impl Into<String>) -> Self {
        self.base.ordering = ordering.into();
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Encoded query string without the leading `?`.
    ///
    /// Parameters appear as `limit`, `offset`, `ordering`, `name__icontains`,
    /// each only when set.
    pub fn to_query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if self.base.limit > 0 {
            query.append_pair("limit", &self.base.limit.to_string());
        }
        if self.base.offset > 0 {
            query.append_pair("offset", &self.base.offset.to_string());
        }
        if !self.base.ordering.is_empty() {
            query.append_pair("ordering", &self.base.ordering);
        }
        if !self.search.is_empty() {
            query.append_pair(SEARCH_PARAM, &self.search);
        }
        query.finish()
    }
}

/// Append the encoded options to `endpoint`, adding `?` only when needed
pub(crate) fn list_path(endpoint: &str, options: Option<&SearchOptions>) -> String {
    match options.map(SearchOptions::to_query) {
        Some(query) if !query.is_empty() => format!("{}?{}", endpoint, query),
        _ => endpoint.to_string(),
    }
}
