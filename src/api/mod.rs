/// JSON-over-HTTP transport for the management API
pub mod client;
pub mod transport;

pub use client::ApiClient;
pub use transport::{PostResponse, Transport};
