/// Shared helpers
pub mod time;

pub use time::InfinityTime;
