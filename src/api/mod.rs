mod api_types;
mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{Product, Record, User};
