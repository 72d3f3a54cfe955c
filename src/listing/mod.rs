//! Client-side fetch and cache orchestration for paginated collections.
//!
//! This module is API-agnostic:
//! - `query`: page queries, cache keys and endpoint selection
//! - `cache`: in-memory result cache with lazy TTL expiry
//! - `orchestrator`: cache-first fetching with stale-response discard
//! - `debounce` / `controller`: search debouncing and page/filter coupling
//! - `view`: the state presentation code renders

mod cache;
mod controller;
mod debounce;
mod fetcher;
mod orchestrator;
mod query;
mod view;

pub use controller::{ListController, ListingSettings};
pub use fetcher::PageFetcher;
pub use query::{Endpoint, PageRequest};
pub use view::{ListingView, Page, PageSource};
