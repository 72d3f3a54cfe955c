//! Entry points presentation code calls for a collection.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use super::debounce::Debouncer;
use super::fetcher::PageFetcher;
use super::orchestrator::{Dispatch, Listing, Outcome};
use super::query::PageQuery;
use super::view::ListingView;

/// Tunables shared by every collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingSettings {
  pub page_size: u64,
  pub ttl: Duration,
  pub max_entries: Option<usize>,
  pub debounce: Duration,
}

impl Default for ListingSettings {
  fn default() -> Self {
    Self {
      page_size: 10,
      ttl: Duration::from_secs(5 * 60),
      max_entries: None,
      debounce: Duration::from_millis(500),
    }
  }
}

/// Couples a [`Listing`] with debounced search input.
///
/// Search text changes are delayed until typing goes quiet and always
/// restart at the first page. Category and page changes fetch right away;
/// a category change restarts at the first page, a page change keeps the
/// filters of the last issued query.
pub struct ListController<R> {
  listing: Listing<R>,
  search: Debouncer<String>,
}

impl<R: Clone + Send + 'static> ListController<R> {
  pub fn new(
    collection: &'static str,
    fetcher: Arc<dyn PageFetcher<R>>,
    settings: ListingSettings,
  ) -> Self {
    let listing = Listing::new(collection, fetcher, settings.page_size, settings.ttl)
      .with_max_entries(settings.max_entries);
    Self {
      listing,
      search: Debouncer::new(settings.debounce),
    }
  }

  pub fn view(&self) -> &ListingView<R> {
    self.listing.view()
  }

  /// Filters and page of the last issued query
  pub fn committed(&self) -> &PageQuery {
    self.listing.last_query()
  }

  /// Pages held in the cache, fresh or not
  pub fn cached_pages(&self) -> usize {
    self.listing.cache_len()
  }

  pub fn search_pending(&self) -> bool {
    self.search.is_pending()
  }

  /// Fetch the first page with the current filters.
  pub fn load(&mut self) -> Dispatch {
    let query = self.committed().clone().at_offset(0);
    self.listing.fetch(query)
  }

  /// Re-issue the last query. Served from cache while it is fresh.
  pub fn reload(&mut self) -> Dispatch {
    self.listing.refetch()
  }

  pub fn on_search_text_changed(&mut self, text: impl Into<String>) {
    self.search.schedule(text.into(), Instant::now());
  }

  /// Run a pending search now instead of waiting out the quiet period.
  pub fn submit_search(&mut self) -> Option<Dispatch> {
    let text = self.search.flush()?;
    Some(self.run_search(text))
  }

  fn run_search(&mut self, text: String) -> Dispatch {
    debug!(collection = self.listing.collection(), search = %text, "search settled");
    let query = self
      .committed()
      .clone()
      .with_search(Some(text))
      .at_offset(0);
    self.listing.fetch(query)
  }

  pub fn set_category(&mut self, category: Option<String>) -> Dispatch {
    let query = self
      .committed()
      .clone()
      .with_category(category)
      .at_offset(0);
    self.listing.fetch(query)
  }

  /// Zero-based index of the displayed page.
  ///
  /// Uses the requested page size: the response's `limit` shrinks on the
  /// last page.
  pub fn page_index(&self) -> u64 {
    self.view().offset / self.committed().page_size.max(1)
  }

  pub fn page_count(&self) -> u64 {
    self.view().total.div_ceil(self.committed().page_size.max(1))
  }

  /// Jump to a zero-based page, clamped to the known page count.
  pub fn set_page(&mut self, index: u64) -> Dispatch {
    let page_count = self.page_count();
    let index = if page_count > 0 {
      index.min(page_count - 1)
    } else {
      0
    };
    let committed = self.committed().clone();
    let offset = index * committed.page_size;
    self.listing.fetch(committed.at_offset(offset))
  }

  pub fn next_page(&mut self) -> Option<Dispatch> {
    let next = self.page_index() + 1;
    (next < self.page_count()).then(|| self.set_page(next))
  }

  pub fn prev_page(&mut self) -> Option<Dispatch> {
    let current = self.page_index();
    (current > 0).then(|| self.set_page(current - 1))
  }

  pub fn clear_cache(&mut self) {
    self.listing.clear_cache();
  }

  /// Fire a due search, then apply finished responses.
  pub fn tick(&mut self) -> Vec<Outcome> {
    if let Some(text) = self.search.take_due(Instant::now()) {
      self.run_search(text);
    }
    self.listing.poll()
  }
}
