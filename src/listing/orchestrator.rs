//! Cache-first fetching for a single collection.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use super::cache::CacheTable;
use super::fetcher::PageFetcher;
use super::query::{cache_key, PageQuery, PageRequest};
use super::view::{ListingView, Page, PageSource};
use crate::error::FetchError;

/// How a `fetch` call was served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
  /// Fresh cache entry, view updated synchronously
  Cached,
  /// Network request issued with this sequence number
  Requested(u64),
}

/// What happened to a response picked up by [`Listing::poll`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  /// Latest request succeeded and is now on display
  Applied,
  /// Latest request failed; the error is on display, records are kept
  Failed(FetchError),
  /// A newer request was issued in the meantime; nothing displayed changed
  StaleDiscarded,
}

/// A finished request, tagged with what it was issued for.
struct Completion<R> {
  seq: u64,
  key: String,
  result: Result<Page<R>, FetchError>,
}

/// Fetch orchestrator: owns the cache and view model for one collection.
///
/// Every `fetch` bumps a sequence number. Responses are delivered over a
/// channel and only the one matching the latest sequence number may touch
/// the view; older successes are still cached.
pub struct Listing<R> {
  collection: &'static str,
  fetcher: Arc<dyn PageFetcher<R>>,
  cache: CacheTable<Page<R>>,
  view: ListingView<R>,
  last_query: PageQuery,
  latest_seq: u64,
  tx: mpsc::UnboundedSender<Completion<R>>,
  rx: mpsc::UnboundedReceiver<Completion<R>>,
}

impl<R: Clone + Send + 'static> Listing<R> {
  pub fn new(
    collection: &'static str,
    fetcher: Arc<dyn PageFetcher<R>>,
    page_size: u64,
    ttl: Duration,
  ) -> Self {
    let (tx, rx) = mpsc::unbounded_channel();
    Self {
      collection,
      fetcher,
      cache: CacheTable::new(ttl),
      view: ListingView::new(page_size),
      last_query: PageQuery::new(0, page_size),
      latest_seq: 0,
      tx,
      rx,
    }
  }

  /// Bound the cache; `None` keeps it unbounded.
  pub fn with_max_entries(mut self, max_entries: Option<usize>) -> Self {
    self.cache = self.cache.with_max_entries(max_entries);
    self
  }

  pub fn view(&self) -> &ListingView<R> {
    &self.view
  }

  /// The most recently requested query, normalized
  pub fn last_query(&self) -> &PageQuery {
    &self.last_query
  }

  pub fn collection(&self) -> &'static str {
    self.collection
  }

  /// Serve `query` from cache if fresh, otherwise issue one request.
  ///
  /// Must be called from within a tokio runtime.
  pub fn fetch(&mut self, query: PageQuery) -> Dispatch {
    let query = query.normalized();
    let key = cache_key(self.collection, &query);
    self.latest_seq += 1;
    let seq = self.latest_seq;
    self.last_query = query.clone();

    let now = Instant::now();
    if let Some(entry) = self.cache.fresh(&key, now) {
      debug!(collection = self.collection, seq, offset = query.offset, "cache hit");
      self
        .view
        .apply(entry.payload, PageSource::Cache, Some(entry.cached_at));
      return Dispatch::Cached;
    }

    // Keep the current records on screen until the new page lands
    self.view.loading = true;
    self.view.error = None;

    let request = PageRequest::for_query(&query);
    debug!(
      collection = self.collection,
      seq,
      endpoint = ?request.endpoint,
      offset = request.offset,
      page_size = request.page_size,
      "cache miss, requesting page"
    );

    let future = self.fetcher.fetch_page(request);
    let tx = self.tx.clone();
    tokio::spawn(async move {
      let result = future.await;
      // Ignore send errors - the listing may have been dropped
      let _ = tx.send(Completion { seq, key, result });
    });

    Dispatch::Requested(seq)
  }

  /// Re-issue the last query.
  pub fn refetch(&mut self) -> Dispatch {
    self.fetch(self.last_query.clone())
  }

  /// Pick up finished requests. Call this on every tick.
  pub fn poll(&mut self) -> Vec<Outcome> {
    let mut outcomes = Vec::new();
    while let Ok(completion) = self.rx.try_recv() {
      outcomes.push(self.complete(completion));
    }
    outcomes
  }

  fn complete(&mut self, completion: Completion<R>) -> Outcome {
    let Completion { seq, key, result } = completion;
    let current = seq == self.latest_seq;

    match result {
      Ok(page) => {
        self.cache.put(&key, page.clone(), Instant::now());
        if !current {
          trace!(collection = self.collection, seq, latest = self.latest_seq, "discarding superseded page");
          return Outcome::StaleDiscarded;
        }
        let cached_at = self.cache.get(&key).map(|entry| entry.cached_at);
        self.view.apply(page, PageSource::Network, cached_at);
        Outcome::Applied
      }
      Err(e) => {
        warn!(collection = self.collection, seq, kind = e.kind(), error = %e, "page request failed");
        if !current {
          return Outcome::StaleDiscarded;
        }
        self.view.loading = false;
        self.view.error = Some(e.to_string());
        Outcome::Failed(e)
      }
    }
  }

  /// Drop every cached page, e.g. after the credential changed.
  pub fn clear_cache(&mut self) {
    debug!(collection = self.collection, entries = self.cache.len(), "clearing cache");
    self.cache.clear();
  }

  pub fn cache_len(&self) -> usize {
    self.cache.len()
  }
}
