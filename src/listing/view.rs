//! Observable state of a collection listing.

use chrono::{DateTime, Utc};

/// A page of records as returned by the remote listing operations.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
  pub records: Vec<R>,
  pub total: u64,
  pub offset: u64,
  pub page_size: u64,
}

/// Where the currently displayed page came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSource {
  Network,
  Cache,
}

/// What presentation code renders for a collection.
///
/// Only the orchestrator writes to this. Records stay in place while a new
/// page is loading and after a failure.
#[derive(Debug, Clone)]
pub struct ListingView<R> {
  pub records: Vec<R>,
  pub total: u64,
  pub offset: u64,
  pub page_size: u64,
  pub loading: bool,
  pub error: Option<String>,
  pub source: Option<PageSource>,
  pub cached_at: Option<DateTime<Utc>>,
}

impl<R> ListingView<R> {
  pub fn new(page_size: u64) -> Self {
    Self {
      records: Vec::new(),
      total: 0,
      offset: 0,
      page_size: page_size.max(1),
      loading: false,
      error: None,
      source: None,
      cached_at: None,
    }
  }

  pub(super) fn apply(&mut self, page: Page<R>, source: PageSource, cached_at: Option<DateTime<Utc>>) {
    self.records = page.records;
    self.total = page.total;
    self.offset = page.offset;
    // Upstream `limit`: the record count actually sent, so short on the last
    // page. Page maths uses the requested size instead.
    self.page_size = page.page_size.max(1);
    self.loading = false;
    self.error = None;
    self.source = Some(source);
    self.cached_at = cached_at;
  }

  /// "Showing 11 - 20 of 194"
  pub fn showing(&self) -> String {
    if self.total == 0 {
      return "Showing 0 of 0".to_string();
    }
    let first = (self.offset + 1).min(self.total);
    let last = (self.offset + self.page_size).min(self.total);
    format!("Showing {} - {} of {}", first, last, self.total)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn view(total: u64, offset: u64, page_size: u64) -> ListingView<()> {
    let mut v = ListingView::new(page_size);
    v.total = total;
    v.offset = offset;
    v
  }

  #[test]
  fn test_showing_last_partial_page() {
    assert_eq!(view(194, 190, 10).showing(), "Showing 191 - 194 of 194");
    assert_eq!(view(194, 0, 10).showing(), "Showing 1 - 10 of 194");
    assert_eq!(view(0, 0, 10).showing(), "Showing 0 of 0");
  }

  #[test]
  fn test_apply_clears_error_and_loading() {
    let mut v: ListingView<u32> = ListingView::new(10);
    v.loading = true;
    v.error = Some("boom".into());
    v.apply(
      Page {
        records: vec![1, 2],
        total: 2,
        offset: 0,
        page_size: 0,
      },
      PageSource::Network,
      None,
    );
    assert!(!v.loading);
    assert!(v.error.is_none());
    assert_eq!(v.page_size, 1);
    assert_eq!(v.records, vec![1, 2]);
  }
}
