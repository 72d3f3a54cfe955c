//! Page queries, their cache keys, and endpoint selection.

use sha2::{Digest, Sha256};

/// What page of a collection to show, and how it is filtered.
///
/// An empty `search` or `category` means the same thing as an absent one;
/// use [`PageQuery::normalized`] before comparing or keying.
#[derive(Debug, Clone, Default, Eq)]
pub struct PageQuery {
  pub offset: u64,
  pub page_size: u64,
  pub search: Option<String>,
  pub category: Option<String>,
}

impl PageQuery {
  /// Unfiltered query. `page_size` is clamped to at least 1.
  pub fn new(offset: u64, page_size: u64) -> Self {
    Self {
      offset,
      page_size: page_size.max(1),
      search: None,
      category: None,
    }
  }

  pub fn with_search(mut self, search: Option<String>) -> Self {
    self.search = search;
    self
  }

  pub fn with_category(mut self, category: Option<String>) -> Self {
    self.category = category;
    self
  }

  pub fn at_offset(mut self, offset: u64) -> Self {
    self.offset = offset;
    self
  }

  /// Collapse empty filters to `None`.
  pub fn normalized(&self) -> Self {
    Self {
      offset: self.offset,
      page_size: self.page_size.max(1),
      search: non_empty(self.search.as_deref()),
      category: non_empty(self.category.as_deref()),
    }
  }
}

impl PartialEq for PageQuery {
  fn eq(&self, other: &Self) -> bool {
    let a = self.normalized();
    let b = other.normalized();
    a.offset == b.offset
      && a.page_size == b.page_size
      && a.search == b.search
      && a.category == b.category
  }
}

fn non_empty(value: Option<&str>) -> Option<String> {
  value.filter(|v| !v.is_empty()).map(String::from)
}

/// Derive the cache key for a query against a collection.
///
/// Fields are length-prefixed before hashing so that text containing the
/// separator can't make two different queries encode the same way.
pub fn cache_key(collection: &str, query: &PageQuery) -> String {
  let q = query.normalized();
  let input = format!(
    "{}|{}|{}|{}|{}",
    encode_field(Some(collection)),
    q.offset,
    q.page_size,
    encode_field(q.search.as_deref()),
    encode_field(q.category.as_deref()),
  );

  // SHA256 hash for stable, fixed-length keys
  let mut hasher = Sha256::new();
  hasher.update(input.as_bytes());
  hex::encode(hasher.finalize())
}

fn encode_field(value: Option<&str>) -> String {
  match value {
    Some(v) => format!("+{}:{}", v.len(), v),
    None => "-".to_string(),
  }
}

/// Which remote listing operation serves a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
  /// Plain paginated listing
  List,
  /// Free-text search
  Search(String),
  /// Category-scoped listing
  Category(String),
}

impl Endpoint {
  /// Category beats search when both are set.
  pub fn select(query: &PageQuery) -> Self {
    let q = query.normalized();
    match (q.category, q.search) {
      (Some(category), _) => Endpoint::Category(category),
      (None, Some(search)) => Endpoint::Search(search),
      (None, None) => Endpoint::List,
    }
  }
}

/// A single outbound listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
  pub endpoint: Endpoint,
  pub offset: u64,
  pub page_size: u64,
}

impl PageRequest {
  pub fn for_query(query: &PageQuery) -> Self {
    let q = query.normalized();
    Self {
      endpoint: Endpoint::select(&q),
      offset: q.offset,
      page_size: q.page_size,
    }
  }
}
