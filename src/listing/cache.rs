//! In-memory result cache with lazy TTL expiry.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

/// A cached payload and when it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry<P> {
  pub payload: P,
  /// Monotonic insert time, used for freshness checks
  pub created: Instant,
  /// Wall-clock insert time, for display
  pub cached_at: DateTime<Utc>,
}

/// Query results keyed by cache key.
///
/// Entries are never swept: a stale entry just reads as a miss until the next
/// successful fetch overwrites it. The table is unbounded unless
/// `max_entries` is set, in which case inserting a new key past the limit
/// evicts the oldest entry.
#[derive(Debug)]
pub struct CacheTable<P> {
  entries: HashMap<String, CacheEntry<P>>,
  ttl: Duration,
  max_entries: Option<usize>,
}

impl<P: Clone> CacheTable<P> {
  pub fn new(ttl: Duration) -> Self {
    Self {
      entries: HashMap::new(),
      ttl,
      max_entries: None,
    }
  }

  pub fn with_max_entries(mut self, max_entries: Option<usize>) -> Self {
    self.max_entries = max_entries.filter(|n| *n > 0);
    self
  }

  pub fn get(&self, key: &str) -> Option<&CacheEntry<P>> {
    self.entries.get(key)
  }

  /// Store a payload, replacing any entry for the key with a new timestamp.
  pub fn put(&mut self, key: &str, payload: P, now: Instant) {
    if !self.entries.contains_key(key) {
      self.make_room();
    }
    self.entries.insert(
      key.to_string(),
      CacheEntry {
        payload,
        created: now,
        cached_at: Utc::now(),
      },
    );
  }

  pub fn is_fresh(entry: &CacheEntry<P>, now: Instant, ttl: Duration) -> bool {
    now.saturating_duration_since(entry.created) < ttl
  }

  /// Copy of the entry for `key` if it is still fresh.
  pub fn fresh(&self, key: &str, now: Instant) -> Option<CacheEntry<P>> {
    self
      .entries
      .get(key)
      .filter(|entry| Self::is_fresh(entry, now, self.ttl))
      .cloned()
  }

  pub fn clear(&mut self) {
    self.entries.clear();
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  fn make_room(&mut self) {
    let Some(max) = self.max_entries else {
      return;
    };
    while self.entries.len() >= max {
      let oldest = self
        .entries
        .iter()
        .min_by_key(|(_, entry)| entry.created)
        .map(|(key, _)| key.clone());
      match oldest {
        Some(key) => {
          self.entries.remove(&key);
        }
        None => break,
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const TTL: Duration = Duration::from_secs(300);

  #[test]
  fn test_miss_on_empty_table() {
    let table: CacheTable<u32> = CacheTable::new(TTL);
    assert!(table.get("k").is_none());
    assert!(table.fresh("k", Instant::now()).is_none());
  }

  #[test]
  fn test_fresh_within_ttl() {
    let mut table = CacheTable::new(TTL);
    let now = Instant::now();
    table.put("k", 7, now);

    let entry = table.fresh("k", now + Duration::from_secs(299)).unwrap();
    assert_eq!(entry.payload, 7);
  }

  #[test]
  fn test_stale_entry_reads_as_miss_but_stays() {
    let mut table = CacheTable::new(TTL);
    let now = Instant::now();
    table.put("k", 7, now);

    assert!(table.fresh("k", now + TTL).is_none());
    assert_eq!(table.len(), 1);
    assert!(table.get("k").is_some());
  }

  #[test]
  fn test_put_overwrites_with_new_timestamp() {
    let mut table = CacheTable::new(TTL);
    let start = Instant::now();
    table.put("k", 1, start);

    let later = start + Duration::from_secs(400);
    table.put("k", 2, later);

    let entry = table.fresh("k", later + Duration::from_secs(1)).unwrap();
    assert_eq!(entry.payload, 2);
    assert_eq!(table.len(), 1);
  }

  #[test]
  fn test_clear_removes_everything() {
    let mut table = CacheTable::new(TTL);
    let now = Instant::now();
    table.put("a", 1, now);
    table.put("b", 2, now);

    table.clear();
    assert_eq!(table.len(), 0);
  }

  #[test]
  fn test_bounded_table_evicts_oldest() {
    let mut table = CacheTable::new(TTL).with_max_entries(Some(2));
    let start = Instant::now();
    table.put("a", 1, start);
    table.put("b", 2, start + Duration::from_secs(1));
    table.put("c", 3, start + Duration::from_secs(2));

    assert_eq!(table.len(), 2);
    assert!(table.get("a").is_none());
    assert!(table.get("b").is_some());
    assert!(table.get("c").is_some());
  }

  #[test]
  fn test_bounded_table_overwrite_does_not_evict() {
    let mut table = CacheTable::new(TTL).with_max_entries(Some(2));
    let start = Instant::now();
    table.put("a", 1, start);
    table.put("b", 2, start);
    table.put("a", 3, start + Duration::from_secs(1));

    assert_eq!(table.len(), 2);
    assert_eq!(table.get("b").map(|e| e.payload), Some(2));
  }
}
