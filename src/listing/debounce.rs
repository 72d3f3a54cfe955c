use std::time::Duration;
use tokio::time::Instant;

/// Single-slot debouncer.
///
/// Scheduling replaces whatever was pending, so at most one value is ever
/// waiting. The owner polls [`Debouncer::take_due`] from its tick.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
  quiet: Duration,
  pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
  pub fn new(quiet: Duration) -> Self {
    Self {
      quiet,
      pending: None,
    }
  }

  /// Cancel any pending value and schedule `value` one quiet interval from `now`.
  pub fn schedule(&mut self, value: T, now: Instant) {
    self.pending = Some((now + self.quiet, value));
  }

  /// Take the pending value if its deadline has passed.
  pub fn take_due(&mut self, now: Instant) -> Option<T> {
    match &self.pending {
      Some((deadline, _)) if now >= *deadline => self.pending.take().map(|(_, value)| value),
      _ => None,
    }
  }

  /// Take the pending value without waiting for its deadline.
  pub fn flush(&mut self) -> Option<T> {
    self.pending.take().map(|(_, value)| value)
  }

  pub fn is_pending(&self) -> bool {
    self.pending.is_some()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const QUIET: Duration = Duration::from_millis(500);

  #[test]
  fn test_nothing_due_before_deadline() {
    let mut debouncer = Debouncer::new(QUIET);
    let start = Instant::now();
    debouncer.schedule("a", start);

    assert_eq!(debouncer.take_due(start + Duration::from_millis(499)), None);
    assert!(debouncer.is_pending());
    assert_eq!(debouncer.take_due(start + QUIET), Some("a"));
    assert!(!debouncer.is_pending());
  }

  #[test]
  fn test_reschedule_replaces_and_pushes_deadline() {
    let mut debouncer = Debouncer::new(QUIET);
    let start = Instant::now();
    debouncer.schedule("p", start);
    debouncer.schedule("ph", start + Duration::from_millis(300));

    // First deadline passes without firing
    assert_eq!(debouncer.take_due(start + Duration::from_millis(600)), None);
    assert_eq!(
      debouncer.take_due(start + Duration::from_millis(800)),
      Some("ph")
    );
    assert_eq!(debouncer.take_due(start + Duration::from_secs(10)), None);
  }

  #[test]
  fn test_flush_skips_the_wait() {
    let mut debouncer = Debouncer::new(QUIET);
    let start = Instant::now();
    debouncer.schedule(1, start);
    assert_eq!(debouncer.flush(), Some(1));
    assert_eq!(debouncer.take_due(start + QUIET), None);
    assert_eq!(debouncer.flush(), None);
  }
}
