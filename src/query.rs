//! Single-shot async load for detail screens.
//!
//! The load runs on a spawned task; `poll()` from the tick handler moves the
//! result into the query's state.
//!
//! ```ignore
//! let mut product = Query::new(move || {
//!     let client = client.clone();
//!     async move { client.get_record::<Product>(16).await }
//! });
//! product.fetch();
//! // every tick:
//! let changed = product.poll();
//! ```

use futures::future::{BoxFuture, FutureExt};
use std::future::Future;
use tokio::sync::mpsc::{self, error::TryRecvError};

use crate::error::FetchError;

#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
  /// Never fetched
  Idle,
  Loading,
  Success(T),
  Error(FetchError),
}

type Loader<T> = Box<dyn Fn() -> BoxFuture<'static, Result<T, FetchError>> + Send + Sync>;

/// One remotely loaded value.
///
/// Each load gets its own channel. Reloading drops the previous receiver, so
/// an abandoned load can't overwrite a newer one.
pub struct Query<T> {
  state: QueryState<T>,
  loader: Loader<T>,
  pending: Option<mpsc::UnboundedReceiver<Result<T, FetchError>>>,
}

impl<T: Send + 'static> Query<T> {
  pub fn new<F, Fut>(loader: F) -> Self
  where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
  {
    Self {
      state: QueryState::Idle,
      loader: Box::new(move || loader().boxed()),
      pending: None,
    }
  }

  pub fn state(&self) -> &QueryState<T> {
    &self.state
  }

  pub fn data(&self) -> Option<&T> {
    match &self.state {
      QueryState::Success(value) => Some(value),
      _ => None,
    }
  }

  /// Start a load unless one is already running
  pub fn fetch(&mut self) {
    if self.pending.is_none() {
      self.spawn();
    }
  }

  /// Start a new load, abandoning any running one
  pub fn refetch(&mut self) {
    self.spawn();
  }

  /// Returns `true` when a finished load changed the state.
  pub fn poll(&mut self) -> bool {
    let received = match self.pending.as_mut().map(|rx| rx.try_recv()) {
      None | Some(Err(TryRecvError::Empty)) => return false,
      Some(Ok(result)) => result,
      // The task died before sending
      Some(Err(TryRecvError::Disconnected)) => {
        Err(FetchError::NetworkFailure("request was cancelled".to_string()))
      }
    };
    self.pending = None;

    if let Err(e) = &received {
      tracing::warn!(kind = e.kind(), error = %e, "detail load failed");
    }
    self.state = received.map_or_else(QueryState::Error, QueryState::Success);
    true
  }

  fn spawn(&mut self) {
    let (tx, rx) = mpsc::unbounded_channel();
    let load = (self.loader)();
    tokio::spawn(async move {
      let _ = tx.send(load.await);
    });
    self.pending = Some(rx);
    self.state = QueryState::Loading;
  }
}
