use futures::future::BoxFuture;

use super::query::PageRequest;
use super::view::Page;
use crate::error::FetchError;

/// Remote side of a listing: issues one read per call.
///
/// The returned future must not borrow `self`; it is spawned onto the
/// runtime and may outlive the call.
pub trait PageFetcher<R>: Send + Sync {
  fn fetch_page(&self, request: PageRequest) -> BoxFuture<'static, Result<Page<R>, FetchError>>;
}

#[cfg(test)]
pub(crate) mod fake {
  //! In-memory fetcher for exercising the orchestrator.

  use super::*;
  use crate::listing::query::Endpoint;
  use futures::FutureExt;
  use std::collections::HashMap;
  use std::sync::atomic::{AtomicBool, Ordering};
  use std::sync::Mutex;
  use tokio::sync::oneshot;

  pub const TOTAL: u64 = 194;

  /// Answers immediately with a synthetic page, or, when gated, waits
  /// until the test calls [`FakeFetcher::release`] for that call index.
  #[derive(Default)]
  pub struct FakeFetcher {
    calls: Mutex<Vec<PageRequest>>,
    gates: Mutex<HashMap<usize, oneshot::Sender<Result<Page<u32>, FetchError>>>>,
    gated: bool,
    trimmed: bool,
    failing: AtomicBool,
  }

  impl FakeFetcher {
    pub fn immediate() -> Self {
      Self::default()
    }

    pub fn gated() -> Self {
      Self {
        gated: true,
        ..Self::default()
      }
    }

    /// Reports `page_size` as the number of records returned, the way
    /// DummyJSON's `limit` does on a short last page.
    pub fn trimmed() -> Self {
      Self {
        trimmed: true,
        ..Self::default()
      }
    }

    pub fn set_failing(&self, failing: bool) {
      self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<PageRequest> {
      self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
      self.calls.lock().unwrap().len()
    }

    /// Resolve the `index`th call with the given result.
    pub fn release(&self, index: usize, result: Result<Page<u32>, FetchError>) {
      let gate = self.gates.lock().unwrap().remove(&index);
      if let Some(tx) = gate {
        let _ = tx.send(result);
      }
    }

    /// Resolve the `index`th call with its synthetic page.
    pub fn release_ok(&self, index: usize) {
      let request = self.calls()[index].clone();
      self.release(index, Ok(page_for(&request)));
    }
  }

  /// Records are numbered by position; category pages are offset by 1000
  /// and search pages by 2000 so tests can tell them apart.
  pub fn page_for(request: &PageRequest) -> Page<u32> {
    let base = match request.endpoint {
      Endpoint::List => 0,
      Endpoint::Category(_) => 1000,
      Endpoint::Search(_) => 2000,
    };
    let start = request.offset.min(TOTAL);
    let end = (request.offset + request.page_size).min(TOTAL);
    Page {
      records: (start..end).map(|i| (base + i) as u32).collect(),
      total: TOTAL,
      offset: request.offset,
      page_size: request.page_size,
    }
  }

  impl PageFetcher<u32> for FakeFetcher {
    fn fetch_page(
      &self,
      request: PageRequest,
    ) -> BoxFuture<'static, Result<Page<u32>, FetchError>> {
      let index = {
        let mut calls = self.calls.lock().unwrap();
        calls.push(request.clone());
        calls.len() - 1
      };

      if self.gated {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(index, tx);
        return async move {
          rx.await
            .unwrap_or_else(|_| Err(FetchError::NetworkFailure("gate dropped".into())))
        }
        .boxed();
      }

      let result = if self.failing.load(Ordering::SeqCst) {
        Err(FetchError::NetworkFailure("HTTP 503".into()))
      } else {
        let mut page = page_for(&request);
        if self.trimmed {
          page.page_size = page.records.len() as u64;
        }
        Ok(page)
      };
      async move { result }.boxed()
    }
  }
}
