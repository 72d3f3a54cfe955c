use color_eyre::{eyre::eyre, Result};
use futures::future::{BoxFuture, FutureExt};
use reqwest::StatusCode;
use url::Url;

use super::api_types::decode_page;
use super::types::Record;
use crate::config::Config;
use crate::error::FetchError;
use crate::listing::{Endpoint, Page, PageFetcher, PageRequest};

/// DummyJSON API client wrapper
#[derive(Clone)]
pub struct ApiClient {
  http: reqwest::Client,
  base: Url,
  token: Option<String>,
}

impl ApiClient {
  pub fn new(config: &Config) -> Result<Self> {
    Self::with_base(&config.api.url, Config::get_api_token())
  }

  pub fn with_base(base: &str, token: Option<String>) -> Result<Self> {
    let base = Url::parse(base).map_err(|e| eyre!("Invalid API url {}: {}", base, e))?;
    if base.cannot_be_a_base() {
      return Err(eyre!("Invalid API url {}: not a base url", base));
    }

    let http = reqwest::Client::builder()
      .user_agent(concat!("djdash/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self { http, base, token })
  }

  fn url(&self, segments: &[&str]) -> Url {
    let mut url = self.base.clone();
    // Checked in the constructor
    if let Ok(mut path) = url.path_segments_mut() {
      path.pop_if_empty().extend(segments);
    }
    url
  }

  fn list_url(&self, collection: &str, request: &PageRequest) -> Url {
    let mut url = match &request.endpoint {
      Endpoint::List => self.url(&[collection]),
      Endpoint::Search(_) => self.url(&[collection, "search"]),
      Endpoint::Category(category) => self.url(&[collection, "category", category.as_str()]),
    };

    {
      let mut query = url.query_pairs_mut();
      if let Endpoint::Search(text) = &request.endpoint {
        query.append_pair("q", text);
      }
      query
        .append_pair("limit", &request.page_size.to_string())
        .append_pair("skip", &request.offset.to_string());
    }
    url
  }

  async fn get_bytes(&self, url: Url, what: &str) -> Result<Vec<u8>, FetchError> {
    let mut request = self.http.get(url);
    if let Some(token) = &self.token {
      request = request.bearer_auth(token);
    }

    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
      return Err(match status {
        StatusCode::NOT_FOUND => FetchError::NetworkFailure(format!("{} not found", what)),
        _ => FetchError::NetworkFailure(format!("Failed to fetch {}: HTTP {}", what, status)),
      });
    }

    Ok(response.bytes().await?.to_vec())
  }

  /// Fetch one page of a collection
  pub async fn list<R: Record>(&self, request: PageRequest) -> Result<Page<R>, FetchError> {
    let url = self.list_url(R::COLLECTION, &request);
    let body = self.get_bytes(url, R::COLLECTION).await?;
    decode_page(&body)
  }

  /// Fetch a single record by id
  pub async fn get_record<R: Record>(&self, id: u64) -> Result<R, FetchError> {
    let id_segment = id.to_string();
    let url = self.url(&[R::COLLECTION, id_segment.as_str()]);
    let what = format!("{} {}", R::LABEL, id);
    let body = self.get_bytes(url, &what).await?;
    Ok(serde_json::from_slice(&body)?)
  }
}

impl<R: Record> PageFetcher<R> for ApiClient {
  fn fetch_page(&self, request: PageRequest) -> BoxFuture<'static, Result<Page<R>, FetchError>> {
    let client = self.clone();
    async move { client.list::<R>(request).await }.boxed()
  }
}
