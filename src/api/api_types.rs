//! Serde-deserializable shapes of DummyJSON list responses.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use super::types::Record;
use crate::error::FetchError;
use crate::listing::Page;

/// `{ "<collection>": [...], "total": n, "skip": n, "limit": n }`
///
/// The records live under a key named after the collection, so they are
/// captured with the rest of the object and picked out afterwards.
#[derive(Debug, Deserialize)]
pub struct ApiListEnvelope {
  pub total: u64,
  pub skip: u64,
  pub limit: u64,
  #[serde(flatten)]
  pub rest: HashMap<String, Value>,
}

impl ApiListEnvelope {
  pub fn into_page<R: Record>(mut self) -> Result<Page<R>, FetchError> {
    let records = self.rest.remove(R::COLLECTION).ok_or_else(|| {
      FetchError::MalformedResponse(format!("missing `{}` array", R::COLLECTION))
    })?;
    let records: Vec<R> = serde_json::from_value(records)?;

    Ok(Page {
      records,
      total: self.total,
      offset: self.skip,
      page_size: self.limit,
    })
  }
}

/// Decode a list response body into a page of `R`.
pub fn decode_page<R: Record>(body: &[u8]) -> Result<Page<R>, FetchError> {
  let envelope: ApiListEnvelope = serde_json::from_slice(body)?;
  envelope.into_page()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::types::{Product, User};

  #[test]
  fn test_decode_users_page() {
    let body = br#"{
      "users": [
        {
          "id": 1,
          "firstName": "Emily",
          "lastName": "Johnson",
          "age": 28,
          "hair": { "color": "Brown", "type": "Curly" },
          "address": { "city": "Phoenix", "coordinates": { "lat": 71.8, "lng": -161.9 } },
          "company": { "name": "Dooley, Kozey and Cronin", "title": "Sales Manager" }
        }
      ],
      "total": 208,
      "skip": 0,
      "limit": 1
    }"#;

    let page: Page<User> = decode_page(body).unwrap();
    assert_eq!(page.total, 208);
    assert_eq!(page.page_size, 1);
    let user = &page.records[0];
    assert_eq!(user.full_name(), "Emily Johnson");
    assert_eq!(user.hair.kind, "Curly");
    assert_eq!(user.address.coordinates.lat, 71.8);
    assert_eq!(user.company.title, "Sales Manager");
  }

  #[test]
  fn test_decode_products_without_brand() {
    let body = br#"{
      "products": [
        { "id": 16, "title": "Apple", "category": "groceries", "price": 1.99,
          "dimensions": { "width": 9.9, "height": 8.8, "depth": 7.7 },
          "reviews": [{ "rating": 4, "comment": "Great", "reviewerName": "Ann" }] }
      ],
      "total": 1, "skip": 0, "limit": 30
    }"#;

    let page: Page<Product> = decode_page(body).unwrap();
    let product = &page.records[0];
    assert_eq!(product.brand, None);
    assert_eq!(product.dimensions.depth, 7.7);
    assert_eq!(product.reviews[0].reviewer_name, "Ann");
  }

  #[test]
  fn test_missing_collection_is_malformed() {
    let body = br#"{ "products": [], "total": 0, "skip": 0, "limit": 10 }"#;
    let err = decode_page::<User>(body).unwrap_err();
    assert!(matches!(err, FetchError::MalformedResponse(_)));
  }

  #[test]
  fn test_missing_total_is_malformed() {
    let body = br#"{ "users": [], "skip": 0, "limit": 10 }"#;
    let err = decode_page::<User>(body).unwrap_err();
    assert!(matches!(err, FetchError::MalformedResponse(_)));
  }

  #[test]
  fn test_not_json_is_malformed() {
    let err = decode_page::<User>(b"<html>").unwrap_err();
    assert!(matches!(err, FetchError::MalformedResponse(_)));
  }
}
