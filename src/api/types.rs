use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// An entity served by a DummyJSON collection endpoint.
pub trait Record: DeserializeOwned + Clone + Send + Sync + 'static {
  /// Path segment and envelope key, e.g. "users"
  const COLLECTION: &'static str;
  /// Singular display name
  const LABEL: &'static str;

  fn id(&self) -> u64;
}

// ============================================================================
// Users
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
  pub id: u64,
  pub first_name: String,
  pub last_name: String,
  pub maiden_name: String,
  pub age: u32,
  pub gender: String,
  pub email: String,
  pub phone: String,
  pub username: String,
  pub birth_date: String,
  pub image: String,
  pub blood_group: String,
  pub height: f64,
  pub weight: f64,
  pub eye_color: String,
  pub hair: Hair,
  pub ip: String,
  pub address: Address,
  pub mac_address: String,
  pub university: String,
  pub company: Company,
  pub ein: String,
  pub ssn: String,
  pub role: String,
}

impl User {
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hair {
  pub color: String,
  #[serde(rename = "type")]
  pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
  pub address: String,
  pub city: String,
  pub state: String,
  pub state_code: String,
  pub postal_code: String,
  pub coordinates: Coordinates,
  pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coordinates {
  pub lat: f64,
  pub lng: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
  pub department: String,
  pub name: String,
  pub title: String,
  pub address: Address,
}

impl Record for User {
  const COLLECTION: &'static str = "users";
  const LABEL: &'static str = "User";

  fn id(&self) -> u64 {
    self.id
  }
}

// ============================================================================
// Products
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
  pub id: u64,
  pub title: String,
  pub description: String,
  pub category: String,
  pub price: f64,
  pub discount_percentage: f64,
  pub rating: f64,
  pub stock: u64,
  pub tags: Vec<String>,
  /// Not every product has a brand
  pub brand: Option<String>,
  pub sku: String,
  pub weight: f64,
  pub dimensions: Dimensions,
  pub warranty_information: String,
  pub shipping_information: String,
  pub availability_status: String,
  pub reviews: Vec<Review>,
  pub return_policy: String,
  pub minimum_order_quantity: u64,
  pub thumbnail: String,
  pub images: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimensions {
  pub width: f64,
  pub height: f64,
  pub depth: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Review {
  pub rating: f64,
  pub comment: String,
  pub date: String,
  pub reviewer_name: String,
  pub reviewer_email: String,
}

impl Record for Product {
  const COLLECTION: &'static str = "products";
  const LABEL: &'static str = "Product";

  fn id(&self) -> u64 {
    self.id
  }
}
