use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::listing::ListingSettings;

/// Product categories offered by DummyJSON
const DEFAULT_CATEGORIES: &[&str] = &[
  "smartphones",
  "laptops",
  "fragrances",
  "skin-care",
  "groceries",
  "home-decoration",
  "furniture",
  "tops",
  "womens-dresses",
  "womens-shoes",
  "mens-shirts",
  "mens-shoes",
  "mens-watches",
  "womens-watches",
  "womens-bags",
  "womens-jewellery",
  "sunglasses",
  "motorcycle",
  "vehicle",
];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
  pub api: ApiConfig,
  /// Records per page
  pub page_size: u64,
  pub cache: CacheConfig,
  pub search: SearchConfig,
  /// Categories offered in the products filter bar
  pub categories: Vec<String>,
  /// UI refresh interval in milliseconds
  pub tick_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
  pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
  /// How long a cached page counts as fresh
  pub ttl_secs: u64,
  /// Upper bound on cached pages per collection (unbounded if unset)
  pub max_entries: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
  /// Quiet period after the last keystroke before searching
  pub debounce_ms: u64,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      api: ApiConfig::default(),
      page_size: 10,
      cache: CacheConfig::default(),
      search: SearchConfig::default(),
      categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
      tick_ms: 100,
    }
  }
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      url: "https://dummyjson.com".to_string(),
    }
  }
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self {
      ttl_secs: 5 * 60,
      max_entries: None,
    }
  }
}

impl Default for SearchConfig {
  fn default() -> Self {
    Self { debounce_ms: 500 }
  }
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./djdash.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/djdash/config.yaml
  ///
  /// With no file found the defaults are used.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Self::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("djdash.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("djdash").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents).map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn parse(contents: &str) -> Result<Self> {
    let config: Config = serde_yaml::from_str(contents)?;
    if config.page_size == 0 {
      return Err(eyre!("page_size must be at least 1"));
    }
    Ok(config)
  }

  pub fn listing_settings(&self) -> ListingSettings {
    ListingSettings {
      page_size: self.page_size.max(1),
      ttl: Duration::from_secs(self.cache.ttl_secs),
      max_entries: self.cache.max_entries,
      debounce: Duration::from_millis(self.search.debounce_ms),
    }
  }

  /// Get the optional API bearer token from the environment.
  ///
  /// DummyJSON's read endpoints are public; a token is only attached to
  /// requests when DJDASH_API_TOKEN is set.
  pub fn get_api_token() -> Option<String> {
    std::env::var("DJDASH_API_TOKEN")
      .ok()
      .filter(|t| !t.is_empty())
  }
}
