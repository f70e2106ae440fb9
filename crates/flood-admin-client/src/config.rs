use std::env;

use reqwest::Url;
use tracing::info;

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Connection settings handed to [`crate::ApiClient::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// API root, e.g. `http://localhost:5000/api`. Stored without a
    /// trailing slash.
    pub base_url: String,
    /// `pageSize` sent with paginated listings.
    pub page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Read `FLOOD_ADMIN_API_BASE` and `FLOOD_ADMIN_PAGE_SIZE`, falling back
    /// to the defaults. Load `.env` before calling this if you want it.
    pub fn from_env() -> Result<Self, ApiError> {
        let base_url = env::var("FLOOD_ADMIN_API_BASE").unwrap_or_else(|_| {
            info!("FLOOD_ADMIN_API_BASE not set, using default: {}", DEFAULT_BASE_URL);
            DEFAULT_BASE_URL.to_string()
        });
        let page_size = match env::var("FLOOD_ADMIN_PAGE_SIZE") {
            Ok(raw) => raw.trim().parse().map_err(|e| {
                ApiError::InvalidConfig(format!("FLOOD_ADMIN_PAGE_SIZE={:?}: {}", raw, e))
            })?,
            Err(_) => DEFAULT_PAGE_SIZE,
        };

        let config = Self { base_url, page_size };
        config.validate()?;
        Ok(config)
    }

    /// Check the base URL is an absolute http(s) URL and the page size is
    /// non-zero.
    pub fn validate(&self) -> Result<(), ApiError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidConfig(format!("base URL {:?}: {}", self.base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidConfig(format!(
                "base URL {:?} must use http or https",
                self.base_url
            )));
        }
        if self.page_size == 0 {
            return Err(ApiError::InvalidConfig("page size must be at least 1".into()));
        }
        Ok(())
    }

    /// Absolute URL for an API path such as `/auth/users`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}
