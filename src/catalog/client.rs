//! Open Source Cloud catalog client
//!
//! Fetches the list of service descriptors with an authenticated GET

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::catalog::descriptor::ServiceDescriptor;
use crate::error::{CatalogError, ConfigError};

pub const DEFAULT_CATALOG_URL: &str = "https://catalog.svc.prod.osaas.io";

pub const ACCESS_TOKEN_VAR: &str = "OSC_ACCESS_TOKEN";
pub const API_KEY_VAR: &str = "OSC_API_KEY";

/// Credentials read once at process start.
#[derive(Clone)]
pub struct Credentials {
    /// Personal access token. Not used by the catalog fetch.
    pub access_token: Option<String>,
    pub api_key: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            access_token: None,
            api_key: api_key.into(),
        }
    }

    /// Read `OSC_ACCESS_TOKEN` and `OSC_API_KEY` from the environment.
    ///
    /// The API key is mandatory; the access token is optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingCredential(API_KEY_VAR))?;

        Ok(Self {
            access_token: std::env::var(ACCESS_TOKEN_VAR).ok().filter(|v| !v.is_empty()),
            api_key,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    pub credentials: Credentials,
    pub timeout: Duration,
}

impl CatalogConfig {
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Build a client whose every request carries the bearer API key
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.credentials.api_key))
            .map_err(|e| CatalogError::Credential(e.to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(CatalogError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every service descriptor published by the catalog
    pub async fn list_services(&self) -> Result<Vec<ServiceDescriptor>, CatalogError> {
        let url = format!("{}/service", self.base_url);
        tracing::debug!("Fetching service catalog from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| CatalogError::Transport { url: url.clone(), source })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| CatalogError::Transport { url: url.clone(), source })?;

        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let services = ServiceDescriptor::list_from_json(&body)?;
        tracing::info!("Fetched {} services from {}", services.len(), url);

        Ok(services)
    }
}
