//! Client configuration and on-disk locations
//!
//! Credentials are injected at construction; nothing is compiled in.

use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Url;
use std::path::PathBuf;

/// Default API host (RapidAPI IMDb proxy)
pub const DEFAULT_HOST: &str = "imdb8.p.rapidapi.com";

/// Region used for the popular-titles list when none is given
pub const DEFAULT_REGION: &str = "US";

pub const ENV_HOST: &str = "MOVIEDEX_API_HOST";
pub const ENV_API_KEY: &str = "MOVIEDEX_API_KEY";
pub const ENV_USER_AGENT: &str = "MOVIEDEX_USER_AGENT";

pub const HOST_HEADER: &str = "x-rapidapi-host";
pub const KEY_HEADER: &str = "x-rapidapi-key";

/// Connection settings for the upstream metadata API
///
/// Header values are validated here so request construction cannot fail.
#[derive(Clone)]
pub struct ApiConfig {
    host: String,
    user_agent: String,
    base_url: Url,
    headers: HeaderMap,
}

impl ApiConfig {
    /// Create a config for `https://{host}` with the given key.
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let host = host.into();
        if host.trim().is_empty() {
            return Err(Error::Config("API host must not be empty".to_string()));
        }
        let base_url = Url::parse(&format!("https://{}", host))
            .map_err(|e| Error::Config(format!("invalid API host {:?}: {}", host, e)))?;

        let mut key = header_value(KEY_HEADER, &api_key.into())?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HOST_HEADER, header_value(HOST_HEADER, &host)?);
        headers.insert(KEY_HEADER, key);

        let user_agent = default_user_agent();
        headers.insert(USER_AGENT, header_value("user-agent", &user_agent)?);

        Ok(Self {
            host,
            user_agent,
            base_url,
            headers,
        })
    }

    /// Read host, key and user agent from the environment.
    ///
    /// The key is required; host and user agent fall back to defaults.
    pub fn from_env() -> Result<Self> {
        let host = std::env::var(ENV_HOST).unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let api_key = std::env::var(ENV_API_KEY)
            .map_err(|_| Error::Config(format!("{} is not set", ENV_API_KEY)))?;

        let config = Self::new(host, api_key)?;
        match std::env::var(ENV_USER_AGENT) {
            Ok(agent) if !agent.trim().is_empty() => config.with_user_agent(agent),
            _ => Ok(config),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Result<Self> {
        let user_agent = user_agent.into();
        self.headers
            .insert(USER_AGENT, header_value("user-agent", &user_agent)?);
        self.user_agent = user_agent;
        Ok(self)
    }

    /// Point requests at a different origin (mock servers, proxies).
    /// The `x-rapidapi-host` header keeps the configured host.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid base URL {:?}: {}", base_url, e)))?;
        if self.base_url.cannot_be_a_base() {
            return Err(Error::Config(format!("base URL {:?} cannot carry a path", base_url)));
        }
        Ok(self)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Host, key and user-agent headers sent with every API request
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| Error::Config(format!("{} contains characters not allowed in a header", name)))
}

// Hand-written so the key never ends up in logs.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("host", &self.host)
            .field("api_key", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

fn default_user_agent() -> String {
    format!("moviedex/{}", env!("CARGO_PKG_VERSION"))
}

/// Returns the default data directory: ~/.local/share/moviedex
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("moviedex")
}

/// Returns the default poster cache directory: ~/.cache/moviedex/posters
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("moviedex")
        .join("posters")
}
