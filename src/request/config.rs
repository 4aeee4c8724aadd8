use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};
use crate::network::HttpVersion;
use crate::request::RequestMethod;

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Tuning shared by the pooled and blocking clients.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Per-request timeout. `None` waits forever.
    pub timeout: Option<Duration>,
    pub http_version: HttpVersion,
    pub user_agent: String,
    /// Transparent gzip, brotli and deflate decoding.
    pub decompress: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            http_version: HttpVersion::Auto,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            decompress: true,
        }
    }
}

/// Construction parameters common to every template.
#[derive(Clone, Debug)]
pub struct TemplateConfig {
    pub base_url: String,
    pub method: RequestMethod,
    /// Maximum number of in-flight requests in one batch, 0 = unlimited.
    pub connection_limit: usize,
    pub client: ClientConfig,
}

impl TemplateConfig {
    /// Validates `method` and `base_url` up front so a bad template never
    /// reaches the network.
    pub fn new(base_url: &str, method: &str, connection_limit: usize) -> Result<Self> {
        let method = method.parse::<RequestMethod>()?;
        Url::parse(base_url).map_err(|source| Error::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;

        Ok(Self {
            base_url: base_url.to_string(),
            method,
            connection_limit,
            client: ClientConfig::default(),
        })
    }

    pub fn with_client(mut self, client: ClientConfig) -> Self {
        self.client = client;
        self
    }
}
