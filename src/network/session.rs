//! The pooled connection context shared by every request of one batch.

use reqwest::Client;
use tokio::sync::{Semaphore, SemaphorePermit};

use crate::error::Result;
use crate::request::ClientConfig;

pub(crate) fn build_client(config: &ClientConfig, connection_limit: usize) -> Result<Client> {
    let mut builder = Client::builder()
        .gzip(config.decompress)
        .brotli(config.decompress)
        .deflate(config.decompress)
        .user_agent(config.user_agent.as_str());

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    if connection_limit > 0 {
        builder = builder.pool_max_idle_per_host(connection_limit);
    }
    builder = config.http_version.apply_to_builder(builder);

    Ok(builder.build()?)
}

pub(crate) fn build_blocking_client(config: &ClientConfig) -> Result<reqwest::blocking::Client> {
    let mut builder = reqwest::blocking::Client::builder()
        .gzip(config.decompress)
        .brotli(config.decompress)
        .deflate(config.decompress)
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout);

    builder = config.http_version.apply_to_blocking_builder(builder);

    Ok(builder.build()?)
}

/// One pooled client plus an optional cap on in-flight requests.
///
/// A session lives for exactly one batch and is dropped with it.
#[derive(Debug)]
pub struct Session {
    client: Client,
    connection_limit: usize,
    limit: Option<Semaphore>,
}

impl Session {
    /// `connection_limit == 0` leaves the session unbounded, as does any
    /// cap a semaphore cannot hold (`Semaphore::MAX_PERMITS` and above).
    pub fn open(config: &ClientConfig, connection_limit: usize) -> Result<Self> {
        let connection_limit = if connection_limit >= Semaphore::MAX_PERMITS {
            0
        } else {
            connection_limit
        };
        let client = build_client(config, connection_limit)?;
        let limit = (connection_limit > 0).then(|| Semaphore::new(connection_limit));
        Ok(Self { client, connection_limit, limit })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn connection_limit(&self) -> usize {
        self.connection_limit
    }

    /// Waits for a free slot. Returns `None` when the session is unbounded.
    pub(crate) async fn acquire(&self) -> Option<SemaphorePermit<'_>> {
        match &self.limit {
            Some(semaphore) => semaphore.acquire().await.ok(),
            None => None,
        }
    }
}
