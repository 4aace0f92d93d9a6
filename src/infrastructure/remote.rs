//! HTTP adapter for the remote quote service.
//!
//! The remote is an opaque JSON endpoint: GET returns a list of records,
//! POST accepts the full local list and answers with some JSON payload
//! that is logged but never merged back.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{AppError, Quote, Result};

/// One record as served by the remote. Fields beyond these are ignored;
/// missing fields default so that deserialization stays total.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteRecord {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// Remote collaborator for the reconcile cycle.
///
/// Production uses [`HttpRemote`]; tests substitute a scripted fake.
#[async_trait]
pub trait QuoteRemote {
    /// Pull the remote collection.
    ///
    /// # Errors
    /// Returns [`AppError::Network`] on transport failure or a non-success
    /// status.
    async fn fetch(&self) -> Result<Vec<RemoteRecord>>;

    /// Push the entire local collection, returning the acknowledgement
    /// payload.
    ///
    /// # Errors
    /// Returns [`AppError::Network`] on transport failure or a non-success
    /// status.
    async fn push(&self, quotes: &[Quote]) -> Result<serde_json::Value>;
}

/// `reqwest`-backed remote client.
pub struct HttpRemote {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpRemote {
    /// Create a client for `endpoint` with a bounded request timeout so a
    /// stalled call cannot block the sync loop indefinitely.
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built.
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(AppError::network)?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl QuoteRemote for HttpRemote {
    async fn fetch(&self) -> Result<Vec<RemoteRecord>> {
        let resp = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(AppError::network)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::Network {
                message: format!("server returned {status} on fetch"),
                source: None,
            });
        }

        resp.json::<Vec<RemoteRecord>>()
            .await
            .map_err(AppError::network)
    }

    async fn push(&self, quotes: &[Quote]) -> Result<serde_json::Value> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(quotes)
            .send()
            .await
            .map_err(AppError::network)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::Network {
                message: format!("server returned {status} on push"),
                source: None,
            });
        }

        resp.json::<serde_json::Value>()
            .await
            .map_err(AppError::network)
    }
}
