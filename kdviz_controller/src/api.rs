// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Client for the search service.
//!
//! | Endpoint | Body |
//! |---|---|
//! | `GET /api/search?id=N` | `{"queryId", "queryLabel", "matchId", "matchLabel", "distance"}` |
//! | `GET /api/tree-data` | nested partition tree JSON |
//! | `GET /api/3d-data` | `id,x,y,z,label` table |
//! | `GET /images/{id}.png` | image, never fetched here |
//!
//! Non-success responses carry `{"error": "..."}`.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::{NetworkError, SearchError};
use crate::validate::ImageId;

/// Nearest-neighbour result for one query.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// The query image.
    pub query_id: u32,
    /// Query category label.
    pub query_label: u32,
    /// The closest other image.
    pub match_id: u32,
    /// Match category label.
    pub match_label: u32,
    /// Service-defined distance, `>= 0`.
    pub distance: f64,
}

impl SearchResult {
    /// Decode a search response body.
    ///
    /// `endpoint` only labels errors. A negative or non-finite distance is
    /// malformed.
    pub fn from_json(endpoint: &str, body: &str) -> Result<Self, SearchError> {
        let r: Self = serde_json::from_str(body).map_err(|e| SearchError::Malformed {
            endpoint: endpoint.to_owned(),
            message: e.to_string(),
        })?;
        if !(r.distance.is_finite() && r.distance >= 0.0) {
            return Err(SearchError::Malformed {
                endpoint: endpoint.to_owned(),
                message: format!("invalid distance {}", r.distance),
            });
        }
        Ok(r)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Anything that can answer a search.
pub trait SearchBackend {
    /// Find the nearest neighbour of `id`.
    fn search(&mut self, id: ImageId) -> Result<SearchResult, SearchError>;
}

impl<B: SearchBackend + ?Sized> SearchBackend for &mut B {
    fn search(&mut self, id: ImageId) -> Result<SearchResult, SearchError> {
        (**self).search(id)
    }
}

/// Connection settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server origin, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_owned(),
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(2),
        }
    }
}

/// Path of an image relative to the server origin.
pub fn image_path(id: u32) -> String {
    format!("/images/{id}.png")
}

/// Blocking HTTP client for the search service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base: String,
}

impl ApiClient {
    /// Build a client. Trailing slashes on the base URL are ignored.
    pub fn new(config: &ClientConfig) -> Result<Self, NetworkError> {
        let base = config.base_url.trim_end_matches('/').to_owned();
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|source| NetworkError::Transport {
                endpoint: base.clone(),
                source,
            })?;
        Ok(Self { client, base })
    }

    /// Server origin without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Absolute URL for `path` (which starts with `/`).
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Absolute URL of an image.
    pub fn image_url(&self, id: u32) -> String {
        self.endpoint(&image_path(id))
    }

    fn get_text(&self, path: &str) -> Result<String, NetworkError> {
        let endpoint = self.endpoint(path);
        tracing::debug!(%endpoint, "GET");
        let transport = |source| NetworkError::Transport {
            endpoint: endpoint.clone(),
            source,
        };
        let response = self.client.get(&endpoint).send().map_err(transport)?;
        let status = response.status();
        let body = response.text().map_err(transport)?;
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .map(|b| b.error);
            tracing::error!(%endpoint, status = status.as_u16(), ?message, "request rejected");
            return Err(NetworkError::Status {
                endpoint,
                status: status.as_u16(),
                message,
            });
        }
        Ok(body)
    }

    /// `GET /api/search?id=N`.
    pub fn search(&self, id: ImageId) -> Result<SearchResult, SearchError> {
        let path = format!("/api/search?id={id}");
        let body = self.get_text(&path)?;
        SearchResult::from_json(&self.endpoint(&path), &body)
    }

    /// `GET /api/tree-data`, undecoded.
    pub fn tree_data(&self) -> Result<String, NetworkError> {
        self.get_text("/api/tree-data")
    }

    /// `GET /api/3d-data`, undecoded.
    pub fn embedding_table(&self) -> Result<String, NetworkError> {
        self.get_text("/api/3d-data")
    }
}

impl SearchBackend for ApiClient {
    fn search(&mut self, id: ImageId) -> Result<SearchResult, SearchError> {
        Self::search(self, id)
    }
}
