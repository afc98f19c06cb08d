//! Boundary adapter for the remote catalog API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::Record,
    error::{FetchFailure, FetchResult},
    protocol::{GamesQuery, GamesResponse, PageResult},
};
use tracing::{debug, warn};
use url::Url;

use crate::error::ClientBuildError;

/// Upper bound on the page size used for option snapshots.
pub const MAX_SNAPSHOT_PAGE_SIZE: u32 = 10_000;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[async_trait]
pub trait DatasetFetcher: Send + Sync {
    async fn fetch_page(&self, query: &GamesQuery) -> FetchResult<PageResult>;

    async fn fetch_featured(&self) -> FetchResult<Vec<Record>>;

    /// Effectively unpaged read of the whole catalog.
    async fn fetch_snapshot(&self, per_page: u32) -> FetchResult<Vec<Record>> {
        let per_page = per_page.clamp(1, MAX_SNAPSHOT_PAGE_SIZE);
        let page = self.fetch_page(&GamesQuery::snapshot(per_page)).await?;
        Ok(page.records)
    }
}

pub struct HttpDatasetFetcher {
    http: Client,
    base_url: String,
}

impl HttpDatasetFetcher {
    pub fn new(base_url: &str) -> Result<Self, ClientBuildError> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientBuildError> {
        let base_url = normalize_base_url(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ClientBuildError::HttpClient(err.to_string()))?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T, Q>(&self, path: &str, query: Option<&Q>) -> FetchResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized + Sync,
    {
        let url = format!("{}{path}", self.base_url);
        let mut request = self.http.get(&url);
        if let Some(query) = query {
            request = request.query(query);
        }
        debug!(%url, "fetching catalog data");

        let response = request
            .send()
            .await
            .map_err(|err| FetchFailure::transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%url, status = status.as_u16(), "catalog request rejected");
            return Err(FetchFailure::server(status.as_u16(), body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| FetchFailure::transport(err.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|err| FetchFailure::decode(err.to_string()))
    }
}

#[async_trait]
impl DatasetFetcher for HttpDatasetFetcher {
    async fn fetch_page(&self, query: &GamesQuery) -> FetchResult<PageResult> {
        let response: GamesResponse = self.get_json("/games", Some(query)).await?;
        Ok(PageResult::from(response))
    }

    async fn fetch_featured(&self) -> FetchResult<Vec<Record>> {
        self.get_json::<_, ()>("/featured-games", None).await
    }
}

pub fn normalize_base_url(raw: &str) -> Result<String, ClientBuildError> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).map_err(|err| ClientBuildError::InvalidBaseUrl {
        url: trimmed.to_string(),
        reason: err.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientBuildError::InvalidBaseUrl {
            url: trimmed.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Routes an icon through the API's image proxy so hotlink-protected hosts
/// still serve it.
pub fn proxied_icon_url(base_url: &str, original: &str) -> Option<String> {
    let original = original.trim();
    if original.is_empty() {
        return None;
    }
    let absolute = if original.starts_with("//") {
        format!("https:{original}")
    } else {
        original.to_string()
    };
    Some(format!(
        "{}/image?url={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(&absolute)
    ))
}

#[cfg(test)]
#[path = "tests/fetcher_tests.rs"]
mod tests;
