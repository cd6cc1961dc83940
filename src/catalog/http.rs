//! Blocking HTTP catalog client for a REST catalog API.

use log::debug;
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::types::{DateRange, ItemId, ItemSummary};
use crate::utils::config::HttpConsts;

use super::{CatalogClient, CatalogError, DescriptiveMetadata, SystemMetadata};

/// Paged listing body: rows plus an absolute URL for the next page, when any.
#[derive(Deserialize)]
struct ItemPage {
    results: Vec<ItemRow>,
    next: Option<String>,
}

#[derive(Deserialize)]
struct ItemRow {
    id: String,
}

#[derive(Deserialize)]
struct SystemBody {
    public: bool,
}

#[derive(Deserialize)]
struct MetadataBody {
    title: String,
}

/// Socket-level timeout for a given stage-2 fetch deadline: always above the
/// deadline (so the guard wins the race and a slow fetch stays a recoverable
/// skip) and never below the floor (so calls abandoned by the guard still
/// unblock on their own).
pub fn transport_timeout(fetch_timeout: Duration) -> Duration {
    let floor = Duration::from_secs(HttpConsts::TRANSPORT_TIMEOUT_FLOOR_SECS);
    let margin = Duration::from_secs(HttpConsts::TRANSPORT_TIMEOUT_MARGIN_SECS);
    (fetch_timeout + margin).max(floor)
}

/// Basic-auth catalog client. Every request carries a socket-level timeout
/// derived from the stage-2 fetch deadline via [`transport_timeout`].
pub struct HttpCatalogClient {
    http: Client,
    base: String,
    username: String,
    password: String,
}

impl HttpCatalogClient {
    /// Build a client for `host` (bare hostname or full base URL).
    /// `fetch_timeout` is the stage-2 deadline the socket timeout must exceed.
    pub fn new(
        host: &str,
        username: String,
        password: String,
        fetch_timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let http = Client::builder()
            .timeout(transport_timeout(fetch_timeout))
            .build()
            .map_err(|e| CatalogError::Transport(e.to_string()))?;
        let base = if host.starts_with("http://") || host.starts_with("https://") {
            host.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", host.trim_end_matches('/'))
        };
        Ok(Self {
            http,
            base,
            username,
            password,
        })
    }

    /// Check the supplied credentials against the account endpoint.
    pub fn verify_credentials(&self) -> Result<(), CatalogError> {
        let url = format!("{}/api/account/", self.base);
        self.get_checked(&url).map(|_| ())
    }

    fn get_checked(&self, url: &str) -> Result<Response, CatalogError> {
        let resp = self
            .http
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .map_err(|e| CatalogError::Transport(e.to_string()))?;
        match resp.status() {
            s if s.is_success() => Ok(resp),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(CatalogError::Auth(format!(
                "{} returned {}",
                url,
                resp.status()
            ))),
            s => Err(CatalogError::Transport(format!("{} returned {}", url, s))),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        self.get_checked(url)?
            .json::<T>()
            .map_err(|e| CatalogError::Transport(format!("decode {}: {}", url, e)))
    }
}

impl CatalogClient for HttpCatalogClient {
    fn items_in_range(&self, range: &DateRange) -> Result<Vec<ItemSummary>, CatalogError> {
        let mut url = format!(
            "{}/api/items/?from={}&to={}",
            self.base, range.start, range.end
        );
        let mut items = Vec::new();
        loop {
            let page: ItemPage = self.get_json(&url)?;
            items.extend(page.results.into_iter().map(|row| ItemSummary {
                id: ItemId::from(row.id),
            }));
            match page.next {
                Some(next) if !next.is_empty() => url = next,
                _ => break,
            }
        }
        debug!("{} items in [{}, {})", items.len(), range.start, range.end);
        Ok(items)
    }

    fn system_metadata(&self, id: &ItemId) -> Result<SystemMetadata, CatalogError> {
        let url = format!("{}/api/items/{}/system/", self.base, id);
        let body: SystemBody =
            self.get_checked(&url)?
                .json()
                .map_err(|e| CatalogError::Malformed {
                    id: id.clone(),
                    reason: e.to_string(),
                })?;
        Ok(SystemMetadata {
            public: body.public,
        })
    }

    fn descriptive_metadata(&self, id: &ItemId) -> Result<DescriptiveMetadata, CatalogError> {
        let url = format!("{}/api/items/{}/metadata/", self.base, id);
        let body: MetadataBody =
            self.get_checked(&url)?
                .json()
                .map_err(|e| CatalogError::Malformed {
                    id: id.clone(),
                    reason: e.to_string(),
                })?;
        Ok(DescriptiveMetadata { title: body.title })
    }
}
