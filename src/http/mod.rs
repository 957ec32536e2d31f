pub mod error;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{config::ApiConfig, model::{CatalogResponse, Track}};

pub use error::ApiError;

/// The two catalog calls the views depend on.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn search(&self, term: &str) -> Result<CatalogResponse, ApiError>;
    async fn lookup(&self, id: u64) -> Result<CatalogResponse, ApiError>;

    /// `lookup` narrowed to the first result.
    async fn track(&self, id: u64) -> Result<Track, ApiError> {
        self.lookup(id)
            .await?
            .results
            .into_iter()
            .next()
            .ok_or(ApiError::NotFound(id))
    }
}

pub struct ApiService {
    client: Client,
    config: ApiConfig,
}

impl ApiService {
    pub fn new(config: ApiConfig) -> color_eyre::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("tunescout/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    fn search_url(&self, term: &str) -> Result<Url, ApiError> {
        let mut params = vec![("term", term.to_string()), ("entity", "song".to_string())];
        if let Some(limit) = self.config.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(country) = &self.config.country {
            params.push(("country", country.clone()));
        }

        endpoint(&self.config.base_url, "search", &params)
    }

    fn lookup_url(&self, id: u64) -> Result<Url, ApiError> {
        endpoint(&self.config.base_url, "lookup", &[("id", id.to_string())])
    }

    async fn get(&self, url: Url) -> Result<CatalogResponse, ApiError> {
        debug!(url = url.as_str(), "catalog_request");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        decode_response(status, &body)
    }
}

#[async_trait]
impl CatalogApi for ApiService {
    async fn search(&self, term: &str) -> Result<CatalogResponse, ApiError> {
        let url = self.search_url(term)?;
        self.get(url).await
    }

    async fn lookup(&self, id: u64) -> Result<CatalogResponse, ApiError> {
        let url = self.lookup_url(id)?;
        self.get(url).await
    }
}

fn endpoint(base: &str, path: &str, params: &[(&str, String)]) -> Result<Url, ApiError> {
    let raw = format!("{}/{}", base.trim_end_matches('/'), path);
    Url::parse_with_params(&raw, params).map_err(|e| ApiError::Transport(e.to_string()))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error_message: Option<String>,
    message: Option<String>,
}

/// Maps an HTTP status and body onto the catalog envelope or an error
/// descriptor.
pub fn decode_response(status: StatusCode, body: &str) -> Result<CatalogResponse, ApiError> {
    if status.is_success() {
        return serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()));
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error_message.or(b.message));
    warn!(status = status.as_u16(), ?message, "catalog_request_failed");

    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}
