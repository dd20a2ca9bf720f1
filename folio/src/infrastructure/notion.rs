//! HTTP client for the Notion REST API.
//!
//! Only the two read endpoints the export needs are covered:
//! - `POST /databases/{id}/query`
//! - `GET /blocks/{id}/children`

use crate::application::ContentSource;
use crate::domain::{Block, DomainError, Page, Paginated};
use crate::infrastructure::config::ApiConfig;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

#[derive(Debug, Serialize)]
struct Sort {
    timestamp: &'static str,
    direction: &'static str,
}

#[derive(Debug, Serialize)]
struct QueryBody<'a> {
    page_size: u32,
    sorts: [Sort; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<&'a str>,
}

/// Notion API client authenticated with an integration token.
#[derive(Clone)]
pub struct NotionClient {
    base_url: String,
    version: String,
    page_size: u32,
    token: String,
    client: Client,
}

impl std::fmt::Debug for NotionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionClient")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl NotionClient {
    pub fn new(api: &ApiConfig, token: impl Into<String>) -> Self {
        Self {
            base_url: api.base_url.trim_end_matches('/').to_string(),
            version: api.version.clone(),
            page_size: api.page_size,
            token: token.into(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request with auth and version headers.
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&self.token)
            .header("Notion-Version", &self.version)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        request: RequestBuilder,
    ) -> Result<T, DomainError> {
        let response = request
            .send()
            .await
            .map_err(|e| DomainError::Transport(e.to_string()))?;
        self.handle_response(method, url, response).await
    }

    /// Convert non-success statuses into `DomainError::Api`, carrying the body.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        response: Response,
    ) -> Result<T, DomainError> {
        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| DomainError::Decode(format!("{method} {url}: {e}")))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(DomainError::Api {
                status: status.as_u16(),
                method: method.to_string(),
                url,
                body,
            })
        }
    }
}

#[async_trait]
impl ContentSource for NotionClient {
    #[instrument(level = "debug", skip(self))]
    async fn query_database(
        &self,
        database_id: &str,
        cursor: Option<&str>,
    ) -> Result<Paginated<Page>, DomainError> {
        let url = format!("{}/databases/{}/query", self.base_url, database_id);
        let body = QueryBody {
            page_size: self.page_size,
            sorts: [Sort {
                timestamp: "last_edited_time",
                direction: "descending",
            }],
            start_cursor: cursor,
        };
        let request = self.request(Method::POST, &url).json(&body);
        let listing: Paginated<Page> = self.send(Method::POST, url, request).await?;
        debug!(results = listing.results.len(), has_more = listing.has_more, "Queried database");
        Ok(listing)
    }

    #[instrument(level = "debug", skip(self))]
    async fn block_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
    ) -> Result<Paginated<Block>, DomainError> {
        let mut url = format!("{}/blocks/{}/children", self.base_url, block_id);
        if let Some(cursor) = cursor {
            url.push_str(&format!("?start_cursor={cursor}"));
        }
        let request = self.request(Method::GET, &url);
        self.send(Method::GET, url, request).await
    }
}
