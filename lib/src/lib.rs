//! Notion API bindings for Rust
//! Provides functions to query a database page by page and to create pages in it

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.notion.com/v1";
pub const NOTION_VERSION: &str = "2022-06-28";

#[derive(Error, Debug)]
pub enum NotionError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Invalid header value")]
    InvalidHeader,
    #[error("Notion API returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// One page (database row) as returned by the query endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

impl Page {
    /// Value of a `url` typed property, if set
    pub fn url_property(&self, name: &str) -> Option<&str> {
        self.properties
            .get(name)
            .and_then(|p| p.get("url"))
            .and_then(|u| u.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<Page>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Serialize)]
struct QueryPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a serde_json::Value>,
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct Parent<'a> {
    database_id: &'a str,
}

#[derive(Debug, Serialize)]
struct CreatePagePayload<'a> {
    parent: Parent<'a>,
    properties: &'a serde_json::Value,
}

pub struct NotionClient {
    url: String,
    client: Client,
}

impl NotionClient {
    pub fn new(url: &str, token: &str) -> Result<Self, NotionError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| NotionError::InvalidHeader)?,
        );
        headers.insert(
            HeaderName::from_static("notion-version"),
            HeaderValue::from_static(NOTION_VERSION),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Query one page of database rows, resuming at `start_cursor` when given
    pub fn query_database(
        &self,
        database_id: &str,
        filter: Option<&serde_json::Value>,
        page_size: u32,
        start_cursor: Option<&str>,
    ) -> Result<QueryResponse, NotionError> {
        let payload = QueryPayload {
            filter,
            page_size,
            start_cursor,
        };

        let response = self
            .client
            .post(format!("{}/databases/{}/query", self.url, database_id))
            .json(&payload)
            .send()?;

        Ok(check_status(response)?.json()?)
    }

    /// Create a new row in the database with the given property values
    pub fn create_page(
        &self,
        database_id: &str,
        properties: &serde_json::Value,
    ) -> Result<Page, NotionError> {
        let payload = CreatePagePayload {
            parent: Parent { database_id },
            properties,
        };

        let response = self
            .client
            .post(format!("{}/pages", self.url))
            .json(&payload)
            .send()?;

        Ok(check_status(response)?.json()?)
    }
}

/// Turn a non-success response into `NotionError::Api`, keeping the body for logging
fn check_status(response: Response) -> Result<Response, NotionError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    Err(NotionError::Api {
        status: status.as_u16(),
        body,
    })
}
