//! `reqwest` client for the Notion REST API, implementing [`PageStore`].

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::{PropertyNames, SyncConfig};
use crate::contract::{PageRef, PageStore, StoreError};
use crate::event::IssueEvent;
use crate::properties;
use crate::status::StatusLabel;

pub const DEFAULT_API_BASE: &str = "https://api.notion.com";

const NOTION_VERSION: &str = "2022-06-28";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct NotionClient {
    http: reqwest::Client,
    api_base: String,
    database_id: String,
    properties: PropertyNames,
}

impl NotionClient {
    pub fn new(config: &SyncConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        let auth_header = format!("Bearer {}", config.notion_token.trim());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header)
                .context("invalid notion authorization header")?,
        );
        headers.insert(
            "notion-version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to create notion api client")?;

        Ok(NotionClient {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            database_id: config.database_id.clone(),
            properties: config.properties.clone(),
        })
    }

    /// Turns a non-success response into an `Api` error carrying the
    /// response body for diagnostics.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<failed to decode response body>"));
        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[derive(Deserialize)]
struct QueryResponse {
    results: Vec<PageObject>,
}

#[derive(Deserialize)]
struct PageObject {
    id: String,
}

#[async_trait]
impl PageStore for NotionClient {
    async fn find_page(&self, issue_number: u64) -> Result<Option<PageRef>, StoreError> {
        let url = format!("{}/v1/databases/{}/query", self.api_base, self.database_id);
        let body = json!({
            "filter": {
                "property": self.properties.issue_id.as_str(),
                "rich_text": { "equals": issue_number.to_string() },
            }
        });

        let response = self.http.post(&url).json(&body).send().await?;
        let response = Self::check(response).await?;
        let parsed: QueryResponse = response.json().await?;
        Ok(parsed
            .results
            .into_iter()
            .next()
            .map(|page| PageRef { id: page.id }))
    }

    async fn create_page(&self, event: &IssueEvent) -> Result<PageRef, StoreError> {
        let url = format!("{}/v1/pages", self.api_base);
        let body = json!({
            "parent": { "database_id": self.database_id.as_str() },
            "properties": properties::full_properties(&self.properties, event, true),
        });

        let response = self.http.post(&url).json(&body).send().await?;
        let response = Self::check(response).await?;
        let page: PageObject = response.json().await?;
        debug!(page_id = %page.id, number = event.number, "Created notion page");
        Ok(PageRef { id: page.id })
    }

    async fn update_page(&self, page: &PageRef, event: &IssueEvent) -> Result<(), StoreError> {
        let url = format!("{}/v1/pages/{}", self.api_base, page.id);
        let body = json!({
            "properties": properties::full_properties(&self.properties, event, false),
        });

        let response = self.http.patch(&url).json(&body).send().await?;
        Self::check(response).await?;
        debug!(page_id = %page.id, number = event.number, "Updated notion page");
        Ok(())
    }

    async fn update_status(&self, page: &PageRef, status: StatusLabel) -> Result<(), StoreError> {
        let url = format!("{}/v1/pages/{}", self.api_base, page.id);
        let body = json!({
            "properties": properties::status_only(&self.properties, status),
        });

        let response = self.http.patch(&url).json(&body).send().await?;
        Self::check(response).await?;
        debug!(page_id = %page.id, status = status.as_str(), "Updated notion page status");
        Ok(())
    }
}
