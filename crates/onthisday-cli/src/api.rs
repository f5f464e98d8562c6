//! Immich API Client
//!
//! `PhotoServer` implementation over the Immich REST API. Requests are sent
//! one at a time with the client's default timeouts and are never retried.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, Utc};
use onthisday::{
    ApiError, MemoryEntry, MemoryKind, NewMemory, Person, PhotoServer, SearchResult, SearchWindow,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

const API_KEY_HEADER: &str = "x-api-key";
const SEARCH_PAGE_SIZE: u32 = 250;

/// API Client for Immich
pub struct ImmichClient {
    client: Client,
    base_url: String,
    api_key: String,
}

// ============================================
// API Request/Response Types
// ============================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataSearchRequest {
    #[serde(rename = "type")]
    pub asset_type: String,
    pub taken_after: String,
    pub taken_before: String,
    pub with_people: bool,
    pub page: u32,
    pub size: u32,
}

#[derive(Debug, Deserialize)]
pub struct MetadataSearchResponse {
    pub assets: AssetPage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPage {
    #[serde(default)]
    pub items: Vec<AssetResponse>,
    #[serde(default)]
    pub next_page: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetResponse {
    pub id: String,
    #[serde(default)]
    pub original_path: String,
    pub local_date_time: DateTime<FixedOffset>,
    #[serde(default)]
    pub people: Vec<PersonResponse>,
    #[serde(default)]
    pub tags: Option<Vec<TagResponse>>,
}

#[derive(Debug, Deserialize)]
pub struct PersonResponse {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct TagResponse {
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct AssetTagsResponse {
    #[serde(default)]
    pub tags: Vec<TagResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryResponse {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub memory_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub data: Option<MemoryData>,
    #[serde(default)]
    pub assets: Vec<AssetRef>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MemoryData {
    #[serde(default)]
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct AssetRef {
    pub id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemoryRequest {
    pub asset_ids: Vec<String>,
    pub data: MemoryData,
    pub memory_at: String,
    #[serde(rename = "type")]
    pub kind: MemoryKind,
}

impl MetadataSearchRequest {
    pub fn for_day(date: NaiveDate, page: u32) -> Self {
        let window = SearchWindow::for_day(date);
        Self {
            asset_type: "IMAGE".to_string(),
            taken_after: window.taken_after_rfc3339(),
            taken_before: window.taken_before_rfc3339(),
            with_people: true,
            page,
            size: SEARCH_PAGE_SIZE,
        }
    }
}

impl From<AssetResponse> for SearchResult {
    fn from(asset: AssetResponse) -> Self {
        SearchResult {
            id: asset.id,
            local_time: asset.local_date_time,
            path: asset.original_path,
            people: asset
                .people
                .into_iter()
                .map(|p| Person::new(p.id, p.name))
                .collect(),
            tags: asset
                .tags
                .map(|tags| tags.into_iter().map(|t| t.value).collect()),
        }
    }
}

impl From<MemoryResponse> for MemoryEntry {
    fn from(memory: MemoryResponse) -> Self {
        MemoryEntry {
            id: memory.id,
            kind: memory.kind,
            year: memory.data.and_then(|d| d.year),
            memory_at: memory.memory_at,
            asset_ids: memory.assets.into_iter().map(|a| a.id).collect(),
        }
    }
}

impl From<&NewMemory> for CreateMemoryRequest {
    fn from(memory: &NewMemory) -> Self {
        CreateMemoryRequest {
            asset_ids: memory.asset_ids.clone(),
            data: MemoryData {
                year: Some(memory.year),
            },
            memory_at: memory
                .memory_at
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            kind: memory.kind,
        }
    }
}

// ============================================
// Helper Functions
// ============================================

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

async fn expect_status(resp: Response, expected: StatusCode) -> Result<Response, ApiError> {
    let status = resp.status();
    if status == expected {
        return Ok(resp);
    }
    let body = resp
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read error body".to_string());
    Err(ApiError::unexpected_status(
        status.as_u16(),
        expected.as_u16(),
        body,
    ))
}

async fn parse_body<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let body = resp.text().await.map_err(transport)?;
    serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
}

fn next_page_number(next_page: Option<&str>, current: u32) -> Result<Option<u32>, ApiError> {
    let Some(raw) = next_page else {
        return Ok(None);
    };
    let page: u32 = raw
        .parse()
        .map_err(|_| ApiError::Parse(format!("Invalid nextPage value: {}", raw)))?;
    if page <= current {
        return Err(ApiError::Parse(format!(
            "nextPage {} does not advance past page {}",
            page, current
        )));
    }
    Ok(Some(page))
}

impl ImmichClient {
    /// Create a new API client
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(API_KEY_HEADER, &self.api_key)
    }

    async fn search_page(
        &self,
        date: NaiveDate,
        page: u32,
    ) -> Result<MetadataSearchResponse, ApiError> {
        let request = MetadataSearchRequest::for_day(date, page);
        debug!(date = %date, page, after = %request.taken_after, before = %request.taken_before, "Searching images");

        let resp = self
            .authorized(self.client.post(self.endpoint("search/metadata")))
            .json(&request)
            .send()
            .await
            .map_err(transport)?;

        let resp = expect_status(resp, StatusCode::OK).await?;
        parse_body(resp).await
    }
}

#[async_trait]
impl PhotoServer for ImmichClient {
    async fn search_day_images(&self, date: NaiveDate) -> Result<Vec<SearchResult>, ApiError> {
        let mut results = Vec::new();
        let mut page = 1;

        loop {
            let response = self.search_page(date, page).await?;
            results.extend(response.assets.items.into_iter().map(SearchResult::from));

            match next_page_number(response.assets.next_page.as_deref(), page)? {
                Some(next) => page = next,
                None => break,
            }
        }

        Ok(results)
    }

    async fn fetch_asset_tags(&self, asset_id: &str) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint(&format!("assets/{}", urlencoding::encode(asset_id)));
        let resp = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .map_err(transport)?;

        let resp = expect_status(resp, StatusCode::OK).await?;
        let asset: AssetTagsResponse = parse_body(resp).await?;
        Ok(asset.tags.into_iter().map(|t| t.value).collect())
    }

    async fn list_memories(&self) -> Result<Vec<MemoryEntry>, ApiError> {
        let resp = self
            .authorized(self.client.get(self.endpoint("memories")))
            .send()
            .await
            .map_err(transport)?;

        let resp = expect_status(resp, StatusCode::OK).await?;
        let memories: Vec<MemoryResponse> = parse_body(resp).await?;
        Ok(memories.into_iter().map(MemoryEntry::from).collect())
    }

    async fn delete_memory(&self, memory_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("memories/{}", urlencoding::encode(memory_id)));
        let resp = self
            .authorized(self.client.delete(&url))
            .send()
            .await
            .map_err(transport)?;

        expect_status(resp, StatusCode::NO_CONTENT).await?;
        Ok(())
    }

    async fn create_memory(&self, memory: &NewMemory) -> Result<(), ApiError> {
        let request = CreateMemoryRequest::from(memory);
        let resp = self
            .authorized(self.client.post(self.endpoint("memories")))
            .json(&request)
            .send()
            .await
            .map_err(transport)?;

        expect_status(resp, StatusCode::CREATED).await?;
        Ok(())
    }
}
