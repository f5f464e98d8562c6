//! In-memory `PhotoServer` fake (testing only)

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::domain::{ApiError, MemoryEntry, NewMemory, SearchResult};
use crate::ports::PhotoServer;

pub fn at(ts: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(ts).unwrap()
}

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[derive(Debug, Default)]
struct State {
    searched: Vec<NaiveDate>,
    tag_fetches: Vec<String>,
    deleted: Vec<String>,
    created: Vec<NewMemory>,
    memories: Vec<MemoryEntry>,
}

/// Fake server backed by maps, recording every call it receives
#[derive(Debug, Default)]
pub struct FakePhotoServer {
    images: HashMap<NaiveDate, Vec<SearchResult>>,
    asset_tags: HashMap<String, Vec<String>>,
    fail_search: Option<NaiveDate>,
    fail_tags: Option<String>,
    fail_list: bool,
    fail_delete: Option<String>,
    fail_create: Option<i32>,
    state: Mutex<State>,
}

impl FakePhotoServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_images(mut self, date: NaiveDate, images: Vec<SearchResult>) -> Self {
        self.images.insert(date, images);
        self
    }

    pub fn with_asset_tags(mut self, asset_id: &str, tags: &[&str]) -> Self {
        self.asset_tags.insert(
            asset_id.to_string(),
            tags.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    pub fn with_memories(self, memories: Vec<MemoryEntry>) -> Self {
        self.state.lock().unwrap().memories = memories;
        self
    }

    pub fn failing_search(mut self, date: NaiveDate) -> Self {
        self.fail_search = Some(date);
        self
    }

    pub fn failing_tags(mut self, asset_id: &str) -> Self {
        self.fail_tags = Some(asset_id.to_string());
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn failing_delete(mut self, memory_id: &str) -> Self {
        self.fail_delete = Some(memory_id.to_string());
        self
    }

    pub fn failing_create(mut self, year: i32) -> Self {
        self.fail_create = Some(year);
        self
    }

    pub fn searched(&self) -> Vec<NaiveDate> {
        self.state.lock().unwrap().searched.clone()
    }

    pub fn tag_fetches(&self) -> Vec<String> {
        self.state.lock().unwrap().tag_fetches.clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.state.lock().unwrap().deleted.clone()
    }

    pub fn created(&self) -> Vec<NewMemory> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn remaining_memories(&self) -> Vec<MemoryEntry> {
        self.state.lock().unwrap().memories.clone()
    }
}

#[async_trait]
impl PhotoServer for FakePhotoServer {
    async fn search_day_images(&self, date: NaiveDate) -> Result<Vec<SearchResult>, ApiError> {
        self.state.lock().unwrap().searched.push(date);
        if self.fail_search == Some(date) {
            return Err(ApiError::unexpected_status(500, 200, "search failed"));
        }
        Ok(self.images.get(&date).cloned().unwrap_or_default())
    }

    async fn fetch_asset_tags(&self, asset_id: &str) -> Result<Vec<String>, ApiError> {
        self.state
            .lock()
            .unwrap()
            .tag_fetches
            .push(asset_id.to_string());
        if self.fail_tags.as_deref() == Some(asset_id) {
            return Err(ApiError::unexpected_status(404, 200, "asset not found"));
        }
        Ok(self.asset_tags.get(asset_id).cloned().unwrap_or_default())
    }

    async fn list_memories(&self) -> Result<Vec<MemoryEntry>, ApiError> {
        if self.fail_list {
            return Err(ApiError::unexpected_status(401, 200, "unauthorized"));
        }
        Ok(self.state.lock().unwrap().memories.clone())
    }

    async fn delete_memory(&self, memory_id: &str) -> Result<(), ApiError> {
        if self.fail_delete.as_deref() == Some(memory_id) {
            return Err(ApiError::unexpected_status(400, 204, "cannot delete"));
        }
        let mut state = self.state.lock().unwrap();
        state.memories.retain(|m| m.id != memory_id);
        state.deleted.push(memory_id.to_string());
        Ok(())
    }

    async fn create_memory(&self, memory: &NewMemory) -> Result<(), ApiError> {
        if self.fail_create == Some(memory.year) {
            return Err(ApiError::unexpected_status(400, 201, "invalid payload"));
        }
        self.state.lock().unwrap().created.push(memory.clone());
        Ok(())
    }
}
