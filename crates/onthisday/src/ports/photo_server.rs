//! Photo Server Port
//!
//! Operations the pipeline needs from the photo-management server.
//! Calls are issued one at a time; none of them is retried.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{ApiError, MemoryEntry, NewMemory, SearchResult};

/// Interface to the photo server's REST API
#[async_trait]
pub trait PhotoServer: Send + Sync {
    /// Search images taken on `date` anywhere in the world.
    ///
    /// Implementations query [`crate::SearchWindow::for_day`] and may return
    /// assets from neighbouring days; callers narrow with [`crate::retain_day`].
    async fn search_day_images(&self, date: NaiveDate) -> Result<Vec<SearchResult>, ApiError>;

    /// Tag values of a single asset
    async fn fetch_asset_tags(&self, asset_id: &str) -> Result<Vec<String>, ApiError>;

    /// All memories currently on the server
    async fn list_memories(&self) -> Result<Vec<MemoryEntry>, ApiError>;

    async fn delete_memory(&self, memory_id: &str) -> Result<(), ApiError>;

    async fn create_memory(&self, memory: &NewMemory) -> Result<(), ApiError>;
}
