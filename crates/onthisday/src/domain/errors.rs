//! Domain Errors
//!
//! `ApiError` is what a `PhotoServer` call can fail with. `PipelineError`
//! wraps it with the operation and entity that failed; every variant is
//! terminal for the run.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::value_objects::TargetDate;

/// Failure of a single photo server call
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected status {status} (expected {expected}): {body}")]
    UnexpectedStatus {
        status: u16,
        expected: u16,
        body: String,
    },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    pub fn unexpected_status(status: u16, expected: u16, body: impl Into<String>) -> Self {
        Self::UnexpectedStatus {
            status,
            expected,
            body: body.into(),
        }
    }
}

/// Pipeline errors, one per failing operation
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Error searching images for {date}")]
    Search {
        date: NaiveDate,
        #[source]
        source: ApiError,
    },

    #[error("Error fetching tags for asset {asset_id}")]
    AssetTags {
        asset_id: String,
        #[source]
        source: ApiError,
    },

    #[error("Error fetching existing memories")]
    Fetch(#[source] ApiError),

    #[error("Error deleting memory {memory_id}")]
    Delete {
        memory_id: String,
        #[source]
        source: ApiError,
    },

    #[error("Year {year} has no day {day}")]
    MissingDay { year: i32, day: TargetDate },

    #[error("Error creating memory for year {year}")]
    Create {
        year: i32,
        #[source]
        source: ApiError,
    },
}

impl PipelineError {
    pub fn delete<T: AsRef<str>>(memory_id: T, source: ApiError) -> Self {
        Self::Delete {
            memory_id: memory_id.as_ref().to_string(),
            source,
        }
    }

    pub fn asset_tags<T: AsRef<str>>(asset_id: T, source: ApiError) -> Self {
        Self::AssetTags {
            asset_id: asset_id.as_ref().to_string(),
            source,
        }
    }
}
