//! Memory - "On this day" albums stored on the server

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::domain::value_objects::MemoryKind;

/// A memory that already exists on the server
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryEntry {
    /// Server-assigned id
    pub id: String,
    /// Memory type as reported by the server
    pub kind: Option<String>,
    /// Year stored in the memory's payload data
    pub year: Option<i32>,
    pub memory_at: Option<DateTime<Utc>>,
    pub asset_ids: Vec<String>,
}

impl MemoryEntry {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: None,
            year: None,
            memory_at: None,
            asset_ids: Vec::new(),
        }
    }
}

/// A memory to be created
#[derive(Debug, Clone, PartialEq)]
pub struct NewMemory {
    pub asset_ids: Vec<String>,
    pub year: i32,
    pub memory_at: DateTime<Utc>,
    pub kind: MemoryKind,
}

impl NewMemory {
    /// Build an on-this-day memory for `date`, the run's calendar day in a past year.
    ///
    /// `memory_at` is midnight UTC of that date.
    pub fn on_this_day(date: NaiveDate, asset_ids: Vec<String>) -> Self {
        Self {
            asset_ids,
            year: date.year(),
            memory_at: date.and_time(chrono::NaiveTime::MIN).and_utc(),
            kind: MemoryKind::OnThisDay,
        }
    }
}
