//! On This Day Domain Library
//!
//! Core types and pipeline for building "on this day" memories on a photo
//! server: search a calendar day across past years, drop assets showing
//! excluded people or tags, group the survivors by year and sync them to the
//! server as memories.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Pure entities and pipeline logic
//!   - `entities/`: SearchResult, MemoryEntry, NewMemory
//!   - `value_objects/`: ExclusionConfig, TargetDate, SearchWindow, MemoryKind
//!   - `services/`: filters, year aggregation, memory reconciliation, job
//!   - `errors/`: ApiError, PipelineError
//!
//! - **Ports** (`ports/`): The `PhotoServer` trait the pipeline drives.
//!   The HTTP implementation lives in the CLI crate.
//!
//! # Usage
//!
//! ```rust,ignore
//! use onthisday::{run_memories_job, ExclusionConfig, RunSettings};
//!
//! let settings = RunSettings::new(ExclusionConfig::default());
//! let report = run_memories_job(&server, &settings, today).await?;
//! ```

pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use domain::{
    collect_year_buckets, filter_people, filter_tags, retain_day, run_memories_job, tag_matches,
    ApiError, ExclusionConfig, JobReport, MemoryEntry, MemoryKind, MemoryReconciler, NewMemory, Person,
    PipelineError, ReconcileReport, RunSettings, SearchResult, SearchWindow, TargetDate,
    YearBuckets, DEFAULT_EARLIEST_YEAR,
};
pub use ports::PhotoServer;
