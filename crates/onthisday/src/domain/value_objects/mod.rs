//! Value Objects
//!
//! Immutable values describing what a run looks for and excludes.

pub mod exclusion;
pub mod memory_kind;
pub mod target_date;

pub use exclusion::*;
pub use memory_kind::*;
pub use target_date::*;
