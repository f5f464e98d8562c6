//! Domain Services
//!
//! The memories pipeline: filters, year aggregation, reconciliation and the
//! job tying them together.

pub mod aggregator;
pub mod filters;
pub mod job;
pub mod reconciler;

pub use aggregator::*;
pub use filters::*;
pub use job::*;
pub use reconciler::*;
