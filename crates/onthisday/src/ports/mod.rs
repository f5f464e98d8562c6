//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the pipeline talks to the photo
//! server. The HTTP implementation lives in the CLI crate.

pub mod photo_server;

// Re-exports
pub use photo_server::*;
