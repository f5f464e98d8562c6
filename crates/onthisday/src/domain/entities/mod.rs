//! Domain Entities
//!
//! Assets returned by a day search and memories on the server.

pub mod memory;
pub mod search_result;

pub use memory::*;
pub use search_result::*;
