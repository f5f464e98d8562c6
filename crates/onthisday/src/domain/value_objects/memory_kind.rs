//! MemoryKind - Type marker sent with created memories

use serde::Serialize;

/// Memory type understood by the server
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MemoryKind {
    OnThisDay,
}
