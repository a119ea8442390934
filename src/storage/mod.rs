//! Transient file storage

pub mod scratch;

// Re-exports for convenience
pub use scratch::{remove_if_present, RequestScope, ScratchDir};
