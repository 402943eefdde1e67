//! Application-level configuration.
//!
//! - [`BackendConfig`]: where questions are posted and how long to wait

pub mod backend;

pub use backend::{BackendConfig, DEFAULT_ENDPOINT};
