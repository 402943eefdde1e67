//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation
//! adapters must implement.

pub mod chat_backend;
pub mod chat_view;
pub mod markdown;
pub mod notifier;
pub mod progress;
