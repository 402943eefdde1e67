//! Infrastructure layer for chatline
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod http;
pub mod markdown;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileBackendConfig, FileConfig, FileLoggingConfig,
    FileOutputConfig,
};
pub use http::HttpChatBackend;
pub use markdown::{
    AnyMarkdownRenderer, HtmlMarkdownRenderer, RawMarkdownRenderer, TerminalMarkdownRenderer,
};
