//! HTTP adapter for the chat backend
//!
//! Posts `{"question": ...}` as JSON and exposes the response body as a
//! chunk stream without buffering it.

mod backend;

pub use backend::HttpChatBackend;
