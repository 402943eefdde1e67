//! Response stream domain.
//!
//! - [`decoder::Utf8StreamDecoder`]: chunk-boundary-safe UTF-8 decoding
//! - [`state::RequestState`]: per-request lifecycle state machine

pub mod decoder;
pub mod state;
