//! Progress notification port
//!
//! Defines the interface for reporting progress while a response streams.

use chatline_domain::RequestState;

/// Callback for progress updates during a single request
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, status bar, etc.)
pub trait StreamProgress: Send + Sync {
    /// Called once the request has been issued
    fn on_request_sent(&self) {}

    /// Called after each chunk with the total bytes received so far
    fn on_chunk(&self, _total_bytes: usize) {}

    /// Called when the request reaches a terminal state
    fn on_finished(&self, _state: RequestState) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl StreamProgress for NoProgress {}
