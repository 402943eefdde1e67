//! User notification port

/// Surfaces request failures to the user.
///
/// Implementations block further interaction until the user dismisses the
/// message (a modal in the TUI, stderr plus exit in one-shot mode).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}
