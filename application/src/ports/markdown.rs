//! Markdown rendering port

/// Pure Markdown-to-formatted-text transform.
///
/// Called with the complete response text after every chunk, so it must be
/// deterministic: equal input gives equal output.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> String;
}

impl<F> MarkdownRenderer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn render(&self, markdown: &str) -> String {
        self(markdown)
    }
}
