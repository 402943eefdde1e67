//! Markdown renderers
//!
//! All renderers are pure: the same Markdown always yields the same output,
//! which is what lets the streaming use case re-render the whole response
//! after every chunk.

mod html;
mod terminal;

pub use html::HtmlMarkdownRenderer;
pub use terminal::TerminalMarkdownRenderer;

use chatline_application::MarkdownRenderer;
use chatline_domain::RenderFormat;
use pulldown_cmark::Options;

/// CommonMark plus the GitHub extensions chat backends commonly emit
pub(crate) fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Passes the Markdown source through unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct RawMarkdownRenderer;

impl MarkdownRenderer for RawMarkdownRenderer {
    fn render(&self, markdown: &str) -> String {
        markdown.to_string()
    }
}

/// Renderer selected at runtime from a [`RenderFormat`]
#[derive(Debug, Clone, Copy)]
pub enum AnyMarkdownRenderer {
    Terminal(TerminalMarkdownRenderer),
    Html(HtmlMarkdownRenderer),
    Raw(RawMarkdownRenderer),
}

impl AnyMarkdownRenderer {
    pub fn for_format(format: RenderFormat) -> Self {
        match format {
            RenderFormat::Terminal => Self::Terminal(TerminalMarkdownRenderer::new()),
            RenderFormat::Plain => Self::Terminal(TerminalMarkdownRenderer::plain()),
            RenderFormat::Html => Self::Html(HtmlMarkdownRenderer::new()),
            RenderFormat::Raw => Self::Raw(RawMarkdownRenderer),
        }
    }
}

impl MarkdownRenderer for AnyMarkdownRenderer {
    fn render(&self, markdown: &str) -> String {
        match self {
            Self::Terminal(r) => r.render(markdown),
            Self::Html(r) => r.render(markdown),
            Self::Raw(r) => r.render(markdown),
        }
    }
}
