//! Markdown → HTML

use super::parser_options;
use chatline_application::MarkdownRenderer;
use pulldown_cmark::{Parser, html};

/// Renders Markdown to an HTML fragment.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlMarkdownRenderer;

impl HtmlMarkdownRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl MarkdownRenderer for HtmlMarkdownRenderer {
    fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, parser_options());
        let mut output = String::with_capacity(markdown.len() + markdown.len() / 2);
        html::push_html(&mut output, parser);
        output
    }
}
