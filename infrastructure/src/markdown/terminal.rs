//! Markdown → terminal text
//!
//! Lays Markdown out for a fixed-width terminal: bullets and numbers for
//! lists, indented code blocks, `│` bars for block quotes and link targets in
//! parentheses. With ANSI enabled, emphasis, headings and code are styled
//! via `colored`; without it the output is plain text suitable for widgets
//! that do their own styling.

use super::parser_options;
use chatline_application::MarkdownRenderer;
use colored::Colorize;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

const RULE_WIDTH: usize = 40;
const CODE_INDENT: &str = "    ";
const LIST_INDENT: &str = "  ";

/// Renders Markdown to terminal-friendly text.
#[derive(Debug, Clone, Copy)]
pub struct TerminalMarkdownRenderer {
    ansi: bool,
}

impl TerminalMarkdownRenderer {
    /// Styled output
    pub fn new() -> Self {
        Self { ansi: true }
    }

    /// Same layout, no escape codes
    pub fn plain() -> Self {
        Self { ansi: false }
    }
}

impl Default for TerminalMarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer for TerminalMarkdownRenderer {
    fn render(&self, markdown: &str) -> String {
        let mut writer = Writer::new(self.ansi);
        for event in Parser::new_ext(markdown, parser_options()) {
            writer.event(event);
        }
        writer.finish()
    }
}

/// Per-render layout state
struct Writer {
    ansi: bool,
    out: String,
    at_line_start: bool,
    blank_pending: bool,
    strong: usize,
    emphasis: usize,
    strikethrough: usize,
    heading: Option<HeadingLevel>,
    heading_start: usize,
    in_code_block: bool,
    quote_depth: usize,
    /// Next number per open list; `None` for bullet lists
    lists: Vec<Option<u64>>,
    links: Vec<String>,
    link_text_start: usize,
    cell_index: usize,
    in_table_head: bool,
}

impl Writer {
    fn new(ansi: bool) -> Self {
        Self {
            ansi,
            out: String::new(),
            at_line_start: true,
            blank_pending: false,
            strong: 0,
            emphasis: 0,
            strikethrough: 0,
            heading: None,
            heading_start: 0,
            in_code_block: false,
            quote_depth: 0,
            lists: Vec::new(),
            links: Vec::new(),
            link_text_start: 0,
            cell_index: 0,
            in_table_head: false,
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                if self.ansi {
                    let styled = code.yellow().to_string();
                    self.raw(&styled);
                } else {
                    self.raw(&format!("`{code}`"));
                }
            }
            Event::Html(html) | Event::InlineHtml(html) => self.text(&html),
            Event::SoftBreak => self.raw(" "),
            Event::HardBreak => self.newline(),
            Event::Rule => {
                self.begin_block();
                let rule = "─".repeat(RULE_WIDTH);
                let rule = if self.ansi {
                    rule.dimmed().to_string()
                } else {
                    rule
                };
                self.raw(&rule);
                self.end_block();
            }
            Event::TaskListMarker(checked) => {
                self.raw(if checked { "[x] " } else { "[ ] " });
            }
            Event::FootnoteReference(name) => self.raw(&format!("[^{name}]")),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if self.lists.is_empty() {
                    self.begin_block();
                }
            }
            Tag::Heading { level, .. } => {
                self.begin_block();
                self.heading = Some(level);
                self.heading_start = self.out.len();
            }
            Tag::BlockQuote { .. } => {
                self.begin_block();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(_) => {
                self.begin_block();
                self.in_code_block = true;
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.begin_block();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.ensure_line_start();
                let depth = self.lists.len().saturating_sub(1);
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.raw(&format!("{}{}", LIST_INDENT.repeat(depth), marker));
            }
            Tag::Emphasis => self.emphasis += 1,
            Tag::Strong => self.strong += 1,
            Tag::Strikethrough => {
                self.strikethrough += 1;
                if !self.ansi {
                    self.raw("~~");
                }
            }
            Tag::Link { dest_url, .. } => {
                self.links.push(dest_url.into_string());
                self.link_text_start = self.out.len();
            }
            Tag::Image { dest_url, .. } => {
                self.raw("[image: ");
                self.links.push(dest_url.into_string());
                self.link_text_start = self.out.len();
            }
            Tag::Table(_) => self.begin_block(),
            Tag::TableHead => self.in_table_head = true,
            Tag::TableRow => self.cell_index = 0,
            Tag::TableCell => {
                if self.cell_index > 0 {
                    self.raw(" | ");
                }
                self.cell_index += 1;
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if self.lists.is_empty() {
                    self.end_block();
                } else {
                    self.ensure_line_start();
                }
            }
            TagEnd::Heading { .. } => {
                let level = self.heading.take();
                if !self.ansi {
                    let width = self.out[self.heading_start..].chars().count();
                    match level {
                        Some(HeadingLevel::H1) => self.underline('=', width),
                        Some(HeadingLevel::H2) => self.underline('-', width),
                        _ => {}
                    }
                }
                self.end_block();
            }
            TagEnd::BlockQuote { .. } => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.end_block();
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.end_block();
            }
            TagEnd::List { .. } => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.end_block();
                }
            }
            TagEnd::Item => self.ensure_line_start(),
            TagEnd::Emphasis => self.emphasis = self.emphasis.saturating_sub(1),
            TagEnd::Strong => self.strong = self.strong.saturating_sub(1),
            TagEnd::Strikethrough => {
                self.strikethrough = self.strikethrough.saturating_sub(1);
                if !self.ansi {
                    self.raw("~~");
                }
            }
            TagEnd::Link => {
                if let Some(url) = self.links.pop() {
                    let label = &self.out[self.link_text_start..];
                    if !url.is_empty() && !label.contains(url.as_str()) {
                        self.raw(&format!(" ({url})"));
                    }
                }
            }
            TagEnd::Image => {
                if let Some(url) = self.links.pop() {
                    self.raw(&format!(" ({url})]"));
                }
            }
            TagEnd::TableHead => {
                self.in_table_head = false;
                self.newline();
            }
            TagEnd::TableRow => self.newline(),
            TagEnd::Table => self.end_block(),
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        let mut lines = text.split('\n').peekable();
        while let Some(line) = lines.next() {
            if !line.is_empty() {
                let styled = self.style(line);
                self.raw(&styled);
            }
            if lines.peek().is_some() {
                self.newline();
            }
        }
    }

    fn style(&self, text: &str) -> String {
        if !self.ansi {
            return text.to_string();
        }
        let mut styled = text.normal();
        if self.in_code_block {
            return styled.yellow().to_string();
        }
        if self.heading.is_some() {
            styled = styled.bold().cyan();
        }
        if self.in_table_head || self.strong > 0 {
            styled = styled.bold();
        }
        if self.emphasis > 0 {
            styled = styled.italic();
        }
        if self.strikethrough > 0 {
            styled = styled.strikethrough();
        }
        if !self.links.is_empty() {
            styled = styled.blue().underline();
        }
        styled.to_string()
    }

    /// Append text on the current line, writing the line prefix first if needed.
    fn raw(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            self.write_prefix();
            self.at_line_start = false;
        }
        self.out.push_str(text);
    }

    fn write_prefix(&mut self) {
        if self.quote_depth > 0 {
            let bars = "│ ".repeat(self.quote_depth);
            if self.ansi {
                let styled = bars.dimmed().to_string();
                self.out.push_str(&styled);
            } else {
                self.out.push_str(&bars);
            }
        }
        if self.in_code_block {
            self.out.push_str(CODE_INDENT);
        }
    }

    fn newline(&mut self) {
        self.out.push('\n');
        self.at_line_start = true;
    }

    fn ensure_line_start(&mut self) {
        if !self.at_line_start {
            self.newline();
        }
    }

    fn underline(&mut self, ch: char, width: usize) {
        self.newline();
        self.raw(&ch.to_string().repeat(width.max(1)));
    }

    /// Separate a new block from the previous one by a blank line.
    fn begin_block(&mut self) {
        self.ensure_line_start();
        if self.blank_pending && !self.out.is_empty() {
            self.out.push('\n');
        }
        self.blank_pending = false;
    }

    fn end_block(&mut self) {
        self.ensure_line_start();
        self.blank_pending = true;
    }

    fn finish(self) -> String {
        self.out.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(md: &str) -> String {
        TerminalMarkdownRenderer::plain().render(md)
    }

    #[test]
    fn test_strong_plain() {
        assert_eq!(plain("Hello **world**"), "Hello world");
    }

    #[test]
    fn test_paragraphs_separated_by_blank_line() {
        assert_eq!(plain("one\n\ntwo"), "one\n\ntwo");
    }

    #[test]
    fn test_soft_break_is_space() {
        assert_eq!(plain("one\ntwo"), "one two");
    }

    #[test]
    fn test_bullet_list() {
        assert_eq!(plain("- a\n- b"), "• a\n• b");
    }

    #[test]
    fn test_ordered_list_keeps_start_number() {
        assert_eq!(plain("3. x\n4. y"), "3. x\n4. y");
    }

    #[test]
    fn test_nested_list_indent() {
        assert_eq!(plain("- a\n  - b"), "• a\n  • b");
    }

    #[test]
    fn test_heading_underlined() {
        assert_eq!(plain("# Title\n\nbody"), "Title\n=====\n\nbody");
    }

    #[test]
    fn test_code_block_indented() {
        assert_eq!(
            plain("```rust\nfn main() {}\n```"),
            "    fn main() {}"
        );
    }

    #[test]
    fn test_inline_code_plain() {
        assert_eq!(plain("run `cargo`"), "run `cargo`");
    }

    #[test]
    fn test_block_quote_prefix() {
        assert_eq!(plain("> quoted"), "│ quoted");
    }

    #[test]
    fn test_link_target_appended() {
        assert_eq!(
            plain("see [docs](https://example.com)"),
            "see docs (https://example.com)"
        );
    }

    #[test]
    fn test_autolink_not_duplicated() {
        assert_eq!(
            plain("<https://example.com>"),
            "https://example.com"
        );
    }

    #[test]
    fn test_task_list() {
        assert_eq!(plain("- [x] done\n- [ ] todo"), "• [x] done\n• [ ] todo");
    }

    #[test]
    fn test_table_cells_joined() {
        assert_eq!(
            plain("| a | b |\n|---|---|\n| 1 | 2 |"),
            "a | b\n1 | 2"
        );
    }

    #[test]
    fn test_rule() {
        assert_eq!(plain("a\n\n---\n\nb"), format!("a\n\n{}\n\nb", "─".repeat(40)));
    }

    #[test]
    fn test_ansi_output_keeps_text() {
        let out = TerminalMarkdownRenderer::new().render("Hello **world**");
        assert!(out.contains("Hello"));
        assert!(out.contains("world"));
    }

    #[test]
    fn test_deterministic() {
        let md = "# T\n\n- a **b**\n\n```\ncode\n```";
        assert_eq!(plain(md), plain(md));
    }
}
