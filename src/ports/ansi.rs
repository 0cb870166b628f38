// src/ports/ansi.rs
use crate::constants::{DEFAULT_THEME, FALLBACK_WIDTH};
use crate::domain::Note;
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};
use terminal_size::{terminal_size, Width};
use tracing::instrument;
use yansi::Paint;

const RESET: &str = "\x1b[0m";

/// Renders notes as ANSI-styled text for the terminal.
///
/// Fenced code blocks go through syntect; everything else is styled with
/// plain SGR sequences. With `color` off the markdown body is returned
/// unchanged so whitespace and line counts stay stable for tests.
#[derive(Debug)]
pub struct AnsiPresenter {
    color: bool,
    width: usize,
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl AnsiPresenter {
    pub fn new(color: bool, theme_name: &str) -> Self {
        let syntaxes = SyntaxSet::load_defaults_newlines();
        let mut themes = ThemeSet::load_defaults();
        // Unknown theme names fall back to the bundled default.
        let theme = themes
            .themes
            .remove(theme_name)
            .or_else(|| themes.themes.remove(DEFAULT_THEME))
            .unwrap_or_default();
        let width = terminal_size()
            .map(|(Width(w), _)| w as usize)
            .unwrap_or(FALLBACK_WIDTH);
        Self {
            color,
            width,
            syntaxes,
            theme,
        }
    }

    /// Fixed width for tests and non-tty output.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Title banner plus rendered body.
    #[instrument(level = "debug", skip(self))]
    pub fn render(&self, note: &Note) -> String {
        let mut out = String::new();
        let rule = "─".repeat(note.title.chars().count().clamp(3, self.width.max(3)));
        if self.color {
            out.push_str(&Paint::cyan(&note.title).bold().to_string());
            out.push('\n');
            out.push_str(&Paint::new(rule.as_str()).dim().to_string());
        } else {
            out.push_str(&note.title);
            out.push('\n');
            out.push_str(&rule);
        }
        out.push('\n');

        let body = self.render_markdown(&note.content);
        if !body.is_empty() {
            out.push('\n');
            out.push_str(&body);
            if !body.ends_with('\n') {
                out.push('\n');
            }
        }
        out
    }

    pub fn render_markdown(&self, input: &str) -> String {
        if !self.color {
            return input.to_string();
        }

        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_TASKLISTS);

        let mut writer = MarkdownWriter::new(self);
        for event in Parser::new_ext(input, options) {
            writer.handle(event);
        }
        writer.finish()
    }
}

/// Line-oriented event consumer. Inline events accumulate into `line`,
/// block boundaries flush it with the current blockquote prefix.
struct MarkdownWriter<'a> {
    presenter: &'a AnsiPresenter,
    out: String,
    line: String,
    quote_depth: usize,
    list_stack: Vec<Option<u64>>,
    strong: usize,
    emphasis: usize,
    strike: usize,
    heading: bool,
    link_stack: Vec<(String, String)>,
    code_lang: Option<String>,
    code_buf: String,
    table_row: Option<Vec<String>>,
    cell_buf: Option<String>,
}

impl<'a> MarkdownWriter<'a> {
    fn new(presenter: &'a AnsiPresenter) -> Self {
        Self {
            presenter,
            out: String::new(),
            line: String::new(),
            quote_depth: 0,
            list_stack: Vec::new(),
            strong: 0,
            emphasis: 0,
            strike: 0,
            heading: false,
            link_stack: Vec::new(),
            code_lang: None,
            code_buf: String::new(),
            table_row: None,
            cell_buf: None,
        }
    }

    fn handle(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if self.code_lang.is_some() {
                    self.code_buf.push_str(&text);
                } else {
                    self.push_text(&text);
                }
            }
            Event::Code(code) => {
                let painted = format!("`{}`", Paint::blue(code.as_ref()));
                self.push_raw(&painted);
            }
            // A break inside an open link label collapses to a space so the
            // label and its URL stay on one line.
            Event::SoftBreak | Event::HardBreak => {
                if self.link_stack.is_empty() {
                    self.end_line();
                } else {
                    self.push_raw(" ");
                }
            }
            Event::Rule => {
                self.open_block();
                let rule = "─".repeat(self.presenter.width.min(FALLBACK_WIDTH));
                self.out.push_str(&Paint::new(rule.as_str()).dim().to_string());
                self.out.push('\n');
            }
            Event::TaskListMarker(checked) => {
                self.push_raw(if checked { "[x] " } else { "[ ] " });
            }
            Event::Html(html) => {
                self.push_raw(html.trim_end());
                self.end_line();
            }
            Event::InlineHtml(html) => self.push_raw(&html),
            Event::FootnoteReference(name) => {
                let reference = format!("[^{name}]");
                self.push_raw(&Paint::new(reference.as_str()).dim().to_string());
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag) {
        match tag {
            Tag::Paragraph => {
                // A pending line means we are continuing a list item.
                if self.line.is_empty() {
                    self.separate_block();
                }
            }
            Tag::Heading { level, .. } => {
                self.open_block();
                self.heading = true;
                let marks = "#".repeat(level as usize);
                self.push_text(&format!("{marks} "));
            }
            Tag::BlockQuote { .. } => {
                self.open_block();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(kind) => {
                self.open_block();
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().unwrap_or("").to_string()
                    }
                    CodeBlockKind::Indented => String::new(),
                };
                self.code_lang = Some(lang);
            }
            Tag::List(start) => {
                if self.list_stack.is_empty() {
                    self.open_block();
                } else {
                    self.end_line();
                }
                self.list_stack.push(start);
            }
            Tag::Item => {
                let indent = "  ".repeat(self.list_stack.len().saturating_sub(1));
                self.line.push_str(&indent);
                let marker = match self.list_stack.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.line
                    .push_str(&Paint::yellow(marker.as_str()).bold().to_string());
            }
            Tag::Emphasis => self.emphasis += 1,
            Tag::Strong => self.strong += 1,
            Tag::Strikethrough => self.strike += 1,
            Tag::Link { dest_url, .. } | Tag::Image { dest_url, .. } => {
                self.link_stack.push((dest_url.to_string(), String::new()));
            }
            Tag::Table(_) => self.open_block(),
            Tag::TableHead | Tag::TableRow => self.table_row = Some(Vec::new()),
            Tag::TableCell => self.cell_buf = Some(String::new()),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph | TagEnd::Item => self.end_line(),
            TagEnd::Heading(_) => {
                self.end_line();
                self.heading = false;
            }
            TagEnd::BlockQuote { .. } => {
                self.end_line();
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            TagEnd::CodeBlock => {
                let lang = self.code_lang.take().unwrap_or_default();
                let code = std::mem::take(&mut self.code_buf);
                self.emit_code(&lang, &code);
            }
            TagEnd::List(_) => {
                self.end_line();
                self.list_stack.pop();
            }
            TagEnd::Emphasis => self.emphasis = self.emphasis.saturating_sub(1),
            TagEnd::Strong => self.strong = self.strong.saturating_sub(1),
            TagEnd::Strikethrough => self.strike = self.strike.saturating_sub(1),
            TagEnd::Link | TagEnd::Image => {
                if let Some((url, label)) = self.link_stack.pop() {
                    self.push_raw(&label);
                    // Autolinks already show the URL as their text.
                    if !url.is_empty() && label != url {
                        let suffix = format!(" ({url})");
                        self.push_raw(&Paint::new(suffix.as_str()).dim().to_string());
                    }
                }
            }
            TagEnd::TableCell => {
                if let Some(cell) = self.cell_buf.take() {
                    if let Some(row) = &mut self.table_row {
                        row.push(cell);
                    }
                }
            }
            TagEnd::TableHead | TagEnd::TableRow => self.flush_row(),
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if self.heading {
            self.push_raw(&Paint::cyan(text).bold().to_string());
            return;
        }
        if self.strong == 0 && self.emphasis == 0 && self.strike == 0 {
            self.push_raw(text);
            return;
        }
        let mut painted = Paint::new(text);
        if self.strong > 0 {
            painted = painted.bold();
        }
        if self.emphasis > 0 {
            painted = painted.italic();
        }
        if self.strike > 0 {
            painted = painted.strike();
        }
        self.push_raw(&painted.to_string());
    }

    fn push_raw(&mut self, text: &str) {
        if let Some((_, label)) = self.link_stack.last_mut() {
            label.push_str(text);
        } else if let Some(cell) = &mut self.cell_buf {
            cell.push_str(text);
        } else {
            self.line.push_str(text);
        }
    }

    fn end_line(&mut self) {
        if self.line.is_empty() {
            return;
        }
        for _ in 0..self.quote_depth {
            self.out.push_str(&Paint::new("│ ").dim().to_string());
        }
        let line = std::mem::take(&mut self.line);
        self.out.push_str(&line);
        self.out.push('\n');
    }

    fn open_block(&mut self) {
        self.end_line();
        self.separate_block();
    }

    fn separate_block(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    fn emit_code(&mut self, lang: &str, code: &str) {
        let syntax = if lang.is_empty() {
            self.presenter.syntaxes.find_syntax_plain_text()
        } else {
            self.presenter
                .syntaxes
                .find_syntax_by_token(lang)
                .unwrap_or_else(|| self.presenter.syntaxes.find_syntax_plain_text())
        };
        let quote = Paint::new("│ ").dim().to_string().repeat(self.quote_depth);
        let mut highlighter = HighlightLines::new(syntax, &self.presenter.theme);
        for line in LinesWithEndings::from(code) {
            self.out.push_str(&quote);
            self.out.push_str("  ");
            match highlighter.highlight_line(line, &self.presenter.syntaxes) {
                Ok(ranges) => {
                    let escaped = as_24_bit_terminal_escaped(&ranges, false);
                    self.out.push_str(escaped.trim_end_matches('\n'));
                    self.out.push_str(RESET);
                }
                Err(_) => self.out.push_str(line.trim_end_matches('\n')),
            }
            self.out.push('\n');
        }
    }

    fn flush_row(&mut self) {
        if let Some(cells) = self.table_row.take() {
            let separator = Paint::new(" │ ").dim().to_string();
            self.out.push_str(&cells.join(&separator));
            self.out.push('\n');
        }
    }

    fn finish(mut self) -> String {
        self.end_line();
        while self.out.ends_with("\n\n") {
            self.out.pop();
        }
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn presenter(color: bool) -> AnsiPresenter {
        AnsiPresenter::new(color, DEFAULT_THEME).with_width(80)
    }

    #[test]
    fn given_color_disabled_when_rendering_markdown_then_returns_input_unchanged() {
        let input = "# Title\n\nSome `code` and **bold**.\n\n```rust\nfn main() {}\n```\n";

        let rendered = presenter(false).render_markdown(input);

        assert_eq!(rendered, input);
    }

    #[test]
    fn given_plain_paragraph_when_rendering_with_color_then_no_escape_codes_added() {
        let rendered = presenter(true).render_markdown("just text");

        assert_eq!(rendered, "just text\n");
    }

    #[test]
    fn given_heading_when_rendering_with_color_then_hash_marks_and_ansi_present() {
        let rendered = presenter(true).render_markdown("## Section");

        assert!(rendered.contains("## "));
        assert!(rendered.contains("Section"));
        assert!(rendered.contains("\x1b["));
    }

    #[test]
    fn given_fenced_rust_block_when_rendering_then_code_is_highlighted() {
        let rendered = presenter(true).render_markdown("```rust\nfn main() {}\n```");

        // 24-bit color escapes only come from the highlighter.
        assert!(rendered.contains("\x1b[38;2;"));
        assert!(rendered.contains("main"));
        assert!(rendered.ends_with("\n"));
    }

    #[test]
    fn given_unknown_fence_language_when_rendering_then_falls_back_to_plain_text() {
        let rendered = presenter(true).render_markdown("```nosuchlang\nsome code\n```");

        assert!(rendered.contains("some code"));
    }

    #[rstest]
    #[case("- first\n- second", "• ")]
    #[case("1. first\n2. second", "1. ")]
    #[case("- [x] done\n- [ ] open", "[x] ")]
    fn given_list_when_rendering_then_marker_present(#[case] input: &str, #[case] marker: &str) {
        let rendered = presenter(true).render_markdown(input);

        assert!(rendered.contains(marker), "missing {marker:?} in {rendered:?}");
    }

    #[test]
    fn given_nested_list_when_rendering_then_inner_items_indented() {
        let rendered = presenter(true).render_markdown("- outer\n  - inner");

        assert!(rendered.contains("outer"));
        assert!(rendered.contains("\n  "));
    }

    #[test]
    fn given_blockquote_when_rendering_then_lines_carry_bar_prefix() {
        let rendered = presenter(true).render_markdown("> quoted line");

        assert!(rendered.contains("│ "));
        assert!(rendered.contains("quoted line"));
    }

    #[test]
    fn given_inline_code_when_rendering_then_backticks_survive() {
        let rendered = presenter(true).render_markdown("run `cargo doc` now");

        assert!(rendered.contains("`"));
        assert!(rendered.contains("cargo doc"));
    }

    #[test]
    fn given_link_when_rendering_then_url_shown_after_text() {
        let rendered = presenter(true).render_markdown("[site](https://example.com)");

        assert!(rendered.contains("site"));
        assert!(rendered.contains("(https://example.com)"));
    }

    #[test]
    fn given_link_label_spanning_lines_when_rendering_then_label_joins_on_one_line() {
        let rendered = presenter(true).render_markdown("see [mylonger\nx](https://example.com)");

        assert!(rendered.contains("see mylonger x"), "got {rendered:?}");
        assert!(rendered.contains("(https://example.com)"));
    }

    #[test]
    fn given_autolink_inside_table_cell_when_rendering_then_url_shown_once() {
        let input = "| link |\n| --- |\n| <https://example.com> |";

        let rendered = presenter(true).render_markdown(input);

        assert_eq!(rendered.matches("https://example.com").count(), 1);
    }

    #[test]
    fn given_rule_when_rendering_then_horizontal_line_emitted() {
        let rendered = presenter(true).render_markdown("before\n\n---\n\nafter");

        assert!(rendered.contains("─"));
    }

    #[test]
    fn given_note_when_rendering_plain_then_banner_and_body_are_verbatim() {
        let note = Note {
            id: "7".to_string(),
            title: "Meeting Notes".to_string(),
            content: "hello".to_string(),
            folder_id: None,
        };

        let rendered = presenter(false).render(&note);

        assert_eq!(rendered, "Meeting Notes\n─────────────\n\nhello\n");
    }

    #[test]
    fn given_note_without_content_when_rendering_then_only_banner_emitted() {
        let note = Note {
            id: "7".to_string(),
            title: "Empty".to_string(),
            content: String::new(),
            folder_id: None,
        };

        let rendered = presenter(false).render(&note);

        assert_eq!(rendered, "Empty\n─────\n");
    }
}
