//! Markdown → terminal text.
//!
//! Walks the `pulldown-cmark` event stream (with the GFM extensions the web
//! front-end used: tables, strikethrough, task lists) and produces styled
//! `ratatui` lines. Wrapping is left to the `Paragraph` that displays them.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

const RULE: &str = "────────────────────────────────────────";

pub fn render_markdown(source: &str) -> Text<'static> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut renderer = Renderer::default();
    for event in Parser::new_ext(source, options) {
        match event {
            Event::Start(tag) => renderer.start(tag),
            Event::End(tag) => renderer.end(tag),
            Event::Text(text) => renderer.text(&text),
            Event::Code(code) => renderer.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => renderer.text(&html),
            Event::SoftBreak => renderer.text(" "),
            Event::HardBreak => renderer.flush_line(),
            Event::Rule => renderer.rule(),
            Event::TaskListMarker(done) => {
                renderer.push(if done { "[x] " } else { "[ ] " }, muted());
            }
            _ => {}
        }
    }
    renderer.finish()
}

fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}

#[derive(Default)]
struct Inline {
    emphasis: usize,
    strong: usize,
    strikethrough: usize,
    link: usize,
}

impl Inline {
    fn style(&self) -> Style {
        let mut style = Style::default();
        if self.emphasis > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.strong > 0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.strikethrough > 0 {
            style = style.add_modifier(Modifier::CROSSED_OUT);
        }
        if self.link > 0 {
            style = style.fg(Color::Cyan).add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

#[derive(Default)]
struct Table {
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    cell: String,
}

#[derive(Default)]
struct Renderer {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    inline: Inline,
    heading: Option<HeadingLevel>,
    quote_depth: usize,
    /// `Some(next_number)` for ordered lists.
    lists: Vec<Option<u64>>,
    link_targets: Vec<String>,
    code_block: Option<String>,
    table: Option<Table>,
}

impl Renderer {
    fn finish(mut self) -> Text<'static> {
        self.flush_line();
        while self.lines.last().is_some_and(|line| line.width() == 0) {
            self.lines.pop();
        }
        Text::from(self.lines)
    }

    fn push(&mut self, text: &str, style: Style) {
        if text.is_empty() {
            return;
        }
        if self.current.is_empty() && self.quote_depth > 0 {
            self.current
                .push(Span::styled("│ ".repeat(self.quote_depth), muted()));
        }
        self.current.push(Span::styled(text.to_string(), style));
    }

    fn flush_line(&mut self) {
        if !self.current.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.current)));
        }
    }

    fn blank_line(&mut self) {
        self.flush_line();
        if self.lines.last().is_some_and(|line| line.width() > 0) {
            self.lines.push(Line::default());
        }
    }

    fn text_style(&self) -> Style {
        match self.heading {
            Some(HeadingLevel::H1) => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            Some(HeadingLevel::H2) => Style::default()
                .fg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD),
            Some(_) => Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
            None => self.inline.style(),
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        if let Some(table) = self.table.as_mut() {
            match tag {
                Tag::TableRow | Tag::TableHead => table.row.clear(),
                Tag::TableCell => table.cell.clear(),
                _ => {}
            }
            return;
        }
        match tag {
            Tag::Heading { level, .. } => {
                self.flush_line();
                self.heading = Some(level);
            }
            Tag::BlockQuote(_) => {
                self.flush_line();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(kind) => {
                self.flush_line();
                if let CodeBlockKind::Fenced(lang) = kind {
                    if !lang.is_empty() {
                        self.push(&format!("```{lang}"), muted());
                        self.flush_line();
                    }
                }
                self.code_block = Some(String::new());
            }
            Tag::List(start) => {
                self.flush_line();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush_line();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let bullet = match self.lists.last_mut() {
                    Some(Some(next)) => {
                        let bullet = format!("{next}. ");
                        *next += 1;
                        bullet
                    }
                    _ => "• ".to_string(),
                };
                self.push(&format!("{indent}{bullet}"), muted());
            }
            Tag::Emphasis => self.inline.emphasis += 1,
            Tag::Strong => self.inline.strong += 1,
            Tag::Strikethrough => self.inline.strikethrough += 1,
            Tag::Link { dest_url, .. } => {
                self.inline.link += 1;
                self.link_targets.push(dest_url.to_string());
            }
            Tag::Image { dest_url, .. } => {
                self.push(&format!("[image: {dest_url}] "), muted());
            }
            Tag::Table(_) => {
                self.flush_line();
                self.table = Some(Table::default());
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        if let Some(table) = self.table.as_mut() {
            match tag {
                TagEnd::TableCell => {
                    let cell = std::mem::take(&mut table.cell);
                    table.row.push(cell.trim().to_string());
                }
                TagEnd::TableRow | TagEnd::TableHead => {
                    let row = std::mem::take(&mut table.row);
                    table.rows.push(row);
                }
                TagEnd::Table => {
                    if let Some(table) = self.table.take() {
                        self.render_table(table);
                    }
                    self.blank_line();
                }
                _ => {}
            }
            return;
        }
        match tag {
            TagEnd::Paragraph => self.blank_line(),
            TagEnd::Heading(_) => {
                self.heading = None;
                self.blank_line();
            }
            TagEnd::BlockQuote => {
                self.flush_line();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank_line();
            }
            TagEnd::CodeBlock => {
                let code = self.code_block.take().unwrap_or_default();
                let style = Style::default().fg(Color::LightYellow);
                for line in code.trim_end_matches('\n').lines() {
                    self.push("  ", style);
                    self.push(line, style);
                    self.flush_line();
                }
                self.blank_line();
            }
            TagEnd::List(_) => {
                self.flush_line();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Item => self.flush_line(),
            TagEnd::Emphasis => self.inline.emphasis = self.inline.emphasis.saturating_sub(1),
            TagEnd::Strong => self.inline.strong = self.inline.strong.saturating_sub(1),
            TagEnd::Strikethrough => {
                self.inline.strikethrough = self.inline.strikethrough.saturating_sub(1);
            }
            TagEnd::Link => {
                self.inline.link = self.inline.link.saturating_sub(1);
                if let Some(target) = self.link_targets.pop() {
                    self.push(&format!(" <{target}>"), muted());
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(code) = self.code_block.as_mut() {
            code.push_str(text);
            return;
        }
        if let Some(table) = self.table.as_mut() {
            table.cell.push_str(text);
            return;
        }
        let style = self.text_style();
        self.push(text, style);
    }

    fn inline_code(&mut self, code: &str) {
        if let Some(table) = self.table.as_mut() {
            table.cell.push_str(code);
            return;
        }
        self.push(code, Style::default().fg(Color::LightYellow));
    }

    fn rule(&mut self) {
        self.flush_line();
        self.push(RULE, muted());
        self.blank_line();
    }

    fn render_table(&mut self, table: Table) {
        let columns = table.rows.iter().map(Vec::len).max().unwrap_or(0);
        let widths: Vec<usize> = (0..columns)
            .map(|col| {
                table
                    .rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        for (index, row) in table.rows.iter().enumerate() {
            let cells: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(col, width)| {
                    let cell = row.get(col).map(String::as_str).unwrap_or("");
                    format!("{cell:<width$}")
                })
                .collect();
            let style = if index == 0 {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            self.push(&format!("│ {} │", cells.join(" │ ")), style);
            self.flush_line();
            if index == 0 {
                let divider: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
                self.push(&format!("├─{}─┤", divider.join("─┼─")), muted());
                self.flush_line();
            }
        }
    }
}

/// Concatenated text of a rendered line, for tests and plain output.
#[cfg(test)]
fn plain(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}
