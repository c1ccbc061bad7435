use extractor_core::{AppViewModel, SummaryView, ViewerView};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::layout::{main_areas, viewer_areas};
use super::markdown::render_markdown;

/// Scroll offsets are presentation state; the core never sees them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    pub summary: u16,
    pub viewer: u16,
}

impl ScrollState {
    pub fn apply(&mut self, delta: i32, viewer_open: bool) {
        let target = if viewer_open {
            &mut self.viewer
        } else {
            &mut self.summary
        };
        let next = i32::from(*target).saturating_add(delta).clamp(0, i32::from(u16::MAX));
        *target = u16::try_from(next).unwrap_or(u16::MAX);
    }
}

pub fn render(frame: &mut Frame<'_>, view: &AppViewModel, scroll: &mut ScrollState) {
    let areas = main_areas(frame.area(), view.error.is_some());

    frame.render_widget(
        Line::from("URL Content Extractor").bold().fg(Color::Yellow),
        areas.header,
    );

    let input = Paragraph::new(view.url_input.as_str()).block(
        Block::default()
            .title(" URL ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if view.submit_enabled {
                Color::Cyan
            } else {
                Color::DarkGray
            })),
    );
    frame.render_widget(input, areas.input);
    if view.viewer.is_none() {
        let cursor_x = areas
            .input
            .x
            .saturating_add(1)
            .saturating_add(u16::try_from(view.url_input.chars().count()).unwrap_or(u16::MAX))
            .min(areas.input.right().saturating_sub(2));
        frame.set_cursor_position((cursor_x, areas.input.y + 1));
    }

    frame.render_widget(status_line(view), areas.status);

    if let (Some(area), Some(error)) = (areas.error, view.error.as_deref()) {
        let alert = Paragraph::new(Line::from(vec![
            Span::styled("Error: ", Style::default().bold()),
            Span::raw(error.to_string()),
        ]))
        .style(Style::default().fg(Color::Red))
        .block(Block::default().borders(Borders::ALL).red());
        frame.render_widget(alert, area);
    }

    let body = match &view.summary {
        Some(summary) => summary_text(summary),
        None => Text::default(),
    };
    frame.render_widget(scrolled(body, areas.body, &mut scroll.summary), areas.body);

    frame.render_widget(
        Line::from(footer_hint(view)).fg(Color::DarkGray),
        areas.footer,
    );

    if let Some(viewer) = &view.viewer {
        render_viewer(frame, viewer, &mut scroll.viewer);
    }
}

fn status_line(view: &AppViewModel) -> Line<'static> {
    let button = if view.submit_enabled {
        Span::styled(
            format!("[ {} ]", view.submit_label),
            Style::default().fg(Color::White).bg(Color::Blue),
        )
    } else {
        Span::styled(
            format!("[ {} ]", view.submit_label),
            Style::default().fg(Color::Black).bg(Color::Gray),
        )
    };
    let mut spans = vec![button];
    if let Some(notice) = &view.notice {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(notice.clone(), Style::default().fg(Color::Green)));
    }
    Line::from(spans)
}

fn footer_hint(view: &AppViewModel) -> &'static str {
    if view.viewer.is_some() {
        "c copy · d download · Esc close · ↑/↓ scroll"
    } else if view.summary.as_ref().is_some_and(|s| s.has_full_content) {
        "Enter extract · Ctrl+O full content · ↑/↓ scroll · Esc quit"
    } else {
        "Enter extract · Ctrl+U clear · Esc quit"
    }
}

/// The inline summary: title, abstract and highlights. Full content is only in the viewer.
pub fn summary_text(summary: &SummaryView) -> Text<'static> {
    let section = Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line<'static>> = Vec::new();

    if let Some(title) = &summary.title {
        lines.push(Line::styled(
            title.clone(),
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ));
        lines.push(Line::default());
    }

    if let Some(abstract_md) = &summary.abstract_md {
        lines.push(Line::styled("Abstract:", section));
        lines.extend(render_markdown(abstract_md).lines);
        lines.push(Line::default());
    }

    if !summary.highlights.is_empty() {
        lines.push(Line::styled("Highlights:", section));
        for highlight in &summary.highlights {
            for line in render_markdown(highlight).lines {
                let mut spans = vec![Span::styled("┃ ", Style::default().fg(Color::DarkGray))];
                spans.extend(
                    line.spans
                        .into_iter()
                        .map(|span| span.add_modifier(Modifier::ITALIC)),
                );
                lines.push(Line::from(spans));
            }
            lines.push(Line::default());
        }
    }

    if summary.has_full_content {
        lines.push(Line::from(vec![
            Span::styled("Full content: ", section),
            Span::styled("press Ctrl+O to open", Style::default().fg(Color::Cyan)),
        ]));
    }

    Text::from(lines)
}

fn render_viewer(frame: &mut Frame<'_>, viewer: &ViewerView, scroll: &mut u16) {
    let areas = viewer_areas(frame.area());
    frame.render_widget(Clear, areas.frame);

    let title = viewer
        .title
        .as_deref()
        .map(|title| format!(" {title} "))
        .unwrap_or_default();
    frame.render_widget(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
        areas.frame,
    );

    let content = if viewer.content.is_empty() {
        Text::from("No content to display.")
    } else {
        render_markdown(&viewer.content)
    };
    frame.render_widget(scrolled(content, areas.content, scroll), areas.content);

    frame.render_widget(viewer_buttons(viewer), areas.buttons);
}

fn viewer_buttons(viewer: &ViewerView) -> Line<'static> {
    let copy_style = if viewer.copy_enabled {
        Style::default().fg(Color::Black).bg(Color::LightGreen)
    } else {
        Style::default().fg(Color::Black).bg(Color::Gray)
    };
    let mut spans = vec![Span::styled(format!(" c: {} ", viewer.copy_label), copy_style)];
    if viewer.download_enabled {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            " d: Download ",
            Style::default().fg(Color::Black).bg(Color::LightBlue),
        ));
    }
    spans.push(Span::raw(" "));
    spans.push(Span::styled(
        " Esc: Close ",
        Style::default().fg(Color::Black).bg(Color::White),
    ));
    Line::from(spans).right_aligned()
}

/// Wraps `text` to `area` and clamps `offset` so the last wrapped row can reach
/// the bottom of the area but never scroll past it.
fn scrolled<'a>(text: Text<'a>, area: Rect, offset: &mut u16) -> Paragraph<'a> {
    let paragraph = Paragraph::new(text).wrap(Wrap { trim: false });
    let rows = paragraph.line_count(area.width);
    let max = rows.saturating_sub(usize::from(area.height));
    *offset = (*offset).min(u16::try_from(max).unwrap_or(u16::MAX));
    paragraph.scroll((*offset, 0))
}

#[cfg(test)]
mod tests {
    use extractor_core::{update, AppState, Extraction, Msg};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;

    fn draw(view: &AppViewModel) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut scroll = ScrollState::default();
        terminal
            .draw(|frame| render(frame, view, &mut scroll))
            .unwrap();
        screen_text(&terminal)
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut screen = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                screen.push_str(buffer[(x, y)].symbol());
            }
            screen.push('\n');
        }
        screen
    }

    fn loaded_state() -> AppState {
        let (state, _) = update(
            AppState::new(),
            Msg::InputChanged("https://example.com/article".into()),
        );
        let (state, _) = update(state, Msg::Submitted);
        let (state, _) = update(
            state,
            Msg::FetchCompleted(Ok(Extraction {
                title: Some("T".into()),
                msg: Some("Full *text*".into()),
                abstract_md: Some("**A**".into()),
                highlights: vec!["H1".into()],
            })),
        );
        state
    }

    #[test]
    fn summary_lists_sections_but_not_full_content() {
        let screen = draw(&loaded_state().view());
        assert!(screen.contains("https://example.com/article"));
        assert!(screen.contains("[ Extract ]"));
        assert!(screen.contains("Abstract:"));
        assert!(screen.contains("┃ H1"));
        assert!(screen.contains("press Ctrl+O to open"));
        assert!(!screen.contains("Full text"));
    }

    #[test]
    fn viewer_overlay_shows_full_content_and_buttons() {
        let (state, _) = update(loaded_state(), Msg::OpenViewer);
        let screen = draw(&state.view());
        assert!(screen.contains("Full text"));
        assert!(screen.contains("c: Copy all"));
        assert!(screen.contains("d: Download"));
        assert!(screen.contains(" T "));
    }

    #[test]
    fn error_and_loading_states_render() {
        let (state, _) = update(AppState::new(), Msg::Submitted);
        assert!(draw(&state.view()).contains("[ Extracting... ]"));

        let (state, _) = update(state, Msg::FetchCompleted(Err("upstream down".into())));
        let screen = draw(&state.view());
        assert!(screen.contains("Error: upstream down"));
    }

    #[test]
    fn summary_text_has_one_block_per_highlight() {
        let summary = SummaryView {
            title: None,
            abstract_md: None,
            highlights: vec!["first".into(), "second".into()],
            has_full_content: false,
        };
        let text = summary_text(&summary);
        let quoted = text
            .lines
            .iter()
            .filter(|line| line.spans.first().is_some_and(|s| s.content == "┃ "))
            .count();
        assert_eq!(quoted, 2);
    }

    #[test]
    fn long_paragraph_scrolls_to_its_last_word() {
        let words: Vec<String> = (0..400).map(|i| format!("w{i}")).collect();
        let (state, _) = update(
            AppState::new(),
            Msg::InputChanged("https://example.com/article".into()),
        );
        let (state, _) = update(state, Msg::Submitted);
        let (state, _) = update(
            state,
            Msg::FetchCompleted(Ok(Extraction {
                title: Some("T".into()),
                msg: Some(words.join(" ")),
                ..Extraction::default()
            })),
        );
        let (state, _) = update(state, Msg::OpenViewer);
        let view = state.view();

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut scroll = ScrollState::default();
        terminal
            .draw(|frame| render(frame, &view, &mut scroll))
            .unwrap();
        assert!(!screen_text(&terminal).contains("w399"));

        scroll.apply(1000, true);
        terminal
            .draw(|frame| render(frame, &view, &mut scroll))
            .unwrap();
        assert!(scroll.viewer > 0);
        assert!(scroll.viewer < 1000);
        assert!(screen_text(&terminal).contains("w399"));
    }

    #[test]
    fn short_content_does_not_scroll() {
        let (state, _) = update(loaded_state(), Msg::OpenViewer);
        let view = state.view();
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut scroll = ScrollState::default();
        scroll.apply(50, true);
        terminal
            .draw(|frame| render(frame, &view, &mut scroll))
            .unwrap();
        assert_eq!(scroll.viewer, 0);
        assert!(screen_text(&terminal).contains("Full text"));
    }

    #[test]
    fn scrolling_never_goes_negative() {
        let mut scroll = ScrollState::default();
        scroll.apply(-5, false);
        assert_eq!(scroll.summary, 0);
        scroll.apply(3, true);
        assert_eq!(scroll.viewer, 3);
        assert_eq!(scroll.summary, 0);
    }
}
