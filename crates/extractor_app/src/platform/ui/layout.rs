use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Regions of the main screen, top to bottom.
pub struct MainAreas {
    pub header: Rect,
    pub input: Rect,
    pub status: Rect,
    pub error: Option<Rect>,
    pub body: Rect,
    pub footer: Rect,
}

pub fn main_areas(area: Rect, has_error: bool) -> MainAreas {
    let error_height = if has_error { 3 } else { 0 };
    let [header, input, status, error, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(error_height),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    MainAreas {
        header,
        input,
        status,
        error: has_error.then_some(error),
        body,
        footer,
    }
}

/// Regions of the content viewer overlay.
pub struct ViewerAreas {
    pub frame: Rect,
    pub content: Rect,
    pub buttons: Rect,
}

pub fn viewer_areas(area: Rect) -> ViewerAreas {
    let frame = centered(area, 84, 84);
    let inner = Rect {
        x: frame.x.saturating_add(1),
        y: frame.y.saturating_add(1),
        width: frame.width.saturating_sub(2),
        height: frame.height.saturating_sub(2),
    };
    let [content, buttons] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);
    ViewerAreas {
        frame,
        content,
        buttons,
    }
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
