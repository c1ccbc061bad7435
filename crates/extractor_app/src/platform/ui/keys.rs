use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use extractor_core::{AppViewModel, Msg};

const PAGE: i32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    Dispatch(Msg),
    /// Scroll the focused pane by this many lines.
    Scroll(i32),
    Quit,
    Ignore,
}

/// Maps a key press to an action. The viewer, when open, takes every key.
pub fn translate(key: KeyEvent, view: &AppViewModel) -> UiAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return UiAction::Quit;
    }
    if let Some(scroll) = scroll_for(key.code) {
        return UiAction::Scroll(scroll);
    }

    if view.viewer.is_some() {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('q') => UiAction::Dispatch(Msg::CloseViewer),
            KeyCode::Char('c') => UiAction::Dispatch(Msg::CopyClicked),
            KeyCode::Char('d') => UiAction::Dispatch(Msg::DownloadClicked),
            _ => UiAction::Ignore,
        };
    }

    match key.code {
        KeyCode::Esc => UiAction::Quit,
        KeyCode::Enter if view.submit_enabled => UiAction::Dispatch(Msg::Submitted),
        KeyCode::Char('o') if ctrl => UiAction::Dispatch(Msg::OpenViewer),
        KeyCode::Char('u') if ctrl => UiAction::Dispatch(Msg::InputChanged(String::new())),
        KeyCode::Char(c) if !ctrl => {
            let mut input = view.url_input.clone();
            input.push(c);
            UiAction::Dispatch(Msg::InputChanged(input))
        }
        KeyCode::Backspace => {
            let mut input = view.url_input.clone();
            if input.pop().is_none() {
                return UiAction::Ignore;
            }
            UiAction::Dispatch(Msg::InputChanged(input))
        }
        _ => UiAction::Ignore,
    }
}

/// Bracketed paste goes into the URL input; line breaks are dropped.
pub fn translate_paste(text: &str, view: &AppViewModel) -> UiAction {
    if view.viewer.is_some() {
        return UiAction::Ignore;
    }
    let mut input = view.url_input.clone();
    input.extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
    UiAction::Dispatch(Msg::InputChanged(input))
}

fn scroll_for(code: KeyCode) -> Option<i32> {
    match code {
        KeyCode::Up => Some(-1),
        KeyCode::Down => Some(1),
        KeyCode::PageUp => Some(-PAGE),
        KeyCode::PageDown => Some(PAGE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use extractor_core::ViewerView;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn main_screen(input: &str) -> AppViewModel {
        AppViewModel {
            url_input: input.to_string(),
            submit_enabled: true,
            ..AppViewModel::default()
        }
    }

    fn with_viewer() -> AppViewModel {
        AppViewModel {
            viewer: Some(ViewerView {
                title: None,
                content: "x".into(),
                copy_label: "Copy all".into(),
                copy_enabled: true,
                download_enabled: true,
            }),
            ..main_screen("https://a")
        }
    }

    #[test]
    fn typing_edits_the_url() {
        let view = main_screen("https://a");
        assert_eq!(
            translate(key(KeyCode::Char('b')), &view),
            UiAction::Dispatch(Msg::InputChanged("https://ab".into()))
        );
        assert_eq!(
            translate(key(KeyCode::Backspace), &view),
            UiAction::Dispatch(Msg::InputChanged("https://".into()))
        );
        assert_eq!(translate(key(KeyCode::Backspace), &main_screen("")), UiAction::Ignore);
    }

    #[test]
    fn enter_submits_only_when_enabled() {
        assert_eq!(
            translate(key(KeyCode::Enter), &main_screen("https://a")),
            UiAction::Dispatch(Msg::Submitted)
        );
        let loading = AppViewModel {
            submit_enabled: false,
            ..main_screen("https://a")
        };
        assert_eq!(translate(key(KeyCode::Enter), &loading), UiAction::Ignore);
    }

    #[test]
    fn viewer_keys_do_not_edit_the_url() {
        let view = with_viewer();
        assert_eq!(
            translate(key(KeyCode::Char('c')), &view),
            UiAction::Dispatch(Msg::CopyClicked)
        );
        assert_eq!(
            translate(key(KeyCode::Char('d')), &view),
            UiAction::Dispatch(Msg::DownloadClicked)
        );
        assert_eq!(
            translate(key(KeyCode::Esc), &view),
            UiAction::Dispatch(Msg::CloseViewer)
        );
        assert_eq!(translate(key(KeyCode::Char('x')), &view), UiAction::Ignore);
        assert_eq!(translate_paste("https://b", &view), UiAction::Ignore);
    }

    #[test]
    fn control_keys() {
        let view = main_screen("https://a");
        assert_eq!(translate(ctrl('c'), &view), UiAction::Quit);
        assert_eq!(translate(key(KeyCode::Esc), &view), UiAction::Quit);
        assert_eq!(
            translate(ctrl('o'), &view),
            UiAction::Dispatch(Msg::OpenViewer)
        );
        assert_eq!(translate(key(KeyCode::PageDown), &view), UiAction::Scroll(PAGE));
    }

    #[test]
    fn paste_drops_line_breaks() {
        assert_eq!(
            translate_paste("https://example.com/\r\narticle\n", &main_screen("")),
            UiAction::Dispatch(Msg::InputChanged("https://example.com/article".into()))
        );
    }
}
