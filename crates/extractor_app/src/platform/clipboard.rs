use engine_logging::engine_warn;

/// Destination for "Copy all".
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), String>;
}

/// System clipboard via `arboard`.
///
/// The handle is opened on first use and then kept: on X11 the copied text is
/// served by this process and disappears if the handle is dropped.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new().map_err(|err| {
                engine_warn!("Clipboard unavailable: {}", err);
                err.to_string()
            })?;
            self.inner = Some(clipboard);
        }
        let Some(clipboard) = self.inner.as_mut() else {
            return Err("clipboard unavailable".to_string());
        };
        clipboard.set_text(text.to_owned()).map_err(|err| {
            engine_warn!("Clipboard write failed: {}", err);
            err.to_string()
        })
    }
}
