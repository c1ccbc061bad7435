use std::time::Duration;

use crate::view_model::{AppViewModel, SummaryView, ViewerView};

/// How long "Copied!" / "Copy failed" stays up before the label resets.
pub const COPY_ACK_DURATION: Duration = Duration::from_secs(2);
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Content returned by a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extraction {
    pub title: Option<String>,
    /// Full content, Markdown.
    pub msg: Option<String>,
    /// Summary, Markdown.
    pub abstract_md: Option<String>,
    pub highlights: Vec<String>,
}

impl Extraction {
    /// Full content, if the webhook returned any.
    pub fn full_content(&self) -> Option<&str> {
        self.msg.as_deref().filter(|msg| !msg.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyStatus {
    #[default]
    Ready,
    Pending,
    Copied,
    Failed,
}

impl CopyStatus {
    pub fn label(self) -> &'static str {
        match self {
            CopyStatus::Ready => "Copy all",
            CopyStatus::Pending => "Copying...",
            CopyStatus::Copied => "Copied!",
            CopyStatus::Failed => "Copy failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewerState {
    open: bool,
    copy: CopyStatus,
}

/// The single UI state record. Only [`crate::update`] mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    url_input: String,
    loading: bool,
    result: Option<Extraction>,
    error: Option<String>,
    viewer: ViewerState,
    notice: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let summary = self.result.as_ref().map(|result| SummaryView {
            title: result.title.clone(),
            abstract_md: result.abstract_md.clone().filter(|text| !text.is_empty()),
            highlights: result.highlights.clone(),
            has_full_content: result.full_content().is_some(),
        });
        let viewer = self.viewer_content().and_then(|(title, content)| {
            self.viewer.open.then(|| ViewerView {
                title: title.map(ToOwned::to_owned),
                content: content.to_string(),
                copy_label: self.viewer.copy.label().to_string(),
                copy_enabled: self.viewer.copy == CopyStatus::Ready,
                download_enabled: true,
            })
        });
        AppViewModel {
            url_input: self.url_input.clone(),
            submit_enabled: !self.loading,
            submit_label: if self.loading { "Extracting..." } else { "Extract" }.to_string(),
            loading: self.loading,
            error: self.error.clone(),
            summary,
            viewer,
            notice: self.notice.clone(),
        }
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn result(&self) -> Option<&Extraction> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_viewer_open(&self) -> bool {
        self.viewer.open
    }

    pub fn copy_status(&self) -> CopyStatus {
        self.viewer.copy
    }

    /// Returns whether a re-render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn viewer_content(&self) -> Option<(Option<&str>, &str)> {
        let result = self.result.as_ref()?;
        let content = result.full_content()?;
        Some((result.title.as_deref(), content))
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.url_input != input {
            self.url_input = input;
            self.mark_dirty();
        }
    }

    /// Clears the previous outcome and closes the viewer before a new request.
    pub(crate) fn begin_loading(&mut self) {
        self.result = None;
        self.error = None;
        self.notice = None;
        self.viewer.open = false;
        self.loading = true;
        self.mark_dirty();
    }

    pub(crate) fn finish_with_result(&mut self, result: Extraction) {
        self.loading = false;
        self.error = None;
        self.result = Some(result);
        self.mark_dirty();
    }

    pub(crate) fn finish_with_error(&mut self, message: String) {
        self.loading = false;
        self.result = None;
        self.error = Some(if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        });
        self.mark_dirty();
    }

    pub(crate) fn set_viewer_open(&mut self, open: bool) {
        if self.viewer.open != open {
            self.viewer.open = open;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_copy_status(&mut self, status: CopyStatus) {
        if self.viewer.copy != status {
            self.viewer.copy = status;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_notice(&mut self, notice: String) {
        self.notice = Some(notice);
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
