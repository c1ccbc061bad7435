/// Everything the front-end needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub url_input: String,
    pub submit_enabled: bool,
    pub submit_label: String,
    pub loading: bool,
    pub error: Option<String>,
    pub summary: Option<SummaryView>,
    /// Present only while the viewer is open.
    pub viewer: Option<ViewerView>,
    /// Outcome of the last download.
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub title: Option<String>,
    pub abstract_md: Option<String>,
    pub highlights: Vec<String>,
    /// The viewer trigger is offered only when this is set.
    pub has_full_content: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerView {
    pub title: Option<String>,
    pub content: String,
    pub copy_label: String,
    pub copy_enabled: bool,
    pub download_enabled: bool,
}
