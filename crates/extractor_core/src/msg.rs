use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input.
    InputChanged(String),
    /// User submitted the current URL input.
    Submitted,
    /// The webhook call finished: extracted content or a displayable message.
    FetchCompleted(Result<crate::Extraction, String>),
    /// User asked to see the full content.
    OpenViewer,
    /// User dismissed the viewer.
    CloseViewer,
    CopyClicked,
    CopyCompleted(Result<(), String>),
    /// The copy acknowledgment window is over.
    CopyResetElapsed,
    DownloadClicked,
    DownloadCompleted(Result<PathBuf, String>),
}
