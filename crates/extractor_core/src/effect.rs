use std::time::Duration;

/// Side effects requested by [`crate::update`]; the platform executes them and
/// reports back with a [`crate::Msg`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the link to the webhook. Answered by `Msg::FetchCompleted`.
    SubmitUrl { url: String },
    /// Answered by `Msg::CopyCompleted`.
    CopyToClipboard { content: String },
    /// Post `Msg::CopyResetElapsed` once `after` has passed.
    ScheduleCopyReset { after: Duration },
    /// Answered by `Msg::DownloadCompleted`.
    SaveMarkdown {
        title: Option<String>,
        content: String,
    },
}
