use crate::{AppState, CopyStatus, Effect, Msg, COPY_ACK_DURATION};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(input) => {
            state.set_input(input);
            Vec::new()
        }
        Msg::Submitted => {
            // The submit control is disabled while a request is outstanding.
            if state.is_loading() {
                return (state, Vec::new());
            }
            state.begin_loading();
            vec![Effect::SubmitUrl {
                url: state.url_input().to_string(),
            }]
        }
        Msg::FetchCompleted(outcome) => {
            if !state.is_loading() {
                return (state, Vec::new());
            }
            match outcome {
                Ok(result) => state.finish_with_result(result),
                Err(message) => state.finish_with_error(message),
            }
            Vec::new()
        }
        Msg::OpenViewer => {
            if state.viewer_content().is_some() {
                state.set_viewer_open(true);
            }
            Vec::new()
        }
        Msg::CloseViewer => {
            state.set_viewer_open(false);
            Vec::new()
        }
        Msg::CopyClicked => {
            if !state.is_viewer_open() || state.copy_status() != CopyStatus::Ready {
                return (state, Vec::new());
            }
            let content = state.viewer_content().map(|(_, content)| content.to_string());
            let Some(content) = content else {
                return (state, Vec::new());
            };
            state.set_copy_status(CopyStatus::Pending);
            vec![Effect::CopyToClipboard { content }]
        }
        Msg::CopyCompleted(outcome) => {
            if state.copy_status() != CopyStatus::Pending {
                return (state, Vec::new());
            }
            state.set_copy_status(match outcome {
                Ok(()) => CopyStatus::Copied,
                Err(_) => CopyStatus::Failed,
            });
            vec![Effect::ScheduleCopyReset {
                after: COPY_ACK_DURATION,
            }]
        }
        Msg::CopyResetElapsed => {
            if matches!(state.copy_status(), CopyStatus::Copied | CopyStatus::Failed) {
                state.set_copy_status(CopyStatus::Ready);
            }
            Vec::new()
        }
        Msg::DownloadClicked => {
            if !state.is_viewer_open() {
                return (state, Vec::new());
            }
            state
                .viewer_content()
                .map(|(title, content)| Effect::SaveMarkdown {
                    title: title.map(ToOwned::to_owned),
                    content: content.to_string(),
                })
                .into_iter()
                .collect()
        }
        Msg::DownloadCompleted(outcome) => {
            // A newer submission owns the screen now.
            if state.result().is_none() {
                return (state, Vec::new());
            }
            state.set_notice(match outcome {
                Ok(path) => format!("Saved {}", path.display()),
                Err(message) => format!("Download failed: {message}"),
            });
            Vec::new()
        }
    };

    (state, effects)
}
