use extractor_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    for msg in [
        Msg::CloseViewer,
        Msg::CopyClicked,
        Msg::CopyCompleted(Ok(())),
        Msg::CopyResetElapsed,
        Msg::DownloadClicked,
        Msg::DownloadCompleted(Err("late".into())),
        Msg::FetchCompleted(Err("late".into())),
    ] {
        let (next, effects) = update(state.clone(), msg);
        assert_eq!(state, next);
        assert!(effects.is_empty());
    }
}
