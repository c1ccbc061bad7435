use std::sync::Once;

use extractor_core::{update, AppState, Effect, Extraction, Msg, UNKNOWN_ERROR_MESSAGE};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn submit_url(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::Submitted)
}

fn article() -> Extraction {
    Extraction {
        title: Some("T".into()),
        msg: Some("Full *text*".into()),
        abstract_md: Some("**A**".into()),
        highlights: vec!["H1".into()],
    }
}

#[test]
fn submission_enters_loading_and_requests_the_link() {
    init_logging();
    let (mut state, effects) = submit_url(AppState::new(), "https://example.com/article");

    assert_eq!(
        effects,
        vec![Effect::SubmitUrl {
            url: "https://example.com/article".into()
        }]
    );
    let view = state.view();
    assert!(view.loading);
    assert!(!view.submit_enabled);
    assert_eq!(view.submit_label, "Extracting...");
    assert!(state.consume_dirty());
}

#[test]
fn submitting_while_loading_is_ignored() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://example.com/a");
    let (next, effects) = update(state.clone(), Msg::Submitted);

    assert_eq!(next, state);
    assert!(effects.is_empty());
}

#[test]
fn success_stores_result_and_ends_loading() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://example.com/article");
    let (state, effects) = update(state, Msg::FetchCompleted(Ok(article())));

    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.loading);
    assert!(view.submit_enabled);
    assert_eq!(view.submit_label, "Extract");
    assert_eq!(view.error, None);

    let summary = view.summary.expect("summary");
    assert_eq!(summary.title.as_deref(), Some("T"));
    assert_eq!(summary.abstract_md.as_deref(), Some("**A**"));
    assert_eq!(summary.highlights, vec!["H1".to_string()]);
    assert!(summary.has_full_content);
    // Full content stays hidden until the viewer is opened.
    assert_eq!(view.viewer, None);
}

#[test]
fn failure_stores_message_and_leaves_result_empty() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://example.com/article");
    let (state, _) = update(state, Msg::FetchCompleted(Err("upstream down".into())));

    let view = state.view();
    assert!(!view.loading);
    assert_eq!(view.error.as_deref(), Some("upstream down"));
    assert_eq!(view.summary, None);
    assert_eq!(state.result(), None);
}

#[test]
fn blank_failure_message_falls_back_to_generic_text() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://example.com/article");
    let (state, _) = update(state, Msg::FetchCompleted(Err("  ".into())));

    assert_eq!(state.error(), Some(UNKNOWN_ERROR_MESSAGE));
}

#[test]
fn empty_input_still_goes_through_loading_to_failure() {
    init_logging();
    let (state, effects) = submit_url(AppState::new(), "");
    assert_eq!(effects, vec![Effect::SubmitUrl { url: String::new() }]);
    assert!(state.is_loading());

    let (state, _) = update(
        state,
        Msg::FetchCompleted(Err("Please enter a valid URL.".into())),
    );
    assert!(!state.is_loading());
    assert_eq!(state.error(), Some("Please enter a valid URL."));
}

#[test]
fn resubmission_clears_previous_outcome_and_closes_viewer() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://example.com/article");
    let (state, _) = update(state, Msg::FetchCompleted(Ok(article())));
    let (state, _) = update(state, Msg::OpenViewer);
    assert!(state.is_viewer_open());

    let (state, effects) = update(state, Msg::Submitted);
    assert_eq!(effects.len(), 1);
    assert!(state.is_loading());
    assert_eq!(state.result(), None);
    assert_eq!(state.error(), None);
    assert!(!state.is_viewer_open());

    let (state, _) = update(state, Msg::FetchCompleted(Err("boom".into())));
    let (state, _) = update(state, Msg::Submitted);
    assert_eq!(state.error(), None);
}

#[test]
fn result_and_error_replace_each_other() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://example.com/article");
    let (state, _) = update(state, Msg::FetchCompleted(Err("boom".into())));
    let (state, _) = update(state, Msg::Submitted);
    let (state, _) = update(state, Msg::FetchCompleted(Ok(article())));

    assert_eq!(state.error(), None);
    assert_eq!(state.result(), Some(&article()));
}

#[test]
fn completion_without_outstanding_request_is_ignored() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::FetchCompleted(Ok(article())));

    assert_eq!(next, state);
    assert!(effects.is_empty());
}

#[test]
fn input_changes_mark_dirty_only_when_text_differs() {
    init_logging();
    let (mut state, _) = update(AppState::new(), Msg::InputChanged("https://a".into()));
    assert!(state.consume_dirty());
    assert_eq!(state.view().url_input, "https://a");

    let (mut state, _) = update(state, Msg::InputChanged("https://a".into()));
    assert!(!state.consume_dirty());
}
