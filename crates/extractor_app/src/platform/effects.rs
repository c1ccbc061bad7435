use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use engine_logging::{engine_info, engine_trace, engine_warn};
use extractor_core::{Effect, Extraction, Msg};
use extractor_engine::{save_markdown, EngineEvent, EngineEvents, EngineHandle, FetchResult};

use super::clipboard::{ClipboardSink, SystemClipboard};
use super::config::AppConfig;

/// Executes core effects and feeds their outcomes back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
    clipboard: Box<dyn ClipboardSink>,
    output_dir: PathBuf,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(config: &AppConfig, msg_tx: mpsc::Sender<Msg>) -> Self {
        engine_info!("Webhook endpoint: {}", config.webhook.endpoint);
        let (engine, events) = EngineHandle::new(config.webhook.clone());
        Self::with_parts(
            engine,
            events,
            Box::new(SystemClipboard::default()),
            config.output_dir.clone(),
            msg_tx,
        )
    }

    pub fn with_parts(
        engine: EngineHandle,
        events: EngineEvents,
        clipboard: Box<dyn ClipboardSink>,
        output_dir: PathBuf,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        spawn_event_loop(events, msg_tx.clone());
        Self {
            engine,
            clipboard,
            output_dir,
            msg_tx,
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            engine_trace!("run effect {:?}", effect);
            match effect {
                Effect::SubmitUrl { url } => {
                    engine_info!("SubmitUrl url_len={} url={}", url.len(), url);
                    self.engine.submit(url);
                }
                Effect::CopyToClipboard { content } => {
                    let outcome = self.clipboard.set_text(&content);
                    let _ = self.msg_tx.send(Msg::CopyCompleted(outcome));
                }
                Effect::ScheduleCopyReset { after } => {
                    let msg_tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(after);
                        let _ = msg_tx.send(Msg::CopyResetElapsed);
                    });
                }
                Effect::SaveMarkdown { title, content } => {
                    let outcome = save_markdown(&self.output_dir, title.as_deref(), &content)
                        .map(|saved| saved.path)
                        .map_err(|err| {
                            engine_warn!("Download failed: {}", err);
                            err.to_string()
                        });
                    let _ = self.msg_tx.send(Msg::DownloadCompleted(outcome));
                }
            }
        }
    }
}

fn spawn_event_loop(events: EngineEvents, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            match event {
                EngineEvent::SubmitCompleted { url, result } => {
                    let outcome = match result {
                        Ok(result) => Ok(map_result(result)),
                        Err(err) => {
                            engine_warn!("Submission of {} failed: {}", url, err);
                            Err(err.to_string())
                        }
                    };
                    if msg_tx.send(Msg::FetchCompleted(outcome)).is_err() {
                        break;
                    }
                }
            }
        }
    });
}

fn map_result(result: FetchResult) -> Extraction {
    Extraction {
        title: result.title,
        msg: result.msg,
        abstract_md: result.abstract_md,
        highlights: result.highlights.unwrap_or_default(),
    }
}
