use std::sync::{mpsc, Arc};
use std::thread;

use engine_logging::engine_error;

use crate::webhook::{ContentSource, WebhookClient, WebhookSettings};
use crate::{EngineEvent, WebhookError};

enum EngineCommand {
    Submit { url: String },
}

/// Submits links to a background tokio runtime.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving side of the engine: one event per finished submission.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: WebhookSettings) -> (Self, EngineEvents) {
        Self::with_source(Arc::new(WebhookClient::new(settings)))
    }

    pub fn with_source(source: Arc<dyn ContentSource>) -> (Self, EngineEvents) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    engine_error!("Failed to start engine runtime: {}", err);
                    // Still answer every submission so the caller never waits forever.
                    while let Ok(EngineCommand::Submit { url }) = cmd_rx.recv() {
                        let _ = event_tx.send(EngineEvent::SubmitCompleted {
                            url,
                            result: Err(WebhookError::TransportError(err.to_string())),
                        });
                    }
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let source = source.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(source.as_ref(), command, event_tx).await;
                });
            }
        });

        (Self { cmd_tx }, EngineEvents { event_rx })
    }

    pub fn submit(&self, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Submit { url: url.into() });
    }
}

impl EngineEvents {
    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event; `None` once the engine thread is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }
}

async fn handle_command(
    source: &dyn ContentSource,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit { url } => {
            let result = source.submit(&url).await;
            let _ = event_tx.send(EngineEvent::SubmitCompleted { url, result });
        }
    }
}
