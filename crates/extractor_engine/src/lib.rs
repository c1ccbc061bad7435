//! Extractor engine: webhook IO, response reconciliation and Markdown export.
mod engine;
mod export;
mod filename;
mod persist;
mod types;
mod webhook;

pub use engine::{EngineEvents, EngineHandle};
pub use export::{save_markdown, SavedMarkdown, MARKDOWN_MIME};
pub use filename::{markdown_filename, sanitize_title, FALLBACK_FILENAME, MAX_TITLE_CHARS};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{EngineEvent, FetchResult, RawWebhookResponse, WebhookError};
pub use webhook::{ContentSource, WebhookClient, WebhookSettings, DEFAULT_ENDPOINT, ENDPOINT_ENV};
