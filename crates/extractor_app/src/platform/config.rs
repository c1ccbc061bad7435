use std::path::{Path, PathBuf};

use extractor_engine::WebhookSettings;
use log::LevelFilter;

const OUTPUT_DIR: &str = "output";
const LOG_FILE: &str = "extractor.log";

/// Runtime configuration: compiled-in defaults plus the `N8N_WEBHOOK_URL` override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub webhook: WebhookSettings,
    /// Downloads land here.
    pub output_dir: PathBuf,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::rooted_at(&cwd, WebhookSettings::from_env())
    }

    fn rooted_at(dir: &Path, webhook: WebhookSettings) -> Self {
        Self {
            webhook,
            output_dir: dir.join(OUTPUT_DIR),
            log_file: dir.join(LOG_FILE),
            log_level: LevelFilter::Info,
        }
    }
}
