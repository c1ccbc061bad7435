use std::path::{Path, PathBuf};

use engine_logging::engine_info;

use crate::filename::markdown_filename;
use crate::persist::{AtomicFileWriter, PersistError};

pub const MARKDOWN_MIME: &str = "text/markdown; charset=utf-8";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedMarkdown {
    pub path: PathBuf,
    pub bytes: u64,
    pub mime: &'static str,
}

/// Saves `content` verbatim as a `.md` file named after `title`.
pub fn save_markdown(
    output_dir: &Path,
    title: Option<&str>,
    content: &str,
) -> Result<SavedMarkdown, PersistError> {
    let filename = markdown_filename(title);
    let writer = AtomicFileWriter::new(output_dir.to_path_buf());
    let path = writer.write(&filename, content.as_bytes())?;
    engine_info!("Saved markdown to {:?} ({} bytes)", path, content.len());
    Ok(SavedMarkdown {
        path,
        bytes: content.len() as u64,
        mime: MARKDOWN_MIME,
    })
}
