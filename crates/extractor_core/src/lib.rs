//! Extractor core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, CopyStatus, Extraction, COPY_ACK_DURATION, UNKNOWN_ERROR_MESSAGE};
pub use update::update;
pub use view_model::{AppViewModel, SummaryView, ViewerView};
