//! Thumbnail export core: pure domain model and session state machine.
mod category;
mod effect;
mod filename;
mod item;
mod msg;
mod progress;
mod report;
mod state;
mod tier;
mod update;
mod view_model;

pub use category::{select_items, CategoryIndex};
pub use effect::Effect;
pub use filename::{
    archive_filename, image_filename, sanitize_name, ALL_ITEMS_ARCHIVE_STEM, IMAGE_EXTENSION,
};
pub use item::{AppId, AppTags, CategoryConfig, Item};
pub use msg::Msg;
pub use progress::{percent_of, ProgressState, ProgressTracker};
pub use report::{sort_failures, FailureKind, FailureRecord};
pub use state::{AppState, ArchiveSummary, SessionState};
pub use tier::{FetchMode, FetchTier, ImageHost, ParseModeError, DEFAULT_IMAGE_HOST};
pub use update::update;
pub use view_model::{AppViewModel, CategoryOption, FailureRowView};
