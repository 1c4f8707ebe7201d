//! Thumbnail export engine: network fetches, archive packaging, input adapters and file output.
mod archive;
mod engine;
mod fetch;
mod input;
mod keyvalues;
mod persist;
mod report;
mod resolver;
mod types;

pub use archive::{ArchiveBuilder, ArchiveError, Compression, NoProgress, ProgressSink};
pub use engine::{EngineConfig, EngineError, EngineHandle};
pub use fetch::{FetchSettings, ImageFetcher, ReqwestFetcher};
pub use input::{parse_category_config, parse_items, InputError};
pub use keyvalues::{parse_keyvalues, KvValue};
pub use persist::{OutputDir, PersistError};
pub use report::FailureReport;
pub use resolver::ImageResolver;
pub use types::{
    ArchiveResult, BuildSummary, EngineEvent, FetchError, FetchFailureKind, FetchOutcome,
    FetchedImage, SavedArchive,
};
