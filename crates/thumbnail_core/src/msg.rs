#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A new tag configuration was parsed; the category index is rebuilt.
    ConfigLoaded(crate::CategoryConfig),
    /// A new owned-games list was parsed.
    ItemsLoaded(Vec<crate::Item>),
    /// User picked a category, or `None` for every item.
    CategorySelected(Option<String>),
    /// User picked a thumbnail fetch mode.
    ModeSelected(crate::FetchMode),
    /// User asked for a new archive.
    GenerateClicked,
    /// Engine progress for the running build.
    BuildProgress(crate::ProgressState),
    /// Engine finished the build.
    BuildFinished {
        packaged: usize,
        byte_len: u64,
        failures: Vec<crate::FailureRecord>,
    },
    /// Engine aborted the build.
    BuildFailed(String),
    /// User asked to save the built archive.
    SaveClicked,
    /// Engine wrote the archive to disk.
    ArchiveSaved { path: String },
    /// Engine could not write the archive.
    SaveFailed(String),
    /// Render tick to coalesce rendering.
    Tick,
}
