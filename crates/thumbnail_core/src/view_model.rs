use crate::{ArchiveSummary, FailureKind, FailureRecord, FetchMode, ProgressState, SessionState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    /// `None` selects every item.
    pub value: Option<String>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    pub categories: Vec<CategoryOption>,
    pub selected_category: Option<String>,
    pub selected_count: usize,
    pub mode: FetchMode,
    pub generate_enabled: bool,
    pub save_enabled: bool,
    pub progress: ProgressState,
    pub failures: Vec<FailureRowView>,
    pub archive: Option<ArchiveSummary>,
    pub saved_path: Option<String>,
    pub last_error: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRowView {
    pub id: crate::AppId,
    pub kind: FailureKind,
    pub message: String,
    pub candidate_urls: Vec<String>,
}

impl From<&FailureRecord> for FailureRowView {
    fn from(record: &FailureRecord) -> Self {
        Self {
            id: record.id,
            kind: record.kind,
            message: record.to_string(),
            candidate_urls: record.candidate_urls.values().cloned().collect(),
        }
    }
}
