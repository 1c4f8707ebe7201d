use crate::view_model::{AppViewModel, CategoryOption, FailureRowView};
use crate::{
    archive_filename, select_items, CategoryConfig, CategoryIndex, FailureRecord, FetchMode, Item,
    ProgressState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub filename: String,
    pub packaged: usize,
    pub byte_len: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Building,
    Saving,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    index: CategoryIndex,
    items: Vec<Item>,
    category: Option<String>,
    mode: FetchMode,
    session: SessionState,
    progress: ProgressState,
    pending_filename: Option<String>,
    failures: Vec<FailureRecord>,
    archive: Option<ArchiveSummary>,
    saved_path: Option<String>,
    last_error: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn index(&self) -> &CategoryIndex {
        &self.index
    }

    pub fn mode(&self) -> &FetchMode {
        &self.mode
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Items the next build would cover.
    pub fn selected_items(&self) -> Vec<Item> {
        select_items(&self.index, self.category.as_deref(), &self.items)
    }

    pub fn failures(&self) -> &[FailureRecord] {
        &self.failures
    }

    pub fn archive(&self) -> Option<&ArchiveSummary> {
        self.archive.as_ref()
    }

    pub fn view(&self) -> AppViewModel {
        let selected_count = self.selected_items().len();
        let idle = self.session == SessionState::Idle;

        let mut categories = Vec::with_capacity(self.index.len() + 1);
        categories.push(CategoryOption {
            value: None,
            label: format!("ALL - {} items", self.items.len()),
        });
        categories.extend(self.index.categories().map(|(label, count)| CategoryOption {
            value: Some(label.to_string()),
            label: format!("{label} - {count} items"),
        }));

        AppViewModel {
            session: self.session,
            categories,
            selected_category: self.category.clone(),
            selected_count,
            mode: self.mode.clone(),
            generate_enabled: idle && selected_count > 0,
            save_enabled: idle && self.archive.is_some(),
            progress: self.progress,
            failures: self.failures.iter().map(FailureRowView::from).collect(),
            archive: self.archive.clone(),
            saved_path: self.saved_path.clone(),
            last_error: self.last_error.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_config(&mut self, config: CategoryConfig) {
        self.index = CategoryIndex::build(&config);
        self.mark_dirty();
    }

    pub(crate) fn set_items(&mut self, items: Vec<Item>) {
        self.items = items;
        self.mark_dirty();
    }

    pub(crate) fn set_category(&mut self, category: Option<String>) {
        self.category = category.filter(|label| !label.is_empty());
        self.mark_dirty();
    }

    pub(crate) fn set_mode(&mut self, mode: FetchMode) {
        self.mode = mode;
        self.mark_dirty();
    }

    /// Enter the building state; returns the items to fetch, or `None` if a build cannot start.
    pub(crate) fn begin_build(&mut self) -> Option<Vec<Item>> {
        if self.session != SessionState::Idle {
            return None;
        }
        let items = self.selected_items();
        if items.is_empty() {
            return None;
        }
        self.session = SessionState::Building;
        self.progress = ProgressState::default();
        self.pending_filename = Some(archive_filename(self.category.as_deref()));
        self.failures.clear();
        self.archive = None;
        self.saved_path = None;
        self.last_error = None;
        self.mark_dirty();
        Some(items)
    }

    pub(crate) fn apply_progress(&mut self, progress: ProgressState) {
        if self.session != SessionState::Building {
            return;
        }
        self.progress.image_percent = self.progress.image_percent.max(progress.image_percent);
        self.progress.archive_percent = self.progress.archive_percent.max(progress.archive_percent);
        self.mark_dirty();
    }

    pub(crate) fn finish_build(
        &mut self,
        packaged: usize,
        byte_len: u64,
        failures: Vec<FailureRecord>,
    ) {
        if self.session != SessionState::Building {
            return;
        }
        self.session = SessionState::Idle;
        let filename = self
            .pending_filename
            .take()
            .unwrap_or_else(|| archive_filename(self.category.as_deref()));
        self.archive = Some(ArchiveSummary {
            filename,
            packaged,
            byte_len,
        });
        self.failures = failures;
        self.mark_dirty();
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.session = SessionState::Idle;
        self.pending_filename = None;
        self.last_error = Some(message);
        self.mark_dirty();
    }

    /// Enter the saving state; returns the filename to save under.
    pub(crate) fn begin_save(&mut self) -> Option<String> {
        if self.session != SessionState::Idle {
            return None;
        }
        let filename = self.archive.as_ref()?.filename.clone();
        self.session = SessionState::Saving;
        self.last_error = None;
        self.mark_dirty();
        Some(filename)
    }

    pub(crate) fn finish_save(&mut self, path: String) {
        if self.session != SessionState::Saving {
            return;
        }
        self.session = SessionState::Idle;
        self.saved_path = Some(path);
        self.mark_dirty();
    }
}
