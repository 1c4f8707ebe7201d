use crate::{FetchMode, Item};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch thumbnails for `items` and package them.
    BuildArchive { items: Vec<Item>, mode: FetchMode },
    /// Persist the most recently built archive under `filename`.
    SaveArchive { filename: String },
}
