use std::collections::{HashMap, HashSet};

use crate::{AppId, CategoryConfig, Item};

#[derive(Debug, Clone, PartialEq, Eq)]
struct CategoryEntry {
    label: String,
    members: Vec<AppId>,
}

/// Category label -> member ids, labels kept in first-seen order.
///
/// The index is rebuilt from scratch whenever the configuration changes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryIndex {
    entries: Vec<CategoryEntry>,
    positions: HashMap<String, usize>,
}

impl CategoryIndex {
    /// Scan the configuration in id order and append each id under every label it carries.
    ///
    /// A label listed twice on the same app appends that app twice.
    pub fn build(config: &CategoryConfig) -> Self {
        let mut index = Self::default();
        for (id, app) in config.iter() {
            for label in app.tags.iter().flatten() {
                index.push(label, id);
            }
        }
        index
    }

    fn push(&mut self, label: &str, id: AppId) {
        let position = match self.positions.get(label) {
            Some(&position) => position,
            None => {
                self.entries.push(CategoryEntry {
                    label: label.to_string(),
                    members: Vec::new(),
                });
                let position = self.entries.len() - 1;
                self.positions.insert(label.to_string(), position);
                position
            }
        };
        self.entries[position].members.push(id);
    }

    /// Member ids for `label`; empty if the label is unknown.
    pub fn members(&self, label: &str) -> &[AppId] {
        self.positions
            .get(label)
            .map(|&position| self.entries[position].members.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, label: &str) -> bool {
        self.positions.contains_key(label)
    }

    /// `(label, member count)` pairs in first-seen order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries
            .iter()
            .map(|entry| (entry.label.as_str(), entry.members.len()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Items belonging to `label`, in the order of `items`.
    pub fn filter(&self, label: &str, items: &[Item]) -> Vec<Item> {
        let members = self.members(label);
        if members.is_empty() {
            return Vec::new();
        }
        let members: HashSet<AppId> = members.iter().copied().collect();
        items
            .iter()
            .filter(|item| members.contains(&item.id))
            .cloned()
            .collect()
    }
}

/// Apply the user's category choice. No choice keeps every item.
pub fn select_items(index: &CategoryIndex, category: Option<&str>, items: &[Item]) -> Vec<Item> {
    match category {
        None => items.to_vec(),
        Some(label) => index.filter(label, items),
    }
}
