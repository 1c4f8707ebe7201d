use std::collections::BTreeMap;

/// Platform application id.
pub type AppId = u64;

/// One owned game as captured from the user's library page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: AppId,
    pub name: String,
}

impl Item {
    pub fn new(id: AppId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Category assignments for a single app. `None` means the entry carried no tag set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppTags {
    pub tags: Option<Vec<String>>,
}

impl AppTags {
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: Some(tags.into_iter().map(Into::into).collect()),
        }
    }
}

/// Parsed tag configuration, keyed by app id in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryConfig {
    apps: BTreeMap<AppId, AppTags>,
}

impl CategoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: AppId, tags: AppTags) {
        self.apps.insert(id, tags);
    }

    pub fn get(&self, id: AppId) -> Option<&AppTags> {
        self.apps.get(&id)
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AppId, &AppTags)> {
        self.apps.iter().map(|(id, tags)| (*id, tags))
    }
}

impl FromIterator<(AppId, AppTags)> for CategoryConfig {
    fn from_iter<T: IntoIterator<Item = (AppId, AppTags)>>(iter: T) -> Self {
        Self {
            apps: iter.into_iter().collect(),
        }
    }
}
