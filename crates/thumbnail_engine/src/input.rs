use engine_logging::engine_warn;
use serde::Deserialize;
use thumbnail_core::{AppId, AppTags, CategoryConfig, Item};

use crate::keyvalues::{lookup, parse_keyvalues, KvValue};

/// Location of the per-app settings inside the client's shared configuration.
const APPS_PATH: [&str; 5] = ["UserRoamingConfigStore", "Software", "Valve", "Steam", "Apps"];

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("input is empty")]
    Empty,
    #[error("syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },
    #[error("no {} section found", APPS_PATH.join("/"))]
    MissingApps,
    #[error("expected a JSON array of games")]
    NotAnArray,
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse the client's shared configuration, given either as KeyValues text or as JSON.
pub fn parse_category_config(text: &str) -> Result<CategoryConfig, InputError> {
    let trimmed = text.trim_start_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    let root = if trimmed.starts_with('{') {
        let value: serde_json::Value = serde_json::from_str(trimmed)?;
        match json_to_kv(value) {
            KvValue::Block(pairs) => pairs,
            KvValue::Text(_) => return Err(InputError::MissingApps),
        }
    } else {
        parse_keyvalues(trimmed)?
    };
    extract_apps(&root)
}

fn json_to_kv(value: serde_json::Value) -> KvValue {
    match value {
        serde_json::Value::Object(map) => {
            KvValue::Block(map.into_iter().map(|(k, v)| (k, json_to_kv(v))).collect())
        }
        // A tag list may also be written as an array; its positions become the indices.
        serde_json::Value::Array(values) => KvValue::Block(
            values
                .into_iter()
                .enumerate()
                .map(|(index, v)| (index.to_string(), json_to_kv(v)))
                .collect(),
        ),
        serde_json::Value::String(text) => KvValue::Text(text),
        serde_json::Value::Null => KvValue::Text(String::new()),
        other => KvValue::Text(other.to_string()),
    }
}

fn extract_apps(root: &[(String, KvValue)]) -> Result<CategoryConfig, InputError> {
    let (first, rest) = APPS_PATH.split_first().ok_or(InputError::MissingApps)?;
    let mut node = lookup(root, first).ok_or(InputError::MissingApps)?;
    for key in rest {
        node = node.get(key).ok_or(InputError::MissingApps)?;
    }
    let apps = node.as_block().ok_or(InputError::MissingApps)?;

    let mut config = CategoryConfig::new();
    for (key, entry) in apps {
        let Ok(id) = key.trim().parse::<AppId>() else {
            engine_warn!("Skipping config entry with non-numeric app id {:?}", key);
            continue;
        };
        config.insert(id, app_tags(entry));
    }
    Ok(config)
}

/// Tag labels ordered by their numeric index; anything that is not a tag block means no labels.
fn app_tags(entry: &KvValue) -> AppTags {
    let Some(tags) = entry.get("tags").and_then(KvValue::as_block) else {
        return AppTags::default();
    };
    let mut ordered: Vec<(Option<u64>, usize, &str)> = tags
        .iter()
        .enumerate()
        .filter_map(|(position, (index, value))| {
            value
                .as_text()
                .map(|label| (index.trim().parse::<u64>().ok(), position, label))
        })
        .collect();
    // Numeric indices first in ascending order, then any others as encountered.
    ordered.sort_by_key(|(index, position, _)| (index.is_none(), *index, *position));
    AppTags::with_tags(ordered.into_iter().map(|(_, _, label)| label))
}

#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(alias = "appid")]
    id: AppId,
    name: String,
}

/// Parse the owned-games list: a JSON array of `{ "appid": .., "name": .. }`.
pub fn parse_items(text: &str) -> Result<Vec<Item>, InputError> {
    let trimmed = text.trim_start_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    let value: serde_json::Value = serde_json::from_str(trimmed)?;
    if !value.is_array() {
        return Err(InputError::NotAnArray);
    }
    let raw: Vec<RawItem> = serde_json::from_value(value)?;
    Ok(raw
        .into_iter()
        .map(|item| Item::new(item.id, item.name))
        .collect())
}
