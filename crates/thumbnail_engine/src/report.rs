use std::path::PathBuf;

use serde_json::json;
use thumbnail_core::{FailureRecord, FetchMode};

use crate::persist::{OutputDir, PersistError};

/// Everything the failure report records about one build.
#[derive(Debug, Clone, Copy)]
pub struct FailureReport<'a> {
    pub archive_filename: &'a str,
    pub mode: &'a FetchMode,
    pub packaged: usize,
    pub generated_utc: &'a str,
    pub failures: &'a [FailureRecord],
}

impl FailureReport<'_> {
    /// `{archive stem}.failures.json`
    pub fn filename(&self) -> String {
        let stem = self
            .archive_filename
            .strip_suffix(".zip")
            .unwrap_or(self.archive_filename);
        format!("{stem}.failures.json")
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "archive": self.archive_filename,
            "generated_utc": self.generated_utc,
            "mode": self.mode.to_string(),
            "packaged": self.packaged,
            "failure_count": self.failures.len(),
            "failures": self.failures.iter().map(|f| {
                json!({
                    "kind": f.kind.as_str(),
                    "appid": f.id,
                    "name": f.name,
                    "filename": f.filename,
                    "requested": f.requested.as_str(),
                    "obtained": f.obtained.map(|tier| tier.as_str()),
                    "candidate_urls": f.candidate_urls.iter()
                        .map(|(tier, url)| (tier.as_str().to_string(), json!(url)))
                        .collect::<serde_json::Map<_, _>>(),
                })
            }).collect::<Vec<_>>()
        })
    }

    /// Write the report next to the archive.
    pub fn write(&self, output_dir: &OutputDir) -> Result<PathBuf, PersistError> {
        let content = serde_json::to_string_pretty(&self.to_json())
            .map_err(|e| PersistError::Io(e.into()))?;
        output_dir.write_atomic(&self.filename(), content.as_bytes())
    }
}
