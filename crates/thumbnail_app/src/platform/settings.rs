use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use engine_logging::{engine_info, engine_warn};
use serde::{Deserialize, Serialize};
use thumbnail_core::{ImageHost, DEFAULT_IMAGE_HOST};
use thumbnail_engine::{Compression, EngineConfig, FetchSettings};

pub(crate) const SETTINGS_FILENAME: &str = "thumbnail_export.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub image_host: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub max_image_bytes: u64,
    pub compression: Compression,
    pub write_failure_report: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            image_host: DEFAULT_IMAGE_HOST.to_string(),
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.map(|t| t.as_secs()),
            max_image_bytes: fetch.max_bytes,
            compression: Compression::default(),
            write_failure_report: true,
        }
    }
}

impl Settings {
    pub(crate) fn engine_config(&self, output_dir: &Path) -> EngineConfig {
        let mut config = EngineConfig::default_with_output(output_dir.to_path_buf());
        config.host = match ImageHost::parse(&self.image_host) {
            Ok(host) => host,
            Err(err) => {
                engine_warn!(
                    "Ignoring invalid image host {:?} ({}); using {}",
                    self.image_host,
                    err,
                    DEFAULT_IMAGE_HOST
                );
                ImageHost::default()
            }
        };
        config.fetch = FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_bytes: self.max_image_bytes,
        };
        config.compression = self.compression;
        config.write_failure_report = self.write_failure_report;
        config.generated_utc = Arc::new(|| Utc::now().to_rfc3339());
        config
    }
}

/// Settings from `{output_dir}/thumbnail_export.ron`; defaults when absent or unreadable.
pub(crate) fn load_settings(output_dir: &Path) -> Settings {
    let path = output_dir.join(SETTINGS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Settings::default();
        }
        Err(err) => {
            engine_warn!("Failed to read settings from {:?}: {}", path, err);
            return Settings::default();
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => {
            engine_info!("Loaded settings from {:?}", path);
            settings
        }
        Err(err) => {
            engine_warn!("Failed to parse settings from {:?}: {}", path, err);
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        assert_eq!(load_settings(temp.path()), Settings::default());
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::write(
            temp.path().join(SETTINGS_FILENAME),
            "(image_host: \"http://127.0.0.1:8080\", compression: stored, request_timeout_secs: Some(5))",
        )
        .unwrap();

        let settings = load_settings(temp.path());
        assert_eq!(settings.image_host, "http://127.0.0.1:8080");
        assert_eq!(settings.compression, Compression::Stored);
        assert_eq!(settings.request_timeout_secs, Some(5));
        assert!(settings.write_failure_report);

        let config = settings.engine_config(temp.path());
        assert_eq!(config.fetch.request_timeout, Some(Duration::from_secs(5)));
        assert_eq!(
            config.host.image_url(1, thumbnail_core::FetchTier::Header),
            "http://127.0.0.1:8080/steam/apps/1/header.jpg"
        );
    }

    #[test]
    fn unparsable_file_gives_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::write(temp.path().join(SETTINGS_FILENAME), "(image_host: 42").unwrap();
        assert_eq!(load_settings(temp.path()), Settings::default());
    }
}
