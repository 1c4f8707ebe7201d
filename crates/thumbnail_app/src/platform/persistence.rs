use std::fs;
use std::path::{Path, PathBuf};

use engine_logging::{engine_error, engine_info, engine_warn};
use serde::{Deserialize, Serialize};
use thumbnail_engine::OutputDir;

const STATE_FILENAME: &str = ".thumbnail_export_state.ron";

/// Inputs of the last successful run, reused when a flag is omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub(crate) struct RememberedInputs {
    pub config_path: Option<PathBuf>,
    pub games_path: Option<PathBuf>,
    pub category: Option<String>,
    pub mode: Option<String>,
}

pub(crate) fn load_remembered(output_dir: &Path) -> RememberedInputs {
    let path = output_dir.join(STATE_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return RememberedInputs::default();
        }
        Err(err) => {
            engine_warn!("Failed to read remembered inputs from {:?}: {}", path, err);
            return RememberedInputs::default();
        }
    };

    match ron::from_str(&content) {
        Ok(state) => {
            engine_info!("Loaded remembered inputs from {:?}", path);
            state
        }
        Err(err) => {
            engine_warn!("Failed to parse remembered inputs from {:?}: {}", path, err);
            RememberedInputs::default()
        }
    }
}

pub(crate) fn save_remembered(output_dir: &Path, inputs: &RememberedInputs) {
    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(inputs, pretty) {
        Ok(text) => text,
        Err(err) => {
            engine_error!("Failed to serialize remembered inputs: {}", err);
            return;
        }
    };

    if let Err(err) = OutputDir::new(output_dir).write_atomic(STATE_FILENAME, content.as_bytes()) {
        engine_error!(
            "Failed to write remembered inputs to {:?}: {}",
            output_dir,
            err
        );
    }
}
