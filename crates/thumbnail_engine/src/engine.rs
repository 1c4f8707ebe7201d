use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use engine_logging::{engine_error, engine_info};
use thumbnail_core::{FetchMode, ImageHost, Item, ProgressState};

use crate::archive::{ArchiveBuilder, Compression};
use crate::fetch::{FetchSettings, ReqwestFetcher};
use crate::persist::OutputDir;
use crate::report::FailureReport;
use crate::resolver::ImageResolver;
use crate::{ArchiveResult, BuildSummary, EngineEvent, FetchError, SavedArchive};

#[derive(Clone)]
pub struct EngineConfig {
    pub fetch: FetchSettings,
    pub host: ImageHost,
    pub compression: Compression,
    pub output_dir: PathBuf,
    pub write_failure_report: bool,
    pub generated_utc: Arc<dyn Fn() -> String + Send + Sync>,
}

impl EngineConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            fetch: FetchSettings::default(),
            host: ImageHost::default(),
            compression: Compression::default(),
            output_dir,
            write_failure_report: true,
            generated_utc: Arc::new(String::new),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to create http client: {0}")]
    Client(#[from] FetchError),
}

enum EngineCommand {
    Build { items: Vec<Item>, mode: FetchMode },
    Save { filename: String },
}

/// The archive kept between a build and the matching save.
struct LastBuild {
    mode: FetchMode,
    result: ArchiveResult,
}

/// Runs builds on a dedicated thread with a single-threaded runtime.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let fetcher = Arc::new(ReqwestFetcher::new(config.fetch.clone())?);
        let builder = ArchiveBuilder::new(
            ImageResolver::new(fetcher, config.host.clone()),
            config.compression,
        );

        thread::spawn(move || {
            let mut last_build: Option<LastBuild> = None;
            while let Ok(command) = cmd_rx.recv() {
                runtime.block_on(handle_command(
                    &builder,
                    &config,
                    &mut last_build,
                    command,
                    &event_tx,
                ));
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn build(&self, items: Vec<Item>, mode: FetchMode) {
        let _ = self.cmd_tx.send(EngineCommand::Build { items, mode });
    }

    pub fn save(&self, filename: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Save {
            filename: filename.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event; `None` once the engine thread is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }
}

async fn handle_command(
    builder: &ArchiveBuilder,
    config: &EngineConfig,
    last_build: &mut Option<LastBuild>,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Build { items, mode } => {
            let progress_tx = event_tx.clone();
            let sink = move |progress: ProgressState| {
                let _ = progress_tx.send(EngineEvent::Progress(progress));
            };
            let result = builder.build(&items, &mode, &sink).await;
            let event = match result {
                Ok(result) => {
                    let summary = BuildSummary {
                        packaged: result.packaged,
                        byte_len: result.archive_bytes.len() as u64,
                        failures: result.failures.clone(),
                    };
                    *last_build = Some(LastBuild { mode, result });
                    Ok(summary)
                }
                Err(err) => {
                    engine_error!("Archive build failed: {}", err);
                    Err(err.to_string())
                }
            };
            let _ = event_tx.send(EngineEvent::BuildCompleted(event));
        }
        EngineCommand::Save { filename } => {
            let result = match last_build.as_ref() {
                Some(build) => save_build(config, build, &filename),
                None => Err("no archive has been built yet".to_string()),
            };
            let _ = event_tx.send(EngineEvent::SaveCompleted(result));
        }
    }
}

fn save_build(
    config: &EngineConfig,
    build: &LastBuild,
    filename: &str,
) -> Result<SavedArchive, String> {
    let output_dir = OutputDir::new(config.output_dir.clone());
    let archive_path = output_dir
        .write_atomic(filename, &build.result.archive_bytes)
        .map_err(|err| {
            engine_error!("Failed to write archive {}: {}", filename, err);
            err.to_string()
        })?;
    engine_info!("Archive saved to {:?}", archive_path);

    let report_path = if config.write_failure_report && !build.result.failures.is_empty() {
        let generated_utc = (config.generated_utc)();
        let report = FailureReport {
            archive_filename: filename,
            mode: &build.mode,
            packaged: build.result.packaged,
            generated_utc: &generated_utc,
            failures: &build.result.failures,
        };
        match report.write(&output_dir) {
            Ok(path) => Some(path),
            Err(err) => {
                engine_error!("Failed to write failure report: {}", err);
                None
            }
        }
    } else {
        None
    };

    Ok(SavedArchive {
        archive_path,
        report_path,
    })
}
