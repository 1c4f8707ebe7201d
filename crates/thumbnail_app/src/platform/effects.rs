use engine_logging::{engine_info, engine_warn};
use thumbnail_core::{Effect, Msg};
use thumbnail_engine::{EngineConfig, EngineError, EngineEvent, EngineHandle};

/// Executes core effects on the engine and turns engine events back into messages.
pub(crate) struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub(crate) fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Ok(Self {
            engine: EngineHandle::new(config)?,
        })
    }

    pub(crate) fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::BuildArchive { items, mode } => {
                    engine_info!("BuildArchive items={} mode={}", items.len(), mode);
                    self.engine.build(items, mode);
                }
                Effect::SaveArchive { filename } => {
                    engine_info!("SaveArchive filename={}", filename);
                    self.engine.save(filename);
                }
            }
        }
    }

    /// Blocks until the engine reports something.
    pub(crate) fn next_msg(&self) -> Option<Msg> {
        self.engine.recv().map(map_event)
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Progress(progress) => Msg::BuildProgress(progress),
        EngineEvent::BuildCompleted(Ok(summary)) => Msg::BuildFinished {
            packaged: summary.packaged,
            byte_len: summary.byte_len,
            failures: summary.failures,
        },
        EngineEvent::BuildCompleted(Err(message)) => Msg::BuildFailed(message),
        EngineEvent::SaveCompleted(Ok(saved)) => {
            if let Some(report) = &saved.report_path {
                engine_info!("Failure report written to {:?}", report);
            }
            Msg::ArchiveSaved {
                path: saved.archive_path.display().to_string(),
            }
        }
        EngineEvent::SaveCompleted(Err(message)) => {
            engine_warn!("Saving the archive failed: {}", message);
            Msg::SaveFailed(message)
        }
    }
}
