use std::collections::HashMap;
use std::io::{Cursor, Write};

use bytes::Bytes;
use engine_logging::{engine_debug, engine_info};
use futures_util::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize};
use thumbnail_core::{
    image_filename, percent_of, sort_failures, FailureKind, FailureRecord, FetchMode, FetchTier,
    ImageHost, Item, ProgressState, ProgressTracker,
};
use zip::write::FileOptions;
use zip::ZipWriter;

use crate::resolver::ImageResolver;
use crate::{ArchiveResult, FetchOutcome};

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Compression applied to archive entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compression {
    #[default]
    Deflated,
    Stored,
}

impl Compression {
    fn method(self) -> zip::CompressionMethod {
        match self {
            Compression::Deflated => zip::CompressionMethod::Deflated,
            Compression::Stored => zip::CompressionMethod::Stored,
        }
    }
}

/// Receives progress updates during a build.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, progress: ProgressState);
}

impl<F> ProgressSink for F
where
    F: Fn(ProgressState) + Send + Sync,
{
    fn emit(&self, progress: ProgressState) {
        self(progress)
    }
}

/// Sink for callers that do not want progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn emit(&self, _progress: ProgressState) {}
}

#[derive(Debug, Clone)]
struct PackagedImage {
    filename: String,
    bytes: Bytes,
}

/// Outcomes of one build, owned by the task polling the fetches.
struct BuildAccumulator<'a> {
    host: &'a ImageHost,
    requested: FetchTier,
    total: usize,
    finished: usize,
    tracker: ProgressTracker,
    packaged: Vec<PackagedImage>,
    failures: Vec<(usize, FailureRecord)>,
}

impl<'a> BuildAccumulator<'a> {
    fn new(host: &'a ImageHost, requested: FetchTier, total: usize) -> Self {
        Self {
            host,
            requested,
            total,
            finished: 0,
            tracker: ProgressTracker::new(),
            packaged: Vec::with_capacity(total),
            failures: Vec::new(),
        }
    }

    /// `position` is the item's index in the build input.
    fn settle(
        &mut self,
        position: usize,
        item: &Item,
        outcome: FetchOutcome,
        sink: &dyn ProgressSink,
    ) {
        let filename = image_filename(&item.name);
        let obtained = outcome.tier();
        let kind = match outcome {
            FetchOutcome::Found(image) => {
                let degraded = image.tier != self.requested;
                self.packaged.push(PackagedImage {
                    filename: filename.clone(),
                    bytes: image.bytes,
                });
                degraded.then_some(FailureKind::FallbackFound)
            }
            FetchOutcome::NotFound => Some(FailureKind::AllNotFound),
        };

        if let Some(kind) = kind {
            self.failures.push((
                position,
                FailureRecord {
                    kind,
                    id: item.id,
                    name: item.name.clone(),
                    filename,
                    requested: self.requested,
                    obtained,
                    candidate_urls: self.host.candidate_urls(item.id),
                },
            ));
        }

        self.finished += 1;
        sink.emit(self.tracker.images_settled(self.finished, self.total));
    }

    fn into_parts(self) -> (Vec<PackagedImage>, Vec<FailureRecord>, ProgressTracker) {
        let mut failures = self.failures;
        failures.sort_by_key(|(position, _)| *position);
        let mut failures: Vec<FailureRecord> =
            failures.into_iter().map(|(_, record)| record).collect();
        sort_failures(&mut failures);
        (self.packaged, failures, self.tracker)
    }
}

/// Fetches a batch of thumbnails and packages them into a zip archive.
#[derive(Clone)]
pub struct ArchiveBuilder {
    resolver: ImageResolver,
    compression: Compression,
}

impl ArchiveBuilder {
    pub fn new(resolver: ImageResolver, compression: Compression) -> Self {
        Self {
            resolver,
            compression,
        }
    }

    pub fn resolver(&self) -> &ImageResolver {
        &self.resolver
    }

    /// Resolve every item concurrently, then package whatever was found.
    ///
    /// Missing thumbnails end up in the failure list; only packaging errors are returned.
    /// Packaging runs inline on the polling task once every fetch has settled, and
    /// `archive_percent` advances once per written entry.
    pub async fn build(
        &self,
        items: &[Item],
        mode: &FetchMode,
        sink: &dyn ProgressSink,
    ) -> Result<ArchiveResult, ArchiveError> {
        engine_info!("Building archive for {} items, mode {}", items.len(), mode);
        let mut acc = BuildAccumulator::new(self.resolver.host(), mode.primary(), items.len());

        let mut pending: FuturesUnordered<_> = items
            .iter()
            .enumerate()
            .map(|(position, item)| async move {
                let outcome = self.resolver.fetch(item.id, mode).await;
                (position, item, outcome)
            })
            .collect();
        while let Some((position, item, outcome)) = pending.next().await {
            acc.settle(position, item, outcome, sink);
        }

        let (images, failures, mut tracker) = acc.into_parts();
        if items.is_empty() {
            sink.emit(tracker.images_settled(0, 0));
        }

        let packaged = images.len();
        let archive_bytes = package(images, self.compression, |done, total| {
            sink.emit(tracker.archive_progress(percent_of(done, total)));
        })?;

        engine_info!(
            "Archive built: {} images packaged, {} failures, {} bytes",
            packaged,
            failures.len(),
            archive_bytes.len()
        );
        Ok(ArchiveResult {
            archive_bytes,
            packaged,
            failures,
        })
    }
}

/// Write all images into an in-memory zip. A repeated filename replaces the earlier entry.
fn package(
    images: Vec<PackagedImage>,
    compression: Compression,
    mut on_entry: impl FnMut(usize, usize),
) -> Result<Vec<u8>, ArchiveError> {
    let mut entries: Vec<PackagedImage> = Vec::with_capacity(images.len());
    let mut positions: HashMap<String, usize> = HashMap::new();
    for image in images {
        match positions.get(&image.filename) {
            Some(&position) => {
                engine_debug!("Replacing duplicate archive entry {}", image.filename);
                entries[position] = image;
            }
            None => {
                positions.insert(image.filename.clone(), entries.len());
                entries.push(image);
            }
        }
    }

    let total = entries.len();
    let options = FileOptions::default().compression_method(compression.method());
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (done, entry) in entries.iter().enumerate() {
        writer.start_file(entry.filename.as_str(), options)?;
        writer.write_all(&entry.bytes)?;
        on_entry(done + 1, total);
    }
    let cursor = writer.finish()?;
    on_entry(total, total);
    Ok(cursor.into_inner())
}
