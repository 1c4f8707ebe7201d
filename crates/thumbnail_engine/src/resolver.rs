use std::collections::BTreeMap;
use std::sync::Arc;

use engine_logging::engine_debug;
use thumbnail_core::{AppId, FetchMode, FetchTier, ImageHost};

use crate::fetch::ImageFetcher;
use crate::{FetchOutcome, FetchedImage};

/// Looks up an item's thumbnail on the image host, tier by tier.
#[derive(Clone)]
pub struct ImageResolver {
    fetcher: Arc<dyn ImageFetcher>,
    host: ImageHost,
}

impl ImageResolver {
    pub fn new(fetcher: Arc<dyn ImageFetcher>, host: ImageHost) -> Self {
        Self { fetcher, host }
    }

    pub fn host(&self) -> &ImageHost {
        &self.host
    }

    /// Every tier's URL for `id`; no network access.
    pub fn candidate_urls(&self, id: AppId) -> BTreeMap<FetchTier, String> {
        self.host.candidate_urls(id)
    }

    /// Try the mode's tiers in order, one request at a time, stopping at the first hit.
    pub async fn fetch(&self, id: AppId, mode: &FetchMode) -> FetchOutcome {
        for tier in mode.attempts() {
            if let Some(image) = self.fetch_tier(id, tier).await {
                return FetchOutcome::Found(image);
            }
        }
        FetchOutcome::NotFound
    }

    async fn fetch_tier(&self, id: AppId, tier: FetchTier) -> Option<FetchedImage> {
        let url = self.host.image_url(id, tier);
        match self.fetcher.get(&url).await {
            Ok(bytes) => Some(FetchedImage { tier, bytes }),
            Err(err) => {
                engine_debug!("app {} has no {} image ({})", id, tier, err);
                None
            }
        }
    }
}
