use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::AppId;

pub const DEFAULT_IMAGE_HOST: &str = "https://cdn.akamai.steamstatic.com";

/// Thumbnail resolution class, ordered small -> large.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FetchTier {
    Capsule,
    Header,
    Library,
}

impl FetchTier {
    pub const ALL: [FetchTier; 3] = [FetchTier::Capsule, FetchTier::Header, FetchTier::Library];

    pub fn filename(self) -> &'static str {
        match self {
            FetchTier::Capsule => "capsule_184x69.jpg",
            FetchTier::Header => "header.jpg",
            FetchTier::Library => "library_600x900.jpg",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FetchTier::Capsule => "capsule",
            FetchTier::Header => "header",
            FetchTier::Library => "library",
        }
    }

    /// Coarser tiers tried after this one when fallback is enabled.
    pub fn fallback_chain(self) -> Vec<FetchTier> {
        match self {
            FetchTier::Capsule => Vec::new(),
            FetchTier::Header => vec![FetchTier::Capsule],
            FetchTier::Library => vec![FetchTier::Header, FetchTier::Capsule],
        }
    }
}

impl fmt::Display for FetchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown fetch mode '{0}' (expected capsule, header or library, optionally with -fallback)")]
pub struct ParseModeError(String);

/// How a single item's thumbnail is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchMode {
    /// Only the given tier is requested.
    Exact(FetchTier),
    /// The primary tier, then each tier of the chain in order until one is found.
    WithFallback(FetchTier, Vec<FetchTier>),
}

impl FetchMode {
    /// Fallback mode using the fixed chain for `primary`.
    pub fn fallback(primary: FetchTier) -> Self {
        FetchMode::WithFallback(primary, primary.fallback_chain())
    }

    pub fn primary(&self) -> FetchTier {
        match self {
            FetchMode::Exact(tier) | FetchMode::WithFallback(tier, _) => *tier,
        }
    }

    /// Every tier in attempt order, primary first.
    pub fn attempts(&self) -> Vec<FetchTier> {
        match self {
            FetchMode::Exact(tier) => vec![*tier],
            FetchMode::WithFallback(primary, chain) => {
                let mut attempts = Vec::with_capacity(chain.len() + 1);
                attempts.push(*primary);
                attempts.extend(chain.iter().copied());
                attempts
            }
        }
    }
}

impl Default for FetchMode {
    fn default() -> Self {
        FetchMode::fallback(FetchTier::Library)
    }
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchMode::Exact(tier) => write!(f, "{tier}"),
            FetchMode::WithFallback(tier, _) => write!(f, "{tier}-fallback"),
        }
    }
}

impl FromStr for FetchMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().to_ascii_lowercase();
        let (name, with_fallback) = match raw.strip_suffix("-fallback") {
            Some(name) => (name, true),
            None => (raw.as_str(), false),
        };
        let tier = FetchTier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == name)
            .ok_or_else(|| ParseModeError(s.to_string()))?;
        Ok(if with_fallback {
            FetchMode::fallback(tier)
        } else {
            FetchMode::Exact(tier)
        })
    }
}

/// Base URL of the public asset CDN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHost {
    base: String,
}

impl ImageHost {
    pub fn parse(base: &str) -> Result<Self, url::ParseError> {
        let parsed = url::Url::parse(base)?;
        Ok(Self {
            base: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// `<base>/steam/apps/<id>/<tier filename>`
    pub fn image_url(&self, id: AppId, tier: FetchTier) -> String {
        format!("{}/steam/apps/{id}/{}", self.base, tier.filename())
    }

    /// One URL per known tier, for manual inspection.
    pub fn candidate_urls(&self, id: AppId) -> BTreeMap<FetchTier, String> {
        FetchTier::ALL
            .into_iter()
            .map(|tier| (tier, self.image_url(id, tier)))
            .collect()
    }
}

impl Default for ImageHost {
    fn default() -> Self {
        Self {
            base: DEFAULT_IMAGE_HOST.to_string(),
        }
    }
}
