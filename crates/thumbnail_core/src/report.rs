use std::collections::BTreeMap;
use std::fmt;

use crate::{AppId, FetchTier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FailureKind {
    /// No tier could be fetched; the item is missing from the archive.
    AllNotFound,
    /// A fallback tier was packaged instead of the requested one.
    FallbackFound,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::AllNotFound => "all_not_found",
            FailureKind::FallbackFound => "fallback_found",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub kind: FailureKind,
    pub id: AppId,
    pub name: String,
    pub filename: String,
    pub requested: FetchTier,
    pub obtained: Option<FetchTier>,
    pub candidate_urls: BTreeMap<FetchTier, String>,
}

impl fmt::Display for FailureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' requested '{}': ", self.name, self.requested)?;
        match self.obtained {
            Some(tier) => write!(f, "fallback '{tier}' downloaded"),
            None => write!(f, "no image found"),
        }
    }
}

/// Total failures first, then degraded successes. Stable within each group.
pub fn sort_failures(records: &mut [FailureRecord]) {
    records.sort_by_key(|record| record.kind);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: AppId, kind: FailureKind) -> FailureRecord {
        FailureRecord {
            kind,
            id,
            name: format!("game {id}"),
            filename: format!("game_{id}.jpg"),
            requested: FetchTier::Library,
            obtained: match kind {
                FailureKind::AllNotFound => None,
                FailureKind::FallbackFound => Some(FetchTier::Header),
            },
            candidate_urls: BTreeMap::new(),
        }
    }

    #[test]
    fn sort_keeps_encounter_order_within_kind() {
        let mut records = vec![
            record(1, FailureKind::FallbackFound),
            record(2, FailureKind::AllNotFound),
            record(3, FailureKind::FallbackFound),
            record(4, FailureKind::AllNotFound),
        ];
        sort_failures(&mut records);
        let ids: Vec<_> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn display_mentions_fallback_tier() {
        let text = record(7, FailureKind::FallbackFound).to_string();
        assert_eq!(text, "'game 7' requested 'library': fallback 'header' downloaded");
    }
}
