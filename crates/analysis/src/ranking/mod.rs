// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use plexiq_core::ScoredRecord;

use crate::config::Thresholds;

/// Default cut-offs for estimating the space recovered by deleting
/// the highest ranked items.
pub const DEFAULT_TOP_N: [usize; 3] = [50, 100, 200];

/// Order by descending score.
///
/// The sort is stable, i.e. items with equal scores keep their
/// relative input order.
#[must_use]
pub fn rank(mut scored: Vec<ScoredRecord>) -> Vec<ScoredRecord> {
    scored.sort_by(|lhs, rhs| lhs.score.cmp_descending(rhs.score));
    scored
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpaceRecovery {
    /// Requested number of items.
    pub top_n: usize,

    /// Number of items actually available, at most `top_n`.
    pub item_count: usize,

    pub size_bytes: u64,
}

/// Aggregate statistics of an analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    pub total_items: usize,
    pub total_size_bytes: u64,
    pub never_watched_count: usize,

    /// Items either recommended or scoring at least the minimum.
    pub high_priority_count: usize,
    pub recommended_count: usize,
    pub space_recovery: Vec<SpaceRecovery>,
}

/// Summarize items that have already been ranked with [`rank`].
#[must_use]
pub fn summarize(ranked: &[ScoredRecord], thresholds: &Thresholds, top_n: &[usize]) -> Summary {
    let total_size_bytes = ranked
        .iter()
        .map(|scored| scored.record.media_info.size_bytes)
        .fold(0, u64::saturating_add);
    let never_watched_count = ranked
        .iter()
        .filter(|scored| scored.record.watch_stats.is_unwatched())
        .count();
    let high_priority_count = ranked
        .iter()
        .filter(|scored| {
            scored.recommended || scored.score.value() >= thresholds.min_deletion_score
        })
        .count();
    let recommended_count = ranked.iter().filter(|scored| scored.recommended).count();
    let space_recovery = top_n
        .iter()
        .map(|&top_n| {
            let top = &ranked[..top_n.min(ranked.len())];
            SpaceRecovery {
                top_n,
                item_count: top.len(),
                size_bytes: top
                    .iter()
                    .map(|scored| scored.record.media_info.size_bytes)
                    .fold(0, u64::saturating_add),
            }
        })
        .collect();
    Summary {
        total_items: ranked.len(),
        total_size_bytes,
        never_watched_count,
        high_priority_count,
        recommended_count,
        space_recovery,
    }
}

#[cfg(test)]
mod tests;
