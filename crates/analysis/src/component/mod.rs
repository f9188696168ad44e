// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Independent scoring components.
//!
//! Each component maps a partial view of a record onto the canonical
//! 0–1 scale together with a one-line explanation. Missing or malformed
//! data results in a neutral value and never in an error.

use plexiq_core::{MetadataRecord, Score, ScoreValue, util::clock::OffsetDateTimeMs};

use crate::config::{Thresholds, WeightValue, Weights};

pub mod age;
pub mod play_count;
pub mod quality;
pub mod ratings;
pub mod size;

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentScore {
    pub value: ScoreValue,
    pub explanation: String,
}

impl ComponentScore {
    #[must_use]
    pub fn new(value: ScoreValue, explanation: impl Into<String>) -> Self {
        debug_assert!((Score::MIN_VALUE..=Score::MAX_VALUE).contains(&value));
        Self {
            value,
            explanation: explanation.into(),
        }
    }

    #[must_use]
    pub fn neutral(explanation: impl Into<String>) -> Self {
        Self::new(Score::NEUTRAL_VALUE, explanation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Component {
    #[display("play count")]
    PlayCount,

    #[display("ratings")]
    Ratings,

    #[display("size")]
    Size,

    #[display("age")]
    Age,

    #[display("quality")]
    Quality,
}

impl Component {
    /// Fixed evaluation and reporting order.
    pub const ALL: [Self; 5] = [
        Self::PlayCount,
        Self::Ratings,
        Self::Size,
        Self::Age,
        Self::Quality,
    ];

    #[must_use]
    pub const fn weight(self, weights: &Weights) -> WeightValue {
        match self {
            Self::PlayCount => weights.play_count,
            Self::Ratings => weights.ratings,
            Self::Size => weights.size,
            Self::Age => weights.age,
            Self::Quality => weights.quality,
        }
    }

    #[must_use]
    pub fn evaluate(
        self,
        record: &MetadataRecord,
        thresholds: &Thresholds,
        as_of: &OffsetDateTimeMs,
    ) -> ComponentScore {
        match self {
            Self::PlayCount => play_count::score(record.watch_stats.view_count),
            Self::Ratings => ratings::score(&record.ratings, thresholds.never_delete_rating),
            Self::Size => size::score(record.media_info.size_bytes),
            Self::Age => age::score(&record.watch_stats, as_of),
            Self::Quality => quality::score(&record.media_info),
        }
    }
}
