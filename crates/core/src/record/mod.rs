// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::BTreeMap;

use crate::{
    media::MediaInfo,
    prelude::*,
    rating::{RatingSource, Ratings, RatingsInvalidity},
    score::{Score, ScoreInvalidity},
};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ItemKind {
    #[default]
    Movie,
    Show,
    Episode,
    Other,
}

/// Viewing history of an item.
///
/// Timestamps are kept verbatim as received from the collector
/// and are only parsed on demand. Malformed values must not
/// prevent an item from being scored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct WatchStats {
    pub view_count: u32,

    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub last_viewed_at: Option<String>,

    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub added_at: Option<String>,
}

impl WatchStats {
    #[must_use]
    pub const fn is_unwatched(&self) -> bool {
        self.view_count == 0
    }

    /// `None` if absent, `Some(Err(_))` if malformed.
    #[must_use]
    pub fn parse_last_viewed_at(&self) -> Option<anyhow::Result<OffsetDateTimeMs>> {
        parse_timestamp(self.last_viewed_at.as_deref())
    }

    /// `None` if absent, `Some(Err(_))` if malformed.
    #[must_use]
    pub fn parse_added_at(&self) -> Option<anyhow::Result<OffsetDateTimeMs>> {
        parse_timestamp(self.added_at.as_deref())
    }
}

fn parse_timestamp(input: Option<&str>) -> Option<anyhow::Result<OffsetDateTimeMs>> {
    input
        .map(str::trim)
        .filter(|input| !input.is_empty())
        .map(str::parse)
}

/// Normalized metadata of a single library item.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MetadataRecord {
    /// Stable identifier assigned by the media server.
    pub id: String,

    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub guid: Option<String>,

    /// Identifiers of the item at the rating sources.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "BTreeMap::is_empty"))]
    pub external_ids: BTreeMap<RatingSource, String>,

    pub kind: ItemKind,

    pub title: String,

    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub year: Option<i16>,

    pub watch_stats: WatchStats,

    pub media_info: MediaInfo,

    pub ratings: Ratings,

    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub genres: Vec<String>,

    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub collected_at: Option<OffsetDateTimeMs>,
}

impl MetadataRecord {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Title with the release year, e.g. "Alien (1979)".
    #[must_use]
    pub fn display_title(&self) -> String {
        match self.year {
            Some(year) => format!("{} ({year})", self.title),
            None => self.title.clone(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MetadataRecordInvalidity {
    IdEmpty,
    TitleEmpty,
    Ratings(RatingsInvalidity),
}

impl Validate for MetadataRecord {
    type Invalidity = MetadataRecordInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self { id, title, ratings, .. } = self;
        ValidationContext::new()
            .invalidate_if(id.trim().is_empty(), Self::Invalidity::IdEmpty)
            .invalidate_if(title.trim().is_empty(), Self::Invalidity::TitleEmpty)
            .validate_with(ratings, Self::Invalidity::Ratings)
            .into()
    }
}

/// A [`MetadataRecord`] together with its deletion assessment.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredRecord {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub record: MetadataRecord,

    pub score: Score,

    /// One line per scoring component, preceded by an overall summary.
    pub rationale: Vec<String>,

    pub recommended: bool,
}

impl ScoredRecord {
    /// The most significant explanation after the summary line.
    #[must_use]
    pub fn top_reason(&self) -> Option<&str> {
        self.rationale.get(1).map(String::as_str)
    }
}

#[derive(Copy, Clone, Debug)]
pub enum ScoredRecordInvalidity {
    Score(ScoreInvalidity),
    RationaleEmpty,
}

impl Validate for ScoredRecord {
    type Invalidity = ScoredRecordInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .validate_with(&self.score, Self::Invalidity::Score)
            .invalidate_if(self.rationale.is_empty(), Self::Invalidity::RationaleEmpty)
            .into()
    }
}

#[cfg(test)]
mod tests;
