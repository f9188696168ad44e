// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! External ratings from third-party sources.
//!
//! Ratings are stored on the native scale of their source and only
//! normalized onto the common 0–10 scale when they are evaluated.
//! All consumers must use [`Ratings::normalized`] or one of the
//! derived aggregates to avoid diverging interpretations.

use std::collections::{BTreeMap, btree_map};

use crate::prelude::*;

pub type RatingValue = f64;

/// Upper bound of the common scale onto which all ratings are normalized.
pub const NORMALIZED_MAX: RatingValue = 10.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RatingScale {
    /// 0.0 ..= 10.0, e.g. IMDb stars
    TenPoint,

    /// 0 ..= 100, e.g. Rotten Tomatoes percentage
    Percent,
}

impl RatingScale {
    #[must_use]
    pub const fn max_value(self) -> RatingValue {
        match self {
            Self::TenPoint => 10.0,
            Self::Percent => 100.0,
        }
    }

    /// Map a value of this scale onto the common 0–10 scale.
    ///
    /// Values outside of the scale are clamped. Returns `None` for
    /// non-finite values.
    #[must_use]
    pub fn normalize(self, value: RatingValue) -> Option<RatingValue> {
        if !value.is_finite() {
            return None;
        }
        let clamped = value.clamp(0.0, self.max_value());
        Some(clamped * NORMALIZED_MAX / self.max_value())
    }
}

#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    strum::IntoStaticStr,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum RatingSource {
    Imdb,
    Tmdb,
    RottenTomatoes,
    PlexCritic,
    PlexAudience,
}

impl RatingSource {
    #[must_use]
    pub const fn scale(self) -> RatingScale {
        match self {
            Self::RottenTomatoes => RatingScale::Percent,
            Self::Imdb | Self::Tmdb | Self::PlexCritic | Self::PlexAudience => {
                RatingScale::TenPoint
            }
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Imdb => "IMDb",
            Self::Tmdb => "TMDb",
            Self::RottenTomatoes => "RT",
            Self::PlexCritic => "Plex critics",
            Self::PlexAudience => "Plex audience",
        }
    }

    /// Format a raw value in the notation of this source.
    #[must_use]
    pub fn format_value(self, value: RatingValue) -> String {
        match self.scale() {
            RatingScale::TenPoint => format!("{} {value:.1}", self.label()),
            RatingScale::Percent => format!("{} {value:.0}%", self.label()),
        }
    }
}

/// Available ratings, keyed by source.
///
/// Unknown ratings are absent. A value of zero is a genuine
/// (very bad) rating and never a placeholder for missing data.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Ratings(BTreeMap<RatingSource, RatingValue>);

impl Ratings {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, source: RatingSource) -> Option<RatingValue> {
        self.0.get(&source).copied()
    }

    /// Insert or replace a rating, returning the previous value.
    pub fn insert(&mut self, source: RatingSource, value: RatingValue) -> Option<RatingValue> {
        self.0.insert(source, value)
    }

    pub fn remove(&mut self, source: RatingSource) -> Option<RatingValue> {
        self.0.remove(&source)
    }

    #[must_use]
    pub fn with(mut self, source: RatingSource, value: RatingValue) -> Self {
        self.insert(source, value);
        self
    }

    /// Raw values in the deterministic order of [`RatingSource`].
    pub fn iter(&self) -> impl Iterator<Item = (RatingSource, RatingValue)> + '_ {
        self.0.iter().map(|(source, value)| (*source, *value))
    }

    /// All usable ratings, normalized onto the common 0–10 scale.
    pub fn normalized(&self) -> impl Iterator<Item = (RatingSource, RatingValue)> + '_ {
        self.iter().filter_map(|(source, value)| {
            source
                .scale()
                .normalize(value)
                .map(|normalized| (source, normalized))
        })
    }

    /// Arithmetic mean of all usable ratings on the 0–10 scale.
    #[must_use]
    pub fn normalized_mean(&self) -> Option<RatingValue> {
        let (count, sum) = self
            .normalized()
            .fold((0usize, 0.0), |(count, sum), (_, value)| {
                (count + 1, sum + value)
            });
        (count > 0).then(|| sum / count as RatingValue)
    }

    /// Highest usable rating on the 0–10 scale.
    #[must_use]
    pub fn normalized_max(&self) -> Option<RatingValue> {
        self.normalized()
            .map(|(_, value)| value)
            .reduce(RatingValue::max)
    }
}

impl FromIterator<(RatingSource, RatingValue)> for Ratings {
    fn from_iter<T: IntoIterator<Item = (RatingSource, RatingValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Ratings {
    type Item = (&'a RatingSource, &'a RatingValue);
    type IntoIter = btree_map::Iter<'a, RatingSource, RatingValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RatingsInvalidity {
    NotFinite(RatingSource),
    OutOfRange(RatingSource),
}

impl Validate for Ratings {
    type Invalidity = RatingsInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        self.iter()
            .fold(ValidationContext::new(), |context, (source, value)| {
                context
                    .invalidate_if(!value.is_finite(), Self::Invalidity::NotFinite(source))
                    .invalidate_if(
                        value.is_finite() && !(0.0..=source.scale().max_value()).contains(&value),
                        Self::Invalidity::OutOfRange(source),
                    )
            })
            .into()
    }
}

#[cfg(test)]
mod tests;
