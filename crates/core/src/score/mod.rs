// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use crate::prelude::*;

pub type ScoreValue = f64;

/// Deletion priority on the canonical scale from 0.0 (keep) to 1.0
/// (delete first).
///
/// All scores throughout the pipeline use this scale.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Score(ScoreValue);

impl Score {
    pub const MIN_VALUE: ScoreValue = 0.0;

    pub const MAX_VALUE: ScoreValue = 1.0;

    /// Neutral midpoint, used for missing data.
    pub const NEUTRAL_VALUE: ScoreValue = 0.5;

    pub const MIN: Self = Self(Self::MIN_VALUE);

    pub const MAX: Self = Self(Self::MAX_VALUE);

    pub const NEUTRAL: Self = Self(Self::NEUTRAL_VALUE);

    /// Clamp into the valid range. NaN is mapped onto the neutral value.
    #[must_use]
    pub fn clamp_value(value: impl Into<ScoreValue>) -> ScoreValue {
        let value = value.into();
        if value.is_nan() {
            return Self::NEUTRAL_VALUE;
        }
        value.clamp(Self::MIN_VALUE, Self::MAX_VALUE)
    }

    #[must_use]
    pub fn clamp_from(value: impl Into<ScoreValue>) -> Self {
        Self::new_unchecked(Self::clamp_value(value))
    }

    #[must_use]
    pub const fn new_unchecked(value: ScoreValue) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> ScoreValue {
        let Self(value) = self;
        value
    }

    /// Total order for sorting, higher scores first.
    #[must_use]
    pub fn cmp_descending(self, other: Self) -> std::cmp::Ordering {
        other.value().total_cmp(&self.value())
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl From<Score> for ScoreValue {
    fn from(from: Score) -> Self {
        from.value()
    }
}

#[derive(Copy, Clone, Debug)]
pub enum ScoreInvalidity {
    OutOfRange,
}

impl Validate for Score {
    type Invalidity = ScoreInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(
                !(*self >= Self::MIN && *self <= Self::MAX),
                Self::Invalidity::OutOfRange,
            )
            .into()
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_assert!(self.is_valid());
        write!(f, "{:.3}", self.value())
    }
}
