// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use semval::prelude::*;
use thiserror::Error;

use plexiq_core::{Score, ScoreValue, rating::NORMALIZED_MAX};

pub type WeightValue = f64;

/// Accepted deviation of the sum of all weights from 1.0.
pub const WEIGHTS_SUM_TOLERANCE: WeightValue = 0.05;

/// Relative importance of the scoring components.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Weights {
    pub play_count: WeightValue,
    pub ratings: WeightValue,
    pub size: WeightValue,
    pub age: WeightValue,
    pub quality: WeightValue,
}

impl Weights {
    pub const DEFAULT: Self = Self {
        play_count: 0.3,
        ratings: 0.25,
        size: 0.2,
        age: 0.15,
        quality: 0.1,
    };

    /// All weights with their names, in evaluation order.
    #[must_use]
    pub const fn named(&self) -> [(&'static str, WeightValue); 5] {
        [
            ("play_count", self.play_count),
            ("ratings", self.ratings),
            ("size", self.size),
            ("age", self.age),
            ("quality", self.quality),
        ]
    }

    #[must_use]
    pub fn sum(&self) -> WeightValue {
        self.named().iter().map(|(_, weight)| weight).sum()
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display)]
pub enum WeightsInvalidity {
    #[display("weight '{_0}' must be a finite, non-negative number, got {_1}")]
    Weight(&'static str, WeightValue),

    #[display("weights must sum to 1.0 ± {}, got {:.3}", WEIGHTS_SUM_TOLERANCE, _0)]
    Sum(WeightValue),
}

impl Validate for Weights {
    type Invalidity = WeightsInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let context = self
            .named()
            .into_iter()
            .fold(ValidationContext::new(), |context, (name, weight)| {
                context.invalidate_if(
                    !(weight.is_finite() && weight >= 0.0),
                    Self::Invalidity::Weight(name, weight),
                )
            });
        let sum = self.sum();
        context
            .invalidate_if(
                !((1.0 - WEIGHTS_SUM_TOLERANCE)..=(1.0 + WEIGHTS_SUM_TOLERANCE)).contains(&sum),
                Self::Invalidity::Sum(sum),
            )
            .into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Thresholds {
    /// Minimum score on the canonical 0–1 scale for recommending deletion.
    pub min_deletion_score: ScoreValue,

    /// Items rated at least this high on the normalized 0–10 scale are
    /// never recommended for deletion.
    pub never_delete_rating: f64,
}

impl Thresholds {
    pub const DEFAULT: Self = Self {
        min_deletion_score: 0.7,
        never_delete_rating: 8.0,
    };
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display)]
pub enum ThresholdsInvalidity {
    #[display("min_deletion_score must be between 0.0 and 1.0, got {_0}")]
    MinDeletionScore(ScoreValue),

    #[display("never_delete_rating must be between 0.0 and 10.0, got {_0}")]
    NeverDeleteRating(f64),
}

impl Validate for Thresholds {
    type Invalidity = ThresholdsInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self {
            min_deletion_score,
            never_delete_rating,
        } = *self;
        ValidationContext::new()
            .invalidate_if(
                !(Score::MIN_VALUE..=Score::MAX_VALUE).contains(&min_deletion_score),
                Self::Invalidity::MinDeletionScore(min_deletion_score),
            )
            .invalidate_if(
                !(0.0..=NORMALIZED_MAX).contains(&never_delete_rating),
                Self::Invalidity::NeverDeleteRating(never_delete_rating),
            )
            .into()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ScoringConfig {
    pub weights: Weights,
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display)]
pub enum ScoringConfigInvalidity {
    Weights(WeightsInvalidity),
    Thresholds(ThresholdsInvalidity),
}

impl Validate for ScoringConfig {
    type Invalidity = ScoringConfigInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self {
            weights,
            thresholds,
        } = self;
        ValidationContext::new()
            .validate_with(weights, Self::Invalidity::Weights)
            .validate_with(thresholds, Self::Invalidity::Thresholds)
            .into()
    }
}

impl ScoringConfig {
    /// Reject invalid configurations instead of silently renormalizing them.
    pub fn check(&self) -> Result<(), ConfigError> {
        self.validate()
            .map_err(|err| ConfigError::Invalid(err.into_iter().collect()))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid scoring configuration: {}", DisplayInvalidities(.0))]
    Invalid(Vec<ScoringConfigInvalidity>),
}

struct DisplayInvalidities<'a>(&'a [ScoringConfigInvalidity]);

impl fmt::Display for DisplayInvalidities<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, invalidity) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            invalidity.fmt(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
