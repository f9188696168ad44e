// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Admission of scored items into a deletion candidate set.
//!
//! Every path that recommends or deletes items must consult the same
//! [`AdmissionPolicy`]. Both rules are applied unconditionally:
//!
//! 1. The score must reach the configured minimum.
//! 2. No usable rating may reach the never-delete threshold after
//!    normalization onto the 0–10 scale.

use plexiq_core::{Ratings, Score, ScoredRecord};

use crate::config::Thresholds;

#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum Rejection {
    #[display("score {score} is below the minimum of {min_score:.3}")]
    BelowThreshold { score: Score, min_score: f64 },

    #[display("protected by a rating of {rating:.1}/10 (threshold {never_delete_rating:.1})")]
    Protected {
        rating: f64,
        never_delete_rating: f64,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AdmissionPolicy {
    thresholds: Thresholds,
}

impl AdmissionPolicy {
    #[must_use]
    pub const fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    #[must_use]
    pub const fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Same rules with a different minimum score, e.g. from a command
    /// line override.
    #[must_use]
    pub const fn with_min_score(mut self, min_deletion_score: f64) -> Self {
        self.thresholds.min_deletion_score = min_deletion_score;
        self
    }

    /// Check both rules. Protection takes precedence when both fail.
    pub fn admit_parts(&self, score: Score, ratings: &Ratings) -> Result<(), Rejection> {
        let Thresholds {
            min_deletion_score,
            never_delete_rating,
        } = self.thresholds;
        if let Some(rating) = ratings
            .normalized_max()
            .filter(|rating| *rating >= never_delete_rating)
        {
            return Err(Rejection::Protected {
                rating,
                never_delete_rating,
            });
        }
        if score.value() < min_deletion_score {
            return Err(Rejection::BelowThreshold {
                score,
                min_score: min_deletion_score,
            });
        }
        Ok(())
    }

    pub fn admit(&self, scored: &ScoredRecord) -> Result<(), Rejection> {
        self.admit_parts(scored.score, &scored.record.ratings)
    }

    #[must_use]
    pub fn is_admitted(&self, scored: &ScoredRecord) -> bool {
        self.admit(scored).is_ok()
    }

    /// Split candidates into admitted and rejected items, preserving their order.
    #[must_use]
    pub fn partition(
        &self,
        candidates: impl IntoIterator<Item = ScoredRecord>,
    ) -> (Vec<ScoredRecord>, Vec<(ScoredRecord, Rejection)>) {
        let mut admitted = Vec::new();
        let mut rejected = Vec::new();
        for candidate in candidates {
            match self.admit(&candidate) {
                Ok(()) => admitted.push(candidate),
                Err(rejection) => {
                    log::debug!(
                        "Not admitting {} ({}): {rejection}",
                        candidate.record.display_title(),
                        candidate.record.id
                    );
                    rejected.push((candidate, rejection));
                }
            }
        }
        (admitted, rejected)
    }
}
