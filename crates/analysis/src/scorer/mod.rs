// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use plexiq_core::{MetadataRecord, Score, ScoredRecord, util::clock::OffsetDateTimeMs};

use crate::{
    component::Component,
    config::{ConfigError, ScoringConfig},
    policy::AdmissionPolicy,
};

/// Weighted multi-factor deletion scorer.
///
/// Scoring is a pure function of the record, the configuration,
/// and the reference instant `as_of`.
#[derive(Debug, Clone)]
pub struct Scorer {
    config: ScoringConfig,
    policy: AdmissionPolicy,
}

impl Scorer {
    /// Create a scorer from a validated configuration.
    pub fn new(config: ScoringConfig) -> Result<Self, ConfigError> {
        config.check()?;
        let policy = AdmissionPolicy::new(config.thresholds);
        Ok(Self { config, policy })
    }

    #[must_use]
    pub const fn config(&self) -> &ScoringConfig {
        &self.config
    }

    #[must_use]
    pub const fn policy(&self) -> &AdmissionPolicy {
        &self.policy
    }

    /// Compute the overall score together with one explanation per component.
    ///
    /// The first rationale line summarizes the overall score, followed by
    /// the component explanations in a fixed order.
    #[must_use]
    pub fn score(&self, record: &MetadataRecord, as_of: &OffsetDateTimeMs) -> (Score, Vec<String>) {
        let ScoringConfig {
            weights,
            thresholds,
        } = &self.config;
        let mut rationale = Vec::with_capacity(Component::ALL.len() + 1);
        let mut total = 0.0;
        for component in Component::ALL {
            let component_score = component.evaluate(record, thresholds, as_of);
            total += component.weight(weights) * component_score.value;
            rationale.push(component_score.explanation);
        }
        let score = Score::clamp_from(total);
        rationale.insert(0, format!("Overall deletion score: {score}/1.000"));
        (score, rationale)
    }

    #[must_use]
    pub fn analyze(&self, record: MetadataRecord, as_of: &OffsetDateTimeMs) -> ScoredRecord {
        let (score, rationale) = self.score(&record, as_of);
        let recommended = self.policy.admit_parts(score, &record.ratings).is_ok();
        ScoredRecord {
            record,
            score,
            rationale,
            recommended,
        }
    }

    /// Score all records, preserving their order.
    #[must_use]
    pub fn analyze_all(
        &self,
        records: impl IntoIterator<Item = MetadataRecord>,
        as_of: &OffsetDateTimeMs,
    ) -> Vec<ScoredRecord> {
        let scored: Vec<_> = records
            .into_iter()
            .map(|record| self.analyze(record, as_of))
            .collect();
        if scored.is_empty() {
            log::info!("No items to analyze");
            return scored;
        }
        let mut values: Vec<_> = scored.iter().map(|s| s.score.value()).collect();
        values.sort_by(f64::total_cmp);
        let average = values.iter().sum::<f64>() / values.len() as f64;
        let median = values[values.len() / 2];
        let recommended_count = scored.iter().filter(|s| s.recommended).count();
        log::info!(
            "Analyzed {count} items: average score {average:.3}, median {median:.3}, \
             {recommended_count} recommended for deletion",
            count = scored.len()
        );
        scored
    }
}
