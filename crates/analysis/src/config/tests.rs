// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[test]
fn defaults_are_valid() {
    assert!(ScoringConfig::default().check().is_ok());
    assert!((Weights::DEFAULT.sum() - 1.0).abs() < 1e-9);
}

#[test]
fn weights_within_tolerance_are_accepted() {
    let weights = Weights {
        play_count: 0.5,
        ratings: 0.2,
        size: 0.2,
        age: 0.1,
        quality: 0.04,
    };
    assert!(weights.validate().is_ok());
    let weights = Weights {
        play_count: 1.0,
        ratings: 0.0,
        size: 0.0,
        age: 0.0,
        quality: 0.0,
    };
    assert!(weights.validate().is_ok());
}

#[test]
fn weights_outside_tolerance_are_rejected() {
    let weights = Weights {
        quality: 0.5,
        ..Weights::DEFAULT
    };
    let config = ScoringConfig {
        weights,
        ..Default::default()
    };
    let err = config.check().unwrap_err();
    let ConfigError::Invalid(invalidities) = &err;
    assert_eq!(1, invalidities.len());
    assert!(matches!(
        invalidities[0],
        ScoringConfigInvalidity::Weights(WeightsInvalidity::Sum(_))
    ));
    assert!(err.to_string().contains("weights must sum to 1.0"));
}

#[test]
fn negative_or_non_finite_weights_are_rejected() {
    let weights = Weights {
        play_count: 0.55,
        quality: -0.15,
        ..Weights::DEFAULT
    };
    assert!(matches!(
        weights.validate().unwrap_err().into_iter().next(),
        Some(WeightsInvalidity::Weight("quality", _))
    ));
    let weights = Weights {
        size: f64::NAN,
        ..Weights::DEFAULT
    };
    assert!(weights.validate().is_err());
}

#[test]
fn thresholds_out_of_range_are_rejected() {
    let config = ScoringConfig {
        thresholds: Thresholds {
            min_deletion_score: 70.0,
            never_delete_rating: 11.0,
        },
        ..Default::default()
    };
    let ConfigError::Invalid(invalidities) = config.check().unwrap_err();
    assert_eq!(2, invalidities.len());
}
