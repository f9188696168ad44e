// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[test]
fn normalize_percent_onto_ten_point_scale() {
    assert_eq!(Some(8.5), RatingScale::Percent.normalize(85.0));
    assert_eq!(Some(8.5), RatingScale::TenPoint.normalize(8.5));
    assert_eq!(Some(10.0), RatingScale::Percent.normalize(120.0));
    assert_eq!(Some(0.0), RatingScale::TenPoint.normalize(-1.0));
    assert_eq!(None, RatingScale::TenPoint.normalize(RatingValue::NAN));
    assert_eq!(None, RatingScale::Percent.normalize(RatingValue::INFINITY));
}

#[test]
fn empty_ratings_have_no_aggregates() {
    let ratings = Ratings::new();
    assert!(ratings.is_empty());
    assert_eq!(None, ratings.normalized_mean());
    assert_eq!(None, ratings.normalized_max());
}

#[test]
fn zero_is_a_rating() {
    let ratings = Ratings::new().with(RatingSource::Imdb, 0.0);
    assert_eq!(Some(0.0), ratings.normalized_mean());
}

#[test]
fn mean_includes_rotten_tomatoes() {
    let ratings = Ratings::new()
        .with(RatingSource::Imdb, 6.0)
        .with(RatingSource::Tmdb, 7.0)
        .with(RatingSource::RottenTomatoes, 80.0);
    let mean = ratings.normalized_mean().unwrap();
    assert!((mean - 7.0).abs() < 1e-9);
    assert_eq!(Some(8.0), ratings.normalized_max());
}

#[test]
fn unusable_values_are_skipped() {
    let ratings = Ratings::new()
        .with(RatingSource::Imdb, RatingValue::NAN)
        .with(RatingSource::Tmdb, 4.0);
    assert_eq!(Some(4.0), ratings.normalized_mean());
    assert_eq!(1, ratings.normalized().count());
    assert_eq!(2, ratings.len());
}

#[test]
fn validate() {
    assert!(Ratings::new().validate().is_ok());
    assert!(
        Ratings::new()
            .with(RatingSource::RottenTomatoes, 100.0)
            .with(RatingSource::Imdb, 10.0)
            .validate()
            .is_ok()
    );
    assert!(
        Ratings::new()
            .with(RatingSource::Imdb, 11.0)
            .validate()
            .is_err()
    );
    assert!(
        Ratings::new()
            .with(RatingSource::Tmdb, RatingValue::NAN)
            .validate()
            .is_err()
    );
}

#[test]
fn format_value() {
    assert_eq!("IMDb 7.3", RatingSource::Imdb.format_value(7.3));
    assert_eq!("RT 85%", RatingSource::RottenTomatoes.format_value(85.0));
}

#[test]
fn parse_source_name() {
    assert_eq!(
        RatingSource::RottenTomatoes,
        "rotten_tomatoes".parse::<RatingSource>().unwrap()
    );
    let name: &'static str = RatingSource::PlexAudience.into();
    assert_eq!("plex_audience", name);
}
