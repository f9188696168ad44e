// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[test]
fn parse_watch_timestamps() {
    let watch_stats = WatchStats {
        view_count: 1,
        last_viewed_at: Some("2023-07-14T20:15:00Z".to_owned()),
        added_at: Some("not a date".to_owned()),
    };
    assert!(watch_stats.parse_last_viewed_at().unwrap().is_ok());
    assert!(watch_stats.parse_added_at().unwrap().is_err());
    assert!(WatchStats::default().parse_added_at().is_none());
}

#[test]
fn blank_timestamps_are_absent() {
    let watch_stats = WatchStats {
        view_count: 0,
        last_viewed_at: Some("   ".to_owned()),
        added_at: Some(String::new()),
    };
    assert!(watch_stats.parse_last_viewed_at().is_none());
    assert!(watch_stats.parse_added_at().is_none());
    assert!(watch_stats.is_unwatched());
}

#[test]
fn display_title() {
    let mut record = MetadataRecord::new("42", "Alien");
    assert_eq!("Alien", record.display_title());
    record.year = Some(1979);
    assert_eq!("Alien (1979)", record.display_title());
}

#[test]
fn validate_record() {
    assert!(MetadataRecord::new("1", "Title").validate().is_ok());
    assert!(MetadataRecord::new("", "Title").validate().is_err());
    assert!(MetadataRecord::new("1", " ").validate().is_err());
    let mut record = MetadataRecord::new("1", "Title");
    record.ratings.insert(RatingSource::RottenTomatoes, 101.0);
    assert!(record.validate().is_err());
}

#[test]
fn top_reason_skips_summary() {
    let scored = ScoredRecord {
        record: MetadataRecord::new("1", "Title"),
        score: Score::NEUTRAL,
        rationale: vec!["summary".to_owned(), "first".to_owned()],
        recommended: false,
    };
    assert_eq!(Some("first"), scored.top_reason());
    assert!(scored.validate().is_ok());
}

#[cfg(feature = "serde")]
#[test]
fn deserialize_sparse_record() {
    let json = serde_json::json!({
        "id": "1234",
        "title": "Some Movie",
        "watch_stats": { "view_count": 2 },
        "media_info": { "size_bytes": 1024 },
        "ratings": { "imdb": 6.5, "rotten_tomatoes": 71 }
    });
    let record: MetadataRecord = serde_json::from_value(json).unwrap();
    assert_eq!(ItemKind::Movie, record.kind);
    assert_eq!(2, record.watch_stats.view_count);
    assert_eq!(None, record.watch_stats.added_at);
    assert_eq!(Some(71.0), record.ratings.get(RatingSource::RottenTomatoes));
    assert_eq!(None, record.ratings.get(RatingSource::Tmdb));
}
