// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use plexiq::{
    analysis::SpaceRecovery,
    core::{MediaInfo, MetadataRecord, Ratings, Score, util::BYTES_PER_GIB},
};

use super::*;

fn scored(title: &str, year: Option<i16>, recommended: bool) -> ScoredRecord {
    ScoredRecord {
        record: MetadataRecord {
            year,
            media_info: MediaInfo {
                size_bytes: 3 * BYTES_PER_GIB / 2,
                ..Default::default()
            },
            ratings: Ratings::new().with(RatingSource::Tmdb, 6.44),
            ..MetadataRecord::new("1", title)
        },
        score: Score::clamp_from(0.8254),
        rationale: vec![
            "Overall deletion score: 0.825/1.000".to_owned(),
            "Never watched - prime deletion candidate".to_owned(),
        ],
        recommended,
    }
}

#[test]
fn report_layout() {
    let item = scored("Alien", Some(1979), true);
    let generated_at: OffsetDateTimeMs = "2025-06-01T12:34:56Z".parse().unwrap();
    let report = render_report(&[&item], &generated_at);
    let lines: Vec<_> = report.lines().collect();
    let rule = "=".repeat(80);
    assert_eq!(rule, lines[0]);
    assert_eq!("PlexIQ Deletion Analysis Report", lines[1]);
    assert_eq!("Generated: 2025-06-01 12:34:56", lines[3]);
    assert_eq!("Showing: 1 items", lines[5]);
    assert_eq!(
        [
            "[1] Alien (1979)",
            "    Score: 0.825",
            "    Recommended: YES",
            "    Rationale:",
            "      • Overall deletion score: 0.825/1.000",
            "      • Never watched - prime deletion candidate",
            "",
        ],
        lines[7..14]
    );
    assert_eq!(Some(&rule.as_str()), lines.last());
}

#[test]
fn report_without_year() {
    let item = scored("Untitled", None, false);
    let report = render_report(&[&item], &OffsetDateTimeMs::now_utc());
    assert!(report.contains("[1] Untitled (Unknown)"));
    assert!(report.contains("Recommended: NO"));
}

#[test]
fn table_rows() {
    let first = scored("Alien", Some(1979), true);
    let second = scored("A much longer title", None, false);
    let table = render_table(&[&first, &second]);
    let lines: Vec<_> = table.lines().collect();
    assert_eq!("PlexIQ Analysis Results", lines[0]);
    assert!(lines[1].starts_with("#  Title"));
    assert!(lines[1].ends_with("Recommended"));
    assert!(lines[2].starts_with("-  ---"));
    assert!(lines[3].starts_with("1  Alien "));
    assert!(lines[3].contains("1979"));
    assert!(lines[3].contains("0.825"));
    assert!(lines[3].contains("1.50"));
    assert!(lines[3].contains("6.4"));
    assert!(lines[3].ends_with("yes"));
    assert!(lines[4].contains("N/A"));
    assert!(!lines[4].ends_with("yes"));
    // Columns are aligned.
    assert_eq!(lines[3].find("1979"), lines[4].find("N/A"));
}

#[test]
fn deletion_plan_truncates_top_reason() {
    let mut item = scored("Alien", Some(1979), true);
    item.rationale[1] = "x".repeat(60);
    let plan = render_deletion_plan(&[item]);
    let row = plan.lines().nth(3).unwrap();
    assert!(row.ends_with(&format!("{}...", "x".repeat(47))));
    assert!(!row.contains(&"x".repeat(48)));
}

#[test]
fn truncation_counts_chars() {
    assert_eq!("short", truncate_chars("short", 50));
    assert_eq!("äöü...", truncate_chars("äöüäöüäöü", 6));
}

#[test]
fn summary_lines() {
    let summary = Summary {
        total_items: 3,
        total_size_bytes: 3 * BYTES_PER_GIB,
        never_watched_count: 2,
        high_priority_count: 2,
        recommended_count: 1,
        space_recovery: vec![SpaceRecovery {
            top_n: 10,
            item_count: 3,
            size_bytes: 3 * BYTES_PER_GIB,
        }],
    };
    let text = render_summary(&summary, BYTES_PER_GIB);
    assert!(text.contains("Total items: 3"));
    assert!(text.contains("Never watched: 2"));
    assert!(text.contains("Recommended for deletion: 1"));
    assert!(text.contains("Potential space recovery: 1.00 GB"));
    assert!(text.contains("Top 10 by score: 3.00 GB"));

    let nothing_recommended = Summary {
        recommended_count: 0,
        ..summary
    };
    assert!(!render_summary(&nothing_recommended, 0).contains("Potential space recovery"));
}

#[test]
fn json_output_is_an_array() {
    let item = scored("Alien", Some(1979), true);
    let json = render_json(&[&item]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!("Alien", value[0]["title"]);
    assert_eq!(true, value[0]["recommended"]);
}
