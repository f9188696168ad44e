// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use plexiq_core::{MetadataRecord, Score, util::BYTES_PER_GIB};

use super::*;

fn scored(id: &str, score: f64, size_gib: u64, view_count: u32) -> ScoredRecord {
    let mut record = MetadataRecord::new(id, id);
    record.media_info.size_bytes = size_gib * BYTES_PER_GIB;
    record.watch_stats.view_count = view_count;
    ScoredRecord {
        record,
        score: Score::clamp_from(score),
        rationale: vec![String::new()],
        recommended: score >= 0.7,
    }
}

#[test]
fn rank_descending_and_stable() {
    let ranked = rank(vec![
        scored("a", 0.3, 1, 0),
        scored("b", 0.9, 1, 0),
        scored("c", 0.3, 1, 0),
        scored("d", 0.5, 1, 0),
        scored("e", 0.9, 1, 0),
    ]);
    assert_eq!(
        vec!["b", "e", "d", "a", "c"],
        ranked
            .iter()
            .map(|s| s.record.id.as_str())
            .collect::<Vec<_>>()
    );
}

#[test]
fn summarize_empty() {
    let summary = summarize(&[], &Thresholds::DEFAULT, &DEFAULT_TOP_N);
    assert_eq!(
        vec![50, 100, 200],
        summary
            .space_recovery
            .iter()
            .map(|recovery| recovery.top_n)
            .collect::<Vec<_>>()
    );
    assert_eq!(0, summary.total_items);
    assert_eq!(0, summary.total_size_bytes);
    assert!(
        summary
            .space_recovery
            .iter()
            .all(|recovery| recovery.item_count == 0 && recovery.size_bytes == 0)
    );
}

#[test]
fn summarize_caps_top_n_at_population() {
    let ranked = rank(vec![
        scored("a", 0.9, 10, 0),
        scored("b", 0.8, 5, 0),
        scored("c", 0.2, 1, 7),
    ]);
    let summary = summarize(&ranked, &Thresholds::DEFAULT, &[2, 10]);
    assert_eq!(3, summary.total_items);
    assert_eq!(16 * BYTES_PER_GIB, summary.total_size_bytes);
    assert_eq!(2, summary.never_watched_count);
    assert_eq!(2, summary.high_priority_count);
    assert_eq!(2, summary.recommended_count);
    assert_eq!(
        vec![
            SpaceRecovery {
                top_n: 2,
                item_count: 2,
                size_bytes: 15 * BYTES_PER_GIB,
            },
            SpaceRecovery {
                top_n: 10,
                item_count: 3,
                size_bytes: 16 * BYTES_PER_GIB,
            },
        ],
        summary.space_recovery
    );
}
