// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use plexiq_core::{WatchStats, util::clock::OffsetDateTimeMs};

use super::ComponentScore;

/// Long untouched items score higher.
///
/// Items that have never been viewed are judged by the time since they
/// were added, all others by the time since they were last viewed.
/// A malformed timestamp only neutralizes this component.
#[must_use]
pub fn score(watch_stats: &WatchStats, as_of: &OffsetDateTimeMs) -> ComponentScore {
    match watch_stats.parse_last_viewed_at() {
        Some(Ok(last_viewed_at)) => score_viewed(as_of.whole_days_since(&last_viewed_at)),
        Some(Err(err)) => {
            log::debug!("Ignoring malformed last viewed date: {err}");
            ComponentScore::neutral("Age: Malformed last viewed date → neutral score")
        }
        None => match watch_stats.parse_added_at() {
            Some(Ok(added_at)) => score_never_viewed(as_of.whole_days_since(&added_at)),
            Some(Err(err)) => {
                log::debug!("Ignoring malformed add date: {err}");
                ComponentScore::neutral("Age: Malformed add date → neutral score")
            }
            None => ComponentScore::neutral("Age: Unknown add date → neutral score"),
        },
    }
}

fn score_never_viewed(days_since_added: i64) -> ComponentScore {
    let (value, priority) = if days_since_added > 365 {
        (1.0, "very high")
    } else if days_since_added > 180 {
        (0.8, "high")
    } else {
        (0.6, "moderate")
    };
    ComponentScore::new(
        value,
        format!("Age: Added {days_since_added} days ago, never watched → {priority} priority"),
    )
}

fn score_viewed(days_since_viewed: i64) -> ComponentScore {
    let (value, priority) = if days_since_viewed > 730 {
        (0.9, "very high")
    } else if days_since_viewed > 365 {
        (0.6, "moderate")
    } else if days_since_viewed > 180 {
        (0.4, "low")
    } else {
        (0.1, "very low")
    };
    ComponentScore::new(
        value,
        format!("Age: Last watched {days_since_viewed} days ago → {priority} priority"),
    )
}
