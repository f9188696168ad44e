// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use itertools::Itertools as _;

use plexiq_core::{Ratings, rating::NORMALIZED_MAX};

use super::ComponentScore;

/// Poorly rated items score higher, highly rated items are protected.
///
/// Without any rating the score is neutral, i.e. missing data is
/// never penalized.
#[must_use]
pub fn score(ratings: &Ratings, never_delete_rating: f64) -> ComponentScore {
    let Some(mean) = ratings.normalized_mean() else {
        return ComponentScore::neutral("Ratings: No external ratings available → neutral score");
    };
    let sources = ratings
        .iter()
        .filter(|(_, value)| value.is_finite())
        .map(|(source, value)| source.format_value(value))
        .join(", ");
    if mean >= never_delete_rating {
        return ComponentScore::new(
            0.0,
            format!("Ratings: {sources} (avg {mean:.1}/10) → PROTECTED (highly rated)"),
        );
    }
    let priority = if mean >= 7.0 {
        "low"
    } else if mean >= 5.0 {
        "moderate"
    } else {
        "high"
    };
    ComponentScore::new(
        1.0 - mean / NORMALIZED_MAX,
        format!("Ratings: {sources} (avg {mean:.1}/10) → {priority} priority"),
    )
}
