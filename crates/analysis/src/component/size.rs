// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use plexiq_core::util::bytes_to_gib;

use super::ComponentScore;

/// Upper bounds (exclusive, GiB) of the size bands in ascending order.
const SIZE_BANDS: [(f64, f64, &str, &str); 3] = [
    (1.0, 0.2, "small", "low space recovery"),
    (5.0, 0.4, "medium", "moderate space recovery"),
    (10.0, 0.7, "large", "good space recovery"),
];

/// Larger files recover more space.
///
/// A step function that never decreases with growing size.
#[must_use]
pub fn score(size_bytes: u64) -> ComponentScore {
    let size_gib = bytes_to_gib(size_bytes);
    let (value, label, effect) = SIZE_BANDS
        .iter()
        .find(|(upper_bound, ..)| size_gib < *upper_bound)
        .map_or(
            (1.0, "very large", "excellent space recovery"),
            |(_, value, label, effect)| (*value, *label, *effect),
        );
    ComponentScore::new(value, format!("Size: {size_gib:.2} GiB ({label}) → {effect}"))
}
