// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::ComponentScore;

/// Rarely watched items are the first candidates.
#[must_use]
pub fn score(view_count: u32) -> ComponentScore {
    match view_count {
        0 => ComponentScore::new(
            1.0,
            "Play count: 0 (never watched) → high deletion priority",
        ),
        1 => ComponentScore::new(0.7, "Play count: 1 (watched once) → high priority"),
        2 => ComponentScore::new(0.5, "Play count: 2 (occasionally watched) → moderate priority"),
        3 => ComponentScore::new(0.4, "Play count: 3 (occasionally watched) → moderate priority"),
        _ => ComponentScore::new(
            0.1,
            format!("Play count: {view_count} (frequently watched) → minimal priority"),
        ),
    }
}
