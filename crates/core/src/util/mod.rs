// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

pub mod clock;

/// Number of bytes per gibibyte.
pub const BYTES_PER_GIB: u64 = 1024 * 1024 * 1024;

/// Convert a byte count into fractional gibibytes.
#[must_use]
pub fn bytes_to_gib(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GIB as f64
}
