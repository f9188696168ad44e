// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Deletion scoring and audit for personal media libraries.
//!
//! This crate re-exports the individual sub-crates, selected by
//! cargo features.

pub use plexiq_core as core;

#[cfg(feature = "analysis")]
pub use plexiq_analysis as analysis;

#[cfg(feature = "ledger")]
pub use plexiq_ledger as ledger;

#[cfg(feature = "usecases")]
pub use plexiq_usecases as usecases;
