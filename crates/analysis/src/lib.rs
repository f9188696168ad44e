// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Deterministic deletion scoring of media library items.
//!
//! All computations in this crate are pure and synchronous. Scoring
//! depends only on the record, the configuration, and an explicit
//! reference instant, so repeated runs produce identical results.

pub mod component;
pub mod config;
pub mod policy;
pub mod ranking;
pub mod scorer;

pub use self::{
    config::{ConfigError, ScoringConfig, Thresholds, Weights},
    policy::{AdmissionPolicy, Rejection},
    ranking::{DEFAULT_TOP_N, SpaceRecovery, Summary, rank, summarize},
    scorer::Scorer,
};
