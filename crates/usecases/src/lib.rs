// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Workflows that combine metadata sources, scoring, the backup ledger,
//! and the deletion capability.

use plexiq_analysis::{ConfigError, Rejection};
use thiserror::Error;

pub mod analyze;
pub mod collect;
pub mod delete;
pub mod source;

use self::delete::DeletionState;

/// Violations of the rules that guard destructive operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SafetyViolation {
    #[error("deletion of {item_count} item(s) requires explicit confirmation")]
    MissingConfirmation { item_count: usize },

    #[error("'{title}' ({id}) may not be deleted: {rejection}")]
    NotAdmitted {
        id: String,
        title: String,
        rejection: Rejection,
    },

    #[error("the deletion plan has not been backed up durably")]
    PlanNotBackedUp,

    #[error("invalid transition of deletion operation from {from} to {to}")]
    InvalidTransition {
        from: DeletionState,
        to: DeletionState,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ledger(#[from] plexiq_ledger::Error),

    #[error("failed to load metadata: {0:#}")]
    Source(anyhow::Error),

    #[error(transparent)]
    Safety(#[from] SafetyViolation),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
