// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Durable, checksummed backup and audit ledger.
//!
//! Every entry is a single JSON file that is written once and never
//! modified afterwards. Entries are only removed by retention-based
//! pruning.

use std::path::PathBuf;

use thiserror::Error;

pub mod checksum;
pub mod entry;
pub mod store;

pub use self::{
    checksum::Checksum,
    entry::{BackupEntry, EntryInfo, EntryRef, Metadata, RestoredEntry, validate_type_tag},
    store::{Ledger, PruneOutcome, metadata, operation_type},
};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("invalid backup type {0:?}: only lowercase letters, digits, '_' and '-' are permitted")]
    InvalidTypeTag(String),

    #[error("backup entry not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("checksum mismatch in {}: expected {expected}, actual {actual}", .path.display())]
    Integrity {
        path: PathBuf,
        expected: Checksum,
        actual: Checksum,
    },

    #[error("malformed backup entry {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
