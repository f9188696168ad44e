// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use plexiq_core::util::clock::OffsetDateTimeMs;

use crate::{Checksum, Error, Result};

/// Auxiliary key/value pairs stored alongside the payload.
pub type Metadata = serde_json::Map<String, Value>;

/// Type tags are part of the file name and must be non-empty
/// and consist only of `[a-z0-9_-]`.
pub fn validate_type_tag(backup_type: &str) -> Result<()> {
    let valid = !backup_type.is_empty()
        && backup_type
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-');
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidTypeTag(backup_type.to_owned()))
    }
}

/// The persistent representation of a ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupEntry {
    pub created_at: OffsetDateTimeMs,
    pub backup_type: String,

    #[serde(default)]
    pub metadata: Metadata,

    pub data: Value,
    pub checksum: Checksum,
}

impl BackupEntry {
    /// Compute the checksum of the current payload.
    #[must_use]
    pub fn compute_checksum(&self) -> Checksum {
        Checksum::of_value(&self.data)
    }

    /// Deserialize the payload into a typed value.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T> {
        T::deserialize(&self.data).map_err(Into::into)
    }
}

/// Entry without its payload, used for listing.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EntryHeader {
    pub(crate) created_at: OffsetDateTimeMs,
    pub(crate) backup_type: String,

    #[serde(default)]
    pub(crate) metadata: Metadata,
}

/// Reference to a durably written entry file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryRef(PathBuf);

impl EntryRef {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self(path)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }

    #[must_use]
    pub fn file_name(&self) -> String {
        self.0
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn into_path(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for EntryRef {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for EntryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display().fmt(f)
    }
}

/// Summary of an entry as returned by listing.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryInfo {
    pub entry_ref: EntryRef,
    pub created_at: OffsetDateTimeMs,
    pub backup_type: String,
    pub metadata: Metadata,
    pub size_bytes: u64,
}

/// Outcome of restoring an entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RestoredEntry {
    pub entry: BackupEntry,

    /// Whether the checksum has been recomputed and matched.
    pub verified: bool,
}
