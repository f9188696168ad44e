// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use serde::Deserialize;

use plexiq_core::{MetadataRecord, prelude::*, record::MetadataRecordInvalidity};

/// Provides normalized metadata records, e.g. from a media server
/// or from a file that a collector has written.
pub trait MetadataSource {
    /// Human-readable description for logs and backup metadata.
    fn describe(&self) -> String;

    fn load_records(&mut self) -> anyhow::Result<Vec<MetadataRecord>>;
}

/// Records that have already been loaded.
impl MetadataSource for Vec<MetadataRecord> {
    fn describe(&self) -> String {
        format!("{} record(s) in memory", self.len())
    }

    fn load_records(&mut self) -> anyhow::Result<Vec<MetadataRecord>> {
        Ok(std::mem::take(self))
    }
}

/// A JSON file with either an array of records or an object with
/// an `items` array.
///
/// Analysis results can be loaded as well, the additional fields
/// of scored records are ignored.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordsFile {
    Records(Vec<MetadataRecord>),
    Wrapped { items: Vec<MetadataRecord> },
}

impl MetadataSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load_records(&mut self) -> anyhow::Result<Vec<MetadataRecord>> {
        log::info!("Loading metadata from {}", self.path.display());
        let bytes = fs::read(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let records = match serde_json::from_slice(&bytes)
            .with_context(|| format!("failed to parse {}", self.path.display()))?
        {
            RecordsFile::Records(records) | RecordsFile::Wrapped { items: records } => records,
        };
        Ok(records)
    }
}

/// Drop records that cannot be identified.
///
/// Other validation failures are only logged, scoring copes with
/// missing or out-of-range data.
#[must_use]
pub fn retain_identifiable(records: Vec<MetadataRecord>) -> Vec<MetadataRecord> {
    records
        .into_iter()
        .filter(|record| {
            let Err(invalidities) = record.validate() else {
                return true;
            };
            let mut identifiable = true;
            for invalidity in invalidities.into_iter() {
                match invalidity {
                    MetadataRecordInvalidity::IdEmpty | MetadataRecordInvalidity::TitleEmpty => {
                        identifiable = false;
                    }
                    MetadataRecordInvalidity::Ratings(_) => {}
                }
                log::warn!(
                    "Invalid metadata record '{}' ({}): {invalidity:?}",
                    record.title,
                    record.id
                );
            }
            identifiable
        })
        .collect()
}
