// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use plexiq_core::{MetadataRecord, util::clock::OffsetDateTimeMs};
use plexiq_ledger::{EntryRef, Ledger, metadata};

use crate::{
    Error, Result,
    source::{MetadataSource, retain_identifiable},
};

pub const METADATA_BACKUP_TYPE: &str = "metadata";

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub records: Vec<MetadataRecord>,
    pub entry_ref: EntryRef,
}

/// Load all records from the source and back them up before any
/// further processing.
pub fn collect_snapshot(
    source: &mut dyn MetadataSource,
    ledger: &Ledger,
    collected_at: OffsetDateTimeMs,
) -> Result<Snapshot> {
    let source_description = source.describe();
    let mut records = retain_identifiable(source.load_records().map_err(Error::Source)?);
    for record in &mut records {
        record.collected_at.get_or_insert(collected_at);
    }
    log::info!(
        "Collected {} record(s) from {source_description}",
        records.len()
    );
    let entry_ref = ledger.persist(
        &records,
        METADATA_BACKUP_TYPE,
        metadata([
            ("source", serde_json::Value::from(source_description)),
            ("item_count", records.len().into()),
        ]),
    )?;
    Ok(Snapshot { records, entry_ref })
}
