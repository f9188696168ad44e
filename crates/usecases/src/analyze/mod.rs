// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use plexiq_analysis::{DEFAULT_TOP_N, Scorer, Summary, rank, summarize};
use plexiq_core::{ScoredRecord, util::clock::OffsetDateTimeMs};
use plexiq_ledger::{EntryRef, Ledger, metadata};

use crate::{
    Result,
    collect::{Snapshot, collect_snapshot},
    source::MetadataSource,
};

pub const ANALYSIS_BACKUP_TYPE: &str = "analysis";

#[derive(Debug, Clone)]
pub struct Params {
    /// Reference instant for all age computations.
    pub as_of: OffsetDateTimeMs,

    /// Cut-offs for the space recovery estimates.
    pub top_n: Vec<usize>,
}

impl Params {
    #[must_use]
    pub fn new(as_of: OffsetDateTimeMs) -> Self {
        Self {
            as_of,
            top_n: DEFAULT_TOP_N.to_vec(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Analysis {
    /// All scored records, highest score first.
    pub ranked: Vec<ScoredRecord>,
    pub summary: Summary,
    pub metadata_entry: EntryRef,
    pub analysis_entry: EntryRef,
}

impl Analysis {
    pub fn recommended(&self) -> impl Iterator<Item = &ScoredRecord> {
        self.ranked.iter().filter(|scored| scored.recommended)
    }
}

/// Collect, score, and rank all records.
///
/// Both the collected metadata and the analysis results are
/// backed up.
pub fn analyze(
    scorer: &Scorer,
    source: &mut dyn MetadataSource,
    ledger: &Ledger,
    params: &Params,
) -> Result<Analysis> {
    let Params { as_of, top_n } = params;
    let Snapshot {
        records,
        entry_ref: metadata_entry,
    } = collect_snapshot(source, ledger, *as_of)?;
    let ranked = rank(scorer.analyze_all(records, as_of));
    let summary = summarize(&ranked, &scorer.config().thresholds, top_n);
    let analysis_entry = ledger.persist(
        &ranked,
        ANALYSIS_BACKUP_TYPE,
        metadata([
            ("total_items", summary.total_items),
            ("recommended_deletions", summary.recommended_count),
        ]),
    )?;
    Ok(Analysis {
        ranked,
        summary,
        metadata_entry,
        analysis_entry,
    })
}
