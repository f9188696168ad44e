// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fs;

use anyhow::Context as _;

use plexiq::core::{ScoredRecord, util::clock::OffsetDateTimeMs};

use super::Context;
use crate::{
    args::{AnalyzeArgs, OutputFormat},
    output,
};

pub(super) fn run(context: &Context, args: AnalyzeArgs) -> anyhow::Result<()> {
    let AnalyzeArgs {
        input,
        show_all,
        limit,
        format,
        output: output_file,
        top_n,
    } = args;
    let ledger = context.open_ledger()?;
    let as_of = OffsetDateTimeMs::now_local();
    let (_, analysis) = context.analyze_file(&ledger, input, as_of, &top_n)?;

    if let Some(output_file) = output_file {
        let json = serde_json::to_string_pretty(&analysis.ranked)?;
        fs::write(&output_file, json)
            .with_context(|| format!("failed to write {}", output_file.display()))?;
        log::info!("Analysis saved to {}", output_file.display());
    }

    let displayed: Vec<&ScoredRecord> = analysis
        .ranked
        .iter()
        .filter(|scored| show_all || scored.recommended)
        .take(limit.unwrap_or(usize::MAX))
        .collect();
    match format {
        OutputFormat::Table => println!("{}", output::render_table(&displayed)),
        OutputFormat::Report => println!("{}", output::render_report(&displayed, &as_of)),
        OutputFormat::Json => println!("{}", output::render_json(&displayed)?),
    }

    let recommended_size_bytes = analysis
        .recommended()
        .map(|scored| scored.record.media_info.size_bytes)
        .fold(0, u64::saturating_add);
    println!();
    println!(
        "{}",
        output::render_summary(&analysis.summary, recommended_size_bytes)
    );
    Ok(())
}
