// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use anyhow::bail;

use plexiq::{
    core::{
        Score,
        util::{bytes_to_gib, clock::OffsetDateTimeMs},
    },
    ledger::metadata,
    usecases::{
        SafetyViolation,
        delete::{self, DeletionState, ExecutionRequest},
    },
};

use super::Context;
use crate::{args::DeleteArgs, capability::FileRemoval, output};

pub(super) fn run(context: &Context, args: DeleteArgs) -> anyhow::Result<()> {
    let DeleteArgs {
        input,
        min_score,
        execute,
        confirm,
    } = args;
    if let Some(min_score) =
        min_score.filter(|min_score| !(Score::MIN_VALUE..=Score::MAX_VALUE).contains(min_score))
    {
        bail!("minimum score must be between 0.0 and 1.0, got {min_score}");
    }
    let request = ExecutionRequest { execute, confirm };
    if request.is_dry_run() {
        println!("DRY-RUN MODE: No items will be deleted.");
    } else {
        println!("EXECUTE MODE: Media files of the planned items will be deleted!");
    }

    let ledger = context.open_ledger()?;
    let extra = metadata([("input", input.display().to_string())]);
    let (scorer, analysis) =
        context.analyze_file(&ledger, input, OffsetDateTimeMs::now_local(), &[])?;
    let policy = min_score.map_or(*scorer.policy(), |min_score| {
        scorer.policy().with_min_score(min_score)
    });
    let mut capability = FileRemoval::default();
    let operation = delete::run(
        &policy,
        analysis.ranked,
        request,
        &ledger,
        &mut capability,
        extra,
    )?;

    if operation.items().is_empty() {
        println!("No items meet deletion criteria.");
    } else {
        println!("{}", output::render_deletion_plan(operation.items()));
        println!("Deletion Summary:");
        println!("  Items to delete: {}", operation.items().len());
        println!(
            "  Space to recover: {:.2} GB",
            bytes_to_gib(operation.total_size_bytes())
        );
        println!("  Threshold used: {:.2}", operation.min_score());
    }
    if let Some(plan_entry) = operation.plan_entry() {
        println!("  Plan backed up: {}", plan_entry.file_name());
    }
    for violation in operation.violations() {
        if matches!(violation, SafetyViolation::NotAdmitted { .. }) {
            println!("  Excluded: {violation}");
        }
    }

    match operation.state() {
        DeletionState::DryRunReported => {
            println!("Dry-run complete, nothing has been deleted.");
            Ok(())
        }
        DeletionState::Completed => {
            let deleted_count = operation
                .outcome()
                .map_or(0, |outcome| outcome.succeeded_count());
            println!(
                "Deleted {deleted_count} item(s), {} file(s) removed.",
                capability.removed_file_count()
            );
            Ok(())
        }
        DeletionState::PartiallyFailed => {
            if let Some(outcome) = operation.outcome() {
                for failure in &outcome.failed {
                    println!("  Failed: {} ({}): {}", failure.title, failure.id, failure.reason);
                }
                bail!(
                    "{} of {} item(s) could not be deleted",
                    outcome.failed_count(),
                    outcome.succeeded_count() + outcome.failed_count()
                );
            }
            bail!("deletion partially failed");
        }
        state => {
            let reason = operation
                .violations()
                .iter()
                .find(|violation| {
                    !matches!(violation, SafetyViolation::NotAdmitted { .. })
                })
                .map_or_else(|| format!("operation stopped while {state}"), ToString::to_string);
            bail!("nothing has been deleted: {reason}");
        }
    }
}
