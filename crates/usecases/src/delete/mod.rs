// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Safety-gated deletion.
//!
//! A deletion operation runs through an explicit sequence of states:
//!
//! ```text
//! Planning → BackedUp → DryRunReported
//!                     ↘ AwaitingConfirmation → Executing → Completed
//!                                                        ↘ PartiallyFailed
//! ```
//!
//! Items are only ever deleted in the `Executing` state, which can
//! only be entered after the plan has been written to the ledger and
//! the caller has both requested execution and confirmed it.

use plexiq_analysis::AdmissionPolicy;
use plexiq_core::{MetadataRecord, ScoredRecord};
use plexiq_ledger::{EntryRef, Ledger, Metadata, metadata};
use serde::Serialize;

use crate::{Result, SafetyViolation};

pub const DELETE_OPERATION: &str = "delete";

pub const DELETE_OUTCOME_BACKUP_TYPE: &str = "delete_outcome";

/// The external capability that physically deletes an item.
pub trait DeletionCapability {
    fn delete(&mut self, record: &MetadataRecord) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum DeletionState {
    #[display("planning")]
    Planning,

    #[display("backed up")]
    BackedUp,

    #[display("dry-run reported")]
    DryRunReported,

    #[display("awaiting confirmation")]
    AwaitingConfirmation,

    #[display("executing")]
    Executing,

    #[display("completed")]
    Completed,

    #[display("partially failed")]
    PartiallyFailed,
}

impl DeletionState {
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        use DeletionState as S;
        matches!(
            (self, next),
            (S::Planning, S::BackedUp)
                | (S::BackedUp, S::DryRunReported | S::AwaitingConfirmation)
                | (S::AwaitingConfirmation, S::Executing)
                | (S::Executing, S::Completed | S::PartiallyFailed)
        )
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::DryRunReported | Self::Completed | Self::PartiallyFailed
        )
    }
}

/// Both flags must be set explicitly for items to be deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub execute: bool,
    pub confirm: bool,
}

impl ExecutionRequest {
    pub const DRY_RUN: Self = Self {
        execute: false,
        confirm: false,
    };

    #[must_use]
    pub const fn is_dry_run(self) -> bool {
        !(self.execute && self.confirm)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedItem {
    pub id: String,
    pub title: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemFailure {
    pub id: String,
    pub title: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchOutcome {
    pub succeeded: Vec<String>,
    pub failed: Vec<ItemFailure>,
}

impl BatchOutcome {
    #[must_use]
    pub fn succeeded_count(&self) -> usize {
        self.succeeded.len()
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}

#[derive(Debug, Clone)]
pub struct DeletionOperation {
    state: DeletionState,
    request: ExecutionRequest,
    min_score: f64,
    items: Vec<ScoredRecord>,
    rejected: Vec<RejectedItem>,
    plan_entry: Option<EntryRef>,
    outcome: Option<BatchOutcome>,
    outcome_entry: Option<EntryRef>,
    violations: Vec<SafetyViolation>,
}

impl DeletionOperation {
    /// Select all candidates that are admitted by the policy.
    #[must_use]
    pub fn plan(
        policy: &AdmissionPolicy,
        candidates: impl IntoIterator<Item = ScoredRecord>,
        request: ExecutionRequest,
    ) -> Self {
        let (items, rejected) = policy.partition(candidates);
        let mut violations = Vec::new();
        let rejected = rejected
            .into_iter()
            .map(|(scored, rejection)| {
                let ScoredRecord {
                    record: MetadataRecord { id, title, .. },
                    recommended,
                    ..
                } = scored;
                // Report proposed candidates that the current policy rejects
                if recommended && request.execute {
                    let violation = SafetyViolation::NotAdmitted {
                        id: id.clone(),
                        title: title.clone(),
                        rejection: rejection.clone(),
                    };
                    log::warn!("Excluded from deletion: {violation}");
                    violations.push(violation);
                }
                RejectedItem {
                    id,
                    title,
                    reason: rejection.to_string(),
                }
            })
            .collect();
        log::info!(
            "Planned deletion of {} item(s) with a minimum score of {:.2}",
            items.len(),
            policy.thresholds().min_deletion_score
        );
        Self {
            state: DeletionState::Planning,
            request,
            min_score: policy.thresholds().min_deletion_score,
            items,
            rejected,
            plan_entry: None,
            outcome: None,
            outcome_entry: None,
            violations,
        }
    }

    #[must_use]
    pub const fn state(&self) -> DeletionState {
        self.state
    }

    #[must_use]
    pub const fn request(&self) -> ExecutionRequest {
        self.request
    }

    #[must_use]
    pub const fn min_score(&self) -> f64 {
        self.min_score
    }

    #[must_use]
    pub fn items(&self) -> &[ScoredRecord] {
        &self.items
    }

    #[must_use]
    pub fn rejected(&self) -> &[RejectedItem] {
        &self.rejected
    }

    #[must_use]
    pub fn total_size_bytes(&self) -> u64 {
        self.items
            .iter()
            .map(|scored| scored.record.media_info.size_bytes)
            .fold(0, u64::saturating_add)
    }

    #[must_use]
    pub const fn plan_entry(&self) -> Option<&EntryRef> {
        self.plan_entry.as_ref()
    }

    #[must_use]
    pub const fn outcome(&self) -> Option<&BatchOutcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub const fn outcome_entry(&self) -> Option<&EntryRef> {
        self.outcome_entry.as_ref()
    }

    /// Violations to be reported to the caller.
    #[must_use]
    pub fn violations(&self) -> &[SafetyViolation] {
        &self.violations
    }

    fn transition(&mut self, next: DeletionState) -> std::result::Result<(), SafetyViolation> {
        if !self.state.can_transition_to(next) {
            return Err(SafetyViolation::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        log::debug!("Deletion operation: {} → {next}", self.state);
        self.state = next;
        Ok(())
    }

    /// Durably record the plan before anything else happens.
    pub fn back_up(&mut self, ledger: &Ledger, extra: Metadata) -> Result<&EntryRef> {
        if self.state != DeletionState::Planning {
            return Err(SafetyViolation::InvalidTransition {
                from: self.state,
                to: DeletionState::BackedUp,
            }
            .into());
        }
        let mut extra = extra;
        extra.insert("min_score".to_owned(), self.min_score.into());
        extra.insert("rejected_count".to_owned(), self.rejected.len().into());
        let entry_ref = ledger.operation_record(
            DELETE_OPERATION,
            &self.items,
            self.request.is_dry_run(),
            extra,
        )?;
        log::info!("Deletion plan backed up: {}", entry_ref.file_name());
        self.transition(DeletionState::BackedUp)?;
        Ok(self.plan_entry.insert(entry_ref))
    }

    /// Finish a dry run or wait for execution.
    ///
    /// A request to execute without confirmation is recorded as a
    /// violation and the operation stays in `AwaitingConfirmation`.
    pub fn review(&mut self) -> Result<DeletionState> {
        let ExecutionRequest { execute, confirm } = self.request;
        if !execute {
            self.transition(DeletionState::DryRunReported)?;
            log::info!("[DRY-RUN] Would delete {} item(s)", self.items.len());
            for scored in &self.items {
                log::info!(
                    "[DRY-RUN]   • {} (score {})",
                    scored.record.display_title(),
                    scored.score
                );
            }
            return Ok(self.state);
        }
        self.transition(DeletionState::AwaitingConfirmation)?;
        if !confirm {
            let violation = SafetyViolation::MissingConfirmation {
                item_count: self.items.len(),
            };
            log::warn!("Not executing: {violation}");
            self.violations.push(violation);
        }
        Ok(self.state)
    }

    /// Delete all planned items.
    ///
    /// Failures of individual items are recorded and do not abort
    /// the batch. The outcome is backed up as well.
    pub fn execute(
        &mut self,
        capability: &mut dyn DeletionCapability,
        ledger: &Ledger,
    ) -> Result<&BatchOutcome> {
        if !self.request.confirm {
            return Err(SafetyViolation::MissingConfirmation {
                item_count: self.items.len(),
            }
            .into());
        }
        let plan_entry = match &self.plan_entry {
            Some(plan_entry) if plan_entry.path().is_file() => plan_entry.clone(),
            _ => return Err(SafetyViolation::PlanNotBackedUp.into()),
        };
        self.transition(DeletionState::Executing)?;
        log::info!("[ACTION] Deleting {} item(s)", self.items.len());
        let mut outcome = BatchOutcome::default();
        for scored in &self.items {
            let record = &scored.record;
            match capability.delete(record) {
                Ok(()) => {
                    log::info!("[ACTION] Deleted: {}", record.display_title());
                    outcome.succeeded.push(record.id.clone());
                }
                Err(err) => {
                    log::error!("Failed to delete '{}': {err:#}", record.display_title());
                    outcome.failed.push(ItemFailure {
                        id: record.id.clone(),
                        title: record.title.clone(),
                        reason: format!("{err:#}"),
                    });
                }
            }
        }
        log::info!(
            "Deletion complete: {} deleted, {} failed",
            outcome.succeeded_count(),
            outcome.failed_count()
        );
        self.transition(if outcome.failed.is_empty() {
            DeletionState::Completed
        } else {
            DeletionState::PartiallyFailed
        })?;
        let outcome = self.outcome.insert(outcome);
        let outcome_entry = ledger.persist(
            &*outcome,
            DELETE_OUTCOME_BACKUP_TYPE,
            metadata([
                ("plan", serde_json::Value::from(plan_entry.file_name())),
                ("succeeded", outcome.succeeded_count().into()),
                ("failed", outcome.failed_count().into()),
            ]),
        )?;
        self.outcome_entry = Some(outcome_entry);
        Ok(outcome)
    }
}

/// Run a deletion operation as far as the request permits.
///
/// The plan is always backed up. Items are only deleted if execution
/// has been requested and confirmed, otherwise the operation ends
/// as a dry run or awaiting confirmation.
pub fn run(
    policy: &AdmissionPolicy,
    candidates: impl IntoIterator<Item = ScoredRecord>,
    request: ExecutionRequest,
    ledger: &Ledger,
    capability: &mut dyn DeletionCapability,
    extra: Metadata,
) -> Result<DeletionOperation> {
    let mut operation = DeletionOperation::plan(policy, candidates, request);
    operation.back_up(ledger, extra)?;
    if operation.review()? == DeletionState::AwaitingConfirmation && request.confirm {
        operation.execute(capability, ledger)?;
    }
    Ok(operation)
}
