// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use anyhow::bail;
use serde_json::Value;

use plexiq::ledger::PruneOutcome;

use super::Context;
use crate::{args::BackupCommand, output};

pub(super) fn run(context: &Context, command: BackupCommand) -> anyhow::Result<()> {
    let ledger = context.open_ledger()?;
    match command {
        BackupCommand::List { backup_type, limit } => {
            let entries = ledger.list(backup_type.as_deref(), Some(limit))?;
            if entries.is_empty() {
                println!("No backups found");
                return Ok(());
            }
            println!("{}", output::render_backup_list(&entries));
            println!("Showing {} backup(s)", entries.len());
        }
        BackupCommand::Restore {
            file,
            no_verify,
            output: destination,
        } => {
            let path = ledger.resolve(&file);
            let restored = ledger.restore(&path, !no_verify)?;
            let entry = &restored.entry;
            let item_count = match &entry.data {
                Value::Array(items) => items.len().to_string(),
                Value::Object(_) => "1".to_owned(),
                _ => "0".to_owned(),
            };
            println!("Backup restored: {}", path.display());
            println!("  Type: {}", entry.backup_type);
            println!("  Created: {}", output::format_date_time(&entry.created_at));
            println!("  Items: {item_count}");
            println!("  Checksum: {}", entry.checksum.short());
            println!(
                "  Verified: {}",
                if restored.verified { "yes" } else { "skipped" }
            );
            if let Some(destination) = destination {
                let exported = ledger.export(&path, &destination)?;
                println!("  Exported to: {}", exported.display());
            }
        }
        BackupCommand::Prune { days } => {
            let retention_days = days.unwrap_or(context.config.ledger.retention_days);
            if retention_days == 0 {
                bail!("retention period must be at least 1 day");
            }
            let PruneOutcome {
                deleted_count,
                reclaimed_bytes,
            } = ledger.prune(retention_days)?;
            println!(
                "Removed {deleted_count} backup(s) older than {retention_days} day(s), {:.1} KB reclaimed",
                reclaimed_bytes as f64 / 1024.0
            );
        }
    }
    Ok(())
}
