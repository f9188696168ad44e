// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Human-readable rendering of analysis results and backups.

use std::fmt;

use itertools::Itertools as _;
use jiff::tz::TimeZone;

use plexiq::{
    analysis::Summary,
    core::{
        RatingSource, ScoredRecord,
        util::{bytes_to_gib, clock::OffsetDateTimeMs},
    },
    ledger::EntryInfo,
};

const RULE_WIDTH: usize = 80;

const NOT_AVAILABLE: &str = "N/A";

const TOP_REASON_MAX_CHARS: usize = 50;

const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// A plain text table with columns sized to their content.
#[derive(Debug)]
struct Table {
    title: &'static str,
    columns: Vec<(&'static str, Align)>,
    rows: Vec<Vec<String>>,
}

impl Table {
    const fn new(title: &'static str, columns: Vec<(&'static str, Align)>) -> Self {
        Self {
            title,
            columns,
            rows: Vec::new(),
        }
    }

    fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(self.columns.len(), row.len());
        self.rows.push(row);
    }

    fn column_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(index, (header, _))| {
                self.rows
                    .iter()
                    .map(|row| row[index].chars().count())
                    .fold(header.chars().count(), usize::max)
            })
            .collect()
    }

    fn write_row<'a>(
        &self,
        f: &mut fmt::Formatter<'_>,
        widths: &[usize],
        cells: impl Iterator<Item = &'a str>,
    ) -> fmt::Result {
        let line = cells
            .zip(&self.columns)
            .zip(widths)
            .map(|((cell, (_, align)), &width)| match align {
                Align::Left => format!("{cell:<width$}"),
                Align::Right => format!("{cell:>width$}"),
            })
            .join("  ");
        writeln!(f, "{}", line.trim_end())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.column_widths();
        writeln!(f, "{}", self.title)?;
        self.write_row(f, &widths, self.columns.iter().map(|(header, _)| *header))?;
        writeln!(f, "{}", widths.iter().map(|&width| "-".repeat(width)).join("  "))?;
        for row in &self.rows {
            self.write_row(f, &widths, row.iter().map(String::as_str))?;
        }
        Ok(())
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let mut truncated: String = text
        .chars()
        .take(max_chars.saturating_sub(ELLIPSIS.len()))
        .collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

fn format_year(scored: &ScoredRecord) -> String {
    scored
        .record
        .year
        .map_or_else(|| NOT_AVAILABLE.to_owned(), |year| year.to_string())
}

fn format_gib(size_bytes: u64) -> String {
    format!("{:.2}", bytes_to_gib(size_bytes))
}

/// The most commonly known rating, if any.
fn format_best_rating(scored: &ScoredRecord) -> String {
    let ratings = &scored.record.ratings;
    [RatingSource::Imdb, RatingSource::Tmdb]
        .into_iter()
        .find_map(|source| ratings.get(source))
        .map_or_else(|| NOT_AVAILABLE.to_owned(), |value| format!("{value:.1}"))
}

pub(crate) fn format_date_time(date_time: &OffsetDateTimeMs) -> String {
    date_time
        .to_utc()
        .to_timestamp()
        .to_zoned(TimeZone::fixed(date_time.offset()))
        .strftime("%Y-%m-%d %H:%M:%S")
        .to_string()
}

pub(crate) fn render_table(items: &[&ScoredRecord]) -> String {
    let mut table = Table::new(
        "PlexIQ Analysis Results",
        vec![
            ("#", Align::Right),
            ("Title", Align::Left),
            ("Year", Align::Left),
            ("Score", Align::Right),
            ("Size (GB)", Align::Right),
            ("Views", Align::Right),
            ("Rating", Align::Right),
            ("Recommended", Align::Left),
        ],
    );
    for (index, scored) in items.iter().enumerate() {
        table.push_row(vec![
            (index + 1).to_string(),
            scored.record.title.clone(),
            format_year(scored),
            scored.score.to_string(),
            format_gib(scored.record.media_info.size_bytes),
            scored.record.watch_stats.view_count.to_string(),
            format_best_rating(scored),
            if scored.recommended { "yes" } else { "" }.to_owned(),
        ]);
    }
    table.to_string()
}

pub(crate) fn render_report(items: &[&ScoredRecord], generated_at: &OffsetDateTimeMs) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        rule.clone(),
        "PlexIQ Deletion Analysis Report".to_owned(),
        rule.clone(),
        format!("Generated: {}", format_date_time(generated_at)),
        String::new(),
        format!("Showing: {} items", items.len()),
        String::new(),
    ];
    for (index, scored) in items.iter().enumerate() {
        let year = scored
            .record
            .year
            .map_or_else(|| "Unknown".to_owned(), |year| year.to_string());
        lines.push(format!("[{}] {} ({year})", index + 1, scored.record.title));
        lines.push(format!("    Score: {}", scored.score));
        lines.push(format!(
            "    Recommended: {}",
            if scored.recommended { "YES" } else { "NO" }
        ));
        lines.push("    Rationale:".to_owned());
        lines.extend(scored.rationale.iter().map(|line| format!("      • {line}")));
        lines.push(String::new());
    }
    lines.push(rule);
    lines.join("\n")
}

pub(crate) fn render_json(items: &[&ScoredRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(items)
}

pub(crate) fn render_summary(summary: &Summary, recommended_size_bytes: u64) -> String {
    let Summary {
        total_items,
        total_size_bytes,
        never_watched_count,
        high_priority_count,
        recommended_count,
        space_recovery,
    } = summary;
    let mut lines = vec![
        "Analysis Summary:".to_owned(),
        format!("  Total items: {total_items}"),
        format!("  Total size: {} GB", format_gib(*total_size_bytes)),
        format!("  Never watched: {never_watched_count}"),
        format!("  High priority: {high_priority_count}"),
        format!("  Recommended for deletion: {recommended_count}"),
    ];
    if *recommended_count > 0 {
        lines.push(format!(
            "  Potential space recovery: {} GB",
            format_gib(recommended_size_bytes)
        ));
    }
    for recovery in space_recovery {
        lines.push(format!(
            "  Top {} by score: {} GB",
            recovery.top_n,
            format_gib(recovery.size_bytes)
        ));
    }
    lines.join("\n")
}

pub(crate) fn render_deletion_plan(items: &[ScoredRecord]) -> String {
    let mut table = Table::new(
        "Deletion Plan",
        vec![
            ("#", Align::Right),
            ("Title", Align::Left),
            ("Year", Align::Left),
            ("Score", Align::Right),
            ("Size (GB)", Align::Right),
            ("Top Reason", Align::Left),
        ],
    );
    for (index, scored) in items.iter().enumerate() {
        table.push_row(vec![
            (index + 1).to_string(),
            scored.record.title.clone(),
            format_year(scored),
            scored.score.to_string(),
            format_gib(scored.record.media_info.size_bytes),
            truncate_chars(
                scored.top_reason().unwrap_or(NOT_AVAILABLE),
                TOP_REASON_MAX_CHARS,
            ),
        ]);
    }
    table.to_string()
}

pub(crate) fn render_backup_list(entries: &[EntryInfo]) -> String {
    let mut table = Table::new(
        "Available Backups",
        vec![
            ("Filename", Align::Left),
            ("Type", Align::Left),
            ("Created", Align::Left),
            ("Size", Align::Right),
            ("Items", Align::Right),
        ],
    );
    for info in entries {
        let item_count = info
            .metadata
            .get("item_count")
            .map_or_else(|| NOT_AVAILABLE.to_owned(), ToString::to_string);
        table.push_row(vec![
            info.entry_ref.file_name(),
            info.backup_type.clone(),
            format_date_time(&info.created_at),
            format!("{:.1} KB", info.size_bytes as f64 / 1024.0),
            item_count,
        ]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests;
