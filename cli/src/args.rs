// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(name = "plexiq", version, about = "Deletion scoring and audit for media libraries")]
pub(crate) struct Cli {
    /// Configuration file [default: config.ron in the configuration directory]
    #[arg(long, global = true, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// More log output, repeat for even more
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub(crate) verbose: u8,

    /// Less log output, repeat for even less
    #[arg(short, long, global = true, action = clap::ArgAction::Count, conflicts_with = "verbose")]
    pub(crate) quiet: u8,

    #[command(subcommand)]
    pub(crate) command: Command,
}

impl Cli {
    /// Adjust the default log level by the verbosity flags.
    #[must_use]
    pub(crate) fn log_level_filter(&self, default: LevelFilter) -> LevelFilter {
        const LEVELS: [LevelFilter; 6] = [
            LevelFilter::Off,
            LevelFilter::Error,
            LevelFilter::Warn,
            LevelFilter::Info,
            LevelFilter::Debug,
            LevelFilter::Trace,
        ];
        let index = (default as usize + usize::from(self.verbose))
            .saturating_sub(usize::from(self.quiet))
            .min(LEVELS.len() - 1);
        LEVELS[index]
    }
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Score and rank all items of a metadata export
    Analyze(AnalyzeArgs),

    /// Delete recommended items (dry-run unless --execute and --confirm are given)
    Delete(DeleteArgs),

    /// Manage backups and operation records
    #[command(subcommand)]
    Backup(BackupCommand),

    /// Show, validate, or initialize the configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Report,
    Json,
}

#[derive(Debug, Args)]
pub(crate) struct AnalyzeArgs {
    /// JSON file with metadata records
    pub(crate) input: PathBuf,

    /// Show all items instead of only recommended deletions
    #[arg(long)]
    pub(crate) show_all: bool,

    /// Maximum number of items to display
    #[arg(long)]
    pub(crate) limit: Option<usize>,

    #[arg(long, value_enum, default_value_t)]
    pub(crate) format: OutputFormat,

    /// Save all analysis results into a JSON file
    #[arg(long, value_name = "FILE")]
    pub(crate) output: Option<PathBuf>,

    /// Cut-offs for space recovery estimates [default: 50 100 200]
    #[arg(long = "top", value_name = "N")]
    pub(crate) top_n: Vec<usize>,
}

#[derive(Debug, Args)]
pub(crate) struct DeleteArgs {
    /// JSON file with metadata records or analysis results
    pub(crate) input: PathBuf,

    /// Minimum deletion score, overrides the configuration
    #[arg(long)]
    pub(crate) min_score: Option<f64>,

    /// Request execution instead of a dry-run
    #[arg(long)]
    pub(crate) execute: bool,

    /// Confirm the requested execution
    #[arg(long)]
    pub(crate) confirm: bool,
}

#[derive(Debug, Subcommand)]
pub(crate) enum BackupCommand {
    /// List backups, newest first
    List {
        /// Only list backups of this type
        #[arg(long = "type", value_name = "TYPE")]
        backup_type: Option<String>,

        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Restore and verify a backup
    Restore {
        /// File name in the backup directory or path
        file: PathBuf,

        /// Skip checksum verification
        #[arg(long)]
        no_verify: bool,

        /// Export the backup file to a different location
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Remove backups older than the retention period
    Prune {
        /// Retention period, overrides the configuration
        #[arg(long)]
        days: Option<u32>,
    },
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub(crate) enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Validate the effective configuration
    Validate,

    /// Write the default configuration file unless it exists
    Init,
}
