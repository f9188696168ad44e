// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::path::PathBuf;

use anyhow::Context as _;

use plexiq::{
    analysis::Scorer,
    core::util::clock::OffsetDateTimeMs,
    ledger::Ledger,
    usecases::{
        analyze::{Analysis, Params},
        source::JsonFileSource,
    },
};

use crate::{args::Command, config::Config};

mod analyze;
mod backup;
mod config;
mod delete;

/// Everything a command needs, resolved once at startup.
#[derive(Debug)]
pub(crate) struct Context {
    pub(crate) config: Config,
    pub(crate) config_file: PathBuf,
}

impl Context {
    pub(crate) fn open_ledger(&self) -> anyhow::Result<Ledger> {
        let dir = self.config.ledger_dir(crate::default_data_dir)?;
        Ledger::open(&dir)
            .with_context(|| format!("failed to open backup directory {}", dir.display()))
    }

    /// Score all records of a JSON file with the configured scorer.
    fn analyze_file(
        &self,
        ledger: &Ledger,
        input: PathBuf,
        as_of: OffsetDateTimeMs,
        top_n: &[usize],
    ) -> anyhow::Result<(Scorer, Analysis)> {
        let scorer = Scorer::new(self.config.scoring)?;
        let mut source = JsonFileSource::new(input);
        let mut params = Params::new(as_of);
        if !top_n.is_empty() {
            params.top_n = top_n.to_vec();
        }
        let analysis = plexiq::usecases::analyze::analyze(&scorer, &mut source, ledger, &params)?;
        log::info!(
            "Backed up metadata as {} and analysis as {}",
            analysis.metadata_entry.file_name(),
            analysis.analysis_entry.file_name()
        );
        Ok((scorer, analysis))
    }
}

pub(crate) fn run(context: &Context, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Analyze(args) => analyze::run(context, args),
        Command::Delete(args) => delete::run(context, args),
        Command::Backup(command) => backup::run(context, command),
        Command::Config(command) => config::run(context, command),
    }
}
