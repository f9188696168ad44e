// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use anyhow::{Context as _, bail};

use super::Context;
use crate::{
    args::ConfigCommand,
    config::{Config, save_config},
};

pub(super) fn run(context: &Context, command: ConfigCommand) -> anyhow::Result<()> {
    let Context {
        config,
        config_file,
    } = context;
    match command {
        ConfigCommand::Show => {
            println!("Configuration file: {}", config_file.display());
            match config.ledger_dir(crate::default_data_dir) {
                Ok(dir) => println!("Backup directory: {}", dir.display()),
                Err(err) => println!("Backup directory: unavailable ({err:#})"),
            }
            let text = ron::ser::to_string_pretty(config, ron::ser::PrettyConfig::default())
                .context("failed to encode configuration")?;
            println!("{text}");
            if let Err(err) = config.check() {
                log::warn!("{err:#}");
            }
        }
        ConfigCommand::Validate => {
            config.check()?;
            if !config.app.dry_run_default {
                log::warn!(
                    "dry_run_default = false has no effect, deletion always requires --execute and --confirm"
                );
            }
            println!("Configuration is valid");
        }
        ConfigCommand::Init => {
            if config_file.exists() {
                bail!(
                    "configuration file {} already exists",
                    config_file.display()
                );
            }
            save_config(config_file, &Config::default())?;
            println!("Configuration file created: {}", config_file.display());
        }
    }
    Ok(())
}
