// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context as _, bail};
use clap::Parser as _;
use directories::ProjectDirs;
use log::LevelFilter;

mod args;
use self::args::{Cli, Command};

mod capability;
mod command;
mod config;
mod env;
mod output;

/// Default log level for debug builds.
#[cfg(debug_assertions)]
const DEFAULT_LOG_FILTER_LEVEL: LevelFilter = LevelFilter::Info;

/// Reduce log verbosity for release builds.
#[cfg(not(debug_assertions))]
const DEFAULT_LOG_FILTER_LEVEL: LevelFilter = LevelFilter::Warn;

const APP_NAME: &str = "plexiq";

#[must_use]
fn app_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

fn init_app_dir(app_dir: &Path) {
    if let Err(err) = std::fs::create_dir_all(app_dir) {
        log::error!(
            "Failed to create app directory '{dir}': {err}",
            dir = app_dir.display(),
        );
    } else {
        debug_assert!(app_dir.exists());
    }
}

#[must_use]
fn app_config_dir() -> Option<PathBuf> {
    let app_dirs = app_dirs()?;
    let app_config_dir = app_dirs.config_local_dir();
    init_app_dir(app_config_dir);
    Some(app_config_dir.to_path_buf())
}

#[must_use]
fn app_data_dir() -> Option<PathBuf> {
    let app_dirs = app_dirs()?;
    let app_data_dir = app_dirs.data_local_dir();
    init_app_dir(app_data_dir);
    Some(app_data_dir.to_path_buf())
}

fn default_data_dir() -> anyhow::Result<PathBuf> {
    let Some(dir_path) = app_data_dir() else {
        bail!("default data directory is unavailable");
    };
    let readonly = dir_path
        .metadata()
        .map(|metadata| metadata.permissions().readonly())
        .context("metadata")?;
    if readonly {
        log::warn!(
            "Default data directory (read-only): {dir_path}",
            dir_path = dir_path.display()
        );
    }
    Ok(dir_path)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        config: config_file,
        command,
        ..
    } = cli;
    let config_file = match config_file {
        Some(config_file) => config_file,
        None => app_config_dir()
            .context("configuration directory is unavailable")?
            .join(config::CONFIG_FILE_NAME),
    };
    let mut config = config::load_config(&config_file)?;
    config
        .apply_env_overrides(&env::lookup_var)
        .context("invalid environment override")?;
    if !matches!(command, Command::Config(_)) {
        config.check()?;
    }
    let context = command::Context {
        config,
        config_file,
    };
    command::run(&context, command)
}

fn main() -> ExitCode {
    env::init_environment();

    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level_filter(DEFAULT_LOG_FILTER_LEVEL))
        // Parse environment variables after configuring all default option(s).
        .parse_default_env()
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
