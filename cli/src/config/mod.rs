// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use semval::prelude::*;
use serde::{Deserialize, Serialize};

use plexiq::analysis::{ScoringConfig, config::ScoringConfigInvalidity};

use crate::env::{
    BACKUP_DIR_ENV, BACKUP_RETENTION_DAYS_ENV, DRY_RUN_DEFAULT_ENV, MIN_DELETION_SCORE_ENV,
    NEVER_DELETE_RATING_THRESHOLD_ENV, WEIGHT_AGE_ENV, WEIGHT_PLAY_COUNT_ENV,
    WEIGHT_QUALITY_ENV, WEIGHT_RATINGS_ENV, WEIGHT_SIZE_ENV, parse_bool, parse_var,
};

pub(crate) const CONFIG_FILE_NAME: &str = "config.ron";

const DEFAULT_BACKUP_DIR_NAME: &str = "backups";

pub(crate) const DEFAULT_RETENTION_DAYS: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct LedgerConfig {
    /// Defaults to a subdirectory of the data directory.
    pub(crate) dir: Option<PathBuf>,

    pub(crate) retention_days: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            dir: None,
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) dry_run_default: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dry_run_default: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) scoring: ScoringConfig,
    pub(crate) ledger: LedgerConfig,
    pub(crate) app: AppConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display)]
pub(crate) enum ConfigInvalidity {
    Scoring(ScoringConfigInvalidity),

    #[display("retention_days must be at least 1")]
    RetentionDaysZero,
}

impl Validate for Config {
    type Invalidity = ConfigInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self {
            scoring,
            ledger,
            app: _,
        } = self;
        ValidationContext::new()
            .validate_with(scoring, Self::Invalidity::Scoring)
            .invalidate_if(
                ledger.retention_days == 0,
                Self::Invalidity::RetentionDaysZero,
            )
            .into()
    }
}

impl Config {
    /// Override file values with environment variables.
    ///
    /// Fails on the first variable that is present but unparsable.
    pub(crate) fn apply_env_overrides(
        &mut self,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> anyhow::Result<()> {
        let weights = &mut self.scoring.weights;
        for (name, weight) in [
            (WEIGHT_PLAY_COUNT_ENV, &mut weights.play_count),
            (WEIGHT_RATINGS_ENV, &mut weights.ratings),
            (WEIGHT_SIZE_ENV, &mut weights.size),
            (WEIGHT_AGE_ENV, &mut weights.age),
            (WEIGHT_QUALITY_ENV, &mut weights.quality),
        ] {
            if let Some(value) = parse_var(lookup, name)? {
                *weight = value;
            }
        }
        let thresholds = &mut self.scoring.thresholds;
        if let Some(value) = parse_var(lookup, MIN_DELETION_SCORE_ENV)? {
            thresholds.min_deletion_score = value;
        }
        if let Some(value) = parse_var(lookup, NEVER_DELETE_RATING_THRESHOLD_ENV)? {
            thresholds.never_delete_rating = value;
        }
        if let Some(dir) = parse_var::<PathBuf>(lookup, BACKUP_DIR_ENV)? {
            self.ledger.dir = Some(dir);
        }
        if let Some(days) = parse_var(lookup, BACKUP_RETENTION_DAYS_ENV)? {
            self.ledger.retention_days = days;
        }
        if let Some(dry_run_default) = parse_bool(lookup, DRY_RUN_DEFAULT_ENV)? {
            self.app.dry_run_default = dry_run_default;
        }
        Ok(())
    }

    /// Collect all invalidities as a single error.
    pub(crate) fn check(&self) -> anyhow::Result<()> {
        self.validate().map_err(|err| {
            let reasons = err
                .into_iter()
                .map(|invalidity| invalidity.to_string())
                .collect::<Vec<_>>();
            anyhow::anyhow!("invalid configuration: {}", reasons.join("; "))
        })
    }

    /// The configured backup directory or the default inside the data directory.
    pub(crate) fn ledger_dir(
        &self,
        data_dir: impl FnOnce() -> anyhow::Result<PathBuf>,
    ) -> anyhow::Result<PathBuf> {
        if let Some(dir) = &self.ledger.dir {
            return Ok(dir.clone());
        }
        data_dir().map(|data_dir| data_dir.join(DEFAULT_BACKUP_DIR_NAME))
    }
}

/// Load the configuration file.
///
/// A missing file results in the default configuration. The result
/// is not validated.
pub(crate) fn load_config(file_path: &Path) -> anyhow::Result<Config> {
    log::info!("Loading configuration from file: {}", file_path.display());
    match fs::read_to_string(file_path) {
        Ok(text) => ron::from_str(&text).with_context(|| {
            format!(
                "failed to parse configuration file {}",
                file_path.display()
            )
        }),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::info!("Configuration file not found, using defaults");
            Ok(Config::default())
        }
        Err(err) => Err(err).with_context(|| {
            format!("failed to read configuration file {}", file_path.display())
        }),
    }
}

pub(crate) fn save_config(file_path: &Path, config: &Config) -> anyhow::Result<()> {
    log::info!("Saving configuration into file: {}", file_path.display());
    let text = ron::ser::to_string_pretty(config, ron::ser::PrettyConfig::default())
        .context("failed to encode configuration")?;
    if let Some(parent_path) = file_path.parent() {
        fs::create_dir_all(parent_path).with_context(|| {
            format!(
                "failed to create parent directories for {}",
                file_path.display()
            )
        })?;
    }
    fs::write(file_path, text)
        .with_context(|| format!("failed to write configuration file {}", file_path.display()))
}
