// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{env, fmt, str::FromStr};

pub(crate) const WEIGHT_PLAY_COUNT_ENV: &str = "WEIGHT_PLAY_COUNT";
pub(crate) const WEIGHT_RATINGS_ENV: &str = "WEIGHT_RATINGS";
pub(crate) const WEIGHT_SIZE_ENV: &str = "WEIGHT_SIZE";
pub(crate) const WEIGHT_AGE_ENV: &str = "WEIGHT_AGE";
pub(crate) const WEIGHT_QUALITY_ENV: &str = "WEIGHT_QUALITY";
pub(crate) const MIN_DELETION_SCORE_ENV: &str = "MIN_DELETION_SCORE";
pub(crate) const NEVER_DELETE_RATING_THRESHOLD_ENV: &str = "NEVER_DELETE_RATING_THRESHOLD";
pub(crate) const BACKUP_DIR_ENV: &str = "BACKUP_DIR";
pub(crate) const BACKUP_RETENTION_DAYS_ENV: &str = "BACKUP_RETENTION_DAYS";
pub(crate) const DRY_RUN_DEFAULT_ENV: &str = "DRY_RUN_DEFAULT";

pub(crate) fn init_environment() {
    if let Ok(path) = dotenvy::dotenv() {
        // Print to stderr because logging has not been initialized yet
        eprintln!("Loaded environment from dotenv file {}", path.display());
    }
}

/// Read a variable from the process environment.
pub(crate) fn lookup_var(name: &str) -> Option<String> {
    env::var(name).ok()
}

/// Parse an optional variable.
///
/// Blank values are treated as absent, unparsable values are
/// rejected.
pub(crate) fn parse_var<T>(
    lookup: impl Fn(&str) -> Option<String>,
    name: &str,
) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let Some(var) = lookup(name) else {
        return Ok(None);
    };
    log::debug!("{name} = {var}");
    let var = var.trim();
    if var.is_empty() {
        return Ok(None);
    }
    var.parse()
        .map(Some)
        .map_err(|err| anyhow::anyhow!("failed to parse {name} = {var}: {err}"))
}

pub(crate) fn parse_bool_var(var: &str) -> Option<bool> {
    var.to_lowercase().parse::<bool>().ok().or_else(|| {
        match var.parse::<u8>().ok()? {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        }
    })
}

pub(crate) fn parse_bool(
    lookup: impl Fn(&str) -> Option<String>,
    name: &str,
) -> anyhow::Result<Option<bool>> {
    let Some(var) = lookup(name) else {
        return Ok(None);
    };
    log::debug!("{name} = {var}");
    let var = var.trim();
    if var.is_empty() {
        return Ok(None);
    }
    parse_bool_var(var).map(Some).ok_or_else(|| {
        anyhow::anyhow!("failed to parse {name} = {var}: expected true/false or 1/0")
    })
}
