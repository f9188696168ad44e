// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    cmp::Ordering,
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use jiff::Timestamp;
use serde::Serialize;
use serde_json::Value;

use plexiq_core::util::clock::{OffsetDateTimeMs, UtcDateTimeMs};

use crate::{
    BackupEntry, Checksum, EntryInfo, EntryRef, Error, Metadata, RestoredEntry, Result,
    entry::EntryHeader, validate_type_tag,
};

const ENTRY_FILE_EXTENSION: &str = "json";

const PARTIAL_FILE_SUFFIX: &str = ".partial";

/// Collisions within the same microsecond are resolved by a counter suffix.
const MAX_COLLISION_SUFFIX: u32 = 1_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneOutcome {
    pub deleted_count: usize,
    pub reclaimed_bytes: u64,
}

/// A directory of backup entries.
///
/// The ledger is the single writer of its directory. Each entry is
/// written into a new, uniquely named file.
#[derive(Debug, Clone)]
pub struct Ledger {
    dir: PathBuf,
}

impl Ledger {
    /// Open a ledger, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        log::debug!("Opened backup ledger in {}", dir.display());
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve a bare file name relative to the ledger directory.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() || path.exists() || path.components().count() > 1 {
            path.to_path_buf()
        } else {
            self.dir.join(path)
        }
    }

    pub fn persist<T>(&self, data: &T, backup_type: &str, metadata: Metadata) -> Result<EntryRef>
    where
        T: Serialize + ?Sized,
    {
        self.persist_at(data, backup_type, metadata, OffsetDateTimeMs::now_utc())
    }

    /// Persist an entry with an explicit creation time.
    ///
    /// The returned reference points to a file that has been fully
    /// written and synced to disk.
    pub fn persist_at<T>(
        &self,
        data: &T,
        backup_type: &str,
        metadata: Metadata,
        created_at: OffsetDateTimeMs,
    ) -> Result<EntryRef>
    where
        T: Serialize + ?Sized,
    {
        validate_type_tag(backup_type)?;
        let data = serde_json::to_value(data)?;
        let checksum = Checksum::of_value(&data);
        let entry = BackupEntry {
            created_at,
            backup_type: backup_type.to_owned(),
            metadata,
            data,
            checksum,
        };
        let bytes = serde_json::to_vec_pretty(&entry)?;
        let file_stem = entry_file_stem(backup_type, created_at.to_utc());
        let path = self.write_new_file(&file_stem, &bytes)?;
        log::info!(
            "Created backup {} (checksum {}...)",
            path.display(),
            entry.checksum.short()
        );
        Ok(EntryRef::new(path))
    }

    fn write_new_file(&self, file_stem: &str, bytes: &[u8]) -> Result<PathBuf> {
        for counter in 0..=MAX_COLLISION_SUFFIX {
            let file_name = if counter == 0 {
                format!("{file_stem}.{ENTRY_FILE_EXTENSION}")
            } else {
                format!("{file_stem}_{counter}.{ENTRY_FILE_EXTENSION}")
            };
            let path = self.dir.join(&file_name);
            if path.exists() {
                continue;
            }
            let partial_path = self.dir.join(format!("{file_name}{PARTIAL_FILE_SUFFIX}"));
            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&partial_path)
            {
                Ok(file) => file,
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(err) => return Err(err.into()),
            };
            let written = file.write_all(bytes).and_then(|()| file.sync_all());
            drop(file);
            let written = written.and_then(|()| fs::rename(&partial_path, &path));
            if let Err(err) = written {
                log::warn!(
                    "Failed to write backup file {}: {err}",
                    partial_path.display()
                );
                if let Err(err) = fs::remove_file(&partial_path) {
                    log::debug!("Failed to remove {}: {err}", partial_path.display());
                }
                return Err(err.into());
            }
            sync_dir(&self.dir)?;
            return Ok(path);
        }
        Err(anyhow::anyhow!("no unique file name available for {file_stem}").into())
    }

    /// Load an entry and optionally verify its checksum.
    ///
    /// With `verify` enabled a mismatch results in [`Error::Integrity`].
    pub fn restore(&self, path: &Path, verify: bool) -> Result<RestoredEntry> {
        let path = self.resolve(path);
        let bytes = read_entry_file(&path)?;
        let entry: BackupEntry =
            serde_json::from_slice(&bytes).map_err(|err| Error::Malformed {
                path: path.clone(),
                reason: err.to_string(),
            })?;
        if verify {
            let actual = entry.compute_checksum();
            if actual != entry.checksum {
                log::error!(
                    "Checksum mismatch in {}: expected {}..., actual {}...",
                    path.display(),
                    entry.checksum.short(),
                    actual.short()
                );
                return Err(Error::Integrity {
                    path,
                    expected: entry.checksum,
                    actual,
                });
            }
            log::debug!("Verified integrity of {}", path.display());
        }
        log::info!("Restored backup {}", path.display());
        Ok(RestoredEntry {
            entry,
            verified: verify,
        })
    }

    /// List entries, newest first.
    ///
    /// Unreadable files are skipped with a warning.
    pub fn list(&self, backup_type: Option<&str>, limit: Option<usize>) -> Result<Vec<EntryInfo>> {
        let mut infos = Vec::new();
        for path in self.entry_file_paths()? {
            let info = match read_entry_info(&path) {
                Ok(info) => info,
                Err(err) => {
                    log::warn!("Skipping unreadable backup {}: {err}", path.display());
                    continue;
                }
            };
            if backup_type.is_some_and(|backup_type| backup_type != info.backup_type) {
                continue;
            }
            infos.push(info);
        }
        infos.sort_by(cmp_newest_first);
        if let Some(limit) = limit {
            infos.truncate(limit);
        }
        Ok(infos)
    }

    /// Delete all entries older than `retention_days`.
    pub fn prune(&self, retention_days: u32) -> Result<PruneOutcome> {
        let cutoff = UtcDateTimeMs::now().days_before(retention_days);
        log::info!("Pruning backups older than {retention_days} day(s)");
        self.prune_before(cutoff)
    }

    /// Delete all entries created before `cutoff`.
    ///
    /// The file modification time is used for entries that cannot be read.
    pub fn prune_before(&self, cutoff: UtcDateTimeMs) -> Result<PruneOutcome> {
        let mut outcome = PruneOutcome::default();
        for path in self.entry_file_paths()? {
            let (created_at, size_bytes) = match read_entry_info(&path) {
                Ok(info) => (info.created_at.to_utc(), info.size_bytes),
                Err(err) => {
                    log::debug!(
                        "Using modification time of unreadable backup {}: {err}",
                        path.display()
                    );
                    match file_modified_at(&path) {
                        Ok(modified) => modified,
                        Err(err) => {
                            log::warn!("Skipping backup {}: {err}", path.display());
                            continue;
                        }
                    }
                }
            };
            if created_at >= cutoff {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => {
                    log::debug!("Deleted old backup {}", path.display());
                    outcome.deleted_count += 1;
                    outcome.reclaimed_bytes += size_bytes;
                }
                Err(err) => {
                    log::error!("Failed to delete backup {}: {err}", path.display());
                }
            }
        }
        if outcome.deleted_count > 0 {
            log::info!(
                "Pruned {} old backup(s), reclaimed {:.1} KiB",
                outcome.deleted_count,
                outcome.reclaimed_bytes as f64 / 1024.0
            );
        }
        Ok(outcome)
    }

    /// Copy an entry file to `destination`, which may be a directory.
    pub fn export(&self, path: &Path, destination: &Path) -> Result<PathBuf> {
        let path = self.resolve(path);
        if !path.is_file() {
            return Err(Error::NotFound(path));
        }
        let destination = if destination.is_dir() {
            match path.file_name() {
                Some(file_name) => destination.join(file_name),
                None => return Err(Error::NotFound(path)),
            }
        } else {
            destination.to_path_buf()
        };
        fs::copy(&path, &destination)?;
        log::info!(
            "Exported backup {} to {}",
            path.display(),
            destination.display()
        );
        Ok(destination)
    }

    /// Record an operation on a set of items.
    ///
    /// The entry type is `<operation>_dryrun` or `<operation>_executed`.
    /// The metadata contains the operation, the dry-run flag, and the
    /// number of items, followed by `extra`.
    pub fn operation_record<T: Serialize>(
        &self,
        operation: &str,
        items: &[T],
        dry_run: bool,
        extra: Metadata,
    ) -> Result<EntryRef> {
        let backup_type = operation_type(operation, dry_run);
        let mut metadata = Metadata::new();
        metadata.insert("operation".to_owned(), operation.into());
        metadata.insert("dry_run".to_owned(), dry_run.into());
        metadata.insert("item_count".to_owned(), items.len().into());
        metadata.extend(extra);
        self.persist(items, &backup_type, metadata)
    }

    fn entry_file_paths(&self) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for dir_entry in fs::read_dir(&self.dir)? {
            let path = dir_entry?.path();
            if path.is_file()
                && path
                    .extension()
                    .is_some_and(|extension| extension == ENTRY_FILE_EXTENSION)
            {
                paths.push(path);
            }
        }
        Ok(paths)
    }
}

#[must_use]
pub fn operation_type(operation: &str, dry_run: bool) -> String {
    let suffix = if dry_run { "dryrun" } else { "executed" };
    format!("{operation}_{suffix}")
}

/// `<type>_<YYYYMMDDTHHMMSS.ffffff>Z`
fn entry_file_stem(backup_type: &str, created_at: UtcDateTimeMs) -> String {
    let timestamp = created_at.to_timestamp();
    format!(
        "{backup_type}_{}.{:06}Z",
        timestamp.strftime("%Y%m%dT%H%M%S"),
        timestamp.subsec_microsecond()
    )
}

/// Persist a rename within the directory.
fn sync_dir(dir: &Path) -> io::Result<()> {
    // Directories cannot be opened as files on Windows
    if cfg!(unix) {
        fs::File::open(dir)?.sync_all()
    } else {
        Ok(())
    }
}

fn read_entry_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            Error::NotFound(path.to_path_buf())
        } else {
            err.into()
        }
    })
}

fn read_entry_info(path: &Path) -> Result<EntryInfo> {
    let bytes = read_entry_file(path)?;
    let header: EntryHeader = serde_json::from_slice(&bytes).map_err(|err| Error::Malformed {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    let EntryHeader {
        created_at,
        backup_type,
        metadata,
    } = header;
    Ok(EntryInfo {
        entry_ref: EntryRef::new(path.to_path_buf()),
        created_at,
        backup_type,
        metadata,
        size_bytes: bytes.len() as u64,
    })
}

fn file_modified_at(path: &Path) -> Result<(UtcDateTimeMs, u64)> {
    let file_metadata = fs::metadata(path)?;
    let modified = Timestamp::try_from(file_metadata.modified()?).map_err(anyhow::Error::from)?;
    Ok((modified.into(), file_metadata.len()))
}

fn cmp_newest_first(lhs: &EntryInfo, rhs: &EntryInfo) -> Ordering {
    rhs.created_at
        .to_utc()
        .cmp(&lhs.created_at.to_utc())
        .then_with(|| rhs.entry_ref.path().cmp(lhs.entry_ref.path()))
}

/// Convenience for building metadata from key/value pairs.
#[must_use]
pub fn metadata<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Metadata
where
    K: Into<String>,
    V: Into<Value>,
{
    entries
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}
