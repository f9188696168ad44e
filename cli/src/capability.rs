// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fs;

use anyhow::{Context as _, bail};

use plexiq::{core::MetadataRecord, usecases::delete::DeletionCapability};

/// Deletes items by removing their media files from the file system.
#[derive(Debug, Default)]
pub(crate) struct FileRemoval {
    removed_file_count: usize,
}

impl FileRemoval {
    pub(crate) const fn removed_file_count(&self) -> usize {
        self.removed_file_count
    }
}

impl DeletionCapability for FileRemoval {
    fn delete(&mut self, record: &MetadataRecord) -> anyhow::Result<()> {
        let files = &record.media_info.files;
        if files.is_empty() {
            bail!("no media files known for '{}'", record.display_title());
        }
        // All files must exist before the first one is removed.
        if let Some(missing) = files.iter().find(|path| !path.is_file()) {
            bail!("media file not found: {}", missing.display());
        }
        for path in files {
            fs::remove_file(path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
            log::info!("[ACTION] Removed file: {}", path.display());
            self.removed_file_count += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use plexiq::core::MediaInfo;

    use super::*;

    fn record_with_files(files: Vec<PathBuf>) -> MetadataRecord {
        MetadataRecord {
            media_info: MediaInfo {
                files,
                ..Default::default()
            },
            ..MetadataRecord::new("1", "Some Movie")
        }
    }

    #[test]
    fn removes_all_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let files = vec![
            temp_dir.path().join("part1.mkv"),
            temp_dir.path().join("part2.mkv"),
        ];
        for path in &files {
            fs::write(path, b"video").unwrap();
        }
        let mut capability = FileRemoval::default();
        capability.delete(&record_with_files(files.clone())).unwrap();
        assert_eq!(2, capability.removed_file_count());
        assert!(files.iter().all(|path| !path.exists()));
    }

    #[test]
    fn fails_without_known_files() {
        let mut capability = FileRemoval::default();
        let err = capability.delete(&record_with_files(vec![])).unwrap_err();
        assert!(err.to_string().contains("no media files"));
    }

    #[test]
    fn missing_file_removes_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let existing = temp_dir.path().join("part1.mkv");
        fs::write(&existing, b"video").unwrap();
        let mut capability = FileRemoval::default();
        let result = capability.delete(&record_with_files(vec![
            existing.clone(),
            temp_dir.path().join("part2.mkv"),
        ]));
        assert!(result.is_err());
        assert!(existing.exists());
        assert_eq!(0, capability.removed_file_count());
    }
}
