// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::path::PathBuf;

use crate::util::bytes_to_gib;

/// Technical properties of the media files of an item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MediaInfo {
    /// Total size of all media parts.
    pub size_bytes: u64,

    /// Resolution label as reported by the media server, e.g. "sd", "720" or "4k".
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub resolution: Option<String>,

    /// Video codec label as reported by the media server, e.g. "h264" or "mpeg2video".
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub video_codec: Option<String>,

    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub duration_ms: Option<u64>,

    /// Paths of the media parts, if known.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub files: Vec<PathBuf>,
}

impl MediaInfo {
    #[must_use]
    pub fn size_gib(&self) -> f64 {
        bytes_to_gib(self.size_bytes)
    }

    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution
            .as_deref()
            .map_or(Resolution::Unknown, Resolution::classify)
    }

    #[must_use]
    pub fn video_codec(&self) -> Option<VideoCodec<'_>> {
        self.video_codec.as_deref().and_then(VideoCodec::classify)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, derive_more::Display)]
pub enum Resolution {
    #[display("SD/480p")]
    Sd,

    #[display("720p")]
    Hd720,

    #[display("1080p")]
    Hd1080,

    #[display("4K")]
    Uhd4k,

    #[display("unknown")]
    Unknown,
}

impl Resolution {
    /// Classify a free-form resolution label.
    #[must_use]
    pub fn classify(label: &str) -> Self {
        let label = label.trim().to_ascii_lowercase();
        if label.contains("sd") || label.contains("480") || label.contains("576") {
            Self::Sd
        } else if label.contains("720") {
            Self::Hd720
        } else if label.contains("1080") {
            Self::Hd1080
        } else if label.contains("4k") || label.contains("2160") {
            Self::Uhd4k
        } else {
            Self::Unknown
        }
    }
}

/// Codec families that are considered outdated.
const LEGACY_CODEC_PATTERNS: &[&str] = &["mpeg1", "mpeg2", "h263", "msmpeg4", "wmv"];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VideoCodec<'a> {
    label: &'a str,
    legacy: bool,
}

impl<'a> VideoCodec<'a> {
    /// Classify a codec label. Blank labels are treated as unknown.
    #[must_use]
    pub fn classify(label: &'a str) -> Option<Self> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        let lowercase = label.to_ascii_lowercase();
        let legacy = LEGACY_CODEC_PATTERNS
            .iter()
            .any(|pattern| lowercase.contains(pattern));
        Some(Self { label, legacy })
    }

    #[must_use]
    pub const fn label(&self) -> &'a str {
        self.label
    }

    #[must_use]
    pub const fn is_legacy(&self) -> bool {
        self.legacy
    }
}

#[cfg(test)]
mod tests;
