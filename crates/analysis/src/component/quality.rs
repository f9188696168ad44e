// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use plexiq_core::{MediaInfo, Resolution, Score};

use super::ComponentScore;

const LEGACY_CODEC_PENALTY: f64 = 0.3;

/// Low resolutions and legacy codecs score higher.
///
/// Both contributions are added and capped at the maximum.
#[must_use]
pub fn score(media_info: &MediaInfo) -> ComponentScore {
    let resolution = media_info.resolution();
    let resolution_score = match resolution {
        Resolution::Sd => 1.0,
        Resolution::Hd720 => 0.6,
        Resolution::Hd1080 => 0.3,
        Resolution::Uhd4k => 0.0,
        Resolution::Unknown => 0.5,
    };
    let (codec_penalty, codec_label) = match media_info.video_codec() {
        Some(codec) if codec.is_legacy() => {
            (LEGACY_CODEC_PENALTY, format!("{} (old codec)", codec.label()))
        }
        Some(codec) => (0.0, codec.label().to_owned()),
        None => (0.0, "unknown codec".to_owned()),
    };
    let value = (resolution_score + codec_penalty).min(Score::MAX_VALUE);
    ComponentScore::new(
        value,
        format!("Quality: {resolution}, {codec_label} → score {value:.2}"),
    )
}
