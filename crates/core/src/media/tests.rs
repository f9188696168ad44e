// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[test]
fn classify_resolution() {
    assert_eq!(Resolution::Sd, Resolution::classify("sd"));
    assert_eq!(Resolution::Sd, Resolution::classify("480"));
    assert_eq!(Resolution::Sd, Resolution::classify("576p"));
    assert_eq!(Resolution::Hd720, Resolution::classify("720"));
    assert_eq!(Resolution::Hd1080, Resolution::classify(" 1080p "));
    assert_eq!(Resolution::Uhd4k, Resolution::classify("4K"));
    assert_eq!(Resolution::Uhd4k, Resolution::classify("2160"));
    assert_eq!(Resolution::Unknown, Resolution::classify(""));
    assert_eq!(Resolution::Unknown, Resolution::classify("8k"));
}

#[test]
fn classify_codec() {
    assert!(VideoCodec::classify("").is_none());
    assert!(VideoCodec::classify("  ").is_none());
    assert!(!VideoCodec::classify("h264").unwrap().is_legacy());
    assert!(!VideoCodec::classify("hevc").unwrap().is_legacy());
    assert!(VideoCodec::classify("mpeg2video").unwrap().is_legacy());
    assert!(VideoCodec::classify("H263").unwrap().is_legacy());
    assert!(VideoCodec::classify("wmv3").unwrap().is_legacy());
    assert_eq!("hevc", VideoCodec::classify(" hevc").unwrap().label());
}

#[test]
fn media_info_accessors() {
    let media_info = MediaInfo {
        size_bytes: 3 * crate::util::BYTES_PER_GIB / 2,
        resolution: Some("1080".to_owned()),
        video_codec: None,
        ..Default::default()
    };
    assert!((media_info.size_gib() - 1.5).abs() < f64::EPSILON);
    assert_eq!(Resolution::Hd1080, media_info.resolution());
    assert!(media_info.video_codec().is_none());
    assert_eq!(Resolution::Unknown, MediaInfo::default().resolution());
}
