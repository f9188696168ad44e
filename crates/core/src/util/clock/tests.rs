// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[test]
fn parse_with_zulu_offset() {
    let parsed = "2024-03-01T12:00:00Z".parse::<OffsetDateTimeMs>().unwrap();
    assert_eq!(
        "2024-03-01T12:00:00Z".parse::<Timestamp>().unwrap(),
        parsed.to_utc().to_timestamp()
    );
    assert_eq!("2024-03-01T12:00:00Z", parsed.to_string());
}

#[test]
fn parse_with_numeric_offset() {
    let parsed = "2024-03-01T12:00:00+02:00"
        .parse::<OffsetDateTimeMs>()
        .unwrap();
    assert_eq!(
        "2024-03-01T10:00:00Z".parse::<Timestamp>().unwrap(),
        parsed.to_utc().to_timestamp()
    );
    assert_eq!("2024-03-01T12:00:00+02:00", parsed.to_string());
}

#[test]
fn parse_without_offset_as_utc() {
    let naive = "2024-03-01T12:00:00.123456"
        .parse::<OffsetDateTimeMs>()
        .unwrap();
    let zulu = "2024-03-01T12:00:00.123Z"
        .parse::<OffsetDateTimeMs>()
        .unwrap();
    assert_eq!(zulu, naive);
}

#[test]
fn parse_date_only_as_midnight() {
    let date_only = "2024-03-01".parse::<OffsetDateTimeMs>().unwrap();
    let midnight = "2024-03-01T00:00:00Z"
        .parse::<OffsetDateTimeMs>()
        .unwrap();
    assert_eq!(midnight, date_only);
}

#[test]
fn parse_malformed() {
    assert!("".parse::<OffsetDateTimeMs>().is_err());
    assert!("yesterday".parse::<OffsetDateTimeMs>().is_err());
    assert!("2024-13-45T99:00:00Z".parse::<OffsetDateTimeMs>().is_err());
}

#[test]
fn whole_days_since() {
    let earlier = "2024-01-01T00:00:00Z".parse::<OffsetDateTimeMs>().unwrap();
    let later = "2024-01-31T23:59:59Z".parse::<OffsetDateTimeMs>().unwrap();
    assert_eq!(30, later.whole_days_since(&earlier));
    assert_eq!(-31, earlier.whole_days_since(&later));
    assert_eq!(0, earlier.whole_days_since(&earlier));
}

#[test]
fn days_before() {
    let now = UtcDateTimeMs::from_unix_timestamp_millis(10 * MILLIS_PER_DAY);
    assert_eq!(
        UtcDateTimeMs::from_unix_timestamp_millis(3 * MILLIS_PER_DAY),
        now.days_before(7)
    );
    assert_eq!(7, now.whole_days_since(now.days_before(7)));
}

#[test]
fn out_of_range_millis_saturate() {
    assert_eq!(
        Timestamp::MAX,
        UtcDateTimeMs::from_unix_timestamp_millis(TimestampMillis::MAX).to_timestamp()
    );
    assert_eq!(
        Timestamp::MIN,
        UtcDateTimeMs::from_unix_timestamp_millis(TimestampMillis::MIN).to_timestamp()
    );
}

#[cfg(feature = "serde")]
#[test]
fn serde_as_iso_8601_string() {
    let parsed = "2024-03-01T12:00:00+02:00"
        .parse::<OffsetDateTimeMs>()
        .unwrap();
    let json = serde_json::to_value(parsed).unwrap();
    assert_eq!(serde_json::json!("2024-03-01T12:00:00+02:00"), json);
    assert_eq!(parsed, serde_json::from_value(json).unwrap());
    assert!(serde_json::from_value::<OffsetDateTimeMs>(serde_json::json!("soon")).is_err());
}
