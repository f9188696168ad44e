// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, str::FromStr};

use anyhow::Context as _;
use jiff::{
    Timestamp, Zoned,
    civil::{DateTime, Time},
    fmt::temporal::Pieces,
    tz::{Offset, TimeZone},
};

pub type TimestampMillis = i64;

pub const MILLIS_PER_DAY: TimestampMillis = 24 * 60 * 60 * 1_000;

/// A UTC instant, truncated to milliseconds.
///
/// Used for comparing and shifting instants. Ages and retention are
/// measured in whole days.
#[derive(Clone, Debug, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTimeMs {
    unix_timestamp_millis: TimestampMillis,
}

impl UtcDateTimeMs {
    #[must_use]
    pub const fn from_unix_timestamp_millis(unix_timestamp_millis: TimestampMillis) -> Self {
        Self {
            unix_timestamp_millis,
        }
    }

    #[must_use]
    pub const fn unix_timestamp_millis(&self) -> TimestampMillis {
        self.unix_timestamp_millis
    }

    #[must_use]
    pub fn now() -> Self {
        Timestamp::now().into()
    }

    /// Convert into a [`Timestamp`], saturating at the supported range.
    #[must_use]
    pub fn to_timestamp(&self) -> Timestamp {
        Timestamp::from_millisecond(self.unix_timestamp_millis).unwrap_or(
            if self.unix_timestamp_millis < 0 {
                Timestamp::MIN
            } else {
                Timestamp::MAX
            },
        )
    }

    /// Shift backwards by a number of whole days.
    #[must_use]
    pub const fn days_before(self, days: u32) -> Self {
        Self::from_unix_timestamp_millis(
            self.unix_timestamp_millis - days as TimestampMillis * MILLIS_PER_DAY,
        )
    }

    /// Number of whole days that have elapsed since `earlier`.
    ///
    /// Rounds towards negative infinity, i.e. a partial day does not
    /// count and an `earlier` timestamp from the future yields a
    /// negative number.
    #[must_use]
    pub const fn whole_days_since(self, earlier: Self) -> i64 {
        (self.unix_timestamp_millis - earlier.unix_timestamp_millis).div_euclid(MILLIS_PER_DAY)
    }
}

impl From<Timestamp> for UtcDateTimeMs {
    fn from(from: Timestamp) -> Self {
        Self::from_unix_timestamp_millis(from.as_millisecond())
    }
}

impl fmt::Display for UtcDateTimeMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_timestamp().fmt(f)
    }
}

/// An instant together with the UTC offset it was observed in.
///
/// Formatted and parsed as ISO 8601. Input without an offset is
/// read as UTC and input without a time as midnight.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct OffsetDateTimeMs {
    utc_date_time: UtcDateTimeMs,
    utc_offset_secs: i32,
}

impl OffsetDateTimeMs {
    #[must_use]
    pub const fn from_utc(utc_date_time: UtcDateTimeMs) -> Self {
        Self {
            utc_date_time,
            utc_offset_secs: 0,
        }
    }

    #[must_use]
    pub const fn from_unix_timestamp_millis(unix_timestamp_millis: TimestampMillis) -> Self {
        Self::from_utc(UtcDateTimeMs::from_unix_timestamp_millis(
            unix_timestamp_millis,
        ))
    }

    #[must_use]
    pub const fn unix_timestamp_millis(&self) -> TimestampMillis {
        self.utc_date_time.unix_timestamp_millis()
    }

    #[must_use]
    pub fn now_utc() -> Self {
        Self::from_utc(UtcDateTimeMs::now())
    }

    #[must_use]
    pub fn now_local() -> Self {
        Zoned::now().into()
    }

    #[must_use]
    pub const fn to_utc(&self) -> UtcDateTimeMs {
        self.utc_date_time
    }

    /// The offset, or UTC if the stored seconds are out of range.
    #[must_use]
    pub fn offset(&self) -> Offset {
        Offset::from_seconds(self.utc_offset_secs).unwrap_or(Offset::UTC)
    }

    /// Number of whole days that have elapsed since `earlier`.
    #[must_use]
    pub const fn whole_days_since(&self, earlier: &Self) -> i64 {
        self.utc_date_time.whole_days_since(earlier.utc_date_time)
    }
}

impl From<Zoned> for OffsetDateTimeMs {
    fn from(from: Zoned) -> Self {
        Self {
            utc_date_time: from.timestamp().into(),
            utc_offset_secs: from.offset().seconds(),
        }
    }
}

impl FromStr for OffsetDateTimeMs {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let pieces = Pieces::parse(input)?;
        let offset = pieces.to_numeric_offset().unwrap_or(Offset::UTC);
        let time = pieces.time().unwrap_or(Time::midnight());
        let zoned = DateTime::from_parts(pieces.date(), time)
            .to_zoned(TimeZone::fixed(offset))
            .with_context(|| format!("invalid date/time: {input}"))?;
        Ok(zoned.into())
    }
}

impl fmt::Display for OffsetDateTimeMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timestamp = self.utc_date_time.to_timestamp();
        if self.utc_offset_secs == 0 {
            // Zulu
            timestamp.fmt(f)
        } else {
            timestamp.display_with_offset(self.offset()).fmt(f)
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for OffsetDateTimeMs {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for OffsetDateTimeMs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let input = String::deserialize(deserializer)?;
        input.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests;
