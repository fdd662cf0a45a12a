// Copyright 2015-2023 Swim Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Write;

use chrono::{FixedOffset, Offset, SecondsFormat, TimeZone, Utc};

const MICROS_PER_SECOND: i64 = 1_000_000;

/// A date-time value. Absolute and relative dates are distinct kinds and each is preserved
/// exactly when written in [`crate::OperationMode::Preserving`] mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateTime {
    Absolute(AbsoluteDate),
    Relative(RelativeDate),
}

/// A point in time with the UTC offset in which it was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AbsoluteDate {
    /// Seconds since the Unix epoch, in UTC.
    pub epoch_seconds: i64,
    /// Sub-second part, in the range `0..1_000_000`.
    pub microseconds: i32,
    /// Offset east of UTC, in seconds.
    pub utc_offset: i32,
}

/// A duration expressed in calendar fields. Fields are independent and may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RelativeDate {
    pub years: i32,
    pub months: i32,
    pub days: i32,
    pub hours: i32,
    pub minutes: i32,
    pub seconds: i32,
    pub microseconds: i32,
}

impl AbsoluteDate {
    pub fn new(epoch_seconds: i64, microseconds: i32, utc_offset: i32) -> Self {
        AbsoluteDate {
            epoch_seconds,
            microseconds,
            utc_offset,
        }
    }

    /// A UTC date from seconds and nanoseconds since the epoch. Nanoseconds are truncated to
    /// microseconds.
    pub fn from_timestamp(seconds: i64, nanoseconds: u32) -> Self {
        AbsoluteDate {
            epoch_seconds: seconds,
            microseconds: (nanoseconds / 1000) as i32,
            utc_offset: 0,
        }
    }

    /// Convert to a [`chrono::DateTime`] in the date's own offset. Returns [`None`] if any field is
    /// out of range.
    pub fn to_chrono(&self) -> Option<chrono::DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(self.utc_offset)?;
        let nanos = u32::try_from(self.microseconds)
            .ok()
            .filter(|us| i64::from(*us) < MICROS_PER_SECOND)?
            * 1000;
        let utc = Utc.timestamp_opt(self.epoch_seconds, nanos).single()?;
        Some(utc.with_timezone(&offset))
    }

    /// Render as `YYYY-MM-DDTHH:mm:SS[.ffffff]` in the date's offset, followed by `Z` for UTC or a
    /// `+HH:MM` offset. The fraction is only included when it is non-zero.
    pub fn to_iso8601(&self) -> Option<String> {
        let date = self.to_chrono()?;
        let format = if self.microseconds == 0 {
            SecondsFormat::Secs
        } else {
            SecondsFormat::Micros
        };
        Some(date.to_rfc3339_opts(format, true))
    }
}

impl<Tz: TimeZone> From<chrono::DateTime<Tz>> for AbsoluteDate {
    fn from(date: chrono::DateTime<Tz>) -> Self {
        let utc_offset = date.offset().fix().local_minus_utc();
        AbsoluteDate {
            epoch_seconds: date.timestamp(),
            microseconds: (date.timestamp_subsec_nanos() / 1000) as i32,
            utc_offset,
        }
    }
}

impl RelativeDate {
    /// Render as an ISO-8601 duration, e.g. `P1Y2M3DT4H5M6.000007S`. Zero fields are omitted and
    /// an entirely zero duration is `PT0S`.
    pub fn to_iso8601(&self) -> String {
        let RelativeDate {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
            microseconds,
        } = *self;
        let total_micros = i64::from(seconds) * MICROS_PER_SECOND + i64::from(microseconds);

        let mut out = String::from("P");
        for (n, unit) in [(years, 'Y'), (months, 'M'), (days, 'D')] {
            if n != 0 {
                let _ = write!(out, "{}{}", n, unit);
            }
        }
        if hours != 0 || minutes != 0 || total_micros != 0 {
            out.push('T');
            for (n, unit) in [(hours, 'H'), (minutes, 'M')] {
                if n != 0 {
                    let _ = write!(out, "{}{}", n, unit);
                }
            }
            if total_micros != 0 {
                let sign = if total_micros < 0 { "-" } else { "" };
                let abs = total_micros.unsigned_abs();
                let whole = abs / MICROS_PER_SECOND as u64;
                let frac = abs % MICROS_PER_SECOND as u64;
                if frac == 0 {
                    let _ = write!(out, "{}{}S", sign, whole);
                } else {
                    let _ = write!(out, "{}{}.{:06}S", sign, whole, frac);
                }
            }
        }
        if out.len() == 1 {
            out.push_str("T0S");
        }
        out
    }
}

impl DateTime {
    pub fn is_absolute(&self) -> bool {
        matches!(self, DateTime::Absolute(_))
    }

    pub fn is_relative(&self) -> bool {
        matches!(self, DateTime::Relative(_))
    }

    /// The textual form used when dates are written as plain strings. Returns [`None`] for an
    /// absolute date that cannot be placed on the calendar.
    pub fn to_iso8601(&self) -> Option<String> {
        match self {
            DateTime::Absolute(date) => date.to_iso8601(),
            DateTime::Relative(date) => Some(date.to_iso8601()),
        }
    }
}

impl From<AbsoluteDate> for DateTime {
    fn from(date: AbsoluteDate) -> Self {
        DateTime::Absolute(date)
    }
}

impl From<RelativeDate> for DateTime {
    fn from(date: RelativeDate) -> Self {
        DateTime::Relative(date)
    }
}
