use std::fmt::Display;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use chrono::DateTime;
#[cfg(feature = "poem")]
use poem_openapi::Object;
#[cfg(feature = "json_schema")]
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

const NANOS_PER_SEC: u32 = 1_000_000_000;
const NANOS_PER_MILLI: i64 = 1_000_000;

/// A modification timestamp represented as whole seconds since the Unix
/// epoch plus a nanosecond remainder.
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
#[cfg_attr(feature = "poem", derive(Object))]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Hash, Eq)]
pub struct Mtime {
    /// Whole seconds since the Unix epoch. Negative for pre-epoch times.
    pub secs: i64,
    /// Nanosecond remainder, always in `0..1_000_000_000`.
    pub nsecs: u32,
}

impl Mtime {
    /// Creates an `Mtime` from seconds and a nanosecond remainder.
    pub fn new(secs: i64, nsecs: u32) -> Self {
        Self { secs, nsecs }
    }

    /// Creates an `Mtime` from milliseconds since the Unix epoch.
    ///
    /// Seconds are floor-divided so that negative inputs keep the
    /// nanosecond remainder non-negative.
    pub fn from_millis(ms: i64) -> Self {
        let secs = ms.div_euclid(1000);
        let nsecs = (ms.rem_euclid(1000) * NANOS_PER_MILLI) as u32;
        Self { secs, nsecs }
    }

    /// Creates an `Mtime` from a `SystemTime`, handling pre-epoch times.
    pub fn from_system_time(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(elapsed) => Self {
                secs: elapsed.as_secs() as i64,
                nsecs: elapsed.subsec_nanos(),
            },
            Err(e) => {
                let before = e.duration();
                let mut secs = -(before.as_secs() as i64);
                let mut nsecs = before.subsec_nanos();
                if nsecs > 0 {
                    secs -= 1;
                    nsecs = NANOS_PER_SEC - nsecs;
                }
                Self { secs, nsecs }
            }
        }
    }
}

impl From<SystemTime> for Mtime {
    fn from(time: SystemTime) -> Self {
        Self::from_system_time(time)
    }
}

impl Display for Mtime {
    /// Formats the timestamp in RFC 3339 - Z format with millisecond
    /// precision. For example "2018-01-26T18:30:09.453Z"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match DateTime::from_timestamp(self.secs, self.nsecs) {
            Some(datetime) => write!(
                f,
                "{}",
                datetime.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
            ),
            None => write!(f, "{}s+{}ns", self.secs, self.nsecs),
        }
    }
}
