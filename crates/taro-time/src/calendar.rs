//! Bucketization, day-of-week, and FIFO validation.
//!
//! All functions here take plain `i64` epoch seconds (not [`EngineTick`],
//! which may be in milliseconds) — callers normalize first with
//! [`crate::normalize_to_engine_ticks`] when the declared engine unit is
//! milliseconds, dividing by 1000 before calling into this module. This
//! keeps the floor-division semantics below expressed in one unit only.

use chrono::{Datelike, TimeZone, Weekday};
use chrono_tz::Tz;

use crate::error::{TimeError, TimeResult};

/// Bucket index for `epoch_sec` within a day, given `bucket_size_sec`.
///
/// `bucket_size_sec` must be positive. Negative epochs wrap correctly because
/// `rem_euclid` always returns a value in `[0, 86_400)` regardless of sign.
pub fn to_bucket(epoch_sec: i64, bucket_size_sec: i64) -> TimeResult<usize> {
    if bucket_size_sec <= 0 {
        return Err(TimeError::NonPositiveBucketSize(bucket_size_sec));
    }
    let seconds_into_day = epoch_sec.rem_euclid(86_400);
    Ok((seconds_into_day / bucket_size_sec) as usize)
}

/// Day of week for `epoch_sec`, UTC, with Mon=0 .. Sun=6.
///
/// 1970-01-01 (epoch 0) was a Thursday (weekday index 3 in this scheme).
/// Floor division via `rem_euclid`/`div_euclid` ensures negative epochs
/// (pre-1970 instants) still wrap into `[0, 6]` rather than producing a
/// negative or out-of-range index.
pub fn day_of_week_utc(epoch_sec: i64) -> u8 {
    const EPOCH_WEEKDAY: i64 = 3; // Thursday
    let days = epoch_sec.div_euclid(86_400);
    ((days + EPOCH_WEEKDAY).rem_euclid(7)) as u8
}

/// Day of week for `epoch_sec` as observed in the given IANA time zone.
///
/// Used by the cost engine, which must bucket and weekday-select in the
/// model's declared `profile_timezone`, not UTC — a profile whose peak
/// bucket starts at local midnight would otherwise be keyed to the wrong
/// bucket for zones offset from UTC.
pub fn day_of_week_in_tz(epoch_sec: i64, tz: Tz) -> u8 {
    let dt = tz.timestamp_opt(epoch_sec, 0).single().unwrap_or_else(|| {
        // `single()` only returns `None` inside a DST fold/gap; fall back to
        // the earliest valid mapping, which is UTC-equivalent for the
        // purpose of selecting a weekday.
        tz.timestamp_opt(epoch_sec, 0)
            .earliest()
            .unwrap_or_else(|| chrono::Utc.timestamp_opt(epoch_sec, 0).single().unwrap().with_timezone(&tz))
    });
    weekday_index(dt.weekday())
}

#[inline]
fn weekday_index(w: Weekday) -> u8 {
    // chrono's `Weekday::num_days_from_monday` already matches Mon=0..Sun=6.
    w.num_days_from_monday() as u8
}

/// Parse and validate an IANA zone name (`Metadata.profile_timezone`, §6).
pub fn parse_timezone(name: &str) -> TimeResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| TimeError::InvalidTimeZone(name.to_string()))
}

/// `true` iff `arrival_times` is monotone non-decreasing — the FIFO property
/// from `spec.md` §3/§8: earlier departures never produce later arrivals
/// than later departures, when evaluated at increasing departure ticks.
pub fn validate_fifo(arrival_times: &[i64]) -> bool {
    arrival_times.windows(2).all(|w| w[0] <= w[1])
}
