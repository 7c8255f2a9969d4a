//! Temporal-calendar strategies — how a tick maps to a day-of-week bucket
//! for profile day-mask gating (`spec.md` §4.7 step 2, §9 Polymorphism).

use chrono_tz::Tz;

/// Selects a day-of-week bucket (Mon=0..Sun=6), or opts the cost engine out
/// of weekly gating entirely.
pub trait TemporalCalendarStrategy: Send + Sync {
    fn id(&self) -> &'static str;

    /// `None` means "treat every day as active" — the caller should skip
    /// `ProfileStore::is_active_on_day` and go straight to the neutral or
    /// bucket-only lookup.
    fn day_of_week(&self, epoch_sec: i64, profile_timezone: Tz) -> Option<u8>;
}

/// Always computes weekday in UTC, ignoring the model's declared
/// `profile_timezone` — matches source systems whose day_mask was authored
/// against UTC boundaries regardless of where the network physically sits.
pub struct UtcCalendar;

impl TemporalCalendarStrategy for UtcCalendar {
    fn id(&self) -> &'static str {
        "utc"
    }

    fn day_of_week(&self, epoch_sec: i64, _profile_timezone: Tz) -> Option<u8> {
        Some(taro_time::day_of_week_utc(epoch_sec))
    }
}

/// The default: computes weekday in the model's declared IANA
/// `profile_timezone`, per `spec.md` §4.7 step 2.
pub struct TzAwareCalendar;

impl TemporalCalendarStrategy for TzAwareCalendar {
    fn id(&self) -> &'static str {
        "tz_aware"
    }

    fn day_of_week(&self, epoch_sec: i64, profile_timezone: Tz) -> Option<u8> {
        Some(taro_time::day_of_week_in_tz(epoch_sec, profile_timezone))
    }
}

/// No weekly cycle: every profile is treated as active on every day. Useful
/// for models whose `buckets` already encode a full period (e.g. a rolling
/// 7-day pattern flattened into one day) where `day_mask` gating would be
/// redundant or actively wrong.
pub struct LinearCalendar;

impl TemporalCalendarStrategy for LinearCalendar {
    fn id(&self) -> &'static str {
        "linear"
    }

    fn day_of_week(&self, _epoch_sec: i64, _profile_timezone: Tz) -> Option<u8> {
        None
    }
}
