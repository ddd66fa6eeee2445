// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Daily promotion boundary.
//!
//! Overnight lists are promoted into the morning queue when the station
//! opens. The opening time is wall-clock time in the station's timezone,
//! so the UTC instant moves with DST. The queue store itself has no notion
//! of time of day; a scheduler uses this module to decide when to call it.

use crate::error::DomainError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use time::OffsetDateTime;

/// Default station timezone.
pub const DEFAULT_TIMEZONE: &str = "Africa/Tunis";

/// Local-time gaps longer than this are treated as unresolvable.
const MAX_GAP_MINUTES: i64 = 180;

/// When the station opens each day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionSchedule {
    opening_time: time::Time,
    timezone: String,
}

impl PromotionSchedule {
    /// Creates a schedule.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimezone` if `timezone` is not an IANA zone name.
    pub fn new(opening_time: time::Time, timezone: &str) -> Result<Self, DomainError> {
        timezone
            .parse::<Tz>()
            .map_err(|_| DomainError::InvalidTimezone(timezone.to_string()))?;
        Ok(Self {
            opening_time,
            timezone: timezone.to_string(),
        })
    }

    /// Returns the local opening time.
    #[must_use]
    pub const fn opening_time(&self) -> time::Time {
        self.opening_time
    }

    /// Returns the IANA timezone name.
    #[must_use]
    pub fn timezone(&self) -> &str {
        &self.timezone
    }
}

/// Returns the first station opening strictly after `now`.
///
/// A local opening time that falls in a DST gap resolves to the first
/// valid minute after it. An ambiguous local time resolves to its earlier
/// instant.
///
/// # Errors
///
/// Returns an error if:
/// - The timezone cannot be parsed
/// - `now` or the result is outside the representable range
pub fn next_promotion_at(
    schedule: &PromotionSchedule,
    now: OffsetDateTime,
) -> Result<OffsetDateTime, DomainError> {
    let tz: Tz = schedule
        .timezone()
        .parse()
        .map_err(|_| DomainError::InvalidTimezone(schedule.timezone().to_string()))?;

    let now_utc: DateTime<Utc> = DateTime::from_timestamp(now.unix_timestamp(), now.nanosecond())
        .ok_or_else(|| DomainError::InvalidSchedule {
            reason: format!("{now} is out of range"),
        })?;

    // Convert time::Time to chrono::NaiveTime
    let opening: NaiveTime = NaiveTime::from_hms_opt(
        u32::from(schedule.opening_time().hour()),
        u32::from(schedule.opening_time().minute()),
        u32::from(schedule.opening_time().second()),
    )
    .ok_or_else(|| DomainError::InvalidSchedule {
        reason: format!("Invalid opening time: {}", schedule.opening_time()),
    })?;

    let mut date: NaiveDate = now_utc.with_timezone(&tz).date_naive();

    // Today's opening may already have passed, and a DST gap can push a
    // candidate past midnight, so look at most three local days ahead.
    for _ in 0..3 {
        if let Some(candidate) = resolve_local(tz, date.and_time(opening))
            && candidate > now_utc
        {
            return OffsetDateTime::from_unix_timestamp(candidate.timestamp()).map_err(|e| {
                DomainError::InvalidSchedule {
                    reason: e.to_string(),
                }
            });
        }
        date = date.succ_opt().ok_or_else(|| DomainError::InvalidSchedule {
            reason: format!("No day after {date}"),
        })?;
    }

    Err(DomainError::InvalidSchedule {
        reason: format!(
            "Could not resolve opening time {opening} in {}",
            schedule.timezone()
        ),
    })
}

/// Maps a local wall-clock time to UTC, stepping forward out of DST gaps.
fn resolve_local(tz: Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    (0..=MAX_GAP_MINUTES).find_map(|minutes| {
        let shifted: NaiveDateTime = local.checked_add_signed(TimeDelta::minutes(minutes))?;
        tz.from_local_datetime(&shifted)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    })
}
