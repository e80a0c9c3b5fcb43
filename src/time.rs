use chrono::{DateTime, TimeZone, Utc};
#[allow(unused_imports)]
use core_maths::CoreFloat;

use crate::CalculationError;

pub(crate) const SECONDS_PER_DAY: i64 = 86_400;
const HALF_DAY_SECONDS: i64 = 43_200;
const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub(crate) const NANOS_PER_DAY: i64 = SECONDS_PER_DAY * NANOS_PER_SECOND;
const HALF_DAY_NANOS: i64 = HALF_DAY_SECONDS * NANOS_PER_SECOND;

/// Julian day number of 1970-01-01 (the Unix epoch day).
pub(crate) const J1970: i64 = 2_440_588;
/// Julian day number of the J2000.0 epoch.
pub(crate) const J2000: i64 = 2_451_545;

/// An instant expressed as a Julian day number plus nanoseconds into that day.
///
/// Julian days start at noon UTC, so `time_of_day == 0` is 12:00:00 UTC. The
/// day number is kept as an integer and the sub-day part as integer
/// nanoseconds which makes conversion to and from [`DateTime`] exact at
/// nanosecond resolution.
///
/// Values built with [`JulianDate::days_since_j2000`] use the same layout but
/// count days from J2000.0 instead of from the start of the Julian period.
///
/// # Example
///
/// ```
/// use astrocalc::JulianDate;
/// use chrono::{TimeZone, Utc};
///
/// let instant = Utc.with_ymd_and_hms(2004, 4, 1, 12, 0, 0).unwrap();
/// let jd = JulianDate::from_instant(&instant);
/// assert_eq!(jd.day_and_time(), (2_453_097, 0));
/// assert_eq!(jd.to_instant().unwrap(), instant);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JulianDate {
    julian_day_number: i64,
    /// Nanoseconds since the start (noon) of the Julian day
    time_of_day: i64,
}

impl JulianDate {
    /// Converts an instant in any time zone to its Julian date.
    ///
    /// The instant is reduced to its UTC timestamp. Whole days and the
    /// remainder are split with floored division so the remainder is never
    /// negative, then the noon day boundary is applied once.
    pub fn from_instant<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        // Counting in nanoseconds first folds a leap second (subsec >= 1e9)
        // into the following second.
        let nanos = i128::from(instant.timestamp()) * i128::from(NANOS_PER_SECOND)
            + i128::from(instant.timestamp_subsec_nanos());
        let days_since_1970 = nanos.div_euclid(i128::from(NANOS_PER_DAY)) as i64;
        let time_of_day = nanos.rem_euclid(i128::from(NANOS_PER_DAY)) as i64;

        Self {
            julian_day_number: days_since_1970 + J1970,
            time_of_day,
        }
        .remove_half_day()
    }

    /// Converts an instant to a Julian date counted from the J2000.0 epoch.
    ///
    /// This is the independent variable of every ephemeris polynomial in the crate.
    pub fn days_since_j2000<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        let mut jd = Self::from_instant(instant);
        jd.julian_day_number -= J2000;
        jd
    }

    /// Splits a fractional Julian day into day number and nanoseconds of day.
    ///
    /// Both parts are truncated toward zero, so a negative input yields a
    /// negative `time_of_day`. No noon shift is applied: the value is assumed
    /// to already follow the Julian day convention.
    pub fn from_fractional_days(days: f64) -> Self {
        Self {
            julian_day_number: days.trunc() as i64,
            time_of_day: (days.fract() * SECONDS_PER_DAY as f64 * 1e9) as i64,
        }
    }

    /// Builds a Julian date from a day number and nanoseconds since the start of that day.
    pub fn from_day_and_time(julian_day_number: i64, time_of_day: i64) -> Self {
        Self {
            julian_day_number,
            time_of_day,
        }
    }

    /// Returns the Julian day number and the nanoseconds since the start of the day.
    pub fn day_and_time(&self) -> (i64, i64) {
        (self.julian_day_number, self.time_of_day)
    }

    /// Returns the date as a single fractional day count.
    pub fn as_fractional_days(&self) -> f64 {
        self.julian_day_number as f64 + self.time_of_day as f64 / NANOS_PER_DAY as f64
    }

    /// Converts the Julian date back to a UTC instant.
    ///
    /// This is the exact inverse of [`JulianDate::from_instant`]. A negative or
    /// oversized `time_of_day` is carried into whole seconds.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::TimeConversionError`] if the instant cannot
    /// be represented by [`DateTime<Utc>`].
    pub fn to_instant(&self) -> Result<DateTime<Utc>, CalculationError> {
        let seconds = self
            .julian_day_number
            .checked_sub(J1970)
            .and_then(|days| days.checked_mul(SECONDS_PER_DAY))
            .and_then(|secs| secs.checked_add(HALF_DAY_SECONDS + self.time_of_day.div_euclid(NANOS_PER_SECOND)))
            .ok_or(CalculationError::TimeConversionError)?;
        let nanos = self.time_of_day.rem_euclid(NANOS_PER_SECOND) as u32;

        DateTime::from_timestamp(seconds, nanos).ok_or(CalculationError::TimeConversionError)
    }

    /// Moves the day boundary from midnight to noon.
    fn remove_half_day(mut self) -> Self {
        if self.time_of_day < HALF_DAY_NANOS {
            self.time_of_day += HALF_DAY_NANOS;
            self.julian_day_number -= 1;
        } else {
            self.time_of_day -= HALF_DAY_NANOS;
        }
        self
    }
}
