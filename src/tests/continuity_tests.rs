//! Continuity tests for sun event times.
//!
//! Solar noon and sunrise/sunset move by seconds to minutes from one day to
//! the next. A larger jump points at a wrong Julian cycle or a broken
//! day-boundary conversion.

extern crate std;
use crate::tests::any_utc_datetime;
use crate::{SunCalculator, SOLAR_NOON};
use chrono::{DateTime, Days, Utc};
use proptest::prelude::*;

proptest! {
    #[allow(clippy::unwrap_used)]
    #[test]
    fn sun_times_change_smoothly_over_consecutive_days(
        start_date in any_utc_datetime(),
        longitude in -180.0_f64..=180.0_f64,
        latitude in -60.0_f64..=60.0_f64,
    ) {
        // A negative Julian cycle always rounds down, so the cycle can skip
        // a day where the days since J2000 change sign.
        let j2000 = DateTime::from_timestamp(946_728_000, 0).unwrap();
        prop_assume!((start_date - j2000).num_days().abs() > 12);

        let calc = SunCalculator::new();

        let mut prev_noon: Option<DateTime<Utc>> = None;
        let mut prev_sunrise: Option<DateTime<Utc>> = None;
        let mut prev_sunset: Option<DateTime<Utc>> = None;

        // The equation of time changes by less than half a minute per day;
        // day length changes by a few minutes per day below the polar circles.
        let max_noon_jump_seconds = 60.0;
        let max_rise_set_jump_seconds = 30.0 * 60.0;

        for day_offset in 0..10 {
            let current_date = start_date.checked_add_days(Days::new(day_offset)).unwrap();
            let times = calc.get_times(&current_date, latitude, longitude);

            let noon = times[SOLAR_NOON].unwrap();
            if let Some(prev) = prev_noon {
                let expected = prev.checked_add_days(Days::new(1)).unwrap();
                let diff_seconds = (noon - expected).as_seconds_f64().abs();
                prop_assert!(diff_seconds < max_noon_jump_seconds,
                    "Solar noon jumped {} seconds between {} and {}", diff_seconds, prev, noon);
            }
            prev_noon = Some(noon);

            if let (Some(prev), Some(curr)) = (prev_sunrise, times["sunrise"]) {
                let expected = prev.checked_add_days(Days::new(1)).unwrap();
                let diff_seconds = (curr - expected).as_seconds_f64().abs();
                prop_assert!(diff_seconds < max_rise_set_jump_seconds,
                    "Sunrise jumped {} seconds between {} and {}", diff_seconds, prev, curr);
            }
            prev_sunrise = times["sunrise"];

            if let (Some(prev), Some(curr)) = (prev_sunset, times["sunset"]) {
                let expected = prev.checked_add_days(Days::new(1)).unwrap();
                let diff_seconds = (curr - expected).as_seconds_f64().abs();
                prop_assert!(diff_seconds < max_rise_set_jump_seconds,
                    "Sunset jumped {} seconds between {} and {}", diff_seconds, prev, curr);
            }
            prev_sunset = times["sunset"];
        }
    }
}
