use core::f64::consts::PI;
#[allow(unused_imports)]
use core_maths::CoreFloat;

use crate::time::SECONDS_PER_DAY;
use crate::JulianDate;

/// Degrees to radians scale factor.
pub(crate) const RAD: f64 = PI / 180.0;

/// Obliquity of the Earth, 23.4397° in radians.
///
/// Written out because `RAD * 23.4397` rounds one ulp low.
pub(crate) const OBLIQUITY: f64 = 0.409_099_940_679_714_9;

/// Full turn in periodic terms, 360° with nine decimal places.
const TURN_NANO_DEGREES: i64 = 360_000_000_000;

/// Sidereal time at J2000.0, 280.16°
const SIDEREAL_BASE_NANO_DEGREES: i64 = 280_160_000_000;
/// Sidereal time rate, 360.9856235° per day
const SIDEREAL_RATE_NANO_DEGREES: i64 = 360_985_623_500;

/// A periodic angle `base + rate * d` held as integers in nanodegrees.
///
/// Multiplying a small per-day rate by a day count of several thousand loses
/// the low bits of a double. The integer day is reduced modulo one turn
/// exactly before the sub-day part is added in floating point.
#[derive(Copy, Clone, Debug)]
pub(crate) struct PeriodicTerm {
    pub(crate) base: i64,
    pub(crate) rate: i64,
}

impl PeriodicTerm {
    /// Evaluates the term in radians.
    ///
    /// The integer remainder follows the sign of the day count, so the result
    /// lies in `(-2π, 2π + rate)` before `normalize` is applied. The integer
    /// product wraps on overflow, beyond about 70000 years from J2000 for the
    /// sidereal rate.
    pub(crate) fn radians(self, d: JulianDate) -> f64 {
        let (day, time_of_day) = d.day_and_time();
        let reduced = day.wrapping_mul(self.rate).wrapping_add(self.base) % TURN_NANO_DEGREES;
        RAD * (reduced as f64 / 1e9 + time_of_day as f64 / SECONDS_PER_DAY as f64 * (self.rate as f64 / 1e18))
    }
}

/// Adds one full turn to a negative angle.
///
/// Inputs are expected in `(-2π, 2π)`; anything else is left outside `[0, 2π)`.
pub(crate) fn normalize(angle: f64) -> f64 {
    if angle < 0.0 {
        angle + 2.0 * PI
    } else {
        angle
    }
}

/// Rounds half up to zero decimal places.
///
/// The fractional part keeps the sign of `value`, so only non-negative values
/// can reach the `ceil` branch: `2.5 -> 3`, `-2.5 -> -3`, `-2.2 -> -3`.
pub(crate) fn round_half_up(value: f64) -> f64 {
    if value.fract() >= 0.5 {
        value.ceil()
    } else {
        value.floor()
    }
}

/// Right ascension from ecliptic longitude `l` and latitude `b`.
pub(crate) fn right_ascension(l: f64, b: f64) -> f64 {
    (l.sin() * OBLIQUITY.cos() - b.tan() * OBLIQUITY.sin()).atan2(l.cos())
}

/// Declination from ecliptic longitude `l` and latitude `b`.
pub(crate) fn declination(l: f64, b: f64) -> f64 {
    (b.sin() * OBLIQUITY.cos() + b.cos() * OBLIQUITY.sin() * l.sin()).asin()
}

/// Azimuth for hour angle `h`, observer latitude `phi` and declination `dec`.
///
/// Measured from south, positive toward west, in `(-π, π]`.
pub(crate) fn azimuth(h: f64, phi: f64, dec: f64) -> f64 {
    h.sin().atan2(h.cos() * phi.sin() - dec.tan() * phi.cos())
}

/// Altitude above the horizon for hour angle `h`, latitude `phi` and declination `dec`.
pub(crate) fn altitude(h: f64, phi: f64, dec: f64) -> f64 {
    (phi.sin() * dec.sin() + phi.cos() * dec.cos() * h.cos()).asin()
}

/// Local sidereal time in radians, lifted by one turn when negative.
///
/// * `d` - Days since J2000.0
/// * `lw` - Observer longitude in radians, positive west
pub(crate) fn sidereal_time(d: JulianDate, lw: f64) -> f64 {
    let term = PeriodicTerm {
        base: SIDEREAL_BASE_NANO_DEGREES,
        rate: SIDEREAL_RATE_NANO_DEGREES,
    };
    normalize(term.radians(d) - lw)
}
