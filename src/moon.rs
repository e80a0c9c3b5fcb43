use core::f64::consts::PI;

use chrono::{DateTime, TimeZone};
#[allow(unused_imports)]
use core_maths::CoreFloat;

use crate::math::{altitude, azimuth, declination, right_ascension, sidereal_time, RAD};
use crate::sun::sun_coordinates;
use crate::JulianDate;

/// Mean distance from the Earth to the Sun in kilometers.
const SUN_DISTANCE: f64 = 149_598_000.0;

// Empirical horizon refraction, 0.017° / tan(h + 10.26° / (h + 5.10°)).
const REFRACTION_SCALE: f64 = RAD * 0.017;
/// 10.26° in radians, `RAD * 10.26` is one ulp low.
const REFRACTION_SHIFT: f64 = 0.179_070_781_254_618_23;
const REFRACTION_OFFSET: f64 = RAD * 5.10;

/// Geocentric equatorial coordinates and distance of the Moon.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoonCoordinates {
    /// Declination in radians
    pub declination: f64,
    /// Right ascension in radians
    pub right_ascension: f64,
    /// Distance from the Earth's center in kilometers
    pub distance: f64,
}

/// Position of the Moon in the observer's sky.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoonPosition {
    /// Azimuth in radians, measured from south and positive toward west
    pub azimuth: f64,
    /// Altitude above the horizon in radians, corrected for refraction
    pub altitude: f64,
    /// Distance to the Moon in kilometers
    pub distance: f64,
}

/// Illumination state of the Moon.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoonIllumination {
    /// Illuminated fraction of the disk, from 0.0 (new moon) to 1.0 (full moon)
    pub fraction: f64,
    /// Phase from 0.0 to 1.0: 0.0 new moon, 0.25 first quarter, 0.5 full moon, 0.75 last quarter
    pub phase: f64,
    /// Midpoint angle in radians of the illuminated limb, reckoned eastward from the
    /// north point of the disk. Negative while waxing, positive while waning.
    pub angle: f64,
}

/// Equatorial coordinates and distance of the Moon.
///
/// The mean elements grow without bound in `d`, they are not reduced to one turn.
///
/// * `d` - Days since J2000.0, see [`JulianDate::days_since_j2000`]
pub fn moon_coordinates(d: JulianDate) -> MoonCoordinates {
    let d = d.as_fractional_days();

    let mean_longitude = RAD * (218.316 + 13.176396 * d);
    let mean_anomaly = RAD * (134.963 + 13.064993 * d);
    let mean_distance = RAD * (93.272 + 13.229350 * d);

    let l = mean_longitude + RAD * 6.289 * mean_anomaly.sin();
    let b = RAD * 5.128 * mean_distance.sin();

    MoonCoordinates {
        declination: declination(l, b),
        right_ascension: right_ascension(l, b),
        distance: 385_001.0 - 20_905.0 * mean_anomaly.cos(),
    }
}

/// Computes the Moon's azimuth, altitude and distance.
///
/// Altitude includes an empirical refraction term that matters only near the
/// horizon. Azimuth is computed from the geometric hour angle.
///
/// # Arguments
///
/// * `instant` - The instant of observation
/// * `lat` - Observer latitude in degrees, positive north
/// * `lng` - Observer longitude in degrees, positive east
///
/// # Example
///
/// ```
/// use astrocalc::get_moon_position;
/// use chrono::{TimeZone, Utc};
///
/// let instant = Utc.with_ymd_and_hms(2014, 7, 29, 19, 3, 25).unwrap();
/// let moon = get_moon_position(&instant, 31.783, 35.233);
/// assert!(moon.altitude < 0.0);
/// assert!((356_000.0..407_000.0).contains(&moon.distance));
/// ```
pub fn get_moon_position<Tz: TimeZone>(instant: &DateTime<Tz>, lat: f64, lng: f64) -> MoonPosition {
    let lw = RAD * -lng;
    let phi = RAD * lat;
    let d = JulianDate::days_since_j2000(instant);

    let coords = moon_coordinates(d);
    let hour_angle = sidereal_time(d, lw) - coords.right_ascension;
    let mut h = altitude(hour_angle, phi, coords.declination);

    h += REFRACTION_SCALE / (h + REFRACTION_SHIFT / (h + REFRACTION_OFFSET)).tan();

    MoonPosition {
        azimuth: azimuth(hour_angle, phi, coords.declination),
        altitude: h,
        distance: coords.distance,
    }
}

/// Computes the Moon's illuminated fraction, phase and bright limb angle.
///
/// An exactly zero limb angle counts as waning.
///
/// # Example
///
/// ```
/// use astrocalc::get_moon_illumination;
/// use chrono::{TimeZone, Utc};
///
/// let instant = Utc.with_ymd_and_hms(2014, 7, 29, 19, 3, 25).unwrap();
/// let illumination = get_moon_illumination(&instant);
/// // three days after new moon
/// assert!(illumination.fraction < 0.1);
/// assert!(illumination.angle < 0.0);
/// ```
pub fn get_moon_illumination<Tz: TimeZone>(instant: &DateTime<Tz>) -> MoonIllumination {
    let d = JulianDate::days_since_j2000(instant);
    let sun = sun_coordinates(d);
    let moon = moon_coordinates(d);

    let (s_dec, s_ra) = (sun.declination, sun.right_ascension);
    let (m_dec, m_ra) = (moon.declination, moon.right_ascension);

    // geocentric elongation
    let phi = (s_dec.sin() * m_dec.sin() + s_dec.cos() * m_dec.cos() * (s_ra - m_ra).cos()).acos();
    let inc = (SUN_DISTANCE * phi.sin()).atan2(moon.distance - SUN_DISTANCE * phi.cos());
    let angle = (s_dec.cos() * (s_ra - m_ra).sin())
        .atan2(s_dec.sin() * m_dec.cos() - s_dec.cos() * m_dec.sin() * (s_ra - m_ra).cos());

    let sign = if angle < 0.0 { -1.0 } else { 1.0 };

    MoonIllumination {
        fraction: (1.0 + inc.cos()) / 2.0,
        phase: 0.5 + 0.5 * inc * sign / PI,
        angle,
    }
}
