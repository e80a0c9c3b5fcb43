use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::f64::consts::PI;

use chrono::{DateTime, TimeZone, Utc};
#[allow(unused_imports)]
use core_maths::CoreFloat;
use log::{debug, trace};

use crate::math::{
    altitude, azimuth, declination, normalize, right_ascension, round_half_up, sidereal_time, PeriodicTerm, RAD,
};
use crate::time::J2000;
use crate::JulianDate;

/// Key of the solar transit in [`SunTimes`].
pub const SOLAR_NOON: &str = "solarNoon";
/// Key of the solar anti-transit in [`SunTimes`].
pub const NADIR: &str = "nadir";

/// Solar mean anomaly, 357.5291° + 0.98560028° per day
const MEAN_ANOMALY: PeriodicTerm = PeriodicTerm {
    base: 357_529_100_000,
    rate: 985_600_280,
};

/// Ecliptic longitude of the Earth's perihelion
const PERIHELION: f64 = RAD * 102.9372;

/// Correction between the mean and the apparent solar transit, in days
const J0: f64 = 0.0009;

/// Sun event times keyed by event name.
///
/// A value is `None` when the sun never reaches the event's altitude on that
/// day (the hour angle is not a number) or when the instant is outside the
/// range of [`DateTime<Utc>`].
pub type SunTimes = BTreeMap<String, Option<DateTime<Utc>>>;

/// Equatorial coordinates in radians.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquatorialCoordinates {
    /// Declination in radians
    pub declination: f64,
    /// Right ascension in radians
    pub right_ascension: f64,
}

/// Position of the Sun in the observer's sky.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SunPosition {
    /// Azimuth in radians, measured from south and positive toward west
    pub azimuth: f64,
    /// Altitude above the horizon in radians
    pub altitude: f64,
}

/// An altitude threshold producing a pair of sun events.
///
/// The morning crossing is reported as `rise_name`, the evening crossing as
/// `set_name`. An empty name suppresses that side.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SunTimeDefinition {
    /// Sun altitude in degrees, negative below the horizon
    pub angle: f64,
    /// Name of the morning event, empty to omit it
    pub rise_name: String,
    /// Name of the evening event, empty to omit it
    pub set_name: String,
}

impl SunTimeDefinition {
    pub fn new(angle: f64, rise_name: impl Into<String>, set_name: impl Into<String>) -> Self {
        Self {
            angle,
            rise_name: rise_name.into(),
            set_name: set_name.into(),
        }
    }
}

pub(crate) fn solar_mean_anomaly(d: JulianDate) -> f64 {
    normalize(MEAN_ANOMALY.radians(d))
}

/// Ecliptic longitude of the Sun from its mean anomaly `m`.
pub(crate) fn ecliptic_longitude(m: f64) -> f64 {
    // equation of center
    let c = RAD * (1.9148 * m.sin() + 0.02 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin());
    m + c + PERIHELION + PI
}

/// Equatorial coordinates of the Sun.
///
/// * `d` - Days since J2000.0, see [`JulianDate::days_since_j2000`]
pub fn sun_coordinates(d: JulianDate) -> EquatorialCoordinates {
    let l = ecliptic_longitude(solar_mean_anomaly(d));
    EquatorialCoordinates {
        declination: declination(l, 0.0),
        right_ascension: right_ascension(l, 0.0),
    }
}

fn julian_cycle(d: JulianDate, lw: f64) -> f64 {
    round_half_up(d.as_fractional_days() - J0 - lw / (2.0 * PI))
}

fn approx_transit(ht: f64, lw: f64, n: f64) -> f64 {
    J0 + (ht + lw) / (2.0 * PI) + n
}

fn solar_transit_j(ds: f64, m: f64, l: f64) -> f64 {
    J2000 as f64 + ds + 0.0053 * m.sin() - 0.0069 * (2.0 * l).sin()
}

fn hour_angle(h: f64, phi: f64, dec: f64) -> f64 {
    ((h.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos())).acos()
}

/// Julian day on which the sun descends through altitude `h`.
fn set_j(h: f64, lw: f64, phi: f64, dec: f64, n: f64, m: f64, l: f64) -> f64 {
    let w = hour_angle(h, phi, dec);
    let a = approx_transit(w, lw, n);
    solar_transit_j(a, m, l)
}

fn julian_to_instant(j: f64) -> Option<DateTime<Utc>> {
    if !j.is_finite() {
        return None;
    }
    JulianDate::from_fractional_days(j).to_instant().ok()
}

/// Sun position and sun event calculator.
///
/// Holds the ordered list of altitude thresholds used by
/// [`SunCalculator::get_times`]. The list is plain owned data:
/// [`SunCalculator::add_time`] needs `&mut self`, so appends cannot overlap
/// with reads. Share a calculator between threads by cloning it or by putting
/// it behind the caller's own lock.
///
/// # Example
///
/// ```
/// use astrocalc::SunCalculator;
/// use chrono::{TimeZone, Utc};
///
/// let instant = Utc.with_ymd_and_hms(2014, 7, 29, 19, 3, 25).unwrap();
/// let mut calc = SunCalculator::new();
/// calc.add_time(-3.0, "blueHourEnd", "blueHour");
///
/// let times = calc.get_times(&instant, 31.783, 35.233);
/// assert!(times["sunrise"] < times["solarNoon"]);
/// assert!(times["blueHour"].is_some());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SunCalculator {
    definitions: Vec<SunTimeDefinition>,
}

impl Default for SunCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl SunCalculator {
    /// Creates a calculator seeded with [`SunCalculator::default_definitions`].
    pub fn new() -> Self {
        Self::with_definitions(Self::default_definitions())
    }

    /// Creates a calculator with exactly the given thresholds and no defaults.
    pub fn with_definitions(definitions: Vec<SunTimeDefinition>) -> Self {
        Self { definitions }
    }

    /// The six standard thresholds: sunrise/sunset, the end and start of the
    /// sun's disk crossing, civil, nautical and astronomical twilight, and the
    /// golden hour.
    pub fn default_definitions() -> Vec<SunTimeDefinition> {
        vec![
            SunTimeDefinition::new(-0.833, "sunrise", "sunset"),
            SunTimeDefinition::new(-0.3, "sunriseEnd", "sunsetStart"),
            SunTimeDefinition::new(-6.0, "dawn", "dusk"),
            SunTimeDefinition::new(-12.0, "nauticalDawn", "nauticalDusk"),
            SunTimeDefinition::new(-18.0, "nightEnd", "night"),
            SunTimeDefinition::new(6.0, "goldenHourEnd", "goldenHour"),
        ]
    }

    /// The configured thresholds in insertion order.
    pub fn definitions(&self) -> &[SunTimeDefinition] {
        &self.definitions
    }

    /// Appends a threshold at `angle` degrees of sun altitude.
    ///
    /// Either name may be empty to skip that side of the event.
    pub fn add_time(&mut self, angle: f64, rise_name: impl Into<String>, set_name: impl Into<String>) {
        let definition = SunTimeDefinition::new(angle, rise_name, set_name);
        debug!(
            "adding sun time {:?}/{:?} at {}°",
            definition.rise_name, definition.set_name, definition.angle
        );
        self.definitions.push(definition);
    }

    /// Computes the Sun's azimuth and altitude.
    ///
    /// # Arguments
    ///
    /// * `instant` - The instant of observation
    /// * `lat` - Observer latitude in degrees, positive north
    /// * `lng` - Observer longitude in degrees, positive east
    pub fn get_position<Tz: TimeZone>(&self, instant: &DateTime<Tz>, lat: f64, lng: f64) -> SunPosition {
        let lw = RAD * -lng;
        let phi = RAD * lat;
        let d = JulianDate::days_since_j2000(instant);

        let coords = sun_coordinates(d);
        let h = sidereal_time(d, lw) - coords.right_ascension;

        SunPosition {
            azimuth: azimuth(h, phi, coords.declination),
            altitude: altitude(h, phi, coords.declination),
        }
    }

    /// Computes the sun events of the day as fractional Julian days.
    ///
    /// Always contains [`SOLAR_NOON`] and [`NADIR`], plus every non-empty name
    /// of the configured thresholds. Thresholds the sun does not reach at this
    /// latitude and season yield `NaN`. Later entries overwrite earlier ones
    /// sharing a name.
    pub fn get_julian_times<Tz: TimeZone>(&self, instant: &DateTime<Tz>, lat: f64, lng: f64) -> BTreeMap<String, f64> {
        let lw = RAD * -lng;
        let phi = RAD * lat;
        let d = JulianDate::days_since_j2000(instant);

        let n = julian_cycle(d, lw);
        let ds = approx_transit(0.0, lw, n);

        let m = solar_mean_anomaly(JulianDate::from_fractional_days(ds));
        let l = ecliptic_longitude(m);
        let dec = declination(l, 0.0);

        let j_noon = solar_transit_j(ds, m, l);
        trace!("julian cycle {n}, approximate transit {ds}, solar transit {j_noon}");

        let mut times = BTreeMap::new();
        times.insert(String::from(SOLAR_NOON), j_noon);
        times.insert(String::from(NADIR), j_noon - 0.5);

        for definition in &self.definitions {
            let j_set = set_j(definition.angle * RAD, lw, phi, dec, n, m, l);
            let j_rise = j_noon - (j_set - j_noon);
            if j_set.is_nan() {
                debug!("sun does not cross {}° at latitude {lat}", definition.angle);
            }

            if !definition.rise_name.is_empty() {
                times.insert(definition.rise_name.clone(), j_rise);
            }
            if !definition.set_name.is_empty() {
                times.insert(definition.set_name.clone(), j_set);
            }
        }

        times
    }

    /// Computes the sun events of the day as UTC instants.
    ///
    /// Same keys as [`SunCalculator::get_julian_times`]. Events the sun does
    /// not reach map to `None`.
    ///
    /// # Arguments
    ///
    /// * `instant` - Any instant of the day of interest
    /// * `lat` - Observer latitude in degrees, positive north
    /// * `lng` - Observer longitude in degrees, positive east
    pub fn get_times<Tz: TimeZone>(&self, instant: &DateTime<Tz>, lat: f64, lng: f64) -> SunTimes {
        self.get_julian_times(instant, lat, lng)
            .into_iter()
            .map(|(name, j)| (name, julian_to_instant(j)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn half_up_rounding_floors_negative_cycles() {
        assert_eq!(round_half_up(5322.5), 5323.0);
        assert_eq!(round_half_up(5322.49), 5322.0);
        assert_eq!(round_half_up(-12.2), -13.0);
        assert_eq!(round_half_up(-12.7), -13.0);
        assert_eq!(round_half_up(-12.0), -12.0);
    }

    #[test]
    fn empty_names_are_not_emitted() {
        let calc = SunCalculator::with_definitions(vec![SunTimeDefinition::new(-4.0, "", "civilish")]);
        let instant = Utc.with_ymd_and_hms(2014, 7, 29, 19, 3, 25).unwrap();
        let times = calc.get_julian_times(&instant, 31.783, 35.233);

        assert_eq!(times.len(), 3);
        assert!(times.contains_key(SOLAR_NOON));
        assert!(times.contains_key(NADIR));
        assert!(times.contains_key("civilish"));
        assert!(!times.contains_key(""));
    }

    #[test]
    fn unreachable_threshold_is_nan() {
        // Polar night: the sun stays below -0.833° north of the arctic circle in December.
        let calc = SunCalculator::new();
        let instant = Utc.with_ymd_and_hms(2020, 12, 21, 12, 0, 0).unwrap();
        let julian = calc.get_julian_times(&instant, 80.0, 15.0);
        assert!(julian["sunrise"].is_nan());
        assert!(julian["sunset"].is_nan());
        assert!(julian[SOLAR_NOON].is_finite());

        let times = calc.get_times(&instant, 80.0, 15.0);
        assert_eq!(times["sunrise"], None);
        assert_eq!(times["sunset"], None);
        assert!(times[SOLAR_NOON].is_some());
    }

    #[test]
    fn mean_anomaly_is_normalized_before_j2000() {
        let d = JulianDate::from_day_and_time(-40_000, 0);
        let m = solar_mean_anomaly(d);
        assert!((0.0..2.0 * PI).contains(&m), "mean anomaly {m} out of range");
    }
}
