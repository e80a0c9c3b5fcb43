//! # astrocalc
//!
//! Positions of the Sun and Moon, times of sun events and the Moon's illumination
//! for a single instant and observer location.
//!
//! Sun events (sunrise, sunset, twilights, golden hour, solar noon and nadir)
//! are derived from a configurable list of sun altitude thresholds. The
//! numerical engine follows the low-precision formulas of
//! <http://aa.quae.nl/en/reken/zonpositie.html> and
//! <http://aa.quae.nl/en/reken/hemelpositie.html>. Nutation, parallax and
//! pressure dependent refraction are not modelled.
//!
//! ## Basic Usage
//!
//! ```
//! use astrocalc::{get_moon_illumination, get_moon_position, SunCalculator};
//! use chrono::{TimeZone, Utc};
//!
//! let instant = Utc.with_ymd_and_hms(2014, 7, 29, 19, 3, 25).unwrap();
//! let (lat, lng) = (31.783, 35.233); // angles in degrees
//!
//! let calc = SunCalculator::new();
//! let sun = calc.get_position(&instant, lat, lng);
//! println!("Sun altitude: {:.2}°", sun.altitude.to_degrees());
//!
//! let times = calc.get_times(&instant, lat, lng);
//! if let Some(sunrise) = times["sunrise"] {
//!     println!("Sunrise: {}", sunrise);
//! }
//!
//! let moon = get_moon_position(&instant, lat, lng);
//! let illumination = get_moon_illumination(&instant);
//! println!("Moon: {:.0} km away, {:.0}% lit", moon.distance, illumination.fraction * 100.0);
//! ```
//!
//! ## Out of range results
//!
//! Every calculation is a total function over `f64`. When the sun never
//! reaches a threshold (polar day or night) the hour angle is `NaN` and so is
//! the event's Julian day in [`SunCalculator::get_julian_times`];
//! [`SunCalculator::get_times`] reports such events as `None`.
#![no_std]

extern crate alloc;

#[cfg(test)]
mod csv_tests;

mod math;
mod moon;
mod sun;
mod time;

use thiserror::Error;

pub use moon::{
    get_moon_illumination, get_moon_position, moon_coordinates, MoonCoordinates, MoonIllumination, MoonPosition,
};
pub use sun::{
    sun_coordinates, EquatorialCoordinates, SunCalculator, SunPosition, SunTimeDefinition, SunTimes, NADIR, SOLAR_NOON,
};
pub use time::JulianDate;

/// Errors that can occur when converting calculation results to calendar instants.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculationError {
    /// The Julian date lies outside the range of [`chrono::DateTime<chrono::Utc>`]
    #[error("Time conversion error")]
    TimeConversionError,
}
