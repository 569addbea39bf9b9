//! Synthetic environmental readings.
//!
//! Each reading is a fixed baseline plus uniform jitter, drawn fresh on
//! every sensor read.

use rand::Rng;
use rover_types::EnvironmentReadings;

/// `(baseline, jitter)` for temperature in degrees Celsius.
const TEMPERATURE: (f64, f64) = (25.0, 2.0);
/// `(baseline, jitter)` for relative humidity in percent.
const HUMIDITY: (f64, f64) = (45.0, 5.0);
/// `(baseline, jitter)` for radiation in mSv/h.
const RADIATION: (f64, f64) = (0.1, 0.05);
/// `(baseline, jitter)` for the air quality index.
const AIR_QUALITY: (f64, f64) = (95.0, 2.0);

/// Draw one set of readings.
pub fn sample_environment<R: Rng + ?Sized>(rng: &mut R) -> EnvironmentReadings {
    EnvironmentReadings {
        temperature: jitter(rng, TEMPERATURE),
        humidity: jitter(rng, HUMIDITY),
        radiation: jitter(rng, RADIATION),
        air_quality: jitter(rng, AIR_QUALITY),
    }
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, (baseline, spread): (f64, f64)) -> f64 {
    baseline + rng.random_range(-spread..=spread)
}
