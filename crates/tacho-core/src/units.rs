//! Unit conversion constants shared by the engine and its shells.

/// Metres per second in one km/h.
pub const KMH_TO_MS: f64 = 1.0 / 3.6;

/// Converts a km/h-per-millisecond rate to m/s².
///
/// 1 km/h = 1/3.6 m/s and 1 ms = 1/1000 s, so dividing the former by the
/// latter multiplies by 1000/3.6.
pub const KMH_PER_MS_TO_MS2: f64 = 1000.0 / 3.6;

/// Seconds in one millisecond.
pub const MS_TO_S: f64 = 1.0e-3;

/// Convert a speed in km/h to m/s.
#[inline]
pub fn kmh_to_ms(speed_kmh: f64) -> f64 {
    speed_kmh * KMH_TO_MS
}

/// Convert a time in milliseconds to seconds.
#[inline]
pub fn ms_to_s(time_ms: f64) -> f64 {
    time_ms * MS_TO_S
}
