//! Discretizes the ground-truth profile into the transmitted sample
//! sequence: periodic, jitter-free, no drops, no reordering, no duplicate
//! times.

use crate::profile;
use crate::sim::SimParams;
use tacho_core::SpeedSample;

/// Sample the profile at the sender period from 0 to the horizon inclusive.
///
/// Length is `floor(horizon / sender_interval) + 1` with strictly increasing
/// times starting at 0.
pub fn sample_transmission(params: &SimParams) -> Vec<SpeedSample> {
    let n = (params.horizon_ms() / params.sender_interval_ms).floor() as usize;
    (0..=n)
        .map(|k| {
            let time_ms = k as f64 * params.sender_interval_ms;
            SpeedSample {
                time_ms,
                speed_kmh: profile::actual_speed(params, time_ms),
            }
        })
        .collect()
}
