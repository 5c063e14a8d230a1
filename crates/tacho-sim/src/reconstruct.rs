//! Drives the receiver-side estimator over the fine receiver grid.
//!
//! At each tick the estimator sees only the samples transmitted at or before
//! that tick, mirroring what a real consumer would know.

use crate::profile;
use crate::sim::SimParams;
use tacho_core::{SlopeEstimator, SpeedSample};

/// One point of the dense receiver-rate sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconstructedPoint {
    pub time_ms: f64,
    /// Ground truth at this tick.
    pub actual_kmh: f64,
    /// Zero-order hold of the most recent sample at or before this tick.
    pub received_kmh: f64,
    /// The estimator's slope-extrapolated estimate.
    pub interpolated_kmh: f64,
}

/// Reconstruct the speed estimate at every receiver tick over the horizon.
pub fn run_reconstruction(params: &SimParams, samples: &[SpeedSample]) -> Vec<ReconstructedPoint> {
    let step = params.receiver_interval_ms;
    let n = (params.horizon_ms() / step).floor() as usize;

    let mut estimator = SlopeEstimator::new();
    let mut next_sample = 0;
    let mut points = Vec::with_capacity(n + 1);

    for k in 0..=n {
        let t = k as f64 * step;

        // Deliver every sample due by this tick before estimating.
        while next_sample < samples.len() && samples[next_sample].time_ms <= t {
            estimator.push(samples[next_sample]);
            next_sample += 1;
        }

        points.push(ReconstructedPoint {
            time_ms: t,
            actual_kmh: profile::actual_speed(params, t),
            received_kmh: estimator.held().unwrap_or(params.start_speed_kmh),
            interpolated_kmh: estimator.estimate(t).unwrap_or(params.start_speed_kmh),
        });
    }

    points
}
