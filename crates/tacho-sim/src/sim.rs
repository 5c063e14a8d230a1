use crate::metrics::{self, AxisRange, DistancePoint, SummaryMetrics};
use crate::reconstruct::{self, ReconstructedPoint};
use crate::sampler;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Configuration for one simulation run.
///
/// Speeds are signed km/h; the start speed may exceed the end speed
/// (deceleration). The sender interval must stay above the receiver interval
/// or the reconstruction has no latency to model; the defaults pin the fixed
/// 105 ms / 20 ms link periods.
#[derive(Debug, Clone, PartialEq)]
pub struct SimParams {
    pub start_speed_kmh: f64,
    pub end_speed_kmh: f64,
    /// Nominal transition duration. Must be > 0; rejected otherwise.
    pub duration_ms: f64,
    /// Transmission period of the sender.
    pub sender_interval_ms: f64,
    /// Grid period at which the consumer needs an estimate.
    pub receiver_interval_ms: f64,
    /// Use the jerk-limited S-curve profile instead of the linear ramp.
    pub use_jerk: bool,
    /// Curve shape at the start of the transition, nominally in (0, 1].
    pub initial_jerk_factor: f64,
    /// Curve shape at the end of the transition, nominally in (0, 1].
    pub final_jerk_factor: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            start_speed_kmh: 0.0,
            end_speed_kmh: 100.0,
            duration_ms: 1000.0,
            sender_interval_ms: 105.0,
            receiver_interval_ms: 20.0,
            use_jerk: false,
            initial_jerk_factor: 0.3,
            final_jerk_factor: 0.3,
        }
    }
}

impl SimParams {
    /// End of the simulated horizon: two sender periods past the nominal
    /// duration, so the reconstruction settles back onto the end speed.
    pub fn horizon_ms(&self) -> f64 {
        self.duration_ms + 2.0 * self.sender_interval_ms
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Validation failure surfaced before any computation runs.
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("duration must be greater than 0 ms (got {0})")]
    InvalidDuration(f64),
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Everything one run produces. A new result is built from scratch on every
/// call; nothing is carried between runs.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// Dense receiver-rate sequence of actual/received/interpolated speeds.
    pub points: Vec<ReconstructedPoint>,
    /// Cumulative traveled distance on the same grid.
    pub distances: Vec<DistancePoint>,
    /// Scalar metrics folded from the sequences.
    pub summary: SummaryMetrics,
    /// Plot range helper for the presentation layer.
    pub axis: AxisRange,
}

/// Run the whole pipeline for one configuration snapshot.
///
/// Synchronous and pure: ground truth -> transmitted samples -> receiver-grid
/// reconstruction -> metrics. Output reflects a single consistent parameter
/// set, never a mix of old and new values.
pub fn simulate(params: &SimParams) -> Result<SimulationResult, SimError> {
    if params.duration_ms <= 0.0 {
        return Err(SimError::InvalidDuration(params.duration_ms));
    }

    let samples = sampler::sample_transmission(params);
    let points = reconstruct::run_reconstruction(params, &samples);
    let distances = metrics::distance_series(params, &points);
    let summary = metrics::summarize(params, &points, &distances);
    let axis = metrics::axis_range(params, &points);

    Ok(SimulationResult {
        points,
        distances,
        summary,
        axis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_nonpositive_duration() {
        let mut params = SimParams::default();
        params.duration_ms = 0.0;
        assert_eq!(simulate(&params), Err(SimError::InvalidDuration(0.0)));
        params.duration_ms = -5.0;
        assert!(simulate(&params).is_err());
    }

    #[test]
    fn test_series_share_the_receiver_grid() {
        let params = SimParams::default();
        let result = simulate(&params).unwrap();
        // floor(1210 / 20) + 1 ticks
        assert_eq!(result.points.len(), 61);
        assert_eq!(result.distances.len(), result.points.len());
        for (p, d) in result.points.iter().zip(&result.distances) {
            assert_eq!(p.time_ms, d.time_ms);
        }
    }

    #[test]
    fn test_jerk_params_follow_the_profile_switch() {
        let mut params = SimParams::default();
        assert!(simulate(&params).unwrap().summary.jerk.is_none());
        params.use_jerk = true;
        assert!(simulate(&params).unwrap().summary.jerk.is_some());
    }

    #[test]
    fn test_reruns_are_identical() {
        let params = SimParams::default();
        let a = simulate(&params).unwrap();
        let b = simulate(&params).unwrap();
        assert_eq!(a.points.len(), b.points.len());
        assert_eq!(a.summary.peak_deviation_kmh, b.summary.peak_deviation_kmh);
        assert_eq!(a.summary.total_distance_m, b.summary.total_distance_m);
    }
}
