//! Folds the reconstruction into scalar metrics: acceleration, peak
//! overshoot/undershoot, traveled distance, and settling behavior.

use crate::reconstruct::ReconstructedPoint;
use crate::sim::SimParams;
use tacho_core::jerk::{self, JerkParams};
use tacho_core::units::{kmh_to_ms, ms_to_s, KMH_PER_MS_TO_MS2};

/// Tolerance around the end speed within which the estimate counts as
/// settled.
pub const STABILIZATION_TOLERANCE_KMH: f64 = 0.1;

/// Cumulative traveled distance at one receiver tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistancePoint {
    pub time_ms: f64,
    pub distance_m: f64,
    /// The estimate the distance integral runs over.
    pub speed_kmh: f64,
}

/// First tick after the nominal duration at which the estimate settled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stabilization {
    pub time_ms: f64,
    pub distance_m: f64,
}

/// Scalar metrics folded from one run.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryMetrics {
    /// Nominal acceleration of the transition, signed (negative when
    /// decelerating).
    pub acceleration_ms2: f64,
    /// Peak overshoot magnitude when accelerating, undershoot when
    /// decelerating. Always >= 0.
    pub peak_deviation_kmh: f64,
    /// Peak deviation as a percentage of the reference speed (end speed when
    /// accelerating, start speed when decelerating).
    pub peak_deviation_pct: f64,
    /// Distance accumulated over the full horizon.
    pub total_distance_m: f64,
    /// Distance accumulated by the time the nominal duration elapses.
    pub duration_distance_m: f64,
    /// `None` when the estimate never settles within the horizon, which is
    /// distinct from settling at distance 0 (a start == end run).
    pub stabilization: Option<Stabilization>,
    /// Physical jerk magnitudes, present only for the S-curve profile.
    pub jerk: Option<JerkParams>,
}

/// Plot range for the speed chart, padded past the peak deviation so the
/// transient stays visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min_value: f64,
    pub max_value: f64,
}

/// Integrate the estimated speed into a cumulative distance series.
///
/// Trapezoidal rule per receiver step, speeds converted to m/s. The series
/// shares the receiver grid with `points` and starts at distance 0.
pub fn distance_series(params: &SimParams, points: &[ReconstructedPoint]) -> Vec<DistancePoint> {
    let dt_s = ms_to_s(params.receiver_interval_ms);
    let mut total_m = 0.0;
    let mut prev_kmh = None;

    points
        .iter()
        .map(|p| {
            if let Some(prev) = prev_kmh {
                total_m += (kmh_to_ms(prev) + kmh_to_ms(p.interpolated_kmh)) / 2.0 * dt_s;
            }
            prev_kmh = Some(p.interpolated_kmh);
            DistancePoint {
                time_ms: p.time_ms,
                distance_m: total_m,
                speed_kmh: p.interpolated_kmh,
            }
        })
        .collect()
}

/// Fold the reconstruction and distance series into the summary metrics.
pub fn summarize(
    params: &SimParams,
    points: &[ReconstructedPoint],
    distances: &[DistancePoint],
) -> SummaryMetrics {
    let start = params.start_speed_kmh;
    let end = params.end_speed_kmh;
    let accelerating = start < end;

    // Running extremum of the estimate, seeded at the end speed so a run that
    // never leaves the target reports zero deviation.
    let mut extremum = end;
    let mut duration_distance_m = None;
    let mut stabilization = None;

    for (p, d) in points.iter().zip(distances) {
        if accelerating {
            extremum = extremum.max(p.interpolated_kmh);
        } else {
            extremum = extremum.min(p.interpolated_kmh);
        }

        if duration_distance_m.is_none() && p.time_ms >= params.duration_ms {
            duration_distance_m = Some(d.distance_m);
        }
        if stabilization.is_none()
            && p.time_ms > params.duration_ms
            && (p.interpolated_kmh - end).abs() <= STABILIZATION_TOLERANCE_KMH
        {
            stabilization = Some(Stabilization {
                time_ms: p.time_ms,
                distance_m: d.distance_m,
            });
        }
    }

    let peak_deviation_kmh = if accelerating {
        (extremum - end).max(0.0)
    } else {
        (end - extremum).max(0.0)
    };

    // Percentage reference is the speed the transient is measured against; a
    // zero reference is substituted with 1 so the result stays finite.
    let reference = if accelerating { end } else { start };
    let reference = if reference == 0.0 { 1.0 } else { reference };

    SummaryMetrics {
        acceleration_ms2: (end - start) / params.duration_ms * KMH_PER_MS_TO_MS2,
        peak_deviation_kmh,
        peak_deviation_pct: peak_deviation_kmh / reference * 100.0,
        total_distance_m: distances.last().map(|d| d.distance_m).unwrap_or(0.0),
        duration_distance_m: duration_distance_m.unwrap_or(0.0),
        stabilization,
        jerk: params.use_jerk.then(|| {
            jerk::convert(
                start,
                end,
                params.duration_ms,
                params.initial_jerk_factor,
                params.final_jerk_factor,
            )
        }),
    }
}

/// Plot range for the speed chart.
///
/// Each side is padded by `max(2, deviation_from_end + 1)`, computed
/// independently, and the lower bound never drops below zero.
pub fn axis_range(params: &SimParams, points: &[ReconstructedPoint]) -> AxisRange {
    let start = params.start_speed_kmh;
    let end = params.end_speed_kmh;

    let mut min_interp = f64::INFINITY;
    let mut max_interp = f64::NEG_INFINITY;
    for p in points {
        min_interp = min_interp.min(p.interpolated_kmh);
        max_interp = max_interp.max(p.interpolated_kmh);
    }

    let pad_low = ((end - min_interp).max(0.0) + 1.0).max(2.0);
    let pad_high = ((max_interp - end).max(0.0) + 1.0).max(2.0);

    AxisRange {
        min_value: (start.min(end).min(min_interp) - pad_low).max(0.0),
        max_value: start.max(end).max(max_interp) + pad_high,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconstruct::run_reconstruction;
    use crate::sampler::sample_transmission;

    fn run(params: &SimParams) -> (Vec<ReconstructedPoint>, Vec<DistancePoint>, SummaryMetrics) {
        let points = run_reconstruction(params, &sample_transmission(params));
        let distances = distance_series(params, &points);
        let summary = summarize(params, &points, &distances);
        (points, distances, summary)
    }

    #[test]
    fn test_acceleration_scenario_0_to_30() {
        let params = SimParams {
            start_speed_kmh: 0.0,
            end_speed_kmh: 30.0,
            duration_ms: 1000.0,
            ..SimParams::default()
        };
        let (_, _, summary) = run(&params);
        // 0.03 km/h per ms * 1000/3.6
        assert!((summary.acceleration_ms2 - 30.0 / 3.6).abs() < 1e-9);
        assert!(summary.acceleration_ms2 > 8.3 && summary.acceleration_ms2 < 8.4);
    }

    #[test]
    fn test_deceleration_is_negative() {
        let params = SimParams {
            start_speed_kmh: 100.0,
            end_speed_kmh: 0.0,
            ..SimParams::default()
        };
        let (_, _, summary) = run(&params);
        assert!(summary.acceleration_ms2 < 0.0);
    }

    #[test]
    fn test_distance_monotonic_for_nonnegative_speeds() {
        let params = SimParams::default();
        let (points, distances, _) = run(&params);
        assert!(points.iter().all(|p| p.interpolated_kmh >= 0.0));
        for pair in distances.windows(2) {
            assert!(pair[1].distance_m >= pair[0].distance_m);
        }
        assert_eq!(distances[0].distance_m, 0.0);
    }

    #[test]
    fn test_duration_distance_matches_direct_trapezoid() {
        let params = SimParams {
            start_speed_kmh: 0.0,
            end_speed_kmh: 30.0,
            duration_ms: 1000.0,
            ..SimParams::default()
        };
        let (points, _, summary) = run(&params);

        let dt_s = params.receiver_interval_ms / 1000.0;
        let mut expected = 0.0;
        for pair in points.windows(2) {
            if pair[1].time_ms > params.duration_ms {
                break;
            }
            expected +=
                (pair[0].interpolated_kmh + pair[1].interpolated_kmh) / 2.0 / 3.6 * dt_s;
        }
        assert!((summary.duration_distance_m - expected).abs() < 1e-9);
    }

    #[test]
    fn test_overshoot_reported_when_accelerating() {
        let params = SimParams::default();
        let (points, _, summary) = run(&params);
        // The stale slope projects past the clamp, so the peak estimate
        // exceeds the end speed and the deviation picks that up.
        let peak = points
            .iter()
            .map(|p| p.interpolated_kmh)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(summary.peak_deviation_kmh > 0.0);
        assert!((summary.peak_deviation_kmh - (peak - params.end_speed_kmh)).abs() < 1e-9);
    }

    #[test]
    fn test_undershoot_reported_when_decelerating() {
        let params = SimParams {
            start_speed_kmh: 100.0,
            end_speed_kmh: 20.0,
            ..SimParams::default()
        };
        let (points, _, summary) = run(&params);
        let trough = points
            .iter()
            .map(|p| p.interpolated_kmh)
            .fold(f64::INFINITY, f64::min);
        assert!(summary.peak_deviation_kmh > 0.0);
        assert!((summary.peak_deviation_kmh - (params.end_speed_kmh - trough)).abs() < 1e-9);
    }

    #[test]
    fn test_percentage_guard_at_zero_reference() {
        // Accelerating toward 0 km/h keeps the reference at the end speed,
        // which is zero; the guard substitutes 1 instead of dividing by it.
        let params = SimParams {
            start_speed_kmh: -30.0,
            end_speed_kmh: 0.0,
            ..SimParams::default()
        };
        let (_, _, summary) = run(&params);
        assert!(summary.peak_deviation_pct.is_finite());
    }

    #[test]
    fn test_stabilization_latched_after_duration() {
        let params = SimParams::default();
        let (points, _, summary) = run(&params);
        let stab = summary.stabilization.expect("estimate settles in horizon");
        assert!(stab.time_ms > params.duration_ms);
        // The latched tick is the first one meeting the tolerance.
        for p in points
            .iter()
            .filter(|p| p.time_ms > params.duration_ms && p.time_ms < stab.time_ms)
        {
            assert!(
                (p.interpolated_kmh - params.end_speed_kmh).abs() > STABILIZATION_TOLERANCE_KMH
            );
        }
    }

    #[test]
    fn test_flat_run_settles_at_first_tick_past_duration() {
        // start == end never deviates, so it settles immediately after the
        // duration with a nonzero distance. Still Some, not "never settled".
        let params = SimParams {
            start_speed_kmh: 50.0,
            end_speed_kmh: 50.0,
            ..SimParams::default()
        };
        let (_, _, summary) = run(&params);
        let stab = summary.stabilization.unwrap();
        assert!(stab.time_ms > params.duration_ms);
        assert!(stab.time_ms <= params.duration_ms + params.receiver_interval_ms + 1e-9);
        assert!(stab.distance_m > 0.0);
        assert_eq!(summary.peak_deviation_kmh, 0.0);
    }

    #[test]
    fn test_jerk_params_only_in_scurve_mode() {
        let mut params = SimParams::default();
        let (_, _, summary) = run(&params);
        assert!(summary.jerk.is_none());

        params.use_jerk = true;
        let (_, _, summary) = run(&params);
        let jerk = summary.jerk.unwrap();
        assert!(jerk.jerk_a_ms3 > 0.0);
        assert!(jerk.jerk_b_ms3 > 0.0);
    }

    #[test]
    fn test_axis_range_covers_the_transient() {
        let params = SimParams::default();
        let (points, _, _) = run(&params);
        let axis = axis_range(&params, &points);
        let peak = points
            .iter()
            .map(|p| p.interpolated_kmh)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(axis.max_value >= peak + 1.0);
        assert!(axis.min_value <= params.start_speed_kmh);
        assert!(axis.min_value >= 0.0);
    }

    #[test]
    fn test_axis_range_minimum_padding() {
        // A flat run has no deviation, so both pads fall back to 2.
        let params = SimParams {
            start_speed_kmh: 50.0,
            end_speed_kmh: 50.0,
            ..SimParams::default()
        };
        let (points, _, _) = run(&params);
        let axis = axis_range(&params, &points);
        assert!((axis.min_value - 48.0).abs() < 1e-9);
        assert!((axis.max_value - 52.0).abs() < 1e-9);
    }
}
