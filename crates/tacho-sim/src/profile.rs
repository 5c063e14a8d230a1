//! Ground-truth speed profiles.
//!
//! Both variants are pure functions of time, clamped to the start speed
//! before the transition and the end speed after it. The cubic Bezier blend
//! lets one configuration drive both a physically-inspired S-curve and the
//! trivial linear ramp without branching anywhere else in the pipeline.

use crate::sim::SimParams;

/// Ground-truth speed at `t_ms`, total over `t in [0, inf)`.
pub fn actual_speed(params: &SimParams, t_ms: f64) -> f64 {
    if params.use_jerk {
        scurve_speed(params, t_ms)
    } else {
        linear_speed(params, t_ms)
    }
}

/// Constant-acceleration ramp from start to end speed.
fn linear_speed(params: &SimParams, t_ms: f64) -> f64 {
    if t_ms <= 0.0 {
        return params.start_speed_kmh;
    }
    if t_ms >= params.duration_ms {
        return params.end_speed_kmh;
    }
    let accel = (params.end_speed_kmh - params.start_speed_kmh) / params.duration_ms;
    params.start_speed_kmh + accel * t_ms
}

/// Jerk-limited S-curve: cubic Bezier blend between the two speeds.
///
/// Lower factors (near 0) sharpen the curve at that end; factors near 1
/// smooth it. Values outside (0, 1] are accepted and simply produce unusual
/// but well-defined shapes.
fn scurve_speed(params: &SimParams, t_ms: f64) -> f64 {
    if t_ms <= 0.0 {
        return params.start_speed_kmh;
    }
    if t_ms >= params.duration_ms {
        return params.end_speed_kmh;
    }
    let t = t_ms / params.duration_ms;
    let cp1 = params.initial_jerk_factor;
    let cp2 = 1.0 - params.final_jerk_factor;
    let blend = bezier_blend(t, cp1, cp2);
    params.start_speed_kmh + (params.end_speed_kmh - params.start_speed_kmh) * blend
}

/// Cubic Bezier with anchors 0 and 1:
/// `B(t) = 3(1-t)^2 t cp1 + 3(1-t) t^2 cp2 + t^3`.
fn bezier_blend(t: f64, cp1: f64, cp2: f64) -> f64 {
    let u = 1.0 - t;
    3.0 * u * u * t * cp1 + 3.0 * u * t * t * cp2 + t * t * t
}
