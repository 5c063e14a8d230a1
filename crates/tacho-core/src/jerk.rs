//! Maps the dimensionless Bezier shape factors of the S-curve profile to
//! physical jerk magnitudes, and formats them as an initializer block for an
//! external jerk-limited-motion test harness.

use crate::units::{kmh_to_ms, ms_to_s};

use core::fmt;

/// Floor applied to both jerk magnitudes so a near-flat profile still yields
/// a usable harness parameter.
pub const MIN_JERK_MS3: f64 = 0.01;

/// Physical jerk magnitudes in m/s³ derived from the curve shape factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JerkParams {
    /// Jerk at the start of the transition (shaped by the initial factor).
    pub jerk_a_ms3: f64,
    /// Jerk at the end of the transition (shaped by the final factor).
    pub jerk_b_ms3: f64,
}

/// Derive jerk magnitudes from a speed transition and its shape factors.
///
/// Factors near 0 sharpen the curve at that end, raising the jerk needed to
/// realize it; factors near 1 smooth it. The result is display-only and is
/// never fed back into the profile.
pub fn convert(
    start_kmh: f64,
    end_kmh: f64,
    duration_ms: f64,
    initial_factor: f64,
    final_factor: f64,
) -> JerkParams {
    let dur_s = ms_to_s(duration_ms);
    let avg_accel = (kmh_to_ms(end_kmh) - kmh_to_ms(start_kmh)) / dur_s;
    // f64::abs lives in std; keep the core buildable without libm
    let mag = if avg_accel < 0.0 { -avg_accel } else { avg_accel };

    JerkParams {
        jerk_a_ms3: (mag * (2.0 - initial_factor) / (dur_s * initial_factor)).max(MIN_JERK_MS3),
        jerk_b_ms3: (mag * (2.0 - final_factor) / (dur_s * final_factor)).max(MIN_JERK_MS3),
    }
}

/// Parameter block seeding an external jerk-limited-motion test harness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarnessInit {
    pub start_speed_ms: f64,
    pub end_speed_ms: f64,
    pub avg_accel_ms2: f64,
    pub jerk: JerkParams,
}

impl HarnessInit {
    pub fn new(
        start_kmh: f64,
        end_kmh: f64,
        duration_ms: f64,
        initial_factor: f64,
        final_factor: f64,
    ) -> Self {
        let dur_s = ms_to_s(duration_ms);
        let start_speed_ms = kmh_to_ms(start_kmh);
        let end_speed_ms = kmh_to_ms(end_kmh);
        Self {
            start_speed_ms,
            end_speed_ms,
            avg_accel_ms2: (end_speed_ms - start_speed_ms) / dur_s,
            jerk: convert(start_kmh, end_kmh, duration_ms, initial_factor, final_factor),
        }
    }
}

impl fmt::Display for HarnessInit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "jerk_motion {{")?;
        writeln!(f, "    v_start: {:.3} m/s", self.start_speed_ms)?;
        writeln!(f, "    v_end:   {:.3} m/s", self.end_speed_ms)?;
        writeln!(f, "    accel:   {:.3} m/s^2", self.avg_accel_ms2)?;
        writeln!(f, "    jerk_a:  {:.3} m/s^3", self.jerk.jerk_a_ms3)?;
        writeln!(f, "    jerk_b:  {:.3} m/s^3", self.jerk.jerk_b_ms3)?;
        write!(f, "}}")
    }
}
