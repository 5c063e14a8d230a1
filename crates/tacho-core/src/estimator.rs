// ---------------------------------------------------------------------------
// Transmitted sample
// ---------------------------------------------------------------------------

/// One speed value as reported by the transmitter.
///
/// Samples arrive in strictly increasing time order; no two samples share a
/// timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedSample {
    pub time_ms: f64,
    pub speed_kmh: f64,
}

// ---------------------------------------------------------------------------
// Slope-hold estimator
// ---------------------------------------------------------------------------

/// Streaming estimator over the transmitted sample sequence.
///
/// Keeps only the last two samples seen. With a single sample the estimate is
/// a zero-order hold of that sample; with two or more, the estimate projects
/// forward from the newest sample along the slope implied by the previous
/// one. This is extrapolation, not interpolation: between sample arrivals the
/// estimate keeps following the old slope, which is exactly what produces the
/// overshoot the simulator measures when the true signal flattens out.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlopeEstimator {
    prev: Option<SpeedSample>,
    last: Option<SpeedSample>,
}

impl SlopeEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next transmitted sample. Callers must push samples in
    /// strictly increasing time order.
    pub fn push(&mut self, sample: SpeedSample) {
        self.prev = self.last;
        self.last = Some(sample);
    }

    /// Estimate the speed at `time_ms` from the samples pushed so far.
    ///
    /// Returns `None` until the first sample arrives. The slope denominator
    /// is the sender period, which is nonzero by construction.
    pub fn estimate(&self, time_ms: f64) -> Option<f64> {
        match (self.prev, self.last) {
            (_, None) => None,
            (None, Some(p)) => Some(p.speed_kmh),
            (Some(p1), Some(p2)) => {
                let slope = (p2.speed_kmh - p1.speed_kmh) / (p2.time_ms - p1.time_ms);
                Some(p2.speed_kmh + slope * (time_ms - p2.time_ms))
            }
        }
    }

    /// Zero-order hold of the most recent sample, for display alongside the
    /// extrapolated estimate. Not used by `estimate`.
    pub fn held(&self) -> Option<f64> {
        self.last.map(|s| s.speed_kmh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time_ms: f64, speed_kmh: f64) -> SpeedSample {
        SpeedSample { time_ms, speed_kmh }
    }

    #[test]
    fn test_empty_estimator() {
        let est = SlopeEstimator::new();
        assert!(est.estimate(0.0).is_none());
        assert!(est.held().is_none());
    }

    #[test]
    fn test_single_sample_holds() {
        let mut est = SlopeEstimator::new();
        est.push(sample(0.0, 12.5));
        assert_eq!(est.estimate(0.0), Some(12.5));
        assert_eq!(est.estimate(100.0), Some(12.5));
        assert_eq!(est.held(), Some(12.5));
    }

    #[test]
    fn test_two_samples_extrapolate() {
        let mut est = SlopeEstimator::new();
        est.push(sample(0.0, 0.0));
        est.push(sample(105.0, 10.5));
        // slope = 0.1 km/h per ms, projected 15 ms past the newest sample
        let v = est.estimate(120.0).unwrap();
        assert!((v - 12.0).abs() < 1e-9);
        // held value stays at the newest sample
        assert_eq!(est.held(), Some(10.5));
    }

    #[test]
    fn test_only_last_two_samples_matter() {
        let mut est = SlopeEstimator::new();
        est.push(sample(0.0, 50.0));
        est.push(sample(105.0, 10.5));
        est.push(sample(210.0, 21.0));
        // slope from (105, 10.5) -> (210, 21.0), the first sample is gone
        let v = est.estimate(230.0).unwrap();
        assert!((v - 23.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_slope_projects_below() {
        let mut est = SlopeEstimator::new();
        est.push(sample(0.0, 100.0));
        est.push(sample(105.0, 89.5));
        let v = est.estimate(210.0).unwrap();
        assert!((v - 79.0).abs() < 1e-9);
    }
}
