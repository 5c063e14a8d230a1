//! Parameter definitions for the simulation form.

/// Parameter specification with bounds and step size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// Human-readable label.
    pub label: &'static str,
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
    /// Step size for sliders.
    pub step: f64,
}

impl ParamSpec {
    /// Create a new parameter specification.
    pub const fn new(label: &'static str, min: f64, max: f64, step: f64) -> Self {
        Self {
            label,
            min,
            max,
            step,
        }
    }
}

/// Motion transition parameters.
pub mod motion {
    use super::ParamSpec;

    pub const START_SPEED: ParamSpec = ParamSpec::new("Start Speed (km/h)", -100.0, 300.0, 1.0);
    pub const END_SPEED: ParamSpec = ParamSpec::new("End Speed (km/h)", -100.0, 300.0, 1.0);
    pub const DURATION: ParamSpec = ParamSpec::new("Duration (ms)", 100.0, 20000.0, 100.0);
}

/// S-curve shape parameters.
pub mod curve {
    use super::ParamSpec;

    pub const INITIAL_JERK_FACTOR: ParamSpec =
        ParamSpec::new("Initial Jerk Factor", 0.05, 1.0, 0.05);
    pub const FINAL_JERK_FACTOR: ParamSpec = ParamSpec::new("Final Jerk Factor", 0.05, 1.0, 0.05);
}

/// Link timing parameters. Display only; the periods are fixed by the link
/// being modeled.
pub mod link {
    use super::ParamSpec;

    pub const SENDER_INTERVAL: ParamSpec = ParamSpec::new("Sender Interval (ms)", 105.0, 105.0, 0.0);
    pub const RECEIVER_INTERVAL: ParamSpec =
        ParamSpec::new("Receiver Interval (ms)", 20.0, 20.0, 0.0);
}
