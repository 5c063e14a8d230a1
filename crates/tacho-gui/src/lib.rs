//! Tacho GUI - web interface for the link simulator.
//!
//! The shell only serializes engine output; chart rendering happens in the
//! browser off the series this crate returns.

use axum::{extract::Query, routing::get, Json, Router};
use serde::Serialize;
use std::collections::HashMap;
use tacho_core::HarnessInit;
use tacho_sim::{params, simulate, SimParams, SimulationResult};
use tower_http::services::ServeDir;

/// Creates the Axum router with all routes
pub fn create_router() -> Router {
    Router::new()
        .route("/api/simulate", get(handle_simulate))
        .route("/api/chart/{chart_type}", get(handle_chart_data))
        .route("/api/params", get(handle_params))
        .nest_service("/static", ServeDir::new("crates/tacho-gui/static"))
        .fallback_service(ServeDir::new("crates/tacho-gui/templates"))
}

/// Parse config from query parameters. Unknown or malformed values fall back
/// to the defaults, which carry the fixed link periods.
fn parse_config(params: &HashMap<String, String>) -> SimParams {
    let mut config = SimParams::default();

    macro_rules! parse_param {
        ($field:ident, $name:expr, $type:ty) => {
            if let Some(val) = params.get($name).and_then(|v| v.parse::<$type>().ok()) {
                config.$field = val;
            }
        };
    }

    parse_param!(start_speed_kmh, "start_speed", f64);
    parse_param!(end_speed_kmh, "end_speed", f64);
    parse_param!(duration_ms, "duration", f64);
    parse_param!(use_jerk, "use_jerk", bool);
    parse_param!(initial_jerk_factor, "initial_jerk_factor", f64);
    parse_param!(final_jerk_factor, "final_jerk_factor", f64);

    config
}

/// Handle simulation request
async fn handle_simulate(
    Query(params): Query<HashMap<String, String>>,
) -> Json<FullSimulationResponse> {
    let config = parse_config(&params);
    Json(run_full_simulation(&config))
}

/// Handle specific chart data requests
async fn handle_chart_data(
    axum::extract::Path(chart_type): axum::extract::Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<ChartData> {
    let config = parse_config(&params);
    Json(generate_chart_data(&chart_type, &config))
}

/// Handle form parameter metadata requests
async fn handle_params() -> Json<Vec<ParamEntry>> {
    Json(param_entries())
}

/// Full simulation response with all data
#[derive(Serialize, Default)]
struct FullSimulationResponse {
    time: Vec<f64>,
    actual: Vec<f64>,
    received: Vec<f64>,
    interpolated: Vec<f64>,
    distance: Vec<f64>,
    metrics: MetricsResponse,
    axis_min: f64,
    axis_max: f64,
    success: bool,
}

#[derive(Serialize, Default)]
struct MetricsResponse {
    acceleration_ms2: f64,
    peak_deviation_kmh: f64,
    peak_deviation_pct: f64,
    total_distance_m: f64,
    duration_distance_m: f64,
    stabilization_time_ms: Option<f64>,
    stabilization_distance_m: Option<f64>,
    jerk_a_ms3: Option<f64>,
    jerk_b_ms3: Option<f64>,
    /// Preformatted initializer block for the external jerk-motion harness.
    harness_init: Option<String>,
}

#[derive(Serialize)]
struct ChartData {
    time: Vec<f64>,
    series: Vec<ChartSeries>,
    title: String,
    y_label: String,
}

#[derive(Serialize)]
struct ChartSeries {
    label: String,
    data: Vec<f64>,
}

/// One form field: slider bounds plus the default value.
#[derive(Serialize)]
struct ParamEntry {
    name: String,
    label: String,
    min: f64,
    max: f64,
    step: f64,
    default: f64,
}

/// Run the engine and flatten its result into the response columns.
fn run_full_simulation(config: &SimParams) -> FullSimulationResponse {
    let result = match simulate(config) {
        Ok(result) => result,
        // Validation failure: an empty response with success unset, so the
        // form can flag the input without a partial chart.
        Err(_) => return FullSimulationResponse::default(),
    };

    let summary = &result.summary;
    FullSimulationResponse {
        time: result.points.iter().map(|p| p.time_ms).collect(),
        actual: result.points.iter().map(|p| p.actual_kmh).collect(),
        received: result.points.iter().map(|p| p.received_kmh).collect(),
        interpolated: result.points.iter().map(|p| p.interpolated_kmh).collect(),
        distance: result.distances.iter().map(|d| d.distance_m).collect(),
        metrics: MetricsResponse {
            acceleration_ms2: summary.acceleration_ms2,
            peak_deviation_kmh: summary.peak_deviation_kmh,
            peak_deviation_pct: summary.peak_deviation_pct,
            total_distance_m: summary.total_distance_m,
            duration_distance_m: summary.duration_distance_m,
            stabilization_time_ms: summary.stabilization.map(|s| s.time_ms),
            stabilization_distance_m: summary.stabilization.map(|s| s.distance_m),
            jerk_a_ms3: summary.jerk.map(|j| j.jerk_a_ms3),
            jerk_b_ms3: summary.jerk.map(|j| j.jerk_b_ms3),
            harness_init: config.use_jerk.then(|| {
                HarnessInit::new(
                    config.start_speed_kmh,
                    config.end_speed_kmh,
                    config.duration_ms,
                    config.initial_jerk_factor,
                    config.final_jerk_factor,
                )
                .to_string()
            }),
        },
        axis_min: result.axis.min_value,
        axis_max: result.axis.max_value,
        success: true,
    }
}

fn generate_chart_data(chart_type: &str, config: &SimParams) -> ChartData {
    let result = match simulate(config) {
        Ok(result) => result,
        Err(_) => {
            return ChartData {
                time: vec![],
                series: vec![],
                title: "Invalid configuration".to_string(),
                y_label: String::new(),
            }
        }
    };

    match chart_type {
        "distance" => distance_chart(&result),
        // "speed" and anything unknown fall back to the speed chart.
        _ => speed_chart(&result),
    }
}

fn speed_chart(result: &SimulationResult) -> ChartData {
    ChartData {
        time: result.points.iter().map(|p| p.time_ms).collect(),
        series: vec![
            ChartSeries {
                label: "Actual".to_string(),
                data: result.points.iter().map(|p| p.actual_kmh).collect(),
            },
            ChartSeries {
                label: "Received".to_string(),
                data: result.points.iter().map(|p| p.received_kmh).collect(),
            },
            ChartSeries {
                label: "Interpolated".to_string(),
                data: result.points.iter().map(|p| p.interpolated_kmh).collect(),
            },
        ],
        title: "Speed vs Time".to_string(),
        y_label: "Speed (km/h)".to_string(),
    }
}

fn distance_chart(result: &SimulationResult) -> ChartData {
    ChartData {
        time: result.distances.iter().map(|d| d.time_ms).collect(),
        series: vec![
            ChartSeries {
                label: "Distance".to_string(),
                data: result.distances.iter().map(|d| d.distance_m).collect(),
            },
            ChartSeries {
                label: "Speed".to_string(),
                data: result.distances.iter().map(|d| d.speed_kmh).collect(),
            },
        ],
        title: "Distance vs Time".to_string(),
        y_label: "Distance (m)".to_string(),
    }
}

fn param_entries() -> Vec<ParamEntry> {
    let defaults = SimParams::default();
    let entry = |name: &str, spec: params::ParamSpec, default: f64| ParamEntry {
        name: name.to_string(),
        label: spec.label.to_string(),
        min: spec.min,
        max: spec.max,
        step: spec.step,
        default,
    };

    vec![
        entry(
            "start_speed",
            params::motion::START_SPEED,
            defaults.start_speed_kmh,
        ),
        entry(
            "end_speed",
            params::motion::END_SPEED,
            defaults.end_speed_kmh,
        ),
        entry("duration", params::motion::DURATION, defaults.duration_ms),
        entry(
            "initial_jerk_factor",
            params::curve::INITIAL_JERK_FACTOR,
            defaults.initial_jerk_factor,
        ),
        entry(
            "final_jerk_factor",
            params::curve::FINAL_JERK_FACTOR,
            defaults.final_jerk_factor,
        ),
    ]
}
