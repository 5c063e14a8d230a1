//! Tacho CLI - command line interface for the link simulator.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tacho_core::HarnessInit;
use tacho_sim::{simulate, SimParams, SimulationResult};

/// Public function that can be called from the main binary
pub fn run_cli_main(args: &[&str]) -> Result<()> {
    let args = Args::parse_from(args);
    main_inner(args)
}

#[derive(Parser, Debug)]
#[command(name = "tacho-cli")]
#[command(about = "Sampled speed-telemetry link simulator")]
#[command(version)]
pub struct Args {
    /// Output directory
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Series output file format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Run a single simulation
    #[arg(long)]
    single: bool,

    // ── Transition parameters ─────────────────────────────────
    #[arg(long, default_value_t = 0.0)]
    start_speed: f64,

    #[arg(long, default_value_t = 100.0)]
    end_speed: f64,

    #[arg(long, default_value_t = 1000.0)]
    duration: f64,

    // ── Profile options ───────────────────────────────────────
    /// Use the jerk-limited S-curve profile instead of the linear ramp
    #[arg(long)]
    jerk: bool,

    #[arg(long, default_value_t = 0.3)]
    initial_jerk_factor: f64,

    #[arg(long, default_value_t = 0.3)]
    final_jerk_factor: f64,

    // ── Sweep options ─────────────────────────────────────────
    #[arg(long, default_value_t = 5)]
    sweep_steps: usize,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

fn main_inner(args: Args) -> Result<()> {
    println!("Tacho Link Simulator");
    println!("====================\n");

    if args.single {
        run_single(&args)?;
    } else {
        run_sweep(&args)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Single Run
// ---------------------------------------------------------------------------
fn run_single(args: &Args) -> Result<()> {
    println!("Running single simulation...");

    let params = build_sim_params(args);
    let result = simulate(&params)?;

    print_run_stats(&params, &result);

    if args.jerk {
        let init = HarnessInit::new(
            params.start_speed_kmh,
            params.end_speed_kmh,
            params.duration_ms,
            params.initial_jerk_factor,
            params.final_jerk_factor,
        );
        println!("\nJerk motion harness init:");
        println!("{}", init);
    }

    write_output(args, &result)?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Sweep Run
// ---------------------------------------------------------------------------
fn run_sweep(args: &Args) -> Result<()> {
    // Sweep the transition duration around the configured value to show how
    // the overshoot depends on how fast the profile truncates.
    println!("Sweeping duration over {} runs", args.sweep_steps);

    let steps = args.sweep_steps.max(2);
    let mut summary_rows = Vec::new();

    let start_dur = args.duration * 0.5;
    let end_dur = args.duration * 1.5;

    for i in 0..steps {
        let val = start_dur + (end_dur - start_dur) * (i as f64 / (steps - 1) as f64);

        let mut params = build_sim_params(args);
        params.duration_ms = val;

        let result = simulate(&params)?;
        let summary = &result.summary;

        println!(
            "Run {}/{} | Duration: {:.0} ms -> Peak deviation: {:.2} km/h",
            i + 1,
            steps,
            val,
            summary.peak_deviation_kmh
        );

        summary_rows.push((
            val,
            summary.peak_deviation_kmh,
            summary.peak_deviation_pct,
            summary.total_distance_m,
        ));
    }

    // Write summary
    let path = args.output_dir.join("sweep_summary.csv");
    std::fs::create_dir_all(&args.output_dir)?;
    let mut wtr = csv::Writer::from_path(&path)?;
    wtr.write_record([
        "duration_ms",
        "peak_deviation_kmh",
        "peak_deviation_pct",
        "total_distance_m",
    ])?;
    for (dur, dev, pct, dist) in summary_rows {
        wtr.write_record(&[
            format!("{:.2}", dur),
            format!("{:.4}", dev),
            format!("{:.2}", pct),
            format!("{:.2}", dist),
        ])?;
    }
    wtr.flush()?;

    println!("\nSweep complete. Summary at {:?}", path);
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build_sim_params(args: &Args) -> SimParams {
    SimParams {
        start_speed_kmh: args.start_speed,
        end_speed_kmh: args.end_speed,
        duration_ms: args.duration,
        use_jerk: args.jerk,
        initial_jerk_factor: args.initial_jerk_factor,
        final_jerk_factor: args.final_jerk_factor,
        // The link periods are fixed; only the transition is configurable.
        ..SimParams::default()
    }
}

fn print_run_stats(params: &SimParams, result: &SimulationResult) {
    let summary = &result.summary;
    let deviation_label = if params.start_speed_kmh < params.end_speed_kmh {
        "Overshoot"
    } else {
        "Undershoot"
    };

    println!("\nSimulation Stats:");
    println!("  Ticks:        {}", result.points.len());
    println!("  Horizon:      {:.0} ms", params.horizon_ms());
    println!("  Acceleration: {:.3} m/s^2", summary.acceleration_ms2);
    println!(
        "  {}:    {:.3} km/h ({:.1} %)",
        deviation_label, summary.peak_deviation_kmh, summary.peak_deviation_pct
    );
    println!("  Distance:     {:.2} m total", summary.total_distance_m);
    println!("  At Duration:  {:.2} m", summary.duration_distance_m);
    match summary.stabilization {
        Some(stab) => println!(
            "  Stabilized:   {:.0} ms / {:.2} m",
            stab.time_ms, stab.distance_m
        ),
        None => println!("  Stabilized:   never (within horizon)"),
    }
    println!("-----------------------------");
}

fn write_output(args: &Args, result: &SimulationResult) -> Result<()> {
    std::fs::create_dir_all(&args.output_dir)?;

    match args.format {
        OutputFormat::Csv => {
            let path = args.output_dir.join("reconstruction.csv");
            let mut wtr = csv::Writer::from_path(&path)?;
            wtr.write_record([
                "time_ms",
                "actual_kmh",
                "received_kmh",
                "interpolated_kmh",
                "distance_m",
            ])?;
            for (p, d) in result.points.iter().zip(&result.distances) {
                wtr.write_record(&[
                    format!("{:.1}", p.time_ms),
                    format!("{:.4}", p.actual_kmh),
                    format!("{:.4}", p.received_kmh),
                    format!("{:.4}", p.interpolated_kmh),
                    format!("{:.4}", d.distance_m),
                ])?;
            }
            wtr.flush()?;
            println!("Series written to {:?}", path);
        }
        OutputFormat::Json => {
            let path = args.output_dir.join("reconstruction.json");
            let series = serde_json::json!({
                "time_ms": result.points.iter().map(|p| p.time_ms).collect::<Vec<_>>(),
                "actual_kmh": result.points.iter().map(|p| p.actual_kmh).collect::<Vec<_>>(),
                "received_kmh": result.points.iter().map(|p| p.received_kmh).collect::<Vec<_>>(),
                "interpolated_kmh": result.points.iter().map(|p| p.interpolated_kmh).collect::<Vec<_>>(),
                "distance_m": result.distances.iter().map(|d| d.distance_m).collect::<Vec<_>>(),
            });
            std::fs::write(&path, serde_json::to_string_pretty(&series)?)?;
            println!("Series written to {:?}", path);
        }
    }

    let summary = &result.summary;
    let metrics = serde_json::json!({
        "acceleration_ms2": summary.acceleration_ms2,
        "peak_deviation_kmh": summary.peak_deviation_kmh,
        "peak_deviation_pct": summary.peak_deviation_pct,
        "total_distance_m": summary.total_distance_m,
        "duration_distance_m": summary.duration_distance_m,
        "stabilization_time_ms": summary.stabilization.map(|s| s.time_ms),
        "stabilization_distance_m": summary.stabilization.map(|s| s.distance_m),
        "jerk_a_ms3": summary.jerk.map(|j| j.jerk_a_ms3),
        "jerk_b_ms3": summary.jerk.map(|j| j.jerk_b_ms3),
        "axis_min": result.axis.min_value,
        "axis_max": result.axis.max_value,
    });
    let metrics_path = args.output_dir.join("metrics.json");
    std::fs::write(&metrics_path, serde_json::to_string_pretty(&metrics)?)?;
    println!("Metrics written to {:?}", metrics_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_map_onto_sim_params() {
        let args = Args::parse_from([
            "tacho-cli",
            "--single",
            "--start-speed",
            "10",
            "--end-speed",
            "60",
            "--duration",
            "2000",
            "--jerk",
            "--initial-jerk-factor",
            "0.5",
        ]);
        let params = build_sim_params(&args);
        assert_eq!(params.start_speed_kmh, 10.0);
        assert_eq!(params.end_speed_kmh, 60.0);
        assert_eq!(params.duration_ms, 2000.0);
        assert!(params.use_jerk);
        assert_eq!(params.initial_jerk_factor, 0.5);
        assert_eq!(params.final_jerk_factor, 0.3);
        // The link periods are not CLI-configurable.
        assert_eq!(params.sender_interval_ms, 105.0);
        assert_eq!(params.receiver_interval_ms, 20.0);
    }

    #[test]
    fn test_defaults_run_the_sweep_mode() {
        let args = Args::parse_from(["tacho-cli"]);
        assert!(!args.single);
        assert_eq!(args.sweep_steps, 5);
    }
}
