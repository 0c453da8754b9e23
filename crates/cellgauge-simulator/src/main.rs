//! Desktop telemetry loop for the cellgauge battery aging model.
//!
//! Stands in for the device loop: every simulated discharge completion
//! advances the cycle counter, evaluates the gauge and logs the resulting
//! report. Both computation paths are compared on every step and a warning is
//! logged when they drift apart.
//!
//! # Usage
//!
//! ```text
//! cellgauge-simulator [SPEC_FILE]
//! ```
//!
//! `SPEC_FILE` is an optional postcard-encoded battery spec. Without it the
//! compiled-in cell ratings are used. Set `RUST_LOG=debug` to also see counter
//! advances and encoded payload sizes.

use std::process::ExitCode;
use std::time::Duration;

use log::{debug, error, info, warn};

use cellgauge_core::gauge::DEFAULT_AGREEMENT_TOLERANCE;
use cellgauge_core::{BatterySpec, CycleCounter, FuelGauge, HealthReport};

// ---------------------------------------------------------------------------
// Simulation constants
// ---------------------------------------------------------------------------

/// Wall-clock pause between simulated discharge completions.
const STEP_INTERVAL: Duration = Duration::from_millis(20);

/// Cycles simulated past end-of-life, to show both paths' saturation.
const OVERSHOOT_CYCLES: u16 = 150;

/// Log a full report every this many cycles.
const REPORT_EVERY: u16 = 10;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Read and validate a postcard-encoded spec from `path`.
fn read_spec(path: &str) -> Option<BatterySpec> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Failed to read battery spec from {}: {}", path, e);
            return None;
        }
    };

    match BatterySpec::from_bytes(&bytes) {
        Ok(spec) => {
            info!("Loaded battery spec from {}", path);
            Some(spec)
        }
        Err(e) => {
            error!("Invalid battery spec in {}: {}", path, e);
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

fn log_report(report: &HealthReport) {
    info!(
        "cycle {:>4} | health {:>5.1} % | retention {:>5.1} % | power {:>5.1} % | capacity {:>4} mAh | self-discharge {:.2} %/month",
        report.cycle_count,
        report.health,
        report.capacity_retention,
        report.power_capability,
        report.estimated_capacity_mah,
        report.self_discharge_rate
    );

    let mut buf = [0u8; HealthReport::MAX_ENCODED_SIZE];
    match report.encode(&mut buf) {
        Ok(encoded) => debug!("Encoded report payload: {} bytes", encoded.len()),
        Err(e) => error!("Failed to encode report: {:?}", e),
    }
}

fn check_agreement(gauge: &FuelGauge, cycle_count: u16) {
    let comparison = gauge.compare(cycle_count);
    for metric in comparison.exceeding(DEFAULT_AGREEMENT_TOLERANCE) {
        let divergence = comparison.divergence(metric);
        warn!(
            "cycle {}: {} paths diverge by {:.1} % (table {:.2}, analytic {:.2} {})",
            cycle_count,
            metric,
            divergence.relative() * 100.0,
            divergence.table,
            divergence.analytic,
            metric.unit()
        );
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    env_logger::init();
    info!("Starting cellgauge simulator");

    let spec = match std::env::args().nth(1) {
        Some(path) => match read_spec(&path) {
            Some(spec) => spec,
            None => return ExitCode::FAILURE,
        },
        None => BatterySpec::DEFAULT,
    };

    let gauge = match FuelGauge::new(spec) {
        Ok(gauge) => gauge,
        Err(e) => {
            error!("Fatal configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut counter = CycleCounter::default();
    let last_cycle = spec.max_cycles.saturating_add(OVERSHOOT_CYCLES);
    info!(
        "Simulating cycles {} to {} ({} rated, {} end-of-life)",
        counter.count(),
        last_cycle,
        spec.rated_cycles,
        spec.max_cycles
    );

    log_report(&gauge.report(counter.count()));

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    while counter.count() < last_cycle {
        let cycle_count = counter.complete_cycle();
        let report = gauge.report(cycle_count);

        if cycle_count % REPORT_EVERY == 0 || cycle_count == spec.max_cycles {
            log_report(&report);
        }
        if counter.evaluation_count(spec.max_cycles) < cycle_count {
            debug!(
                "cycle {} past end-of-life, tables evaluated at {}",
                cycle_count, spec.max_cycles
            );
        }
        check_agreement(&gauge, cycle_count);

        std::thread::sleep(STEP_INTERVAL);
    }

    info!("Simulator exiting");
    ExitCode::SUCCESS
}
