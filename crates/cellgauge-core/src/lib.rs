//! Hardware-independent core library for cellgauge
//!
//! This crate contains the battery aging model of the cellgauge fuel-gauge
//! emulator: the compiled-in reference tables, the table interpolator, the
//! closed-form analytic model, and the gauge that selects between them per
//! metric.
//!
//! It is `#![no_std]` so it compiles on both embedded targets and desktop
//! hosts (for the simulator and tests). Every metric operation is total and
//! allocation-free; configuration is validated once at construction.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod cycle_counter;
pub mod gauge;
pub mod interpolation;
pub mod metrics;
pub mod models;
pub mod report;
pub mod tables;

pub use config::{BatterySpec, ConfigError};
pub use cycle_counter::CycleCounter;
pub use gauge::{FuelGauge, ModelPath, PathComparison, PathSelection};
pub use metrics::Metric;
pub use models::{AnalyticModel, HealthModel, TableModel};
pub use report::HealthReport;
